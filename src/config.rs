//! Page catalogue configuration.
//!
//! Handles loading and validating the `pages.toml` document that drives a
//! build: the dimensions, their values, the combination shapes, the base URL
//! and the presentation settings used by the renderer.
//!
//! ## Configuration Options
//!
//! ```toml
//! base_url = "https://roastmybook.example"   # Required, absolute http(s)
//! combinations = [                           # Required, one entry per pass
//!     ["genre", "roast_style", "target"],
//!     ["genre", "roast_style", "famous_critic"],
//! ]
//!
//! [site]
//! name = "Roast My Book"                     # Suffix of every <title>
//! publisher = "DenseMatrix"
//! publisher_url = "https://densematrix.ai"
//! cta_label = "Roast My Book Now →"
//! copyright = "© 2024 DenseMatrix"
//! analytics_id = "G-XXXXXXX"                 # Optional gtag snippet
//! localized_lang = "zh"                      # Language of display_localized
//!
//! [page]
//! heading_noun = "Book Roast"
//! heading_order = ["roast_style", "genre"]   # Defaults to declaration order
//! description = "Get a {roast_style} roast of your {genre} book."
//! description_max = 160
//! intro = "Ready to have your {genre} book roasted?"  # Body paragraph
//!
//! [processing]
//! max_processes = 4                          # Omit for auto = CPU cores
//!
//! [dimensions.genre]
//! label = "Genre"                            # Defaults to the key
//! slot = "lead"                              # lead | detail | aside
//! phrase = "{}"                              # Description fragment
//! fallback = ""                              # Wording when absent
//! lowercase = true                           # Lowercase inside descriptions
//! query_param = "genre"                      # CTA link parameter
//! values = [
//!     { id = "fiction", display_en = "Fiction", display_localized = "小说" },
//! ]
//! ```
//!
//! Dimensions keep their declaration order. Unknown keys are rejected to
//! catch typos early, and every value must carry `id` and `display_en`.

use crate::naming;
use crate::types::{Catalogue, CombinationShape, Dimension, DimensionValue, HeadingSlot};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("combinations[{shape}] references unknown dimension '{key}'")]
    UnknownDimension { shape: usize, key: String },
    #[error("dimension '{0}' has no values")]
    EmptyDimension(String),
    #[error("dimension '{dimension}' has invalid value id '{id}' (allowed: a-z, 0-9, -)")]
    InvalidValueId { dimension: String, id: String },
    #[error("dimension '{dimension}' repeats value id '{id}'")]
    DuplicateValueId { dimension: String, id: String },
    #[error("combinations[{0}] is empty")]
    EmptyShape(usize),
    #[error("combinations[{shape}] repeats dimension '{key}'")]
    RepeatedShapeKey { shape: usize, key: String },
    #[error("no combinations configured")]
    NoCombinations,
    #[error("base_url must be an absolute http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Placeholder names reserved by the description and intro templates.
const RESERVED_PLACEHOLDERS: [&str; 2] = ["heading", "site"];

/// Validated configuration for one generation run.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Absolute base URL without a trailing slash.
    pub base_url: String,
    pub catalogue: Catalogue,
    pub site: SiteSettings,
    /// Page text settings. `heading_order` is always fully resolved here.
    pub page: PageSettings,
    pub processing: ProcessingConfig,
}

/// Site-wide identity used in titles, structured data and the footer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    pub name: String,
    pub publisher: String,
    pub publisher_url: String,
    pub cta_label: String,
    pub copyright: String,
    /// schema.org `applicationCategory` of the interactive app.
    pub application_category: String,
    /// Google Analytics measurement id; no snippet when absent.
    pub analytics_id: Option<String>,
    /// BCP 47 tag for `display_localized` strings.
    pub localized_lang: Option<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            name: "Roast My Book".to_string(),
            publisher: "DenseMatrix".to_string(),
            publisher_url: "https://densematrix.ai".to_string(),
            cta_label: "Roast My Book Now →".to_string(),
            copyright: "© 2024 DenseMatrix".to_string(),
            application_category: "EntertainmentApplication".to_string(),
            analytics_id: None,
            localized_lang: None,
        }
    }
}

/// Heading and description composition settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageSettings {
    /// Noun the heading is built around, e.g. `Book Roast`.
    pub heading_noun: String,
    /// Dimension keys in heading order. Empty means declaration order.
    pub heading_order: Vec<String>,
    /// Meta description template. `{key}` expands to a dimension's phrase
    /// or fallback, `{heading}` to the page heading, `{site}` to the site name.
    pub description: String,
    /// Upper bound on the meta description, in characters.
    pub description_max: usize,
    /// Body paragraph template, same placeholders as `description`. When
    /// absent the page body repeats the description.
    pub intro: Option<String>,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            heading_noun: "Book Roast".to_string(),
            heading_order: Vec::new(),
            description: "{heading}. AI-powered book roasting from {site}. Free!".to_string(),
            description_max: 160,
            intro: None,
        }
    }
}

/// Parallel render/write settings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel page writers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Raw document shape
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    base_url: String,
    combinations: Vec<Vec<String>>,
    #[serde(default)]
    site: SiteSettings,
    #[serde(default)]
    page: PageSettings,
    #[serde(default)]
    processing: ProcessingConfig,
    /// Kept as a table so declaration order survives deserialization.
    dimensions: toml::Table,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDimension {
    label: Option<String>,
    values: Vec<DimensionValue>,
    #[serde(default)]
    slot: HeadingSlot,
    phrase: Option<String>,
    #[serde(default)]
    fallback: String,
    #[serde(default = "default_lowercase")]
    lowercase: bool,
    query_param: Option<String>,
}

fn default_lowercase() -> bool {
    true
}

// =============================================================================
// Loading and validation
// =============================================================================

/// Load and validate the config document at `path`.
pub fn load_config(path: &Path) -> Result<SiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate a config document. Pure: no I/O.
pub fn parse_config(content: &str) -> Result<SiteConfig, ConfigError> {
    let raw: RawConfig = toml::from_str(content)?;

    let base_url = normalize_base_url(&raw.base_url)?;

    let mut dimensions = Vec::with_capacity(raw.dimensions.len());
    for (key, value) in raw.dimensions {
        let raw_dim: RawDimension = value.try_into()?;
        dimensions.push(validate_dimension(key, raw_dim)?);
    }

    let catalogue = Catalogue {
        shapes: validate_shapes(&raw.combinations, &dimensions)?,
        dimensions,
    };

    let mut page = raw.page;
    validate_page(&mut page, &catalogue)?;

    Ok(SiteConfig {
        base_url,
        catalogue,
        site: raw.site,
        page,
        processing: raw.processing,
    })
}

fn normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    let host = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"));
    match host {
        Some(h)
            if !h.is_empty()
                && !h.starts_with('/')
                && !h.contains(|c: char| c.is_whitespace() || c == '?' || c == '#') =>
        {
            Ok(url.to_string())
        }
        _ => Err(ConfigError::InvalidBaseUrl(raw.to_string())),
    }
}

fn validate_dimension(key: String, raw: RawDimension) -> Result<Dimension, ConfigError> {
    if !naming::is_param_safe(&key) {
        return Err(ConfigError::Validation(format!(
            "dimension key '{key}' must use a-z, 0-9, '_' or '-'"
        )));
    }
    if RESERVED_PLACEHOLDERS.contains(&key.as_str()) {
        return Err(ConfigError::Validation(format!(
            "dimension key '{key}' is reserved"
        )));
    }
    if raw.values.is_empty() {
        return Err(ConfigError::EmptyDimension(key));
    }

    let mut seen = HashSet::new();
    let mut values = Vec::with_capacity(raw.values.len());
    for mut value in raw.values {
        let id = naming::normalize_id(&value.id);
        if !naming::is_slug_safe(&id) {
            return Err(ConfigError::InvalidValueId {
                dimension: key,
                id: value.id,
            });
        }
        if !seen.insert(id.clone()) {
            return Err(ConfigError::DuplicateValueId { dimension: key, id });
        }
        value.id = id;
        values.push(value);
    }

    let query_param = raw.query_param.unwrap_or_else(|| key.clone());
    if !naming::is_param_safe(&query_param) {
        return Err(ConfigError::Validation(format!(
            "dimension '{key}': query_param '{query_param}' must use a-z, 0-9, '_' or '-'"
        )));
    }

    Ok(Dimension {
        label: raw.label.unwrap_or_else(|| naming::label_from_key(&key)),
        phrase: raw.phrase.unwrap_or_else(|| "{}".to_string()),
        key,
        values,
        slot: raw.slot,
        fallback: raw.fallback,
        lowercase: raw.lowercase,
        query_param,
    })
}

fn validate_shapes(
    combinations: &[Vec<String>],
    dimensions: &[Dimension],
) -> Result<Vec<CombinationShape>, ConfigError> {
    if combinations.is_empty() {
        return Err(ConfigError::NoCombinations);
    }
    let mut shapes = Vec::with_capacity(combinations.len());
    for (idx, keys) in combinations.iter().enumerate() {
        if keys.is_empty() {
            return Err(ConfigError::EmptyShape(idx));
        }
        let mut seen = HashSet::new();
        for key in keys {
            if !dimensions.iter().any(|d| &d.key == key) {
                return Err(ConfigError::UnknownDimension {
                    shape: idx,
                    key: key.clone(),
                });
            }
            if !seen.insert(key.as_str()) {
                return Err(ConfigError::RepeatedShapeKey {
                    shape: idx,
                    key: key.clone(),
                });
            }
        }
        shapes.push(CombinationShape::new(keys.iter().map(String::as_str)));
    }
    Ok(shapes)
}

/// Check page settings against the catalogue and resolve the heading order.
fn validate_page(page: &mut PageSettings, catalogue: &Catalogue) -> Result<(), ConfigError> {
    if page.description_max == 0 {
        return Err(ConfigError::Validation(
            "page.description_max must be greater than zero".into(),
        ));
    }

    for key in &page.heading_order {
        if catalogue.dimension(key).is_none() {
            return Err(ConfigError::Validation(format!(
                "page.heading_order references unknown dimension '{key}'"
            )));
        }
    }
    // Dimensions left out of an explicit order follow in declaration order.
    for dim in &catalogue.dimensions {
        if !page.heading_order.contains(&dim.key) {
            page.heading_order.push(dim.key.clone());
        }
    }

    check_placeholders("page.description", &page.description, catalogue)?;
    if let Some(intro) = &page.intro {
        check_placeholders("page.intro", intro, catalogue)?;
    }
    Ok(())
}

fn check_placeholders(
    field: &str,
    template: &str,
    catalogue: &Catalogue,
) -> Result<(), ConfigError> {
    for name in naming::template_placeholders(template) {
        if !RESERVED_PLACEHOLDERS.contains(&name) && catalogue.dimension(name).is_none() {
            return Err(ConfigError::Validation(format!(
                "{field} references unknown placeholder '{{{name}}}'"
            )));
        }
    }
    Ok(())
}

/// Returns a fully-commented sample `pages.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Roast Pages Configuration
# =========================
# Every combination listed under `combinations` is expanded into one static
# page per value tuple. Pages whose slug was already produced by an earlier
# combination are skipped, so list the most important combination first.
#
# Unknown keys will cause an error.

# Absolute URL of the interactive app. Pages live under {base_url}/p/{slug}/.
base_url = "https://roastmybook.densematrix.ai"

# Each entry is one enumeration pass over the listed dimensions, outer to inner.
combinations = [
    ["genre", "roast_style", "target"],
    ["genre", "roast_style", "famous_critic"],
    ["genre", "target", "famous_critic"],
]

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
name = "Roast My Book"
publisher = "DenseMatrix"
publisher_url = "https://densematrix.ai"
cta_label = "Roast My Book Now →"
copyright = "© 2024 DenseMatrix"
application_category = "EntertainmentApplication"
# Google Analytics measurement id. Omit to render pages without tracking.
# analytics_id = "G-XXXXXXXXXX"
# Language of the display_localized strings below.
localized_lang = "zh"

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[page]
heading_noun = "Book Roast"
# Order of dimensions inside the heading. Unlisted dimensions follow in
# declaration order.
heading_order = ["roast_style", "genre", "target", "famous_critic"]
# {dimension} expands to that dimension's phrase, or its fallback when the
# page does not include it. {heading} and {site} are also available.
description = "Get a {roast_style} roast of your {genre} book{target}{famous_critic}. AI-powered book roasting. Free!"
# Longer descriptions are cut at a word boundary.
description_max = 160
# Body paragraph under the heading, same placeholders as `description`.
# Omit to repeat the description in the page body.
intro = "Ready to have your {genre} book brutally roasted? Our AI delivers {roast_style} critiques{famous_critic}."

# ---------------------------------------------------------------------------
# Parallel page writing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel writers. Omit for auto (number of CPU cores).
# max_processes = 4

# ---------------------------------------------------------------------------
# Dimensions
# ---------------------------------------------------------------------------
# slot:        lead (before the noun), detail (" - X"), aside (" (X)")
# phrase:      description fragment, {} is the display string
# fallback:    description wording when a page lacks the dimension
# lowercase:   lowercase the display string inside descriptions
# query_param: name of the parameter on the call-to-action link

[dimensions.genre]
label = "Genre"
slot = "lead"
values = [
    { id = "fantasy", display_en = "Fantasy", display_localized = "奇幻" },
    { id = "romance", display_en = "Romance", display_localized = "言情" },
    { id = "thriller", display_en = "Thriller", display_localized = "惊悚" },
    { id = "sci-fi", display_en = "Sci-Fi", display_localized = "科幻" },
    { id = "self-help", display_en = "Self-Help", display_localized = "自助" },
    { id = "memoir", display_en = "Memoir", display_localized = "回忆录" },
]

[dimensions.roast_style]
label = "Roast style"
slot = "lead"
fallback = "witty"
query_param = "style"
values = [
    { id = "savage", display_en = "Savage", display_localized = "毒舌" },
    { id = "literary", display_en = "Literary", display_localized = "文艺" },
    { id = "shakespearean", display_en = "Shakespearean", display_localized = "莎士比亚" },
]

[dimensions.target]
label = "Focus"
slot = "detail"
phrase = " focusing on {}"
values = [
    { id = "plot", display_en = "Plot" },
    { id = "characters", display_en = "Characters" },
    { id = "prose", display_en = "Prose" },
    { id = "ending", display_en = "Ending" },
]

[dimensions.famous_critic]
label = "Critic"
slot = "aside"
phrase = " in the voice of {}"
lowercase = false
query_param = "critic"
values = [
    { id = "oscar-wilde", display_en = "Oscar Wilde", display_localized = "王尔德" },
    { id = "dorothy-parker", display_en = "Dorothy Parker" },
    { id = "lu-xun", display_en = "Lu Xun", display_localized = "鲁迅" },
]
"##
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{MINIMAL_CONFIG, with_dimensions};
    use tempfile::TempDir;

    #[test]
    fn parse_minimal_config() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        assert_eq!(config.base_url, "https://roast.example");
        assert_eq!(config.catalogue.dimensions.len(), 3);
        assert_eq!(config.catalogue.shapes.len(), 1);
        assert_eq!(
            config.catalogue.shapes[0].keys,
            vec!["genre", "style", "target"]
        );
    }

    #[test]
    fn dimensions_keep_declaration_order() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        let keys: Vec<&str> = config
            .catalogue
            .dimensions
            .iter()
            .map(|d| d.key.as_str())
            .collect();
        assert_eq!(keys, vec!["genre", "style", "target"]);
    }

    #[test]
    fn defaults_fill_optional_sections() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        assert_eq!(config.site.name, "Roast My Book");
        assert_eq!(config.page.heading_noun, "Book Roast");
        assert_eq!(config.page.description_max, 160);
        assert!(config.site.analytics_id.is_none());
        assert!(config.processing.max_processes.is_none());
    }

    #[test]
    fn dimension_defaults() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        let genre = config.catalogue.dimension("genre").unwrap();
        assert_eq!(genre.label, "Genre");
        assert_eq!(genre.slot, HeadingSlot::Lead);
        assert_eq!(genre.phrase, "{}");
        assert_eq!(genre.fallback, "");
        assert!(genre.lowercase);
        assert_eq!(genre.query_param, "genre");
    }

    #[test]
    fn heading_order_defaults_to_declaration_order() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        assert_eq!(config.page.heading_order, vec!["genre", "style", "target"]);
    }

    #[test]
    fn heading_order_appends_unlisted_dimensions() {
        let toml = MINIMAL_CONFIG.replace("[dimensions.genre]", "[page]\nheading_order = [\"style\"]\n\n[dimensions.genre]");
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.page.heading_order, vec!["style", "genre", "target"]);
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        let toml = MINIMAL_CONFIG.replace("https://roast.example", "https://roast.example/");
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.base_url, "https://roast.example");
    }

    #[test]
    fn relative_base_url_rejected() {
        let toml = MINIMAL_CONFIG.replace("https://roast.example", "/roast");
        let result = parse_config(&toml);
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl(_))));
    }

    #[test]
    fn base_url_with_query_rejected() {
        let toml = MINIMAL_CONFIG.replace("https://roast.example", "https://roast.example?x=1");
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::InvalidBaseUrl(_))
        ));
    }

    #[test]
    fn value_ids_are_normalized() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = " Fiction ", display_en = "Fiction" }]
"#,
        );
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.catalogue.dimensions[0].values[0].id, "fiction");
    }

    #[test]
    fn localized_display_is_optional() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [
    { id = "fiction", display_en = "Fiction", display_localized = "小说" },
    { id = "memoir", display_en = "Memoir" },
]
"#,
        );
        let config = parse_config(&toml).unwrap();
        let values = &config.catalogue.dimensions[0].values;
        assert_eq!(values[0].display_localized.as_deref(), Some("小说"));
        assert_eq!(values[1].display_localized, None);
    }

    #[test]
    fn malformed_document_is_error() {
        let result = parse_config("this is not valid toml [[[");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_display_en_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = "fiction" }]
"#,
        );
        assert!(matches!(parse_config(&toml), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn missing_id_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ display_en = "Fiction" }]
"#,
        );
        assert!(matches!(parse_config(&toml), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let toml = format!("{MINIMAL_CONFIG}\n[site]\nnmae = \"typo\"\n");
        assert!(matches!(parse_config(&toml), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_value_key_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = "fiction", display_en = "Fiction", display_fr = "Roman" }]
"#,
        );
        assert!(matches!(parse_config(&toml), Err(ConfigError::Toml(_))));
    }

    #[test]
    fn unknown_dimension_in_shape_rejected() {
        let toml = MINIMAL_CONFIG.replace(
            r#"["genre", "style", "target"]"#,
            r#"["genre", "style", "critic"]"#,
        );
        match parse_config(&toml) {
            Err(ConfigError::UnknownDimension { shape, key }) => {
                assert_eq!(shape, 0);
                assert_eq!(key, "critic");
            }
            other => panic!("expected UnknownDimension, got {other:?}"),
        }
    }

    #[test]
    fn empty_dimension_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = []
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::EmptyDimension(key)) if key == "genre"
        ));
    }

    #[test]
    fn empty_value_id_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = "  ", display_en = "Blank" }]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::InvalidValueId { .. })
        ));
    }

    #[test]
    fn unsafe_value_id_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = "sci fi", display_en = "Sci Fi" }]
"#,
        );
        match parse_config(&toml) {
            Err(ConfigError::InvalidValueId { dimension, id }) => {
                assert_eq!(dimension, "genre");
                assert_eq!(id, "sci fi");
            }
            other => panic!("expected InvalidValueId, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_value_id_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
values = [
    { id = "fiction", display_en = "Fiction" },
    { id = "FICTION", display_en = "Fiction again" },
]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::DuplicateValueId { id, .. }) if id == "fiction"
        ));
    }

    #[test]
    fn no_combinations_rejected() {
        let toml = with_dimensions(
            "[]",
            r#"
[dimensions.genre]
values = [{ id = "fiction", display_en = "Fiction" }]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::NoCombinations)
        ));
    }

    #[test]
    fn empty_shape_rejected() {
        let toml = with_dimensions(
            r#"[["genre"], []]"#,
            r#"
[dimensions.genre]
values = [{ id = "fiction", display_en = "Fiction" }]
"#,
        );
        assert!(matches!(parse_config(&toml), Err(ConfigError::EmptyShape(1))));
    }

    #[test]
    fn repeated_shape_key_rejected() {
        let toml = with_dimensions(
            r#"[["genre", "genre"]]"#,
            r#"
[dimensions.genre]
values = [{ id = "fiction", display_en = "Fiction" }]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::RepeatedShapeKey { shape: 0, .. })
        ));
    }

    #[test]
    fn unknown_description_placeholder_rejected() {
        let toml = format!(
            "{}\n[page]\ndescription = \"A {{mood}} roast\"\n",
            MINIMAL_CONFIG
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(msg)) if msg.contains("mood")
        ));
    }

    #[test]
    fn unknown_intro_placeholder_rejected() {
        let toml = format!("{MINIMAL_CONFIG}\n[page]\nintro = \"Roast {{genre}} in {{mood}}\"\n");
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(msg)) if msg.contains("page.intro") && msg.contains("mood")
        ));
    }

    #[test]
    fn intro_defaults_to_none() {
        let config = parse_config(MINIMAL_CONFIG).unwrap();
        assert!(config.page.intro.is_none());
        let toml = format!("{MINIMAL_CONFIG}\n[page]\nintro = \"Roast your {{genre}} book.\"\n");
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.page.intro.as_deref(), Some("Roast your {genre} book."));
    }

    #[test]
    fn unknown_heading_order_key_rejected() {
        let toml = format!("{MINIMAL_CONFIG}\n[page]\nheading_order = [\"critic\"]\n");
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn zero_description_max_rejected() {
        let toml = format!("{MINIMAL_CONFIG}\n[page]\ndescription_max = 0\n");
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn reserved_dimension_key_rejected() {
        let toml = with_dimensions(
            r#"[["site"]]"#,
            r#"
[dimensions.site]
values = [{ id = "a", display_en = "A" }]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(msg)) if msg.contains("reserved")
        ));
    }

    #[test]
    fn unsafe_query_param_rejected() {
        let toml = with_dimensions(
            r#"[["genre"]]"#,
            r#"
[dimensions.genre]
query_param = "gen re"
values = [{ id = "fiction", display_en = "Fiction" }]
"#,
        );
        assert!(matches!(
            parse_config(&toml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn stock_config_parses() {
        let config = parse_config(stock_config_toml()).unwrap();
        assert_eq!(config.catalogue.shapes.len(), 3);
        assert_eq!(config.catalogue.dimensions.len(), 4);
        let style = config.catalogue.dimension("roast_style").unwrap();
        assert_eq!(style.query_param, "style");
        assert_eq!(style.fallback, "witty");
        let critic = config.catalogue.dimension("famous_critic").unwrap();
        assert_eq!(critic.slot, HeadingSlot::Aside);
        assert!(!critic.lowercase);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("pages.toml");
        fs::write(&path, MINIMAL_CONFIG).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.catalogue.dimensions.len(), 3);
    }

    #[test]
    fn load_config_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let result = load_config(&tmp.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn parse_processing_config() {
        let toml = format!("{MINIMAL_CONFIG}\n[processing]\nmax_processes = 4\n");
        let config = parse_config(&toml).unwrap();
        assert_eq!(config.processing.max_processes, Some(4));
    }

    #[test]
    fn effective_threads_auto() {
        let config = ProcessingConfig {
            max_processes: None,
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let config = ProcessingConfig {
            max_processes: Some(99999),
        };
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_never_zero() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }
}
