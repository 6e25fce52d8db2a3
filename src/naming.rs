//! Slug and page-text composition.
//!
//! Every string derived from a page's attributes is built here: the slug that
//! names the page on disk and dedups it, the heading, the `<title>`, the meta
//! description and the body intro. Keeping these pure lets the renderer and
//! the tests share one definition without touching the filesystem.
//!
//! ## Slugs
//!
//! A slug is the attribute ids joined by `-` in the shape's dimension order:
//! - `[genre=fiction, style=savage, target=plot]` → `fiction-savage-plot`
//!
//! Two records from different shapes share a slug when their id tuples join
//! to the same string; the deduplicator keeps the first.
//!
//! ## Headings
//!
//! Display strings are placed around the heading noun according to their
//! dimension's [`HeadingSlot`], in `page.heading_order`:
//! - `Savage Fiction Book Roast - Plot (Oscar Wilde)`
//! - `Fiction Book Roast (Oscar Wilde)` when the shape has no style or target

use crate::config::SiteConfig;
use crate::types::{Catalogue, Dimension, DimensionValue, HeadingSlot, PageRecord};

/// Separator between value ids in a slug.
pub const SLUG_DELIMITER: char = '-';

/// Trim and ASCII-lowercase a configured value id.
pub fn normalize_id(id: &str) -> String {
    id.trim().to_ascii_lowercase()
}

/// True when `s` is non-empty and uses only `[a-z0-9-]`.
pub fn is_slug_safe(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// True when `s` is non-empty and uses only `[a-z0-9_-]`.
///
/// Dimension keys and query parameter names must pass this.
pub fn is_param_safe(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Join value ids into a slug.
pub fn join_slug<'a>(ids: impl IntoIterator<Item = &'a str>) -> String {
    let mut slug = String::new();
    for id in ids {
        if !slug.is_empty() {
            slug.push(SLUG_DELIMITER);
        }
        slug.push_str(id);
    }
    slug
}

/// Human label for a dimension key: `roast_style` → `Roast style`.
pub fn label_from_key(key: &str) -> String {
    let spaced = key.replace(['_', '-'], " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ============================================================================
// Templates
// ============================================================================

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

/// Split a template into literal text and `{name}` placeholders.
///
/// Braces that do not enclose a valid name are kept as text.
fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) if is_param_safe(&after[..close]) => {
                if open > 0 {
                    out.push(Segment::Text(&rest[..open]));
                }
                out.push(Segment::Placeholder(&after[..close]));
                rest = &after[close + 1..];
            }
            _ => {
                out.push(Segment::Text(&rest[..=open]));
                rest = after;
            }
        }
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Placeholder names used by a template, in order of appearance.
pub fn template_placeholders(template: &str) -> Vec<&str> {
    segments(template)
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name),
            Segment::Text(_) => None,
        })
        .collect()
}

/// Expand `{name}` placeholders through `lookup`.
///
/// Names the lookup does not know are left in place verbatim. Where literal
/// text meets an expanded value, doubled whitespace and whitespace in front
/// of punctuation are dropped, so an empty value leaves no gap. The text of
/// each piece is never rewritten.
pub fn fill_template(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    for segment in segments(template) {
        match segment {
            Segment::Text(text) => push_at_seam(&mut out, text),
            Segment::Placeholder(name) => match lookup(name) {
                Some(value) => push_at_seam(&mut out, &value),
                None => push_at_seam(&mut out, &format!("{{{name}}}")),
            },
        }
    }
    out
}

const SEAM_PUNCTUATION: [char; 6] = ['.', ',', '!', '?', ';', ':'];

fn push_at_seam(out: &mut String, piece: &str) {
    let mut piece = piece;
    if out.ends_with(char::is_whitespace) {
        piece = piece.trim_start();
        if piece.starts_with(SEAM_PUNCTUATION) {
            out.truncate(out.trim_end().len());
        }
    }
    out.push_str(piece);
}

// ============================================================================
// Page text
// ============================================================================

/// All human-readable text derived from one page record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub heading: String,
    /// `<title>` content: heading plus site name.
    pub title: String,
    pub description: String,
    /// Body paragraph under the heading.
    pub intro: String,
}

/// Compose heading, title, description and intro for a record.
pub fn compose_page_text(record: &PageRecord, config: &SiteConfig) -> PageText {
    let heading = compose_heading(
        record,
        &config.catalogue,
        &config.page.heading_order,
        &config.page.heading_noun,
    );
    let title = if config.site.name.is_empty() {
        heading.clone()
    } else {
        format!("{} | {}", heading, config.site.name)
    };
    let description = compose_description(record, config, &heading);
    let intro = compose_intro(record, config, &heading, &description);
    PageText {
        heading,
        title,
        description,
        intro,
    }
}

/// Build the heading from the record's present attributes.
///
/// Dimensions the record lacks are skipped entirely, so partial shapes never
/// leave doubled spaces or empty separators behind.
pub fn compose_heading(
    record: &PageRecord,
    catalogue: &Catalogue,
    order: &[String],
    noun: &str,
) -> String {
    let mut lead: Vec<&str> = Vec::new();
    let mut tail = String::new();

    for key in order {
        let (Some(dim), Some(value)) = (catalogue.dimension(key), record.get(key)) else {
            continue;
        };
        match dim.slot {
            HeadingSlot::Lead => lead.push(&value.display_en),
            HeadingSlot::Detail => {
                tail.push_str(" - ");
                tail.push_str(&value.display_en);
            }
            HeadingSlot::Aside => {
                tail.push_str(" (");
                tail.push_str(&value.display_en);
                tail.push(')');
            }
        }
    }
    lead.push(noun);

    let mut heading = lead
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    heading.push_str(&tail);
    heading.trim().to_string()
}

/// Expand the description template for a record and bound its length.
pub fn compose_description(record: &PageRecord, config: &SiteConfig, heading: &str) -> String {
    let filled = expand_page_template(&config.page.description, record, config, heading);
    truncate_description(&filled, config.page.description_max)
}

/// Expand the body intro template, or reuse `description` when none is set.
pub fn compose_intro(
    record: &PageRecord,
    config: &SiteConfig,
    heading: &str,
    description: &str,
) -> String {
    match &config.page.intro {
        Some(template) => expand_page_template(template, record, config, heading),
        None => description.to_string(),
    }
}

/// Fill `{heading}`, `{site}` and per-dimension placeholders for a record.
fn expand_page_template(
    template: &str,
    record: &PageRecord,
    config: &SiteConfig,
    heading: &str,
) -> String {
    let filled = fill_template(template, |name| match name {
        "heading" => Some(heading.to_string()),
        "site" => Some(config.site.name.clone()),
        key => config
            .catalogue
            .dimension(key)
            .map(|dim| describe(dim, record.get(key))),
    });
    filled.trim().to_string()
}

/// A dimension's description fragment: its phrase when present, else fallback.
fn describe(dim: &Dimension, value: Option<&DimensionValue>) -> String {
    match value {
        Some(v) if dim.lowercase => dim.phrase.replace("{}", &v.display_en.to_lowercase()),
        Some(v) => dim.phrase.replace("{}", &v.display_en),
        None => dim.fallback.clone(),
    }
}

/// Cut `text` to at most `max` characters, preferring a word boundary.
///
/// Truncated output ends with `…`, which counts toward the limit.
pub fn truncate_description(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep: String = text.chars().take(max.saturating_sub(1)).collect();
    let cut = match keep.rfind(' ') {
        Some(pos) if pos > 0 => &keep[..pos],
        _ => keep.as_str(),
    };
    let mut out = cut
        .trim_end_matches(|c: char| c.is_whitespace() || c == ',' || c == '.')
        .to_string();
    out.push('…');
    out
}
