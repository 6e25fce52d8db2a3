//! Shared test utilities for the roast-pages test suite.
//!
//! Provides config fixtures, a record builder that resolves values through a
//! parsed catalogue, and page-set lookups that panic with a clear message on
//! miss.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let config = parse_config(MINIMAL_CONFIG).unwrap();
//! let rec = record(&config, &[("genre", "fiction"), ("style", "savage")]);
//! assert_eq!(rec.slug, "fiction-savage");
//! ```

use crate::config::SiteConfig;
use crate::dedup::PageSet;
use crate::types::{Attribute, PageRecord};

// =========================================================================
// Config fixtures
// =========================================================================

/// Two genres × two styles × one target, one shape: four pages.
pub const MINIMAL_CONFIG: &str = r#"
base_url = "https://roast.example"
combinations = [["genre", "style", "target"]]

[dimensions.genre]
values = [
    { id = "fiction", display_en = "Fiction" },
    { id = "nonfiction", display_en = "Nonfiction" },
]

[dimensions.style]
values = [
    { id = "savage", display_en = "Savage" },
    { id = "gentle", display_en = "Gentle" },
]

[dimensions.target]
values = [{ id = "plot", display_en = "Plot" }]
"#;

/// [`MINIMAL_CONFIG`] plus a `critic` dimension whose only id is `plot`, so
/// every page of the second shape collides with one of the first.
pub const COLLIDING_CONFIG: &str = r#"
base_url = "https://roast.example"
combinations = [["genre", "style", "target"], ["genre", "style", "critic"]]

[dimensions.genre]
values = [
    { id = "fiction", display_en = "Fiction" },
    { id = "nonfiction", display_en = "Nonfiction" },
]

[dimensions.style]
values = [
    { id = "savage", display_en = "Savage" },
    { id = "gentle", display_en = "Gentle" },
]

[dimensions.target]
values = [{ id = "plot", display_en = "Plot" }]

[dimensions.critic]
values = [{ id = "plot", display_en = "Plot Twist Pete" }]
"#;

/// A catalogue shaped like the production one: three shapes, every slot kind,
/// localized values, and analytics enabled.
pub const STOCK_LIKE_CONFIG: &str = r#"
base_url = "https://roast.example/"
combinations = [
    ["genre", "style", "target"],
    ["genre", "style", "critic"],
    ["genre", "target", "critic"],
]

[site]
analytics_id = "G-TEST123"
localized_lang = "zh"

[page]
heading_order = ["style", "genre", "target", "critic"]
description = "Get a {style} roast of your {genre} book{target}{critic}. AI-powered book roasting. Free!"
description_max = 160
intro = "Ready to have your {genre} book brutally roasted? Our AI delivers {style} critiques."

[dimensions.genre]
values = [
    { id = "fiction", display_en = "Fiction", display_localized = "小说" },
    { id = "memoir", display_en = "Memoir" },
]

[dimensions.style]
label = "Roast style"
fallback = "witty"
values = [
    { id = "savage", display_en = "Savage", display_localized = "毒舌" },
    { id = "gentle", display_en = "Gentle" },
]

[dimensions.target]
slot = "detail"
phrase = " focusing on {}"
values = [
    { id = "plot", display_en = "Plot" },
    { id = "ending", display_en = "Ending" },
]

[dimensions.critic]
slot = "aside"
phrase = " in the voice of {}"
lowercase = false
values = [
    { id = "wilde", display_en = "Oscar Wilde" },
    { id = "parker", display_en = "Dorothy Parker" },
]
"#;

/// Assemble a config document from a `combinations` array literal and
/// dimension tables.
pub fn with_dimensions(combinations: &str, dimensions: &str) -> String {
    format!("base_url = \"https://roast.example\"\ncombinations = {combinations}\n{dimensions}")
}

// =========================================================================
// Record builders
// =========================================================================

/// Build a record from `(dimension, id)` pairs, resolving each value through
/// the config's catalogue. Panics if a dimension or id is unknown.
pub fn record(config: &SiteConfig, pairs: &[(&str, &str)]) -> PageRecord {
    let attributes = pairs
        .iter()
        .map(|(key, id)| {
            let dim = config
                .catalogue
                .dimension(key)
                .unwrap_or_else(|| panic!("dimension '{key}' not in catalogue"));
            let value = dim
                .values
                .iter()
                .find(|v| v.id == *id)
                .unwrap_or_else(|| panic!("value '{id}' not in dimension '{key}'"))
                .clone();
            Attribute {
                dimension: key.to_string(),
                value,
            }
        })
        .collect();
    PageRecord::new(attributes)
}

// =========================================================================
// Page set lookups
// =========================================================================

/// Find a record by slug. Panics if not found.
pub fn find_page<'a>(pages: &'a PageSet, slug: &str) -> &'a PageRecord {
    pages.get(slug).unwrap_or_else(|| {
        let slugs: Vec<&str> = pages.slugs().collect();
        panic!("page '{slug}' not found. Available: {slugs:?}")
    })
}

/// All slugs in first-seen order.
pub fn slugs(pages: &PageSet) -> Vec<&str> {
    pages.slugs().collect()
}
