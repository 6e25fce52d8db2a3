//! Shared types used across all pipeline stages.
//!
//! The loader produces a [`Catalogue`], the enumerator turns it into
//! [`PageRecord`]s, and every later stage (dedup, render, sitemap, write)
//! consumes those records. None of these types are persisted between runs.

use serde::Deserialize;

/// One discrete value of a dimension, e.g. the `fiction` genre.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DimensionValue {
    /// Slug-safe identifier, unique within its dimension.
    pub id: String,
    /// English display string used in headings and descriptions.
    pub display_en: String,
    /// Optional display string in the site's secondary language.
    #[serde(default)]
    pub display_localized: Option<String>,
}

/// Where a dimension's display string lands in a page heading.
///
/// With a heading noun of `Book Roast`:
/// - `lead` values precede the noun: `Savage Fiction Book Roast`
/// - `detail` values follow after a dash: `... Book Roast - Plot Holes`
/// - `aside` values follow in parentheses: `... Book Roast (Dorothy Parker)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSlot {
    #[default]
    Lead,
    Detail,
    Aside,
}

/// A named axis of categorical variation with an ordered set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Dimension {
    /// Stable key referenced by combination shapes.
    pub key: String,
    /// Human name shown in the facet list of a page.
    pub label: String,
    pub values: Vec<DimensionValue>,
    pub slot: HeadingSlot,
    /// Description fragment; `{}` is replaced by the display string.
    pub phrase: String,
    /// Description wording used when a page lacks this dimension.
    pub fallback: String,
    /// Lowercase the display string inside descriptions.
    pub lowercase: bool,
    /// Query parameter name on the call-to-action link.
    pub query_param: String,
}

/// An ordered selection of dimension keys defining one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinationShape {
    pub keys: Vec<String>,
}

impl CombinationShape {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl std::fmt::Display for CombinationShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keys.join(" × "))
    }
}

/// Validated dimensions plus the shapes that combine them.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalogue {
    /// Dimensions in declaration order.
    pub dimensions: Vec<Dimension>,
    /// Shapes in declaration order; earlier shapes win slug collisions.
    pub shapes: Vec<CombinationShape>,
}

impl Catalogue {
    pub fn dimension(&self, key: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.key == key)
    }
}

/// One attribute of a page: a dimension key and the value chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub dimension: String,
    pub value: DimensionValue,
}

/// A single page identity produced by the enumerator.
///
/// Attributes are stored in the order of the shape that produced them, so
/// the record carries its own shape alongside the slug derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub slug: String,
    pub attributes: Vec<Attribute>,
}

impl PageRecord {
    /// Build a record, deriving the slug from the attribute ids.
    pub fn new(attributes: Vec<Attribute>) -> Self {
        let slug = crate::naming::join_slug(attributes.iter().map(|a| a.value.id.as_str()));
        Self { slug, attributes }
    }

    /// The value for `dimension`, if this record's shape includes it.
    pub fn get(&self, dimension: &str) -> Option<&DimensionValue> {
        self.attributes
            .iter()
            .find(|a| a.dimension == dimension)
            .map(|a| &a.value)
    }

    /// Dimension keys in shape order.
    pub fn shape(&self) -> CombinationShape {
        CombinationShape::new(self.attributes.iter().map(|a| a.dimension.as_str()))
    }
}
