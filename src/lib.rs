//! # Roast Pages
//!
//! A programmatic SEO page generator. A small catalogue of dimensions, each
//! with a handful of values, is expanded into one static landing page per
//! combination, plus the sitemaps that point search engines at them. Every
//! page funnels visitors to the interactive app through a single
//! call-to-action link.
//!
//! # Architecture: Linear Pipeline
//!
//! ```text
//! 1. Config      pages.toml        →  SiteConfig       (validated catalogue)
//! 2. Enumerate   catalogue         →  PageRecord*      (Cartesian product per shape)
//! 3. Dedup       PageRecord*       →  PageSet          (first-seen slug wins)
//! 4. Render      PageSet           →  RenderedPage*    (static HTML)
//! 5. Sitemap     PageSet           →  Sitemaps         (index, main, programmatic)
//! 6. Write       pages + sitemaps  →  public/          (wipe, then rewrite)
//! ```
//!
//! Stages 1 to 5 are pure functions of the config and the build date; only
//! the writer touches the filesystem. That keeps every stage unit-testable
//! without temp directories and makes two builds on the same day
//! byte-identical.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `pages.toml` loading and validation, stock config, thread-pool sizing |
//! | [`types`] | Catalogue and page types: `Dimension`, `CombinationShape`, `PageRecord` |
//! | [`enumerate`] | Lazy, ordered Cartesian product of one shape's dimensions |
//! | [`dedup`] | `PageSet`: slug-keyed, insertion-ordered, first-seen wins |
//! | [`naming`] | Slug rules plus heading, title and description composition |
//! | [`render`] | Maud page template, canonical and call-to-action URLs |
//! | [`sitemap`] | Sitemap index and `<urlset>` documents |
//! | [`write`] | Output root clearing and parallel page writing |
//! | [`generate`] | Pipeline driver and build report |
//! | [`output`] | CLI output formatting for plans and build reports |
//!
//! # Design Decisions
//!
//! ## Slugs Are Identity
//!
//! A page is identified by its slug alone: the value ids of its combination
//! joined with `-`, in shape order. Two shapes can produce the same slug
//! (`fiction-savage-plot` from a `target` value and from a `critic` value
//! that happens to share the id). The enumerator runs shapes in configured
//! order and the [`dedup::PageSet`] keeps the first record, so list the most
//! important shape first. A collision is counted, never reported as an error.
//!
//! ## Dimension Order Is Declaration Order
//!
//! `toml` is built with `preserve_order`, so `[dimensions.*]` tables keep the
//! order they were written in. That order is the default heading order and
//! the order of the facet list on each page.
//!
//! ## Maud Over Template Engines
//!
//! Pages are built with [Maud](https://maud.lambda.xyz/): malformed markup is
//! a compile error, and every interpolated display string is escaped, which
//! matters because catalogue values end up in headings, attributes and
//! structured data alike.
//!
//! ## Wipe-and-Rewrite Output
//!
//! The output root is wholly derived. Each build removes it and writes the
//! current page set, so pages dropped from the catalogue disappear from both
//! the site and the sitemap in the same build.

pub mod config;
pub mod dedup;
pub mod enumerate;
pub mod generate;
pub mod naming;
pub mod output;
pub mod render;
pub mod sitemap;
pub mod types;
pub mod write;

#[cfg(test)]
pub(crate) mod test_helpers;
