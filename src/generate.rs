//! Pipeline driver.
//!
//! Runs the stages in order and hands back a report for the CLI:
//!
//! ```text
//! config → enumerate → dedup → render ┐
//!                            └ sitemap ┴→ write
//! ```
//!
//! Enumeration and dedup run sequentially on one thread: the order in which
//! records reach the [`PageSet`] decides which record owns a contested slug.
//! Only once the set is frozen do rendering and writing fan out.

use crate::config::{ConfigError, SiteConfig};
use crate::dedup::{PageSet, deduplicate};
use crate::enumerate::{combination_count, enumerate_all};
use crate::render::Renderer;
use crate::sitemap::build_sitemaps;
use crate::types::CombinationShape;
use crate::write::{FilesystemError, WriteReport, write_output};
use chrono::NaiveDate;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}

/// Enumeration size of one shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeSummary {
    pub shape: CombinationShape,
    pub combinations: usize,
}

/// The frozen page set plus the numbers that explain its size.
#[derive(Debug, Clone)]
pub struct Plan {
    pub shapes: Vec<ShapeSummary>,
    pub pages: PageSet,
}

impl Plan {
    /// Sum of all shapes' Cartesian-product sizes; an upper bound on pages.
    pub fn combination_total(&self) -> usize {
        self.shapes.iter().map(|s| s.combinations).sum()
    }
}

/// Outcome of a full build.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub shapes: Vec<ShapeSummary>,
    pub pages: usize,
    pub duplicates: usize,
    pub write: WriteReport,
}

/// Enumerate and deduplicate every shape. Pure; touches no files.
pub fn plan(config: &SiteConfig) -> Plan {
    let catalogue = &config.catalogue;
    let shapes = catalogue
        .shapes
        .iter()
        .map(|shape| ShapeSummary {
            shape: shape.clone(),
            combinations: combination_count(catalogue, shape),
        })
        .collect();
    let pages = deduplicate(enumerate_all(catalogue), PageSet::new());
    Plan { shapes, pages }
}

/// Build the whole site into `output_dir`, stamping sitemaps with `today`.
pub fn generate(
    config: &SiteConfig,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let plan = plan(config);

    let rendered = Renderer::new(config).render_all(&plan.pages);
    let sitemaps = build_sitemaps(&plan.pages, &config.base_url, today);
    let write = write_output(output_dir, &rendered, &sitemaps)?;

    Ok(GenerateReport {
        pages: plan.pages.len(),
        duplicates: plan.pages.duplicates(),
        shapes: plan.shapes,
        write,
    })
}

/// Load the config at `config_path` and build it into `output_dir`.
///
/// Config errors surface before the output root is touched.
pub fn generate_from_file(
    config_path: &Path,
    output_dir: &Path,
    today: NaiveDate,
) -> Result<GenerateReport, GenerateError> {
    let config = crate::config::load_config(config_path)?;
    generate(&config, output_dir, today)
}
