//! Output writing.
//!
//! The output root is a derived artifact: every build deletes it wholesale
//! and writes it again from the current page set, so pages from an older
//! configuration never survive a rebuild. There is no incremental mode.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── sitemap.xml                    # Sitemap index
//! ├── sitemap-main.xml               # Root-page sitemap
//! ├── sitemap-programmatic.xml       # Generated-page sitemap
//! └── p/
//!     ├── fiction-savage-plot/
//!     │   └── index.html
//!     └── ...
//! ```
//!
//! Pages are written in parallel. Each task owns one slug directory, and
//! slugs are unique within a page set, so writers never share a path.
//!
//! A failed write aborts the build and may leave a cleared, half-written
//! root behind; rerunning the build is the only recovery.

use crate::render::{PAGES_DIR, RenderedPage};
use crate::sitemap::Sitemaps;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum FilesystemError {
    #[error("Refusing to clear unsafe output root: {0}")]
    UnsafeRoot(PathBuf),
    #[error("Output root exists and is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Failed to clear {path}: {source}")]
    Clear {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a write pass did to the output root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteReport {
    /// Files removed from the previous build's output.
    pub stale_files: usize,
    pub pages_written: usize,
    pub sitemaps_written: usize,
}

/// `{root}/p/{slug}/index.html`
pub fn page_path(root: &Path, slug: &str) -> PathBuf {
    root.join(PAGES_DIR).join(slug).join("index.html")
}

/// Replace the contents of `root` with `pages` and `sitemaps`.
pub fn write_output(
    root: &Path,
    pages: &[RenderedPage],
    sitemaps: &Sitemaps,
) -> Result<WriteReport, FilesystemError> {
    let stale_files = clear_root(root)?;

    let pages_dir = root.join(PAGES_DIR);
    fs::create_dir_all(&pages_dir).map_err(|source| FilesystemError::Create {
        path: pages_dir.clone(),
        source,
    })?;

    pages.par_iter().try_for_each(|page| write_page(root, page))?;

    let mut sitemaps_written = 0;
    for (name, xml) in sitemaps.files() {
        let path = root.join(name);
        fs::write(&path, xml).map_err(|source| FilesystemError::Write { path, source })?;
        sitemaps_written += 1;
    }

    Ok(WriteReport {
        stale_files,
        pages_written: pages.len(),
        sitemaps_written,
    })
}

/// Remove `root` and everything under it, then recreate it empty.
///
/// Returns the number of files the previous build left behind.
pub fn clear_root(root: &Path) -> Result<usize, FilesystemError> {
    let cwd = std::env::current_dir()
        .and_then(|dir| dir.canonicalize())
        .ok();

    let mut stale_files = 0;
    if let Some(existing) = checked_root(root, cwd.as_deref())? {
        stale_files = count_files(&existing);
        fs::remove_dir_all(&existing).map_err(|source| FilesystemError::Clear {
            path: root.to_path_buf(),
            source,
        })?;
    }

    fs::create_dir_all(root).map_err(|source| FilesystemError::Create {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(stale_files)
}

/// Decide whether `root` may be wiped.
///
/// Returns the canonical directory to remove, or `None` when there is
/// nothing to remove yet. A root must name a directory of its own: not the
/// filesystem root, not a `.` or `..` segment, and not the working
/// directory `cwd` or one of its ancestors.
fn checked_root(root: &Path, cwd: Option<&Path>) -> Result<Option<PathBuf>, FilesystemError> {
    let unsafe_root = || FilesystemError::UnsafeRoot(root.to_path_buf());
    if root.as_os_str().is_empty() || root.parent().is_none() || ends_in_dot_segment(root) {
        return Err(unsafe_root());
    }
    if !root.exists() {
        return Ok(None);
    }
    if !root.is_dir() {
        return Err(FilesystemError::NotADirectory(root.to_path_buf()));
    }

    let canonical = root.canonicalize().map_err(|source| FilesystemError::Clear {
        path: root.to_path_buf(),
        source,
    })?;
    if canonical.parent().is_none() || cwd.is_some_and(|cwd| cwd.starts_with(&canonical)) {
        return Err(unsafe_root());
    }
    Ok(Some(canonical))
}

/// `Path::components` folds away a trailing `.`, so look at the raw text.
fn ends_in_dot_segment(root: &Path) -> bool {
    let text = root.to_string_lossy();
    let trimmed = text.trim_end_matches(std::path::is_separator);
    let last = trimmed
        .rsplit(std::path::is_separator)
        .next()
        .unwrap_or_default();
    last == "." || last == ".."
}

/// Count regular files under `dir`, skipping entries that cannot be read.
pub fn count_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_file())
        .count()
}

fn write_page(root: &Path, page: &RenderedPage) -> Result<(), FilesystemError> {
    let path = page_path(root, &page.slug);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|source| FilesystemError::Create {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::write(&path, page.html.as_bytes()).map_err(|source| FilesystemError::Write { path, source })
}
