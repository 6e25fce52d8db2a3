//! Sitemap generation.
//!
//! Produces three documents per build:
//!
//! ```text
//! sitemap.xml               # <sitemapindex> referencing the two below
//! sitemap-main.xml          # the interactive app's root URL, priority 1.0
//! sitemap-programmatic.xml  # one <url> per generated page, priority 0.6
//! ```
//!
//! Rows of the programmatic sitemap follow the page set's first-seen order.
//! `lastmod` is the build date and is passed in, which keeps everything else
//! in these documents reproducible.

use crate::dedup::PageSet;
use crate::render::canonical_url;
use chrono::NaiveDate;

/// XML namespace for sitemap
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Sitemap index file name, relative to the output root.
pub const SITEMAP_INDEX: &str = "sitemap.xml";
/// Root-page sitemap file name.
pub const SITEMAP_MAIN: &str = "sitemap-main.xml";
/// Generated-page sitemap file name.
pub const SITEMAP_PROGRAMMATIC: &str = "sitemap-programmatic.xml";

/// `<changefreq>` values from the sitemap protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

/// Single `<url>` row.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapEntry {
    pub loc: String,
    pub lastmod: NaiveDate,
    pub changefreq: ChangeFreq,
    pub priority: f32,
}

impl SitemapEntry {
    fn write_xml(&self, xml: &mut String) {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", escape_xml(&self.loc)));
        xml.push_str(&format!(
            "    <lastmod>{}</lastmod>\n",
            self.lastmod.format("%Y-%m-%d")
        ));
        xml.push_str(&format!(
            "    <changefreq>{}</changefreq>\n",
            self.changefreq.as_str()
        ));
        xml.push_str(&format!("    <priority>{:.1}</priority>\n", self.priority));
        xml.push_str("  </url>\n");
    }
}

/// The three sitemap documents of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sitemaps {
    pub index: String,
    pub main: String,
    pub programmatic: String,
}

impl Sitemaps {
    /// `(file name, document)` pairs in the order they are written.
    pub fn files(&self) -> [(&'static str, &str); 3] {
        [
            (SITEMAP_PROGRAMMATIC, self.programmatic.as_str()),
            (SITEMAP_MAIN, self.main.as_str()),
            (SITEMAP_INDEX, self.index.as_str()),
        ]
    }
}

/// One programmatic-sitemap entry per page, in page-set order.
pub fn page_entries(pages: &PageSet, base_url: &str, today: NaiveDate) -> Vec<SitemapEntry> {
    pages
        .iter()
        .map(|page| SitemapEntry {
            loc: canonical_url(base_url, &page.slug),
            lastmod: today,
            changefreq: ChangeFreq::Monthly,
            priority: 0.6,
        })
        .collect()
}

/// Build all three sitemap documents.
pub fn build_sitemaps(pages: &PageSet, base_url: &str, today: NaiveDate) -> Sitemaps {
    let main = SitemapEntry {
        loc: format!("{base_url}/"),
        lastmod: today,
        changefreq: ChangeFreq::Weekly,
        priority: 1.0,
    };
    Sitemaps {
        index: sitemap_index(&[
            format!("{base_url}/{SITEMAP_MAIN}"),
            format!("{base_url}/{SITEMAP_PROGRAMMATIC}"),
        ]),
        main: urlset(std::slice::from_ref(&main)),
        programmatic: urlset(&page_entries(pages, base_url, today)),
    }
}

/// Render a `<urlset>` document.
pub fn urlset(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 192);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<urlset xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');
    for entry in entries {
        entry.write_xml(&mut xml);
    }
    xml.push_str("</urlset>\n");
    xml
}

/// Render a `<sitemapindex>` document referencing `locs`.
pub fn sitemap_index(locs: &[String]) -> String {
    let mut xml = String::new();
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(&format!(r#"<sitemapindex xmlns="{SITEMAP_NS}">"#));
    xml.push('\n');
    for loc in locs {
        xml.push_str(&format!(
            "  <sitemap>\n    <loc>{}</loc>\n  </sitemap>\n",
            escape_xml(loc)
        ));
    }
    xml.push_str("</sitemapindex>\n");
    xml
}

/// Escape special XML characters.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
