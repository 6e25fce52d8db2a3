//! Static page rendering.
//!
//! Turns one [`PageRecord`] into a complete, self-contained HTML document:
//! heading, intro paragraph, meta description, canonical link, Open Graph and Twitter
//! metadata, JSON-LD structured data, an optional analytics snippet, inline
//! CSS and a single call-to-action link back to the interactive app.
//!
//! Rendering is a pure function of the record and the config. The same input
//! always produces byte-identical output; nothing time- or order-dependent is
//! embedded in a page.
//!
//! ## Call-to-Action Link
//!
//! ```text
//! {base}?ref=p&utm_source=seo&utm_medium=programmatic&utm_campaign={slug}&genre=fiction&style=savage
//! ```
//!
//! The trailing parameters carry each attribute under its dimension's
//! `query_param`, in shape order. Ids and parameter names are slug-safe, so
//! no percent-encoding is needed.

use crate::config::SiteConfig;
use crate::dedup::PageSet;
use crate::naming::{self, PageText};
use crate::types::{Catalogue, PageRecord};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;

/// Directory under the output root that holds one folder per page.
pub const PAGES_DIR: &str = "p";

const CSS: &str = "*{margin:0;padding:0;box-sizing:border-box}\
body{font-family:Georgia,serif;background:#1a1a2e;color:#eee;padding:24px;max-width:720px;margin:0 auto;line-height:1.7}\
h1{color:#f39c12;font-size:1.75rem;margin-bottom:1rem}\
p{margin-bottom:1rem}\
.facets{list-style:none;margin-bottom:1rem}\
.facet-label{color:#aaa}\
.cta{background:#f39c12;color:#1a1a2e;padding:14px 28px;text-decoration:none;display:inline-block;margin:20px 0;border-radius:6px;font-weight:700}\
footer{margin-top:2rem;font-size:.85rem;color:#888}";

/// A rendered page ready to be written to `{root}/p/{slug}/index.html`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub slug: String,
    pub html: String,
}

/// `{base}/p/{slug}/`
pub fn canonical_url(base_url: &str, slug: &str) -> String {
    format!("{base_url}/{PAGES_DIR}/{slug}/")
}

/// Call-to-action URL into the interactive app with attribution parameters.
pub fn cta_url(base_url: &str, record: &PageRecord, catalogue: &Catalogue) -> String {
    let mut url = format!(
        "{base_url}?ref=p&utm_source=seo&utm_medium=programmatic&utm_campaign={}",
        record.slug
    );
    for attr in &record.attributes {
        let param = catalogue
            .dimension(&attr.dimension)
            .map(|d| d.query_param.as_str())
            .unwrap_or(attr.dimension.as_str());
        url.push('&');
        url.push_str(param);
        url.push('=');
        url.push_str(&attr.value.id);
    }
    url
}

/// Page renderer bound to one validated config.
pub struct Renderer<'a> {
    config: &'a SiteConfig,
}

impl<'a> Renderer<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Render `record` to a complete UTF-8 HTML document.
    pub fn render(&self, record: &PageRecord) -> String {
        self.render_markup(record).into_string()
    }

    /// Render every page of `pages`, in parallel, preserving set order.
    pub fn render_all(&self, pages: &PageSet) -> Vec<RenderedPage> {
        pages
            .as_slice()
            .par_iter()
            .map(|record| RenderedPage {
                slug: record.slug.clone(),
                html: self.render(record),
            })
            .collect()
    }

    fn render_markup(&self, record: &PageRecord) -> Markup {
        let config = self.config;
        let site = &config.site;
        let text = naming::compose_page_text(record, config);
        let url = canonical_url(&config.base_url, &record.slug);
        let cta = cta_url(&config.base_url, record, &config.catalogue);

        html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="UTF-8";
                    meta name="viewport" content="width=device-width, initial-scale=1";
                    title { (text.title) }
                    meta name="description" content=(text.description);
                    link rel="canonical" href=(url);
                    meta property="og:title" content=(text.title);
                    meta property="og:description" content=(text.description);
                    meta property="og:url" content=(url);
                    meta property="og:type" content="website";
                    @if !site.name.is_empty() {
                        meta property="og:site_name" content=(site.name);
                    }
                    meta name="twitter:card" content="summary";
                    meta name="twitter:title" content=(text.title);
                    meta name="twitter:description" content=(text.description);
                    script type="application/ld+json" {
                        (PreEscaped(self.structured_data(&text, &url)))
                    }
                    @if let Some(id) = &site.analytics_id {
                        (analytics_snippet(id))
                    }
                    style { (PreEscaped(CSS)) }
                }
                body {
                    main {
                        h1 { (text.heading) }
                        p.lead { (text.intro) }
                        (self.facets(record))
                        a.cta href=(cta) { (site.cta_label) }
                    }
                    @if !site.copyright.is_empty() {
                        footer { (site.copyright) }
                    }
                }
            }
        }
    }

    /// Attribute list: `Label: Display (localized)`, in shape order.
    fn facets(&self, record: &PageRecord) -> Markup {
        let catalogue = &self.config.catalogue;
        let lang = self.config.site.localized_lang.as_deref();
        html! {
            ul.facets {
                @for attr in &record.attributes {
                    @let label = catalogue
                        .dimension(&attr.dimension)
                        .map(|d| d.label.as_str())
                        .unwrap_or(attr.dimension.as_str());
                    li {
                        span.facet-label { (label) ": " }
                        (attr.value.display_en)
                        @if let Some(localized) = &attr.value.display_localized {
                            " "
                            span.localized lang=[lang] { "(" (localized) ")" }
                        }
                    }
                }
            }
        }
    }

    /// JSON-LD `WebApplication` mirroring the page heading and description.
    fn structured_data(&self, text: &PageText, url: &str) -> String {
        let site = &self.config.site;
        let data = serde_json::json!({
            "@context": "https://schema.org",
            "@type": "WebApplication",
            "name": text.heading,
            "description": text.description,
            "url": url,
            "applicationCategory": site.application_category,
            "operatingSystem": "Web",
            "offers": { "@type": "Offer", "price": "0", "priceCurrency": "USD" },
            "author": { "@type": "Organization", "name": site.publisher, "url": site.publisher_url },
        });
        script_safe(&data.to_string())
    }
}

/// Google Analytics `gtag.js` loader plus its inline bootstrap.
fn analytics_snippet(id: &str) -> Markup {
    let quoted = script_safe(&serde_json::Value::String(id.to_string()).to_string());
    let bootstrap = format!(
        "window.dataLayer=window.dataLayer||[];function gtag(){{dataLayer.push(arguments);}}gtag('js',new Date());gtag('config',{quoted});"
    );
    html! {
        script async src={ "https://www.googletagmanager.com/gtag/js?id=" (id) } {}
        script { (PreEscaped(bootstrap)) }
    }
}

/// Keep inline script content from closing its `<script>` element.
///
/// `<` only occurs inside JSON strings, where `\u003c` is an equivalent escape.
fn script_safe(json: &str) -> String {
    json.replace('<', "\\u003c")
}
