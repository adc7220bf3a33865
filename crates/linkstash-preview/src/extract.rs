//! HTML metadata extraction.
//!
//! Each preview field is resolved independently by trying an ordered list of
//! candidate sources until one yields a non-empty value. The lists are the
//! contract: reordering them changes which tag wins on pages that declare
//! several.

use scraper::{Html, Selector};

/// A single candidate source for a metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaSource {
    /// Text content of the document `<title>` element.
    DocumentTitle,
    /// `content` attribute of `<meta property="...">`.
    Property(&'static str),
    /// `content` attribute of `<meta name="...">`.
    Name(&'static str),
}

/// Candidate sources for the preview title, in priority order.
pub const TITLE_SOURCES: &[MetaSource] = &[
    MetaSource::DocumentTitle,
    MetaSource::Property("og:title"),
    MetaSource::Name("twitter:title"),
];

/// Candidate sources for the preview description, in priority order.
pub const DESCRIPTION_SOURCES: &[MetaSource] = &[
    MetaSource::Name("description"),
    MetaSource::Property("og:description"),
    MetaSource::Name("twitter:description"),
];

/// Candidate sources for the preview image, in priority order.
pub const IMAGE_SOURCES: &[MetaSource] = &[
    MetaSource::Property("og:image"),
    MetaSource::Name("twitter:image"),
    MetaSource::Name("twitter:image:src"),
];

/// Raw field values pulled out of a parsed document. `None` means every
/// source for that field was missing or empty; sentinel substitution
/// happens later, in the service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

/// Extract preview metadata from an HTML document.
///
/// The input is parsed leniently; malformed or non-HTML input degrades to
/// an empty or partial document rather than an error.
pub fn extract_metadata(html: &str) -> PageMetadata {
    let document = Html::parse_document(html);
    PageMetadata {
        title: resolve_first(&document, TITLE_SOURCES),
        description: resolve_first(&document, DESCRIPTION_SOURCES),
        image: resolve_first(&document, IMAGE_SOURCES),
    }
}

/// First-match-wins over an ordered source list.
fn resolve_first(document: &Html, sources: &[MetaSource]) -> Option<String> {
    sources.iter().find_map(|source| resolve(document, source))
}

/// Resolve one source, yielding only a non-empty trimmed value.
fn resolve(document: &Html, source: &MetaSource) -> Option<String> {
    match source {
        MetaSource::DocumentTitle => {
            let selector = Selector::parse("title").ok()?;
            document
                .select(&selector)
                .next()
                .map(|el| el.text().collect::<String>())
        }
        MetaSource::Property(property) => {
            meta_content(document, &format!("meta[property=\"{}\"]", property))
        }
        MetaSource::Name(name) => meta_content(document, &format!("meta[name=\"{}\"]", name)),
    }
    .map(|value| value.trim().to_string())
    .filter(|value| !value.is_empty())
}

/// Extract the `content` attribute of the first element matching `selector`.
fn meta_content(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
}
