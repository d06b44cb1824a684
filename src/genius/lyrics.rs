//! Lyrics extraction from Genius song pages.
//!
//! Lyrics live in one or more `div[data-lyrics-container="true"]` blocks. Line
//! breaks are `<br>` elements, annotations are links wrapping the annotated text,
//! and some containers hold page furniture marked `data-exclude-from-selection`.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};

use crate::genius::ProviderError;

const LYRICS_SELECTOR: &str = "div[data-lyrics-container='true']";

/// Section headers such as "[Verse 1]" or "[Chorus: Bob Dylan]".
static SECTION_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]\n]*\]").expect("valid section header pattern"));

static BLANK_LINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n+").expect("valid blank line pattern"));

/// Returns the page's lyrics with section headers removed, or an empty string when
/// the page has no lyrics container (instrumentals, unreleased placeholders).
pub fn extract_lyrics(html: &str) -> Result<String, ProviderError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(LYRICS_SELECTOR)
        .map_err(|e| ProviderError::Scrape(format!("invalid selector '{}': {:?}", LYRICS_SELECTOR, e)))?;

    let mut raw = String::new();
    for container in document.select(&selector) {
        collect_text(container, &mut raw);
        raw.push('\n');
    }

    Ok(remove_section_headers(&raw))
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for node in element.children() {
        match node.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) if el.attr("data-exclude-from-selection").is_some() => {}
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(node) {
                    collect_text(child, out);
                }
            }
            _ => {}
        }
    }
}

pub fn remove_section_headers(lyrics: &str) -> String {
    let without_headers = SECTION_HEADER.replace_all(lyrics, "");
    let collapsed = BLANK_LINES.replace_all(&without_headers, "\n");
    collapsed.trim().to_string()
}
