//! Applies extraction patterns to fetched HTML.
//!
//! Everything here is synchronous and returns owned data: `scraper::Html` is
//! not `Send`, so it must never live across an `.await` in the engine.

use std::collections::HashSet;

use crawl_logging::{crawl_debug, crawl_warn};
use scraper::{Html, Selector};
use url::Url;

/// Compiles `pattern`; empty or malformed patterns select nothing.
pub fn compile_pattern(pattern: &str) -> Option<Selector> {
    let pattern = pattern.trim();
    if pattern.is_empty() {
        crawl_debug!("empty pattern selects nothing");
        return None;
    }
    match Selector::parse(pattern) {
        Ok(selector) => Some(selector),
        Err(err) => {
            crawl_warn!("invalid pattern {:?}: {}", pattern, err);
            None
        }
    }
}

/// Absolute http(s) targets of the elements matching `pattern`, resolved
/// against `page_url`, in document order without repeats.
pub fn select_links(html: &str, page_url: &str, pattern: &str) -> Vec<String> {
    let Some(selector) = compile_pattern(pattern) else {
        return Vec::new();
    };
    let base = Url::parse(page_url).ok();
    let document = Html::parse_document(html);

    let mut seen = HashSet::new();
    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_href(href, base.as_ref()))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Text of every element matching `pattern`, joined by single spaces.
/// Inline markup inside an element does not split its words. Returns an
/// empty string when nothing matches.
pub fn select_text(html: &str, pattern: &str) -> String {
    let Some(selector) = compile_pattern(pattern) else {
        return String::new();
    };
    let document = Html::parse_document(html);
    document
        .select(&selector)
        .map(|element| normalise_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalise_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn resolve_href(reference: &str, base: Option<&Url>) -> Option<String> {
    let trimmed = reference.trim();
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_ascii_lowercase();
    if lower.starts_with('#') || lower.starts_with("javascript:") || lower.starts_with("mailto:")
    {
        return None;
    }
    let url = match Url::parse(trimmed) {
        Ok(url) => url,
        Err(_) => base?.join(trimmed).ok()?,
    };
    matches!(url.scheme(), "http" | "https").then(|| url.into())
}
