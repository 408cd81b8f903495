use itertools::Itertools;
use lazy_regex::regex;
use scraper::{ElementRef, Html, Selector};

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav",
    "ol", "p", "pre", "section", "table", "tr", "ul",
];

/// Rendered-looking text of an element.
///
/// Whitespace runs collapse to one space, block elements and `<br>` start a new
/// line, and blank lines are dropped.
pub(crate) fn visible_text(el: ElementRef) -> String {
    let mut raw = String::new();
    push_text(el, &mut raw);
    raw.split('\n')
        .map(|line| regex!(r"\s+").replace_all(line, " ").trim().to_string())
        .filter(|line| !line.is_empty())
        .join("\n")
}

fn push_text(el: ElementRef, out: &mut String) {
    for child in el.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(&text.replace(|c: char| c == '\n' || c == '\r', " "));
        } else if let Some(child_el) = ElementRef::wrap(child) {
            let name = child_el.value().name();
            if name == "br" {
                out.push('\n');
                continue;
            }
            if matches!(name, "script" | "style" | "template" | "noscript") {
                continue;
            }
            let block = BLOCK_TAGS.contains(&name);
            if block {
                out.push('\n');
            }
            push_text(child_el, out);
            if block {
                out.push('\n');
            }
        }
    }
}

/// Visible text of the first element matching `selector`.
pub(crate) fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector).next().map(visible_text)
}

/// Splits `Key: Value` lines into pairs. Lines without a `": "` are skipped.
pub(crate) fn key_values(text: &str) -> Vec<(&str, &str)> {
    text.lines()
        .filter_map(|line| line.split_once(": "))
        .map(|(k, v)| (k.trim(), v.trim()))
        .collect()
}

/// Absolute `href` of the first anchor inside every `container`, in page
/// order and without duplicates.
pub(crate) fn container_links(
    doc: &Html,
    container: &Selector,
    anchor: &Selector,
    base: &str,
) -> Vec<String> {
    let base = reqwest::Url::parse(base).ok();
    doc.select(container)
        .filter_map(|item| item.select(anchor).next())
        .filter_map(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty() && !href.starts_with('#'))
        .filter_map(|href| match &base {
            Some(base) => base.join(href).ok().map(|url| url.to_string()),
            None => reqwest::Url::parse(href).ok().map(|url| url.to_string()),
        })
        .unique()
        .collect()
}
