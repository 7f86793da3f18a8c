//! Background rectangle removal.
//!
//! Design tools export icons with an artboard `<rect .../>` that blocks
//! recoloring. This is a plain substring edit; the markup is never parsed.

const RECT_OPEN: &str = "<rect";
const SELF_CLOSE: &str = "/>";

/// Remove the first `<rect .../>` element from `svg`.
///
/// The span runs from the first `<rect` through the first `/>` at or after
/// it. Only that one element is removed.
///
/// # Degenerate input
///
/// Known defect, kept for output compatibility until the owner decides:
/// - no `<rect`: the prefix is empty, so everything up to and including the
///   first `/>` of the document is dropped;
/// - no closing `/>`: the suffix restarts after the first character of the
///   input.
pub fn strip_first_rect(svg: &str) -> String {
    let rect_start = svg.find(RECT_OPEN);
    let prefix = rect_start.map_or("", |start| &svg[..start]);

    let search_from = rect_start.unwrap_or(0);
    let suffix_start = match svg[search_from..].find(SELF_CLOSE) {
        Some(offset) => search_from + offset + SELF_CLOSE.len(),
        // "not found" position plus the marker length lands on index 1
        None => svg.chars().next().map_or(0, char::len_utf8),
    };

    let mut out = String::with_capacity(prefix.len() + svg.len() - suffix_start);
    out.push_str(prefix);
    out.push_str(&svg[suffix_start..]);
    out
}
