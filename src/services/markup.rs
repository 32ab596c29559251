//! HTML markup stripping for fetched posts.

use scraper::Html;

/// Parse `text` as an HTML fragment and concatenate its text nodes.
///
/// Whitespace inside text nodes is preserved, so paragraph breaks in
/// markdown-with-HTML posts still segment the same way afterwards.
pub fn strip_markup(text: &str) -> String {
    let fragment = Html::parse_fragment(text);
    fragment.root_element().text().collect()
}
