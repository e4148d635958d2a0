use scraper::{ElementRef, Html};

/// Collect the raw `href` of every anchor whose value contains `marker`,
/// compared case-insensitively.
///
/// Values are returned as the parser reports them, with character references
/// decoded. Results follow document order and keep duplicates. Markup the parser
/// cannot make sense of yields fewer (or no) links, never an error.
pub fn extract_driver_links(html: &str, marker: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let marker = marker.to_lowercase();

    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name().eq_ignore_ascii_case("a"))
        .filter_map(|anchor| anchor.value().attr("href"))
        .filter(|href| href.to_lowercase().contains(&marker))
        .map(str::to_string)
        .collect()
}
