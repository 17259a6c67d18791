use scraper::Html;

use takeout_extract::dom;

/// Find the page title: the first `<title>` element, in document order, whose
/// last direct text child is non-empty.
///
/// Empty `<title>` elements are skipped and the search carries on through the
/// rest of the document. The text is returned verbatim.
pub fn find_title(document: &Html) -> Option<String> {
    dom::elements(document)
        .filter(|(_, elem)| elem.name() == "title")
        .find_map(|(node, _)| dom::last_text_child(node).filter(|text| !text.is_empty()))
        .map(str::to_string)
}

/// Parse a response body and look for its title.
pub fn title_from_body(body: &str) -> Option<String> {
    find_title(&Html::parse_document(body))
}
