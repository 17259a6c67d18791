use chrono::TimeZone;
use ego_tree::NodeRef;
use scraper::node::Element;
use scraper::{Html, Node};
use std::fmt::Display;

use crate::dom;
use takeout_model::{format_added_at, parse_time_added, Bookmark};

/// Collect one bookmark per `<a>` element, in document order.
///
/// Anchors are recursed into like any other element, so an anchor the parser
/// leaves nested inside another produces its own record.
pub fn collect_bookmarks<Tz>(document: &Html, tz: &Tz) -> Vec<Bookmark>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let bookmarks: Vec<Bookmark> = dom::elements(document)
        .filter(|(_, elem)| elem.name() == "a")
        .map(|(node, elem)| anchor_to_bookmark(node, elem, tz))
        .collect();

    let placeholders = bookmarks.iter().filter(|b| b.title_is_placeholder()).count();
    tracing::debug!(anchors = bookmarks.len(), placeholders, "Collected bookmarks");

    bookmarks
}

fn anchor_to_bookmark<Tz>(node: NodeRef<'_, Node>, elem: &Element, tz: &Tz) -> Bookmark
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let url = elem.attr("href").unwrap_or_default();
    let tags = elem.attr("tags").unwrap_or_default();
    let added_at = format_added_at(parse_time_added(elem.attr("time_added")), tz);

    // No text of its own: the URL stands in, which marks the record as a placeholder
    let title = dom::last_text_child(node).unwrap_or(url);

    Bookmark::new(title, url, tags, added_at)
}
