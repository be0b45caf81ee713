use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use feed_rs::model::{Entry, Link};
use feed_rs::parser::Builder;
use scraper::Html;
use tracing::debug;

use crate::domain::FeedEntry;
use crate::errors::{DashboardError, DashboardResult};

/// Most entries returned for one feed
pub const MAX_ENTRIES: usize = 30;

/// Longest summary kept, in characters
pub const MAX_SUMMARY_CHARS: usize = 300;

const UNTITLED: &str = "Untitled";

/// Zoned layouts seen in the wild besides RFC 3339 / RFC 2822
const ZONED_FORMATS: &[&str] = &[
    "%d %b %Y %H:%M:%S %z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%z",
];

/// Layouts without a zone; read as UTC
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d %b %Y", "%B %d, %Y"];

/// Parse an RSS or Atom document into at most [`MAX_ENTRIES`] entries, in
/// document order
pub fn parse_entries(bytes: &[u8]) -> DashboardResult<Vec<FeedEntry>> {
    let unreadable = UnreadableDates::default();

    let parser = Builder::new()
        .timestamp_parser(unreadable.clone().into_parser())
        .build();
    let feed = parser
        .parse(bytes)
        .map_err(|e| DashboardError::Parse(e.to_string()))?;

    Ok(feed
        .entries
        .into_iter()
        .take(MAX_ENTRIES)
        .map(|entry| normalize_entry(entry, &unreadable))
        .collect())
}

fn normalize_entry(entry: Entry, unreadable: &UnreadableDates) -> FeedEntry {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let link = primary_link(&entry.links).unwrap_or_default();

    let published = entry
        .published
        .or(entry.updated)
        .map(|dt| unreadable.raw(dt).unwrap_or_else(|| dt.to_rfc3339()))
        .unwrap_or_default();

    let summary = entry
        .summary
        .map(|s| truncate_chars(&html_to_text(&s.content), MAX_SUMMARY_CHARS))
        .filter(|s| !s.is_empty());

    FeedEntry::new(title, link)
        .with_published(published)
        .with_summary(summary)
}

/// Date strings no known layout could read, kept verbatim.
///
/// feed-rs only stores parsed timestamps, so an unreadable date is handed back
/// as a placeholder `MIN_UTC + index` seconds that [`UnreadableDates::raw`]
/// maps back to the source text.
#[derive(Clone, Default)]
struct UnreadableDates {
    texts: Rc<RefCell<Vec<String>>>,
}

impl UnreadableDates {
    fn into_parser(self) -> impl Fn(&str) -> Option<DateTime<Utc>> + 'static {
        move |text: &str| {
            let text = text.trim();
            if text.is_empty() {
                return None;
            }

            parse_timestamp(text).or_else(|| {
                debug!(date = text, "keeping unreadable date as-is");
                let mut texts = self.texts.borrow_mut();
                let placeholder = DateTime::<Utc>::MIN_UTC
                    .checked_add_signed(TimeDelta::seconds(texts.len() as i64))?;
                texts.push(text.to_string());
                Some(placeholder)
            })
        }
    }

    fn raw(&self, dt: DateTime<Utc>) -> Option<String> {
        let index = dt.signed_duration_since(DateTime::<Utc>::MIN_UTC).num_seconds();
        let index = usize::try_from(index).ok()?;
        self.texts.borrow().get(index).cloned()
    }
}

/// Read a feed timestamp in any of the layouts publishers actually use
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }

    // RFC 2822 with a wrong weekday or a `UTC` zone
    let without_weekday = text.split_once(", ").map_or(text, |(_, rest)| rest);
    let numeric_zone = without_weekday.replace(" UTC", " +0000");
    if let Ok(dt) = DateTime::parse_from_rfc2822(&numeric_zone) {
        return Some(dt.with_timezone(&Utc));
    }

    ZONED_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// The alternate (human-readable) link, falling back to the first one
fn primary_link(links: &[Link]) -> Option<String> {
    links
        .iter()
        .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .or_else(|| links.first())
        .map(|l| l.href.clone())
}

/// Extract plain text from HTML content
pub fn html_to_text(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let mut text = String::new();

    for node in document.root_element().descendants() {
        if let Some(text_node) = node.value().as_text() {
            text.push_str(text_node);
        }
        // Add space after block elements to preserve word boundaries
        if let Some(element) = node.value().as_element() {
            match element.name() {
                "p" | "br" | "div" | "li" => text.push(' '),
                _ => {}
            }
        }
    }

    // Collapse whitespace and trim
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate string to at most `max_chars` characters, respecting char boundaries
pub fn truncate_chars(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}
