//! Final-stage sanitizer applied to everything returned to the host.
//!
//! The host owns the canonical item schema; this crate only guarantees that
//! every outgoing string has passed through a [`Sanitizer`]. [`HtmlSanitizer`]
//! is the default: catalog text arrives with HTML markup and entities mixed in.

use scraper::Html;
use serde_json::Value;

use crate::domain::MovieRecord;

/// Pure text cleaner applied to records and raw payloads.
pub trait Sanitizer: Send + Sync {
    fn sanitize_text(&self, text: &str) -> String;

    fn sanitize_record(&self, mut record: MovieRecord) -> MovieRecord {
        record.title = self.sanitize_text(&record.title);
        record.synopsis = self.sanitize_text(&record.synopsis);
        record.certification = self.sanitize_text(&record.certification);
        record.genre = record
            .genre
            .iter()
            .map(|genre| self.sanitize_text(genre))
            .collect();
        for torrent in record.torrents.values_mut() {
            torrent.filesize = self.sanitize_text(&torrent.filesize);
        }
        record
    }

    fn sanitize_records(&self, records: Vec<MovieRecord>) -> Vec<MovieRecord> {
        records
            .into_iter()
            .map(|record| self.sanitize_record(record))
            .collect()
    }

    /// Cleans every string inside an arbitrary JSON value.
    fn sanitize_value(&self, value: Value) -> Value {
        match value {
            Value::String(text) => Value::String(self.sanitize_text(&text)),
            Value::Array(items) => Value::Array(
                items
                    .into_iter()
                    .map(|item| self.sanitize_value(item))
                    .collect(),
            ),
            Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, item)| (key, self.sanitize_value(item)))
                    .collect(),
            ),
            other => other,
        }
    }
}

/// Strips HTML tags and decodes character entities.
///
/// Text is parsed as an HTML fragment and only its text nodes are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSanitizer;

impl Sanitizer for HtmlSanitizer {
    fn sanitize_text(&self, text: &str) -> String {
        if !text.contains(['<', '&']) {
            return text.trim().to_owned();
        }

        Html::parse_fragment(text)
            .root_element()
            .text()
            .collect::<String>()
            .trim()
            .to_owned()
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughSanitizer;

impl Sanitizer for PassthroughSanitizer {
    fn sanitize_text(&self, text: &str) -> String {
        text.to_owned()
    }
}
