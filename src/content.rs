//! Content entries and the raw item records they are built from.
//!
//! A [`Content`] value is one published unit: a resolved, validated HTML body
//! with an optional title and image URL. [`ItemRecord`] is its pre-validation
//! shape, extracted field-by-field from a generic JSON object so the source
//! document never needs a fixed schema.
//!
//! # Examples
//!
//! ```rust
//! use contentsmith::content::ItemRecord;
//! use serde_json::json;
//!
//! let record = ItemRecord::from_value(&json!({
//!     "title": "Getting Started",
//!     "htmlRef": "episode-1",
//!     "publishedAt": "2026-01-01"
//! }));
//!
//! assert_eq!(record.title.as_deref(), Some("Getting Started"));
//! assert_eq!(record.html, None);
//! assert_eq!(record.html_ref.as_deref(), Some("episode-1"));
//! ```

use serde::Serialize;
use serde_json::Value;
use url::Url;

/// A validated, resolved unit of publishable content.
///
/// Entries are only ever constructed by a re-index run, after validation and
/// HTML resolution have succeeded, so `html` is never empty in a published
/// entry and `image_url` is always an absolute URL when present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Content {
    /// Optional display title.
    pub title: Option<String>,
    /// Resolved HTML body. Never empty.
    pub html: String,
    /// Optional absolute image URL.
    pub image_url: Option<Url>,
}

/// A raw content descriptor as parsed from one element of the source array.
///
/// Records are transient: they exist only inside a single re-index run and
/// are discarded once converted into a [`Content`] entry (or rejected).
/// Every field is optional at this stage; validation happens during
/// conversion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ItemRecord {
    pub title: Option<String>,
    pub html: Option<String>,
    pub html_ref: Option<String>,
    pub image_url: Option<String>,
}

impl ItemRecord {
    /// Extracts a record from one element of the document array.
    ///
    /// Fields are read individually: anything missing, non-string, or blank
    /// (all whitespace) is treated as not provided, and unrecognized fields
    /// are ignored. Provided text is kept verbatim, untrimmed.
    pub fn from_value(value: &Value) -> Self {
        Self {
            title: text_field(value, "title"),
            html: text_field(value, "html"),
            html_ref: text_field(value, "htmlRef"),
            image_url: text_field(value, "imageUrl"),
        }
    }
}

/// Reads a string field, treating blank text as absent.
fn text_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .map(str::to_owned)
}
