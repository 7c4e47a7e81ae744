use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use crate::{AuthorId, PostId};

/// Hard cap on caption length, in characters
pub const MAX_CAPTION_CHARS: usize = 2000;

/// A comment on a post. Carried as inert payload; Flick does not
/// reconcile comment threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub author_id: AuthorId,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A durable post record as read back from the post collection.
///
/// Immutable once written except `like_count` and `comments`, which are
/// plain counters updated out of band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(default)]
    pub id: PostId,
    pub caption: String,
    pub media_url: String,
    pub author_id: AuthorId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

/// What the post writer appends to the collection. The collection assigns
/// the id; `like_count` starts at zero and `comments` empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPost {
    pub caption: String,
    pub media_url: String,
    pub author_id: AuthorId,
    pub author_name: String,
    pub created_at: DateTime<Utc>,
}

/// Why a raw stored document failed validation into a [`PostRecord`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    #[error("document is not an object")]
    NotAnObject,

    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' is not a {expected}")]
    InvalidField {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field '{field}' is not a recognizable timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },
}

impl PostRecord {
    /// Validate a raw stored document into a typed record.
    ///
    /// Required fields: `caption`, `mediaUrl`, `authorId`, `authorName`,
    /// `createdAt`. `likeCount` and `comments` default to zero/empty.
    /// Anything malformed fails closed with a [`DocumentError`] instead of
    /// letting an undefined-shaped record reach the UI layer.
    pub fn from_document(id: PostId, doc: &Value) -> Result<Self, DocumentError> {
        let obj = doc.as_object().ok_or(DocumentError::NotAnObject)?;

        let caption = required_str(obj, "caption")?.to_string();
        let media_url = required_str(obj, "mediaUrl")?.to_string();
        let author_id = AuthorId::from_string(required_str(obj, "authorId")?.to_string());
        let author_name = required_str(obj, "authorName")?.to_string();
        let created_at = required_timestamp(obj, "createdAt")?;

        let like_count = match obj.get("likeCount") {
            None | Some(Value::Null) => 0,
            Some(v) => v.as_u64().ok_or(DocumentError::InvalidField {
                field: "likeCount",
                expected: "non-negative integer",
            })?,
        };

        let comments = match obj.get("comments") {
            None | Some(Value::Null) => Vec::new(),
            Some(v) => serde_json::from_value(v.clone()).map_err(|_| {
                DocumentError::InvalidField {
                    field: "comments",
                    expected: "array of comments",
                }
            })?,
        };

        Ok(Self {
            id,
            caption,
            media_url,
            author_id,
            author_name,
            created_at,
            like_count,
            comments,
        })
    }

    /// Feed ordering: `created_at` descending, ties broken by id ascending.
    ///
    /// Every snapshot producer sorts with this comparator so the projection
    /// order is stable and deterministic regardless of backend.
    pub fn feed_cmp(&self, other: &Self) -> Ordering {
        other
            .created_at
            .cmp(&self.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl NewPost {
    /// Render the camelCase document shape the collection stores
    pub fn to_document(&self) -> Value {
        json!({
            "caption": self.caption,
            "mediaUrl": self.media_url,
            "authorId": self.author_id.as_str(),
            "authorName": self.author_name,
            "createdAt": self.created_at.to_rfc3339(),
            "likeCount": 0,
            "comments": [],
        })
    }
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, DocumentError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(DocumentError::MissingField { field }),
        Some(v) => v.as_str().ok_or(DocumentError::InvalidField {
            field,
            expected: "string",
        }),
    }
}

/// Accept RFC 3339 strings or epoch milliseconds (legacy documents)
fn required_timestamp(
    obj: &Map<String, Value>,
    field: &'static str,
) -> Result<DateTime<Utc>, DocumentError> {
    let value = match obj.get(field) {
        None | Some(Value::Null) => return Err(DocumentError::MissingField { field }),
        Some(v) => v,
    };

    if let Some(s) = value.as_str() {
        return DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| DocumentError::InvalidTimestamp {
                field,
                value: s.to_string(),
            });
    }

    if let Some(millis) = value.as_i64() {
        return DateTime::from_timestamp_millis(millis).ok_or(DocumentError::InvalidTimestamp {
            field,
            value: millis.to_string(),
        });
    }

    Err(DocumentError::InvalidTimestamp {
        field,
        value: value.to_string(),
    })
}
