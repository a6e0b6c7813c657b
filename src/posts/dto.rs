use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::AppError,
    posts::repo_types::{NewPost, Post},
    validation::{required, Validate},
};

pub const MIN_TITLE_LEN: usize = 5;
pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Upload body. Any `userId` the client sends is ignored; ownership comes
/// from the token.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub content_link: Option<String>,
    /// Number or numeric string.
    pub difficulty_level: Option<Value>,
}

impl Validate for CreatePostRequest {
    type Valid = NewPost;

    fn validate(self) -> Result<NewPost, AppError> {
        let difficulty = self.difficulty_level.filter(|v| !v.is_null());
        let (Some(title), Some(description), Some(content_link), Some(difficulty)) = (
            required(self.title),
            required(self.description),
            required(self.content_link),
            difficulty,
        ) else {
            return Err(AppError::validation("Please fill all fields"));
        };

        if title.chars().count() < MIN_TITLE_LEN {
            return Err(AppError::validation(format!(
                "Title must be at least {MIN_TITLE_LEN} characters long"
            )));
        }

        let difficulty_level = parse_difficulty(&difficulty)
            .ok_or_else(|| AppError::validation("Difficulty level must be a number"))?;

        Ok(NewPost {
            title,
            description,
            content_link,
            difficulty_level,
        })
    }
}

/// Integer part of a numeric JSON value or numeric string.
fn parse_difficulty(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !n.is_finite() {
        return None;
    }
    let n = n.trunc();
    if n < i32::MIN as f64 || n > i32::MAX as f64 {
        return None;
    }
    Some(n as i32)
}

/// Raw `?page=&limit=`. Each value is read by its leading integer, so
/// `"2.5"` is page 2; values with no leading digits fall back to the defaults.
#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: if page >= 1 { page } else { DEFAULT_PAGE },
            limit: if limit >= 1 { limit } else { DEFAULT_LIMIT },
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

impl From<FeedQuery> for Page {
    fn from(q: FeedQuery) -> Self {
        let coerce = |raw: Option<String>, default: i64| {
            raw.as_deref().and_then(leading_int).unwrap_or(default)
        };
        Page::new(coerce(q.page, DEFAULT_PAGE), coerce(q.limit, DEFAULT_LIMIT))
    }
}

/// Optional sign followed by ASCII digits at the start of `raw`, ignoring
/// leading whitespace and anything after the digits.
fn leading_int(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (negative, rest) = match raw.as_bytes().first() {
        Some(b'-') => (true, &raw[1..]),
        Some(b'+') => (false, &raw[1..]),
        _ => (false, raw),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let n = rest[..end].parse::<i64>().ok()?;
    Some(if negative { -n } else { n })
}

#[derive(Debug, Serialize)]
pub struct CreatedPostResponse {
    pub data: Post,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}
