//! # Human Text Decoder
//!
//! Splits raw EAN-128 data into application identifier fields and renders the
//! bracketed label printed under the bars:
//!
//! ```text
//! 01040123453333361503123110123456
//! (01)04012345333336(15)031231(10)123456
//! ```
//!
//! At each field boundary the 2, 3 and 4 character prefixes are looked up in
//! the [catalog](super::catalog), shortest first. A variable-length field
//! ends at the next [`FNC1`] or at the end of the data. An FNC1 found at a
//! field boundary is skipped.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::FNC1;
use super::catalog::{self, Ean128Field};
use crate::error::BarcodeError;

/// One decoded application identifier field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedField {
    /// Concrete identifier, e.g. `"7031"` for the `7030-7039` range entry
    pub id: String,
    pub content: String,
    /// Character offset of the identifier in the raw data
    pub position: usize,
    pub field: &'static Ean128Field,
}

impl fmt::Display for DecodedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.id, self.content)
    }
}

/// Decode raw EAN-128 data into its fields.
pub fn decode_fields(raw: &str) -> Result<Vec<DecodedField>, BarcodeError> {
    let chars: Vec<char> = raw.chars().collect();
    let mut fields = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        if chars[pos] == FNC1 {
            pos += 1;
            continue;
        }

        let (id, field) =
            match_identifier(&chars[pos..]).ok_or_else(|| BarcodeError::UnrecognizedField {
                position: pos,
                remainder: chars[pos..].iter().collect(),
            })?;

        let start = pos + id.len();
        let rest = &chars[start..];
        let data_len = rest.iter().take_while(|&&c| c != FNC1).count();

        let (content_len, next) = if field.fixed_length {
            if data_len < field.content_length {
                return Err(BarcodeError::TruncatedField {
                    id,
                    expected: field.content_length,
                    available: data_len,
                });
            }
            (field.content_length, start + field.content_length)
        } else {
            // step over the terminating FNC1, if any
            (data_len, (start + data_len + 1).min(chars.len()))
        };

        let content: String = rest[..content_len].iter().collect();
        debug!(id = %id, content = %content, position = pos, "decoded field");

        fields.push(DecodedField {
            id,
            content,
            position: pos,
            field,
        });
        pos = next;
    }

    Ok(fields)
}

/// Convert raw EAN-128 data into the bracketed label.
///
/// ```
/// use linebar::ean128::{FNC1, to_human_text};
///
/// let raw = format!("010401234533333610123456{FNC1}15031231");
/// assert_eq!(
///     to_human_text(&raw).unwrap(),
///     "(01)04012345333336(10)123456(15)031231"
/// );
/// ```
pub fn to_human_text(raw: &str) -> Result<String, BarcodeError> {
    Ok(decode_fields(raw)?
        .iter()
        .map(DecodedField::to_string)
        .collect())
}

/// Decode and check every field against its catalog entry.
///
/// Numeric-only fields must hold digits and variable-length fields must not
/// exceed their maximum length.
pub fn validate(raw: &str) -> Result<Vec<DecodedField>, BarcodeError> {
    let fields = decode_fields(raw)?;

    for decoded in &fields {
        let field = decoded.field;
        if field.numeric_only && !decoded.content.chars().all(|c| c.is_ascii_digit()) {
            return Err(BarcodeError::InvalidFieldContent {
                id: decoded.id.clone(),
                reason: "content must be numeric".to_string(),
            });
        }
        let len = decoded.content.chars().count();
        if len > field.content_length {
            return Err(BarcodeError::InvalidFieldContent {
                id: decoded.id.clone(),
                reason: format!(
                    "content has {len} characters, at most {} allowed",
                    field.content_length
                ),
            });
        }
    }

    Ok(fields)
}

fn match_identifier(rest: &[char]) -> Option<(String, &'static Ean128Field)> {
    (2..=4)
        .take_while(|&len| len <= rest.len())
        .find_map(|len| {
            let id: String = rest[..len].iter().collect();
            catalog::lookup(&id).map(|field| (id, field))
        })
}
