//! HTTP response construction.
//!
//! The dispatcher is transport-agnostic: it produces [`RestResponse`] values
//! (status code plus body text) that the hosting HTTP layer writes out. JSON
//! bodies are serialized with sorted keys and four-space indentation so wire
//! output is deterministic.

use crate::error::RestError;
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::ser::PrettyFormatter;

/// A finished HTTP response: status code and body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestResponse {
    pub status: u16,
    pub body: String,
}

impl RestResponse {
    /// 200 response carrying the JSON text of `value`.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status: 200,
            body: to_sorted_pretty(value)?,
        })
    }

    /// 404 with an empty body. Absent and unauthorized records both produce
    /// exactly this response.
    pub fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// 200 with an empty body (successful DELETE).
    pub fn empty() -> Self {
        Self {
            status: 200,
            body: String::new(),
        }
    }

    /// 200 carrying a pre-rendered HTML page.
    pub fn html(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// 400 carrying the error's wire body, `"<kind>: <message>"`.
    pub fn error(error: &RestError) -> Self {
        Self {
            status: 400,
            body: error.body(),
        }
    }
}

/// Serialize with sorted object keys and four-space indentation.
///
/// Key sorting comes from `serde_json`'s default BTreeMap-backed maps; this
/// crate must not enable the `preserve_order` feature.
fn to_sorted_pretty<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|_| serde_json::Error::custom("serialized JSON was not UTF-8"))
}
