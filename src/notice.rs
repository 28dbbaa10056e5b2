//! User-facing error notices.
//!
//! Every failed API call funnels through here: the error is mapped to a
//! short transient notice with a stable toast identifier, logged with its
//! context, and then dropped. Nothing retries and nothing propagates. A
//! failed page fetch leaves the feed as it was; a failed liked-set fetch
//! leaves likes unmarked.

use crate::api::ApiError;
use std::borrow::Cow;

/// Known server error codes and their user-facing text.
///
/// The server attaches `{ "code": ... }` to error responses; codes missing
/// from this table fall back to a generic notice that still shows the code.
const SERVER_NOTICES: &[(&str, &str)] = &[
    ("AUTH-001", "Session expired. Sign in again with `ladle login`"),
    ("AUTH-002", "You are not allowed to do that"),
    ("AUTH-003", "Nickname is already in use"),
    ("BOARD-001", "That recipe no longer exists"),
    ("BOARD-002", "The board is temporarily unavailable"),
];

/// A transient toast-style notice.
///
/// The `toast_id` is stable per failure class so repeats of the same failure
/// coalesce instead of stacking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub toast_id: String,
    pub text: Cow<'static, str>,
}

impl Notice {
    pub fn new(toast_id: impl Into<String>, text: impl Into<Cow<'static, str>>) -> Self {
        Self {
            toast_id: toast_id.into(),
            text: text.into(),
        }
    }
}

/// Map an API error to its notice. `context` names the operation for the log
/// line only; the notice text depends solely on the failure class.
pub fn notice_for(error: &ApiError, context: &str) -> Notice {
    tracing::warn!(context, error = %error, "API call failed");

    let text: Cow<'static, str> = match error {
        ApiError::Network(_) => Cow::Borrowed("No response from the server"),
        ApiError::Timeout => Cow::Borrowed("The server is taking too long to respond"),
        ApiError::Status(status) => Cow::Owned(format!("Server error (HTTP {})", status)),
        ApiError::Server { code } => SERVER_NOTICES
            .iter()
            .find(|(known, _)| known == code)
            .map(|(_, text)| Cow::Borrowed(*text))
            .unwrap_or_else(|| Cow::Owned(format!("Unexpected server error ({})", code))),
        ApiError::Malformed(_) => Cow::Borrowed("The server sent an unreadable response"),
        ApiError::NoSession => Cow::Borrowed("Sign in first with `ladle login`"),
    };

    Notice {
        toast_id: error.toast_id(),
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_server_code_maps_to_table_text() {
        let err = ApiError::Server {
            code: "AUTH-003".to_string(),
        };
        let notice = notice_for(&err, "change nickname");
        assert_eq!(notice.toast_id, "AUTH-003");
        assert_eq!(notice.text, "Nickname is already in use");
    }

    #[test]
    fn test_unknown_server_code_falls_back_generic() {
        let err = ApiError::Server {
            code: "WAT-999".to_string(),
        };
        let notice = notice_for(&err, "like");
        assert_eq!(notice.toast_id, "WAT-999");
        assert!(notice.text.contains("WAT-999"));
    }

    #[test]
    fn test_no_response_has_stable_toast_id() {
        let err = ApiError::Timeout;
        let notice = notice_for(&err, "fetch page");
        assert_eq!(notice.toast_id, "request-timeout");
    }

    #[test]
    fn test_distinct_failure_classes_distinct_ids() {
        let a = notice_for(&ApiError::Timeout, "x");
        let b = notice_for(&ApiError::Malformed("bad".into()), "x");
        let c = notice_for(&ApiError::Status(502), "x");
        assert_ne!(a.toast_id, b.toast_id);
        assert_ne!(b.toast_id, c.toast_id);
        assert_ne!(a.toast_id, c.toast_id);
    }
}
