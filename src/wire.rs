//! Serialized form of a problem.
//!
//! Field names and omission rules follow RFC 7807:
//!
//! | Field | Present when |
//! |-------|--------------|
//! | `title` | always |
//! | `detail` | non-empty |
//! | `type` | non-empty (always, given the default) |
//! | `instance` | non-empty |
//! | `status` | non-zero |
//!
//! The cause is never serialized. On the way in, the cause is rebuilt from
//! `detail` and a missing or empty `type` becomes `about:blank`. A `null`
//! member reads the same as a missing one.

use crate::Problem;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;

/// Content type for problem detail documents.
pub const APPLICATION_PROBLEM_JSON: &str = "application/problem+json";

/// Wire record for a [`Problem`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProblemDocument<'a> {
    /// Short summary of the problem type.
    #[serde(deserialize_with = "null_as_empty")]
    pub title: Cow<'a, str>,
    /// Explanation of this occurrence.
    #[serde(skip_serializing_if = "str_is_empty", deserialize_with = "null_as_empty")]
    pub detail: Cow<'a, str>,
    /// Problem type URI.
    #[serde(
        rename = "type",
        skip_serializing_if = "str_is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub type_uri: Cow<'a, str>,
    /// URI of this occurrence.
    #[serde(skip_serializing_if = "str_is_empty", deserialize_with = "null_as_empty")]
    pub instance: Cow<'a, str>,
    /// Status code, omitted when `0`.
    #[serde(skip_serializing_if = "status_is_unset", deserialize_with = "null_as_unset")]
    pub status: u16,
}

fn str_is_empty(value: &Cow<'_, str>) -> bool {
    value.is_empty()
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde requires &T signature
fn status_is_unset(status: &u16) -> bool {
    *status == 0
}

fn null_as_empty<'de, 'a, D>(deserializer: D) -> Result<Cow<'a, str>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.map(Cow::Owned).unwrap_or_default())
}

fn null_as_unset<'de, D>(deserializer: D) -> Result<u16, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<u16>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl<'a> From<&'a Problem> for ProblemDocument<'a> {
    fn from(problem: &'a Problem) -> Self {
        Self {
            title: Cow::Borrowed(problem.title()),
            detail: Cow::Borrowed(problem.detail()),
            type_uri: Cow::Borrowed(problem.type_uri()),
            instance: Cow::Borrowed(problem.instance()),
            status: problem.status(),
        }
    }
}

impl From<ProblemDocument<'_>> for Problem {
    fn from(document: ProblemDocument<'_>) -> Self {
        Problem::new(document.title, document.detail, document.status)
            .with_type(document.type_uri)
            .with_instance(document.instance)
    }
}

impl Serialize for Problem {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        ProblemDocument::from(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Problem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        ProblemDocument::deserialize(deserializer).map(Problem::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_TYPE;
    use serde_json::{json, Value};

    #[test]
    fn full_problem_serializes_every_field() {
        let p = Problem::new("Out of credit", "Balance is 30, cost is 50.", 403)
            .with_type("https://example.com/probs/out-of-credit")
            .with_instance("/account/12345/msgs/abc");

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Out of credit",
                "detail": "Balance is 30, cost is 50.",
                "type": "https://example.com/probs/out-of-credit",
                "instance": "/account/12345/msgs/abc",
                "status": 403,
            })
        );
    }

    #[test]
    fn empty_fields_are_omitted() {
        let p = Problem::new("", "", 0);
        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value, json!({ "title": "", "type": DEFAULT_TYPE }));
    }

    #[test]
    fn field_order_is_stable() {
        let p = Problem::new("t", "d", 400).with_instance("/i");
        let text = serde_json::to_string(&p).unwrap();
        assert_eq!(
            text,
            r#"{"title":"t","detail":"d","type":"about:blank","instance":"/i","status":400}"#
        );
    }

    #[test]
    fn cause_is_not_serialized() {
        let p = Problem::new("t", "d", 400).wrap("internal context");
        let text = serde_json::to_string(&p).unwrap();
        assert!(!text.contains("internal context"));
        assert!(!text.contains("cause"));
    }

    #[test]
    fn deserialize_normalizes_type_and_rebuilds_cause() {
        let p: Problem = serde_json::from_str(r#"{"title":"Gone","detail":"deleted","status":410}"#)
            .unwrap();
        assert_eq!(p.title(), "Gone");
        assert_eq!(p.detail(), "deleted");
        assert_eq!(p.status(), 410);
        assert_eq!(p.type_uri(), DEFAULT_TYPE);
        assert_eq!(p.instance(), "");
        assert_eq!(p.to_string(), "deleted");

        let p: Problem = serde_json::from_str(r#"{"title":"x","type":""}"#).unwrap();
        assert_eq!(p.type_uri(), DEFAULT_TYPE);
    }

    #[test]
    fn deserialize_rejects_wrong_types() {
        let result = serde_json::from_str::<Problem>(r#"{"title":"x","status":"400"}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<Problem>(r#"{"title":"x","status":70000}"#);
        assert!(result.is_err());
    }

    #[test]
    fn null_members_read_as_missing() {
        let p: Problem = serde_json::from_str(r#"{"title":"x","detail":null}"#).unwrap();
        assert_eq!(p.title(), "x");
        assert_eq!(p.detail(), "");

        let p: Problem = serde_json::from_value(json!({
            "title": null,
            "detail": null,
            "type": null,
            "instance": null,
            "status": null,
        }))
        .unwrap();
        assert_eq!(p.title(), "");
        assert_eq!(p.detail(), "");
        assert_eq!(p.type_uri(), DEFAULT_TYPE);
        assert_eq!(p.instance(), "");
        assert_eq!(p.status(), 0);

        let err = serde_json::from_str::<Problem>(r#"{"title":"x","detail":7}"#);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_members_are_ignored() {
        let p: Problem =
            serde_json::from_str(r#"{"title":"x","balance":30,"accounts":["/a"]}"#).unwrap();
        assert_eq!(p.title(), "x");
    }

    #[test]
    fn document_round_trip_preserves_wire_fields() {
        let p = Problem::new("t", "d", 422).with_instance("/orders/1").wrap("ctx");
        let text = serde_json::to_string(&p).unwrap();
        let back: Problem = serde_json::from_str(&text).unwrap();
        assert_eq!(ProblemDocument::from(&back), ProblemDocument::from(&p));
    }

    #[test]
    fn document_from_value() {
        let value: Value = json!({ "title": "t", "status": 404 });
        let document: ProblemDocument<'static> = serde_json::from_value(value).unwrap();
        assert_eq!(document.status, 404);
        assert!(document.detail.is_empty());
    }
}
