//! Field validation for project create and patch bodies.
//!
//! Pure logic, no database access. Input fields arrive as raw JSON
//! values so that *absent*, *explicitly empty*, and *present with a
//! value* stay distinguishable; per-field violations are collected and
//! reported together rather than short-circuiting on the first one.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::patch::Patch;
use crate::types::Timestamp;

/// Maximum accepted title length, in characters.
pub const TITLE_MAX_LEN: usize = 128;

/// Raw create/patch body for a project.
///
/// Fields are kept as `serde_json::Value` rather than typed options:
/// a wrong-typed value must surface as a field error, not as a body
/// deserialization failure. JSON `null` counts as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub title: Option<Value>,
    #[serde(default)]
    pub due: Option<Value>,
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub completed: Option<Value>,
}

/// A single validation failure, naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub error: String,
}

/// Validated partial update: one tri-state [`Patch`] per mutable field.
///
/// `title` and `completed` never hold [`Patch::Clear`] — the
/// empty-string sentinel is only honoured for `due` and `position`,
/// and is a validation error on the other two.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Patch<String>,
    pub due: Patch<Timestamp>,
    pub position: Patch<i32>,
    pub completed: Patch<bool>,
}

impl ProjectPatch {
    /// True when no field was supplied at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_unset()
            && self.due.is_unset()
            && self.position.is_unset()
            && self.completed.is_unset()
    }
}

/// Validated values for creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub title: String,
    pub due: Option<Timestamp>,
    pub position: Option<i32>,
    pub completed: Option<bool>,
}

/// Check that the fields required at creation are supplied.
///
/// Only `title` is required; an absent, `null`, or empty-string title
/// fails. Everything else about the value is left to
/// [`validate_fields`].
pub fn validate_required(input: &ProjectInput) -> Vec<FieldError> {
    let missing = match present(&input.title) {
        None => true,
        Some(value) => value.as_str().is_some_and(str::is_empty),
    };

    if missing {
        vec![FieldError {
            field: "title",
            error: "title is required".to_string(),
        }]
    } else {
        Vec::new()
    }
}

/// Validate every supplied field and build the typed patch.
///
/// Absent fields are skipped — they are not errors here. Violations
/// are collected in field order (`title`, `due`, `position`,
/// `completed`) and returned together.
pub fn validate_fields(input: &ProjectInput) -> Result<ProjectPatch, Vec<FieldError>> {
    let mut errors = Vec::new();
    let mut patch = ProjectPatch::default();

    if let Some(value) = present(&input.title) {
        match value.as_str() {
            Some(s) if !s.is_empty() && s.chars().count() <= TITLE_MAX_LEN => {
                patch.title = Patch::Set(s.to_string());
            }
            _ => errors.push(FieldError {
                field: "title",
                error: format!(
                    "title must be a non-empty string of at most {TITLE_MAX_LEN} characters"
                ),
            }),
        }
    }

    if let Some(value) = present(&input.due) {
        match value.as_str() {
            Some("") => patch.due = Patch::Clear,
            Some(s) => match parse_iso8601(s) {
                Some(ts) => patch.due = Patch::Set(ts),
                None => errors.push(due_error()),
            },
            None => errors.push(due_error()),
        }
    }

    if let Some(value) = present(&input.position) {
        if value.as_str() == Some("") {
            patch.position = Patch::Clear;
        } else {
            match parse_position(value) {
                Some(p) => patch.position = Patch::Set(p),
                None => errors.push(FieldError {
                    field: "position",
                    error: "position must be an integer greater than or equal to 0".to_string(),
                }),
            }
        }
    }

    if let Some(value) = present(&input.completed) {
        match parse_completed(value) {
            Some(b) => patch.completed = Patch::Set(b),
            None => errors.push(FieldError {
                field: "completed",
                error: "completed must be a boolean".to_string(),
            }),
        }
    }

    if errors.is_empty() {
        Ok(patch)
    } else {
        Err(errors)
    }
}

/// Run the full creation check: required fields first, then per-field
/// validation, mirroring the two-stage behaviour of the HTTP contract
/// (missing-field errors are reported on their own).
pub fn validate_new(input: &ProjectInput) -> Result<NewProject, Vec<FieldError>> {
    let required = validate_required(input);
    if !required.is_empty() {
        return Err(required);
    }

    let patch = validate_fields(input)?;

    let title = match patch.title {
        Patch::Set(title) => title,
        // Unreachable after the checks above, but a missing-title error
        // beats a panic if the invariant ever breaks.
        _ => {
            return Err(vec![FieldError {
                field: "title",
                error: "title is required".to_string(),
            }])
        }
    };

    Ok(NewProject {
        title,
        due: patch.due.into_option(),
        position: patch.position.into_option(),
        completed: patch.completed.into_option(),
    })
}

/// A supplied value; `None` for absent fields and JSON `null`.
fn present(value: &Option<Value>) -> Option<&Value> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(v),
    }
}

fn due_error() -> FieldError {
    FieldError {
        field: "due",
        error: "due must be a valid ISO 8601 date".to_string(),
    }
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS[.fff]`, or a bare
/// `YYYY-MM-DD`; naive forms are taken as UTC.
fn parse_iso8601(s: &str) -> Option<Timestamp> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}

/// A JSON integer, or a string holding one, with value >= 0.
fn parse_position(value: &Value) -> Option<i32> {
    let n = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.parse::<i64>().ok()?,
        _ => return None,
    };
    i32::try_from(n).ok().filter(|p| *p >= 0)
}

/// A JSON boolean, or the strings `"true"` / `"false"`.
fn parse_completed(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn input(body: Value) -> ProjectInput {
        serde_json::from_value(body).expect("test body should deserialize")
    }

    #[test]
    fn required_title_missing_null_or_empty() {
        for body in [json!({}), json!({ "title": null }), json!({ "title": "" })] {
            let errors = validate_required(&input(body));
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "title");
        }
    }

    #[test]
    fn required_title_present() {
        assert!(validate_required(&input(json!({ "title": "Skrifa" }))).is_empty());
    }

    #[test]
    fn title_valid_is_set() {
        let patch = validate_fields(&input(json!({ "title": "Skrifa skýrslu" }))).unwrap();
        assert_eq!(patch.title, Patch::Set("Skrifa skýrslu".to_string()));
    }

    #[test]
    fn title_too_long_or_wrong_type_is_invalid() {
        let long = "x".repeat(TITLE_MAX_LEN + 1);
        for body in [json!({ "title": long }), json!({ "title": 42 }), json!({ "title": "" })] {
            let errors = validate_fields(&input(body)).unwrap_err();
            assert_eq!(errors[0].field, "title");
        }
    }

    #[test]
    fn title_at_max_length_is_valid() {
        let max = "x".repeat(TITLE_MAX_LEN);
        let patch = validate_fields(&input(json!({ "title": max }))).unwrap();
        assert_matches!(patch.title, Patch::Set(_));
    }

    #[test]
    fn due_empty_string_is_clear_not_error() {
        let patch = validate_fields(&input(json!({ "due": "" }))).unwrap();
        assert!(patch.due.is_clear());
    }

    #[test]
    fn due_accepts_iso8601_variants() {
        for s in ["2024-01-01T00:00:00Z", "2024-01-01T12:30:00", "2024-01-01"] {
            let patch = validate_fields(&input(json!({ "due": s }))).unwrap();
            assert_matches!(patch.due, Patch::Set(_), "should accept {s}");
        }
    }

    #[test]
    fn due_rejects_garbage_and_non_strings() {
        for body in [json!({ "due": "síðar" }), json!({ "due": 20240101 })] {
            let errors = validate_fields(&input(body)).unwrap_err();
            assert_eq!(errors[0].field, "due");
        }
    }

    #[test]
    fn position_empty_string_is_clear() {
        let patch = validate_fields(&input(json!({ "position": "" }))).unwrap();
        assert!(patch.position.is_clear());
    }

    #[test]
    fn position_accepts_integer_and_numeric_string() {
        for body in [json!({ "position": 3 }), json!({ "position": "3" })] {
            let patch = validate_fields(&input(body)).unwrap();
            assert_eq!(patch.position, Patch::Set(3));
        }
    }

    #[test]
    fn position_rejects_negative_fractional_and_non_numeric() {
        for body in [
            json!({ "position": -1 }),
            json!({ "position": "-1" }),
            json!({ "position": 1.5 }),
            json!({ "position": "fremst" }),
            json!({ "position": true }),
        ] {
            let errors = validate_fields(&input(body)).unwrap_err();
            assert_eq!(errors[0].field, "position");
        }
    }

    #[test]
    fn completed_accepts_bool_and_bool_strings() {
        let patch = validate_fields(&input(json!({ "completed": true }))).unwrap();
        assert_eq!(patch.completed, Patch::Set(true));
        let patch = validate_fields(&input(json!({ "completed": "false" }))).unwrap();
        assert_eq!(patch.completed, Patch::Set(false));
    }

    #[test]
    fn completed_rejects_everything_else() {
        for body in [json!({ "completed": "já" }), json!({ "completed": 1 })] {
            let errors = validate_fields(&input(body)).unwrap_err();
            assert_eq!(errors[0].field, "completed");
        }
    }

    #[test]
    fn null_fields_are_skipped() {
        let patch = validate_fields(&input(json!({
            "title": null, "due": null, "position": null, "completed": null
        })))
        .unwrap();
        assert!(patch.is_empty());
    }

    #[test]
    fn violations_are_collected_in_field_order() {
        let errors = validate_fields(&input(json!({
            "title": 1, "due": "x", "position": "x", "completed": "x"
        })))
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["title", "due", "position", "completed"]);
    }

    #[test]
    fn validate_new_reports_missing_title_alone() {
        let errors = validate_new(&input(json!({ "due": "ógild" }))).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn validate_new_builds_creation_values() {
        let new = validate_new(&input(json!({
            "title": "Skrifa spec",
            "due": "2024-01-01T00:00:00Z",
            "position": "1"
        })))
        .unwrap();
        assert_eq!(new.title, "Skrifa spec");
        assert!(new.due.is_some());
        assert_eq!(new.position, Some(1));
        assert_eq!(new.completed, None);
    }

    #[test]
    fn clear_at_creation_is_stored_absent() {
        let new = validate_new(&input(json!({ "title": "Verk", "due": "" }))).unwrap();
        assert_eq!(new.due, None);
    }
}
