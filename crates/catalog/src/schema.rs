//! Product-creation schema.
//!
//! Checks an untyped JSON payload against the shape of a [`PackDraft`] and
//! reports every violation at once. A payload either converts completely or is
//! rejected; nothing partial ever reaches the store.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::pack::PackDraft;

/// Machine-readable reason for a rejected field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    Required,
    InvalidType,
    TooSmall,
    TooBig,
    UnrecognizedKey,
    InvalidPayload,
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// JSON key the issue refers to; empty for the payload as a whole.
    pub field: String,
    pub code: IssueCode,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }

    /// Issue for a body that could not be read as a JSON object at all.
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::new("", IssueCode::InvalidPayload, message)
    }
}

/// All issues found in one payload. Never empty when returned as an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("{}", render(.0))]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn single(issue: ValidationIssue) -> Self {
        Self(vec![issue])
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    /// Fields with at least one issue, in report order.
    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|i| i.field.as_str()).collect()
    }
}

fn render(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("{}: {}", i.field, i.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Validate a create/update payload.
pub fn validate_draft(payload: &Value) -> Result<PackDraft, ValidationErrors> {
    let Some(obj) = payload.as_object() else {
        return Err(ValidationErrors::single(ValidationIssue::new(
            "",
            IssueCode::InvalidType,
            format!("expected object, received {}", type_name(payload)),
        )));
    };

    let mut issues = Vec::new();

    if obj.contains_key("id") {
        issues.push(ValidationIssue::new(
            "id",
            IssueCode::UnrecognizedKey,
            "id is assigned by the server and must not be sent",
        ));
    }

    let title = non_empty_string(obj, "title", &mut issues);
    let description = non_empty_string(obj, "description", &mut issues);
    let price = integer(obj, "price", &mut issues).and_then(|price| {
        if price < 0 {
            issues.push(ValidationIssue::new(
                "price",
                IssueCode::TooSmall,
                "price must be greater than or equal to 0",
            ));
            None
        } else {
            Some(price.unsigned_abs())
        }
    });
    let image_url = string(obj, "imageUrl", &mut issues);
    let demo_url = string(obj, "demoUrl", &mut issues);
    let featured = integer(obj, "featured", &mut issues);

    match (title, description, price, image_url, demo_url, featured) {
        (Some(title), Some(description), Some(price), Some(image_url), Some(demo_url), Some(featured))
            if issues.is_empty() =>
        {
            Ok(PackDraft {
                title,
                description,
                price,
                image_url,
                demo_url,
                featured,
            })
        }
        _ => Err(ValidationErrors(issues)),
    }
}

fn required<'a>(obj: &'a Map<String, Value>, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<&'a Value> {
    match obj.get(field) {
        None | Some(Value::Null) => {
            issues.push(ValidationIssue::new(field, IssueCode::Required, "Required"));
            None
        }
        Some(v) => Some(v),
    }
}

fn string(obj: &Map<String, Value>, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
    match required(obj, field, issues)? {
        Value::String(s) => Some(s.clone()),
        other => {
            issues.push(ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                format!("expected string, received {}", type_name(other)),
            ));
            None
        }
    }
}

fn non_empty_string(obj: &Map<String, Value>, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<String> {
    let s = string(obj, field, issues)?;
    if s.is_empty() {
        issues.push(ValidationIssue::new(
            field,
            IssueCode::TooSmall,
            format!("{field} must not be empty"),
        ));
        return None;
    }
    Some(s)
}

/// Whole numbers are accepted in any JSON spelling (`100`, `100.0`, `1e2`).
fn integer(obj: &Map<String, Value>, field: &str, issues: &mut Vec<ValidationIssue>) -> Option<i64> {
    let value = required(obj, field, issues)?;
    let Value::Number(n) = value else {
        issues.push(ValidationIssue::new(
            field,
            IssueCode::InvalidType,
            format!("expected integer, received {}", type_name(value)),
        ));
        return None;
    };

    if let Some(n) = n.as_i64() {
        return Some(n);
    }
    if n.is_u64() {
        issues.push(out_of_range(field));
        return None;
    }

    match n.as_f64() {
        Some(f) if f.fract() == 0.0 => {
            // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
            if f >= i64::MIN as f64 && f < i64::MAX as f64 {
                Some(f as i64)
            } else {
                issues.push(out_of_range(field));
                None
            }
        }
        _ => {
            issues.push(ValidationIssue::new(
                field,
                IssueCode::InvalidType,
                "expected integer, received non-integer number",
            ));
            None
        }
    }
}

fn out_of_range(field: &str) -> ValidationIssue {
    ValidationIssue::new(field, IssueCode::TooBig, "integer out of range")
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "title": "A",
            "description": "B",
            "price": 100,
            "imageUrl": "u1",
            "demoUrl": "u2",
            "featured": 1,
        })
    }

    #[test]
    fn accepts_a_complete_payload() {
        let draft = validate_draft(&valid()).unwrap();
        assert_eq!(
            draft,
            PackDraft {
                title: "A".to_string(),
                description: "B".to_string(),
                price: 100,
                image_url: "u1".to_string(),
                demo_url: "u2".to_string(),
                featured: 1,
            }
        );
    }

    #[test]
    fn ignores_unknown_keys() {
        let mut body = valid();
        body["genre"] = json!("synthwave");
        assert!(validate_draft(&body).is_ok());
    }

    #[test]
    fn featured_is_not_restricted_to_zero_or_one() {
        let mut body = valid();
        body["featured"] = json!(7);
        assert_eq!(validate_draft(&body).unwrap().featured, 7);
    }

    #[test]
    fn missing_title_is_required() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("title");
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].field, "title");
        assert_eq!(err.issues()[0].code, IssueCode::Required);
    }

    #[test]
    fn null_counts_as_missing() {
        let mut body = valid();
        body["demoUrl"] = Value::Null;
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::Required);
    }

    #[test]
    fn empty_title_and_description_are_rejected() {
        let mut body = valid();
        body["title"] = json!("");
        body["description"] = json!("");
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["title", "description"]);
        assert!(err.issues().iter().all(|i| i.code == IssueCode::TooSmall));
    }

    #[test]
    fn reports_every_violation_not_just_the_first() {
        let body = json!({
            "id": 5,
            "title": 3,
            "price": "cheap",
            "imageUrl": false,
            "featured": 0.5,
        });
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(
            err.fields(),
            vec!["id", "title", "description", "price", "imageUrl", "demoUrl", "featured"]
        );
    }

    #[test]
    fn rejects_fractional_and_negative_prices() {
        let mut body = valid();
        body["price"] = json!(9.99);
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::InvalidType);

        body["price"] = json!(-1);
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.issues()[0].code, IssueCode::TooSmall);
    }

    #[test]
    fn accepts_whole_number_floats() {
        let mut body = valid();
        body["price"] = json!(100.0);
        body["featured"] = json!(1.0);
        let draft = validate_draft(&body).unwrap();
        assert_eq!(draft.price, 100);
        assert_eq!(draft.featured, 1);

        body["price"] = json!(-0.0);
        assert_eq!(validate_draft(&body).unwrap().price, 0);
    }

    #[test]
    fn integers_beyond_i64_are_out_of_range() {
        let mut body = valid();
        body["price"] = json!(u64::MAX);
        body["featured"] = json!(1e19);
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["price", "featured"]);
        for issue in err.issues() {
            assert_eq!(issue.code, IssueCode::TooBig);
            assert_eq!(issue.message, "integer out of range");
        }
    }

    #[test]
    fn display_joins_every_issue() {
        let body = json!({ "description": "B", "price": 1, "imageUrl": "i", "demoUrl": "d" });
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.to_string(), "title: Required; featured: Required");
    }

    #[test]
    fn rejects_client_supplied_id() {
        let mut body = valid();
        body["id"] = json!(1);
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(err.fields(), vec!["id"]);
        assert_eq!(err.issues()[0].code, IssueCode::UnrecognizedKey);
    }

    #[test]
    fn rejects_non_object_payloads() {
        for body in [json!([]), json!("x"), json!(1), Value::Null] {
            let err = validate_draft(&body).unwrap_err();
            assert_eq!(err.issues().len(), 1);
            assert_eq!(err.issues()[0].field, "");
        }
    }

    #[test]
    fn errors_serialize_as_an_array_of_issues() {
        let mut body = valid();
        body.as_object_mut().unwrap().remove("price");
        let err = validate_draft(&body).unwrap_err();
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!([{ "field": "price", "code": "required", "message": "Required" }])
        );
    }
}
