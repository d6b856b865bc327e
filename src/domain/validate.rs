use std::collections::BTreeMap;

use serde::Deserialize;

use super::schedule::{parse_date, parse_time};

pub const MAX_COMMENT_LENGTH: usize = 255;

/// Field name -> message, ordered for stable serialization.
pub type FieldErrors = BTreeMap<String, String>;

/// Client-supplied guest fields. `inviter_id` is deliberately absent:
/// the server assigns it from the caller identity, so a spoofed value in
/// the request body is silently dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestPayload {
    pub guest_type_id: Option<i32>,
    pub coming_date: Option<String>,
    pub coming_time: Option<String>,
    pub stay_time: Option<String>,
    pub comment: Option<String>,
}

/// Reference data the validator checks foreign keys against.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub known_guest_type_ids: &'a [i32],
}

/// Validates a guest payload against the schema. Pure: returns the full
/// set of field errors without touching any state. An empty map means the
/// payload is valid.
#[must_use]
pub fn validate_guest(payload: &GuestPayload, ctx: &ValidationContext<'_>) -> FieldErrors {
    let mut errors = FieldErrors::new();

    match payload.guest_type_id {
        None => {
            errors.insert(
                "guest_type_id".to_string(),
                "Missing data for required field.".to_string(),
            );
        }
        Some(id) if !ctx.known_guest_type_ids.contains(&id) => {
            errors.insert(
                "guest_type_id".to_string(),
                format!("Unknown guest type: {id}."),
            );
        }
        Some(_) => {}
    }

    check_date_field(&mut errors, "coming_date", payload.coming_date.as_deref());
    check_time_field(&mut errors, "coming_time", payload.coming_time.as_deref());
    check_time_field(&mut errors, "stay_time", payload.stay_time.as_deref());

    if let Some(comment) = &payload.comment
        && comment.chars().count() > MAX_COMMENT_LENGTH
    {
        errors.insert(
            "comment".to_string(),
            format!("Longer than maximum length {MAX_COMMENT_LENGTH}."),
        );
    }

    errors
}

fn check_date_field(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    match value {
        None => {
            errors.insert(
                field.to_string(),
                "Missing data for required field.".to_string(),
            );
        }
        Some(v) if parse_date(v).is_none() => {
            errors.insert(
                field.to_string(),
                "Not a valid date, expected YYYY-MM-DD.".to_string(),
            );
        }
        Some(_) => {}
    }
}

fn check_time_field(errors: &mut FieldErrors, field: &str, value: Option<&str>) {
    match value {
        None => {
            errors.insert(
                field.to_string(),
                "Missing data for required field.".to_string(),
            );
        }
        Some(v) if parse_time(v).is_none() => {
            errors.insert(
                field.to_string(),
                "Not a valid time, expected HH:MM:SS.".to_string(),
            );
        }
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KNOWN_TYPES: &[i32] = &[1, 2, 3];

    fn ctx() -> ValidationContext<'static> {
        ValidationContext {
            known_guest_type_ids: KNOWN_TYPES,
        }
    }

    fn valid_payload() -> GuestPayload {
        GuestPayload {
            guest_type_id: Some(1),
            coming_date: Some("2024-03-10".to_string()),
            coming_time: Some("10:00:00".to_string()),
            stay_time: Some("01:30:00".to_string()),
            comment: Some("plus one".to_string()),
        }
    }

    #[test]
    fn test_valid_payload_has_no_errors() {
        assert!(validate_guest(&valid_payload(), &ctx()).is_empty());
    }

    #[test]
    fn test_missing_comment_is_valid() {
        let mut payload = valid_payload();
        payload.comment = None;
        assert!(validate_guest(&payload, &ctx()).is_empty());
    }

    #[test]
    fn test_missing_required_fields() {
        let payload = GuestPayload {
            guest_type_id: None,
            coming_date: None,
            coming_time: None,
            stay_time: None,
            comment: None,
        };
        let errors = validate_guest(&payload, &ctx());
        assert_eq!(errors.len(), 4);
        assert!(errors.contains_key("guest_type_id"));
        assert!(errors.contains_key("coming_date"));
        assert!(errors.contains_key("coming_time"));
        assert!(errors.contains_key("stay_time"));
    }

    #[test]
    fn test_unknown_guest_type() {
        let mut payload = valid_payload();
        payload.guest_type_id = Some(99);
        let errors = validate_guest(&payload, &ctx());
        assert_eq!(errors.len(), 1);
        assert!(errors["guest_type_id"].contains("99"));
    }

    #[test]
    fn test_malformed_date_and_time() {
        let mut payload = valid_payload();
        payload.coming_date = Some("10.03.2024".to_string());
        payload.stay_time = Some("90 minutes".to_string());
        let errors = validate_guest(&payload, &ctx());
        assert!(errors.contains_key("coming_date"));
        assert!(errors.contains_key("stay_time"));
        assert!(!errors.contains_key("coming_time"));
    }

    #[test]
    fn test_comment_length_limit() {
        let mut payload = valid_payload();
        payload.comment = Some("x".repeat(256));
        let errors = validate_guest(&payload, &ctx());
        assert!(errors.contains_key("comment"));

        payload.comment = Some("x".repeat(255));
        assert!(validate_guest(&payload, &ctx()).is_empty());
    }
}
