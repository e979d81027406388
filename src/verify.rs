//! Per-location verification passes.
//!
//! One call to [`verify_location`] checks a single request location
//! against its sub-schema. Verification runs in two passes: a required
//! pass that reports absent fields, then a validator pass that runs
//! custom checks. When both passes flag the same field, the required
//! message wins while the entry keeps the validator pass position.

use serde_json::Value;

use crate::location::Location;
use crate::report::ErrorMap;
use crate::request::{merged_files, RequestParts};
use crate::schema::SubSchema;

/// Verifies one location of `request` against `sub_schema`.
///
/// Returns the error map for the location, or `None` when there is
/// nothing to report: either the location has no sub-schema, or every
/// check passed. Callers cannot tell the two apart, and formatters are
/// expected to treat them uniformly.
pub(crate) fn verify_location<R: RequestParts>(
    sub_schema: Option<&SubSchema<R>>,
    location: Location,
    request: &R,
) -> Option<ErrorMap> {
    let sub_schema = sub_schema?;

    // Presence for files is defined over the merged view of the upload
    // collection and the single-file alias.
    let file_fields: Vec<&str> = match location {
        Location::Files => merged_files(request)
            .into_iter()
            .map(|(field, _)| field)
            .collect(),
        _ => Vec::new(),
    };

    // 1. Required pass.
    let mut required_errors = ErrorMap::new();
    for (field, rule) in sub_schema.iter() {
        if !rule.is_required() {
            continue;
        }
        let present = match location {
            Location::Query => text_present(request.query_param(field)),
            Location::Params => text_present(request.path_param(field)),
            Location::Body => request.body_field(field).is_some_and(value_truthy),
            Location::Files => file_fields.contains(&field),
        };
        if !present {
            required_errors.insert(field.to_string(), rule.required_message(field));
        }
    }

    // 2. Validator pass. Validators run whether or not the field is
    //    present, since they see the whole request.
    let mut errors = ErrorMap::new();
    for (field, rule) in sub_schema.iter() {
        if let Some(message) = rule.run_validator(request) {
            errors.insert(field.to_string(), message);
        }
    }

    // 3. Merge. Inserting into an occupied slot keeps its position, so
    //    required messages override validator messages in place while
    //    required-only fields append after the validator entries.
    for (field, message) in required_errors {
        errors.insert(field, message);
    }

    tracing::trace!(location = %location, errors = errors.len(), "location verified");
    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

/// A query or path parameter counts missing when absent or empty.
fn text_present(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// A body field counts missing when its value is null, an empty string,
/// zero, or `false`. Arrays and objects always count present, even when
/// empty.
fn value_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::UploadedFile;
    use crate::schema::FieldRule;
    use crate::RequestAdapter;
    use serde_json::json;

    fn verify(
        sub_schema: Option<&SubSchema>,
        location: Location,
        request: &RequestAdapter,
    ) -> Option<ErrorMap> {
        verify_location(sub_schema, location, request)
    }

    #[test]
    fn absent_sub_schema_skips_the_location() {
        let request = RequestAdapter::new();
        assert_eq!(verify(None, Location::Query, &request), None);
    }

    #[test]
    fn empty_sub_schema_has_nothing_to_report() {
        let sub: SubSchema = SubSchema::new();
        let request = RequestAdapter::new();

        assert_eq!(verify(Some(&sub), Location::Body, &request), None);
    }

    #[test]
    fn missing_required_query_field_gets_default_message() {
        let sub: SubSchema = SubSchema::new().field("name", FieldRule::required());
        let request = RequestAdapter::new();

        let errors = verify(Some(&sub), Location::Query, &request).expect("verified");
        assert_eq!(errors.get("name"), Some(&"name is required".to_string()));
    }

    #[test]
    fn empty_string_query_param_counts_missing() {
        let sub: SubSchema = SubSchema::new().field("name", FieldRule::required());
        let mut request = RequestAdapter::new();
        request.add_query_param("name", "");

        let errors = verify(Some(&sub), Location::Query, &request).expect("verified");
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn present_path_param_passes() {
        let sub: SubSchema = SubSchema::new().field("id", FieldRule::required());
        let mut request = RequestAdapter::new();
        request.add_path_param("id", "42");

        assert_eq!(verify(Some(&sub), Location::Params, &request), None);
    }

    #[test]
    fn body_presence_follows_value_truthiness() {
        let missing = [
            json!(null),
            json!(""),
            json!(0),
            json!(0.0),
            json!(false),
        ];
        let present = [json!("0"), json!(1), json!(true), json!([]), json!({})];

        let sub: SubSchema = SubSchema::new().field("field", FieldRule::required());
        for value in missing {
            let mut request = RequestAdapter::new();
            request.add_body_field("field", value.clone());
            let errors = verify(Some(&sub), Location::Body, &request).expect("verified");
            assert_eq!(errors.len(), 1, "expected {value} to count missing");
        }
        for value in present {
            let mut request = RequestAdapter::new();
            request.add_body_field("field", value.clone());
            let verdict = verify(Some(&sub), Location::Body, &request);
            assert_eq!(verdict, None, "expected {value} to count present");
        }
    }

    #[test]
    fn required_error_text_overrides_default() {
        let sub: SubSchema = SubSchema::new().field(
            "email",
            FieldRule::required().required_error_text("we need your email"),
        );
        let request = RequestAdapter::new();

        let errors = verify(Some(&sub), Location::Body, &request).expect("verified");
        assert_eq!(errors.get("email"), Some(&"we need your email".to_string()));
    }

    #[test]
    fn file_presence_uses_the_merged_view() {
        let sub: SubSchema = SubSchema::new()
            .field("gallery", FieldRule::required())
            .field("avatar", FieldRule::required());

        let mut request = RequestAdapter::new();
        request.add_file("gallery", UploadedFile::new("/tmp/g1"));
        request.set_single_file("avatar", UploadedFile::new("/tmp/a1"));

        assert_eq!(verify(Some(&sub), Location::Files, &request), None);
    }

    #[test]
    fn absent_file_field_is_reported() {
        let sub: SubSchema = SubSchema::new().field("avatar", FieldRule::required());
        let request = RequestAdapter::new();

        let errors = verify(Some(&sub), Location::Files, &request).expect("verified");
        assert_eq!(errors.get("avatar"), Some(&"avatar is required".to_string()));
    }

    #[test]
    fn registered_field_with_no_files_counts_present() {
        struct EmptyGallery;

        impl RequestParts for EmptyGallery {
            fn query_param(&self, _field: &str) -> Option<&str> {
                None
            }
            fn path_param(&self, _field: &str) -> Option<&str> {
                None
            }
            fn body_field(&self, _field: &str) -> Option<&Value> {
                None
            }
            fn file_fields(&self) -> Vec<(&str, &[UploadedFile])> {
                vec![("gallery", &[])]
            }
            fn single_file(&self) -> Option<(&str, &UploadedFile)> {
                None
            }
        }

        let sub: SubSchema<EmptyGallery> =
            SubSchema::new().field("gallery", FieldRule::required());
        let verdict = verify_location(Some(&sub), Location::Files, &EmptyGallery);
        assert_eq!(verdict, None);
    }

    #[test]
    fn validator_failure_is_reported() {
        let sub: SubSchema = SubSchema::new().field(
            "age",
            FieldRule::optional().validator(|request: &RequestAdapter| {
                match request.body_field("age").and_then(|v| v.as_i64()) {
                    Some(n) if n >= 18 => None,
                    _ => Some("age must be a number of at least 18".to_string()),
                }
            }),
        );

        let mut request = RequestAdapter::new();
        request.add_body_field("age", "asd");

        let errors = verify(Some(&sub), Location::Body, &request).expect("verified");
        assert_eq!(
            errors.get("age"),
            Some(&"age must be a number of at least 18".to_string())
        );
    }

    #[test]
    fn required_message_wins_but_keeps_validator_position() {
        let sub: SubSchema = SubSchema::new()
            .field(
                "name",
                FieldRule::required()
                    .validator(|_: &RequestAdapter| Some("name looks odd".to_string())),
            )
            .field(
                "email",
                FieldRule::optional()
                    .validator(|_: &RequestAdapter| Some("email looks odd".to_string())),
            );

        let request = RequestAdapter::new();
        let errors = verify(Some(&sub), Location::Body, &request).expect("verified");

        let entries: Vec<(&str, &str)> = errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
            .collect();
        assert_eq!(
            entries,
            vec![("name", "name is required"), ("email", "email looks odd")]
        );
    }

    #[test]
    fn required_only_entries_follow_validator_entries() {
        let sub: SubSchema = SubSchema::new()
            .field("first", FieldRule::required())
            .field(
                "second",
                FieldRule::optional()
                    .validator(|_: &RequestAdapter| Some("second rejected".to_string())),
            );

        let request = RequestAdapter::new();
        let errors = verify(Some(&sub), Location::Body, &request).expect("verified");

        let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
        assert_eq!(fields, vec!["second", "first"]);
    }
}
