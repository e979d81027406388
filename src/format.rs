//! Rejection payload formatting.

use serde_json::{json, Map, Value};

use crate::report::FieldReport;

/// Error text wrapped around failures by [`DefaultFormatter`].
pub const DEFAULT_ERROR_TEXT: &str = "Validation for the following fields are failed";

/// Builds the JSON body sent when a request is rejected.
///
/// Formatters receive the full [`FieldReport`], including skipped and
/// passing locations, and decide what the client sees. Any closure of
/// type `Fn(&FieldReport) -> Value` is a formatter:
///
/// ```
/// use request_gate::{ErrorFormatter, FieldReport};
/// use serde_json::json;
///
/// let formatter = |report: &FieldReport| {
///     json!({ "invalid": serde_json::to_value(report).expect("serializable") })
/// };
/// let body = formatter.format(&FieldReport::default());
/// assert!(body["invalid"].is_object());
/// ```
pub trait ErrorFormatter {
    /// Formats `report` into the response body.
    fn format(&self, report: &FieldReport) -> Value;
}

impl<F> ErrorFormatter for F
where
    F: Fn(&FieldReport) -> Value,
{
    fn format(&self, report: &FieldReport) -> Value {
        self(report)
    }
}

/// Default formatter.
///
/// Drops skipped and passing locations and keys the rest by location
/// name under `fields`, in payload order:
///
/// ```json
/// {
///   "error": "Validation for the following fields are failed",
///   "fields": {
///     "body": { "name": "name is required" }
///   }
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFormatter;

impl ErrorFormatter for DefaultFormatter {
    fn format(&self, report: &FieldReport) -> Value {
        let mut fields = Map::new();
        for (location, errors) in report.iter() {
            let Some(errors) = errors else { continue };
            if errors.is_empty() {
                continue;
            }
            let map: Map<String, Value> = errors
                .iter()
                .map(|(field, message)| (field.clone(), Value::String(message.clone())))
                .collect();
            fields.insert(location.as_str().to_string(), Value::Object(map));
        }
        json!({
            "error": DEFAULT_ERROR_TEXT,
            "fields": fields,
        })
    }
}
