//! Declarative validation schemas.
//!
//! A [`Schema`] describes, per request location, which fields must be
//! present and which custom checks apply. Schemas are plain data built
//! through chained setters and are evaluated by
//! [`ValidationGate::check`](crate::ValidationGate::check).

use indexmap::IndexMap;

use crate::adapter::RequestAdapter;
use crate::location::Location;

/// Boxed custom validator.
///
/// A validator receives the whole request so it can correlate fields
/// across locations. It returns `Some(message)` when the check fails and
/// `None` when it passes. An empty message also counts as passing.
pub type ValidatorFn<R = RequestAdapter> = Box<dyn Fn(&R) -> Option<String> + Send + Sync>;

/// Validation rule for a single field.
///
/// A rule can require the field to be present, attach a custom validator,
/// or both. Rules are built through chained setters:
///
/// ```
/// use request_gate::{FieldRule, RequestAdapter, RequestParts};
///
/// let _name: FieldRule = FieldRule::required();
///
/// let _age: FieldRule = FieldRule::required()
///     .required_error_text("age is mandatory")
///     .validator(|request: &RequestAdapter| {
///         match request.body_field("age").and_then(|v| v.as_i64()) {
///             Some(n) if n >= 18 => None,
///             _ => Some("age must be a number of at least 18".to_string()),
///         }
///     });
/// ```
pub struct FieldRule<R = RequestAdapter> {
    required: bool,
    validator: Option<ValidatorFn<R>>,
    required_error_text: Option<String>,
}

impl<R> FieldRule<R> {
    /// Creates a rule for a field that must be present.
    pub fn required() -> Self {
        Self {
            required: true,
            validator: None,
            required_error_text: None,
        }
    }

    /// Creates a rule for a field that may be absent. Useful as a base
    /// for validator-only rules.
    pub fn optional() -> Self {
        Self {
            required: false,
            validator: None,
            required_error_text: None,
        }
    }

    /// Attaches a custom validator to this rule.
    pub fn validator(
        mut self,
        validator: impl Fn(&R) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Overrides the default "`<field>` is required" message for this rule.
    pub fn required_error_text(mut self, text: impl Into<String>) -> Self {
        self.required_error_text = Some(text.into());
        self
    }

    /// Whether this rule requires the field to be present.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Runs the custom validator, if any, and returns the failure message.
    ///
    /// Returns `None` when there is no validator, when the validator
    /// passes, or when it reports an empty message.
    pub(crate) fn run_validator(&self, request: &R) -> Option<String> {
        let validator = self.validator.as_ref()?;
        validator(request).filter(|message| !message.is_empty())
    }

    /// Resolves the missing-field message for `field`.
    pub(crate) fn required_message(&self, field: &str) -> String {
        match &self.required_error_text {
            Some(text) => text.clone(),
            None => format!("{field} is required"),
        }
    }
}

/// Ordered set of field rules for one request location.
///
/// Field order is preserved: error maps report fields in the order they
/// were declared here.
pub struct SubSchema<R = RequestAdapter> {
    rules: IndexMap<String, FieldRule<R>>,
}

impl<R> SubSchema<R> {
    /// Creates an empty sub-schema.
    pub fn new() -> Self {
        Self {
            rules: IndexMap::new(),
        }
    }

    /// Adds a rule for `field`, replacing any earlier rule for the same
    /// field.
    pub fn field(mut self, field: impl Into<String>, rule: FieldRule<R>) -> Self {
        self.rules.insert(field.into(), rule);
        self
    }

    /// Whether this sub-schema declares no fields.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Iterates rules in declaration order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &FieldRule<R>)> {
        self.rules.iter().map(|(field, rule)| (field.as_str(), rule))
    }
}

impl<R> Default for SubSchema<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Validation schema for a whole request.
///
/// Each location gets its own optional [`SubSchema`]. A location without
/// a sub-schema is not verified at all, which is different from a
/// location whose sub-schema declares no fields.
///
/// # Examples
///
/// ```
/// use request_gate::{FieldRule, Schema, SubSchema};
///
/// let schema: Schema = Schema::new()
///     .params(SubSchema::new().field("id", FieldRule::required()))
///     .body(
///         SubSchema::new()
///             .field("name", FieldRule::required())
///             .field("email", FieldRule::required()),
///     );
///
/// assert!(!schema.is_empty());
/// ```
pub struct Schema<R = RequestAdapter> {
    query: Option<SubSchema<R>>,
    body: Option<SubSchema<R>>,
    params: Option<SubSchema<R>>,
    files: Option<SubSchema<R>>,
}

impl<R> Schema<R> {
    /// Creates a schema that verifies nothing.
    pub fn new() -> Self {
        Self {
            query: None,
            body: None,
            params: None,
            files: None,
        }
    }

    /// Sets the sub-schema for query parameters.
    pub fn query(mut self, sub_schema: SubSchema<R>) -> Self {
        self.query = Some(sub_schema);
        self
    }

    /// Sets the sub-schema for body fields.
    pub fn body(mut self, sub_schema: SubSchema<R>) -> Self {
        self.body = Some(sub_schema);
        self
    }

    /// Sets the sub-schema for path parameters.
    pub fn params(mut self, sub_schema: SubSchema<R>) -> Self {
        self.params = Some(sub_schema);
        self
    }

    /// Sets the sub-schema for uploaded files.
    pub fn files(mut self, sub_schema: SubSchema<R>) -> Self {
        self.files = Some(sub_schema);
        self
    }

    /// Returns the sub-schema for `location`, if one was set.
    pub fn sub_schema(&self, location: Location) -> Option<&SubSchema<R>> {
        match location {
            Location::Query => self.query.as_ref(),
            Location::Body => self.body.as_ref(),
            Location::Params => self.params.as_ref(),
            Location::Files => self.files.as_ref(),
        }
    }

    /// Whether no location has a sub-schema.
    pub fn is_empty(&self) -> bool {
        self.query.is_none() && self.body.is_none() && self.params.is_none() && self.files.is_none()
    }
}

impl<R> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}
