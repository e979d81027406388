//! Framework-agnostic request adapter.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::Value;

use crate::request::{RequestParts, UploadedFile};

/// Owned, framework-agnostic implementation of [`RequestParts`].
///
/// `RequestAdapter` is the primary integration point between transports and
/// the gate. Framework-specific code maps its own request type onto an
/// adapter (query and path parameters, parsed body fields, and uploads),
/// then hands the adapter to [`ValidationGate::check`](crate::ValidationGate::check).
///
/// # Design Notes
///
/// This type intentionally contains simple, owned data to avoid coupling
/// to any specific framework's request types. Framework-specific code
/// should implement `From<FrameworkRequest>` for `RequestAdapter`, or
/// implement [`RequestParts`] directly on its request type and skip the
/// adapter altogether.
///
/// # Examples
///
/// ```
/// use request_gate::{RequestAdapter, RequestParts, UploadedFile};
///
/// let mut request = RequestAdapter::new();
/// request.add_query_param("search", "rust");
/// request.add_path_param("id", "42");
/// request.add_body_field("age", 30);
/// request.add_file("avatar", UploadedFile::new("/tmp/upload-1"));
///
/// assert_eq!(request.query_param("search"), Some("rust"));
/// assert_eq!(request.path_param("id"), Some("42"));
/// assert_eq!(request.body_field("age").and_then(|v| v.as_i64()), Some(30));
/// assert_eq!(request.file_fields().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    /// Query parameters from the URL.
    query: HashMap<String, String>,
    /// Path parameters from routing.
    params: HashMap<String, String>,
    /// Fields of the parsed body.
    body: HashMap<String, Value>,
    /// Multi-field upload collection, in attachment order.
    files: IndexMap<String, Vec<UploadedFile>>,
    /// Single-file convenience alias.
    single: Option<(String, UploadedFile)>,
}

impl RequestAdapter {
    /// Creates an empty adapter. Use the add/set methods to populate it.
    pub fn new() -> Self {
        Self {
            query: HashMap::new(),
            params: HashMap::new(),
            body: HashMap::new(),
            files: IndexMap::new(),
            single: None,
        }
    }

    /// Adds a query parameter.
    pub fn add_query_param(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.query.insert(field.into(), value.into());
    }

    /// Adds a path parameter.
    pub fn add_path_param(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.params.insert(field.into(), value.into());
    }

    /// Adds a parsed body field. Accepts anything convertible to a JSON
    /// value, so plain strings, numbers, and booleans work directly.
    pub fn add_body_field(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.body.insert(field.into(), value.into());
    }

    /// Appends a file to the multi-field upload collection.
    pub fn add_file(&mut self, field: impl Into<String>, file: UploadedFile) {
        self.files.entry(field.into()).or_default().push(file);
    }

    /// Sets the single-file convenience alias, replacing any previous one.
    pub fn set_single_file(&mut self, field: impl Into<String>, file: UploadedFile) {
        self.single = Some((field.into(), file));
    }
}

impl Default for RequestAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestParts for RequestAdapter {
    fn query_param(&self, field: &str) -> Option<&str> {
        self.query.get(field).map(String::as_str)
    }

    fn path_param(&self, field: &str) -> Option<&str> {
        self.params.get(field).map(String::as_str)
    }

    fn body_field(&self, field: &str) -> Option<&Value> {
        self.body.get(field)
    }

    fn file_fields(&self) -> Vec<(&str, &[UploadedFile])> {
        self.files
            .iter()
            .map(|(field, files)| (field.as_str(), files.as_slice()))
            .collect()
    }

    fn single_file(&self) -> Option<(&str, &UploadedFile)> {
        self.single
            .as_ref()
            .map(|(field, file)| (field.as_str(), file))
    }
}
