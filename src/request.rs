//! Request boundary contract.
//!
//! This module defines the capability a request object must expose for the
//! gate to validate it: four independently-readable field mappings plus the
//! two upload containers. It deliberately contains no framework-specific
//! code; framework integrations implement [`RequestParts`] for their own
//! request types (or populate a [`RequestAdapter`](crate::RequestAdapter)).
//!
//! # Design Notes
//!
//! The trait exposes the raw upload containers (`file_fields` and
//! `single_file`) instead of a pre-merged view. Merging the two is the
//! gate's job, so every implementation gets identical merge behavior
//! instead of re-deriving it.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Read access to the four validatable areas of a request.
///
/// Implementations only need to answer point lookups; the gate never
/// enumerates query, body, or path fields, it asks for exactly the names
/// the schema declares. Uploads are the exception: cleanup has to walk
/// every attached file, so both upload containers are exposed whole.
///
/// # Examples
///
/// ```
/// use request_gate::{RequestParts, UploadedFile};
/// use serde_json::Value;
///
/// struct MyRequest {
///     token: Option<String>,
/// }
///
/// impl RequestParts for MyRequest {
///     fn query_param(&self, field: &str) -> Option<&str> {
///         (field == "token").then(|| self.token.as_deref()).flatten()
///     }
///
///     fn path_param(&self, _field: &str) -> Option<&str> {
///         None
///     }
///
///     fn body_field(&self, _field: &str) -> Option<&Value> {
///         None
///     }
///
///     fn file_fields(&self) -> Vec<(&str, &[UploadedFile])> {
///         Vec::new()
///     }
///
///     fn single_file(&self) -> Option<(&str, &UploadedFile)> {
///         None
///     }
/// }
///
/// let request = MyRequest { token: Some("abc".to_string()) };
/// assert_eq!(request.query_param("token"), Some("abc"));
/// assert_eq!(request.query_param("other"), None);
/// ```
pub trait RequestParts {
    /// Returns the query parameter with the given name, if present.
    fn query_param(&self, field: &str) -> Option<&str>;

    /// Returns the path parameter with the given name, if present.
    fn path_param(&self, field: &str) -> Option<&str>;

    /// Returns the parsed body field with the given name, if present.
    fn body_field(&self, field: &str) -> Option<&Value>;

    /// Returns the multi-field upload collection: every upload field name
    /// paired with its list of files, in the order the transport attached
    /// them. Empty if the request carried no multi-field uploads.
    fn file_fields(&self) -> Vec<(&str, &[UploadedFile])>;

    /// Returns the single-file convenience alias, if the transport set one:
    /// the upload field name and its one file.
    fn single_file(&self) -> Option<(&str, &UploadedFile)>;
}

/// Metadata for one uploaded file: the path of its backing storage artifact.
///
/// The gate only ever reads the path (to check existence and to delete the
/// artifact during cleanup); anything else the transport knows about the
/// upload stays on the transport's own types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    path: PathBuf,
}

impl UploadedFile {
    /// Creates an uploaded-file entry backed by the given storage path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the backing storage artifact.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Merges the two upload containers into one field-keyed view.
///
/// Collection entries come first in their own order; the single-file alias
/// overlays them, winning on field-name collision (the shadowed list drops
/// out of the merged view entirely). Both presence checks and cleanup walk
/// this same view.
pub(crate) fn merged_files<'r, R>(request: &'r R) -> Vec<(&'r str, Vec<&'r UploadedFile>)>
where
    R: RequestParts + ?Sized,
{
    let mut merged: Vec<(&str, Vec<&UploadedFile>)> = request
        .file_fields()
        .into_iter()
        .map(|(field, files)| (field, files.iter().collect()))
        .collect();

    if let Some((field, file)) = request.single_file() {
        match merged.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = vec![file],
            None => merged.push((field, vec![file])),
        }
    }

    merged
}
