use std::fmt;

/// One of the four independent request areas a schema can validate.
///
/// Every incoming request is treated as four separate field mappings:
/// query parameters, the parsed body, path parameters, and uploaded files.
/// Each location is verified on its own; results are only combined at the
/// aggregation step in [`ValidationGate::check`](crate::ValidationGate::check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
    /// Query parameters from the URL (`?name=value`).
    Query,
    /// Fields of the parsed request body.
    Body,
    /// Path parameters bound by routing (`/users/:id`).
    Params,
    /// Uploaded files, from the multi-field collection or the single-file alias.
    Files,
}

impl Location {
    /// All locations, in the order the gate verifies them.
    pub const ALL: [Location; 4] = [
        Location::Query,
        Location::Params,
        Location::Body,
        Location::Files,
    ];

    /// The lowercase name used in schemas, reports, and log fields.
    pub fn as_str(self) -> &'static str {
        match self {
            Location::Query => "query",
            Location::Body => "body",
            Location::Params => "params",
            Location::Files => "files",
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
