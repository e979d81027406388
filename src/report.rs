//! Aggregated verification report.

use indexmap::IndexMap;
use serde::Serialize;

use crate::location::Location;

/// Field name to failure message, in report order.
pub type ErrorMap = IndexMap<String, String>;

/// Per-location outcome of one full verification round.
///
/// Each location holds `None` when there was nothing to report, which
/// covers both "no sub-schema for this location" and "verified and
/// passed". A populated slot holds the location's error map.
/// Serialization keeps all four keys and renders clean locations as
/// `null`, so formatters always see the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FieldReport {
    /// Query parameter errors, or `None` when query has none.
    pub query: Option<ErrorMap>,
    /// Body field errors, or `None` when body has none.
    pub body: Option<ErrorMap>,
    /// Path parameter errors, or `None` when params has none.
    pub params: Option<ErrorMap>,
    /// Upload errors, or `None` when files has none.
    pub files: Option<ErrorMap>,
}

impl FieldReport {
    /// Returns the slot for `location`.
    pub fn get(&self, location: Location) -> Option<&ErrorMap> {
        match location {
            Location::Query => self.query.as_ref(),
            Location::Body => self.body.as_ref(),
            Location::Params => self.params.as_ref(),
            Location::Files => self.files.as_ref(),
        }
    }

    /// Stores the verification result for `location`.
    pub(crate) fn set(&mut self, location: Location, errors: Option<ErrorMap>) {
        match location {
            Location::Query => self.query = errors,
            Location::Body => self.body = errors,
            Location::Params => self.params = errors,
            Location::Files => self.files = errors,
        }
    }

    /// Whether any verified location reported at least one error.
    pub fn is_failure(&self) -> bool {
        self.iter()
            .any(|(_, errors)| errors.is_some_and(|map| !map.is_empty()))
    }

    /// Iterates the four slots in payload order: query, body, params,
    /// files. This is the order formatters and serialization use, not
    /// the order locations are verified in.
    pub fn iter(&self) -> impl Iterator<Item = (Location, Option<&ErrorMap>)> {
        [
            (Location::Query, self.query.as_ref()),
            (Location::Body, self.body.as_ref()),
            (Location::Params, self.params.as_ref()),
            (Location::Files, self.files.as_ref()),
        ]
        .into_iter()
    }
}
