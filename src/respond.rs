//! Transport glue for driving the gate from middleware.
//!
//! Frameworks differ in how responses are written, so the gate only
//! asks for the two operations a rejection needs. [`handle`] then gives
//! integrations the familiar middleware shape: reject or fall through.

use serde_json::Value;

use crate::error::GateError;
use crate::gate::{Outcome, ValidationGate};
use crate::request::RequestParts;

/// Minimal response surface the gate writes rejections to.
///
/// # Examples
///
/// ```
/// use request_gate::Respond;
/// use serde_json::Value;
///
/// struct MyResponse {
///     status: u16,
///     body: Option<Value>,
/// }
///
/// impl Respond for MyResponse {
///     fn set_status(&mut self, status: u16) {
///         self.status = status;
///     }
///
///     fn send(&mut self, body: Value) {
///         self.body = Some(body);
///     }
/// }
/// ```
pub trait Respond {
    /// Sets the HTTP status code of the response.
    fn set_status(&mut self, status: u16);

    /// Sends `body` as the JSON response.
    fn send(&mut self, body: Value);
}

/// Checks `request` with `gate`, then either writes the rejection to
/// `response` or calls `next`.
///
/// This is the middleware shape most integrations want: `next` stands
/// in for the downstream handler chain and runs only when validation
/// passes.
///
/// # Errors
///
/// Propagates [`GateError`] from the gate; nothing is written to the
/// response in that case.
pub fn handle<R, S, F>(
    gate: &ValidationGate<R>,
    request: &R,
    response: &mut S,
    next: F,
) -> Result<(), GateError>
where
    R: RequestParts,
    S: Respond,
    F: FnOnce(),
{
    match gate.check(request)? {
        Outcome::Continue => next(),
        Outcome::Reject(rejection) => {
            response.set_status(rejection.status);
            response.send(rejection.body);
        }
    }
    Ok(())
}
