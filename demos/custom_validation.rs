//! Custom validators and rejection formatting.
//!
//! This example layers custom checks on top of required fields:
//! 1. A numeric range check on a body field
//! 2. A cross-location check between query and params
//! 3. A custom formatter and status code for the rejection
//!
//! Run with: `cargo run --example custom_validation`

use request_gate::{
    FieldReport, FieldRule, Outcome, RequestAdapter, RequestParts, Schema, SubSchema,
    ValidationGate,
};
use serde_json::json;

fn order_gate() -> ValidationGate {
    let schema: Schema = Schema::new()
        .params(SubSchema::new().field(
            "customer_id",
            FieldRule::required().validator(|request: &RequestAdapter| {
                let id = request.path_param("customer_id")?;
                let claimed = request.query_param("customer_id")?;
                (id != claimed).then(|| "path and query disagree about the customer".to_string())
            }),
        ))
        .body(SubSchema::new().field(
            "quantity",
            FieldRule::required().validator(|request: &RequestAdapter| {
                match request.body_field("quantity").and_then(|v| v.as_i64()) {
                    Some(n) if (1..=100).contains(&n) => None,
                    _ => Some("quantity must be a number between 1 and 100".to_string()),
                }
            }),
        ));

    ValidationGate::new(schema)
        .error_code(422)
        .formatter(|report: &FieldReport| {
            json!({
                "code": "ORDER_REJECTED",
                "details": serde_json::to_value(report).expect("report serializes"),
            })
        })
}

fn show(label: &str, gate: &ValidationGate, request: &RequestAdapter) {
    println!("\n--- {label} ---");
    match gate.check(request).expect("no uploads involved") {
        Outcome::Continue => println!("✓ order accepted"),
        Outcome::Reject(rejection) => {
            println!("✗ rejected with status {}", rejection.status);
            println!(
                "{}",
                serde_json::to_string_pretty(&rejection.body).expect("valid json")
            );
        }
    }
}

fn main() {
    println!("=== Custom Validation Example ===");

    let gate = order_gate();

    let mut valid = RequestAdapter::new();
    valid.add_path_param("customer_id", "c-42");
    valid.add_query_param("customer_id", "c-42");
    valid.add_body_field("quantity", 3);
    show("Scenario 1: valid order", &gate, &valid);

    let mut oversized = RequestAdapter::new();
    oversized.add_path_param("customer_id", "c-42");
    oversized.add_query_param("customer_id", "c-42");
    oversized.add_body_field("quantity", 5000);
    show("Scenario 2: quantity out of range", &gate, &oversized);

    let mut mismatched = RequestAdapter::new();
    mismatched.add_path_param("customer_id", "c-42");
    mismatched.add_query_param("customer_id", "c-7");
    show("Scenario 3: cross-location mismatch, quantity missing", &gate, &mismatched);

    println!("\n=== Key Takeaways ===");
    println!("1. Validators see the whole request, not just their field");
    println!("2. A missing required field outranks its validator message");
    println!("3. Formatter and status code are per-gate configuration");
}
