//! Required-field validation walkthrough.
//!
//! This example declares a small signup schema and pushes requests
//! through the gate:
//! 1. A complete request passes straight through
//! 2. An incomplete request gets the aggregated rejection payload
//! 3. Blank values count as missing, same as absent ones
//!
//! Run with: `cargo run --example basic_required`

use request_gate::{FieldRule, Outcome, RequestAdapter, Schema, SubSchema, ValidationGate};

fn signup_gate() -> ValidationGate {
    let schema: Schema = Schema::new()
        .params(SubSchema::new().field("tenant", FieldRule::required()))
        .body(
            SubSchema::new()
                .field("name", FieldRule::required())
                .field(
                    "email",
                    FieldRule::required()
                        .required_error_text("an email address is needed to sign up"),
                ),
        );
    ValidationGate::new(schema)
}

fn show(label: &str, gate: &ValidationGate, request: &RequestAdapter) {
    println!("\n--- {label} ---");
    match gate.check(request).expect("no uploads involved") {
        Outcome::Continue => println!("✓ passed, the handler would run now"),
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
    println!("=== Required Fields Example ===");

    let gate = signup_gate();

    let mut complete = RequestAdapter::new();
    complete.add_path_param("tenant", "acme");
    complete.add_body_field("name", "Ada Lovelace");
    complete.add_body_field("email", "ada@example.com");
    show("Scenario 1: complete signup", &gate, &complete);

    let mut incomplete = RequestAdapter::new();
    incomplete.add_path_param("tenant", "acme");
    incomplete.add_body_field("name", "Ada Lovelace");
    show("Scenario 2: missing email", &gate, &incomplete);

    let mut blank = RequestAdapter::new();
    blank.add_path_param("tenant", "");
    show("Scenario 3: blank values count as missing", &gate, &blank);

    println!("\n=== Key Takeaways ===");
    println!("1. One schema covers every request location");
    println!("2. All failures arrive in a single payload, not one at a time");
    println!("3. Custom required messages replace the default per field");
}
