//! Golden wire-contract tests.
//!
//! The request bodies the client state builds must match the committed
//! golden JSON exactly, and the golden plan must decode and validate. The
//! backend parses these shapes; renaming a field breaks it silently.

use agridoc_core::advisor::AdvisorFlow;
use agridoc_core::chat::ChatSession;
use agridoc_core::{Lang, UserProfile};
use agridoc_protocol::{Compatibility, PracticePlan, Validate};

fn golden(path: &str) -> serde_json::Value {
    serde_json::from_str(
        &std::fs::read_to_string(path).unwrap_or_else(|e| panic!("Cannot read {}: {}", path, e)),
    )
    .unwrap_or_else(|e| panic!("Cannot parse {}: {}", path, e))
}

#[test]
fn test_golden_diagnose_request() {
    let mut chat = ChatSession::new(Lang::Hi);
    let request = chat
        .begin_send("Leaves have brown rings", Some("data:image/jpeg;base64,/9j/4AAQ".into()))
        .unwrap();

    let serialized = serde_json::to_value(&request).unwrap();
    assert_eq!(serialized, golden("tests/golden/diagnose-request.json"));

    // Optional context fields are omitted, not sent as null
    let obj = serialized.as_object().unwrap();
    assert!(!obj.contains_key("crop_type"));
    assert!(!obj.contains_key("location"));
}

#[test]
fn test_golden_plan_request() {
    let profile = UserProfile {
        name: "Ramu".into(),
        location_name: "Bellary, Karnataka, India".into(),
        lat: 15.14,
        lon: 76.92,
        soil_type: "Black Cotton".into(),
    };
    let request = AdvisorFlow::new().begin("Drip Irrigation", &profile).unwrap();

    let serialized = serde_json::to_value(&request).unwrap();
    assert_eq!(serialized, golden("tests/golden/plan-request.json"));
}

#[test]
fn test_golden_practice_plan_decodes() {
    let plan: PracticePlan =
        serde_json::from_value(golden("tests/golden/practice-plan.json")).unwrap();
    assert!(plan.validate().is_ok());
    assert_eq!(plan.compatibility, Compatibility::High);
    assert_eq!(plan.phases.len(), 1);
    assert_eq!(plan.phases[0].what_you_need, vec!["Land records", "Aadhaar"]);
    assert_eq!(plan.estimated_cost.unit, "per acre");
}
