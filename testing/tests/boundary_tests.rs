//! Untyped JSON requests run through the service

#![allow(clippy::unwrap_used)] // Tests can unwrap

use cinema_tickets_core::{AccountId, Money, PurchaseError};
use cinema_tickets_testing::TestHarness;
use serde_json::json;

#[test]
fn well_formed_json_is_purchased() {
    let harness = TestHarness::new();

    let outcome = harness
        .service
        .purchase_json(&json!({
            "account_id": 1,
            "requests": [
                { "category": "ADULT", "count": 6 },
                { "category": "child", "count": 5 },
                { "category": "Infant", "count": 3 }
            ]
        }))
        .unwrap();

    assert_eq!(outcome.total_price, Money::from_units(170));
    assert_eq!(harness.log.reservations(), vec![(AccountId::new(1), 11)]);
}

#[test]
fn non_numeric_account_ids_are_rejected() {
    let harness = TestHarness::new();

    for account_id in [json!(null), json!({}), json!([]), json!("1"), json!(-1)] {
        let result = harness.service.purchase_json(&json!({
            "account_id": account_id,
            "requests": [{ "category": "ADULT", "count": 1 }]
        }));
        assert_eq!(result, Err(PurchaseError::InvalidAccount));
    }
    assert!(harness.log.is_empty());
}

#[test]
fn malformed_element_rejects_the_whole_batch() {
    let harness = TestHarness::new();

    let result = harness.service.purchase_json(&json!({
        "account_id": 1,
        "requests": [{}, { "category": "ADULT", "count": 1 }]
    }));

    assert_eq!(result, Err(PurchaseError::MalformedRequest { index: Some(0) }));
    assert!(harness.log.is_empty());
}

#[test]
fn unknown_category_is_a_type_error() {
    let harness = TestHarness::new();

    let err = harness
        .service
        .purchase_json(&json!({
            "account_id": 1,
            "requests": [{ "category": "SENIOR", "count": 1 }]
        }))
        .unwrap_err();

    assert_eq!(
        err,
        PurchaseError::UnknownCategory {
            index: Some(0),
            value: "SENIOR".to_string()
        }
    );
    assert!(err.is_type_error());
}

#[test]
fn word_count_is_a_type_error() {
    let harness = TestHarness::new();

    let err = harness
        .service
        .purchase_json(&json!({
            "account_id": 1,
            "requests": [{ "category": "ADULT", "count": "one" }]
        }))
        .unwrap_err();

    assert_eq!(err.code(), "INVALID_COUNT");
    assert!(err.is_type_error());
    assert!(harness.log.is_empty());
}

#[test]
fn parsed_batches_still_go_through_the_rules() {
    let harness = TestHarness::new();

    let result = harness.service.purchase_json(&json!({
        "account_id": 1,
        "requests": [{ "category": "adult", "count": 9 }, { "category": "ADULT", "count": 12 }]
    }));

    assert!(matches!(result, Err(PurchaseError::TooManyTickets { requested: 21, .. })));
}
