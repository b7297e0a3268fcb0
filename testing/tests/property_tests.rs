//! Property tests for pricing, seating and rule ordering

#![allow(clippy::unwrap_used)] // Tests can unwrap

use cinema_tickets_core::{
    CategoryTotals, Money, PurchaseError, PurchaseRequest, TicketService, MAX_TICKETS_PER_PURCHASE,
};
use cinema_tickets_testing::properties::{category_spelling, request_batch, ticket_category, valid_batch};
use cinema_tickets_testing::TestHarness;
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn valid_batches_are_priced_exactly(batch in valid_batch(), account_id in 0..i64::MAX) {
        let harness = TestHarness::new();
        let totals = CategoryTotals::from_requests(&batch);

        let outcome = harness.purchase(account_id, &batch).unwrap();

        prop_assert_eq!(
            outcome.total_price,
            Money::from_units(20 * totals.adults() + 10 * totals.children())
        );
        prop_assert_eq!(outcome.total_seats, totals.adults() + totals.children());
        prop_assert_eq!(harness.log.payments().len(), 1);
        prop_assert_eq!(harness.log.reservations().len(), 1);
    }

    #[test]
    fn rejected_batches_never_reach_downstream(batch in request_batch(6, 30)) {
        let harness = TestHarness::new();

        if harness.purchase(1, &batch).is_err() {
            prop_assert!(harness.log.is_empty());
        }
    }

    #[test]
    fn rule_order_is_respected(batch in request_batch(6, 30)) {
        let totals = CategoryTotals::from_requests(&batch);
        let total = totals.total();
        let result = TicketService::quote(1, &batch);

        if total == 0 {
            prop_assert_eq!(result, Err(PurchaseError::ZeroTickets));
        } else if total > MAX_TICKETS_PER_PURCHASE {
            let too_many = matches!(result, Err(PurchaseError::TooManyTickets { .. }));
            prop_assert!(too_many);
        } else if totals.children() > totals.adults() || totals.infants() > totals.adults() {
            let unaccompanied = matches!(result, Err(PurchaseError::UnaccompaniedMinor { .. }));
            prop_assert!(unaccompanied);
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn negative_accounts_always_fail_first(account_id in i64::MIN..0, batch in request_batch(4, 30)) {
        prop_assert_eq!(TicketService::quote(account_id, &batch), Err(PurchaseError::InvalidAccount));
    }

    #[test]
    fn category_case_does_not_matter(
        (category, spelling) in ticket_category().prop_flat_map(|c| (Just(c), category_spelling(c))),
        count in 0u32..5,
    ) {
        let request = PurchaseRequest::from_json(&json!({
            "account_id": 1,
            "requests": [{ "category": spelling, "count": count }]
        }))
        .unwrap();

        prop_assert_eq!(request.requests[0].category(), category);
        prop_assert_eq!(request.requests[0].count(), count);
    }
}
