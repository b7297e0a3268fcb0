//! Purchase metrics.
//!
//! Recorded through the `metrics` facade; nothing is exported unless the host
//! installs a recorder.
//!
//! ## Counters
//! - `cinema_purchases_total{outcome}` - purchases by outcome (accepted, rejected)
//! - `cinema_purchase_rejections_total{reason}` - rejections by error code
//! - `cinema_tickets_sold_total{category}` - tickets sold per category
//! - `cinema_revenue_units_total` - amount charged, in whole units
//! - `cinema_seats_reserved_total` - seats reserved

use crate::error::PurchaseError;
use crate::types::{PurchaseOutcome, TicketCategory};
use metrics::{counter, describe_counter};

/// Purchases by outcome
pub const PURCHASES_TOTAL: &str = "cinema_purchases_total";
/// Rejections by error code
pub const REJECTIONS_TOTAL: &str = "cinema_purchase_rejections_total";
/// Tickets sold per category
pub const TICKETS_SOLD_TOTAL: &str = "cinema_tickets_sold_total";
/// Amount charged
pub const REVENUE_UNITS_TOTAL: &str = "cinema_revenue_units_total";
/// Seats reserved
pub const SEATS_RESERVED_TOTAL: &str = "cinema_seats_reserved_total";

/// Register descriptions for every purchase metric.
///
/// Call once at startup, after installing a recorder.
pub fn register_purchase_metrics() {
    describe_counter!(PURCHASES_TOTAL, "Total number of purchases by outcome (accepted, rejected)");
    describe_counter!(REJECTIONS_TOTAL, "Total number of rejected purchases by reason");
    describe_counter!(TICKETS_SOLD_TOTAL, "Total number of tickets sold by category");
    describe_counter!(REVENUE_UNITS_TOTAL, "Total amount charged in whole currency units");
    describe_counter!(SEATS_RESERVED_TOTAL, "Total number of seats reserved");

    tracing::debug!("Purchase metrics registered");
}

pub(crate) fn record_accepted(outcome: &PurchaseOutcome) {
    counter!(PURCHASES_TOTAL, "outcome" => "accepted").increment(1);

    for category in TicketCategory::ALL {
        let sold = outcome.totals[category];
        if sold > 0 {
            counter!(TICKETS_SOLD_TOTAL, "category" => category.as_str()).increment(sold);
        }
    }

    counter!(REVENUE_UNITS_TOTAL).increment(outcome.total_price.units());
    counter!(SEATS_RESERVED_TOTAL).increment(outcome.total_seats);
}

pub(crate) fn record_rejected(error: &PurchaseError) {
    counter!(PURCHASES_TOTAL, "outcome" => "rejected").increment(1);
    counter!(REJECTIONS_TOTAL, "reason" => error.code()).increment(1);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::environment::PurchaseEnvironment;
    use crate::service::TicketService;
    use crate::types::TicketTypeRequest;
    use metrics_util::debugging::{DebugValue, DebuggingRecorder};

    type Counter = (String, Vec<(String, String)>, u64);

    /// Runs `f` against a fresh recorder and returns every counter it touched
    fn counters_after(f: impl FnOnce()) -> Vec<Counter> {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();
        metrics::with_local_recorder(&recorder, f);

        snapshotter
            .snapshot()
            .into_vec()
            .into_iter()
            .filter_map(|(key, _, _, value)| match value {
                DebugValue::Counter(count) => Some((
                    key.key().name().to_string(),
                    key.key()
                        .labels()
                        .map(|label| (label.key().to_string(), label.value().to_string()))
                        .collect(),
                    count,
                )),
                _ => None,
            })
            .collect()
    }

    fn value(counters: &[Counter], name: &str, labels: &[(&str, &str)]) -> Option<u64> {
        counters
            .iter()
            .find(|(counter, counter_labels, _)| {
                counter == name
                    && counter_labels.len() == labels.len()
                    && counter_labels
                        .iter()
                        .zip(labels)
                        .all(|((key, value), (want_key, want_value))| key == want_key && value == want_value)
            })
            .map(|(_, _, count)| *count)
    }

    fn service() -> TicketService {
        TicketService::new(PurchaseEnvironment::logging())
    }

    #[test]
    fn accepted_purchase_records_sales() {
        let counters = counters_after(|| {
            service()
                .purchase_tickets(
                    1,
                    &[
                        TicketTypeRequest::new(TicketCategory::Adult, 6),
                        TicketTypeRequest::new(TicketCategory::Child, 5),
                        TicketTypeRequest::new(TicketCategory::Infant, 3),
                    ],
                )
                .unwrap();
        });

        assert_eq!(value(&counters, PURCHASES_TOTAL, &[("outcome", "accepted")]), Some(1));
        assert_eq!(value(&counters, PURCHASES_TOTAL, &[("outcome", "rejected")]), None);
        assert_eq!(value(&counters, REVENUE_UNITS_TOTAL, &[]), Some(170));
        assert_eq!(value(&counters, SEATS_RESERVED_TOTAL, &[]), Some(11));
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "ADULT")]), Some(6));
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "CHILD")]), Some(5));
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "INFANT")]), Some(3));
    }

    #[test]
    fn unsold_categories_are_not_recorded() {
        let counters = counters_after(|| {
            service()
                .purchase_tickets(1, &[TicketTypeRequest::new(TicketCategory::Adult, 2)])
                .unwrap();
        });

        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "ADULT")]), Some(2));
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "CHILD")]), None);
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "INFANT")]), None);
    }

    #[test]
    fn rejected_purchase_records_reason() {
        let counters = counters_after(|| {
            let result =
                service().purchase_tickets(1, &[TicketTypeRequest::new(TicketCategory::Child, 1)]);
            assert!(matches!(result, Err(PurchaseError::UnaccompaniedMinor { .. })));
        });

        assert_eq!(value(&counters, PURCHASES_TOTAL, &[("outcome", "rejected")]), Some(1));
        assert_eq!(
            value(&counters, REJECTIONS_TOTAL, &[("reason", "UNACCOMPANIED_MINOR")]),
            Some(1)
        );
        assert_eq!(value(&counters, PURCHASES_TOTAL, &[("outcome", "accepted")]), None);
        assert_eq!(value(&counters, REVENUE_UNITS_TOTAL, &[]), None);
        assert_eq!(value(&counters, TICKETS_SOLD_TOTAL, &[("category", "CHILD")]), None);
    }
}
