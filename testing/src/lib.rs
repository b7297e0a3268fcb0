//! # Cinema Tickets Testing
//!
//! Testing utilities for cinema ticket purchases.
//!
//! This crate provides:
//! - Recording doubles for the payment and seat reservation services
//! - A [`TestHarness`] wiring those doubles into a
//!   [`TicketService`](cinema_tickets_core::TicketService)
//! - proptest strategies for requests and batches
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_testing::{adult, child, TestHarness};
//!
//! let harness = TestHarness::new();
//! let outcome = harness.purchase(1, &[adult(2), child(2)]);
//!
//! assert!(outcome.is_ok());
//! assert_eq!(harness.log.payments().len(), 1);
//! assert_eq!(harness.log.reservations().len(), 1);
//! ```

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap for simplicity
#![allow(clippy::missing_panics_doc)]

/// Recording doubles for the downstream services
///
/// Both doubles write into one shared [`CallLog`](mocks::CallLog), so tests
/// can assert on the order of payment and reservation calls as well as their
/// arguments.
pub mod mocks {
    use cinema_tickets_core::{
        AccountId, Money, SeatReservationService, ServiceError, TicketPaymentService,
    };
    use std::sync::{Arc, RwLock};

    /// A single downstream call, as observed by a double
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DownstreamCall {
        /// `make_payment` was called
        Payment {
            /// Account charged
            account_id: AccountId,
            /// Amount charged
            amount: Money,
        },
        /// `reserve_seat` was called
        Reservation {
            /// Account the seats are for
            account_id: AccountId,
            /// Seats reserved
            seat_count: u64,
        },
    }

    /// Shared, ordered log of downstream calls
    #[derive(Clone, Debug, Default)]
    pub struct CallLog {
        calls: Arc<RwLock<Vec<DownstreamCall>>>,
    }

    impl CallLog {
        /// Create an empty log
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        fn push(&self, call: DownstreamCall) {
            self.calls.write().unwrap().push(call);
        }

        /// Every call, in the order it happened
        #[must_use]
        pub fn calls(&self) -> Vec<DownstreamCall> {
            self.calls.read().unwrap().clone()
        }

        /// Arguments of every payment call
        #[must_use]
        pub fn payments(&self) -> Vec<(AccountId, Money)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    DownstreamCall::Payment { account_id, amount } => Some((account_id, amount)),
                    DownstreamCall::Reservation { .. } => None,
                })
                .collect()
        }

        /// Arguments of every reservation call
        #[must_use]
        pub fn reservations(&self) -> Vec<(AccountId, u64)> {
            self.calls()
                .into_iter()
                .filter_map(|call| match call {
                    DownstreamCall::Reservation {
                        account_id,
                        seat_count,
                    } => Some((account_id, seat_count)),
                    DownstreamCall::Payment { .. } => None,
                })
                .collect()
        }

        /// Check if no call was made
        #[must_use]
        pub fn is_empty(&self) -> bool {
            self.calls.read().unwrap().is_empty()
        }

        /// Forget every recorded call
        pub fn clear(&self) {
            self.calls.write().unwrap().clear();
        }
    }

    /// Payment double that records calls and optionally fails
    #[derive(Clone, Debug)]
    pub struct RecordingPaymentService {
        log: CallLog,
        failure: Option<ServiceError>,
    }

    impl RecordingPaymentService {
        /// Succeeds and records into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log, failure: None }
        }

        /// Fails every call with `error` and records nothing
        #[must_use]
        pub const fn failing(log: CallLog, error: ServiceError) -> Self {
            Self {
                log,
                failure: Some(error),
            }
        }
    }

    impl TicketPaymentService for RecordingPaymentService {
        fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), ServiceError> {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            self.log.push(DownstreamCall::Payment { account_id, amount });
            Ok(())
        }
    }

    /// Seat reservation double that records calls and optionally fails
    #[derive(Clone, Debug)]
    pub struct RecordingSeatReservationService {
        log: CallLog,
        failure: Option<ServiceError>,
    }

    impl RecordingSeatReservationService {
        /// Succeeds and records into `log`
        #[must_use]
        pub const fn new(log: CallLog) -> Self {
            Self { log, failure: None }
        }

        /// Fails every call with `error` and records nothing
        #[must_use]
        pub const fn failing(log: CallLog, error: ServiceError) -> Self {
            Self {
                log,
                failure: Some(error),
            }
        }
    }

    impl SeatReservationService for RecordingSeatReservationService {
        fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), ServiceError> {
            if let Some(error) = &self.failure {
                return Err(error.clone());
            }
            self.log.push(DownstreamCall::Reservation {
                account_id,
                seat_count,
            });
            Ok(())
        }
    }
}

/// Test helpers and builders
pub mod helpers {
    use super::mocks::{CallLog, RecordingPaymentService, RecordingSeatReservationService};
    use cinema_tickets_core::{
        PurchaseEnvironment, PurchaseError, PurchaseOutcome, ServiceError, TicketCategory,
        TicketService, TicketTypeRequest,
    };
    use std::sync::Arc;

    /// A [`TicketService`] wired to recording doubles
    #[derive(Clone, Debug)]
    pub struct TestHarness {
        /// Service under test
        pub service: TicketService,
        /// Calls the service made downstream
        pub log: CallLog,
    }

    impl TestHarness {
        /// Both services succeed
        #[must_use]
        pub fn new() -> Self {
            let log = CallLog::new();
            Self::wire(
                RecordingPaymentService::new(log.clone()),
                RecordingSeatReservationService::new(log.clone()),
                log,
            )
        }

        /// Payment fails with `error`
        #[must_use]
        pub fn with_failing_payment(error: ServiceError) -> Self {
            let log = CallLog::new();
            Self::wire(
                RecordingPaymentService::failing(log.clone(), error),
                RecordingSeatReservationService::new(log.clone()),
                log,
            )
        }

        /// Seat reservation fails with `error`
        #[must_use]
        pub fn with_failing_reservation(error: ServiceError) -> Self {
            let log = CallLog::new();
            Self::wire(
                RecordingPaymentService::new(log.clone()),
                RecordingSeatReservationService::failing(log.clone(), error),
                log,
            )
        }

        fn wire(
            payments: RecordingPaymentService,
            reservations: RecordingSeatReservationService,
            log: CallLog,
        ) -> Self {
            let env = PurchaseEnvironment::new(Arc::new(payments), Arc::new(reservations));
            Self {
                service: TicketService::new(env),
                log,
            }
        }

        /// Run a purchase through the service
        ///
        /// # Errors
        ///
        /// Whatever the service returns.
        pub fn purchase(
            &self,
            account_id: i64,
            requests: &[TicketTypeRequest],
        ) -> Result<PurchaseOutcome, PurchaseError> {
            self.service.purchase_tickets(account_id, requests)
        }
    }

    impl Default for TestHarness {
        fn default() -> Self {
            Self::new()
        }
    }

    /// `count` adult tickets
    #[must_use]
    pub const fn adult(count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(TicketCategory::Adult, count)
    }

    /// `count` child tickets
    #[must_use]
    pub const fn child(count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(TicketCategory::Child, count)
    }

    /// `count` infant tickets
    #[must_use]
    pub const fn infant(count: u32) -> TicketTypeRequest {
        TicketTypeRequest::new(TicketCategory::Infant, count)
    }

    /// Install a test-writer tracing subscriber; later calls are no-ops.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "cinema_tickets_core=debug".into()),
            )
            .with_test_writer()
            .try_init();
    }
}

/// Property-based testing strategies using proptest.
pub mod properties {
    use cinema_tickets_core::{TicketCategory, TicketTypeRequest, MAX_TICKETS_PER_PURCHASE};
    use proptest::prelude::*;

    /// Per-purchase limit as a request count
    #[allow(clippy::cast_possible_truncation)]
    const LIMIT: u32 = MAX_TICKETS_PER_PURCHASE as u32;

    /// Any ticket category
    pub fn ticket_category() -> impl Strategy<Value = TicketCategory> {
        prop_oneof![
            Just(TicketCategory::Adult),
            Just(TicketCategory::Child),
            Just(TicketCategory::Infant),
        ]
    }

    /// A category name in random letter case, e.g. `aDuLt`
    pub fn category_spelling(category: TicketCategory) -> impl Strategy<Value = String> {
        let name = category.as_str();
        proptest::collection::vec(any::<bool>(), name.len()).prop_map(move |upper| {
            name.chars()
                .zip(upper)
                .map(|(c, upper)| {
                    if upper {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect()
        })
    }

    /// A single request with a count up to `max_count`
    pub fn ticket_request(max_count: u32) -> impl Strategy<Value = TicketTypeRequest> {
        (ticket_category(), 0..=max_count)
            .prop_map(|(category, count)| TicketTypeRequest::new(category, count))
    }

    /// A non-empty batch of arbitrary requests, valid or not
    pub fn request_batch(
        max_len: usize,
        max_count: u32,
    ) -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        proptest::collection::vec(ticket_request(max_count), 1..=max_len)
    }

    /// A batch that passes every purchase rule: 1 to 20 tickets, and neither
    /// children nor infants outnumbering adults. Categories arrive in random
    /// order, sometimes split across several requests.
    pub fn valid_batch() -> impl Strategy<Value = Vec<TicketTypeRequest>> {
        (1..=LIMIT)
            .prop_flat_map(|adults| (Just(adults), 0..=adults.min(LIMIT - adults)))
            .prop_flat_map(|(adults, children)| {
                (
                    Just(adults),
                    Just(children),
                    0..=adults.min(LIMIT - adults - children),
                    0..=adults,
                )
            })
            .prop_map(|(adults, children, infants, split)| {
                let mut batch = vec![
                    TicketTypeRequest::new(TicketCategory::Adult, adults - split),
                    TicketTypeRequest::new(TicketCategory::Child, children),
                    TicketTypeRequest::new(TicketCategory::Infant, infants),
                ];
                if split > 0 {
                    batch.push(TicketTypeRequest::new(TicketCategory::Adult, split));
                }
                batch
            })
            .prop_shuffle()
    }
}

// Re-export commonly used items
pub use helpers::{adult, child, infant, init_test_tracing, TestHarness};
pub use mocks::{CallLog, DownstreamCall, RecordingPaymentService, RecordingSeatReservationService};

#[cfg(test)]
mod tests {
    use super::*;
    use cinema_tickets_core::{AccountId, Money, ServiceError};

    #[test]
    fn harness_records_calls_in_order() {
        let harness = TestHarness::new();
        harness.purchase(4, &[adult(1), infant(1)]).unwrap();

        assert_eq!(
            harness.log.calls(),
            vec![
                DownstreamCall::Payment {
                    account_id: AccountId::new(4),
                    amount: Money::from_units(20),
                },
                DownstreamCall::Reservation {
                    account_id: AccountId::new(4),
                    seat_count: 1,
                },
            ]
        );
    }

    #[test]
    fn failing_double_records_nothing() {
        let harness = TestHarness::with_failing_reservation(ServiceError::Unavailable {
            service: "seats",
            reason: "down".to_string(),
        });
        let _ = harness.purchase(1, &[adult(1)]);

        assert_eq!(harness.log.payments().len(), 1);
        assert!(harness.log.reservations().is_empty());
    }

    #[test]
    fn clear_resets_the_log() {
        let harness = TestHarness::new();
        harness.purchase(1, &[adult(1)]).unwrap();
        assert!(!harness.log.is_empty());

        harness.log.clear();
        assert!(harness.log.is_empty());
    }
}
