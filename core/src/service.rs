//! The ticket purchase service.
//!
//! [`TicketService::quote`] is the pure part: it validates a batch and
//! derives price and seats. [`TicketService::purchase_tickets`] adds the two
//! downstream calls, payment first and then reservation, and only after every
//! rule has passed.

use crate::environment::PurchaseEnvironment;
use crate::error::PurchaseError;
use crate::metrics;
use crate::pricing;
use crate::types::{PurchaseOutcome, PurchaseRequest, TicketTypeRequest};
use crate::validation;
use serde_json::Value;

/// Validates, prices and books ticket purchases
#[derive(Clone, Debug)]
pub struct TicketService {
    env: PurchaseEnvironment,
}

impl TicketService {
    /// Creates a new `TicketService`
    #[must_use]
    pub const fn new(env: PurchaseEnvironment) -> Self {
        Self { env }
    }

    /// Validates a batch and computes its price and seat count without
    /// calling any downstream service.
    ///
    /// # Errors
    ///
    /// Returns the first violated purchase rule.
    pub fn quote(
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let account_id = validation::validate_account(account_id)?;
        let totals = validation::validate_requests(requests)?;

        Ok(PurchaseOutcome {
            account_id,
            total_price: pricing::total_price(&totals),
            total_seats: pricing::total_seats(&totals),
            totals,
        })
    }

    /// Purchases tickets for an account.
    ///
    /// On success the payment service has been charged the total price and
    /// the reservation service asked for the total seats, once each and in
    /// that order. On failure neither was called, unless the failure came
    /// from one of them.
    ///
    /// # Errors
    ///
    /// Returns the first violated purchase rule, or the downstream failure
    /// wrapped in [`PurchaseError::Payment`] or [`PurchaseError::Reservation`].
    /// A failed payment skips the reservation; nothing is retried or undone.
    pub fn purchase_tickets(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let span = tracing::info_span!("purchase_tickets", account_id, requests = requests.len());
        let _guard = span.enter();

        record(self.book(account_id, requests))
    }

    /// Purchases the tickets described by a [`PurchaseRequest`].
    ///
    /// # Errors
    ///
    /// See [`TicketService::purchase_tickets`].
    pub fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseOutcome, PurchaseError> {
        self.purchase_tickets(request.account_id, &request.requests)
    }

    /// Parses an untyped JSON request and purchases it.
    ///
    /// # Errors
    ///
    /// Parse failures from [`PurchaseRequest::from_json`], then everything
    /// [`TicketService::purchase_tickets`] can return.
    pub fn purchase_json(&self, value: &Value) -> Result<PurchaseOutcome, PurchaseError> {
        let account_id = value.get("account_id").unwrap_or(&Value::Null);
        let span = tracing::info_span!("purchase_json", account_id = %account_id);
        let _guard = span.enter();

        match PurchaseRequest::from_json(value) {
            Ok(request) => self.purchase(&request),
            Err(error) => record(Err(error)),
        }
    }

    fn book(
        &self,
        account_id: i64,
        requests: &[TicketTypeRequest],
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let outcome = Self::quote(account_id, requests)?;

        self.env
            .payments
            .make_payment(outcome.account_id, outcome.total_price)
            .map_err(PurchaseError::Payment)?;

        self.env
            .reservations
            .reserve_seat(outcome.account_id, outcome.total_seats)
            .map_err(PurchaseError::Reservation)?;

        Ok(outcome)
    }
}

fn record(result: Result<PurchaseOutcome, PurchaseError>) -> Result<PurchaseOutcome, PurchaseError> {
    match &result {
        Ok(outcome) => {
            metrics::record_accepted(outcome);
            tracing::info!(
                account_id = outcome.account_id.as_u64(),
                total_price = outcome.total_price.units(),
                total_seats = outcome.total_seats,
                "Purchase accepted"
            );
        }
        Err(error) if error.is_input_error() => {
            metrics::record_rejected(error);
            tracing::warn!(code = error.code(), error = %error, "Purchase rejected");
        }
        Err(error) => {
            metrics::record_rejected(error);
            tracing::error!(code = error.code(), error = %error, "Purchase failed downstream");
        }
    }
    result
}
