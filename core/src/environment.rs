//! Downstream collaborators, injected into [`TicketService`](crate::TicketService).
//!
//! Payment and seat reservation sit behind traits so the purchase logic can
//! run against real integrations, the logging implementations below, or the
//! recording doubles in `cinema-tickets-testing`.

use crate::error::ServiceError;
use crate::types::{AccountId, Money};
use std::sync::Arc;

/// Charges an account for a purchase.
pub trait TicketPaymentService: Send + Sync {
    /// Take `amount` from `account_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the payment could not be taken.
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), ServiceError>;
}

/// Reserves seats for a purchase.
pub trait SeatReservationService: Send + Sync {
    /// Reserve `seat_count` seats for `account_id`.
    ///
    /// # Errors
    ///
    /// Returns error if the seats could not be reserved.
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), ServiceError>;
}

/// Environment dependencies for the ticket service
#[derive(Clone)]
pub struct PurchaseEnvironment {
    /// Payment collaborator
    pub payments: Arc<dyn TicketPaymentService>,
    /// Seat reservation collaborator
    pub reservations: Arc<dyn SeatReservationService>,
}

impl PurchaseEnvironment {
    /// Creates a new `PurchaseEnvironment`
    #[must_use]
    pub fn new(
        payments: Arc<dyn TicketPaymentService>,
        reservations: Arc<dyn SeatReservationService>,
    ) -> Self {
        Self {
            payments,
            reservations,
        }
    }

    /// Environment backed by the logging services
    #[must_use]
    pub fn logging() -> Self {
        Self::new(
            Arc::new(LoggingPaymentService::new()),
            Arc::new(LoggingSeatReservationService::new()),
        )
    }
}

impl std::fmt::Debug for PurchaseEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseEnvironment").finish_non_exhaustive()
    }
}

/// Payment service that always succeeds and logs the charge.
///
/// Stands in for a real payment gateway during development.
#[derive(Clone, Debug, Default)]
pub struct LoggingPaymentService;

impl LoggingPaymentService {
    /// Creates a new logging payment service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl TicketPaymentService for LoggingPaymentService {
    fn make_payment(&self, account_id: AccountId, amount: Money) -> Result<(), ServiceError> {
        tracing::info!(
            account_id = account_id.as_u64(),
            amount = amount.units(),
            "Payment taken"
        );
        Ok(())
    }
}

/// Seat reservation service that always succeeds and logs the reservation.
#[derive(Clone, Debug, Default)]
pub struct LoggingSeatReservationService;

impl LoggingSeatReservationService {
    /// Creates a new logging seat reservation service
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl SeatReservationService for LoggingSeatReservationService {
    fn reserve_seat(&self, account_id: AccountId, seat_count: u64) -> Result<(), ServiceError> {
        tracing::info!(
            account_id = account_id.as_u64(),
            seat_count,
            "Seats reserved"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logging_services_always_succeed() {
        let env = PurchaseEnvironment::logging();
        let account = AccountId::new(1);

        assert_eq!(env.payments.make_payment(account, Money::from_units(170)), Ok(()));
        assert_eq!(env.reservations.reserve_seat(account, 11), Ok(()));
    }
}
