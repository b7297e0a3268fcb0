//! One JSON line per purchase, written to stdout.

use cinema_tickets_core::{PurchaseError, PurchaseOutcome};
use serde::Serialize;

/// Printed result of a single purchase
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Receipt {
    /// Purchase went through
    Accepted {
        /// Account charged
        account_id: u64,
        /// Amount charged
        total_price: u64,
        /// Seats reserved
        total_seats: u64,
    },
    /// Purchase was refused or failed downstream
    Rejected {
        /// Stable error code
        error: &'static str,
        /// Human-readable reason
        message: String,
    },
}

impl Receipt {
    /// Whether the purchase went through
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

impl From<&Result<PurchaseOutcome, PurchaseError>> for Receipt {
    fn from(result: &Result<PurchaseOutcome, PurchaseError>) -> Self {
        match result {
            Ok(outcome) => Self::Accepted {
                account_id: outcome.account_id.as_u64(),
                total_price: outcome.total_price.units(),
                total_seats: outcome.total_seats,
            },
            Err(error) => Self::Rejected {
                error: error.code(),
                message: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use cinema_tickets_core::TicketService;
    use cinema_tickets_testing::{adult, child};

    #[test]
    fn accepted_receipt_shape() {
        let receipt = Receipt::from(&TicketService::quote(1, &[adult(2), child(2)]));

        assert!(receipt.is_accepted());
        assert_eq!(
            serde_json::to_string(&receipt).unwrap(),
            r#"{"status":"accepted","account_id":1,"total_price":60,"total_seats":4}"#
        );
    }

    #[test]
    fn rejected_receipt_shape() {
        let receipt = Receipt::from(&TicketService::quote(1, &[child(1)]));

        assert!(!receipt.is_accepted());
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["status"], "rejected");
        assert_eq!(json["error"], "UNACCOMPANIED_MINOR");
    }
}
