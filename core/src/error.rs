//! Error types for ticket purchases.
//!
//! Every failure a purchase can produce is a [`PurchaseError`]. Caller-input
//! kinds are raised before any downstream service is touched; the two
//! downstream kinds wrap a [`ServiceError`] unchanged.

use thiserror::Error;

/// Failure reported by a downstream collaborator (payment or seat reservation).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The service could not be reached
    #[error("{service} unavailable: {reason}")]
    Unavailable {
        /// Name of the failing service
        service: &'static str,
        /// Why it was unavailable
        reason: String,
    },

    /// The service was reached but refused the request
    #[error("{service} rejected the request: {reason}")]
    Rejected {
        /// Name of the failing service
        service: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Errors returned by a ticket purchase.
///
/// Validation stops at the first violated rule, so the variant identifies
/// exactly which rule failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PurchaseError {
    /// Account id is missing, not an integer, or negative
    #[error("Invalid account id")]
    InvalidAccount,

    /// No ticket requests were supplied
    #[error("No tickets requested")]
    EmptyRequest,

    /// A request element does not have the shape of a ticket request
    #[error("Invalid ticket type request{}", position(.index))]
    MalformedRequest {
        /// Position of the offending element, when known
        index: Option<usize>,
    },

    /// A request names a category other than ADULT, CHILD or INFANT
    #[error("Unknown ticket type `{value}`{}", position(.index))]
    UnknownCategory {
        /// Position of the offending element, when known
        index: Option<usize>,
        /// The rejected category as supplied
        value: String,
    },

    /// A request count is not a non-negative integer
    #[error("Invalid number of tickets `{value}`{}", position(.index))]
    InvalidCount {
        /// Position of the offending element, when known
        index: Option<usize>,
        /// The rejected count as supplied
        value: String,
    },

    /// Every request in the batch asked for zero tickets
    #[error("You must purchase at least 1 ticket")]
    ZeroTickets,

    /// The batch exceeds the per-purchase ticket limit
    #[error("A maximum of {max} tickets can be purchased at a time (requested {requested})")]
    TooManyTickets {
        /// Total tickets in the batch
        requested: u64,
        /// The per-purchase limit
        max: u64,
    },

    /// More children, or more infants, than adults
    #[error("A minor cannot travel without an adult ({adults} adults, {children} children, {infants} infants)")]
    UnaccompaniedMinor {
        /// Adult tickets in the batch
        adults: u64,
        /// Child tickets in the batch
        children: u64,
        /// Infant tickets in the batch
        infants: u64,
    },

    /// The payment service failed after validation succeeded
    #[error("Payment failed: {0}")]
    Payment(#[source] ServiceError),

    /// The seat reservation service failed after payment was taken
    #[error("Seat reservation failed: {0}")]
    Reservation(#[source] ServiceError),
}

fn position(index: &Option<usize>) -> String {
    index.map_or_else(String::new, |index| format!(" at position {index}"))
}

impl PurchaseError {
    /// Stable machine-readable identifier for this kind of failure.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidAccount => "INVALID_ACCOUNT",
            Self::EmptyRequest => "EMPTY_REQUEST",
            Self::MalformedRequest { .. } => "MALFORMED_REQUEST",
            Self::UnknownCategory { .. } => "UNKNOWN_CATEGORY",
            Self::InvalidCount { .. } => "INVALID_COUNT",
            Self::ZeroTickets => "ZERO_TICKETS",
            Self::TooManyTickets { .. } => "TOO_MANY_TICKETS",
            Self::UnaccompaniedMinor { .. } => "UNACCOMPANIED_MINOR",
            Self::Payment(_) => "PAYMENT_FAILED",
            Self::Reservation(_) => "RESERVATION_FAILED",
        }
    }

    /// Whether this is a malformed-type failure: an unknown category or a
    /// count that is not a non-negative integer.
    #[must_use]
    pub const fn is_type_error(&self) -> bool {
        matches!(self, Self::UnknownCategory { .. } | Self::InvalidCount { .. })
    }

    /// Whether the caller's input caused this failure.
    ///
    /// `false` only for downstream service failures.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        !matches!(self, Self::Payment(_) | Self::Reservation(_))
    }

    /// Attach the position of the offending request element.
    ///
    /// Kinds that do not refer to a single element are returned unchanged.
    #[must_use]
    pub fn at(self, position: usize) -> Self {
        match self {
            Self::MalformedRequest { .. } => Self::MalformedRequest {
                index: Some(position),
            },
            Self::UnknownCategory { value, .. } => Self::UnknownCategory {
                index: Some(position),
                value,
            },
            Self::InvalidCount { value, .. } => Self::InvalidCount {
                index: Some(position),
                value,
            },
            other => other,
        }
    }
}
