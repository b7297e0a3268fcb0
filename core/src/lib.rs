//! # Cinema Tickets Core
//!
//! Validation, pricing and seat allocation for cinema ticket purchases.
//!
//! A purchase is a batch of [`TicketTypeRequest`]s for one account. The batch
//! is checked as a whole, priced, and then handed to two downstream
//! collaborators: payment first, seat reservation second. Both are injected
//! through a [`PurchaseEnvironment`].
//!
//! ## Rules
//!
//! | Category | Price | Seat |
//! |----------|-------|------|
//! | ADULT    | 20    | yes  |
//! | CHILD    | 10    | yes  |
//! | INFANT   | 0     | no   |
//!
//! - at most [`MAX_TICKETS_PER_PURCHASE`] tickets per purchase, at least one
//! - neither children nor infants may outnumber adults
//!
//! ## Example
//!
//! ```
//! use cinema_tickets_core::{
//!     PurchaseEnvironment, TicketCategory, TicketService, TicketTypeRequest,
//! };
//!
//! let service = TicketService::new(PurchaseEnvironment::logging());
//! let outcome = service
//!     .purchase_tickets(
//!         1,
//!         &[
//!             TicketTypeRequest::new(TicketCategory::Adult, 2),
//!             TicketTypeRequest::new(TicketCategory::Child, 2),
//!         ],
//!     )
//!     .map_err(|e| e.to_string())?;
//!
//! assert_eq!(outcome.total_price.units(), 60);
//! assert_eq!(outcome.total_seats, 4);
//! # Ok::<(), String>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod environment;
pub mod error;
pub mod metrics;
mod pricing;
mod request;
pub mod service;
pub mod types;
pub mod validation;

pub use environment::{
    LoggingPaymentService, LoggingSeatReservationService, PurchaseEnvironment,
    SeatReservationService, TicketPaymentService,
};
pub use error::{PurchaseError, ServiceError};
pub use service::TicketService;
pub use types::{
    AccountId, CategoryTotals, Money, ParseCategoryError, PurchaseOutcome, PurchaseRequest,
    TicketCategory, TicketTypeRequest,
};
pub use validation::MAX_TICKETS_PER_PURCHASE;
