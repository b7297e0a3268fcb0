//! Business rules applied to a purchase before any money moves.
//!
//! Rules run in a fixed order and the first violation wins:
//!
//! 1. account id is non-negative
//! 2. at least one request
//! 3. at least one ticket in total
//! 4. at most [`MAX_TICKETS_PER_PURCHASE`] tickets in total
//! 5. neither children nor infants outnumber adults
//!
//! Shape, category and count checks on untyped input happen earlier, in
//! [`PurchaseRequest::from_json`](crate::types::PurchaseRequest::from_json).

use crate::error::PurchaseError;
use crate::types::{AccountId, CategoryTotals, TicketCategory, TicketTypeRequest};

/// Most tickets a single purchase may contain
pub const MAX_TICKETS_PER_PURCHASE: u64 = 20;

/// Validates the account id.
///
/// # Errors
///
/// Returns [`PurchaseError::InvalidAccount`] for negative ids.
pub fn validate_account(account_id: i64) -> Result<AccountId, PurchaseError> {
    AccountId::try_from(account_id)
}

/// Validates a batch of requests and returns its per-category totals.
///
/// # Errors
///
/// Returns the first violated rule: [`PurchaseError::EmptyRequest`],
/// [`PurchaseError::ZeroTickets`], [`PurchaseError::TooManyTickets`] or
/// [`PurchaseError::UnaccompaniedMinor`].
pub fn validate_requests(requests: &[TicketTypeRequest]) -> Result<CategoryTotals, PurchaseError> {
    if requests.is_empty() {
        return Err(PurchaseError::EmptyRequest);
    }

    let totals = CategoryTotals::from_requests(requests);
    validate_totals(&totals)?;
    Ok(totals)
}

/// Applies the quantity and accompaniment rules to aggregated totals.
///
/// # Errors
///
/// See [`validate_requests`].
pub fn validate_totals(totals: &CategoryTotals) -> Result<(), PurchaseError> {
    let requested = totals.total();

    if requested == 0 {
        return Err(PurchaseError::ZeroTickets);
    }

    if requested > MAX_TICKETS_PER_PURCHASE {
        return Err(PurchaseError::TooManyTickets {
            requested,
            max: MAX_TICKETS_PER_PURCHASE,
        });
    }

    // Each minor category is compared to adults on its own, not summed.
    let unaccompanied = TicketCategory::ALL
        .into_iter()
        .filter(|category| category.is_minor())
        .any(|category| totals[category] > totals.adults());

    if unaccompanied {
        return Err(PurchaseError::UnaccompaniedMinor {
            adults: totals.adults(),
            children: totals.children(),
            infants: totals.infants(),
        });
    }

    Ok(())
}
