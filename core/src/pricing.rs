//! Fixed price and seat policy per ticket category.

use crate::types::{CategoryTotals, Money, TicketCategory};

const ADULT_PRICE: u64 = 20;
const CHILD_PRICE: u64 = 10;
const INFANT_PRICE: u64 = 0;

const fn unit_price(category: TicketCategory) -> u64 {
    match category {
        TicketCategory::Adult => ADULT_PRICE,
        TicketCategory::Child => CHILD_PRICE,
        TicketCategory::Infant => INFANT_PRICE,
    }
}

// Infants sit on an accompanying adult's lap.
const fn occupies_seat(category: TicketCategory) -> bool {
    !matches!(category, TicketCategory::Infant)
}

/// Price of every ticket in the batch.
///
/// Only called on validated totals, which are bounded by the per-purchase
/// ticket limit.
pub(crate) fn total_price(totals: &CategoryTotals) -> Money {
    TicketCategory::ALL
        .into_iter()
        .map(|category| Money::from_units(unit_price(category) * totals[category]))
        .sum()
}

/// Seats needed for the batch.
pub(crate) fn total_seats(totals: &CategoryTotals) -> u64 {
    TicketCategory::ALL
        .into_iter()
        .filter(|category| occupies_seat(*category))
        .map(|category| totals[category])
        .sum()
}
