//! Domain types for ticket purchases.

use crate::error::PurchaseError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;
use thiserror::Error;

/// Kind of ticket. The set is fixed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TicketCategory {
    /// Adult ticket
    Adult,
    /// Child ticket
    Child,
    /// Infant ticket
    Infant,
}

impl TicketCategory {
    /// Every category, in bucket order
    pub const ALL: [Self; 3] = [Self::Adult, Self::Child, Self::Infant];

    /// Upper-case name of the category
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Adult => "ADULT",
            Self::Child => "CHILD",
            Self::Infant => "INFANT",
        }
    }

    /// Whether a ticket of this category must be accompanied by an adult
    #[must_use]
    pub const fn is_minor(self) -> bool {
        !matches!(self, Self::Adult)
    }

    const fn bucket(self) -> usize {
        match self {
            Self::Adult => 0,
            Self::Child => 1,
            Self::Infant => 2,
        }
    }
}

impl fmt::Display for TicketCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Text that does not name a ticket category
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown ticket category `{0}`")]
pub struct ParseCategoryError(pub String);

impl From<ParseCategoryError> for PurchaseError {
    fn from(err: ParseCategoryError) -> Self {
        Self::UnknownCategory {
            index: None,
            value: err.0,
        }
    }
}

impl FromStr for TicketCategory {
    type Err = ParseCategoryError;

    /// Case-insensitive: `adult`, `Adult` and `ADULT` all parse to [`TicketCategory::Adult`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for TicketCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A request for `count` tickets of one category.
///
/// Immutable once built. The count is non-negative by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TicketTypeRequest {
    category: TicketCategory,
    count: u32,
}

impl TicketTypeRequest {
    /// Creates a request from already-typed parts
    #[must_use]
    pub const fn new(category: TicketCategory, count: u32) -> Self {
        Self { category, count }
    }

    /// Checked factory for loosely-typed input.
    ///
    /// # Errors
    ///
    /// Returns [`PurchaseError::UnknownCategory`] if `category` is not a known
    /// category name, and [`PurchaseError::InvalidCount`] if `count` is
    /// negative or does not fit a ticket count. The category is checked first.
    pub fn parse(category: &str, count: i64) -> Result<Self, PurchaseError> {
        let category = category.parse::<TicketCategory>()?;
        Ok(Self::new(category, checked_count(count)?))
    }

    /// The requested category
    #[must_use]
    pub const fn category(&self) -> TicketCategory {
        self.category
    }

    /// Number of tickets requested
    #[must_use]
    pub const fn count(&self) -> u32 {
        self.count
    }
}

pub(crate) fn checked_count(count: i64) -> Result<u32, PurchaseError> {
    u32::try_from(count).map_err(|_| PurchaseError::InvalidCount {
        index: None,
        value: count.to_string(),
    })
}

/// Validated account identifier. Always non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(u64);

impl AccountId {
    /// Creates an `AccountId` from an unsigned id
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the inner id
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for AccountId {
    type Error = PurchaseError;

    fn try_from(id: i64) -> Result<Self, Self::Error> {
        u64::try_from(id)
            .map(Self)
            .map_err(|_| PurchaseError::InvalidAccount)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount in whole currency units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Creates a `Money` amount from whole units
    #[must_use]
    pub const fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Returns the amount in whole units
    #[must_use]
    pub const fn units(&self) -> u64 {
        self.0
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ticket counts summed per category across a whole batch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CategoryTotals([u64; 3]);

impl CategoryTotals {
    /// Sums every request into its category bucket
    #[must_use]
    pub fn from_requests(requests: &[TicketTypeRequest]) -> Self {
        requests.iter().fold(Self::default(), |mut totals, request| {
            totals.add(request);
            totals
        })
    }

    /// Adds one request to its bucket
    pub fn add(&mut self, request: &TicketTypeRequest) {
        let bucket = &mut self.0[request.category().bucket()];
        *bucket = bucket.saturating_add(u64::from(request.count()));
    }

    /// Adult tickets
    #[must_use]
    pub const fn adults(&self) -> u64 {
        self.0[0]
    }

    /// Child tickets
    #[must_use]
    pub const fn children(&self) -> u64 {
        self.0[1]
    }

    /// Infant tickets
    #[must_use]
    pub const fn infants(&self) -> u64 {
        self.0[2]
    }

    /// Tickets across all categories
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0, |sum, count| sum.saturating_add(*count))
    }
}

impl Index<TicketCategory> for CategoryTotals {
    type Output = u64;

    fn index(&self, category: TicketCategory) -> &u64 {
        &self.0[category.bucket()]
    }
}

/// Input to a purchase: the account and its ticket requests, in order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PurchaseRequest {
    /// Account to charge; validated when the purchase runs
    pub account_id: i64,
    /// Ticket requests in the order supplied
    pub requests: Vec<TicketTypeRequest>,
}

impl PurchaseRequest {
    /// Creates a new purchase request
    #[must_use]
    pub const fn new(account_id: i64, requests: Vec<TicketTypeRequest>) -> Self {
        Self {
            account_id,
            requests,
        }
    }
}

/// Result of a successful purchase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PurchaseOutcome {
    /// Account that was charged
    pub account_id: AccountId,
    /// Amount passed to the payment service
    pub total_price: Money,
    /// Seats passed to the reservation service
    pub total_seats: u64,
    /// Per-category ticket counts
    pub totals: CategoryTotals,
}
