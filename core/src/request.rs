//! Boundary parser for loosely-typed purchase requests.
//!
//! Accepts JSON shaped like
//!
//! ```json
//! { "account_id": 1, "requests": [ { "category": "ADULT", "count": 2 } ] }
//! ```
//!
//! and turns it into a typed [`PurchaseRequest`]. Element checks run in three
//! passes over the whole batch (shape, then category, then count) so a
//! malformed element anywhere wins over a bad category elsewhere, and a bad
//! category anywhere wins over a bad count.

use crate::error::PurchaseError;
use crate::types::{checked_count, PurchaseRequest, TicketCategory, TicketTypeRequest};
use serde_json::{Map, Value};

const ACCOUNT_ID: &str = "account_id";
const REQUESTS: &str = "requests";
const CATEGORY: &str = "category";
const COUNT: &str = "count";

impl PurchaseRequest {
    /// Parses a purchase request from JSON text.
    ///
    /// # Errors
    ///
    /// Text that is not JSON fails with [`PurchaseError::MalformedRequest`];
    /// otherwise see [`PurchaseRequest::from_json`].
    pub fn from_json_str(input: &str) -> Result<Self, PurchaseError> {
        let value: Value = serde_json::from_str(input)
            .map_err(|_| PurchaseError::MalformedRequest { index: None })?;
        Self::from_json(&value)
    }

    /// Parses a purchase request from an untyped JSON value.
    ///
    /// # Errors
    ///
    /// - [`PurchaseError::InvalidAccount`]: `account_id` missing, not a whole number, or negative
    /// - [`PurchaseError::EmptyRequest`]: `requests` missing, not an array, or empty
    /// - [`PurchaseError::MalformedRequest`]: an element is not an object with `category` and `count`
    /// - [`PurchaseError::UnknownCategory`]: an element's category is not a known name
    /// - [`PurchaseError::InvalidCount`]: an element's count is not a non-negative whole number
    pub fn from_json(value: &Value) -> Result<Self, PurchaseError> {
        let account_id = value
            .get(ACCOUNT_ID)
            .and_then(whole_number)
            .filter(|id| *id >= 0)
            .ok_or(PurchaseError::InvalidAccount)?;

        let elements = match value.get(REQUESTS).and_then(Value::as_array) {
            Some(elements) if !elements.is_empty() => elements,
            _ => return Err(PurchaseError::EmptyRequest),
        };

        let shaped = elements
            .iter()
            .enumerate()
            .map(|(index, element)| shape(element).map_err(|err| err.at(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let categories = shaped
            .iter()
            .enumerate()
            .map(|(index, (category, _))| parse_category(category).map_err(|err| err.at(index)))
            .collect::<Result<Vec<_>, _>>()?;

        let requests = shaped
            .iter()
            .zip(categories)
            .enumerate()
            .map(|(index, ((_, count), category))| {
                parse_count(count)
                    .map(|count| TicketTypeRequest::new(category, count))
                    .map_err(|err| err.at(index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::new(account_id, requests))
    }
}

/// Integer value of a JSON number, including whole numbers written in float
/// form such as `2.0`, `1e0` or `-0`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        let float = value.as_f64().filter(|float| float.fract() == 0.0)?;
        // `i64::MAX as f64` rounds up to 2^63, which is itself out of range.
        (float >= i64::MIN as f64 && float < i64::MAX as f64).then(|| float as i64)
    })
}

fn shape(element: &Value) -> Result<(&Value, &Value), PurchaseError> {
    let malformed = PurchaseError::MalformedRequest { index: None };
    let fields: &Map<String, Value> = element.as_object().ok_or(malformed.clone())?;

    match (fields.get(CATEGORY), fields.get(COUNT)) {
        (Some(category), Some(count)) => Ok((category, count)),
        _ => Err(malformed),
    }
}

fn parse_category(category: &Value) -> Result<TicketCategory, PurchaseError> {
    match category.as_str() {
        Some(name) => Ok(name.parse::<TicketCategory>()?),
        None => Err(PurchaseError::UnknownCategory {
            index: None,
            value: category.to_string(),
        }),
    }
}

fn parse_count(count: &Value) -> Result<u32, PurchaseError> {
    match whole_number(count) {
        Some(count) => checked_count(count),
        None => Err(PurchaseError::InvalidCount {
            index: None,
            value: count.to_string(),
        }),
    }
}
