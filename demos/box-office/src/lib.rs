//! Box office: a command-line host for cinema ticket purchases.
//!
//! Reads purchase requests as JSON, either a single object or an array of
//! them, runs each one through a [`TicketService`], and writes one
//! [`Receipt`] line per purchase.
//!
//! ```text
//! $ echo '{"account_id":1,"requests":[{"category":"ADULT","count":2}]}' | box-office
//! {"status":"accepted","account_id":1,"total_price":40,"total_seats":2}
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod receipt;

pub use config::{Config, ConfigError};
pub use receipt::Receipt;

use cinema_tickets_core::{PurchaseError, TicketService};
use serde_json::Value;
use std::io::{self, Write};

/// Split input text into individual purchase requests.
///
/// A top-level array is a list of purchases; anything else is one purchase.
///
/// # Errors
///
/// Returns [`PurchaseError::MalformedRequest`] if the text is not JSON.
pub fn split_purchases(input: &str) -> Result<Vec<Value>, PurchaseError> {
    match serde_json::from_str(input) {
        Ok(Value::Array(purchases)) => Ok(purchases),
        Ok(purchase) => Ok(vec![purchase]),
        Err(err) => {
            tracing::debug!(error = %err, "Input is not JSON");
            Err(PurchaseError::MalformedRequest { index: None })
        }
    }
}

/// Run every purchase in `input` and write a receipt line for each to `out`.
///
/// Returns `true` if every purchase was accepted.
///
/// # Errors
///
/// Returns error only if writing to `out` fails.
pub fn run<W: Write>(service: &TicketService, input: &str, out: &mut W) -> io::Result<bool> {
    let results = match split_purchases(input) {
        Ok(purchases) => purchases
            .iter()
            .map(|purchase| service.purchase_json(purchase))
            .collect(),
        Err(error) => vec![Err(error)],
    };

    let mut all_accepted = true;
    for result in &results {
        let receipt = Receipt::from(result);
        all_accepted &= receipt.is_accepted();
        serde_json::to_writer(&mut *out, &receipt)?;
        writeln!(out)?;
    }

    tracing::info!(
        purchases = results.len(),
        all_accepted,
        "Box office run complete"
    );
    Ok(all_accepted)
}
