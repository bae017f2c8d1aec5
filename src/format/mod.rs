//! Text formatting primitives for contract language.
//!
//! Every formatter here is total: invalid or missing input produces an
//! empty string (or a documented placeholder) instead of an error.

mod address;
mod currency;
mod date;
mod words;

pub use address::{format_address, join_non_empty};
pub use currency::{format_amount, format_price};
pub use date::{
    format_contract_date, format_date, format_signature_date, ordinal_suffix, parse_date,
    signature_phrase, DateMode,
};
pub use words::{format_price_words, number_to_words};

/// Visible stand-in for a value the record does not have.
pub const PLACEHOLDER: &str = "________";

/// Return `value`, or [`PLACEHOLDER`] when it is blank.
pub fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() {
        PLACEHOLDER
    } else {
        value
    }
}
