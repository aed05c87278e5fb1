//! Validation of user-typed input before any store or bridge call.

use thiserror::Error;

/// Input rejected before reaching the store or the bridge.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter a valid product ID.")]
    MissingProductId,

    #[error("Please fill in both fields: product ID and quantity.")]
    MissingFields,

    #[error("Please enter a numeric value for the stock quantity (got '{0}').")]
    InvalidQuantity(String),

    #[error("Please enter a question.")]
    MissingQuestion,
}

/// A product ID, trimmed and non-empty.
pub fn product_id(raw: &str) -> Result<&str, InputError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(InputError::MissingProductId);
    }
    Ok(id)
}

/// A product ID and an integer quantity, both required.
pub fn stock_update<'a>(raw_id: &'a str, raw_quantity: &str) -> Result<(&'a str, i64), InputError> {
    let id = raw_id.trim();
    let quantity = raw_quantity.trim();

    if id.is_empty() || quantity.is_empty() {
        return Err(InputError::MissingFields);
    }

    let quantity = quantity
        .parse::<i64>()
        .map_err(|_| InputError::InvalidQuantity(quantity.to_string()))?;

    Ok((id, quantity))
}

/// A question with surrounding whitespace removed.
pub fn question(raw: &str) -> Result<&str, InputError> {
    let question = raw.trim();
    if question.is_empty() {
        return Err(InputError::MissingQuestion);
    }
    Ok(question)
}
