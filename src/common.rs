//! Money helpers shared by handlers and services
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use validator::ValidationError;

/// Every amount and balance carries exactly this many fractional digits.
pub const MONEY_SCALE: u32 = 2;

/// Largest amount or balance accepted; fifteen significant digits survive a
/// float-backed storage engine unchanged.
pub const MAX_MONEY: Decimal = dec!(9999999999999.99);

/// Brings a decimal to scale 2 (`1500` -> `1500.00`).
///
/// Values already at or below two fractional digits are unchanged in value;
/// anything finer (e.g. float noise from a storage engine without a native
/// decimal type) is rounded half away from zero.
pub fn to_money(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(MONEY_SCALE);
    rounded
}

/// True when `value` needs no more than two fractional digits.
pub fn has_money_scale(value: &Decimal) -> bool {
    value.normalize().scale() <= MONEY_SCALE
}

/// Transaction amounts: strictly positive, cent precision.
pub fn validate_amount(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.is_sign_negative() || amount.is_zero() {
        let mut err = ValidationError::new("amount_not_positive");
        err.message = Some("Amount must be greater than 0".into());
        return Err(err);
    }
    if !has_money_scale(amount) {
        let mut err = ValidationError::new("amount_scale");
        err.message = Some("Amount must have at most 2 decimal places".into());
        return Err(err);
    }
    if *amount > MAX_MONEY {
        let mut err = ValidationError::new("amount_too_large");
        err.message = Some(format!("Amount must not exceed {}", MAX_MONEY).into());
        return Err(err);
    }
    Ok(())
}

/// Opening balances: zero or more, cent precision.
pub fn validate_opening_balance(balance: &Decimal) -> Result<(), ValidationError> {
    if balance.is_sign_negative() && !balance.is_zero() {
        let mut err = ValidationError::new("balance_negative");
        err.message = Some("Balance cannot be negative".into());
        return Err(err);
    }
    if !has_money_scale(balance) {
        let mut err = ValidationError::new("balance_scale");
        err.message = Some("Balance must have at most 2 decimal places".into());
        return Err(err);
    }
    if *balance > MAX_MONEY {
        let mut err = ValidationError::new("balance_too_large");
        err.message = Some(format!("Balance must not exceed {}", MAX_MONEY).into());
        return Err(err);
    }
    Ok(())
}
