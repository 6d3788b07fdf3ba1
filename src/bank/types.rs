//! Types used throughout the banking system.

/// Decimal precision for monetary values.
/// This is used to convert floating-point values to fixed-point representation.
pub const DECIMAL_PRECISION: f64 = 10000.0;

/// Customer ID type, representing a unique identifier for a customer.
pub type CustomerId = u32;

/// Account number type, unique to one account.
pub type AccountNumber = u32;

/// Money type, representing a fixed-point monetary value.
pub type Money = i64;

/// Converts a fixed-point monetary value back to a decimal amount for display.
pub fn display_money(money: Money) -> f64 {
    money as f64 / DECIMAL_PRECISION
}
