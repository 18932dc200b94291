//! Stock count validation

use super::ValidationError;

/// Stock assigned to a product created without an explicit count
pub const DEFAULT_STOCK: i32 = 10;

/// Validated stock count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock(i32);

impl Stock {
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::InvalidFormat {
                field: "stock",
                reason: "cannot be negative",
            });
        }

        let value = i32::try_from(value).map_err(|_| ValidationError::InvalidFormat {
            field: "stock",
            reason: "too large",
        })?;

        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self(DEFAULT_STOCK)
    }
}
