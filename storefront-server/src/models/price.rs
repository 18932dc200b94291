//! Product price validation

use serde::Deserialize;

use super::ValidationError;

/// Largest value a NUMERIC(10,2) column can hold
const MAX_PRICE: f64 = 99_999_999.99;

/// Price as sent by a client: a JSON number or a decimal string like `"200.00"`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Number(f64),
    Text(String),
}

/// Validated product price (non-negative, at most two decimal places)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Price(f64);

impl Price {
    /// Create a new price.
    ///
    /// # Example
    /// ```
    /// use storefront_server::models::Price;
    ///
    /// assert!(Price::new(14.99).is_ok());
    /// assert!(Price::new(-1.0).is_err());
    /// assert!(Price::new(1.999).is_err());  // three decimals
    /// ```
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidFormat {
                field: "price",
                reason: "must be a decimal number",
            });
        }

        if value < 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "price",
                reason: "cannot be negative",
            });
        }

        if value > MAX_PRICE {
            return Err(ValidationError::InvalidFormat {
                field: "price",
                reason: "exceeds 99999999.99",
            });
        }

        let cents = value * 100.0;
        if (cents - cents.round()).abs() > 1e-6 {
            return Err(ValidationError::InvalidFormat {
                field: "price",
                reason: "at most two decimal places",
            });
        }

        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<RawPrice> for Price {
    type Error = ValidationError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        match raw {
            RawPrice::Number(value) => Self::new(value),
            RawPrice::Text(text) => {
                let value = text.trim().parse::<f64>().map_err(|_| {
                    ValidationError::InvalidFormat {
                        field: "price",
                        reason: "must be a decimal number",
                    }
                })?;
                Self::new(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_whole_and_cents() {
        assert_eq!(Price::new(90.0).unwrap().value(), 90.0);
        assert_eq!(Price::new(22.99).unwrap().value(), 22.99);
        assert!(Price::new(0.0).is_ok());
    }

    #[test]
    fn rejects_negative() {
        let err = Price::new(-0.01).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "price", .. }));
    }

    #[test]
    fn rejects_non_finite() {
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
    }

    #[test]
    fn rejects_overflowing_column() {
        assert!(Price::new(99_999_999.99).is_ok());
        assert!(Price::new(100_000_000.0).is_err());
    }

    #[test]
    fn rejects_sub_cent_precision() {
        assert!(Price::new(12.345).is_err());
    }

    #[test]
    fn reads_number_or_decimal_string() {
        let number: RawPrice = serde_json::from_str("200.0").unwrap();
        let text: RawPrice = serde_json::from_str(r#"" 200.00 ""#).unwrap();

        assert_eq!(Price::try_from(number).unwrap().value(), 200.0);
        assert_eq!(Price::try_from(text).unwrap().value(), 200.0);
    }

    #[test]
    fn rejects_non_numeric_string() {
        let err = Price::try_from(RawPrice::Text("cheap".into())).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFormat {
                field: "price",
                reason: "must be a decimal number",
            }
        );
        assert!(Price::try_from(RawPrice::Text("NaN".into())).is_err());
        assert!(Price::try_from(RawPrice::Text("1.999".into())).is_err());
    }
}
