//! Name validation for categories, products and tags

use super::ValidationError;

/// Maximum length for entity names (matches the VARCHAR(255) columns)
const MAX_NAME_LEN: usize = 255;

/// Validated entity name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Name(String);

impl Name {
    /// Create a new name for the given field.
    ///
    /// # Rules
    /// - Non-empty (after trimming whitespace)
    /// - Max 255 characters
    ///
    /// # Example
    /// ```
    /// use storefront_server::models::Name;
    ///
    /// assert!(Name::new("category_name", "Shirts").is_ok());
    /// assert!(Name::new("category_name", "").is_err());
    /// assert!(Name::new("tag_name", "   ").is_err());  // whitespace only
    /// ```
    pub fn new(field: &'static str, s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        if trimmed.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field,
                max: MAX_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Validate an optional request field that must be present.
    pub fn required(field: &'static str, s: Option<&str>) -> Result<Self, ValidationError> {
        match s {
            Some(s) => Self::new(field, s),
            None => Err(ValidationError::Missing { field }),
        }
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_whitespace() {
        let name = Name::new("tag_name", "  rock music ").unwrap();
        assert_eq!(name.as_str(), "rock music");
    }

    #[test]
    fn rejects_empty() {
        let err = Name::new("category_name", "").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category_name" });
    }

    #[test]
    fn required_reports_missing_field() {
        let err = Name::required("product_name", None).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "product_name" });
    }

    #[test]
    fn max_length() {
        assert!(Name::new("tag_name", &"a".repeat(255)).is_ok());

        let err = Name::new("tag_name", &"a".repeat(256)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 255, .. }));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        assert!(Name::new("product_name", &"é".repeat(255)).is_ok());
    }
}
