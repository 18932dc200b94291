//! Database error type shared by the Postgres and in-memory stores

use sqlx::error::{DatabaseError, ErrorKind};

/// Constraint names declared in `migrations.rs`
pub(crate) const PRODUCT_CATEGORY_FK: &str = "product_category_fk";
pub(crate) const PRODUCT_TAG_PRODUCT_FK: &str = "product_tag_product_fk";
pub(crate) const PRODUCT_TAG_TAG_FK: &str = "product_tag_tag_fk";
pub(crate) const PRODUCT_TAG_PAIR_UNIQUE: &str = "product_tag_pair_unique";

pub(crate) const MISSING_CATEGORY: &str = "category_id does not reference an existing category";
pub(crate) const MISSING_TAG: &str = "tagIds contains an id with no matching tag";

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: i32 },

    /// A write was rejected by a table constraint
    #[error("constraint violation: {message}")]
    Constraint { message: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i32) -> Self {
        Self::NotFound { resource, id }
    }

    pub(crate) fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        let message = match &err {
            sqlx::Error::Database(db_err) => constraint_message(&**db_err),
            _ => None,
        };

        match message {
            Some(message) => Self::constraint(message),
            None => Self::Sqlx(err),
        }
    }
}

/// Client-facing description of a rejected write, or None for other failures.
fn constraint_message(db_err: &dyn DatabaseError) -> Option<&'static str> {
    let message = match db_err.kind() {
        ErrorKind::ForeignKeyViolation => match db_err.constraint() {
            Some(PRODUCT_CATEGORY_FK) => MISSING_CATEGORY,
            Some(PRODUCT_TAG_TAG_FK) => MISSING_TAG,
            Some(PRODUCT_TAG_PRODUCT_FK) => "product does not exist",
            _ => "referenced row does not exist",
        },
        ErrorKind::UniqueViolation => match db_err.constraint() {
            Some(PRODUCT_TAG_PAIR_UNIQUE) => "product already has this tag",
            _ => "value already exists",
        },
        ErrorKind::NotNullViolation => "required value is missing",
        ErrorKind::CheckViolation => "value is out of range",
        _ => match db_err.code().as_deref() {
            // numeric_value_out_of_range, string_data_right_truncation
            Some("22003") | Some("22001") => "value is out of range",
            _ => return None,
        },
    };

    Some(message)
}
