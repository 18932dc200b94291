//! Validated write inputs handed to the store

use super::{Name, Price, Stock, TagIds};

/// A product to insert, with the tags to associate
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: Name,
    pub price: Price,
    pub stock: Stock,
    pub category_id: Option<i32>,
    pub tag_ids: TagIds,
}

/// Partial product update.
///
/// `None` leaves a field as stored. `category_id: Some(None)` clears the
/// category. `tag_ids: Some(_)` replaces the product's tag set, including with
/// an empty one.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub product_name: Option<Name>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub category_id: Option<Option<i32>>,
    pub tag_ids: Option<TagIds>,
}

impl ProductChanges {
    /// True when no column of the product row itself changes.
    pub fn leaves_row_untouched(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_only_update_leaves_row_untouched() {
        let changes = ProductChanges {
            tag_ids: Some(TagIds::default()),
            ..Default::default()
        };
        assert!(changes.leaves_row_untouched());
    }

    #[test]
    fn clearing_category_touches_row() {
        let changes = ProductChanges {
            category_id: Some(None),
            ..Default::default()
        };
        assert!(!changes.leaves_row_untouched());
    }
}
