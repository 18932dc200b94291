//! Row records and the nested shapes returned by the API

use serde::Serialize;
use sqlx::FromRow;

/// Category row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
}

/// Product row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub price: f64,
    pub stock: i32,
    pub category_id: Option<i32>,
}

/// Tag row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Tag {
    pub id: i32,
    pub tag_name: String,
}

/// Join record between a product and a tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct ProductTag {
    pub id: i32,
    pub product_id: i32,
    pub tag_id: i32,
}

/// Category with the products it owns
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

/// Product with its category and tags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// Tag with the products associated through the join table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagWithProducts {
    #[serde(flatten)]
    pub tag: Tag,
    pub products: Vec<Product>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn product_detail_flattens_row() {
        let detail = ProductDetail {
            product: Product {
                id: 1,
                product_name: "Plain T-Shirt".into(),
                price: 14.99,
                stock: 14,
                category_id: Some(1),
            },
            category: Some(Category {
                id: 1,
                category_name: "Shirts".into(),
            }),
            tags: vec![Tag {
                id: 6,
                tag_name: "white".into(),
            }],
        };

        assert_eq!(
            serde_json::to_value(&detail).unwrap(),
            json!({
                "id": 1,
                "product_name": "Plain T-Shirt",
                "price": 14.99,
                "stock": 14,
                "category_id": 1,
                "category": { "id": 1, "category_name": "Shirts" },
                "tags": [{ "id": 6, "tag_name": "white" }]
            })
        );
    }

    #[test]
    fn uncategorized_product_serializes_null() {
        let detail = ProductDetail {
            product: Product {
                id: 2,
                product_name: "Cargo Shorts".into(),
                price: 29.99,
                stock: 22,
                category_id: None,
            },
            category: None,
            tags: vec![],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert!(value["category_id"].is_null());
        assert!(value["category"].is_null());
    }
}
