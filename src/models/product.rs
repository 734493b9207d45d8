use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::Category;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of both create and update; fields the client omits are left alone.
///
/// Nullable columns use `Option<Option<T>>`: `None` when the key is absent,
/// `Some(None)` when the client sent an explicit `null` to clear the column.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    pub image: Option<Option<String>>,
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "nullable")]
    pub category_id: Option<Option<i32>>,
}

fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct ProductWithCategory {
    #[serde(flatten)]
    pub product: Product,
    pub category: Option<Category>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn product_with_category_flattens_the_row() {
        let now = Utc::now();
        let product = Product {
            id: 3,
            name: "Taza".to_string(),
            price: Decimal::from_str("12.50").unwrap(),
            description: None,
            image: None,
            stock: 4,
            category_id: Some(1),
            created_at: now,
            updated_at: now,
        };
        let category = Category {
            id: 1,
            name: "Cocina".to_string(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_value(ProductWithCategory {
            product,
            category: Some(category),
        })
        .unwrap();

        assert_eq!(json["name"], "Taza");
        assert_eq!(json["price"], 12.5);
        assert_eq!(json["categoryId"], 1);
        assert_eq!(json["category"]["name"], "Cocina");
    }

    #[test]
    fn request_accepts_numeric_price_and_ignores_unknown_fields() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"name": "Taza", "price": 9.99, "color": "rojo"}"#).unwrap();
        assert_eq!(req.price, Some(Decimal::from_str("9.99").unwrap()));
        assert!(req.category_id.is_none());
    }

    #[test]
    fn explicit_null_differs_from_absent_key() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"description": null, "categoryId": null, "image": "a.png"}"#)
                .unwrap();

        assert_eq!(req.description, Some(None));
        assert_eq!(req.category_id, Some(None));
        assert_eq!(req.image, Some(Some("a.png".to_string())));
        assert!(req.name.is_none());
    }

    #[test]
    fn price_keeps_every_decimal_sent() {
        let req: ProductRequest =
            serde_json::from_str(r#"{"name": "Taza", "price": 9.999}"#).unwrap();
        assert_eq!(req.price, Some(Decimal::from_str("9.999").unwrap()));

        let req: ProductRequest =
            serde_json::from_str(r#"{"name": "Yate", "price": 1.0e11}"#).unwrap();
        assert_eq!(req.price, Some(Decimal::from(100_000_000_000_i64)));
    }
}
