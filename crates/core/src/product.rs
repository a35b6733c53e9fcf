//! Catalog product types.
//!
//! - [`Product`] - a stored catalog entry
//! - [`ProductDraft`] - the loosely-typed create request as received on the wire
//! - [`NewProduct`] - a draft that passed validation and can be persisted

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{
    Price, PriceError, ProductId, ProductType, Quantity, QuantityError, UnknownProductType,
};

/// Maximum length of free-text product fields (name, sku).
pub const MAX_FIELD_LENGTH: usize = 200;

/// Maximum length of a product description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// A stored catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[cfg_attr(feature = "openapi", schema(value_type = i32))]
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub sku: String,
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[cfg_attr(feature = "openapi", schema(value_type = i32, minimum = 0))]
    pub quantity: Quantity,
    #[cfg_attr(feature = "openapi", schema(value_type = f64, minimum = 0))]
    pub price: Price,
}

/// Errors produced while validating a [`ProductDraft`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductValidationError {
    /// A required field is absent or blank.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A text field exceeds its length limit.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Offending field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },

    /// The category is not one of the fixed product types.
    #[error(transparent)]
    UnknownType(#[from] UnknownProductType),

    /// The quantity is out of range.
    #[error(transparent)]
    Quantity(#[from] QuantityError),

    /// The price does not fit the stored precision or range.
    #[error(transparent)]
    Price(PriceError),

    /// The price is zero or negative.
    #[error("price must be greater than 0")]
    PriceNotPositive,
}

/// A product create request before validation.
///
/// Every field is optional so that a missing field produces a precise
/// validation message rather than a generic deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, alias = "image_url", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<f64>))]
    pub price: Option<Decimal>,
}

impl ProductDraft {
    /// Validate the draft into a [`NewProduct`].
    ///
    /// Text fields are trimmed; blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure found, checking fields in the
    /// order name, type, sku, quantity, price, then optional fields.
    pub fn validate(self) -> Result<NewProduct, ProductValidationError> {
        let name = required_text(self.name, "name", MAX_FIELD_LENGTH)?;
        let product_type = required_text(self.product_type, "type", MAX_FIELD_LENGTH)?
            .parse::<ProductType>()?;
        let sku = required_text(self.sku, "sku", MAX_FIELD_LENGTH)?;

        let quantity = Quantity::new(
            self.quantity
                .ok_or(ProductValidationError::MissingField("quantity"))?,
        )?;

        let price = self
            .price
            .ok_or(ProductValidationError::MissingField("price"))
            .and_then(|amount| {
                Price::new(amount).map_err(|e| match e {
                    PriceError::Negative => ProductValidationError::PriceNotPositive,
                    other => ProductValidationError::Price(other),
                })
            })?;
        if !price.is_positive() {
            return Err(ProductValidationError::PriceNotPositive);
        }

        let image_url = optional_text(self.image_url, "imageUrl", MAX_FIELD_LENGTH * 10)?;
        let description = optional_text(self.description, "description", MAX_DESCRIPTION_LENGTH)?;

        Ok(NewProduct {
            name,
            product_type,
            sku,
            image_url,
            description,
            quantity,
            price,
        })
    }
}

/// A validated product ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub product_type: ProductType,
    pub sku: String,
    pub image_url: Option<String>,
    pub description: Option<String>,
    pub quantity: Quantity,
    pub price: Price,
}

impl NewProduct {
    /// Attach a storage-assigned id, producing the stored record.
    #[must_use]
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            product_type: self.product_type,
            sku: self.sku,
            image_url: self.image_url,
            description: self.description,
            quantity: self.quantity,
            price: self.price,
        }
    }
}

fn required_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<String, ProductValidationError> {
    optional_text(value, field, max)?.ok_or(ProductValidationError::MissingField(field))
}

fn optional_text(
    value: Option<String>,
    field: &'static str,
    max: usize,
) -> Result<Option<String>, ProductValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ProductValidationError::TooLong { field, max });
    }
    Ok(Some(trimmed.to_owned()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft {
            name: Some("Laptop Dell XPS 13".to_owned()),
            product_type: Some("Electronics".to_owned()),
            sku: Some("LAP-DELL-XPS13-001".to_owned()),
            image_url: Some("https://example.com/laptop.jpg".to_owned()),
            description: None,
            quantity: Some(15),
            price: Some(Decimal::new(129_999, 2)),
        }
    }

    #[test]
    fn test_valid_draft() {
        let product = draft().validate().unwrap();
        assert_eq!(product.product_type, ProductType::Electronics);
        assert_eq!(product.quantity.get(), 15);
        assert_eq!(product.description, None);
    }

    #[test]
    fn test_missing_fields() {
        let mut d = draft();
        d.name = Some("   ".to_owned());
        assert_eq!(
            d.validate(),
            Err(ProductValidationError::MissingField("name"))
        );

        let mut d = draft();
        d.sku = None;
        assert_eq!(d.validate(), Err(ProductValidationError::MissingField("sku")));

        let mut d = draft();
        d.quantity = None;
        assert_eq!(
            d.validate(),
            Err(ProductValidationError::MissingField("quantity"))
        );
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let mut d = draft();
        d.quantity = Some(-1);
        assert_eq!(
            d.validate(),
            Err(ProductValidationError::Quantity(QuantityError::Negative))
        );
    }

    #[test]
    fn test_non_positive_price_rejected() {
        for amount in [Decimal::ZERO, Decimal::new(-500, 2)] {
            let mut d = draft();
            d.price = Some(amount);
            assert_eq!(d.validate(), Err(ProductValidationError::PriceNotPositive));
        }
    }

    #[test]
    fn test_price_must_fit_storage() {
        let mut d = draft();
        d.price = Some(Decimal::new(1, 3));
        assert_eq!(
            d.validate(),
            Err(ProductValidationError::Price(PriceError::TooPrecise))
        );

        let mut d = draft();
        d.price = Some(Decimal::new(10_000_000_000, 0));
        assert_eq!(
            d.validate(),
            Err(ProductValidationError::Price(PriceError::TooLarge))
        );

        let mut d = draft();
        d.price = Some(Decimal::new(1, 2));
        assert_eq!(d.validate().unwrap().price.amount(), Decimal::new(1, 2));
    }

    #[test]
    fn test_unknown_type_rejected() {
        let mut d = draft();
        d.product_type = Some("Gadgets".to_owned());
        assert!(matches!(
            d.validate(),
            Err(ProductValidationError::UnknownType(_))
        ));
    }

    #[test]
    fn test_draft_accepts_both_image_url_spellings() {
        let camel: ProductDraft =
            serde_json::from_str(r#"{"imageUrl": "https://a/b.png"}"#).unwrap();
        let snake: ProductDraft =
            serde_json::from_str(r#"{"image_url": "https://a/b.png"}"#).unwrap();
        assert_eq!(camel.image_url, snake.image_url);
    }

    #[test]
    fn test_product_json_shape() {
        let product = draft().validate().unwrap().into_product(ProductId::new(3));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["type"], "Electronics");
        assert_eq!(json["imageUrl"], "https://example.com/laptop.jpg");
        assert_eq!(json["price"], 1299.99);
        assert!(json.get("description").is_none());
    }
}
