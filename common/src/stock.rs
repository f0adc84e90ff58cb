use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::error::ValidationError;
use crate::product::{Product, ProductCategory, ProductId};

/// Body of the product creation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Money,
    pub category: ProductCategory,
    pub image: String,
    pub available: bool,
    pub stock: u32,
}

impl NewProduct {
    pub fn with_id(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            available: self.available,
            stock: self.stock,
        }
    }
}

/// Editable fields of a product, as text straight from the inputs.
///
/// Used both by the add-product screen and by inline editing in the stock
/// manager.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: Option<ProductCategory>,
    pub image: String,
    pub stock: String,
    pub available: bool,
}

impl Default for ProductForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: String::new(),
            category: None,
            image: String::new(),
            stock: String::new(),
            available: true,
        }
    }
}

impl ProductForm {
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            price: format!("{:.2}", product.price.as_reais()),
            category: Some(product.category.clone()),
            image: product.image.clone(),
            stock: product.stock.to_string(),
            available: product.available,
        }
    }

    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::ProductNameRequired);
        }
        let price = Money::parse(&self.price)
            .filter(|p| p.is_positive())
            .ok_or(ValidationError::InvalidPrice)?;
        let stock = parse_stock(&self.stock)?;
        let category = self
            .category
            .clone()
            .filter(|c| !c.wire_name().is_empty())
            .ok_or(ValidationError::CategoryRequired)?;
        Ok(NewProduct {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            price,
            category,
            image: self.image.trim().to_string(),
            available: self.available,
            stock,
        })
    }

    /// Validate and merge into an existing product, keeping its id.
    pub fn apply_to(&self, product: &Product) -> Result<Product, ValidationError> {
        Ok(self.validate()?.with_id(product.id.clone()))
    }
}

/// Parse a stock count typed by staff. Blank means zero.
pub fn parse_stock(raw: &str) -> Result<u32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>().map_err(|_| ValidationError::InvalidStock)
}

/// Count of products at or under the low-stock threshold.
pub fn low_stock_count(products: &[Product]) -> usize {
    products.iter().filter(|p| p.is_low_stock()).count()
}

/// Identity of a stock-table row. Changes whenever the stored count does, so
/// a row's stock input starts again from the fresh value.
pub fn row_key(product: &Product) -> String {
    format!("{}-{}", product.id, product.stock)
}
