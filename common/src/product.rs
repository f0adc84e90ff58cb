use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::currency::Money;
use crate::identity::EntityId;

pub type ProductId = EntityId;

/// Stock at or below this level is flagged in the stock manager.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// Menu section a product is listed under.
///
/// The wire names are the backend's own labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProductCategory {
    Savory,
    Snacks,
    Drinks,
    Desserts,
    Other(String),
}

impl ProductCategory {
    /// Categories offered when creating or editing a product.
    pub fn all() -> &'static [ProductCategory] {
        &[
            ProductCategory::Savory,
            ProductCategory::Snacks,
            ProductCategory::Drinks,
            ProductCategory::Desserts,
        ]
    }

    pub fn wire_name(&self) -> &str {
        match self {
            ProductCategory::Savory => "Salgados",
            ProductCategory::Snacks => "Lanches",
            ProductCategory::Drinks => "Bebidas",
            ProductCategory::Desserts => "Sobremesas",
            ProductCategory::Other(name) => name,
        }
    }

    pub fn from_wire(name: &str) -> Self {
        match name {
            "Salgados" => ProductCategory::Savory,
            "Lanches" => ProductCategory::Snacks,
            "Bebidas" => ProductCategory::Drinks,
            "Sobremesas" => ProductCategory::Desserts,
            other => ProductCategory::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ProductCategory::Savory => "Savory",
            ProductCategory::Snacks => "Snacks",
            ProductCategory::Drinks => "Drinks",
            ProductCategory::Desserts => "Desserts",
            ProductCategory::Other(name) => name,
        }
    }
}

impl Default for ProductCategory {
    fn default() -> Self {
        ProductCategory::Other(String::new())
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for ProductCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_name())
    }
}

impl<'de> Deserialize<'de> for ProductCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProductCategory::from_wire(&raw))
    }
}

/// A menu item as the backend describes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Money,
    #[serde(default)]
    pub category: ProductCategory,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub stock: u32,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// Whether a student can put this product in the cart.
    pub fn is_orderable(&self) -> bool {
        self.available && self.stock > 0
    }

    pub fn is_low_stock(&self) -> bool {
        self.stock <= LOW_STOCK_THRESHOLD
    }
}

/// Category selector of the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(ProductCategory),
}

impl CategoryFilter {
    /// The tabs shown above the catalog.
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(ProductCategory::all().iter().cloned().map(CategoryFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All",
            CategoryFilter::Only(category) => category.label(),
        }
    }

    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => &product.category == category,
        }
    }
}

/// Catalog view: category tab plus free-text search over name and description.
pub fn filter_catalog<'a>(
    products: &'a [Product],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| category.matches(p))
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Stock manager search over name and category.
pub fn search_stock<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    let needle = query.trim().to_lowercase();
    products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.category.wire_name().to_lowercase().contains(&needle)
                || p.category.label().to_lowercase().contains(&needle)
        })
        .collect()
}
