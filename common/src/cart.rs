use serde::{Deserialize, Serialize};

use crate::currency::Money;
use crate::error::ValidationError;
use crate::product::{Product, ProductId};

/// One cart line. Lives only on the client until checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartItem {
    pub fn subtotal(&self) -> Money {
        self.product.price * self.quantity
    }
}

/// The student's cart, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add one unit of `product`, merging with an existing line.
    pub fn add(&mut self, product: &Product) -> Result<u32, ValidationError> {
        if !product.is_orderable() {
            return Err(ValidationError::OutOfStock {
                product: product.name.clone(),
            });
        }
        match self.items.iter_mut().find(|i| i.product.id == product.id) {
            Some(item) => {
                if item.quantity >= product.stock {
                    return Err(ValidationError::StockExceeded {
                        product: product.name.clone(),
                        available: product.stock,
                    });
                }
                // Refresh the snapshot so price and stock follow the catalog.
                item.product = product.clone();
                item.quantity += 1;
                Ok(item.quantity)
            }
            None => {
                self.items.push(CartItem {
                    product: product.clone(),
                    quantity: 1,
                });
                Ok(1)
            }
        }
    }

    /// Set the quantity of a line; zero removes it.
    pub fn update_quantity(
        &mut self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<(), ValidationError> {
        if quantity == 0 {
            self.remove(product_id);
            return Ok(());
        }
        if let Some(item) = self.items.iter_mut().find(|i| &i.product.id == product_id) {
            if quantity > item.product.stock {
                return Err(ValidationError::StockExceeded {
                    product: item.product.name.clone(),
                    available: item.product.stock,
                });
            }
            item.quantity = quantity;
        }
        Ok(())
    }

    pub fn remove(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product.id != product_id);
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn total(&self) -> Money {
        self.items.iter().map(CartItem::subtotal).sum()
    }

    /// Number of units across all lines (the badge on the cart tab).
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.items
            .iter()
            .find(|i| &i.product.id == product_id)
            .map(|i| i.quantity)
            .unwrap_or(0)
    }
}
