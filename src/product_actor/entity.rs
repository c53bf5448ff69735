//! Entity trait implementation for the Product domain type.
//!
//! Products reach the category store through their context: a product is only
//! stored if its category exists. Status follows stock: a product that runs out
//! becomes `outOfStock`, and restocking makes it `available` again. A
//! discontinued product keeps its status whatever happens to its stock.
//!
//! On creation the submitted status is kept, except that an `available`
//! product with no stock is stored as `outOfStock`.
//!
//! See the trait implementation on [`Product`] for method documentation.

use super::actions::{ProductAction, ProductActionResult};
use crate::clients::CategoryClient;
use crate::framework::ActorEntity;
use crate::model::{NewProduct, Product, ProductId, ProductStatus, ProductUpdate};
use async_trait::async_trait;

impl Product {
    fn mark_empty_stock(&mut self) {
        if self.status == ProductStatus::Available && self.inventory_quantity == 0 {
            self.status = ProductStatus::OutOfStock;
        }
    }

    fn sync_status(&mut self) {
        self.status = match (self.status, self.inventory_quantity) {
            (ProductStatus::Available, 0) => ProductStatus::OutOfStock,
            (ProductStatus::OutOfStock, n) if n > 0 => ProductStatus::Available,
            (status, _) => status,
        };
    }
}

fn check_price(price: f64) -> Result<(), String> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(format!("Invalid price: {price}"))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = NewProduct;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = CategoryClient;

    fn assign_id(seq: u64, _params: &NewProduct) -> ProductId {
        ProductId(seq)
    }

    fn from_create_params(id: ProductId, params: NewProduct) -> Result<Self, String> {
        check_price(params.price)?;
        let mut product = Self::new(id, params);
        product.mark_empty_stock();
        Ok(product)
    }

    /// Rejects products whose category is not in the catalog.
    async fn on_create(&mut self, categories: &CategoryClient) -> Result<(), String> {
        match categories.find(self.category.clone()).await {
            Ok(Some(_)) => Ok(()),
            Ok(None) => Err(format!("Unknown category: {}", self.category)),
            Err(e) => Err(format!("Category lookup failed: {e}")),
        }
    }

    /// # Fields Updated
    /// - `price`: must be finite and non-negative
    /// - `inventory_quantity`: status follows the new stock level
    /// - `status`: an explicit status wins over the stock rule
    async fn on_update(&mut self, update: ProductUpdate, _ctx: &CategoryClient) -> Result<(), String> {
        if let Some(price) = update.price {
            check_price(price)?;
            self.price = price;
        }
        if let Some(quantity) = update.inventory_quantity {
            self.inventory_quantity = quantity;
            self.sync_status();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &CategoryClient,
    ) -> Result<ProductActionResult, String> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::CheckStock(self.inventory_quantity)),
            ProductAction::ReserveStock(quantity) => {
                if self.status == ProductStatus::Discontinued {
                    return Err(format!("Product {} is discontinued", self.id));
                }
                if quantity > self.inventory_quantity {
                    return Err(format!(
                        "Insufficient stock: requested {}, available {}",
                        quantity, self.inventory_quantity
                    ));
                }
                self.inventory_quantity -= quantity;
                self.sync_status();
                Ok(ProductActionResult::ReserveStock(self.inventory_quantity))
            }
            ProductAction::Restock(quantity) => {
                self.inventory_quantity = self
                    .inventory_quantity
                    .checked_add(quantity)
                    .ok_or_else(|| format!("Restocking {quantity} units overflows stock"))?;
                self.sync_status();
                Ok(ProductActionResult::Restock(self.inventory_quantity))
            }
        }
    }
}
