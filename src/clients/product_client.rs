//! # Product Client
//!
//! High-level API for the Product actor. Wraps a `ResourceClient<Product>` and
//! exposes catalog operations, and serves as the [`ProductStore`] that form
//! submissions persist to.
use crate::clients::actor_client::ActorClient;
use crate::form::ProductStore;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{NewProduct, Product, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, product), fields(sku = %product.sku))]
    pub async fn create_product(&self, product: NewProduct) -> Result<ProductId, ProductError> {
        debug!(?product, "create_product called");
        self.inner.create(product).await.map_err(ProductError::from)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(ProductError::from)
    }

    /// Current stock level.
    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self.inner.perform_action(id, ProductAction::CheckStock).await? {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Takes `quantity` units out of stock and returns what is left.
    #[instrument(skip(self))]
    pub async fn reserve_stock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Reserving stock");
        match self
            .inner
            .perform_action(id, ProductAction::ReserveStock(quantity))
            .await?
        {
            ProductActionResult::ReserveStock(left) => Ok(left),
            other => Err(unexpected(other)),
        }
    }

    /// Adds `quantity` units to stock and returns the new level.
    #[instrument(skip(self))]
    pub async fn restock(&self, id: ProductId, quantity: u32) -> Result<u32, ProductError> {
        debug!("Restocking");
        match self
            .inner
            .perform_action(id, ProductAction::Restock(quantity))
            .await?
        {
            ProductActionResult::Restock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("mismatched action result: {result:?}"))
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        ProductError::from(e)
    }
}

#[async_trait]
impl ProductStore for ProductClient {
    async fn persist(&self, product: NewProduct) -> Result<ProductId, ProductError> {
        self.create_product(product).await
    }
}
