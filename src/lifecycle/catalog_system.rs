use crate::clients::{CategoryClient, ProductClient, UserClient};
use crate::reference::Directory;
use tracing::{error, info};

/// The running catalog: one actor each for users, categories and products.
///
/// The product actor is run with a [`CategoryClient`] as its context so it can
/// check a new product's category before accepting it.
///
/// ```ignore
/// let system = CatalogSystem::new();
/// system.category_client.add("Tools").await?;
///
/// let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer);
/// form.open().await;
/// // ...
/// drop(form);
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    pub user_client: UserClient,
    pub category_client: CategoryClient,
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (user_actor, user_client) = crate::user_actor::new();
        let (category_actor, category_client) = crate::category_actor::new();
        let (product_actor, product_client) = crate::product_actor::new();

        let user_handle = tokio::spawn(user_actor.run(()));
        let category_handle = tokio::spawn(category_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(category_client.clone()));

        Self {
            user_client,
            category_client,
            product_client,
            handles: vec![user_handle, category_handle, product_handle],
        }
    }

    /// The user and category actors as a reference source for the form.
    pub fn directory(&self) -> Directory {
        Directory::new(self.user_client.clone(), self.category_client.clone())
    }

    /// Drops the clients and waits for every actor to stop.
    ///
    /// Actors only stop once every clone of their client is gone, so callers
    /// must drop forms and directories built from this system first. The
    /// product actor holds a category client, so the category actor stops
    /// after it.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog...");

        drop(self.user_client);
        drop(self.category_client);
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}

impl Default for CatalogSystem {
    fn default() -> Self {
        Self::new()
    }
}
