//! Demo: registers a user and a category, fills in the creation form, submits
//! it, and tries to bind the contract without a wallet.

use supply_guard::config::AppConfig;
use supply_guard::form::ProductForm;
use supply_guard::lifecycle::{setup_tracing, CatalogSystem};
use supply_guard::model::{Address, UserCreate};
use tracing::{error, info, warn, Instrument};

const DEMO_VIEWER: &str = "0x00000000000000000000000000000000000000c0";

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = AppConfig::from_env().map_err(|e| e.to_string())?;
    let viewer: Address = match config.viewer {
        Some(viewer) => viewer,
        None => DEMO_VIEWER.parse::<Address>().map_err(|e| e.to_string())?,
    };
    let network = config.networks.default_entry().map_err(|e| e.to_string())?;
    info!(network = network.name, chain_id = ?network.config.chain_id, "Using network");

    let system = CatalogSystem::new();

    let span = tracing::info_span!("seeding");
    async {
        system
            .user_client
            .register(UserCreate {
                address: viewer,
                name: "Alice".to_string(),
                email: Some("alice@example.com".to_string()),
            })
            .await
            .map_err(|e| e.to_string())?;
        system
            .category_client
            .add("Tools")
            .await
            .map_err(|e| e.to_string())?;
        Ok::<_, String>(())
    }
    .instrument(span)
    .await?;

    let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer);
    let reference = form.open().await;
    if let Some(Some(user)) = reference.current_user.ready() {
        info!(user = %user.name, "Signed in");
    }

    let edits = [
        ("name", "Widget"),
        ("description", "A very useful widget"),
        ("price", "7.99"),
        ("inventoryQuantity", "54"),
        ("category", "Tools"),
        ("supplier", "Acme"),
        ("address.city", "Metropolis"),
    ];
    for (name, value) in edits {
        form.change(name, value).map_err(|e| e.to_string())?;
    }
    info!(sku = form.draft().sku(), "Draft ready");

    let span = tracing::info_span!("submission");
    let result = form.submit().instrument(span).await;
    match result {
        Ok(id) => {
            let stock = system
                .product_client
                .check_stock(id)
                .await
                .map_err(|e| e.to_string())?;
            info!(product_id = %id, stock, "Product created");
        }
        Err(e) => error!(error = %e, "Product creation failed"),
    }
    form.close();
    drop(form);

    match config.contract_factory().map_err(|e| e.to_string())? {
        Some(factory) => {
            if factory.bind(None).is_none() {
                warn!("Connect a wallet to reach the contract");
            }
        }
        None => info!("No contract artifact configured"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
