use supply_guard::clients::ActorClient;
use supply_guard::form::{FormError, ProductForm, SubmissionStatus};
use supply_guard::lifecycle::CatalogSystem;
use supply_guard::model::{Address, CategoryId, ProductStatus, User, UserCreate};
use supply_guard::product_actor::ProductError;
use supply_guard::reference::Loaded;

fn viewer() -> Address {
    "0x00000000000000000000000000000000000000c0".parse().unwrap()
}

/// End to end: real actors behind the form, from opening to a stored product.
#[tokio::test]
async fn test_form_creates_product_in_catalog() {
    let system = CatalogSystem::new();
    system
        .user_client
        .register(UserCreate::from(User::new(viewer(), "Alice")))
        .await
        .expect("Failed to register user");
    system.category_client.add("Tools").await.expect("Failed to add category");

    let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer());
    let reference = form.open().await;
    assert_eq!(reference.current_user, Loaded::Ready(Some(User::new(viewer(), "Alice"))));
    assert!(reference.category("Tools").is_some());

    form.change("name", "Widget").unwrap();
    form.change("price", "7.99").unwrap();
    form.change("inventoryQuantity", "54").unwrap();
    form.change("category", "Tools").unwrap();
    form.change("address.street", "Main").unwrap();
    form.change("address.city", "Metropolis").unwrap();

    let id = form.submit().await.expect("Submission failed");
    assert_eq!(form.submission(), &SubmissionStatus::Succeeded(id));

    let stored = system
        .product_client
        .get(id)
        .await
        .expect("Failed to get product")
        .expect("Product not found");
    assert_eq!(stored.sku, "W754SG24");
    assert_eq!(stored.category, CategoryId::from_name("Tools"));
    assert_eq!(stored.inventory_quantity, 54);
    assert_eq!(stored.status, ProductStatus::Available);
    assert_eq!(stored.attributes["address"]["street"], "Main");
    assert_eq!(stored.attributes["address"]["city"], "Metropolis");

    drop(form);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_unknown_category_fails_submission() {
    let system = CatalogSystem::new();

    let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer());
    let reference = form.open().await;
    // Unregistered viewers are not an error.
    assert_eq!(reference.current_user, Loaded::Ready(None));
    assert_eq!(reference.categories, Loaded::Ready(vec![]));

    form.change("name", "Widget").unwrap();
    form.change("price", "7.99").unwrap();
    form.change("inventoryQuantity", "54").unwrap();
    form.change("category", "Garden").unwrap();

    let result = form.submit().await;
    assert!(
        matches!(&result, Err(FormError::Persist(ProductError::Rejected(msg))) if msg.contains("Unknown category")),
        "unexpected result: {result:?}"
    );
    assert!(matches!(form.submission(), SubmissionStatus::Failed(_)));
    assert_eq!(form.draft().category, "Garden");

    let stored = system.product_client.list().await.expect("Failed to list products");
    assert!(stored.is_empty());

    drop(form);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_stock_runs_out_and_comes_back() {
    let system = CatalogSystem::new();
    system.category_client.add("Tools").await.unwrap();

    let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer());
    form.open().await;
    form.change("name", "Bolt").unwrap();
    form.change("price", "0.10").unwrap();
    form.change("inventoryQuantity", "5").unwrap();
    form.change("category", "tools").unwrap();
    let id = form.submit().await.unwrap();
    drop(form);

    let products = &system.product_client;
    assert_eq!(products.reserve_stock(id, 3).await.unwrap(), 2);

    let over = products.reserve_stock(id, 3).await;
    assert!(matches!(over, Err(ProductError::Rejected(_))));
    assert_eq!(products.check_stock(id).await.unwrap(), 2);

    assert_eq!(products.reserve_stock(id, 2).await.unwrap(), 0);
    let product = products.get(id).await.unwrap().unwrap();
    assert_eq!(product.status, ProductStatus::OutOfStock);

    assert_eq!(products.restock(id, 10).await.unwrap(), 10);
    let product = products.get(id).await.unwrap().unwrap();
    assert_eq!(product.status, ProductStatus::Available);

    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_submitted_status_is_stored_as_entered() {
    let system = CatalogSystem::new();
    system.category_client.add("Tools").await.unwrap();

    let mut form = ProductForm::new(system.directory(), system.product_client.clone(), viewer());
    form.open().await;
    form.change("name", "Widget").unwrap();
    form.change("price", "7.99").unwrap();
    form.change("inventoryQuantity", "54").unwrap();
    form.change("category", "Tools").unwrap();
    form.change("status", "outOfStock").unwrap();
    let held = form.submit().await.unwrap();

    form.change("name", "Gadget").unwrap();
    form.change("price", "3").unwrap();
    form.change("inventoryQuantity", "0").unwrap();
    form.change("category", "Tools").unwrap();
    let empty = form.submit().await.unwrap();
    drop(form);

    let products = &system.product_client;
    let held = products.get(held).await.unwrap().unwrap();
    assert_eq!(held.inventory_quantity, 54);
    assert_eq!(held.status, ProductStatus::OutOfStock);

    // An available product with no stock is stored as out of stock.
    let empty = products.get(empty).await.unwrap().unwrap();
    assert_eq!(empty.status, ProductStatus::OutOfStock);

    system.shutdown().await.expect("Shutdown failed");
}
