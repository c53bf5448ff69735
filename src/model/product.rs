use super::{Address, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

/// Free-form grouped values, e.g. `address.city`, keyed by group then child.
pub type Attributes = BTreeMap<String, BTreeMap<String, String>>;

/// Type-safe identifier for products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// Availability of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductStatus {
    #[default]
    Available,
    OutOfStock,
    Discontinued,
}

impl ProductStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ProductStatus::Available => "available",
            ProductStatus::OutOfStock => "outOfStock",
            ProductStatus::Discontinued => "discontinued",
        }
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "available" => Ok(ProductStatus::Available),
            "outofstock" | "out_of_stock" | "out-of-stock" => Ok(ProductStatus::OutOfStock),
            "discontinued" => Ok(ProductStatus::Discontinued),
            _ => Err(format!("unknown product status: {s}")),
        }
    }
}

impl Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product in the catalog.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](crate::framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](crate::framework::ResourceActor).
///
/// See [`crate::product_actor`] for:
/// - Creation parameters ([`NewProduct`])
/// - Update parameters ([`ProductUpdate`])
/// - Custom actions ([`ProductAction`](crate::product_actor::ProductAction))
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub about: String,
    pub sku: String,
    pub price: f64,
    pub category: CategoryId,
    pub supplier: String,
    pub smart_contract_address: Option<Address>,
    pub status: ProductStatus,
    pub inventory_quantity: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Product {
    pub fn new(id: ProductId, params: NewProduct) -> Self {
        Self {
            id,
            name: params.name,
            description: params.description,
            about: params.about,
            sku: params.sku,
            price: params.price,
            category: params.category,
            supplier: params.supplier,
            smart_contract_address: params.smart_contract_address,
            status: params.status,
            inventory_quantity: params.inventory_quantity,
            attributes: params.attributes,
        }
    }
}

/// A validated product ready to be stored. Built from a
/// [`ProductDraft`](super::ProductDraft) on submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub about: String,
    pub sku: String,
    pub price: f64,
    pub category: CategoryId,
    pub supplier: String,
    pub smart_contract_address: Option<Address>,
    pub status: ProductStatus,
    pub inventory_quantity: u32,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

// DTOs for Product updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub price: Option<f64>,
    pub inventory_quantity: Option<u32>,
    pub status: Option<ProductStatus>,
}
