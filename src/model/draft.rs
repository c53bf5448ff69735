//! The unsaved product record behind the creation form.
//!
//! [`ProductDraft::reconcile`] merges one field-change event into the draft. Field
//! names arrive exactly as the form names its inputs: a plain camelCase field
//! (`"price"`) or a dotted pair (`"address.city"`) that targets a nested group.
//! Contents are not validated here; that happens in [`ProductDraft::validate`]
//! when the draft is submitted.

use super::{Address, Attributes, CategoryId, NewProduct, ProductStatus};
use crate::sku::derive_sku;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use thiserror::Error;

/// Structural problems with a field-change event.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftError {
    #[error("Field is derived and cannot be edited: {0}")]
    ReadOnly(&'static str),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Field {0} holds a single value, not a group")]
    NotAGroup(&'static str),

    #[error("Malformed field name: {0:?}")]
    MalformedName(String),
}

/// Problems found when turning a draft into a [`NewProduct`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("Invalid inventory quantity: {0:?}")]
    InvalidQuantity(String),

    #[error("Invalid status: {0:?}")]
    InvalidStatus(String),

    #[error("Invalid smart contract address: {0}")]
    InvalidAddress(String),
}

/// Top-level draft fields, named as the form names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Description,
    Sku,
    Price,
    About,
    Category,
    Supplier,
    SmartContractAddress,
    Status,
    InventoryQuantity,
}

impl DraftField {
    pub const ALL: [DraftField; 10] = [
        DraftField::Name,
        DraftField::Description,
        DraftField::Sku,
        DraftField::Price,
        DraftField::About,
        DraftField::Category,
        DraftField::Supplier,
        DraftField::SmartContractAddress,
        DraftField::Status,
        DraftField::InventoryQuantity,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Description => "description",
            DraftField::Sku => "sku",
            DraftField::Price => "price",
            DraftField::About => "about",
            DraftField::Category => "category",
            DraftField::Supplier => "supplier",
            DraftField::SmartContractAddress => "smartContractAddress",
            DraftField::Status => "status",
            DraftField::InventoryQuantity => "inventoryQuantity",
        }
    }

    /// Looks up a field by its form name. `Supplier` is accepted for `supplier`.
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "Supplier" {
            return Some(DraftField::Supplier);
        }
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }

    /// Fields the SKU is derived from.
    pub fn feeds_sku(self) -> bool {
        matches!(
            self,
            DraftField::Name | DraftField::Price | DraftField::InventoryQuantity
        )
    }
}

impl Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a field-change event lands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldPath<'a> {
    Field(DraftField),
    Nested { group: &'a str, child: &'a str },
}

impl<'a> FieldPath<'a> {
    /// Splits on the first `.`; everything after it is the child name.
    pub fn parse(name: &'a str) -> Result<Self, DraftError> {
        match name.split_once('.') {
            Some((group, child)) => {
                if group.is_empty() || child.is_empty() {
                    return Err(DraftError::MalformedName(name.to_string()));
                }
                if let Some(field) = DraftField::from_name(group) {
                    return Err(DraftError::NotAGroup(field.as_str()));
                }
                Ok(FieldPath::Nested { group, child })
            }
            None if name.is_empty() => Err(DraftError::MalformedName(name.to_string())),
            None => DraftField::from_name(name)
                .map(FieldPath::Field)
                .ok_or_else(|| DraftError::UnknownField(name.to_string())),
        }
    }
}

/// In-memory, unsaved product record.
///
/// A deserialized draft ignores any stored `sku` and derives its own.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredDraft")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    sku: String,
    pub price: String,
    pub about: String,
    pub category: String,
    pub supplier: String,
    pub smart_contract_address: String,
    pub status: String,
    pub inventory_quantity: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub groups: Attributes,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredDraft {
    name: String,
    description: String,
    price: String,
    about: String,
    category: String,
    supplier: String,
    smart_contract_address: String,
    status: String,
    inventory_quantity: String,
    groups: Attributes,
}

impl From<StoredDraft> for ProductDraft {
    fn from(stored: StoredDraft) -> Self {
        let mut draft = Self {
            name: stored.name,
            description: stored.description,
            sku: String::new(),
            price: stored.price,
            about: stored.about,
            category: stored.category,
            supplier: stored.supplier,
            smart_contract_address: stored.smart_contract_address,
            status: stored.status,
            inventory_quantity: stored.inventory_quantity,
            groups: stored.groups,
        };
        draft.refresh_sku();
        draft
    }
}

impl ProductDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// The derived SKU. Only [`ProductDraft::refresh_sku`] writes it.
    pub fn sku(&self) -> &str {
        &self.sku
    }

    pub fn field(&self, field: DraftField) -> &str {
        match field {
            DraftField::Name => &self.name,
            DraftField::Description => &self.description,
            DraftField::Sku => &self.sku,
            DraftField::Price => &self.price,
            DraftField::About => &self.about,
            DraftField::Category => &self.category,
            DraftField::Supplier => &self.supplier,
            DraftField::SmartContractAddress => &self.smart_contract_address,
            DraftField::Status => &self.status,
            DraftField::InventoryQuantity => &self.inventory_quantity,
        }
    }

    fn editable_mut(&mut self, field: DraftField) -> Result<&mut String, DraftError> {
        Ok(match field {
            DraftField::Name => &mut self.name,
            DraftField::Description => &mut self.description,
            DraftField::Sku => return Err(DraftError::ReadOnly(DraftField::Sku.as_str())),
            DraftField::Price => &mut self.price,
            DraftField::About => &mut self.about,
            DraftField::Category => &mut self.category,
            DraftField::Supplier => &mut self.supplier,
            DraftField::SmartContractAddress => &mut self.smart_contract_address,
            DraftField::Status => &mut self.status,
            DraftField::InventoryQuantity => &mut self.inventory_quantity,
        })
    }

    /// Value of `group.child`, if set.
    pub fn nested(&self, group: &str, child: &str) -> Option<&str> {
        self.groups.get(group)?.get(child).map(String::as_str)
    }

    /// Merges one field-change event into the draft.
    ///
    /// Changing `name`, `price` or `inventoryQuantity` re-derives the SKU from the
    /// new values. A rejected event leaves the draft untouched.
    pub fn reconcile(&mut self, name: &str, value: impl Into<String>) -> Result<(), DraftError> {
        match FieldPath::parse(name)? {
            FieldPath::Field(field) => {
                *self.editable_mut(field)? = value.into();
                if field.feeds_sku() {
                    self.refresh_sku();
                }
            }
            FieldPath::Nested { group, child } => {
                self.groups
                    .entry(group.to_string())
                    .or_default()
                    .insert(child.to_string(), value.into());
            }
        }
        Ok(())
    }

    /// Recomputes the SKU from the current name, price and quantity.
    pub fn refresh_sku(&mut self) -> &str {
        self.sku = derive_sku(&self.name, &self.price, &self.inventory_quantity);
        &self.sku
    }

    /// Checks the draft and converts it into a storable product.
    ///
    /// The SKU on the result is derived afresh, whatever the draft last held.
    pub fn validate(&self) -> Result<NewProduct, ValidationError> {
        let name = required(&self.name, DraftField::Name)?;
        let category = required(&self.category, DraftField::Category)?;

        let price_text = self.price.trim();
        if price_text.is_empty() {
            return Err(ValidationError::MissingField(DraftField::Price.as_str()));
        }
        let price: f64 = price_text
            .parse()
            .map_err(|_| ValidationError::InvalidPrice(self.price.clone()))?;
        if !price.is_finite() || price < 0.0 {
            return Err(ValidationError::InvalidPrice(self.price.clone()));
        }

        let quantity_text = self.inventory_quantity.trim();
        if quantity_text.is_empty() {
            return Err(ValidationError::MissingField(
                DraftField::InventoryQuantity.as_str(),
            ));
        }
        let inventory_quantity: u32 = quantity_text
            .parse()
            .map_err(|_| ValidationError::InvalidQuantity(self.inventory_quantity.clone()))?;

        let status = match self.status.trim() {
            "" => ProductStatus::default(),
            text => text
                .parse()
                .map_err(|_| ValidationError::InvalidStatus(self.status.clone()))?,
        };

        let smart_contract_address = match self.smart_contract_address.trim() {
            "" => None,
            text => Some(
                text.parse::<Address>()
                    .map_err(|e| ValidationError::InvalidAddress(e.to_string()))?,
            ),
        };

        Ok(NewProduct {
            name: name.to_string(),
            description: self.description.trim().to_string(),
            about: self.about.trim().to_string(),
            sku: derive_sku(&self.name, &self.price, &self.inventory_quantity),
            price,
            category: CategoryId::from_name(category),
            supplier: self.supplier.trim().to_string(),
            smart_contract_address,
            status,
            inventory_quantity,
            attributes: self.groups.clone(),
        })
    }
}

fn required(value: &str, field: DraftField) -> Result<&str, ValidationError> {
    match value.trim() {
        "" => Err(ValidationError::MissingField(field.as_str())),
        text => Ok(text),
    }
}
