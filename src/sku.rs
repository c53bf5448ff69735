//! Stock keeping unit derivation.
//!
//! A SKU is a pure function of three draft fields:
//!
//! ```text
//! uppercase(first char of name) + first char of price + inventory quantity + "SG24"
//! ```
//!
//! Empty inputs contribute empty fragments; derivation never fails.

/// Fixed suffix appended to every SKU.
pub const SKU_SUFFIX: &str = "SG24";

/// Derives the SKU for a product.
///
/// ```
/// use supply_guard::sku::derive_sku;
///
/// assert_eq!(derive_sku("Widget", "7.99", "54"), "W754SG24");
/// assert_eq!(derive_sku("", "", "10"), "10SG24");
/// ```
pub fn derive_sku(name: &str, price: &str, inventory_quantity: &str) -> String {
    let mut sku = String::with_capacity(inventory_quantity.len() + SKU_SUFFIX.len() + 8);
    if let Some(first) = name.chars().next() {
        sku.extend(first.to_uppercase());
    }
    if let Some(first) = price.chars().next() {
        sku.push(first);
    }
    sku.push_str(inventory_quantity);
    sku.push_str(SKU_SUFFIX);
    sku
}
