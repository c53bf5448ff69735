//! Custom actions for the Product actor.
//!
//! Stock operations that go beyond plain updates. Handled by
//! [`ActorEntity::handle_action`](crate::framework::ActorEntity::handle_action)
//! in [`super::entity`].

/// Custom actions for Product entities.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Reads the current stock level without modifying it.
    CheckStock,
    /// Takes units out of stock.
    ///
    /// # Errors
    /// Fails if the product is discontinued or the amount exceeds available stock.
    ReserveStock(u32),
    /// Puts units back into stock.
    Restock(u32),
}

/// Results from ProductActions - variants match 1:1 with ProductAction
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(u32),
    /// Remaining stock after the reservation.
    ReserveStock(u32),
    /// Stock after restocking.
    Restock(u32),
}
