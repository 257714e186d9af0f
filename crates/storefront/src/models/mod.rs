//! Domain types for the storefront.
//!
//! These types are validated domain objects, separate from the database row
//! types the repositories deserialize into.

pub mod address;
pub mod cart;
pub mod order;
pub mod product;
pub mod session;

pub use address::{Address, NewAddress};
pub use cart::{Cart, CartLine, QuantityChange};
pub use order::{Order, OrderItem};
pub use product::Product;
pub use session::{CurrentCustomer, session_keys};
