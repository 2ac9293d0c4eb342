//! Domain models for the API.
//!
//! These types are what handlers serialize onto the wire and what services
//! pass around; the database row shapes live next to the queries in
//! [`crate::db`] and are converted into these.

pub mod order;
pub mod product;
pub mod user;

pub use order::{NewOrderItem, Order, OrderItem, OrderWithItems};
pub use product::{NewProduct, Product, ProductPatch};
pub use user::User;
