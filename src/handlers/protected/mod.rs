// handlers/protected/mod.rs - Admin-only handlers
//
// Every route in this tier is layered with `middleware::require_admin`, so
// handlers here never re-check the session.
pub mod products;
pub mod stats;

pub use products::{product_create, product_delete, product_update};
pub use stats::admin_stats;
