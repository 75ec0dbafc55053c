// handlers/public/mod.rs - Handlers reachable without an admin session
//
// Catalog browsing, view tracking, signup capture and the login redirect.
pub mod login;
pub mod products;
pub mod signups;

pub use login::login_redirect;
pub use products::{product_get, product_view, products_list};
pub use signups::signup_post;
