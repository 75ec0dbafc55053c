//! Route paths, shared by the router and `StorefrontClient` so the two
//! cannot drift apart.

pub const PRODUCTS: &str = "/api/products";
pub const PRODUCT: &str = "/api/products/:id";
pub const PRODUCT_VIEW: &str = "/api/products/:id/view";
pub const STATS_USERS: &str = "/api/stats-users";
pub const ADMIN_STATS: &str = "/api/admin/stats";
pub const LOGIN: &str = "/api/login";
pub const HEALTH: &str = "/health";

/// Fill `:name` segments of a route template.
pub fn build_url(template: &str, params: &[(&str, &str)]) -> String {
    template
        .split('/')
        .map(|segment| match segment.strip_prefix(':') {
            Some(name) => params
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| *value)
                .unwrap_or(segment),
            None => segment,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path of a single product, e.g. `/api/products/7`.
pub fn product_path(id: i32) -> String {
    build_url(PRODUCT, &[("id", &id.to_string())])
}

pub fn product_view_path(id: i32) -> String {
    build_url(PRODUCT_VIEW, &[("id", &id.to_string())])
}
