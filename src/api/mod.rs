// api/mod.rs - Wire-level contract shared by the server router and the client
pub mod routes;
