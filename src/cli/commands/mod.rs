pub mod products;
pub mod signup;
pub mod stats;
pub mod token;
