pub mod config;
pub mod storefront;
