//! HTTP request handlers

pub mod health;
pub mod products;
pub mod wizard;

pub use health::*;
pub use products::*;
pub use wizard::*;
