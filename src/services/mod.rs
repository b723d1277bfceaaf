// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod aggregator;
pub mod cache;
pub mod popup;
pub mod shop_api_client;
pub mod shop_service;

pub use aggregator::*;
pub use cache::*;
pub use shop_api_client::*;
pub use shop_service::*;
