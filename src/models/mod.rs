// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod map;
pub mod search;
pub mod shop;
pub mod tag;

pub use map::*;
pub use search::*;
pub use shop::*;
pub use tag::*;
