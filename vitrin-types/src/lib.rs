//! Shared types for the Vitrin product-photo studio.

mod base64_serde;

pub mod account;
pub mod analysis;
pub mod config;
pub mod content;
pub mod models;
pub mod response;
pub mod schema;
