//! Headless core for an AI product-photo studio.
//!
//! A UI shell feeds a product photo into [`pipeline::Studio`], which runs
//! the three-step analyze → select-scene → generate pipeline against a
//! [`gateway::ModelGateway`] and publishes observable presentation state.
//! [`session::SessionController`] gates the top-level view on the state of
//! the external authentication service.

pub mod auth;
pub mod client;
pub mod error;
pub mod gateway;
pub mod intake;
pub mod models;
pub mod pipeline;
pub mod scene;
pub mod session;

#[cfg(test)]
mod test_support;

pub use vitrin_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
