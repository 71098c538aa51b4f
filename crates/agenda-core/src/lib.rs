//! Core types and operations for the agenda contact service.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! persistence collaborator is expressed as the [`store::ContactStore`] trait;
//! the request/response boundary lives in `agenda-api`.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod contact;
pub mod cpf;
pub mod error;
pub mod page;
pub mod resource;
pub mod store;
pub mod validate;

pub use error::{Error, Result};

#[cfg(test)]
mod memory;
