//! Core types and engines for the AssetDesk equipment tracker.
//!
//! This crate has no HTTP or database dependencies. The
//! record store is reached only through the [`store::RecordStore`] trait;
//! storage backends (e.g. `assetdesk-store-sqlite`) implement it, and every
//! engine here is generic over it.

// Native `async fn` in traits; the futures carry explicit `Send` bounds where
// the trait is declared.
#![allow(async_fn_in_trait)]

pub mod accessory;
pub mod actor;
pub mod asset;
pub mod dashboard;
pub mod department;
pub mod employee;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod nullable;
pub mod schedule;
pub mod store;
pub mod term;

#[cfg(test)]
mod testing;

pub use error::{Error, Result, ValidationError};
