#![doc = "bwl-util-core: core logic library for bwl-util."]

//! This crate contains the data models, catalog API client and batch
//! pipelines for bwl-util. Everything here is testable without a network:
//! the seams are traits in [`contract`], with mocks available in tests.
//!
//! # Usage
//! Add this as a dependency for the blueprint record, metadata extraction,
//! archive policy and the bounded-concurrency batch orchestrator.

pub mod batch;
pub mod blueprint;
pub mod client;
pub mod config;
pub mod contract;
pub mod policy;
