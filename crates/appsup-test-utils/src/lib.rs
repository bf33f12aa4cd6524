//! Shared test utilities for the appsup workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! # Modules
//!
//! - [`tree`] — [`TestTree`] builder for source/destination scenarios

pub mod tree;

pub use tree::TestTree;
