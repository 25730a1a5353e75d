//! Listing sources
//!
//! This module provides:
//! - The `ListingSource` seam used by the collector runtime
//! - The HTTP implementation talking to the marketplace API
//!
//! The collector interacts exclusively through the trait, which keeps
//! the fan-out logic testable without a network.

pub mod adapter;
pub mod http;

pub use adapter::ListingSource;
pub use http::HttpListingSource;
