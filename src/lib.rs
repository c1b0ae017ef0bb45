// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![warn(missing_docs)]                // All public items must be documented
#![warn(dead_code)]                   // Unused code is reported
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention

// Additional strictness - Leave nothing unchecked
#![warn(unused_imports)]              // Unused imports are reported
#![warn(unused_variables)]            // Unused variables are reported
#![deny(unused_must_use)]             // Must handle Result and Option explicitly
#![deny(non_snake_case)]              // Variables and functions must be snake_case
#![deny(non_upper_case_globals)]      // Constants must be UPPER_CASE
#![deny(nonstandard_style)]           // Non-standard code style is forbidden
#![forbid(unsafe_op_in_unsafe_fn)]    // Unsafe ops in unsafe fns are forbidden

// Clippy lints (warnings only)
#![warn(clippy::all)]                 // All standard Clippy lints
#![warn(clippy::pedantic)]            // Very strict Clippy lints
#![warn(clippy::nursery)]             // Experimental lints
#![warn(clippy::unwrap_used)]         // unwrap() warning
#![warn(clippy::expect_used)]         // expect() warning
#![warn(clippy::panic)]               // panic!() warning
#![warn(clippy::print_stdout)]        // println!() warning
#![warn(clippy::todo)]                // TODO warning
#![warn(clippy::unimplemented)]       // unimplemented!() warning
#![warn(clippy::missing_const_for_fn)] // Force const when possible
#![warn(clippy::unwrap_in_result)]    // unwrap() in Result warning
#![warn(clippy::module_inception)]    // Module with same name as crate warning
#![warn(clippy::redundant_clone)]     // Useless clones warning
#![warn(clippy::shadow_unrelated)]    // Shadowing unrelated variables warning
#![warn(clippy::too_many_arguments)]  // Limit function arguments
#![warn(clippy::cognitive_complexity)] // Limit cognitive complexity

// Safety and robustness lints
#![deny(overflowing_literals)]        // Overflowing literals are forbidden
#![deny(arithmetic_overflow)]         // Arithmetic overflow is forbidden

// ============================================================================
// Crate Documentation
// ============================================================================

//! # cf-operations
//!
//! A typed client SDK for the Cloud Foundry control APIs and an operations
//! façade composed on top of it.
//!
//! ## Overview
//!
//! The crate is layered:
//!
//! 1. **Requests**: immutable, validated request values built with builders
//! 2. **Clients**: traits for the cloud controller, UAA and log cache, with a
//!    `reqwest` implementation
//! 3. **Operations**: name-based workflows such as binding a service
//!    instance to an application or deleting a route
//!
//! ## Modules
//!
//! - [`client`]: Cloud controller requests, resources and the REST client
//! - [`uaa`]: UAA token requests
//! - [`logcache`]: Log cache envelopes and reads
//! - [`doppler`]: Value metrics
//! - [`operations`]: Higher-level operations over a targeted space
//! - [`config`]: Configuration parsing and validation
//! - [`cli`]: Command-line interface
//!
//! ## Example
//!
//! ```yaml
//! api:
//!   url: https://api.example.com
//!   uaa_url: https://uaa.example.com
//!   log_cache_url: https://log-cache.example.com
//!
//! target:
//!   organization: my-org
//!   space: dev
//!   space_id: 0d6b7f7e-5ad6-4f0c-a3c5-31f6d0e3b7e4
//!
//! polling:
//!   interval_ms: 1000
//!   timeout_secs: 300
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod client;
pub mod config;
pub mod doppler;
pub mod error;
pub mod logcache;
pub mod operations;
pub mod uaa;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use client::{CloudFoundryClient, RestClient, RestClientBuilder};
pub use config::{ConfigParser, ConfigValidator, OpsConfig};
pub use error::{CfError, Result};
pub use logcache::LogCacheClient;
pub use operations::{CloudFoundryOperations, PollingConfig};
pub use uaa::UaaClient;
