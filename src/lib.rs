// ============================================================================
// Strict linting - Dangerous or non-idiomatic practices are forbidden
// ============================================================================

#![deny(unsafe_code)]                 // Unsafe code is forbidden
#![deny(missing_docs)]                // All public items must be documented
#![deny(non_camel_case_types)]        // Types must follow CamelCase convention
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

//! # Stratovia CloudAPI Client
//!
//! A typed client and CLI for the Stratovia CloudAPI, covering datacenter,
//! server, LAN, and NIC lifecycle management.
//!
//! ## Overview
//!
//! Stratovia provisions infrastructure asynchronously: every mutation is
//! accepted with a provisioning request, and the resource materializes once
//! that request completes. This crate wraps the REST endpoints and provides:
//!
//! - Typed CRUD operations for datacenters, servers, LANs, and NICs
//! - A completion poller that waits for provisioning requests to finish
//! - A typed error taxonomy that preserves provider error messages
//! - A YAML configuration layer with environment overrides
//!
//! ## Waiting for provisioning
//!
//! Mutation responses carry a request reference. Pass the returned resource
//! to [`CloudApiClient::wait_for_completion`] to block until the provider
//! reports `DONE` or `FAILED`:
//!
//! 1. **Create**: the API answers immediately with the resource skeleton
//! 2. **Poll**: the request status endpoint is checked until terminal
//! 3. **Use**: the resource is fully provisioned once the request is `DONE`
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing and validation
//! - [`cloudapi`]: CloudAPI client, resource types, and the completion poller
//! - [`cli`]: Command-line interface
//! - [`error`]: Error taxonomy
//!
//! ## Example
//!
//! ```yaml
//! api:
//!   endpoint: https://api.stratovia.cloud/cloudapi/v5
//!   depth: 1
//!
//! defaults:
//!   location: us/las
//!
//! wait:
//!   timeout_secs: 300
//!   poll_interval_secs: 5
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod cli;
pub mod cloudapi;
pub mod config;
pub mod error;

// ============================================================================
// Re-exports
// ============================================================================

pub use cli::{Cli, Commands, OutputFormatter};
pub use cloudapi::{
    CloudApiClient, Collection, CreateDatacenterRequest, CreateLanRequest, CreateNicRequest,
    CreateServerRequest, Datacenter, Lan, Nic, RequestRef, RequestState, RequestStatus, Server,
    Trackable, WaitOptions, DEFAULT_API_URL,
};
pub use config::{ClientConfig, ConfigParser, ConfigValidator};
pub use error::{CloudApiError, Result, StratoviaError};
