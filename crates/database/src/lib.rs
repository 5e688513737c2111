//! # School Directory Database Crate
//!
//! This crate acts as the application-specific interface to the PostgreSQL
//! database that holds the `schools` table.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** All SQL lives here. The rest of the application talks to the
//!   [`SchoolStore`] trait and never sees a query string.
//! - **Parameterized Queries Only:** Every value reaches PostgreSQL as a bound
//!   parameter.
//! - **Explicit Lifecycle:** The pool is created by [`connect`] at startup and
//!   released by [`close`] at shutdown; nothing is initialized lazily.
//! - **Uniqueness in the Schema:** (name, address) is a `UNIQUE` constraint, so
//!   concurrent duplicate submissions cannot both be stored.
//!
//! ## Public API
//!
//! - `connect` / `run_migrations` / `close`: pool lifecycle.
//! - `SchoolStore`: the storage contract used by the web server.
//! - `DbRepository`: the PostgreSQL implementation.
//! - `InMemoryStore` (feature `test-util`): a process-local implementation with
//!   the same contract, for tests.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
#[cfg(any(test, feature = "test-util"))]
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{close, connect, run_migrations};
pub use error::DbError;
#[cfg(any(test, feature = "test-util"))]
pub use memory::InMemoryStore;
pub use repository::DbRepository;
pub use store::SchoolStore;
