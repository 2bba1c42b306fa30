//! # gpt_backend - Backend for GPT Actions
//!
//! Bundles client-supplied file lists into ZIP archives and keeps small
//! per-user memory records, built on Clean Architecture principles.
//!
//! ## Architecture Layers
//!
//! - **Domain**: Bundles, entries and memory records with their invariants
//! - **Application**: Use cases and ports (interfaces)
//! - **Infrastructure**: ZIP writer, HTTP fetcher, storage and persistence adapters
//! - **API**: HTTP handlers and middleware
//!
//! ## Key Features
//!
//! - Streaming ZIP responses with deterministic entry order and bytes
//! - Remote binary entries resolved before any response byte is sent
//! - Batch mode that stores the archive and returns a download URL
//!
//! ## Example Usage
//!
//! ```no_run
//! use gpt_backend::{application::builder::ApplicationBuilder, api::create_router, Config};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//! let state = ApplicationBuilder::new(Config::from_env())
//!     .with_database()
//!     .await?
//!     .with_infrastructure()
//!     .await?
//!     .build()?;
//! let app = create_router(state);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export key types explicitly to avoid ambiguity
pub use api::errors as api_errors;
pub use application::{dto, ports, use_cases};
pub use config::Config;
pub use domain::errors as domain_errors;
pub use domain::{entities, value_objects};
