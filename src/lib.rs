//! cinnamon-profiles - Snapshot manager for Cinnamon desktop configuration
//!
//! This library provides the core functionality for cinnamon-profiles. It
//! captures the live Cinnamon configuration (config directories, themes,
//! icons, fonts, and the dconf namespace) into named, versioned zip
//! archives, switches between them, and protects every destructive
//! operation with an automatic pre-mutation backup.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and namespace constants
//! - `error`: Custom error types
//! - `models`: Core data models (profiles, component selections)
//! - `external`: Adapters for the `zip`/`unzip` and `dconf` tools
//! - `snapshot`: Capture, apply, and export of configuration snapshots
//! - `registry`: The durable profile registry (`profiles.json`)
//! - `backup`: Backup tiers and capture-before-mutate orchestration
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use cinnamon_profiles::config::ProfilePaths;
//! use cinnamon_profiles::registry::ProfileRegistry;
//!
//! let paths = ProfilePaths::new()?;
//! let registry = ProfileRegistry::load(&paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod error;
pub mod external;
pub mod models;
pub mod registry;
pub mod snapshot;

pub use error::ProfileError;
