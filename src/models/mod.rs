//! Core data models for cinnamon-profiles
//!
//! This module contains the data structures that represent the snapshot
//! domain: profiles, component selections, and the source location table.

pub mod profile;
pub mod selection;

pub use profile::{sanitize_profile_name, Profile};
pub use selection::{source_locations, ComponentSelection, SourceLocation};
