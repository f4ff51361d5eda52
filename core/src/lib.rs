//! # WEAVE CORE LIBRARY
//!
//! **INVERSION-OF-CONTROL RESOLUTION ENGINE**
//!
//! **ARCHITECTURE**: Plain registries consulted by a recursive resolver, with a
//! container façade on top
//! **GUARANTEE**: Resolution failures carry the full construction chain and
//! never leave stale frames behind

pub mod api;
pub mod binding;
pub mod config;
pub mod container;
pub mod dependencies;
pub mod errors;
pub mod events;
pub mod introspection;
pub mod manager;
pub mod registry;
pub mod types;
