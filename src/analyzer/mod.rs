//! # Analyzer Module
//!
//! Compose document analysis: validation, canonical reordering and network
//! declaration fixes.

pub mod compose;
