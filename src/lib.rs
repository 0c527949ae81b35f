//! # Schemascope: Headless-CMS Schema Audit Engine
//!
//! A static analysis engine for headless-CMS content schemas. Given an
//! introspected schema snapshot (models, components, enumerations) and
//! optional per-model entry counts, it produces a strategic audit report:
//!
//! - **Structure**: oversized models, deep relation chains, empty shells
//! - **Duplication**: versioned model copies and near-identical types
//! - **Relationships**: the renderable graph, cycles, hubs, and orphans
//! - **Enumerations**: tenancy misuse and oversized value sets
//! - **Components**: reuse health and monolithic page models
//! - **Content health**: empty and draft-only models, entry completeness
//!
//! Each dimension is scored on a transparent base-100 card whose itemized
//! contributions always reconstruct the final score, and the report ends
//! with a prioritized issue list and an effort-phased roadmap.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use schemascope::{AuditEngine, AuditConfig};
//! use schemascope::core::schema::EntryCounts;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = schemascope::io::schema_files::load_schema("schema.json".as_ref())?;
//!     let engine = AuditEngine::new(AuditConfig::default())?;
//!     let report = engine.audit(&schema, &EntryCounts::empty());
//!     println!("overall: {:.0}/100", report.overall_score);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

// Core domain types shared by every analyzer
pub mod core {
    //! Core schema model, configuration, patterns, and scoring primitives.

    pub mod config;
    pub mod errors;
    pub mod patterns;
    pub mod schema;
    pub mod scoring;
}

// Dimension analyzers and the detectors underneath them
pub mod detectors {
    //! Independent audit-dimension analyzers.

    pub mod components;
    pub mod content_health;
    pub mod duplicates;
    pub mod enums;
    pub mod relationships;
    pub mod structure;
    pub mod traversal;
}

// I/O boundary: schema loading and report rendering
pub mod io {
    //! Schema/counts loading and report serialization.

    pub mod reports;
    pub mod schema_files;
}

// Public API and engine interface
pub mod api {
    //! High-level audit API.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::AuditEngine;
pub use api::results::StrategicAuditReport;
pub use core::config::AuditConfig;
pub use core::errors::{AuditError, AuditResultExt, Result};

/// Library version, from the crate metadata.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
