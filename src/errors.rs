//! Error Types
//!
//! This module defines the error types used throughout the engine.
//!
//! # Overview
//!
//! The main error type [`WraithError`] covers the failure modes that can be
//! detected while *building* an animation setup:
//! - Malformed section keyframe tables
//! - Out-of-range spring coefficients
//! - Configuration snapshots that fail to parse
//!
//! Nothing inside the per-frame path returns an error. A missing model,
//! a missing bone or a degenerate pointer ray all degrade gracefully.
//!
//! # Usage
//!
//! Fallible constructors return [`Result<T>`] which is an alias for
//! `std::result::Result<T, WraithError>`.
//!
//! ```rust,ignore
//! use wraith::errors::Result;
//! use wraith::animation::SectionTable;
//!
//! fn build(sections: Vec<Section>) -> Result<SectionTable> {
//!     SectionTable::new(sections)
//! }
//! ```

use thiserror::Error;

/// The main error type for the Wraith engine.
#[derive(Error, Debug)]
pub enum WraithError {
    // ========================================================================
    // Section Table Errors
    // ========================================================================
    /// The section table contains no sections.
    #[error("Section table is empty")]
    EmptySections,

    /// A section range is malformed or the table does not tile [0, 1].
    #[error("Invalid section '{section}': {reason}")]
    InvalidSections {
        /// Name of the offending section
        section: String,
        /// What is wrong with it
        reason: String,
    },

    // ========================================================================
    // Physics Errors
    // ========================================================================
    /// A spring coefficient lies outside its stable range.
    #[error("Invalid spring parameter '{name}': {value} (expected a value in (0, 1])")]
    InvalidSpring {
        /// Coefficient name
        name: &'static str,
        /// The rejected value
        value: f32,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WraithError {
    pub(crate) fn section(section: &str, reason: impl Into<String>) -> Self {
        WraithError::InvalidSections {
            section: section.to_string(),
            reason: reason.into(),
        }
    }
}

/// Alias for `Result<T, WraithError>`.
pub type Result<T> = std::result::Result<T, WraithError>;
