// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Posterwerk.

use thiserror::Error;

use crate::types::AssetKind;

/// Top-level error type for all Posterwerk operations.
#[derive(Debug, Error)]
pub enum PosterError {
    // -- Parameter validation --
    #[error("text line {index} is invalid: {reason}")]
    InvalidTextLine { index: usize, reason: String },

    #[error("tracking {value} is outside the accepted range {min}..={max}")]
    InvalidTracking { value: i32, min: i32, max: i32 },

    #[error("invalid render configuration: {0}")]
    InvalidConfig(String),

    // -- Assets --
    #[error("{asset} asset unavailable: {reason}")]
    AssetUnavailable { asset: AssetKind, reason: String },

    // -- Export --
    #[error("image encoding failed: {0}")]
    Encode(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    // -- Ambient --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PosterError {
    /// True for errors caused by the caller's parameters, which a UI should
    /// report next to the offending input rather than as a crash.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTextLine { .. } | Self::InvalidTracking { .. } | Self::InvalidConfig(_)
        )
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PosterError>;
