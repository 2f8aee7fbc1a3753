// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for whoever is designing the poster.
//
// Every technical error is mapped to plain English with a clear suggestion.
// The severity drives how a front end presents it.

use crate::error::PosterError;

/// Severity of an error from the designer's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something went wrong on the machine; trying again may help.
    Transient,
    /// The designer must change an input before the poster can be made.
    ActionRequired,
    /// Cannot be fixed by retrying or editing the poster.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What to try next (shown as body text).
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `PosterError` into a `HumanError` a designer can act on.
pub fn humanize_error(err: &PosterError) -> HumanError {
    match err {
        PosterError::InvalidTextLine { index, reason } => HumanError {
            message: format!("Line {} of the poster text can't be used.", index + 1),
            suggestion: format!("Check that line's size and position. ({reason})"),
            severity: Severity::ActionRequired,
        },

        PosterError::InvalidTracking { min, max, .. } => HumanError {
            message: "The letter spacing is out of range.".into(),
            suggestion: format!("Choose a letter spacing between {min} and {max}."),
            severity: Severity::ActionRequired,
        },

        PosterError::InvalidConfig(detail) => HumanError {
            message: "The poster settings don't make sense.".into(),
            suggestion: format!("Check the resolution, border and blend settings. ({detail})"),
            severity: Severity::ActionRequired,
        },

        PosterError::AssetUnavailable { asset, .. } => HumanError {
            message: format!("The {asset} couldn't be read."),
            suggestion: "The poster was made without it. Try a PNG or JPEG file, or a TrueType/OpenType font.".into(),
            severity: Severity::Permanent,
        },

        PosterError::Encode(_) | PosterError::Pdf(_) => HumanError {
            message: "The finished poster couldn't be saved in that format.".into(),
            suggestion: "Try again. If this keeps happening, try a lower resolution.".into(),
            severity: Severity::Transient,
        },

        PosterError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "A file couldn't be found.".into(),
                    suggestion: "It may have been moved or deleted. Check the path and try again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "Permission was denied while reading or writing a file.".into(),
                    suggestion: "Check the file permissions, or choose a different output folder.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "There was a problem reading or writing a file.".into(),
                    suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                    severity: Severity::Transient,
                }
            }
        }

        PosterError::Serialization(_) => HumanError {
            message: "The poster job file couldn't be understood.".into(),
            suggestion: "Check the job file is valid JSON with a paper size and a background colour.".into(),
            severity: Severity::ActionRequired,
        },
    }
}
