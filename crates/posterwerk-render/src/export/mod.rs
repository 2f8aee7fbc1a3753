// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export — screen images (PNG, JPEG) and the print-ready PDF.

pub mod pdf;
pub mod raster;

pub use pdf::PrintPdfWriter;
pub use raster::{encode_jpeg, encode_png, write_png};
