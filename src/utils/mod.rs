// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Shared helper utilities reused by UI and business logic.

pub mod file_icons;
pub mod format;

/// Select a Phosphor icon for the given MIME/file name.
pub use file_icons::icon_for;
/// Human-readable byte sizes, truncation and MIME guessing.
pub use format::{format_bytes, guess_mime, truncate_chars};
