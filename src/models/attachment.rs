// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Attachment domain model and size limits (UI-agnostic).

use std::fmt;

use thiserror::Error;

use crate::utils::format_bytes;

/// Largest accepted attachment: 5 MiB.
pub const MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions offered by the file dialog. Advisory only; nothing else checks them.
pub const ACCEPTED_EXTENSIONS: [&str; 7] = ["pdf", "doc", "docx", "txt", "jpg", "png", "zip"];

/// A file held in memory until it is submitted or removed.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: String, mime: String, bytes: Vec<u8>) -> Self {
        Self {
            file_name,
            mime,
            bytes,
        }
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

// Contents are omitted so logs stay readable.
impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("size", &self.size())
            .finish()
    }
}

/// Reasons a selected file is not accepted as an attachment.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AttachmentError {
    #[error(
        "File is too large (max {}): {name} is {}.",
        format_bytes(MAX_ATTACHMENT_BYTES),
        size_label(.size)
    )]
    TooLarge { name: String, size: u64 },
    #[error("Could not read {name}: {reason}")]
    Unreadable { name: String, reason: String },
}

fn size_label(size: &u64) -> String {
    format_bytes(*size)
}

/// Reject files over [`MAX_ATTACHMENT_BYTES`].
pub fn check_size(name: &str, size: u64) -> Result<(), AttachmentError> {
    if size > MAX_ATTACHMENT_BYTES {
        return Err(AttachmentError::TooLarge {
            name: name.to_string(),
            size,
        });
    }
    Ok(())
}
