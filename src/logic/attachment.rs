// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Reading a user-selected file into an in-memory attachment.

use std::fs;
use std::path::Path;

use crate::models::attachment::{Attachment, AttachmentError, check_size};
use crate::utils::guess_mime;

/// Load `path` as an attachment, rejecting it before reading when it exceeds the size limit.
///
/// # Errors
///
/// Returns [`AttachmentError::TooLarge`] for files over 5 MiB and
/// [`AttachmentError::Unreadable`] when metadata or contents cannot be read.
pub fn load_attachment(path: &Path) -> Result<Attachment, AttachmentError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "attachment".to_string());

    let unreadable = |err: std::io::Error| AttachmentError::Unreadable {
        name: name.clone(),
        reason: err.to_string(),
    };

    let metadata = fs::metadata(path).map_err(unreadable)?;
    check_size(&name, metadata.len())?;

    let bytes = fs::read(path).map_err(unreadable)?;
    // The file may have grown between stat and read.
    check_size(&name, bytes.len() as u64)?;

    log::debug!("Loaded attachment {name} ({} bytes)", bytes.len());
    Ok(Attachment::new(name, guess_mime(path), bytes))
}
