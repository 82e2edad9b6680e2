// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Phosphor file-icon mapping for attachment chips.

/// Return a Phosphor file icon for an attachment's MIME type and file name.
pub fn icon_for(mime: &str, file_name: &str) -> &'static str {
    let mime = mime
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    if mime.starts_with("image/") {
        return match ext.as_str() {
            "png" => egui_phosphor::regular::FILE_PNG,
            "jpg" | "jpeg" => egui_phosphor::regular::FILE_JPG,
            _ => egui_phosphor::regular::FILE_IMAGE,
        };
    }
    if mime == "application/pdf" {
        return egui_phosphor::regular::FILE_PDF;
    }
    if mime == "application/zip" || ext == "zip" {
        return egui_phosphor::regular::FILE_ARCHIVE;
    }
    if mime == "application/msword"
        || mime == "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        || ext == "doc"
        || ext == "docx"
    {
        return egui_phosphor::regular::FILE_DOC;
    }
    if ext == "txt" || mime.starts_with("text/") {
        return egui_phosphor::regular::FILE_TXT;
    }

    egui_phosphor::regular::FILE
}
