// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Single-file attachment picker refactored for MVU-style updates.

use std::path::PathBuf;

use eframe::egui;

use crate::models::attachment::{
    ACCEPTED_EXTENSIONS, Attachment, AttachmentError, MAX_ATTACHMENT_BYTES,
};
use crate::utils::{format_bytes, icon_for};

/// MVU state for the optional attachment.
#[derive(Debug, Default)]
pub struct AttachmentModel {
    selected: Option<Attachment>,
    loading: bool,
}

/// Messages emitted by the attachment view or produced by commands.
#[derive(Debug)]
pub enum AttachmentMsg {
    RequestPick,
    Picked(Option<PathBuf>),
    Loaded(Result<Attachment, AttachmentError>),
    Remove,
}

/// Side-effectful commands that can be run off the UI path.
#[derive(Debug, PartialEq, Eq)]
pub enum AttachmentCommand {
    PickFile,
    LoadFile { path: PathBuf },
}

/// User-facing events for the toast surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachmentEvent {
    /// Message text to display.
    pub message: String,
    /// Whether the message represents an error.
    pub is_error: bool,
}

impl AttachmentModel {
    /// Currently accepted attachment.
    pub fn selected(&self) -> Option<&Attachment> {
        self.selected.as_ref()
    }

    /// True while a picked file is being read.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Drop the current attachment, e.g. after a successful submission.
    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Apply a message to the attachment model. Returns a user-facing event when relevant.
pub fn update(
    model: &mut AttachmentModel,
    msg: AttachmentMsg,
    cmds: &mut Vec<AttachmentCommand>,
) -> Option<AttachmentEvent> {
    match msg {
        AttachmentMsg::RequestPick => {
            cmds.push(AttachmentCommand::PickFile);
            None
        }
        AttachmentMsg::Picked(None) => None,
        AttachmentMsg::Picked(Some(path)) => {
            model.loading = true;
            cmds.push(AttachmentCommand::LoadFile { path });
            None
        }
        AttachmentMsg::Loaded(Ok(attachment)) => {
            model.loading = false;
            let message = format!(
                "Attached {} ({})",
                attachment.file_name,
                format_bytes(attachment.size())
            );
            model.selected = Some(attachment);
            Some(AttachmentEvent {
                message,
                is_error: false,
            })
        }
        AttachmentMsg::Loaded(Err(err)) => {
            // A rejected pick leaves nothing attached, not even an earlier file.
            model.loading = false;
            model.selected = None;
            Some(AttachmentEvent {
                message: err.to_string(),
                is_error: true,
            })
        }
        AttachmentMsg::Remove => model.selected.take().map(|removed| AttachmentEvent {
            message: format!("Removed {}", removed.file_name),
            is_error: false,
        }),
    }
}

/// Render the attachment row and return any messages triggered by user interaction.
pub fn view(ui: &mut egui::Ui, model: &AttachmentModel) -> Vec<AttachmentMsg> {
    let mut msgs = Vec::new();

    ui.label(format!(
        "Attachment (optional, max {})",
        format_bytes(MAX_ATTACHMENT_BYTES)
    ));
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        let pick = egui::Button::new(format!(
            "{} Choose file",
            egui_phosphor::regular::PAPERCLIP
        ));
        if ui
            .add_enabled(!model.loading, pick)
            .on_hover_text("Attach a single file")
            .clicked()
        {
            msgs.push(AttachmentMsg::RequestPick);
        }

        if model.loading {
            ui.add(egui::Spinner::new().size(14.0));
        } else if let Some(att) = &model.selected {
            render_chip(ui, att, &mut msgs);
        }
    });

    ui.label(
        egui::RichText::new(format!(
            "Allowed formats: {}",
            ACCEPTED_EXTENSIONS.join(", ").to_ascii_uppercase()
        ))
        .small()
        .color(egui::Color32::from_gray(110)),
    );

    msgs
}

/// Selected file name, size, and a remove button.
fn render_chip(ui: &mut egui::Ui, att: &Attachment, msgs: &mut Vec<AttachmentMsg>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.horizontal(|ui| {
            ui.label(icon_for(&att.mime, &att.file_name));
            ui.add(egui::Label::new(&att.file_name).truncate())
                .on_hover_text(&att.file_name);
            ui.label(
                egui::RichText::new(format_bytes(att.size()))
                    .small()
                    .color(egui::Color32::from_gray(102)),
            );
            if ui
                .button(egui_phosphor::regular::X)
                .on_hover_text("Remove attachment")
                .clicked()
            {
                msgs.push(AttachmentMsg::Remove);
            }
        });
    });
}
