// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Contact form fields with inline validation feedback, in MVU shape.

use eframe::egui;

use crate::models::contact::{ContactFields, Field, FieldError};

/// UI model for the text fields, kept free of side effects.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
pub struct ContactFormModel {
    fields: ContactFields,
    errors: Vec<FieldError>,
}

/// Messages emitted by the form view or sent by the root update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContactFormMsg {
    FieldChanged(Field, String),
    ShowErrors(Vec<FieldError>),
    Reset,
}

impl ContactFormModel {
    /// Current raw input.
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    /// Outstanding validation errors in form order.
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First outstanding error for `field`.
    pub fn error_for(&self, field: Field) -> Option<&FieldError> {
        self.errors().iter().find(|err| err.field() == field)
    }
}

/// Apply a message to the form model.
pub fn update(model: &mut ContactFormModel, msg: ContactFormMsg) {
    match msg {
        ContactFormMsg::FieldChanged(field, value) => {
            model.fields.set(field, value);
            model.errors.retain(|err| err.field() != field);
        }
        ContactFormMsg::ShowErrors(errors) => model.errors = errors,
        ContactFormMsg::Reset => *model = ContactFormModel::default(),
    }
}

/// Render the form fields and return any edits made this frame.
pub fn view(ui: &mut egui::Ui, model: &ContactFormModel) -> Vec<ContactFormMsg> {
    let mut msgs = Vec::new();

    ui.columns(2, |cols| {
        render_single_line(&mut cols[0], model, Field::Name, "Your name", &mut msgs);
        render_single_line(
            &mut cols[1],
            model,
            Field::Email,
            "you@example.com",
            &mut msgs,
        );
    });
    ui.add_space(8.0);

    render_single_line(ui, model, Field::Subject, "How can I help?", &mut msgs);
    ui.add_space(8.0);

    ui.label(Field::Message.label());
    let mut message = model.fields.message.clone();
    if ui
        .add(
            egui::TextEdit::multiline(&mut message)
                .hint_text("Describe what you need…")
                .desired_rows(6)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        msgs.push(ContactFormMsg::FieldChanged(Field::Message, message));
    }
    render_field_error(ui, model, Field::Message);

    msgs
}

fn render_single_line(
    ui: &mut egui::Ui,
    model: &ContactFormModel,
    field: Field,
    hint: &str,
    msgs: &mut Vec<ContactFormMsg>,
) {
    ui.label(field.label());
    let mut value = model.fields.get(field).to_string();
    if ui
        .add(
            egui::TextEdit::singleline(&mut value)
                .hint_text(hint)
                .desired_width(f32::INFINITY),
        )
        .changed()
    {
        msgs.push(ContactFormMsg::FieldChanged(field, value));
    }
    render_field_error(ui, model, field);
}

fn render_field_error(ui: &mut egui::Ui, model: &ContactFormModel, field: Field) {
    if let Some(err) = model.error_for(field) {
        let color = ui.visuals().error_fg_color;
        ui.label(egui::RichText::new(err.to_string()).small().color(color));
    }
}
