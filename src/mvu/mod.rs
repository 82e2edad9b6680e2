// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Root Model-View-Update kernel wiring component state, messages, and commands.

use std::path::PathBuf;
use std::time::Duration;

use crate::logic::attachment::load_attachment;
use crate::logic::submission::{ContactClient, SubmissionResult};
use crate::models::attachment::ACCEPTED_EXTENSIONS;
use crate::models::contact::{ContactRequest, FieldError, ValidationPolicy, validate};
use crate::ui::components::attachment::{self, AttachmentCommand, AttachmentModel, AttachmentMsg};
use crate::ui::components::contact_form::{self, ContactFormModel, ContactFormMsg};
use crate::ui::components::toasts::{self, ToastKind, ToastsModel, ToastsMsg};

/// Whether a submission is in flight. Succeeded/Failed are reported and fall straight back to `Idle`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    Submitting,
}

/// Top-level application state.
#[derive(Debug, Default)]
pub struct AppModel {
    /// Contact form text fields.
    pub form: ContactFormModel,
    /// Optional attachment state.
    pub attachment: AttachmentModel,
    /// Visible notifications.
    pub toasts: ToastsModel,
    /// Submission state machine.
    pub phase: SubmissionPhase,
    /// Active validation rules.
    pub policy: ValidationPolicy,
    /// Count of queued background commands.
    pub pending_commands: usize,
}

impl AppModel {
    pub fn new(policy: ValidationPolicy, toast_lifetime: Duration) -> Self {
        Self {
            toasts: ToastsModel::with_lifetime(toast_lifetime),
            policy,
            ..Default::default()
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmissionPhase::Submitting
    }

    /// Submission needs an idle phase and no attachment still being read.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.attachment.is_loading()
    }
}

/// Application messages routed through the update function.
#[derive(Debug)]
pub enum Msg {
    Form(ContactFormMsg),
    Attachment(AttachmentMsg),
    Toasts(ToastsMsg),
    SubmitRequested,
    SubmissionFinished(SubmissionResult),
}

/// Commands represent side-effects executed between frames.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    PickAttachment,
    LoadAttachment { path: PathBuf },
    Submit(ContactRequest),
}

/// Update the application model and enqueue commands.
pub fn update(model: &mut AppModel, msg: Msg, cmds: &mut Vec<Command>) {
    match msg {
        Msg::Form(m) => contact_form::update(&mut model.form, m),
        Msg::Toasts(m) => toasts::update(&mut model.toasts, m),
        Msg::Attachment(m) => {
            let mut att_cmds = Vec::new();
            if let Some(event) = attachment::update(&mut model.attachment, m, &mut att_cmds) {
                let kind = if event.is_error {
                    ToastKind::Error
                } else {
                    ToastKind::Info
                };
                model.toasts.push(kind, event.message);
            }
            for c in att_cmds {
                match c {
                    AttachmentCommand::PickFile => cmds.push(Command::PickAttachment),
                    AttachmentCommand::LoadFile { path } => {
                        cmds.push(Command::LoadAttachment { path })
                    }
                }
            }
        }
        Msg::SubmitRequested => {
            if model.is_submitting() {
                log::debug!("Submission already in flight; ignoring submit request");
                return;
            }
            if model.attachment.is_loading() {
                model.toasts.push(
                    ToastKind::Info,
                    "Attachment is still loading; try again in a moment.",
                );
                return;
            }
            match validate_for_submit(model) {
                Ok(request) => {
                    model.phase = SubmissionPhase::Submitting;
                    cmds.push(Command::Submit(request));
                }
                Err(errors) => {
                    if let Some(first) = errors.first() {
                        model.toasts.push(ToastKind::Error, first.to_string());
                    }
                    contact_form::update(&mut model.form, ContactFormMsg::ShowErrors(errors));
                }
            }
        }
        Msg::SubmissionFinished(result) => {
            model.phase = SubmissionPhase::Idle;
            report(&mut model.toasts, &result);
            if result.is_success() {
                contact_form::update(&mut model.form, ContactFormMsg::Reset);
                model.attachment.clear();
            }
        }
    }
}

/// Execute a command on a worker thread and return the resulting message.
pub fn run_command(cmd: Command, client: &ContactClient) -> Msg {
    match cmd {
        Command::PickAttachment => {
            let file = rfd::FileDialog::new()
                .set_title("Select attachment")
                .add_filter("Documents and images", &ACCEPTED_EXTENSIONS)
                .pick_file();
            Msg::Attachment(AttachmentMsg::Picked(file))
        }
        Command::LoadAttachment { path } => {
            Msg::Attachment(AttachmentMsg::Loaded(load_attachment(&path)))
        }
        Command::Submit(request) => Msg::SubmissionFinished(client.submit(request)),
    }
}

/// Surface a submission outcome as a toast.
pub fn report(toasts: &mut ToastsModel, result: &SubmissionResult) {
    let kind = if result.is_success() {
        ToastKind::Success
    } else {
        ToastKind::Error
    };
    toasts.push(kind, result.notice());
}

/// Validate the form and snapshot the attachment into a request.
fn validate_for_submit(model: &AppModel) -> Result<ContactRequest, Vec<FieldError>> {
    let request = validate(model.form.fields(), model.policy)?;
    Ok(request.with_attachment(model.attachment.selected().cloned()))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::logic::submission::{DEFAULT_SUCCESS_MESSAGE, SubmissionError};
    use crate::models::attachment::{Attachment, AttachmentError, MAX_ATTACHMENT_BYTES};
    use crate::models::contact::Field;

    fn set(model: &mut AppModel, field: Field, value: &str) {
        let mut cmds = Vec::new();
        update(
            model,
            Msg::Form(ContactFormMsg::FieldChanged(field, value.into())),
            &mut cmds,
        );
        assert!(cmds.is_empty());
    }

    fn filled_model() -> AppModel {
        let mut model = AppModel::default();
        set(&mut model, Field::Name, "Ada Lovelace");
        set(&mut model, Field::Email, "ada@example.com");
        set(&mut model, Field::Subject, "Engines");
        set(&mut model, Field::Message, "About the analytical engine.");
        model
    }

    fn attach(model: &mut AppModel, attachment: Attachment) {
        let mut cmds = Vec::new();
        update(
            model,
            Msg::Attachment(AttachmentMsg::Loaded(Ok(attachment))),
            &mut cmds,
        );
    }

    fn small() -> Attachment {
        Attachment::new("cv.pdf".into(), "application/pdf".into(), b"%PDF".to_vec())
    }

    fn submit(model: &mut AppModel) -> Vec<Command> {
        let mut cmds = Vec::new();
        update(model, Msg::SubmitRequested, &mut cmds);
        cmds
    }

    fn finish(model: &mut AppModel, result: SubmissionResult) {
        let mut cmds = Vec::new();
        update(model, Msg::SubmissionFinished(result), &mut cmds);
        assert!(cmds.is_empty());
    }

    #[test]
    fn blank_field_blocks_submission_and_names_field() {
        for field in Field::ALL {
            let mut model = filled_model();
            set(&mut model, field, "   ");

            let cmds = submit(&mut model);

            assert!(cmds.is_empty(), "{field:?} should block submission");
            assert_eq!(model.phase, SubmissionPhase::Idle);
            assert!(model.form.error_for(field).is_some());
            let toast = model.toasts.latest().unwrap();
            assert_eq!(toast.kind, ToastKind::Error);
            assert!(toast.text.contains(field.label()));
        }
    }

    #[test]
    fn malformed_email_blocks_submission() {
        for email in ["ada.example.com", "ada@example"] {
            let mut model = filled_model();
            set(&mut model, Field::Email, email);

            assert!(submit(&mut model).is_empty(), "{email}");
            assert_eq!(model.form.errors(), &[FieldError::InvalidEmail]);
        }
    }

    #[test]
    fn strict_policy_is_applied() {
        let mut model = filled_model();
        model.policy = ValidationPolicy::Strict;
        set(&mut model, Field::Message, "short");

        assert!(submit(&mut model).is_empty());
        assert!(model.form.error_for(Field::Message).is_some());
    }

    #[test]
    fn valid_form_enqueues_one_trimmed_request_with_attachment() {
        let mut model = filled_model();
        set(&mut model, Field::Name, "  Ada Lovelace ");
        attach(&mut model, small());

        let cmds = submit(&mut model);

        assert_eq!(model.phase, SubmissionPhase::Submitting);
        match cmds.as_slice() {
            [Command::Submit(request)] => {
                assert_eq!(request.name, "Ada Lovelace");
                assert_eq!(request.attachment.as_ref(), Some(&small()));
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn second_submit_while_in_flight_is_ignored() {
        let mut model = filled_model();

        assert_eq!(submit(&mut model).len(), 1);
        assert!(submit(&mut model).is_empty());
        assert!(model.is_submitting());

        finish(&mut model, SubmissionResult::Failure(SubmissionError::Network("x".into())));

        assert_eq!(submit(&mut model).len(), 1, "idle again after the outcome");
    }

    #[test]
    fn submit_waits_for_attachment_to_finish_loading() {
        let mut model = filled_model();
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::Attachment(AttachmentMsg::Picked(Some("cv.pdf".into()))),
            &mut cmds,
        );
        assert!(model.attachment.is_loading());
        assert!(!model.can_submit());

        assert!(submit(&mut model).is_empty());
        assert_eq!(model.phase, SubmissionPhase::Idle);
        assert_eq!(model.toasts.latest().unwrap().kind, ToastKind::Info);

        attach(&mut model, small());
        assert!(model.can_submit());
        match submit(&mut model).as_slice() {
            [Command::Submit(request)] => assert_eq!(request.attachment.as_ref(), Some(&small())),
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn oversized_attachment_is_not_submitted() {
        let mut model = filled_model();
        attach(&mut model, small());
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::Attachment(AttachmentMsg::Loaded(Err(AttachmentError::TooLarge {
                name: "huge.zip".into(),
                size: MAX_ATTACHMENT_BYTES + 1,
            }))),
            &mut cmds,
        );
        assert_eq!(model.toasts.latest().unwrap().kind, ToastKind::Error);

        match submit(&mut model).as_slice() {
            [Command::Submit(request)] => assert!(request.attachment.is_none()),
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn success_reports_server_message_and_clears_form() {
        let mut model = filled_model();
        attach(&mut model, small());
        submit(&mut model);

        finish(&mut model, SubmissionResult::Success(Some("ok".into())));

        let toast = model.toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.text, "ok");
        assert_eq!(model.form, ContactFormModel::default());
        assert!(model.attachment.selected().is_none());
        assert_eq!(model.phase, SubmissionPhase::Idle);
    }

    #[test]
    fn success_without_message_uses_default() {
        let mut model = filled_model();
        submit(&mut model);

        finish(&mut model, SubmissionResult::Success(None));

        assert_eq!(model.toasts.latest().unwrap().text, DEFAULT_SUCCESS_MESSAGE);
    }

    #[test]
    fn server_error_reports_message_and_keeps_input() {
        let mut model = filled_model();
        attach(&mut model, small());
        let before = model.form.clone();
        submit(&mut model);

        finish(
            &mut model,
            SubmissionResult::Failure(SubmissionError::Rejected {
                status: 500,
                message: "boom".into(),
            }),
        );

        let toast = model.toasts.latest().unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.text, "boom");
        assert_eq!(model.form, before);
        assert_eq!(model.attachment.selected(), Some(&small()));
        assert_eq!(model.phase, SubmissionPhase::Idle);
    }

    #[test]
    fn network_failure_reports_connectivity_and_keeps_input() {
        let mut model = filled_model();
        let before = model.form.clone();
        submit(&mut model);

        finish(
            &mut model,
            SubmissionResult::Failure(SubmissionError::Network("connection refused".into())),
        );

        assert!(
            model
                .toasts
                .latest()
                .unwrap()
                .text
                .contains("Could not reach")
        );
        assert_eq!(model.form, before);
    }

    #[test]
    fn attachment_pick_flows_through_commands() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, b"hello").unwrap();
        let client = ContactClient::new("http://127.0.0.1:1/contact").unwrap();

        let mut model = AppModel::default();
        let mut cmds = Vec::new();
        update(
            &mut model,
            Msg::Attachment(AttachmentMsg::Picked(Some(path.clone()))),
            &mut cmds,
        );
        assert_eq!(cmds, vec![Command::LoadAttachment { path }]);

        let msg = run_command(cmds.pop().unwrap(), &client);
        update(&mut model, msg, &mut cmds);

        let att = model.attachment.selected().expect("attachment loaded");
        assert_eq!(att.file_name, "notes.txt");
        assert_eq!(att.mime, "text/plain");
    }

    #[test]
    fn submit_round_trip_against_server_clears_form() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/contact")
            .with_status(200)
            .with_body(r#"{"message":"ok"}"#)
            .expect(1)
            .create();
        let client = ContactClient::new(format!("{}/contact", server.url())).unwrap();

        let mut model = filled_model();
        let mut cmds = submit(&mut model);
        assert_eq!(cmds.len(), 1);

        let msg = run_command(cmds.pop().unwrap(), &client);
        update(&mut model, msg, &mut cmds);

        mock.assert();
        assert!(cmds.is_empty());
        assert_eq!(model.toasts.latest().unwrap().text, "ok");
        assert_eq!(model.form, ContactFormModel::default());
    }

    #[test]
    fn submit_round_trip_with_server_error_keeps_form() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/contact")
            .with_status(500)
            .with_body(r#"{"error":"boom"}"#)
            .expect(1)
            .create();
        let client = ContactClient::new(format!("{}/contact", server.url())).unwrap();

        let mut model = filled_model();
        let before = model.form.clone();
        let mut cmds = submit(&mut model);

        let msg = run_command(cmds.pop().unwrap(), &client);
        update(&mut model, msg, &mut cmds);

        mock.assert();
        assert_eq!(model.toasts.latest().unwrap().text, "boom");
        assert_eq!(model.form, before);
    }
}
