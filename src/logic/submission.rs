// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Posting a contact request to the message-delivery endpoint.
//!
//! Responsibilities:
//! - Assemble the multipart body (`name`, `email`, `subject`, `message`, optional `attachment`).
//! - Issue exactly one `POST` per submission; no retries.
//! - Turn the HTTP outcome into a [`SubmissionResult`] the UI can report.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::blocking::{Client, multipart};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::contact::ContactRequest;
use crate::utils::truncate_chars;

/// Multipart key carrying the optional file.
pub const ATTACHMENT_FIELD: &str = "attachment";
/// Shown when the server accepts the message without saying anything.
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Message sent!";
/// Upper bound for raw response text echoed back to the user.
const MAX_BODY_EXCERPT_CHARS: usize = 200;

/// Why a submission did not go through.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SubmissionError {
    /// The server answered with an error status and a readable message.
    #[error("{message}")]
    Rejected { status: u16, message: String },
    /// The server answered with an error status but no usable message.
    #[error("Server error ({status}){}", body_suffix(.body))]
    Server { status: u16, body: Option<String> },
    /// No response was received.
    #[error("Could not reach the message service. Check your connection and try again.")]
    Network(String),
    /// The request body could not be assembled.
    #[error("Could not prepare the message: {0}")]
    Payload(String),
}

impl SubmissionError {
    /// HTTP status the server answered with, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            SubmissionError::Rejected { status, .. } | SubmissionError::Server { status, .. } => {
                Some(*status)
            }
            SubmissionError::Network(_) | SubmissionError::Payload(_) => None,
        }
    }

    /// Diagnostic text for logs, including the status code or transport error
    /// that the user-facing message leaves out.
    pub fn log_detail(&self) -> String {
        match self {
            SubmissionError::Network(cause) => format!("{self} ({cause})"),
            _ => match self.status() {
                Some(status) => format!("{self} [status {status}]"),
                None => self.to_string(),
            },
        }
    }
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_deref()
        .map(|text| format!(": {text}"))
        .unwrap_or_default()
}

/// Outcome of one submission attempt, consumed once by the reporter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Accepted, with the server's message when it sent one.
    Success(Option<String>),
    Failure(SubmissionError),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Success(_))
    }

    /// Text for the user-facing notification.
    pub fn notice(&self) -> String {
        match self {
            SubmissionResult::Success(Some(message)) => message.clone(),
            SubmissionResult::Success(None) => DEFAULT_SUCCESS_MESSAGE.to_string(),
            SubmissionResult::Failure(err) => err.to_string(),
        }
    }
}

/// Blocking HTTP client bound to a single endpoint. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ContactClient {
    http: Client,
    endpoint: String,
}

impl ContactClient {
    /// Build a client for `endpoint` using the transport's default timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `request` once and interpret the response.
    ///
    /// Never panics and never retries; every failure is folded into
    /// [`SubmissionResult::Failure`].
    pub fn submit(&self, request: ContactRequest) -> SubmissionResult {
        let has_attachment = request.attachment.is_some();
        let form = match build_form(request) {
            Ok(form) => form,
            Err(err) => {
                log::warn!("Failed to assemble contact payload: {err}");
                return SubmissionResult::Failure(err);
            }
        };

        log::info!(
            "Submitting contact message to {} (attachment: {has_attachment})",
            self.endpoint
        );

        let response = match self.http.post(&self.endpoint).multipart(form).send() {
            Ok(response) => response,
            Err(err) => {
                let err = SubmissionError::Network(err.to_string());
                log::warn!("Contact submission failed: {}", err.log_detail());
                return SubmissionResult::Failure(err);
            }
        };

        let status = response.status();
        let body = response.text().unwrap_or_else(|err| {
            log::warn!("Failed to read response body ({status}): {err}");
            String::new()
        });

        let result = interpret_response(status, &body);
        match &result {
            SubmissionResult::Success(_) => log::info!("Contact message accepted ({status})"),
            SubmissionResult::Failure(err) => {
                log::warn!("Contact message rejected: {}", err.log_detail())
            }
        }
        result
    }
}

/// Assemble the multipart body for `request`, moving the attachment bytes into the form.
///
/// # Errors
///
/// Returns [`SubmissionError::Payload`] when the attachment MIME type is malformed.
pub fn build_form(request: ContactRequest) -> Result<multipart::Form, SubmissionError> {
    let mut form = multipart::Form::new();
    for (key, value) in request.text_parts() {
        form = form.text(key, value.to_string());
    }

    if let Some(attachment) = request.attachment {
        let part = multipart::Part::bytes(attachment.bytes)
            .file_name(attachment.file_name)
            .mime_str(&attachment.mime)
            .map_err(|err| SubmissionError::Payload(err.to_string()))?;
        form = form.part(ATTACHMENT_FIELD, part);
    }

    Ok(form)
}

/// Map an HTTP status and body to a submission outcome.
///
/// Bodies are parsed as a JSON object when possible; anything else is kept as raw text.
/// Any non-2xx status is a failure regardless of the body.
pub fn interpret_response(status: StatusCode, body: &str) -> SubmissionResult {
    let body = body.trim();
    let reply = parse_object(body);

    if status.is_success() {
        let message = match &reply {
            Some(obj) => string_field(obj, "message"),
            None => json_string(body).or_else(|| excerpt(body)),
        };
        return SubmissionResult::Success(message);
    }

    let message = reply
        .as_ref()
        .and_then(|obj| string_field(obj, "error").or_else(|| string_field(obj, "message")));

    let err = match message {
        Some(message) => SubmissionError::Rejected {
            status: status.as_u16(),
            message,
        },
        None => SubmissionError::Server {
            status: status.as_u16(),
            body: if reply.is_none() { excerpt(body) } else { None },
        },
    };
    SubmissionResult::Failure(err)
}

fn parse_object(body: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A body that is a bare JSON string, e.g. `"Thanks"`.
fn json_string(body: &str) -> Option<String> {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::String(text)) => {
            let text = text.trim();
            (!text.is_empty()).then(|| truncate_chars(text, MAX_BODY_EXCERPT_CHARS))
        }
        _ => None,
    }
}

fn excerpt(body: &str) -> Option<String> {
    (!body.is_empty()).then(|| truncate_chars(body, MAX_BODY_EXCERPT_CHARS))
}
