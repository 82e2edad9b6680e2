// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Transient, non-blocking notifications stacked in the bottom-right corner.

use std::time::{Duration, Instant};

use eframe::egui;

/// How long a toast stays visible unless configured otherwise.
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_secs(5);
/// Oldest toasts are dropped beyond this many.
const MAX_TOASTS: usize = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub text: String,
    created: Instant,
}

/// Queue of visible toasts.
#[derive(Debug)]
pub struct ToastsModel {
    toasts: Vec<Toast>,
    next_id: u64,
    lifetime: Duration,
}

impl Default for ToastsModel {
    fn default() -> Self {
        Self::with_lifetime(DEFAULT_TOAST_LIFETIME)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ToastsMsg {
    Dismiss(u64),
    Expire(Instant),
}

impl ToastsModel {
    pub fn with_lifetime(lifetime: Duration) -> Self {
        Self {
            toasts: Vec::new(),
            next_id: 0,
            lifetime,
        }
    }

    /// Visible toasts, oldest first.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Most recent toast, if any.
    #[cfg(test)]
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.last()
    }

    /// Queue a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, text: impl Into<String>) -> u64 {
        self.push_at(kind, text, Instant::now())
    }

    fn push_at(&mut self, kind: ToastKind, text: impl Into<String>, now: Instant) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push(Toast {
            id,
            kind,
            text: text.into(),
            created: now,
        });
        if self.toasts.len() > MAX_TOASTS {
            let overflow = self.toasts.len() - MAX_TOASTS;
            self.toasts.drain(..overflow);
        }
        id
    }
}

/// Apply a message to the toast queue.
pub fn update(model: &mut ToastsModel, msg: ToastsMsg) {
    match msg {
        ToastsMsg::Dismiss(id) => model.toasts.retain(|t| t.id != id),
        ToastsMsg::Expire(now) => {
            let lifetime = model.lifetime;
            model
                .toasts
                .retain(|t| now.saturating_duration_since(t.created) < lifetime);
        }
    }
}

/// Draw the toast stack as a foreground overlay. Clicking a toast dismisses it.
pub fn view(ctx: &egui::Context, model: &ToastsModel) -> Vec<ToastsMsg> {
    let mut msgs = Vec::new();
    if model.toasts().is_empty() {
        return msgs;
    }

    msgs.push(ToastsMsg::Expire(Instant::now()));
    // Keep frames coming so expired toasts disappear without user input.
    ctx.request_repaint_after(Duration::from_millis(250));

    egui::Area::new(egui::Id::new("toasts"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-12.0, -12.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in model.toasts() {
                let (icon, color) = match toast.kind {
                    ToastKind::Info => (egui_phosphor::regular::INFO, ui.visuals().text_color()),
                    ToastKind::Success => (
                        egui_phosphor::regular::CHECK_CIRCLE,
                        egui::Color32::from_rgb(46, 160, 67),
                    ),
                    ToastKind::Error => (
                        egui_phosphor::regular::WARNING_CIRCLE,
                        ui.visuals().error_fg_color,
                    ),
                };

                let response = egui::Frame::popup(ui.style())
                    .show(ui, |ui| {
                        ui.set_max_width(320.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.label(egui::RichText::new(icon).color(color));
                            ui.label(&toast.text);
                        });
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_text("Click to dismiss");

                if response.clicked() {
                    msgs.push(ToastsMsg::Dismiss(toast.id));
                }
                ui.add_space(6.0);
            }
        });

    msgs
}
