// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Top-level egui application shell for the contact form.
//! Handles layout, the submit control, and wiring to background workers.

pub mod components;

use anyhow::Result;
use eframe::egui;

use crate::config::AppConfig;
use crate::logic::submission::ContactClient;
use crate::mvu::{self, AppModel, Command, Msg};
use crate::ui::components::{attachment, contact_form, toasts};

/// Threads available for dialogs, file reads and HTTP requests.
const WORKER_THREADS: usize = 2;

/// Stateful egui application for composing and sending a contact message.
pub struct ContactApp {
    model: AppModel,
    inbox: Vec<Msg>,
    cmd_tx: crossbeam_channel::Sender<Command>,
    msg_rx: crossbeam_channel::Receiver<Msg>,
}

impl ContactApp {
    /// Build the app and start command workers that repaint `ctx` when they finish.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be created.
    pub fn new(config: &AppConfig, ctx: egui::Context) -> Result<Self> {
        let client = ContactClient::new(config.endpoint.clone())?;
        log::info!("Contact messages will be posted to {}", client.endpoint());

        let (cmd_tx, cmd_rx) = crossbeam_channel::unbounded::<Command>();
        let (msg_tx, msg_rx) = crossbeam_channel::unbounded::<Msg>();

        for _ in 0..WORKER_THREADS {
            let cmd_rx = cmd_rx.clone();
            let msg_tx = msg_tx.clone();
            let client = client.clone();
            let ctx = ctx.clone();
            std::thread::spawn(move || {
                for cmd in cmd_rx.iter() {
                    let msg = mvu::run_command(cmd, &client);
                    if msg_tx.send(msg).is_err() {
                        break;
                    }
                    ctx.request_repaint();
                }
            });
        }

        Ok(Self {
            model: AppModel::new(config.validation, config.toast_lifetime()),
            inbox: Vec::new(),
            cmd_tx,
            msg_rx,
        })
    }
}

impl eframe::App for ContactApp {
    fn ui(&mut self, ui: &mut egui::Ui, _frame: &mut eframe::Frame) {
        self.show(ui);
    }
}

impl ContactApp {
    /// Drives a single UI frame: applies worker results and queued messages, dispatches
    /// resulting commands, then renders the form, submit control, status bar and toasts.
    fn show(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        self.ensure_spacing(&ctx);
        self.process_messages();

        egui::Panel::top("top_bar").show_inside(ui, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.heading("Get in touch");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(2.0);
                    egui::widgets::global_theme_preference_switch(ui);
                });
            });
            ui.add_space(4.0);
        });

        egui::Panel::bottom("status_panel")
            .resizable(false)
            .show_inside(ui, |ui| {
                self.render_status(ui);
            });

        egui::CentralPanel::default().show_inside(ui, |ui| {
            ui.add_space(8.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                let form_msgs = contact_form::view(ui, &self.model.form);
                self.inbox.extend(form_msgs.into_iter().map(Msg::Form));
                ui.add_space(12.0);

                let att_msgs = attachment::view(ui, &self.model.attachment);
                self.inbox.extend(att_msgs.into_iter().map(Msg::Attachment));
                ui.add_space(16.0);

                self.render_submit_button(ui);
                ui.add_space(8.0);
            });
        });

        let toast_msgs = toasts::view(&ctx, &self.model.toasts);
        self.inbox.extend(toast_msgs.into_iter().map(Msg::Toasts));

        if !self.inbox.is_empty() {
            ctx.request_repaint();
        }
    }

    /// Apply worker results and queued UI messages, then hand new commands to the workers.
    fn process_messages(&mut self) {
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.model.pending_commands = self.model.pending_commands.saturating_sub(1);
            self.inbox.push(msg);
        }

        // Process in arrival order; updates must see field edits before a submit.
        let msgs = std::mem::take(&mut self.inbox);
        for msg in msgs {
            let mut commands = Vec::new();
            mvu::update(&mut self.model, msg, &mut commands);
            for cmd in commands {
                match self.cmd_tx.send(cmd) {
                    Ok(()) => self.model.pending_commands += 1,
                    Err(err) => log::error!("Command worker unavailable: {err}"),
                }
            }
        }
    }

    fn ensure_spacing(&self, ctx: &egui::Context) {
        ctx.global_style_mut(|style| {
            style.spacing.item_spacing = egui::vec2(6.0, 6.0);
        });
    }

    /// Full-width send button, disabled while a submission is in flight or a file is still loading.
    fn render_submit_button(&mut self, ui: &mut egui::Ui) {
        let submitting = self.model.is_submitting();
        let label = if submitting {
            format!("{} Sending…", egui_phosphor::regular::HOURGLASS)
        } else {
            format!("{} Send message", egui_phosphor::regular::PAPER_PLANE_TILT)
        };
        let button = egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 32.0));
        let disabled_hint = if submitting {
            "Your message is being sent"
        } else {
            "Wait for the attachment to finish loading"
        };

        if ui
            .add_enabled(self.model.can_submit(), button)
            .on_disabled_hover_text(disabled_hint)
            .clicked()
        {
            self.inbox.push(Msg::SubmitRequested);
        }
    }

    /// Background activity indicator.
    fn render_status(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let text = if self.model.is_submitting() {
                "Sending message…".to_string()
            } else if self.model.attachment.is_loading() {
                "Reading attachment…".to_string()
            } else if self.model.pending_commands > 0 {
                format!("{} task(s) running", self.model.pending_commands)
            } else {
                "Ready".to_string()
            };
            ui.label(egui::RichText::new(text).color(egui::Color32::from_gray(68)));
            if self.model.pending_commands > 0 {
                ui.add(egui::Spinner::new().size(14.0));
            }
        });
    }
}
