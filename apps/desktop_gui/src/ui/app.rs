use std::time::Duration;

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{report, IntakeField};
use shared::protocol::DiagnosticResult;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{FlowState, ViewState};

pub struct RevdxApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    flow: FlowState,
}

fn placeholder(field: IntakeField) -> &'static str {
    match field {
        IntakeField::CompanyName => "Acme Corp",
        IntakeField::Industry => "B2B SaaS, Manufacturing Tech, etc.",
        IntakeField::CurrentArr => "8000000",
        IntakeField::TargetArr => "15000000",
        IntakeField::SalesTeamSize => "12",
        IntakeField::AverageDealSize => "45000",
        IntakeField::SalesCycleLength => "120",
        IntakeField::WinRate => "22",
        IntakeField::Context => {
            "We've been stuck at $8M ARR for 9 months. Forecast accuracy is +/-30%..."
        }
    }
}

fn report_section(
    ui: &mut egui::Ui,
    fill: egui::Color32,
    stroke: egui::Color32,
    add: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::none()
        .fill(fill)
        .stroke(egui::Stroke::new(1.0, stroke))
        .rounding(8.0)
        .inner_margin(egui::Margin::symmetric(12.0, 10.0))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add(ui);
        });
    ui.add_space(10.0);
}

impl RevdxApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            flow: FlowState::new(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.flow.apply(event);
        }
    }

    fn try_submit(&mut self) {
        let Some(request) = self.flow.begin_submit() else {
            return;
        };
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::SubmitDiagnostic { request },
            &mut self.flow.status,
        );
        if !queued {
            self.flow.cancel_submit();
        }
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        if let Some(message) = self.flow.error_banner.clone() {
            egui::Frame::none()
                .fill(egui::Color32::from_rgb(111, 53, 53))
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
                .rounding(8.0)
                .inner_margin(egui::Margin::symmetric(10.0, 8.0))
                .show(ui, |ui| {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("Dismiss").clicked() {
                                self.flow.error_banner = None;
                            }
                        });
                    });
                });
            ui.add_space(8.0);
        }
    }

    fn intake_text_field(ui: &mut egui::Ui, field: IntakeField, value: &mut String) {
        ui.label(egui::RichText::new(field.label()).strong());
        if field == IntakeField::Context {
            ui.add(
                egui::TextEdit::multiline(value)
                    .hint_text(placeholder(field))
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );
        } else {
            ui.add_sized(
                [ui.available_width(), 30.0],
                egui::TextEdit::singleline(value).hint_text(placeholder(field)),
            );
        }
        ui.add_space(8.0);
    }

    fn show_intake_view(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_width(ui.available_width().clamp(420.0, 640.0));
                    ui.add_space(12.0);
                    ui.heading("RevDX");
                    ui.weak("Revenue Diagnostic Engine");
                    ui.add_space(6.0);
                    ui.label(egui::RichText::new("Get Your Free Diagnostic").strong());
                    ui.small("Find your growth constraint in 60 seconds.");
                    ui.add_space(12.0);

                    self.show_error_banner(ui);

                    for field in IntakeField::ALL {
                        let value = self.flow.draft.field_mut(field);
                        Self::intake_text_field(ui, field, value);
                    }

                    let submit_label = if self.flow.submitting {
                        "Generating Diagnostic..."
                    } else {
                        "Get My Free Diagnostic"
                    };
                    let button = egui::Button::new(egui::RichText::new(submit_label).strong())
                        .min_size(egui::vec2(ui.available_width(), 36.0));
                    if ui.add_enabled(!self.flow.submitting, button).clicked() {
                        self.try_submit();
                    }

                    ui.add_space(8.0);
                    ui.small("No credit card required. Takes 60 seconds.");
                    ui.add_space(6.0);
                    ui.separator();
                    ui.horizontal_wrapped(|ui| {
                        ui.small("Status:");
                        ui.small(egui::RichText::new(&self.flow.status).weak());
                    });
                    ui.add_space(12.0);
                });
            });
        });
    }

    fn show_results_view(&mut self, ctx: &egui::Context) {
        // An empty handoff slot means this view was reached without a
        // diagnostic; the reducer has already flipped back to intake.
        let Some(result) = self.flow.resolve_results_view() else {
            ctx.request_repaint();
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_width(ui.available_width().clamp(420.0, 680.0));
                    ui.add_space(12.0);
                    ui.horizontal(|ui| {
                        ui.vertical(|ui| {
                            ui.heading("RevDX");
                            ui.weak("Revenue Diagnostic Results");
                        });
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("New Diagnostic").clicked() {
                                self.flow.start_new_diagnostic();
                            }
                        });
                    });
                    ui.add_space(10.0);

                    ui.heading(&result.company_name);
                    ui.weak(format!(
                        "Diagnostic completed on {}",
                        report::completed_on(&result.created_at)
                    ));
                    ui.add_space(10.0);

                    self.show_report_sections(ui, &result);
                    ui.add_space(12.0);
                });
            });
        });
    }

    fn show_report_sections(&mut self, ui: &mut egui::Ui, result: &DiagnosticResult) {
        report_section(
            ui,
            egui::Color32::from_rgb(38, 42, 50),
            egui::Color32::from_rgb(70, 78, 92),
            |ui| {
                ui.columns(2, |columns| {
                    columns[0].small("Analysis Confidence");
                    columns[0].heading(report::confidence_percent(result.confidence_score));
                    columns[1].small("Pillars Analyzed");
                    columns[1].heading(report::pillar_list(&result.pillars_fired));
                });
            },
        );

        report_section(
            ui,
            egui::Color32::from_rgb(70, 32, 32),
            egui::Color32::from_rgb(175, 96, 96),
            |ui| {
                ui.label(
                    egui::RichText::new("Primary Constraint Detected")
                        .strong()
                        .color(egui::Color32::from_rgb(235, 130, 130)),
                );
                ui.label(egui::RichText::new(&result.primary_constraint).strong());
            },
        );

        report_section(
            ui,
            egui::Color32::from_rgb(72, 48, 24),
            egui::Color32::from_rgb(200, 140, 60),
            |ui| {
                ui.label(
                    egui::RichText::new("Root Cause")
                        .strong()
                        .color(egui::Color32::from_rgb(230, 170, 100)),
                );
                ui.label(&result.real_constraint);
            },
        );

        if !result.violations_detected.is_empty() {
            report_section(
                ui,
                egui::Color32::from_rgb(70, 62, 24),
                egui::Color32::from_rgb(190, 170, 70),
                |ui| {
                    ui.label(
                        egui::RichText::new("Operating Non-Negotiables Violated")
                            .strong()
                            .color(egui::Color32::from_rgb(225, 205, 110)),
                    );
                    for violation in &result.violations_detected {
                        ui.label(format!("! {violation}"));
                    }
                },
            );
        }

        report_section(
            ui,
            egui::Color32::from_rgb(28, 44, 72),
            egui::Color32::from_rgb(90, 130, 200),
            |ui| {
                ui.label(
                    egui::RichText::new("Actionable Insights")
                        .strong()
                        .color(egui::Color32::from_rgb(140, 175, 235)),
                );
                for (index, insight) in result.actionable_insights.iter().enumerate() {
                    ui.label(format!("{}. {insight}", index + 1));
                }
            },
        );

        report_section(
            ui,
            egui::Color32::from_rgb(38, 42, 50),
            egui::Color32::from_rgb(70, 78, 92),
            |ui| {
                ui.label(egui::RichText::new("Complete Analysis").strong());
                ui.add_space(4.0);
                ui.label(&result.analysis);
            },
        );
    }
}

impl eframe::App for RevdxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        match self.flow.view {
            ViewState::Intake => self.show_intake_view(ctx),
            ViewState::Results => self.show_results_view(ctx),
        }
        if self.flow.submitting {
            // Poll the worker's event queue while a request is in flight;
            // egui only repaints on input otherwise.
            ctx.request_repaint_after(Duration::from_millis(150));
        }
    }
}
