use eframe::egui;

use crate::app::{RunStatus, SplitImgApp};
use crate::core::classifier::BackgroundPolicy;
use crate::core::distribution::PartitionStrategy;

/// Render the top panel with the application title
pub fn render_top_panel(app: &mut SplitImgApp, ctx: &egui::Context) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(8.0);
            ui.heading(app.config.app_title);
            ui.label(app.config.app_subtitle);
            ui.add_space(8.0);
        });
    });
}

/// Render the bottom panel with the version footer
pub fn render_bottom_panel(app: &mut SplitImgApp, ctx: &egui::Context) {
    egui::TopBottomPanel::bottom("bottom_panel").show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.add_space(4.0);
            ui.label(format!("V{}", app.config.version));
            ui.add_space(4.0);
        });
    });
}

/// Render the central panel: configuration, progress, and statistics
pub fn render_central_panel(app: &mut SplitImgApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            render_configuration_group(app, ui);
            ui.add_space(16.0);
            render_progress_group(app, ui);
            ui.add_space(16.0);
            render_statistics_group(app, ui);
            ui.add_space(16.0);
            render_run_controls(app, ui);
        });
    });
}

fn render_configuration_group(app: &mut SplitImgApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.heading("Designer Configuration");
        ui.add_space(6.0);

        ui.add_enabled_ui(!app.is_processing(), |ui| {
            ui.horizontal(|ui| {
                ui.label(format!(
                    "Number of Designers (1-{}):",
                    app.config.max_designers
                ));
                ui.add(
                    egui::TextEdit::singleline(&mut app.designer_input).desired_width(60.0),
                );
                if app.parsed_designer_count().is_none() && !app.designer_input.is_empty() {
                    ui.colored_label(
                        egui::Color32::from_rgb(255, 100, 100),
                        format!("Enter a number between 1 and {}", app.config.max_designers),
                    );
                }
            });

            ui.add_space(6.0);

            egui::ComboBox::from_label("Background heuristic")
                .selected_text(app.settings.background_policy.as_str())
                .show_ui(ui, |ui| {
                    for policy in BackgroundPolicy::all() {
                        ui.selectable_value(
                            &mut app.settings.background_policy,
                            policy,
                            policy.as_str(),
                        );
                    }
                });

            egui::ComboBox::from_label("Partition strategy")
                .selected_text(app.settings.partition_strategy.as_str())
                .show_ui(ui, |ui| {
                    for strategy in PartitionStrategy::all() {
                        ui.selectable_value(
                            &mut app.settings.partition_strategy,
                            strategy,
                            strategy.as_str(),
                        );
                    }
                });

            ui.checkbox(
                &mut app.settings.recursive_scan,
                "Include subfolders in the scan",
            );
        });
    });
}

fn render_progress_group(app: &mut SplitImgApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.heading("Progress");
        ui.add_space(6.0);

        ui.label(format!(
            "Scanning Images... ({} files found)",
            app.scan_count
        ));

        let fraction = if app.total > 0 {
            app.processed as f32 / app.total as f32
        } else {
            0.0
        };
        ui.label(format!(
            "Processing Images... ({}/{})",
            app.processed, app.total
        ));
        ui.add(egui::ProgressBar::new(fraction).show_percentage());

        match &app.status {
            RunStatus::Running => {
                ui.add_space(4.0);
                ui.spinner();
            }
            RunStatus::Complete => {
                ui.colored_label(
                    egui::Color32::from_rgb(100, 220, 100),
                    "✓ Processing complete — report written to the source folder",
                );
            }
            RunStatus::Cancelled => {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 150, 0),
                    "⚠ Run cancelled — remaining files were left in place",
                );
            }
            RunStatus::Failed(message) => {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 100, 100),
                    format!("✗ {}", message),
                );
            }
            RunStatus::Idle => {}
        }
    });
}

fn render_statistics_group(app: &mut SplitImgApp, ui: &mut egui::Ui) {
    ui.group(|ui| {
        ui.heading("Statistics");
        ui.add_space(6.0);

        if let Some(stats) = &app.stats {
            ui.label(format!("Total Images Processed: {}", stats.total_images));
            ui.label(format!(
                "White Background Images: {}",
                stats.white_background
            ));
            ui.label(format!(
                "Non-White Background Images: {}",
                stats.non_white_background
            ));
            ui.label(format!("Time Taken: {}", stats.elapsed_display()));
            if !stats.extensions.is_empty() {
                ui.label(format!("Extensions: {}", stats.extensions_summary()));
            }
        } else {
            ui.label("Total Images Processed: 0");
            ui.label("White Background Images: 0");
            ui.label("Non-White Background Images: 0");
            ui.label("Time Taken: 00:00:00");
        }
    });
}

fn render_run_controls(app: &mut SplitImgApp, ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        let can_run = app.parsed_designer_count().is_some() && !app.is_processing();
        if ui
            .add_enabled(can_run, egui::Button::new("Run").min_size([120.0, 36.0].into()))
            .clicked()
        {
            app.start_run();
        }

        if app.is_processing() && ui.button("Cancel").clicked() {
            app.cancel_run();
        }
    });
}
