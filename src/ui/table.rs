use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::analysis::DatasetSummary;
use crate::data::loader::display_name;
use crate::state::AppState;

/// First `app.preview_rows` rows of the filtered view.
pub fn preview_table(ui: &mut Ui, state: &AppState) {
    ui.heading("Processed Data");

    let view = &state.view;
    let case = state.config.data.column_name_case;
    let rows = view.len().min(state.config.app.preview_rows);
    let columns = view.columns();
    if columns.is_empty() {
        ui.label("Nothing to show.");
        return;
    }

    egui::ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .vscroll(false)
                .columns(Column::auto().at_least(60.0).resizable(true), columns.len())
                .header(20.0, |mut header| {
                    for col in columns {
                        header.col(|ui| {
                            ui.strong(display_name(&col.name, case));
                        });
                    }
                })
                .body(|mut body| {
                    for row in 0..rows {
                        body.row(18.0, |mut table_row| {
                            for col in columns {
                                table_row.col(|ui| {
                                    ui.label(col.values[row].to_string());
                                });
                            }
                        });
                    }
                });
        });
}

/// Collapsible descriptive statistics of the full prepared table.
pub fn summary_section(ui: &mut Ui, summary: &DatasetSummary, state: &AppState) {
    let case = state.config.data.column_name_case;
    egui::CollapsingHeader::new(RichText::new("Dataset summary").strong())
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("numeric_summary")
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    for head in ["column", "count", "mean", "std", "min", "max"] {
                        ui.strong(head);
                    }
                    ui.end_row();
                    for s in &summary.numeric {
                        ui.label(display_name(&s.column, case));
                        ui.label(s.count.to_string());
                        ui.label(format!("{:.2}", s.mean));
                        ui.label(format!("{:.2}", s.std));
                        ui.label(format!("{:.2}", s.min));
                        ui.label(format!("{:.2}", s.max));
                        ui.end_row();
                    }
                });

            ui.separator();
            for o in &summary.outliers {
                ui.label(format!(
                    "{}: {} outliers outside [{:.2}, {:.2}]",
                    display_name(&o.column, case),
                    o.outliers,
                    o.lower,
                    o.upper
                ));
            }

            ui.separator();
            for cat in &summary.categories {
                let top = cat
                    .top
                    .iter()
                    .map(|(v, n)| format!("{v} ({n})"))
                    .collect::<Vec<_>>()
                    .join(", ");
                ui.label(format!("{}: {top}", display_name(&cat.column, case)));
            }
        });
}
