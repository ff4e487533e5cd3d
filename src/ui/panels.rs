use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(data) = &state.data else {
        ui.label("No dataset loaded.");
        return;
    };
    // Copy what the widgets need so state can be mutated below.
    let bounds = data.salary_bounds;
    let locations = data.locations.clone();
    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Designation regex ----
            ui.strong("Regex match for Designation");
            changed |= ui
                .text_edit_singleline(&mut state.params.title_pattern)
                .changed();
            if let Some(err) = &state.filter_error {
                ui.label(RichText::new(err.to_string()).color(Color32::RED).small());
            }
            ui.separator();

            // ---- Salary range ----
            ui.strong("Select Salary Range");
            match (bounds, state.params.salary_range) {
                (Some(b), Some((mut lo, mut hi))) => {
                    changed |= ui
                        .add(egui::Slider::new(&mut lo, b.min..=b.max).text("min"))
                        .changed();
                    changed |= ui
                        .add(egui::Slider::new(&mut hi, b.min..=b.max).text("max"))
                        .changed();
                    if lo > hi {
                        std::mem::swap(&mut lo, &mut hi);
                    }
                    state.params.salary_range = Some((lo, hi));
                }
                _ => {
                    ui.label("No numeric salaries in dataset.");
                }
            }
            ui.separator();

            // ---- Company substring ----
            ui.strong("Search by Company Name");
            changed |= ui
                .text_edit_singleline(&mut state.params.company_query)
                .changed();
            ui.separator();

            // ---- Location ----
            ui.strong("Select Location");
            let current = state
                .params
                .location
                .as_ref()
                .map_or_else(|| "All locations".to_string(), |v| v.to_string());
            egui::ComboBox::from_id_salt("location")
                .selected_text(current)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.params.location.is_none(), "All locations")
                        .clicked()
                    {
                        state.params.location = None;
                        changed = true;
                    }
                    for loc in &locations {
                        let selected = state.params.location.as_ref() == Some(loc);
                        if ui.selectable_label(selected, loc.to_string()).clicked() {
                            state.params.location = Some(loc.clone());
                            changed = true;
                        }
                    }
                });
        });

    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.data.is_some() {
            ui.label(format!(
                "{} rows loaded, {} visible",
                state.total_rows(),
                state.visible_indices.len()
            ));
            ui.separator();
            ui.label(RichText::new(state.source.display().to_string()).weak());
        }

        if let Some(msg) = &state.fatal_error {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open salary dataset")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.open(&path);
    }
}
