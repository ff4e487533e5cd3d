use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{band_color, company_colors};
use crate::state::AppState;

const CHART_HEIGHT: f32 = 260.0;

// ---------------------------------------------------------------------------
// Average salary by company
// ---------------------------------------------------------------------------

pub fn company_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Average Salary by Company");
    if state.company_means.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    let colors = company_colors(state.company_means.len());
    let bars: Vec<Bar> = state
        .company_means
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, ((company, mean), color))| {
            Bar::new(i as f64, *mean).name(company).fill(color).width(0.7)
        })
        .collect();

    Plot::new("avg_salary_by_company")
        .height(CHART_HEIGHT)
        .y_axis_label("Average Salary")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Average Salary"));
        });
}

// ---------------------------------------------------------------------------
// Salary band distribution
// ---------------------------------------------------------------------------

pub fn band_chart(ui: &mut Ui, state: &AppState) {
    ui.heading("Salary Band Distribution");

    Plot::new("salary_band_distribution")
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .y_axis_label("Number of Employees")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            // One chart per band so each label gets a legend entry.
            for (i, (band, count)) in state.band_counts.iter().enumerate() {
                let color = band_color(*band);
                let bar = Bar::new(i as f64, *count as f64)
                    .name(band.label())
                    .fill(color)
                    .width(0.7);
                plot_ui.bar_chart(BarChart::new(vec![bar]).name(band.label()).color(color));
            }
        });
}
