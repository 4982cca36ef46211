//! Terminal rendering of the view models: a character-grid scatter plot, its
//! legend, and a fixed-width table.

use owo_colors::OwoColorize;

use prio_core::filter::ALL_LABEL;
use prio_core::form::DEFAULT_SCORE;
use prio_core::plot::{MarkerShape, Rgb};
use prio_core::{Category, FilterOutcome, PlotModel, TabularModel, TimeHorizon, WorkStream};

use crate::dashboard::ViewModel;
use crate::output;
use crate::router::View;

const CELL_WIDTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub color: bool,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self { color: false }
    }
}

pub fn glyph(marker: MarkerShape) -> char {
    match marker {
        MarkerShape::Circle => '●',
        MarkerShape::Square => '■',
        MarkerShape::Triangle => '▲',
    }
}

fn paint(text: &str, rgb: Rgb, opts: RenderOptions) -> String {
    if opts.color {
        text.truecolor(rgb.0, rgb.1, rgb.2).to_string()
    } else {
        text.to_string()
    }
}

/// Full page for one view.
pub fn render_view(model: &ViewModel, opts: RenderOptions) -> String {
    let mut out = String::new();
    out.push_str(&output::header(&model.view.title()));
    out.push('\n');

    if model.view == View::Add {
        out.push_str(&render_add_form(&model.outcome));
        return out;
    }

    if model.filters.is_unconstrained() {
        out.push_str("Filters: none\n\n");
    } else {
        out.push_str(&format!(
            "Filters: work stream = {}, time horizon = {}\n\n",
            model.filters.work_stream, model.filters.time_horizon
        ));
    }

    match &model.outcome {
        FilterOutcome::NotLoaded => out.push_str("Not loaded yet; refresh to fetch initiatives.\n"),
        FilterOutcome::EmptyStore => out.push_str("No initiatives recorded yet.\n"),
        FilterOutcome::NoMatch { total } => out.push_str(&format!(
            "No initiatives match the current filter ({total} recorded).\n"
        )),
        FilterOutcome::Rows(_) => {
            out.push_str(&render_table(&model.table));
            out.push('\n');
            out.push_str(&render_chart(&model.plot, opts));
            out.push_str(&render_legend(&model.plot, opts));
        }
    }
    out
}

fn render_add_form(outcome: &FilterOutcome) -> String {
    let streams: Vec<_> = WorkStream::ALL.iter().map(|w| w.label()).collect();
    let horizons: Vec<_> = TimeHorizon::ALL.iter().map(|h| h.label()).collect();
    let mut out = String::new();
    for (key, value) in [
        ("name", "required".to_string()),
        ("impact", format!("0-10 (default {DEFAULT_SCORE})")),
        ("feasibility", format!("0-10 (default {DEFAULT_SCORE})")),
        ("work stream", streams.join(" | ")),
        ("time horizon", horizons.join(" | ")),
        ("description", "optional".to_string()),
    ] {
        out.push_str(&output::kv(key, &value));
        out.push('\n');
    }
    let recorded = match outcome {
        FilterOutcome::NotLoaded => None,
        FilterOutcome::EmptyStore => Some(0),
        FilterOutcome::NoMatch { total } => Some(*total),
        FilterOutcome::Rows(rows) => Some(rows.len()),
    };
    if let Some(n) = recorded {
        out.push_str(&format!("\n{n} initiative(s) recorded.\n"));
    }
    out
}

/// Scatter plot on an 11x11 grid, feasibility up, impact across. A cell
/// holding several points shows their count in the first point's color.
pub fn render_chart(plot: &PlotModel, opts: RenderOptions) -> String {
    let (x_min, x_max) = (plot.x_axis.min, plot.x_axis.max);
    let (y_min, y_max) = (plot.y_axis.min, plot.y_axis.max);
    let mut out = format!("{}\n", plot.y_axis.title);

    for y in (y_min..=y_max).rev() {
        out.push_str(&format!("{y:>3} │"));
        for x in x_min..=x_max {
            let here: Vec<_> = plot.points.iter().filter(|p| p.x == x && p.y == y).collect();
            let cell = match here.as_slice() {
                [] => " · ".to_string(),
                [p] => paint(&format!(" {} ", glyph(p.marker)), p.color, opts),
                [p, ..] => {
                    let count = if here.len() > 9 {
                        "*".to_string()
                    } else {
                        here.len().to_string()
                    };
                    paint(&format!(" {count} "), p.color, opts)
                }
            };
            out.push_str(&cell);
        }
        out.push('\n');
    }

    let columns = (x_max - x_min + 1) as usize;
    out.push_str(&format!("    └{}\n", "─".repeat(columns * CELL_WIDTH)));
    out.push_str("     ");
    for x in x_min..=x_max {
        out.push_str(&format!("{x:^width$}", width = CELL_WIDTH));
    }
    out.push('\n');
    let axis_width = 5 + columns * CELL_WIDTH;
    out.push_str(&format!("{:^axis_width$}\n", plot.x_axis.title));
    out
}

pub fn render_legend(plot: &PlotModel, opts: RenderOptions) -> String {
    let mut out = String::new();
    if plot.is_empty() {
        return out;
    }
    if !plot.colors.is_empty() {
        let keys: Vec<_> = plot
            .colors
            .iter()
            .map(|c| format!("{} {}", paint("●", c.color, opts), c.work_stream))
            .collect();
        out.push_str(&format!("Work streams:  {}\n", keys.join("  ")));
    }
    if !plot.markers.is_empty() {
        let keys: Vec<_> = plot
            .markers
            .iter()
            .map(|m| format!("{} {}", glyph(m.marker), m.time_horizon))
            .collect();
        out.push_str(&format!("Time horizons: {}\n", keys.join("  ")));
    }
    let clamped = plot.points.iter().filter(|p| p.clamped).count();
    if clamped > 0 {
        out.push_str(&output::notice(&format!(
            "{clamped} point(s) outside the 0-10 domain are drawn at the edge"
        )));
        out.push('\n');
    }
    out
}

/// Header and rows; a table with no rows renders as nothing.
pub fn render_table(table: &TabularModel) -> String {
    if table.is_empty() {
        return String::new();
    }
    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &table.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };

    let mut out = line(table.columns.clone());
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&line(rule.iter().map(String::as_str).collect()));
    for row in &table.rows {
        out.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    out
}

/// Selector choices as shown in help text: "All" plus every value.
pub fn selector_help<T: Category>() -> String {
    std::iter::once(ALL_LABEL)
        .chain(T::all().iter().map(|v| v.label()))
        .collect::<Vec<_>>()
        .join(" | ")
}
