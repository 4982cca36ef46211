//! Projection of initiatives into the prioritization matrix and its table.
//!
//! Both models are plain data with a serde representation so any charting
//! front end can draw them. Nothing here aggregates or scores: each point is
//! one record's raw impact/feasibility pair.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::types::{Category, Initiative, TimeHorizon, WorkStream, SCORE_MAX, SCORE_MIN};

/// Fixed domain of both axes.
pub const AXIS_DOMAIN: (i64, i64) = (SCORE_MIN, SCORE_MAX);

/// Categorical palette indexed by work stream ordinal (d3 category10).
const PALETTE: [Rgb; 10] = [
    Rgb(0x1f, 0x77, 0xb4),
    Rgb(0xff, 0x7f, 0x0e),
    Rgb(0x2c, 0xa0, 0x2c),
    Rgb(0xd6, 0x27, 0x28),
    Rgb(0x94, 0x67, 0xbd),
    Rgb(0x8c, 0x56, 0x4b),
    Rgb(0xe3, 0x77, 0xc2),
    Rgb(0x7f, 0x7f, 0x7f),
    Rgb(0xbc, 0xbd, 0x22),
    Rgb(0x17, 0xbe, 0xcf),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Color of a work stream. Keyed by the enum, not by order of appearance, so
/// it does not shift when a filter hides other streams.
pub fn color_for(work_stream: WorkStream) -> Rgb {
    PALETTE[work_stream.ordinal() % PALETTE.len()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Triangle,
}

impl MarkerShape {
    pub fn for_horizon(horizon: TimeHorizon) -> Self {
        match horizon {
            TimeHorizon::ShortTerm => Self::Circle,
            TimeHorizon::MediumTerm => Self::Square,
            TimeHorizon::LongTerm => Self::Triangle,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotPoint {
    pub id: i64,
    /// Impact, clamped to the axis domain.
    pub x: i64,
    /// Feasibility, clamped to the axis domain.
    pub y: i64,
    /// True when the stored value lay outside the domain and was clamped.
    pub clamped: bool,
    pub color: Rgb,
    pub marker: MarkerShape,
    pub work_stream: WorkStream,
    pub time_horizon: TimeHorizon,
    pub tooltip: Vec<TooltipField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Axis {
    pub title: &'static str,
    pub min: i64,
    pub max: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorKey {
    pub work_stream: WorkStream,
    pub color: Rgb,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerKey {
    pub time_horizon: TimeHorizon,
    pub marker: MarkerShape,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlotModel {
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub points: Vec<PlotPoint>,
    /// Work streams present among the points, in enum order.
    pub colors: Vec<ColorKey>,
    /// Time horizons present among the points, in enum order.
    pub markers: Vec<MarkerKey>,
}

impl PlotModel {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub fn project(records: &[Initiative]) -> PlotModel {
    let (min, max) = AXIS_DOMAIN;
    let points = records
        .iter()
        .map(|r| {
            let f = &r.fields;
            let x = f.impact.clamp(min, max);
            let y = f.feasibility.clamp(min, max);
            PlotPoint {
                id: r.id.get(),
                x,
                y,
                clamped: x != f.impact || y != f.feasibility,
                color: color_for(f.work_stream),
                marker: MarkerShape::for_horizon(f.time_horizon),
                work_stream: f.work_stream,
                time_horizon: f.time_horizon,
                tooltip: tooltip(r),
            }
        })
        .collect::<Vec<_>>();

    let colors = WorkStream::ALL
        .iter()
        .filter(|ws| points.iter().any(|p| p.work_stream == **ws))
        .map(|ws| ColorKey {
            work_stream: *ws,
            color: color_for(*ws),
        })
        .collect();
    let markers = TimeHorizon::ALL
        .iter()
        .filter(|th| points.iter().any(|p| p.time_horizon == **th))
        .map(|th| MarkerKey {
            time_horizon: *th,
            marker: MarkerShape::for_horizon(*th),
        })
        .collect();

    PlotModel {
        x_axis: Axis {
            title: "Impact",
            min,
            max,
        },
        y_axis: Axis {
            title: "Feasibility",
            min,
            max,
        },
        points,
        colors,
        markers,
    }
}

// Tooltips carry the stored values, never the clamped ones.
fn tooltip(record: &Initiative) -> Vec<TooltipField> {
    let f = &record.fields;
    let mut out = vec![
        TooltipField {
            label: "ID",
            value: record.id.get().to_string(),
        },
        TooltipField {
            label: "Name",
            value: f.name.clone(),
        },
        TooltipField {
            label: "Impact",
            value: f.impact.to_string(),
        },
        TooltipField {
            label: "Feasibility",
            value: f.feasibility.to_string(),
        },
        TooltipField {
            label: "Work Stream",
            value: f.work_stream.to_string(),
        },
        TooltipField {
            label: "Time Horizon",
            value: f.time_horizon.to_string(),
        },
    ];
    if let Some(description) = &f.description {
        out.push(TooltipField {
            label: "Description",
            value: description.clone(),
        });
    }
    out
}

pub const TABLE_COLUMNS: [&str; 7] = [
    "ID",
    "Name",
    "Impact",
    "Feasibility",
    "Work Stream",
    "Time Horizon",
    "Description",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TabularModel {
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

impl TabularModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// One row per record, in record order.
pub fn to_table(records: &[Initiative]) -> TabularModel {
    let rows = records
        .iter()
        .map(|r| {
            let f = &r.fields;
            vec![
                r.id.get().to_string(),
                f.name.clone(),
                f.impact.to_string(),
                f.feasibility.to_string(),
                f.work_stream.to_string(),
                f.time_horizon.to_string(),
                f.description.clone().unwrap_or_default(),
            ]
        })
        .collect();
    TabularModel {
        columns: TABLE_COLUMNS.to_vec(),
        rows,
    }
}
