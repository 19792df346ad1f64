//! Geometry for the two small SVG charts: the mood pie on the comments page
//! and the timeline on the home page.

use crate::models::MoodCounts;
use std::f64::consts::{FRAC_PI_2, TAU};

pub(crate) const PIE_WIDTH: f64 = 450.0;
pub(crate) const PIE_HEIGHT: f64 = 350.0;

const PALETTE: [&str; 8] = [
    "#3366cc", "#dc3912", "#ff9900", "#109618", "#990099", "#0099c6", "#dd4477", "#66aa00",
];

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PieSlice {
    pub label: String,
    pub count: u64,
    /// Radians, clockwise from 12 o'clock.
    pub start: f64,
    pub end: f64,
    pub color: &'static str,
}

impl PieSlice {
    pub fn fraction(&self) -> f64 {
        (self.end - self.start) / TAU
    }

    pub fn is_full_circle(&self) -> bool {
        self.fraction() >= 1.0 - 1e-9
    }

    /// SVG path for the wedge. A full circle can't be drawn as one arc, so
    /// callers render a `<circle>` when [`PieSlice::is_full_circle`] holds.
    pub fn path(&self, cx: f64, cy: f64, r: f64) -> String {
        let (x1, y1) = polar(cx, cy, r, self.start);
        let (x2, y2) = polar(cx, cy, r, self.end);
        let large_arc = u8::from(self.end - self.start > std::f64::consts::PI);
        format!(
            "M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {r:.2} {r:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z"
        )
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction() * 100.0)
    }
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> (f64, f64) {
    let a = angle - FRAC_PI_2;
    (cx + r * a.cos(), cy + r * a.sin())
}

/// One slice per mood with a non-zero count; empty when there is nothing to draw.
pub(crate) fn pie_slices(counts: &MoodCounts) -> Vec<PieSlice> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    counts
        .iter()
        .filter(|(_, count)| **count > 0)
        .enumerate()
        .map(|(i, (label, count))| {
            let start = angle;
            angle += *count as f64 / total as f64 * TAU;
            PieSlice {
                label: label.clone(),
                count: *count,
                start,
                end: angle,
                color: PALETTE[i % PALETTE.len()],
            }
        })
        .collect()
}

/// Year and 1-based month.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub const fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    fn index(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    pub fn label(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TimelineRow {
    pub category: &'static str,
    pub label: &'static str,
    pub start: YearMonth,
    /// `None` while ongoing.
    pub end: Option<YearMonth>,
}

pub(crate) fn timeline_rows() -> Vec<TimelineRow> {
    const fn row(
        category: &'static str,
        label: &'static str,
        start: YearMonth,
        end: Option<YearMonth>,
    ) -> TimelineRow {
        TimelineRow {
            category,
            label,
            start,
            end,
        }
    }

    vec![
        row("Location", "Nanjing", YearMonth::new(2012, 9), Some(YearMonth::new(2018, 8))),
        row("Location", "Baltimore", YearMonth::new(2018, 8), None),
        row("School", "NFLS", YearMonth::new(2012, 9), Some(YearMonth::new(2018, 8))),
        row("School", "JHU", YearMonth::new(2018, 8), None),
        row("Highlights", "Cornell", YearMonth::new(2017, 6), Some(YearMonth::new(2017, 8))),
        row("Highlights", "Megapro", YearMonth::new(2019, 5), Some(YearMonth::new(2019, 8))),
        row("Highlights", "Google", YearMonth::new(2020, 5), None),
    ]
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct TimelineBar {
    pub category: &'static str,
    pub label: &'static str,
    /// Percent of the chart width.
    pub left: f64,
    pub width: f64,
    pub span: String,
}

/// Lays bars out between the earliest start and `now`.
pub(crate) fn timeline_bars(rows: &[TimelineRow], now: YearMonth) -> Vec<TimelineBar> {
    let Some(first) = rows.iter().map(|r| r.start).min() else {
        return Vec::new();
    };
    let origin = first.index();
    let extent = (now.index() - origin).max(1) as f64;

    rows.iter()
        .map(|r| {
            let end = r.end.unwrap_or(now);
            let left = (r.start.index() - origin) as f64 / extent * 100.0;
            let width = ((end.index() - r.start.index()).max(0) as f64 / extent * 100.0)
                .min(100.0 - left);
            let span = match r.end {
                Some(end) => format!("{} – {}", r.start.label(), end.label()),
                None => format!("{} – now", r.start.label()),
            };
            TimelineBar {
                category: r.category,
                label: r.label,
                left,
                width,
                span,
            }
        })
        .collect()
}

/// Categories in order of first appearance.
pub(crate) fn timeline_categories(rows: &[TimelineRow]) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for r in rows {
        if !out.contains(&r.category) {
            out.push(r.category);
        }
    }
    out
}
