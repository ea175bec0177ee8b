// Chart preparation and ownership
//
// Charts are plain data built from the aggregation series; the terminal UI
// draws whatever is currently live. Each chart position is a `ChartSlot` that
// owns at most one handle: on every update the previous handle is released
// before the new one is acquired.

use crate::aggregate::CategorySeries;
use crate::tracker::View;
use std::f64::consts::TAU;
use tracing::trace;

/// Slice colors, cycled when there are more categories than entries
pub const PALETTE: [(u8, u8, u8); 6] = [
    (0xff, 0x63, 0x84),
    (0x36, 0xa2, 0xeb),
    (0xff, 0xce, 0x56),
    (0x4b, 0xc0, 0xc0),
    (0x99, 0x66, 0xff),
    (0xff, 0x9f, 0x40),
];

/// Line color for the time series
pub const LINE_COLOR: (u8, u8, u8) = (0x1a, 0x73, 0xe8);

pub fn palette_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

// ============================================================================
// PIE CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub value: f64,
    /// Fraction of the pie in [0, 1]; non-positive values get no area
    pub share: f64,
    pub color: (u8, u8, u8),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn from_series(series: &CategorySeries) -> Self {
        let positive_total: f64 = series.values().filter(|v| **v > 0.0).sum();

        let slices = series
            .iter()
            .enumerate()
            .map(|(i, (label, value))| PieSlice {
                label: label.clone(),
                value: *value,
                share: if *value > 0.0 && positive_total > 0.0 {
                    value / positive_total
                } else {
                    0.0
                },
                color: palette_color(i),
            })
            .collect();

        Self {
            title: "Spending by Category".to_string(),
            slices,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(|s| s.share == 0.0)
    }

    /// Slice covering `angle` (radians, counter-clockwise from the positive
    /// x axis). `None` when nothing has area.
    pub fn slice_at(&self, angle: f64) -> Option<usize> {
        let turn = angle.rem_euclid(TAU) / TAU;
        let mut start = 0.0;
        let mut last_with_area = None;

        for (i, slice) in self.slices.iter().enumerate() {
            if slice.share <= 0.0 {
                continue;
            }
            last_with_area = Some(i);
            start += slice.share;
            if turn < start {
                return Some(i);
            }
        }

        // Rounding can leave the sum of shares just under 1
        last_with_area
    }
}

// ============================================================================
// LINE CHART
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    /// (index of the date label, total)
    pub points: Vec<(f64, f64)>,
}

impl LineChart {
    pub fn from_series(series: &[(String, f64)]) -> Self {
        Self {
            title: "Spending Over Time".to_string(),
            x_label: "Date".to_string(),
            y_label: "Amount ($)".to_string(),
            labels: series.iter().map(|(date, _)| date.clone()).collect(),
            points: series
                .iter()
                .enumerate()
                .map(|(i, (_, total))| (i as f64, *total))
                .collect(),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        [0.0, (self.points.len().saturating_sub(1)).max(1) as f64]
    }

    /// Y range, always including zero
    pub fn y_bounds(&self) -> [f64; 2] {
        let min = self.points.iter().map(|p| p.1).fold(0.0, f64::min);
        let max = self.points.iter().map(|p| p.1).fold(0.0, f64::max);
        if max > min {
            [min, max]
        } else {
            [min, min + 1.0]
        }
    }
}

// ============================================================================
// SLOTS
// ============================================================================

#[derive(Debug)]
pub struct ChartHandle<C> {
    generation: u64,
    chart: C,
}

impl<C> ChartHandle<C> {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn chart(&self) -> &C {
        &self.chart
    }
}

#[derive(Debug)]
pub struct ChartSlot<C> {
    name: &'static str,
    live: Option<ChartHandle<C>>,
    acquired: u64,
    released: u64,
}

impl<C> ChartSlot<C> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            live: None,
            acquired: 0,
            released: 0,
        }
    }

    /// Release the current chart (if any), then install `chart`
    pub fn replace(&mut self, chart: C) -> &ChartHandle<C> {
        self.clear();

        self.acquired += 1;
        trace!(slot = self.name, generation = self.acquired, "chart acquired");
        self.live.insert(ChartHandle {
            generation: self.acquired,
            chart,
        })
    }

    pub fn clear(&mut self) {
        if let Some(previous) = self.live.take() {
            self.released += 1;
            trace!(slot = self.name, generation = previous.generation, "chart released");
        }
    }

    pub fn current(&self) -> Option<&ChartHandle<C>> {
        self.live.as_ref()
    }

    /// Handles acquired and not yet released; never more than one
    pub fn live_count(&self) -> u64 {
        self.acquired - self.released
    }
}

/// The two charts on screen
#[derive(Debug)]
pub struct ChartBoard {
    pub by_category: ChartSlot<PieChart>,
    pub over_time: ChartSlot<LineChart>,
}

impl Default for ChartBoard {
    fn default() -> Self {
        Self {
            by_category: ChartSlot::new("category"),
            over_time: ChartSlot::new("timeline"),
        }
    }
}

impl ChartBoard {
    pub fn update(&mut self, view: &View) {
        self.by_category.replace(PieChart::from_series(&view.by_category));
        self.over_time.replace(LineChart::from_series(&view.by_date));
    }
}
