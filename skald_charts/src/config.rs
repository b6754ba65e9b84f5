// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Read-only configuration snapshots consumed by the renderers.
//!
//! The surrounding application owns these; renderers take them by value at
//! construction and never mutate them.

extern crate alloc;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;

/// Global layout/behavior defaults shared by the renderers.
pub mod defaults {
    /// Default (and maximum) tick count when none is configured.
    pub const TICK_COUNT: usize = 7;
    /// Minimum estimated per-tick width (px) before horizontal labels rotate.
    pub const ROTATE_IF_SMALLER_THAN: f64 = 30.0;
    /// Space ratio used when fitting ticks to a vertical extent.
    pub const TICK_SPACE_RATIO_VERTICAL: f64 = 2.5;
    /// Space ratio used when fitting ticks to a horizontal extent.
    pub const TICK_SPACE_RATIO_HORIZONTAL: f64 = 3.5;
    /// Opacity applied to pie slices not matching a hovered legend item.
    pub const LEGEND_DIM_OPACITY: f64 = 0.3;
}

/// Numeric insets establishing the usable drawing rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margins {
    /// Top inset.
    pub top: f64,
    /// Bottom inset.
    pub bottom: f64,
    /// Left inset.
    pub left: f64,
    /// Right inset.
    pub right: f64,
}

impl Margins {
    /// Creates margins from the four insets.
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }
}

/// The kind of scale an axis uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Continuous linear scale.
    #[default]
    Linear,
    /// Continuous log scale.
    Log,
    /// Continuous time scale (numeric seconds).
    Time,
    /// Discrete scale over the chart's label list.
    Labels,
}

/// Tick configuration for one axis.
#[derive(Clone, Default)]
pub struct TickOptions {
    /// Explicit number of ticks; `None` means computed/default.
    pub number: Option<usize>,
    /// Minimum tick value override.
    pub min: Option<f64>,
    /// Maximum tick value override.
    pub max: Option<f64>,
    /// Per-axis override of the rotation width threshold.
    pub rotate_if_smaller_than: Option<f64>,
    /// Custom tick formatter `(value, step) -> label`.
    pub formatter: Option<Arc<dyn Fn(f64, f64) -> String>>,
}

impl core::fmt::Debug for TickOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TickOptions")
            .field("number", &self.number)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("rotate_if_smaller_than", &self.rotate_if_smaller_than)
            .field("formatter", &self.formatter.is_some())
            .finish()
    }
}

/// Per-position axis configuration.
#[derive(Clone, Debug, Default)]
pub struct AxisOptions {
    /// Scale kind for this axis.
    pub scale_kind: ScaleKind,
    /// Domain override for continuous scales; `None` infers from data.
    pub domain: Option<(f64, f64)>,
    /// Force the domain to include zero.
    pub include_zero: bool,
    /// Optional axis title.
    pub title: Option<String>,
    /// Tick configuration.
    pub ticks: TickOptions,
    /// Whether this axis carries the chart's domain dimension (labels, time).
    ///
    /// A hint for hosts mapping data onto axes; the renderers themselves key
    /// scales off position, not off this flag.
    pub use_as_domain: bool,
    /// Whether this axis carries the chart's range dimension (values).
    ///
    /// Host-facing, like [`use_as_domain`](Self::use_as_domain).
    pub use_as_range: bool,
}

impl AxisOptions {
    /// Creates axis options for a scale kind with everything else defaulted.
    pub fn new(scale_kind: ScaleKind) -> Self {
        Self {
            scale_kind,
            ..Self::default()
        }
    }

    /// Sets a domain override.
    pub fn with_domain(mut self, domain: (f64, f64)) -> Self {
        self.domain = Some(domain);
        self
    }

    /// Forces the domain to include zero.
    pub fn with_include_zero(mut self, include_zero: bool) -> Self {
        self.include_zero = include_zero;
        self
    }

    /// Sets the axis title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the tick configuration.
    pub fn with_ticks(mut self, ticks: TickOptions) -> Self {
        self.ticks = ticks;
        self
    }
}

/// Time-scale behavior shared by all time axes of a chart.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeScaleOptions {
    /// Trim the first and last tick so edge labels are not clipped.
    pub add_space_on_edges: bool,
}

/// The chart's axis configuration: up to one axis per position.
#[derive(Clone, Debug, Default)]
pub struct AxesConfig {
    /// Left axis, if configured.
    pub left: Option<AxisOptions>,
    /// Right axis, if configured.
    pub right: Option<AxisOptions>,
    /// Top axis, if configured.
    pub top: Option<AxisOptions>,
    /// Bottom axis, if configured.
    pub bottom: Option<AxisOptions>,
    /// Time-scale behavior.
    pub time_scale: TimeScaleOptions,
}

/// Pie/donut renderer configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieOptions {
    /// Inner radius; `0` for a full pie, `> 0` for a donut.
    pub inner_radius: f64,
    /// Offset added to the computed outer radius.
    pub radius_offset: f64,
    /// Horizontal offset of the pie group within its container.
    pub x_offset: f64,
    /// Vertical offset of the pie group within its container.
    pub y_offset: f64,
    /// Padding angle between adjacent slices, in radians.
    pub pad_angle: f64,
    /// Extra outer radius applied to a hovered slice.
    pub hover_outer_radius_offset: f64,
}

impl Default for PieOptions {
    fn default() -> Self {
        Self {
            inner_radius: 0.0,
            radius_offset: -15.0,
            x_offset: 30.0,
            y_offset: 20.0,
            pad_angle: 0.007,
            hover_outer_radius_offset: 3.0,
        }
    }
}

/// Flat chart data: a label list plus one or more datasets of values.
///
/// The pie renderer pairs `labels` with the first dataset in index order;
/// axes use labels for the discrete scale and values for domain inference.
#[derive(Clone, Debug, Default)]
pub struct ChartData {
    /// Category labels.
    pub labels: Vec<String>,
    /// Value series; `datasets[0]` drives the pie.
    pub datasets: Vec<Vec<f64>>,
}

impl ChartData {
    /// Creates chart data from labels and datasets.
    pub fn new(labels: Vec<String>, datasets: Vec<Vec<f64>>) -> Self {
        Self { labels, datasets }
    }

    /// Returns the `(min, max)` extent over all finite values, if any.
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for dataset in &self.datasets {
            for &v in dataset {
                if !v.is_finite() {
                    continue;
                }
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min.is_finite() && max.is_finite()).then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    #[test]
    fn value_extent_skips_non_finite() {
        let data = ChartData::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![3.0, f64::NAN, -1.0], vec![7.0]],
        );
        assert_eq!(data.value_extent(), Some((-1.0, 7.0)));
        assert_eq!(ChartData::default().value_extent(), None);
    }

    #[test]
    fn tick_options_debug_reports_formatter_presence() {
        let mut opts = TickOptions::default();
        assert!(std::format!("{opts:?}").contains("formatter: false"));
        opts.formatter = Some(Arc::new(|v, _| alloc::format!("{v}")));
        assert!(std::format!("{opts:?}").contains("formatter: true"));
    }
}
