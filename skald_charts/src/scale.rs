// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales and the per-position scale provider.
//!
//! A [`Scale`] maps data values into pixel positions. The axis renderer does
//! not construct scales itself; it fetches the already-configured scale for
//! its position from [`CartesianScales`] and only sets the output range.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::axis::AxisPosition;
use crate::config::{AxesConfig, AxisOptions, ChartData, ScaleKind};
use crate::time;

/// A linear mapping from a continuous domain to a continuous range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLinear {
    domain: (f64, f64),
    range: (f64, f64),
}

impl ScaleLinear {
    /// Creates a linear scale with an unset (zero) range.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: (0.0, 0.0),
        }
    }

    /// Sets the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let denom = d1 - d0;
        if denom == 0.0 {
            return r0;
        }
        let t = (x - d0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns "nice-ish" tick values for the domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain.0, self.domain.1, count)
    }
}

/// A log-scale mapping from a positive domain to a range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleLog {
    domain: (f64, f64),
    range: (f64, f64),
    base: f64,
}

impl ScaleLog {
    /// Creates a base-10 log scale with an unset range.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: (0.0, 0.0),
            base: 10.0,
        }
    }

    /// Sets the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    fn log_base(&self, x: f64) -> f64 {
        let denom = self.base.ln();
        if denom == 0.0 { x.ln() } else { x.ln() / denom }
    }

    /// Maps a value from domain space into range space.
    pub fn map(&self, x: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if x <= 0.0 || d0 <= 0.0 || d1 <= 0.0 {
            return r0;
        }
        let ld0 = self.log_base(d0);
        let ld1 = self.log_base(d1);
        let denom = ld1 - ld0;
        if denom == 0.0 {
            return r0;
        }
        let t = (self.log_base(x) - ld0) / denom;
        r0 + t * (r1 - r0)
    }

    /// Returns powers of the base that fall within the domain, capped by `count`.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut min, mut max) = self.domain;
        if min > max {
            core::mem::swap(&mut min, &mut max);
        }
        if min <= 0.0 || !min.is_finite() || !max.is_finite() {
            return Vec::new();
        }
        let min_e = clamped_exp(self.log_base(min).floor());
        let max_e = clamped_exp(self.log_base(max).ceil());
        let mut out = Vec::new();
        for e in min_e..=max_e {
            out.push(self.base.powi(e));
            if count != 0 && out.len() >= count {
                break;
            }
        }
        out
    }
}

fn clamped_exp(e: f64) -> i32 {
    let e = e.clamp(i32::MIN as f64, i32::MAX as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the i32 range")]
    {
        e as i32
    }
}

/// A time scale: a linear scale over numeric seconds with time-aware ticks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleTime {
    inner: ScaleLinear,
}

impl ScaleTime {
    /// Creates a time scale with an unset range.
    pub fn new(domain: (f64, f64)) -> Self {
        Self {
            inner: ScaleLinear::new(domain),
        }
    }

    /// Sets the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.inner.set_range(range);
    }

    /// Maps a timestamp value into range space.
    pub fn map(&self, t: f64) -> f64 {
        self.inner.map(t)
    }

    /// Returns "nice-ish" tick values for the time domain.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        time::nice_time_ticks_seconds(self.inner.domain.0, self.inner.domain.1, count)
    }
}

/// A discrete scale over the chart's label list.
///
/// Values are label indices; each label occupies one step of the range and
/// maps to its step's midpoint. This is the only scale kind with a
/// [`Scale::step`].
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleLabels {
    labels: Vec<String>,
    range: (f64, f64),
}

impl ScaleLabels {
    /// Creates a labels scale with an unset range.
    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels,
            range: (0.0, 0.0),
        }
    }

    /// Sets the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    /// Returns the signed step between adjacent labels.
    pub fn step(&self) -> f64 {
        let n = self.labels.len();
        if n == 0 {
            return 0.0;
        }
        (self.range.1 - self.range.0) / n as f64
    }

    /// Maps a label index to its step midpoint.
    pub fn map(&self, index: f64) -> f64 {
        self.range.0 + self.step() * (index + 0.5)
    }

    /// Returns the label at `index`, if present.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Number of labels.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the label list is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A ready-to-use scale for one axis position.
#[derive(Clone, Debug, PartialEq)]
pub enum Scale {
    /// Continuous linear scale.
    Linear(ScaleLinear),
    /// Continuous log scale.
    Log(ScaleLog),
    /// Continuous time scale.
    Time(ScaleTime),
    /// Discrete labels scale.
    Labels(ScaleLabels),
}

impl Scale {
    /// Returns this scale's kind.
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Linear(_) => ScaleKind::Linear,
            Self::Log(_) => ScaleKind::Log,
            Self::Time(_) => ScaleKind::Time,
            Self::Labels(_) => ScaleKind::Labels,
        }
    }

    /// Sets the output range.
    pub fn set_range(&mut self, range: (f64, f64)) {
        match self {
            Self::Linear(s) => s.set_range(range),
            Self::Log(s) => s.set_range(range),
            Self::Time(s) => s.set_range(range),
            Self::Labels(s) => s.set_range(range),
        }
    }

    /// Sets the output range with endpoints rounded to whole pixels.
    ///
    /// Discrete scales use this so every step lands on pixel boundaries.
    pub fn set_range_round(&mut self, range: (f64, f64)) {
        self.set_range((range.0.round(), range.1.round()));
    }

    /// Returns the current output range.
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.range,
            Self::Log(s) => s.range,
            Self::Time(s) => s.inner.range,
            Self::Labels(s) => s.range,
        }
    }

    /// Returns the domain as `(min, max)` (label index extent for labels).
    pub fn domain(&self) -> (f64, f64) {
        match self {
            Self::Linear(s) => s.domain,
            Self::Log(s) => s.domain,
            Self::Time(s) => s.inner.domain,
            Self::Labels(s) => {
                let n = s.labels.len();
                if n == 0 {
                    (0.0, 0.0)
                } else {
                    (0.0, (n - 1) as f64)
                }
            }
        }
    }

    /// Returns tick values (label indices for the labels kind).
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        match self {
            Self::Linear(s) => s.ticks(count),
            Self::Log(s) => s.ticks(count),
            Self::Time(s) => s.ticks(count),
            Self::Labels(s) => (0..s.labels.len()).map(|i| i as f64).collect(),
        }
    }

    /// Returns the step size, present only for the discrete labels kind.
    ///
    /// Continuous scales return `None`; callers use this to pick the
    /// discrete vs. continuous branch of layout decisions.
    pub fn step(&self) -> Option<f64> {
        match self {
            Self::Labels(s) => Some(s.step().abs()),
            _ => None,
        }
    }

    /// Maps a domain value into range space.
    pub fn map(&self, v: f64) -> f64 {
        match self {
            Self::Linear(s) => s.map(v),
            Self::Log(s) => s.map(v),
            Self::Time(s) => s.map(v),
            Self::Labels(s) => s.map(v),
        }
    }

    /// Returns the label for a tick value, for the labels kind.
    pub fn tick_label(&self, v: f64) -> Option<&str> {
        match self {
            Self::Labels(s) => s.label(discrete_index(v)),
            _ => None,
        }
    }
}

fn nice_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count.max(1) as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    let start = (min / step).floor() * step;
    let stop = (max / step).ceil() * step;
    let n_f = ((stop - start) / step).round();
    let n = if n_f.is_finite() && n_f >= 0.0 {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    } else {
        0
    };
    (0..=n).map(|i| start + step * i as f64).collect()
}

fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    let base = 10_f64.powf(power);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

pub(crate) fn discrete_index(v: f64) -> usize {
    if !v.is_finite() || v < 0.0 {
        return 0;
    }
    let v = v.round().min(10_000.0);
    #[allow(
        clippy::cast_possible_truncation,
        reason = "value is clamped to a small non-negative range"
    )]
    {
        v as usize
    }
}

/// The per-position scale provider.
///
/// Constructed once from the chart's axis configuration and data; axes fetch
/// their scale by position each render and set its range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CartesianScales {
    left: Option<Scale>,
    right: Option<Scale>,
    top: Option<Scale>,
    bottom: Option<Scale>,
}

impl CartesianScales {
    /// Builds scales for every configured axis position.
    pub fn new(config: &AxesConfig, data: &ChartData) -> Self {
        Self {
            left: config.left.as_ref().map(|o| make_scale(o, data)),
            right: config.right.as_ref().map(|o| make_scale(o, data)),
            top: config.top.as_ref().map(|o| make_scale(o, data)),
            bottom: config.bottom.as_ref().map(|o| make_scale(o, data)),
        }
    }

    /// Returns the scale configured for `position`, if any.
    pub fn scale_by_position(&mut self, position: AxisPosition) -> Option<&mut Scale> {
        match position {
            AxisPosition::Left => self.left.as_mut(),
            AxisPosition::Right => self.right.as_mut(),
            AxisPosition::Top => self.top.as_mut(),
            AxisPosition::Bottom => self.bottom.as_mut(),
        }
    }

    /// Read-only access to the scale for `position`.
    pub fn scale(&self, position: AxisPosition) -> Option<&Scale> {
        match position {
            AxisPosition::Left => self.left.as_ref(),
            AxisPosition::Right => self.right.as_ref(),
            AxisPosition::Top => self.top.as_ref(),
            AxisPosition::Bottom => self.bottom.as_ref(),
        }
    }

    /// Returns whether an axis is configured at `position`.
    pub fn has_axis(&self, position: AxisPosition) -> bool {
        self.scale(position).is_some()
    }
}

fn make_scale(options: &AxisOptions, data: &ChartData) -> Scale {
    match options.scale_kind {
        ScaleKind::Labels => Scale::Labels(ScaleLabels::new(data.labels.clone())),
        kind => {
            let mut domain = options
                .domain
                .or_else(|| data.value_extent())
                .unwrap_or((0.0, 1.0));
            if options.include_zero {
                domain.0 = domain.0.min(0.0);
                domain.1 = domain.1.max(0.0);
            }
            if let Some(min) = options.ticks.min {
                domain.0 = min;
            }
            if let Some(max) = options.ticks.max {
                domain.1 = max;
            }
            match kind {
                ScaleKind::Linear => Scale::Linear(ScaleLinear::new(domain)),
                ScaleKind::Log => Scale::Log(ScaleLog::new(domain)),
                ScaleKind::Time => Scale::Time(ScaleTime::new(domain)),
                ScaleKind::Labels => unreachable!("handled above"),
            }
        }
    }
}
