// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart renderers on top of `skald_core`.
//!
//! This crate turns chart configuration and data into `skald_core::Mark`
//! submissions:
//! - **Scales** map data values into screen coordinates.
//! - The **axis renderer** lays out ticks, labels, rotation, and titles.
//! - The **pie renderer** lays out sectors, percentage labels, and their
//!   hover/legend/tooltip interactions.
//!
//! Text shaping and layout are out of scope; label measurement goes through
//! the [`TextMeasurer`] seam and text marks store unshaped strings.

#![no_std]

extern crate alloc;

mod axis;
mod config;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod measure;
mod pie;
mod scale;
mod time;
mod z_order;

pub use axis::{
    AxisPosition, AxisRenderer, AxisStyle, RenderContext, StrokeStyle, TickDatum,
};
pub use config::{
    AxesConfig, AxisOptions, ChartData, Margins, PieOptions, ScaleKind, TickOptions,
    TimeScaleOptions, defaults,
};
pub use format::{format_tick_with_step, value_to_percentage};
pub use measure::{HeuristicTextMeasurer, TextMeasurer, TextMetrics, TextStyle};
pub use pie::{
    AngularSpan, ArcGenerator, ArcTween, PieDatum, PieRenderer, PieSlice, data_list, pie_layout,
};
pub use scale::{
    CartesianScales, Scale, ScaleLabels, ScaleLinear, ScaleLog, ScaleTime,
};
pub use time::{format_time_seconds, nice_time_ticks_seconds};
pub use z_order::*;
