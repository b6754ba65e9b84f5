// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for renderer-generated marks.
//!
//! `skald_core` marks carry an explicit `z_index` for paint ordering. The
//! renderers set z-indexes consistently so callers don't have to hand-tune
//! paint order. Sinks sort by `(z_index, MarkId)` for a deterministic
//! tie-break.

/// Filled series marks (pie slices).
pub const SERIES_FILL: i32 = 0;
/// Series data labels drawn above their marks.
pub const SERIES_LABELS: i32 = 20;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;
