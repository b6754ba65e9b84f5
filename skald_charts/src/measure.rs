// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for renderer layout.
//!
//! Tick fitting, rotation decisions, and pie label placement are all driven by
//! text metrics, but shaping lives downstream of this crate. Renderers accept
//! a measurer so a host can plug in a real metrics backend; the heuristic
//! implementation is good enough for layout decisions and tests.

/// Style inputs that affect measurement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in scene coordinates.
    pub font_size: f64,
}

impl TextStyle {
    /// Creates a style with the given font size.
    pub fn new(font_size: f64) -> Self {
        Self { font_size }
    }
}

/// Metrics for a single measured text run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextMetrics {
    /// Total advance width of the run.
    pub advance_width: f64,
    /// Ascent above the baseline.
    pub ascent: f64,
    /// Descent below the baseline.
    pub descent: f64,
}

impl TextMetrics {
    /// Returns the line height (ascent + descent).
    pub fn line_height(&self) -> f64 {
        self.ascent + self.descent
    }
}

/// A minimal text measurement interface used by the renderers.
pub trait TextMeasurer {
    /// Measures `text` at `style` in the same coordinate system as the marks.
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;
}

/// A tiny heuristic text measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em, with 0.8em ascent and 0.2em
/// descent.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        TextMetrics {
            advance_width: 0.6 * style.font_size * text.chars().count() as f64,
            ascent: 0.8 * style.font_size,
            descent: 0.2 * style.font_size,
        }
    }
}
