// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The axis renderer.
//!
//! An [`AxisRenderer`] owns one edge of the plot. Each render pass it sets
//! its scale's pixel range, measures label text, fits a tick count, decides
//! whether horizontal labels must rotate to avoid collisions, and submits
//! the resulting marks to its scene group. Pointer events over tick labels
//! are forwarded to the event bus with the tick's datum attached.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;
use kurbo::{BezPath, Point, Vec2};
use peniko::Brush;
use peniko::color::palette::css;
use skald_core::{
    ChartEvent, ComponentId, EventBus, EventKind, GroupId, Mark, MarkId, Pointer, Scene,
    TextAnchor, TextBaseline, Transitions,
};

use crate::config::{
    AxisOptions, ChartData, Margins, ScaleKind, TimeScaleOptions, defaults,
};
use crate::format::format_tick_with_step;
use crate::measure::{TextMeasurer, TextStyle};
use crate::scale::{CartesianScales, Scale};
use crate::{time, z_order};

/// Tick line length in pixels. Outer ticks (beyond the domain ends) are
/// always suppressed.
const TICK_SIZE: f64 = 6.0;
/// Padding between the tick end and its label.
const TICK_PADDING: f64 = 3.0;
/// Label rotation is always exactly 45 degrees when it triggers.
const ROTATION_DEGREES: f64 = 45.0;

/// A paint + width pair for stroked paths (domain lines, tick marks).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for the axis title.
    pub title_fill: Brush,
    /// Font size for the axis title.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 11.0,
        }
    }
}

/// Axis placement relative to the plot.
///
/// This is a closed set; there is no invalid-position runtime path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AxisPosition {
    /// A horizontal axis placed above the plot area.
    Top,
    /// A horizontal axis placed below the plot area.
    Bottom,
    /// A vertical axis placed to the left of the plot area.
    Left,
    /// A vertical axis placed to the right of the plot area.
    Right,
}

impl AxisPosition {
    /// Returns whether this is a vertical (left/right) axis.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns the kebab-case position name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// Everything a renderer needs for one pass, borrowed from the host.
pub struct RenderContext<'a> {
    /// The retained scene to submit marks into.
    pub scene: &'a mut Scene,
    /// The per-position scale provider.
    pub scales: &'a mut CartesianScales,
    /// Text measurement backend.
    pub measurer: &'a dyn TextMeasurer,
    /// Named transition registry.
    pub transitions: &'a Transitions,
    /// The chart's event bus.
    pub events: &'a mut EventBus,
    /// Chart data (labels + datasets).
    pub data: &'a ChartData,
    /// Container width in pixels.
    pub width: f64,
    /// Container height in pixels.
    pub height: f64,
}

impl core::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RenderContext")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("marks", &self.scene.mark_count())
            .finish_non_exhaustive()
    }
}

/// The datum bound to one rendered tick label.
#[derive(Clone, Debug, PartialEq)]
pub struct TickDatum {
    /// The tick's domain value (a label index for discrete scales).
    pub value: f64,
    /// The formatted label text.
    pub label: String,
}

/// Renders one axis and forwards pointer events on its tick labels.
#[derive(Debug)]
pub struct AxisRenderer {
    position: AxisPosition,
    options: AxisOptions,
    margins: Margins,
    has_left_axis: bool,
    has_right_axis: bool,
    time_scale: TimeScaleOptions,
    style: AxisStyle,
    id_base: u64,
    component: ComponentId,
    rendered_once: bool,
    /// The last applied label set, retained for the next pass's layout
    /// decisions. This is the analog of measuring an invisible mirror of
    /// the axis: it never enters the visible scene.
    probe_labels: Vec<String>,
    listeners: HashMap<MarkId, TickDatum>,
}

impl AxisRenderer {
    /// Creates an axis renderer for one position.
    ///
    /// `id_base` seeds this axis' group and mark ids; hosts give each
    /// component a disjoint id region.
    pub fn new(
        id_base: u64,
        component: ComponentId,
        position: AxisPosition,
        options: AxisOptions,
        margins: Margins,
    ) -> Self {
        Self {
            position,
            options,
            margins,
            has_left_axis: false,
            has_right_axis: false,
            time_scale: TimeScaleOptions::default(),
            style: AxisStyle::default(),
            id_base,
            component,
            rendered_once: false,
            probe_labels: Vec::new(),
            listeners: HashMap::new(),
        }
    }

    /// Declares which adjacent vertical axes exist, for horizontal span
    /// fallback.
    pub fn with_adjacent_axes(mut self, left: bool, right: bool) -> Self {
        self.has_left_axis = left;
        self.has_right_axis = right;
        self
    }

    /// Sets the chart-wide time-scale options.
    pub fn with_time_scale_options(mut self, time_scale: TimeScaleOptions) -> Self {
        self.time_scale = time_scale;
        self
    }

    /// Sets the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Returns this axis' position.
    pub fn position(&self) -> AxisPosition {
        self.position
    }

    /// Returns this axis' component id.
    pub fn component(&self) -> ComponentId {
        self.component
    }

    fn group(&self) -> GroupId {
        GroupId(self.id_base)
    }

    fn title_group(&self) -> GroupId {
        GroupId(self.id_base + 1)
    }

    /// Renders the axis into the scene.
    ///
    /// The first render is never animated; later renders animate when
    /// `animate` is set and the registry allows it.
    pub fn render(&mut self, ctx: &mut RenderContext<'_>, animate: bool) {
        let vertical = self.position.is_vertical();
        let (start, end) = pixel_span(
            self.position,
            self.margins,
            ctx.width,
            ctx.height,
            self.has_left_axis,
            self.has_right_axis,
        );

        let Some(scale) = ctx.scales.scale_by_position(self.position) else {
            return;
        };
        // Discrete ranges are rounded so every step lands on whole pixels.
        if scale.kind() == ScaleKind::Labels {
            scale.set_range_round((start, end));
        } else {
            scale.set_range((start, end));
        }
        let scale = scale.clone();

        // Probe measurement: the height of a representative tick text drives
        // tick fitting before any label of this pass exists.
        let label_style = TextStyle::new(self.style.label_font_size);
        let tick_height = ctx.measurer.measure("0", label_style).line_height();

        let explicit_count = self.options.ticks.number;
        let mut number_of_ticks = explicit_count.unwrap_or(defaults::TICK_COUNT);
        if explicit_count.is_none() && vertical {
            number_of_ticks = fitting_tick_count(
                ctx.height,
                tick_height,
                defaults::TICK_SPACE_RATIO_VERTICAL,
                defaults::TICK_COUNT,
            );
        }

        let is_time = scale.kind() == ScaleKind::Time;
        let mut tick_values = scale.ticks(number_of_ticks);
        if is_time {
            tick_values = time_tick_values(
                &tick_values,
                scale.domain(),
                self.time_scale.add_space_on_edges,
            );
        }
        let step = tick_step(&tick_values);
        let mut data = self.tick_data(&scale, &tick_values, step);

        ctx.scene.set_group_translate(
            self.group(),
            group_translate(self.position, self.margins, ctx.width, ctx.height),
        );

        self.render_title(ctx, &scale);

        let transition = if animate && self.rendered_once {
            ctx.transitions.get("axis-update", true)
        } else {
            None
        };
        let marks = self.axis_marks(&scale, &data, 0.0);
        ctx.scene.tick_group(self.group(), marks, transition);

        // Second pass for horizontal axes: measure, decide rotation, and
        // possibly re-apply at reduced density before rotating. Text metrics
        // only exist after the first layout, so this cannot collapse into
        // one pass.
        if !vertical {
            let rotate = match scale.step() {
                // Discrete: rotate when any label is at least a step wide.
                Some(step_px) => data
                    .iter()
                    .any(|d| ctx.measurer.measure(&d.label, label_style).advance_width >= step_px),
                // Continuous: rotate when the estimated per-tick width falls
                // under the configured threshold.
                None => {
                    let threshold = self
                        .options
                        .ticks
                        .rotate_if_smaller_than
                        .unwrap_or(defaults::ROTATE_IF_SMALLER_THAN);
                    should_rotate(ctx.width, data.len(), threshold)
                }
            };

            if rotate {
                if explicit_count.is_none() {
                    let reduced = fitting_tick_count(
                        ctx.width,
                        tick_height,
                        defaults::TICK_SPACE_RATIO_HORIZONTAL,
                        defaults::TICK_COUNT,
                    );
                    let mut reduced_values = scale.ticks(reduced);
                    if is_time {
                        reduced_values = time_tick_values(
                            &reduced_values,
                            scale.domain(),
                            self.time_scale.add_space_on_edges,
                        );
                    }
                    let step = tick_step(&reduced_values);
                    data = self.tick_data(&scale, &reduced_values, step);
                }
                let marks = self.axis_marks(&scale, &data, ROTATION_DEGREES);
                ctx.scene.tick_group(self.group(), marks, None);
            }
        }

        self.probe_labels = data.iter().map(|d| d.label.clone()).collect();
        self.refresh_listeners(&data);
        self.rendered_once = true;
    }

    /// Routes a pointer gesture on one of this axis' marks.
    ///
    /// Gestures on marks without a bound tick datum are ignored.
    pub fn handle_pointer(&self, ctx: &mut RenderContext<'_>, mark: MarkId, pointer: Pointer) {
        let Some(datum) = self.listeners.get(&mark) else {
            return;
        };
        let kind = match pointer {
            Pointer::Over => EventKind::AxisLabelMouseOver,
            Pointer::Move => EventKind::AxisLabelMouseMove,
            Pointer::Click => EventKind::AxisLabelClick,
            Pointer::Out => EventKind::AxisLabelMouseOut,
        };
        ctx.events.dispatch(
            ChartEvent::new(kind)
                .with_mark(mark)
                .with_key(datum.label.clone())
                .with_value(datum.value),
        );
    }

    /// Detaches pointer listeners without touching the rendered marks.
    /// Idempotent.
    pub fn destroy(&mut self) {
        self.listeners.clear();
    }

    /// The tick labels retained from the last render.
    pub fn probe_labels(&self) -> &[String] {
        &self.probe_labels
    }

    fn tick_data(&self, scale: &Scale, values: &[f64], step: f64) -> Vec<TickDatum> {
        values
            .iter()
            .map(|&v| TickDatum {
                value: v,
                label: self.format_tick(scale, v, step),
            })
            .collect()
    }

    fn format_tick(&self, scale: &Scale, v: f64, step: f64) -> String {
        if let Some(formatter) = &self.options.ticks.formatter {
            return formatter(v, step);
        }
        match scale.kind() {
            ScaleKind::Labels => scale.tick_label(v).unwrap_or_default().into(),
            ScaleKind::Time => time::format_time_seconds(v, step),
            _ => format_tick_with_step(v, step),
        }
    }

    fn refresh_listeners(&mut self, data: &[TickDatum]) {
        self.listeners.clear();
        for (i, datum) in data.iter().enumerate() {
            self.listeners
                .insert(MarkId(self.id_base + 1000 + i as u64), datum.clone());
        }
    }

    /// Generates this axis' marks in group-local coordinates.
    ///
    /// The group translate positions the axis; the domain line runs along
    /// the group's local zero line.
    fn axis_marks(&self, scale: &Scale, data: &[TickDatum], angle: f64) -> Vec<Mark> {
        let (r0, r1) = scale.range();
        let mut out = Vec::with_capacity(1 + 2 * data.len());

        let mut domain = BezPath::new();
        match self.position {
            AxisPosition::Top | AxisPosition::Bottom => {
                domain.move_to((r0, 0.0));
                domain.line_to((r1, 0.0));
            }
            AxisPosition::Left | AxisPosition::Right => {
                domain.move_to((0.0, r0));
                domain.line_to((0.0, r1));
            }
        }
        out.push(
            Mark::path(MarkId(self.id_base), domain)
                .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                .with_z_index(z_order::AXIS_RULES),
        );

        let label_offset = TICK_SIZE + TICK_PADDING;
        for (i, datum) in data.iter().enumerate() {
            let p = scale.map(datum.value);

            let mut tick = BezPath::new();
            let label_pos;
            match self.position {
                AxisPosition::Bottom => {
                    tick.move_to((p, 0.0));
                    tick.line_to((p, TICK_SIZE));
                    label_pos = Point::new(p, label_offset);
                }
                AxisPosition::Top => {
                    tick.move_to((p, 0.0));
                    tick.line_to((p, -TICK_SIZE));
                    label_pos = Point::new(p, -label_offset);
                }
                AxisPosition::Left => {
                    tick.move_to((0.0, p));
                    tick.line_to((-TICK_SIZE, p));
                    label_pos = Point::new(-label_offset, p);
                }
                AxisPosition::Right => {
                    tick.move_to((0.0, p));
                    tick.line_to((TICK_SIZE, p));
                    label_pos = Point::new(label_offset, p);
                }
            }
            out.push(
                Mark::path(MarkId(self.id_base + 1 + i as u64), tick)
                    .with_stroke(self.style.rule.brush.clone(), self.style.rule.stroke_width)
                    .with_z_index(z_order::AXIS_RULES),
            );

            let (anchor, baseline) = label_attachment(self.position, angle != 0.0);
            out.push(
                Mark::text(
                    MarkId(self.id_base + 1000 + i as u64),
                    label_pos,
                    datum.label.clone(),
                )
                .with_font_size(self.style.label_font_size)
                .with_fill(self.style.label_fill.clone())
                .with_anchor(anchor)
                .with_baseline(baseline)
                .with_angle(angle)
                .with_z_index(z_order::AXIS_LABELS),
            );
        }

        out
    }

    /// Renders the title mark into its own (untranslated) group, or skips
    /// the step entirely when no title is configured.
    fn render_title(&self, ctx: &mut RenderContext<'_>, scale: &Scale) {
        let Some(title) = &self.options.title else {
            return;
        };
        let (r0, r1) = scale.range();
        let font = self.style.title_font_size;
        let title_height = ctx
            .measurer
            .measure(title, TextStyle::new(font))
            .line_height();

        let (pos, angle, baseline) = match self.position {
            AxisPosition::Left => (
                Point::new(font, r0 / 2.0),
                -90.0,
                TextBaseline::Alphabetic,
            ),
            AxisPosition::Right => (
                Point::new(ctx.width - font, r0 / 2.0),
                90.0,
                TextBaseline::Alphabetic,
            ),
            AxisPosition::Bottom => (
                Point::new(self.margins.left / 2.0 + r1 / 2.0, ctx.height),
                0.0,
                TextBaseline::Alphabetic,
            ),
            AxisPosition::Top => (
                Point::new(self.margins.left / 2.0 + r1 / 2.0, title_height / 2.0),
                0.0,
                TextBaseline::Middle,
            ),
        };

        let mark = Mark::text(MarkId(self.id_base + 9000), pos, title.clone())
            .with_font_size(font)
            .with_fill(self.style.title_fill.clone())
            .with_anchor(TextAnchor::Middle)
            .with_baseline(baseline)
            .with_angle(angle)
            .with_z_index(z_order::AXIS_TITLES);
        ctx.scene
            .tick_group(self.title_group(), alloc::vec![mark], None);
    }
}

/// Computes the pixel `(start, end)` span of an axis line.
///
/// Horizontal axes span between the left margin boundary (when a left axis
/// exists) and the right margin boundary (when a right axis exists), falling
/// back to `0`/`width`. Vertical axes span bottom margin to top margin.
fn pixel_span(
    position: AxisPosition,
    margins: Margins,
    width: f64,
    height: f64,
    has_left_axis: bool,
    has_right_axis: bool,
) -> (f64, f64) {
    match position {
        AxisPosition::Top | AxisPosition::Bottom => {
            let start = if has_left_axis { margins.left } else { 0.0 };
            let end = if has_right_axis {
                width - margins.right
            } else {
                width
            };
            (start, end)
        }
        AxisPosition::Left | AxisPosition::Right => (height - margins.bottom, margins.top),
    }
}

/// Translate applied to an axis' scene group.
fn group_translate(position: AxisPosition, margins: Margins, width: f64, height: f64) -> Vec2 {
    match position {
        AxisPosition::Left => Vec2::new(margins.left, 0.0),
        AxisPosition::Bottom => Vec2::new(0.0, height - margins.bottom),
        AxisPosition::Right => Vec2::new(width - margins.right, 0.0),
        AxisPosition::Top => Vec2::new(0.0, margins.top),
    }
}

/// Number of ticks that fit in `size` given the tick text height and a
/// space ratio, clamped to `[2, max]`.
fn fitting_tick_count(size: f64, tick_height: f64, space_ratio: f64, max: usize) -> usize {
    let denom = tick_height * space_ratio;
    let fit = if denom > 0.0 {
        let f = (size / denom).floor();
        if f.is_finite() && f >= 0.0 {
            let f = f.min(10_000.0);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "guarded by finite/non-negative checks and capped at 10k"
            )]
            {
                f as usize
            }
        } else {
            0
        }
    } else {
        0
    };
    fit.clamp(2, max)
}

/// Continuous-scale rotation predicate: rotate when the estimated per-tick
/// width `width / tick_count / 2` falls below `threshold`.
fn should_rotate(width: f64, tick_count: usize, threshold: f64) -> bool {
    if tick_count == 0 {
        return false;
    }
    width / tick_count as f64 / 2.0 < threshold
}

/// Tick values for a time axis: auto ticks unioned with the domain
/// endpoints, sorted ascending and deduplicated. When `trim_edges` is set
/// and more than two values remain, the first and last are dropped so edge
/// labels are not clipped.
fn time_tick_values(auto: &[f64], domain: (f64, f64), trim_edges: bool) -> Vec<f64> {
    let mut values: Vec<f64> = auto.iter().copied().collect();
    values.push(domain.0);
    values.push(domain.1);
    values.sort_by(f64::total_cmp);
    values.dedup();
    if trim_edges && values.len() > 2 {
        values.truncate(values.len() - 1);
        values.remove(0);
    }
    values
}

fn tick_step(ticks: &[f64]) -> f64 {
    let step = ticks
        .windows(2)
        .map(|w| (w[1] - w[0]).abs())
        .fold(f64::INFINITY, f64::min);
    if step.is_finite() { step } else { 0.0 }
}

fn label_attachment(position: AxisPosition, rotated: bool) -> (TextAnchor, TextBaseline) {
    match position {
        AxisPosition::Bottom => {
            if rotated {
                (TextAnchor::Start, TextBaseline::Hanging)
            } else {
                (TextAnchor::Middle, TextBaseline::Hanging)
            }
        }
        AxisPosition::Top => {
            if rotated {
                (TextAnchor::End, TextBaseline::Ideographic)
            } else {
                (TextAnchor::Middle, TextBaseline::Ideographic)
            }
        }
        AxisPosition::Left => (TextAnchor::End, TextBaseline::Middle),
        AxisPosition::Right => (TextAnchor::Start, TextBaseline::Middle),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use skald_core::{MarkPayload, Scene};

    use crate::config::AxesConfig;
    use crate::measure::HeuristicTextMeasurer;

    use super::*;

    fn margins() -> Margins {
        Margins::new(10.0, 30.0, 40.0, 20.0)
    }

    struct Fixture {
        scene: Scene,
        scales: CartesianScales,
        transitions: Transitions,
        events: EventBus,
        data: ChartData,
    }

    impl Fixture {
        fn new(config: &AxesConfig, data: ChartData) -> Self {
            Self {
                scene: Scene::new(),
                scales: CartesianScales::new(config, &data),
                transitions: Transitions::new(),
                events: EventBus::new(),
                data,
            }
        }

        fn ctx(&mut self, width: f64, height: f64) -> RenderContext<'_> {
            RenderContext {
                scene: &mut self.scene,
                scales: &mut self.scales,
                measurer: &HeuristicTextMeasurer,
                transitions: &self.transitions,
                events: &mut self.events,
                data: &self.data,
                width,
                height,
            }
        }
    }

    fn linear_bottom_config() -> AxesConfig {
        AxesConfig {
            bottom: Some(AxisOptions::new(ScaleKind::Linear).with_domain((0.0, 10.0))),
            left: Some(AxisOptions::new(ScaleKind::Linear).with_domain((0.0, 10.0))),
            right: Some(AxisOptions::new(ScaleKind::Linear).with_domain((0.0, 10.0))),
            ..AxesConfig::default()
        }
    }

    #[test]
    fn bottom_axis_spans_between_margin_boundaries() {
        // Scenario: margins {left:40, right:20, top:10, bottom:30}, width 500.
        let span = pixel_span(AxisPosition::Bottom, margins(), 500.0, 300.0, true, true);
        assert_eq!(span, (40.0, 480.0));
    }

    #[test]
    fn absent_adjacent_axes_fall_back_to_full_width() {
        let span = pixel_span(AxisPosition::Bottom, margins(), 500.0, 300.0, false, false);
        assert_eq!(span, (0.0, 500.0));
        let only_left = pixel_span(AxisPosition::Top, margins(), 500.0, 300.0, true, false);
        assert_eq!(only_left, (40.0, 500.0));
    }

    #[test]
    fn vertical_axes_span_bottom_to_top_margin() {
        let span = pixel_span(AxisPosition::Left, margins(), 500.0, 300.0, true, true);
        assert_eq!(span, (270.0, 10.0));
    }

    #[test]
    fn group_translate_formulas_per_position() {
        let m = margins();
        assert_eq!(
            group_translate(AxisPosition::Left, m, 500.0, 300.0),
            Vec2::new(40.0, 0.0)
        );
        assert_eq!(
            group_translate(AxisPosition::Bottom, m, 500.0, 300.0),
            Vec2::new(0.0, 270.0)
        );
        assert_eq!(
            group_translate(AxisPosition::Right, m, 500.0, 300.0),
            Vec2::new(480.0, 0.0)
        );
        assert_eq!(
            group_translate(AxisPosition::Top, m, 500.0, 300.0),
            Vec2::new(0.0, 10.0)
        );
    }

    #[test]
    fn fitting_tick_count_clamps_and_grows_with_size() {
        // 10px tick height, vertical ratio 2.5 => one tick per 25px.
        assert_eq!(fitting_tick_count(30.0, 10.0, 2.5, 7), 2);
        assert_eq!(fitting_tick_count(100.0, 10.0, 2.5, 7), 4);
        assert_eq!(fitting_tick_count(1000.0, 10.0, 2.5, 7), 7);

        let mut last = 0;
        for size in [50, 100, 150, 200, 400, 800] {
            let n = fitting_tick_count(size as f64, 10.0, 2.5, 7);
            assert!(n >= last, "tick count must not shrink as size grows");
            assert!((2..=7).contains(&n));
            last = n;
        }
    }

    #[test]
    fn rotation_predicate_is_pure_in_width_count_threshold() {
        // width / count / 2 < threshold
        assert!(should_rotate(500.0, 10, 30.0)); // 25 < 30
        assert!(!should_rotate(500.0, 8, 30.0)); // 31.25 >= 30
        assert!(!should_rotate(500.0, 0, 30.0));
    }

    #[test]
    fn time_ticks_union_sort_dedupe_and_trim() {
        // Scenario: 5 auto ticks ∪ 2 domain endpoints with 1 duplicate
        // => 6 unique sorted values => edge trim => 4.
        let auto = [0.0, 25.0, 50.0, 75.0, 100.0];
        let domain = (-10.0, 100.0);
        let untrimmed = time_tick_values(&auto, domain, false);
        assert_eq!(untrimmed, vec![-10.0, 0.0, 25.0, 50.0, 75.0, 100.0]);

        let trimmed = time_tick_values(&auto, domain, true);
        assert_eq!(trimmed, vec![0.0, 25.0, 50.0, 75.0]);
        for w in trimmed.windows(2) {
            assert!(w[1] > w[0], "time ticks must strictly ascend");
        }
    }

    #[test]
    fn time_trim_keeps_two_or_fewer_values() {
        let values = time_tick_values(&[5.0], (5.0, 5.0), true);
        assert_eq!(values, vec![5.0]);
    }

    #[test]
    fn explicit_tick_count_is_respected() {
        let config = AxesConfig {
            left: Some(AxisOptions {
                scale_kind: ScaleKind::Linear,
                domain: Some((0.0, 100.0)),
                ticks: crate::config::TickOptions {
                    number: Some(5),
                    ..crate::config::TickOptions::default()
                },
                ..AxisOptions::default()
            }),
            ..AxesConfig::default()
        };
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Left,
            config.left.clone().unwrap(),
            margins(),
        );
        let mut ctx = fx.ctx(500.0, 300.0);
        axis.render(&mut ctx, false);
        // nice_ticks(0, 100, 5) -> 0,20,...,100: six labels.
        assert_eq!(axis.probe_labels().len(), 6);
        assert_eq!(axis.probe_labels()[1], "20");
    }

    #[test]
    fn first_render_is_never_animated_but_updates_are() {
        let config = linear_bottom_config();
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        )
        .with_adjacent_axes(true, true);

        let mut ctx = fx.ctx(500.0, 300.0);
        axis.render(&mut ctx, true);
        assert_eq!(
            fx.scene.group_translate(GroupId(100)),
            Vec2::new(0.0, 270.0)
        );
        let first_members = fx.scene.group_members(GroupId(100)).len();
        assert!(first_members > 0);

        // Second render with animate: the submitted diffs carry the axis
        // transition.
        let mut ctx = fx.ctx(500.0, 300.0);
        axis.render(&mut ctx, true);
        let members = fx.scene.group_members(GroupId(100)).len();
        assert_eq!(members, first_members, "re-render must be stable");
    }

    #[test]
    fn discrete_labels_rotate_when_wider_than_step() {
        let labels: Vec<String> = ["first quarter", "second quarter", "third quarter"]
            .iter()
            .map(|s| String::from(*s))
            .collect();
        let config = AxesConfig {
            bottom: Some(AxisOptions::new(ScaleKind::Labels)),
            ..AxesConfig::default()
        };
        let data = ChartData::new(labels, vec![vec![1.0, 2.0, 3.0]]);
        let mut fx = Fixture::new(&config, data);
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        );
        // 200px wide, 3 labels => ~66px step; "second quarter" at 10px font
        // measures 84px, so rotation triggers.
        let mut ctx = fx.ctx(200.0, 300.0);
        axis.render(&mut ctx, false);

        let label = fx.scene.mark(MarkId(100 + 1000)).expect("tick label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.angle, 45.0);
        assert_eq!(t.anchor, TextAnchor::Start);
    }

    #[test]
    fn narrow_continuous_axis_rotates_and_refits() {
        let config = linear_bottom_config();
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        )
        .with_adjacent_axes(true, true);

        // width 200, default 7 ticks: 200/ticks/2 is well under 30px.
        let mut ctx = fx.ctx(200.0, 300.0);
        axis.render(&mut ctx, false);

        let label = fx.scene.mark(MarkId(100 + 1000)).expect("tick label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.angle, 45.0);
        // Refit at the horizontal ratio: floor(200 / (10 * 3.5)) = 5.
        assert!(axis.probe_labels().len() <= 7);
    }

    #[test]
    fn wide_continuous_axis_keeps_labels_straight() {
        let config = linear_bottom_config();
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        )
        .with_adjacent_axes(true, true);

        let mut ctx = fx.ctx(1000.0, 300.0);
        axis.render(&mut ctx, false);

        let label = fx.scene.mark(MarkId(100 + 1000)).expect("tick label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.angle, 0.0);
        assert_eq!(t.anchor, TextAnchor::Middle);
    }

    #[test]
    fn title_mark_is_emitted_when_configured() {
        let mut config = linear_bottom_config();
        config.left = Some(
            AxisOptions::new(ScaleKind::Linear)
                .with_domain((0.0, 10.0))
                .with_title("Price"),
        );
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            200,
            ComponentId(2),
            AxisPosition::Left,
            config.left.clone().unwrap(),
            margins(),
        );
        let mut ctx = fx.ctx(500.0, 300.0);
        axis.render(&mut ctx, false);

        let title = fx.scene.mark(MarkId(200 + 9000)).expect("title mark");
        let MarkPayload::Text(t) = &title.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.text, "Price");
        assert_eq!(t.angle, -90.0);
        // Anchored at half the pixel range start (height - bottom margin).
        assert_eq!(t.pos.y, 270.0 / 2.0);
    }

    #[test]
    fn pointer_gestures_forward_tick_data_to_the_bus() {
        let config = linear_bottom_config();
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        )
        .with_adjacent_axes(true, true);
        let mut ctx = fx.ctx(1000.0, 300.0);
        axis.render(&mut ctx, false);

        let mut ctx = fx.ctx(1000.0, 300.0);
        axis.handle_pointer(&mut ctx, MarkId(100 + 1000), Pointer::Over);
        axis.handle_pointer(&mut ctx, MarkId(100 + 1000), Pointer::Click);
        // A mark without a bound datum is ignored.
        axis.handle_pointer(&mut ctx, MarkId(9_999_999), Pointer::Over);

        let over = fx.events.pop().expect("mouseover event");
        assert_eq!(over.kind, EventKind::AxisLabelMouseOver);
        assert_eq!(over.mark, Some(MarkId(1100)));
        assert_eq!(over.value, Some(0.0));
        let click = fx.events.pop().expect("click event");
        assert_eq!(click.kind, EventKind::AxisLabelClick);
        assert!(fx.events.pop().is_none());
    }

    #[test]
    fn destroy_detaches_listeners_and_is_idempotent() {
        let config = linear_bottom_config();
        let mut fx = Fixture::new(&config, ChartData::default());
        let mut axis = AxisRenderer::new(
            100,
            ComponentId(1),
            AxisPosition::Bottom,
            config.bottom.clone().unwrap(),
            margins(),
        );
        let mut ctx = fx.ctx(500.0, 300.0);
        axis.render(&mut ctx, false);
        let marks_before = fx.scene.mark_count();

        axis.destroy();
        axis.destroy();

        // Marks stay; only listeners are gone.
        assert_eq!(fx.scene.mark_count(), marks_before);
        let mut ctx = fx.ctx(500.0, 300.0);
        axis.handle_pointer(&mut ctx, MarkId(100 + 1000), Pointer::Over);
        assert!(fx.events.pop().is_none());
    }
}
