// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pie/donut renderer.
//!
//! Slices are laid out clockwise from the top, largest first, with an
//! optional padding angle between neighbors. Slice identity is keyed by the
//! datum's label, so re-renders and reorders update marks in place instead
//! of recreating them. Angular interpolation state for animated updates
//! lives in an explicit per-label tween store owned by the renderer.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use core::f64::consts::{FRAC_PI_2, TAU};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use hashbrown::HashMap;
use kurbo::{BezPath, Circle, Point, Shape, Vec2};
use peniko::Color;
use peniko::color::palette::css;
use skald_core::{
    ChartEvent, ComponentId, EventBus, EventKind, GroupId, Mark, MarkId, Pointer, Scene,
    TextAnchor, TextBaseline,
};

use crate::config::{ChartData, PieOptions, defaults};
use crate::format::value_to_percentage;
use crate::measure::TextStyle;
use crate::{axis::RenderContext, z_order};

/// Fill colors assigned to slices in order of first appearance.
const PALETTE: &[Color] = &[
    css::STEEL_BLUE,
    css::DARK_ORANGE,
    css::MEDIUM_SEA_GREEN,
    css::INDIAN_RED,
    css::MEDIUM_PURPLE,
    css::GOLDENROD,
    css::LIGHT_SEA_GREEN,
    css::PALE_VIOLET_RED,
];

/// Extra radius applied to the label anchor circle.
const LABEL_RADIUS_MARGIN: f64 = 2.0;
/// Padding added around the measured label text when offsetting it.
const LABEL_PADDING: f64 = 5.0;
/// Font size for slice percentage labels.
const LABEL_FONT_SIZE: f64 = 12.0;

/// One labeled value of the pie.
#[derive(Clone, Debug, PartialEq)]
pub struct PieDatum {
    /// The category label (also the slice's identity key).
    pub label: String,
    /// The datum's value.
    pub value: f64,
}

/// Pairs the chart's labels with the first dataset, in index order. Extra
/// labels or values without a counterpart are dropped.
pub fn data_list(data: &ChartData) -> Vec<PieDatum> {
    let Some(values) = data.datasets.first() else {
        return Vec::new();
    };
    data.labels
        .iter()
        .zip(values.iter())
        .map(|(label, &value)| PieDatum {
            label: label.clone(),
            value,
        })
        .collect()
}

/// A `[start, end)` angular interval in radians, clockwise from the top.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AngularSpan {
    /// Start angle.
    pub start: f64,
    /// End angle.
    pub end: f64,
}

impl AngularSpan {
    /// Creates a span from its endpoints.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// A zero-sweep span collapsed at `angle`.
    pub fn collapsed(angle: f64) -> Self {
        Self::new(angle, angle)
    }

    /// The swept angle.
    pub fn sweep(self) -> f64 {
        self.end - self.start
    }

    /// The middle angle.
    pub fn mid(self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Linear interpolation of both endpoints towards `other`.
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            self.start + (other.start - self.start) * t,
            self.end + (other.end - self.end) * t,
        )
    }
}

/// One laid-out slice.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    /// The slice's datum.
    pub datum: PieDatum,
    /// The slice's angular interval.
    pub span: AngularSpan,
}

/// Lays out slices clockwise from the top: descending by value (stable for
/// ties), each separated from the next by `pad_angle`.
///
/// A non-positive total degenerates to zero-sweep slices so the structure
/// (and its labels) survives an all-zero dataset.
pub fn pie_layout(data: &[PieDatum], pad_angle: f64) -> Vec<PieSlice> {
    if data.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<&PieDatum> = data.iter().collect();
    sorted.sort_by(|a, b| b.value.total_cmp(&a.value));

    let total: f64 = sorted
        .iter()
        .map(|d| if d.value.is_finite() { d.value } else { 0.0 })
        .sum();
    let available = TAU - pad_angle * data.len() as f64;

    let mut out = Vec::with_capacity(data.len());
    let mut cursor = 0.0;
    for datum in sorted {
        let sweep = if total > 0.0 && datum.value.is_finite() {
            (datum.value / total * available).max(0.0)
        } else {
            0.0
        };
        out.push(PieSlice {
            datum: datum.clone(),
            span: AngularSpan::new(cursor, cursor + sweep),
        });
        cursor += sweep + pad_angle;
    }
    out
}

/// Generates annular-sector paths for a fixed inner/outer radius pair,
/// centered on the group origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcGenerator {
    /// Inner radius; `0` for a full pie.
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
}

impl ArcGenerator {
    /// Creates a generator from the two radii.
    pub fn new(inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            inner_radius,
            outer_radius,
        }
    }

    /// The sector path for `span`. Clockwise-from-top angles are mapped
    /// into the y-down scene by offsetting the start by a quarter turn.
    pub fn path(&self, span: AngularSpan) -> BezPath {
        Circle::new(Point::ZERO, self.outer_radius)
            .segment(self.inner_radius, span.start - FRAC_PI_2, span.sweep())
            .path_elements(0.1)
            .collect()
    }
}

/// Angular interpolation state for one slice.
///
/// Retargeting starts the next animation from wherever the previous one
/// currently is, so interrupted transitions pick up mid-flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcTween {
    start: AngularSpan,
    target: AngularSpan,
    current: AngularSpan,
}

impl ArcTween {
    /// A tween for a newly entered slice: it grows from a zero sweep at its
    /// start angle.
    pub fn entering(target: AngularSpan) -> Self {
        let collapsed = AngularSpan::collapsed(target.start);
        Self {
            start: collapsed,
            target,
            current: collapsed,
        }
    }

    /// Redirects the tween at a new target, starting from the current span.
    pub fn retarget(&mut self, target: AngularSpan) {
        self.start = self.current;
        self.target = target;
    }

    /// Evaluates the tween at `t` in `[0, 1]` and records the result.
    pub fn eval(&mut self, t: f64) -> AngularSpan {
        self.current = self.start.lerp(self.target, t);
        self.current
    }

    /// Jumps straight to the target.
    pub fn snap(&mut self) -> AngularSpan {
        self.current = self.target;
        self.current
    }

    /// The span the tween is heading towards.
    pub fn target(&self) -> AngularSpan {
        self.target
    }

    /// The last evaluated span.
    pub fn current(&self) -> AngularSpan {
        self.current
    }
}

/// Renders a pie (or donut) and coordinates its hover, tooltip, and legend
/// interactions.
#[derive(Debug)]
pub struct PieRenderer {
    options: PieOptions,
    id_base: u64,
    component: ComponentId,
    slots: HashMap<String, u64>,
    next_slot: u64,
    tweens: HashMap<String, ArcTween>,
    listeners: HashMap<MarkId, PieSlice>,
    colors: HashMap<String, Color>,
    arc: ArcGenerator,
    hover_arc: ArcGenerator,
    subscribed: bool,
}

impl PieRenderer {
    /// Creates a pie renderer.
    ///
    /// `id_base` seeds this pie's group and mark ids; hosts give each
    /// component a disjoint id region.
    pub fn new(id_base: u64, component: ComponentId, options: PieOptions) -> Self {
        Self {
            options,
            id_base,
            component,
            slots: HashMap::new(),
            next_slot: 0,
            tweens: HashMap::new(),
            listeners: HashMap::new(),
            colors: HashMap::new(),
            arc: ArcGenerator::new(options.inner_radius, 0.0),
            hover_arc: ArcGenerator::new(options.inner_radius, 0.0),
            subscribed: false,
        }
    }

    /// Returns this pie's component id.
    pub fn component(&self) -> ComponentId {
        self.component
    }

    fn group(&self) -> GroupId {
        GroupId(self.id_base)
    }

    /// Subscribes to the legend events this renderer reacts to. Safe to
    /// call more than once; only the first call registers.
    pub fn init(&mut self, events: &mut EventBus) {
        if self.subscribed {
            return;
        }
        events.subscribe(EventKind::LegendItemHover, self.component);
        events.subscribe(EventKind::LegendItemMouseOut, self.component);
        self.subscribed = true;
    }

    /// Renders the pie into the scene.
    pub fn render(&mut self, ctx: &mut RenderContext<'_>, animate: bool) {
        let data = data_list(ctx.data);
        let layout = pie_layout(&data, self.options.pad_angle);
        let total: f64 = data
            .iter()
            .map(|d| if d.value.is_finite() { d.value } else { 0.0 })
            .sum();

        let radius = ctx.width.min(ctx.height) / 2.0 + self.options.radius_offset;
        self.arc = ArcGenerator::new(self.options.inner_radius, radius);
        self.hover_arc = ArcGenerator::new(
            self.options.inner_radius,
            radius + self.options.hover_outer_radius_offset,
        );

        ctx.scene.set_group_translate(
            self.group(),
            Vec2::new(radius + self.options.x_offset, radius + self.options.y_offset),
        );

        let transition = ctx.transitions.get("pie-slice-enter-update", animate);

        let mut marks = Vec::with_capacity(2 * layout.len());
        self.listeners.clear();
        for slice in &layout {
            let slot = self.slot(&slice.datum.label);
            let color = self.color(&slice.datum.label);

            self.tweens
                .entry(slice.datum.label.clone())
                .and_modify(|tween| tween.retarget(slice.span))
                .or_insert_with(|| ArcTween::entering(slice.span));
            if transition.is_none() {
                if let Some(tween) = self.tweens.get_mut(&slice.datum.label) {
                    tween.snap();
                }
            }

            let slice_id = MarkId(self.id_base + slot);
            marks.push(
                Mark::path(slice_id, self.arc.path(slice.span))
                    .with_fill(color)
                    .with_z_index(z_order::SERIES_FILL),
            );
            self.listeners.insert(slice_id, slice.clone());

            let percentage = value_to_percentage(slice.datum.value, total);
            let text = alloc::format!("{percentage}%");
            let metrics = ctx.measurer.measure(&text, TextStyle::new(LABEL_FONT_SIZE));
            let offset_x = metrics.advance_width / 2.0 + LABEL_PADDING;
            let offset_y = LABEL_FONT_SIZE / 2.0 + LABEL_PADDING;
            let margined = radius + LABEL_RADIUS_MARGIN;
            let theta = slice.span.mid();
            let pos = Point::new(
                (offset_x + margined) * theta.sin(),
                (offset_y + margined) * -theta.cos(),
            );
            marks.push(
                Mark::text(MarkId(self.id_base + 1000 + slot), pos, text)
                    .with_font_size(LABEL_FONT_SIZE)
                    .with_anchor(TextAnchor::Middle)
                    .with_baseline(TextBaseline::Middle)
                    .with_fill(css::BLACK)
                    .with_z_index(z_order::SERIES_LABELS),
            );
        }

        // Drop tween state for labels no longer present.
        let live: Vec<String> = layout.iter().map(|s| s.datum.label.clone()).collect();
        self.tweens.retain(|label, _| live.iter().any(|l| l == label));

        ctx.scene.tick_group(self.group(), marks, transition);
    }

    /// Routes a pointer gesture on one of this pie's marks.
    ///
    /// Hovering swaps the slice's path to the enlarged hover arc and raises
    /// the tooltip; leaving reverts both. Marks without a bound slice are
    /// ignored.
    pub fn handle_pointer(&self, ctx: &mut RenderContext<'_>, mark: MarkId, pointer: Pointer) {
        let Some(slice) = self.listeners.get(&mark) else {
            return;
        };
        let hover_transition = ctx.transitions.get("pie-slice-hover", true);
        match pointer {
            Pointer::Over => {
                ctx.scene
                    .set_path(mark, self.hover_arc.path(slice.span), hover_transition);
                ctx.events.dispatch(
                    ChartEvent::new(EventKind::PieSliceMouseOver)
                        .with_mark(mark)
                        .with_key(slice.datum.label.clone())
                        .with_value(slice.datum.value),
                );
                ctx.events.dispatch(
                    ChartEvent::new(EventKind::ShowTooltip)
                        .with_mark(mark)
                        .with_key(slice.datum.label.clone())
                        .with_value(slice.datum.value),
                );
            }
            Pointer::Move => {
                ctx.events.dispatch(
                    ChartEvent::new(EventKind::ShowTooltip)
                        .with_mark(mark)
                        .with_key(slice.datum.label.clone())
                        .with_value(slice.datum.value),
                );
            }
            Pointer::Click => {
                ctx.events.dispatch(
                    ChartEvent::new(EventKind::PieSliceClick)
                        .with_mark(mark)
                        .with_key(slice.datum.label.clone())
                        .with_value(slice.datum.value),
                );
            }
            Pointer::Out => {
                ctx.scene
                    .set_path(mark, self.arc.path(slice.span), hover_transition);
                ctx.events.dispatch(
                    ChartEvent::new(EventKind::PieSliceMouseOut)
                        .with_mark(mark)
                        .with_key(slice.datum.label.clone())
                        .with_value(slice.datum.value),
                );
                ctx.events
                    .dispatch(ChartEvent::new(EventKind::HideTooltip).with_mark(mark));
            }
        }
    }

    /// Reacts to an event this renderer subscribed to.
    ///
    /// Legend hover dims every slice whose label differs from the hovered
    /// item; legend mouseout restores full opacity everywhere.
    pub fn handle_event(&self, ctx: &mut RenderContext<'_>, event: &ChartEvent) {
        match event.kind {
            EventKind::LegendItemHover => {
                let Some(hovered) = &event.key else {
                    return;
                };
                let transition = ctx.transitions.get("legend-hover", true);
                for (mark, slice) in &self.listeners {
                    let opacity = if slice.datum.label == *hovered {
                        1.0
                    } else {
                        defaults::LEGEND_DIM_OPACITY
                    };
                    ctx.scene.set_opacity(*mark, opacity, transition);
                }
            }
            EventKind::LegendItemMouseOut => {
                let transition = ctx.transitions.get("legend-mouseout", true);
                for mark in self.listeners.keys() {
                    ctx.scene.set_opacity(*mark, 1.0, transition);
                }
            }
            _ => {}
        }
    }

    /// Evaluates every live tween at `t` and writes the interpolated sector
    /// paths into the scene. Hosts drive this once per animation frame.
    pub fn apply_tweens(&mut self, scene: &mut Scene, t: f64) {
        for (label, tween) in &mut self.tweens {
            let Some(&slot) = self.slots.get(label) else {
                continue;
            };
            let span = tween.eval(t);
            scene.set_path(MarkId(self.id_base + slot), self.arc.path(span), None);
        }
    }

    /// The tween currently attached to `label`, if any.
    pub fn tween(&self, label: &str) -> Option<&ArcTween> {
        self.tweens.get(label)
    }

    /// Unsubscribes from the bus and detaches listeners and tween state.
    /// Idempotent.
    pub fn destroy(&mut self, events: &mut EventBus) {
        events.unsubscribe_all(self.component);
        self.listeners.clear();
        self.tweens.clear();
        self.subscribed = false;
    }

    fn slot(&mut self, label: &str) -> u64 {
        if let Some(&slot) = self.slots.get(label) {
            return slot;
        }
        let slot = self.next_slot;
        self.slots.insert(String::from(label), slot);
        self.next_slot += 1;
        slot
    }

    fn color(&mut self, label: &str) -> Color {
        if let Some(&color) = self.colors.get(label) {
            return color;
        }
        let color = PALETTE[self.colors.len() % PALETTE.len()];
        self.colors.insert(String::from(label), color);
        color
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use skald_core::{EventBus, MarkPayload, Scene, Transitions};

    use crate::config::AxesConfig;
    use crate::measure::HeuristicTextMeasurer;
    use crate::scale::CartesianScales;

    use super::*;

    fn datum(label: &str, value: f64) -> PieDatum {
        PieDatum {
            label: String::from(label),
            value,
        }
    }

    struct Fixture {
        scene: Scene,
        scales: CartesianScales,
        transitions: Transitions,
        events: EventBus,
        data: ChartData,
    }

    impl Fixture {
        fn new(data: ChartData) -> Self {
            Self {
                scene: Scene::new(),
                scales: CartesianScales::new(&AxesConfig::default(), &data),
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

    fn two_slice_data() -> ChartData {
        ChartData::new(
            vec!["a".into(), "b".into()],
            vec![vec![70.0, 30.0]],
        )
    }

    #[test]
    fn seventy_thirty_partitions_the_circle() {
        let layout = pie_layout(&[datum("a", 70.0), datum("b", 30.0)], 0.0);
        assert_eq!(layout.len(), 2);
        assert_eq!(layout[0].datum.label, "a");
        assert_eq!(layout[0].span.start, 0.0);
        assert!((layout[0].span.end - 0.7 * TAU).abs() < 1e-12);
        assert!((layout[1].span.start - 0.7 * TAU).abs() < 1e-12);
        assert!((layout[1].span.end - TAU).abs() < 1e-12);
    }

    #[test]
    fn sweeps_account_for_padding() {
        let pad = 0.01;
        let data = [datum("a", 1.0), datum("b", 2.0), datum("c", 3.0)];
        let layout = pie_layout(&data, pad);
        let swept: f64 = layout.iter().map(|s| s.span.sweep()).sum();
        assert!((swept - (TAU - pad * 3.0)).abs() < 1e-12);
    }

    #[test]
    fn layout_sorts_descending_and_keeps_tie_order() {
        let data = [
            datum("small", 1.0),
            datum("tie-1", 5.0),
            datum("big", 9.0),
            datum("tie-2", 5.0),
        ];
        let layout = pie_layout(&data, 0.0);
        let order: Vec<&str> = layout.iter().map(|s| s.datum.label.as_str()).collect();
        assert_eq!(order, vec!["big", "tie-1", "tie-2", "small"]);
    }

    #[test]
    fn zero_total_degenerates_to_zero_sweeps() {
        let layout = pie_layout(&[datum("a", 0.0), datum("b", 0.0)], 0.007);
        assert_eq!(layout.len(), 2);
        assert!(layout.iter().all(|s| s.span.sweep() == 0.0));
    }

    #[test]
    fn empty_data_yields_empty_layout_and_no_marks() {
        assert!(pie_layout(&[], 0.007).is_empty());

        let mut fx = Fixture::new(ChartData::default());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);
        assert_eq!(fx.scene.group_members(GroupId(500)).len(), 0);
    }

    #[test]
    fn re_render_is_idempotent_and_keeps_mark_identity() {
        let mut fx = Fixture::new(two_slice_data());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());

        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);
        let first: Vec<MarkId> = fx.scene.group_members(GroupId(500)).to_vec();
        let first_span = pie.listeners.get(&MarkId(500)).unwrap().span;

        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);
        let second: Vec<MarkId> = fx.scene.group_members(GroupId(500)).to_vec();
        assert_eq!(first, second);
        let second_span = pie.listeners.get(&MarkId(500)).unwrap().span;
        assert_eq!(first_span, second_span);
    }

    #[test]
    fn group_translate_uses_radius_and_offsets() {
        let mut fx = Fixture::new(two_slice_data());
        let options = PieOptions::default();
        let mut pie = PieRenderer::new(500, ComponentId(3), options);
        let mut ctx = fx.ctx(400.0, 300.0);
        pie.render(&mut ctx, false);

        // radius = min(400, 300)/2 - 15 = 135; translate (135+30, 135+20).
        assert_eq!(
            fx.scene.group_translate(GroupId(500)),
            Vec2::new(165.0, 155.0)
        );
    }

    #[test]
    fn labels_show_floored_percentages() {
        let data = ChartData::new(
            vec!["a".into(), "b".into(), "c".into()],
            vec![vec![1.0, 1.0, 1.0]],
        );
        let mut fx = Fixture::new(data);
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        let label = fx.scene.mark(MarkId(500 + 1000)).expect("slice label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        assert_eq!(t.text, "33%");
    }

    #[test]
    fn label_sits_outside_the_margined_radius() {
        // With no padding a single slice spans the full circle; its mid
        // angle is pi, which points straight down.
        let data = ChartData::new(vec!["a".into()], vec![vec![10.0]]);
        let mut fx = Fixture::new(data);
        let options = PieOptions {
            pad_angle: 0.0,
            ..PieOptions::default()
        };
        let mut pie = PieRenderer::new(500, ComponentId(3), options);
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        let label = fx.scene.mark(MarkId(500 + 1000)).expect("slice label");
        let MarkPayload::Text(t) = &label.payload else {
            panic!("expected text payload");
        };
        let radius = 400.0 / 2.0 - 15.0;
        assert!(t.pos.x.abs() < 1e-9);
        assert!((t.pos.y - (LABEL_FONT_SIZE / 2.0 + LABEL_PADDING + radius + 2.0)).abs() < 1e-9);
    }

    #[test]
    fn tween_enters_collapsed_and_retargets_from_current() {
        let target = AngularSpan::new(0.0, 2.0);
        let mut tween = ArcTween::entering(target);
        assert_eq!(tween.current().sweep(), 0.0);

        let half = tween.eval(0.5);
        assert_eq!(half, AngularSpan::new(0.0, 1.0));

        tween.retarget(AngularSpan::new(1.0, 3.0));
        let restart = tween.eval(0.0);
        assert_eq!(restart, half, "retarget must start where it left off");
        let done = tween.eval(1.0);
        assert_eq!(done, AngularSpan::new(1.0, 3.0));
    }

    #[test]
    fn render_without_animation_snaps_tweens() {
        let mut fx = Fixture::new(two_slice_data());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        let tween = pie.tween("a").expect("tween for a");
        assert_eq!(tween.current(), tween.target());
        assert!((tween.target().sweep() - 0.7 * (TAU - 0.007 * 2.0)).abs() < 1e-9);
    }

    #[test]
    fn hover_swaps_to_the_enlarged_arc_and_raises_the_tooltip() {
        let mut fx = Fixture::new(two_slice_data());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        let slice_id = MarkId(500); // slot 0 belongs to the largest slice
        let before = {
            let MarkPayload::Path(p) = &fx.scene.mark(slice_id).unwrap().payload else {
                panic!("expected path payload");
            };
            p.path.clone()
        };

        let mut ctx = fx.ctx(400.0, 400.0);
        pie.handle_pointer(&mut ctx, slice_id, Pointer::Over);

        let after = {
            let MarkPayload::Path(p) = &fx.scene.mark(slice_id).unwrap().payload else {
                panic!("expected path payload");
            };
            p.path.clone()
        };
        assert_ne!(
            before.bounding_box(),
            after.bounding_box(),
            "hover must enlarge the slice"
        );

        let over = fx.events.pop().expect("mouseover");
        assert_eq!(over.kind, EventKind::PieSliceMouseOver);
        assert_eq!(over.key.as_deref(), Some("a"));
        let tooltip = fx.events.pop().expect("show-tooltip");
        assert_eq!(tooltip.kind, EventKind::ShowTooltip);

        // Leaving reverts and hides the tooltip.
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.handle_pointer(&mut ctx, slice_id, Pointer::Out);
        let reverted = {
            let MarkPayload::Path(p) = &fx.scene.mark(slice_id).unwrap().payload else {
                panic!("expected path payload");
            };
            p.path.clone()
        };
        assert_eq!(before.bounding_box(), reverted.bounding_box());
        let out = fx.events.pop().expect("mouseout");
        assert_eq!(out.kind, EventKind::PieSliceMouseOut);
        let hide = fx.events.pop().expect("hide-tooltip");
        assert_eq!(hide.kind, EventKind::HideTooltip);
    }

    #[test]
    fn legend_hover_dims_non_matching_slices() {
        let mut fx = Fixture::new(two_slice_data());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        pie.init(&mut fx.events);
        assert!(fx.events.is_subscribed(EventKind::LegendItemHover, ComponentId(3)));

        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        let hover = ChartEvent::new(EventKind::LegendItemHover).with_key("a");
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.handle_event(&mut ctx, &hover);
        // Slot 0 is "a" (larger value), slot 1 is "b".
        assert_eq!(fx.scene.mark(MarkId(500)).unwrap().opacity, 1.0);
        assert_eq!(
            fx.scene.mark(MarkId(501)).unwrap().opacity,
            defaults::LEGEND_DIM_OPACITY
        );

        let out = ChartEvent::new(EventKind::LegendItemMouseOut);
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.handle_event(&mut ctx, &out);
        assert_eq!(fx.scene.mark(MarkId(501)).unwrap().opacity, 1.0);
    }

    #[test]
    fn destroy_unsubscribes_and_is_idempotent() {
        let mut fx = Fixture::new(two_slice_data());
        let mut pie = PieRenderer::new(500, ComponentId(3), PieOptions::default());
        pie.init(&mut fx.events);
        let mut ctx = fx.ctx(400.0, 400.0);
        pie.render(&mut ctx, false);

        pie.destroy(&mut fx.events);
        pie.destroy(&mut fx.events);
        assert!(!fx.events.is_subscribed(EventKind::LegendItemHover, ComponentId(3)));

        let mut ctx = fx.ctx(400.0, 400.0);
        pie.handle_pointer(&mut ctx, MarkId(500), Pointer::Over);
        assert!(fx.events.pop().is_none());
    }
}
