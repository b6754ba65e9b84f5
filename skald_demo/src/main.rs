// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `skald_core`: a two-axis frame and an interactive pie,
//! each dumped to an SVG file.

use kurbo::Rect;
use skald_charts::{
    AxesConfig, AxisOptions, AxisPosition, AxisRenderer, CartesianScales, ChartData,
    HeuristicTextMeasurer, Margins, PieOptions, PieRenderer, RenderContext, ScaleKind,
};
use skald_core::{ChartEvent, ComponentId, EventBus, EventKind, MarkId, Pointer, Scene, Transitions};

const WIDTH: f64 = 500.0;
const HEIGHT: f64 = 300.0;

fn main() {
    axes_demo();
    pie_demo();
}

fn axes_demo() {
    let data = ChartData::new(
        vec![
            "first quarter".into(),
            "second quarter".into(),
            "third quarter".into(),
            "fourth quarter".into(),
        ],
        vec![vec![120.0, 340.0, 290.0, 410.0]],
    );
    let margins = Margins::new(10.0, 30.0, 40.0, 20.0);
    let config = AxesConfig {
        left: Some(
            AxisOptions::new(ScaleKind::Linear)
                .with_include_zero(true)
                .with_title("Sales"),
        ),
        bottom: Some(AxisOptions::new(ScaleKind::Labels)),
        ..AxesConfig::default()
    };

    let mut scene = Scene::new();
    let mut scales = CartesianScales::new(&config, &data);
    let transitions = Transitions::new();
    let mut events = EventBus::new();

    let mut left = AxisRenderer::new(
        0x1000,
        ComponentId(1),
        AxisPosition::Left,
        config.left.clone().expect("left axis configured"),
        margins,
    );
    let mut bottom = AxisRenderer::new(
        0x2000,
        ComponentId(2),
        AxisPosition::Bottom,
        config.bottom.clone().expect("bottom axis configured"),
        margins,
    )
    .with_adjacent_axes(true, false);

    let mut ctx = RenderContext {
        scene: &mut scene,
        scales: &mut scales,
        measurer: &HeuristicTextMeasurer,
        transitions: &transitions,
        events: &mut events,
        data: &data,
        width: WIDTH,
        height: HEIGHT,
    };
    left.render(&mut ctx, false);
    bottom.render(&mut ctx, false);

    // Poke a bottom tick label and show what the bus sees.
    bottom.handle_pointer(&mut ctx, MarkId(0x2000 + 1000), Pointer::Over);
    bottom.handle_pointer(&mut ctx, MarkId(0x2000 + 1000), Pointer::Out);
    drain_events(&mut events, "axes");

    let svg = skald_svg::scene_to_svg(&scene, Some(Rect::new(0.0, 0.0, WIDTH, HEIGHT)));
    std::fs::write("skald_axes_demo.svg", svg).expect("write skald_axes_demo.svg");
    println!("wrote skald_axes_demo.svg ({} marks)", scene.mark_count());
}

fn pie_demo() {
    let data = ChartData::new(
        vec![
            "engineering".into(),
            "marketing".into(),
            "sales".into(),
            "support".into(),
        ],
        vec![vec![44.0, 18.0, 26.0, 12.0]],
    );
    let config = AxesConfig::default();

    let mut scene = Scene::new();
    let mut scales = CartesianScales::new(&config, &data);
    let transitions = Transitions::new();
    let mut events = EventBus::new();

    let mut pie = PieRenderer::new(0x5000, ComponentId(3), PieOptions::default());
    pie.init(&mut events);

    let mut ctx = RenderContext {
        scene: &mut scene,
        scales: &mut scales,
        measurer: &HeuristicTextMeasurer,
        transitions: &transitions,
        events: &mut events,
        data: &data,
        width: 400.0,
        height: 400.0,
    };
    pie.render(&mut ctx, false);

    // Hover the largest slice (slot 0), then dim via a legend hover.
    pie.handle_pointer(&mut ctx, MarkId(0x5000), Pointer::Over);
    pie.handle_pointer(&mut ctx, MarkId(0x5000), Pointer::Out);
    let legend_hover = ChartEvent::new(EventKind::LegendItemHover).with_key("engineering");
    pie.handle_event(&mut ctx, &legend_hover);
    drain_events(&mut events, "pie");

    let svg = skald_svg::scene_to_svg(&scene, None);
    std::fs::write("skald_pie_demo.svg", svg).expect("write skald_pie_demo.svg");
    println!("wrote skald_pie_demo.svg ({} marks)", scene.mark_count());
}

fn drain_events(events: &mut EventBus, tag: &str) {
    while let Some(event) = events.pop() {
        match (&event.key, event.value) {
            (Some(key), Some(value)) => {
                println!("[{tag}] {} key={key} value={value}", event.kind.name());
            }
            _ => println!("[{tag}] {}", event.kind.name()),
        }
    }
}
