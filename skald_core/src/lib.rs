// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental render core for skald charts.
//!
//! This crate holds the retained-rendering substrate the chart components
//! build on:
//! - **Marks** are identity-stable drawables (paths and unshaped text).
//! - The **Scene** retains marks per component group and diffs full
//!   re-submissions into enter/update/exit changes.
//! - **Transitions** are named duration handles attached to scene changes;
//!   a downstream animator interpolates them.
//! - The **event bus** carries tooltip/hover/legend coordination between
//!   components without cross-references.
//!
//! Text shaping and actual painting are out of scope; sinks consume
//! [`Scene::paint_order`] or the diff stream.

#![no_std]

extern crate alloc;

mod events;
mod mark;
mod scene;
mod transition;

pub use events::{ChartEvent, ComponentId, EventBus, EventKind, Pointer};
pub use mark::{Mark, MarkId, MarkKind, MarkPayload, PathMark, TextAnchor, TextBaseline, TextMark};
pub use scene::{GroupId, MarkDiff, Scene, SceneMark};
pub use transition::{Transition, Transitions};
