// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene and its diffing.
//!
//! A [`Scene`] holds the current set of marks, partitioned into groups that
//! roughly correspond to chart components (one group per axis, one per graph).
//! Components re-submit their full mark list each render pass via
//! [`Scene::tick_group`]; the scene matches the submission against what it
//! retains by [`MarkId`] and reports the difference as [`MarkDiff`]s. Sinks
//! consume the diffs (an animator interpolates updates) or just repaint from
//! [`Scene::paint_order`].

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};
use kurbo::{BezPath, Rect, Shape, Vec2};

use crate::mark::{Mark, MarkId, MarkKind, MarkPayload};
use crate::transition::Transition;

/// A stable group identity.
///
/// Groups partition the scene per component; diffing never matches marks
/// across groups. Each group carries a translation applied to all its marks,
/// which is how axes and pie charts position themselves without rewriting
/// every path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub u64);

/// A mark as retained by the scene.
#[derive(Clone, Debug)]
pub struct SceneMark {
    /// Paint order hint within the group.
    pub z_index: i32,
    /// Current opacity in `[0, 1]`.
    pub opacity: f64,
    /// The drawable payload.
    pub payload: MarkPayload,
}

#[derive(Clone, Debug, Default)]
struct GroupState {
    members: Vec<MarkId>,
    translate: Vec2,
}

/// A change reported by the scene after a render pass.
///
/// `Update` is emitted for every retained mark that was re-submitted, even
/// when the payload is unchanged; consumers that care can compare `old` and
/// `new`. This mirrors how a data join re-applies attributes to its update
/// selection each pass.
#[derive(Clone, Debug)]
pub enum MarkDiff {
    /// A mark that did not exist in the previous pass.
    Enter {
        /// Mark identity.
        id: MarkId,
        /// Payload kind.
        kind: MarkKind,
        /// Paint order hint.
        z_index: i32,
        /// The new payload.
        new: Box<MarkPayload>,
        /// Geometry bounds of the new payload, where cheap.
        bounds: Option<Rect>,
        /// Transition to animate in with, if any.
        transition: Option<Transition>,
    },
    /// A retained mark that was re-submitted.
    Update {
        /// Mark identity.
        id: MarkId,
        /// Payload kind.
        kind: MarkKind,
        /// Paint order hint.
        z_index: i32,
        /// The previously retained payload.
        old: Box<MarkPayload>,
        /// The new payload.
        new: Box<MarkPayload>,
        /// Bounds of the old payload, where cheap.
        old_bounds: Option<Rect>,
        /// Bounds of the new payload, where cheap.
        new_bounds: Option<Rect>,
        /// Transition to animate with, if any.
        transition: Option<Transition>,
    },
    /// An opacity-only change on a retained mark.
    Restyle {
        /// Mark identity.
        id: MarkId,
        /// The previous opacity.
        old_opacity: f64,
        /// The new opacity.
        opacity: f64,
        /// Transition to animate with, if any.
        transition: Option<Transition>,
    },
    /// A mark that was retained but not re-submitted; it has been removed.
    Exit {
        /// Mark identity.
        id: MarkId,
        /// Payload kind.
        kind: MarkKind,
        /// The payload as last retained.
        old: Box<MarkPayload>,
        /// Bounds of the removed payload, where cheap.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. }
            | Self::Update { id, .. }
            | Self::Restyle { id, .. }
            | Self::Exit { id, .. } => *id,
        }
    }
}

/// The retained scene: marks grouped by component.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, SceneMark>,
    groups: HashMap<GroupId, GroupState>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Submits a group's full mark list for this pass and returns the diffs.
    ///
    /// Submission order is preserved for enters and updates; exits for marks
    /// dropped since the previous pass are appended last. Exited marks are
    /// removed from the scene immediately; an animator that wants a fade-out
    /// must capture the payload off the [`MarkDiff::Exit`].
    pub fn tick_group(
        &mut self,
        group: GroupId,
        marks: Vec<Mark>,
        transition: Option<Transition>,
    ) -> Vec<MarkDiff> {
        let mut diffs = Vec::with_capacity(marks.len());
        let mut next_members = Vec::with_capacity(marks.len());
        let submitted: HashSet<MarkId> = marks.iter().map(|m| m.id).collect();

        for mark in marks {
            let Mark {
                id,
                z_index,
                opacity,
                payload,
            } = mark;
            let kind = payload.kind();
            let bounds = payload.bounds();
            next_members.push(id);
            match self.marks.get_mut(&id) {
                Some(entry) => {
                    let old = core::mem::replace(&mut entry.payload, payload.clone());
                    entry.z_index = z_index;
                    entry.opacity = opacity;
                    diffs.push(MarkDiff::Update {
                        id,
                        kind,
                        z_index,
                        old_bounds: old.bounds(),
                        new_bounds: bounds,
                        old: Box::new(old),
                        new: Box::new(payload),
                        transition,
                    });
                }
                None => {
                    self.marks.insert(
                        id,
                        SceneMark {
                            z_index,
                            opacity,
                            payload: payload.clone(),
                        },
                    );
                    diffs.push(MarkDiff::Enter {
                        id,
                        kind,
                        z_index,
                        new: Box::new(payload),
                        bounds,
                        transition,
                    });
                }
            }
        }

        let state = self.groups.entry(group).or_default();
        let previous = core::mem::replace(&mut state.members, next_members);
        for id in previous {
            if !submitted.contains(&id) {
                if let Some(entry) = self.marks.remove(&id) {
                    diffs.push(MarkDiff::Exit {
                        id,
                        kind: entry.payload.kind(),
                        bounds: entry.payload.bounds(),
                        old: Box::new(entry.payload),
                    });
                }
            }
        }

        diffs
    }

    /// Removes a group and all its marks, returning exit diffs.
    pub fn remove_group(&mut self, group: GroupId) -> Vec<MarkDiff> {
        let Some(state) = self.groups.remove(&group) else {
            return Vec::new();
        };
        let mut diffs = Vec::with_capacity(state.members.len());
        for id in state.members {
            if let Some(entry) = self.marks.remove(&id) {
                diffs.push(MarkDiff::Exit {
                    id,
                    kind: entry.payload.kind(),
                    bounds: entry.payload.bounds(),
                    old: Box::new(entry.payload),
                });
            }
        }
        diffs
    }

    /// Sets a group's translation, creating the group if needed.
    pub fn set_group_translate(&mut self, group: GroupId, translate: Vec2) {
        self.groups.entry(group).or_default().translate = translate;
    }

    /// Returns a group's translation (zero for unknown groups).
    pub fn group_translate(&self, group: GroupId) -> Vec2 {
        self.groups
            .get(&group)
            .map(|g| g.translate)
            .unwrap_or_default()
    }

    /// Changes a retained mark's opacity in place.
    ///
    /// Returns a [`MarkDiff::Restyle`] for the change, or `None` if the mark
    /// is not retained.
    pub fn set_opacity(
        &mut self,
        id: MarkId,
        opacity: f64,
        transition: Option<Transition>,
    ) -> Option<MarkDiff> {
        let entry = self.marks.get_mut(&id)?;
        let old_opacity = entry.opacity;
        entry.opacity = opacity;
        Some(MarkDiff::Restyle {
            id,
            old_opacity,
            opacity,
            transition,
        })
    }

    /// Replaces a retained path mark's geometry in place.
    ///
    /// Returns an update diff, or `None` if the mark is missing or not a
    /// path. Used for targeted geometry swaps (hover states) that should not
    /// disturb the rest of the group.
    pub fn set_path(
        &mut self,
        id: MarkId,
        path: BezPath,
        transition: Option<Transition>,
    ) -> Option<MarkDiff> {
        let entry = self.marks.get_mut(&id)?;
        let MarkPayload::Path(p) = &mut entry.payload else {
            return None;
        };
        let mut old = p.clone();
        core::mem::swap(&mut old.path, &mut p.path);
        p.path = path;
        let new = p.clone();
        Some(MarkDiff::Update {
            id,
            kind: MarkKind::Path,
            z_index: entry.z_index,
            old_bounds: Some(old.path.bounding_box()),
            new_bounds: Some(new.path.bounding_box()),
            old: Box::new(MarkPayload::Path(old)),
            new: Box::new(MarkPayload::Path(new)),
            transition,
        })
    }

    /// Returns a retained mark, if present.
    pub fn mark(&self, id: MarkId) -> Option<&SceneMark> {
        self.marks.get(&id)
    }

    /// Returns the member ids of a group in submission order.
    pub fn group_members(&self, group: GroupId) -> &[MarkId] {
        self.groups
            .get(&group)
            .map(|g| g.members.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the scene in paint order for a sink.
    ///
    /// Groups are ordered by id; within a group, marks are ordered by
    /// `(z_index, id)`. Each tuple carries the group translation.
    pub fn paint_order(&self) -> Vec<(GroupId, Vec2, Vec<(MarkId, &SceneMark)>)> {
        let mut group_ids: Vec<GroupId> = self.groups.keys().copied().collect();
        group_ids.sort_unstable();
        group_ids
            .into_iter()
            .map(|gid| {
                let state = &self.groups[&gid];
                let mut members: Vec<(MarkId, &SceneMark)> = state
                    .members
                    .iter()
                    .filter_map(|id| self.marks.get(id).map(|m| (*id, m)))
                    .collect();
                members.sort_by_key(|(id, m)| (m.z_index, *id));
                (gid, state.translate, members)
            })
            .collect()
    }

    /// Number of retained marks across all groups.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }
}
