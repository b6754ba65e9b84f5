// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named transition handles.
//!
//! skald does not run an animation loop. Renderers attach a [`Transition`]
//! handle to the scene updates they want animated; whatever drives frames
//! downstream (a `requestAnimationFrame` bridge, a winit loop, a test clock)
//! reads the handle off the diff and interpolates toward the new target.
//! Because the scene only ever retains the *latest* target, issuing a new
//! update on the same mark supersedes any in-flight animation rather than
//! queuing behind it.

extern crate alloc;

use hashbrown::HashMap;

/// A transition handle: a well-known name plus a duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition {
    /// Registry name, e.g. `"axis-update"`.
    pub name: &'static str,
    /// Duration in milliseconds.
    pub duration_ms: u32,
}

/// A registry of named transition durations with a global animation toggle.
///
/// `get` returns `None` when the caller asks for an immediate update or when
/// animations are globally disabled; callers treat `None` as "apply now".
#[derive(Clone, Debug)]
pub struct Transitions {
    durations: HashMap<&'static str, u32>,
    enabled: bool,
    default_ms: u32,
}

impl Transitions {
    /// Creates a registry pre-populated with the chart transition names.
    pub fn new() -> Self {
        let mut durations = HashMap::new();
        durations.insert("axis-update", 300);
        durations.insert("pie-slice-enter-update", 300);
        durations.insert("pie-slice-hover", 100);
        durations.insert("legend-hover", 150);
        durations.insert("legend-mouseout", 150);
        Self {
            durations,
            enabled: true,
            default_ms: 300,
        }
    }

    /// Globally enables or disables animated transitions.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Registers (or overrides) a named duration.
    pub fn register(&mut self, name: &'static str, duration_ms: u32) {
        self.durations.insert(name, duration_ms);
    }

    /// Returns the transition handle for `name`, or `None` when the update
    /// should be applied immediately.
    ///
    /// Unknown names fall back to the default duration, mirroring how the
    /// registry is used: components ask by name and should not have to care
    /// whether the host tuned that particular entry.
    pub fn get(&self, name: &'static str, animate: bool) -> Option<Transition> {
        if !animate || !self.enabled {
            return None;
        }
        let duration_ms = self.durations.get(name).copied().unwrap_or(self.default_ms);
        Some(Transition { name, duration_ms })
    }
}

impl Default for Transitions {
    fn default() -> Self {
        Self::new()
    }
}
