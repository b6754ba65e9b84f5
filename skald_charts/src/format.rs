// Copyright 2025 the Skald Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default value formatting for tick and data labels.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value using a decimal count derived from the tick step.
///
/// A step of `0.25` yields two decimals, `0.5` yields one, anything `>= 1`
/// (or a missing step of `0`) yields none. Using the step rather than the
/// value keeps decimals consistent across one axis' labels.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    if !v.is_finite() {
        return alloc::format!("{v}");
    }
    let decimals = step_decimals(step);
    alloc::format!("{v:.decimals$}")
}

fn step_decimals(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 || step >= 1.0 {
        return 0;
    }
    // Smallest number of decimals that makes the step (approximately)
    // integral: 0.5 needs one, 0.25 needs two. A log-based shortcut would
    // undercount steps like 0.25 whose mantissa spans extra digits.
    let mut scaled = step;
    for decimals in 1..=9 {
        scaled *= 10.0;
        if (scaled - scaled.round()).abs() < 1e-6 {
            return decimals;
        }
    }
    9
}

/// Converts a value to a whole percentage of `total`, flooring.
///
/// A non-positive or non-finite total yields `0` rather than an error, so
/// degenerate datasets still get labels.
pub fn value_to_percentage(value: f64, total: f64) -> f64 {
    if !(total > 0.0) || !value.is_finite() {
        return 0.0;
    }
    (value / total * 100.0).floor()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn tick_decimals_follow_step() {
        assert_eq!(format_tick_with_step(2.0, 1.0), "2");
        assert_eq!(format_tick_with_step(2.5, 0.5), "2.5");
        assert_eq!(format_tick_with_step(0.25, 0.25), "0.25");
        assert_eq!(format_tick_with_step(1200.0, 200.0), "1200");
    }

    #[test]
    fn fractional_steps_keep_every_mantissa_digit() {
        // Steps whose mantissa spans more digits than their magnitude
        // suggests must not truncate the label.
        assert_eq!(format_tick_with_step(0.75, 0.25), "0.75");
        assert_eq!(format_tick_with_step(0.05, 0.05), "0.05");
        assert_eq!(format_tick_with_step(0.4, 0.2), "0.4");
        assert_eq!(format_tick_with_step(0.125, 0.125), "0.125");
    }

    #[test]
    fn zero_step_formats_whole_numbers() {
        assert_eq!(format_tick_with_step(3.0, 0.0), "3");
    }

    #[test]
    fn percentage_floors() {
        assert_eq!(value_to_percentage(30.0, 100.0), 30.0);
        assert_eq!(value_to_percentage(1.0, 3.0), 33.0);
        assert_eq!(value_to_percentage(2.0, 3.0), 66.0);
    }

    #[test]
    fn percentage_of_zero_total_is_zero() {
        assert_eq!(value_to_percentage(5.0, 0.0), 0.0);
        assert_eq!(value_to_percentage(5.0, -1.0), 0.0);
    }
}
