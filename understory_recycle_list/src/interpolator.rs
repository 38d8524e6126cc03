// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing functions for scroll animations.

use core::f64::consts::PI;

/// Maps animation progress `t` in `[0, 1]` to an eased fraction.
pub trait Interpolator {
    /// Eased fraction for progress `t`.
    fn interpolate(&self, t: f64) -> f64;
}

impl<F: Fn(f64) -> f64> Interpolator for F {
    fn interpolate(&self, t: f64) -> f64 {
        self(t)
    }
}

/// Identity easing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Linear;

impl Interpolator for Linear {
    fn interpolate(&self, t: f64) -> f64 {
        t
    }
}

/// Starts and ends slowly, fastest in the middle: `cos((t + 1)π) / 2 + 0.5`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccelerateDecelerate;

impl Interpolator for AccelerateDecelerate {
    fn interpolate(&self, t: f64) -> f64 {
        libm::cos((t + 1.0) * PI) / 2.0 + 0.5
    }
}
