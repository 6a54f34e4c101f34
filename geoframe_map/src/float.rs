// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! The projection math needs transcendental functions that `core` does not provide.
//! This trait dispatches to `libm` when `std` is off.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn sin(self) -> Self;
    fn ln(self) -> Self;
    fn exp(self) -> Self;
    fn atan(self) -> Self;
    fn exp2(self) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    fn floor(self) -> Self {
        libm::floor(self)
    }

    fn sin(self) -> Self {
        libm::sin(self)
    }

    fn ln(self) -> Self {
        libm::log(self)
    }

    fn exp(self) -> Self {
        libm::exp(self)
    }

    fn atan(self) -> Self {
        libm::atan(self)
    }

    fn exp2(self) -> Self {
        libm::exp2(self)
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("geoframe_map requires either the `std` or `libm` feature");
