// Copyright 2026 the Geoframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named continuous color palettes.
//!
//! Each palette is a ramp of sRGB stops sampled with piecewise-linear interpolation. Names follow
//! the d3 interpolator names (`interpolateViridis`, `interpolateRdYlBu`, ...) that chart users
//! already pass as `color-scheme`.

use peniko::Color;

/// A named continuous palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs, reason = "variants are palette names")]
pub enum Palette {
    BrBG,
    PRGn,
    PiYG,
    PuOr,
    RdBu,
    RdGy,
    RdYlBu,
    RdYlGn,
    Spectral,
    Blues,
    Greens,
    Greys,
    Oranges,
    Purples,
    Reds,
    Turbo,
    Viridis,
    Inferno,
    Magma,
    Plasma,
    Cividis,
    Warm,
    Cool,
    CubehelixDefault,
    BuGn,
    BuPu,
    GnBu,
    OrRd,
    PuBuGn,
    PuBu,
    PuRd,
    RdPu,
    YlGnBu,
    YlGn,
    YlOrBr,
    YlOrRd,
    Rainbow,
    Sinebow,
}

impl Palette {
    /// Every known palette.
    pub const ALL: [Self; 38] = [
        Self::BrBG,
        Self::PRGn,
        Self::PiYG,
        Self::PuOr,
        Self::RdBu,
        Self::RdGy,
        Self::RdYlBu,
        Self::RdYlGn,
        Self::Spectral,
        Self::Blues,
        Self::Greens,
        Self::Greys,
        Self::Oranges,
        Self::Purples,
        Self::Reds,
        Self::Turbo,
        Self::Viridis,
        Self::Inferno,
        Self::Magma,
        Self::Plasma,
        Self::Cividis,
        Self::Warm,
        Self::Cool,
        Self::CubehelixDefault,
        Self::BuGn,
        Self::BuPu,
        Self::GnBu,
        Self::OrRd,
        Self::PuBuGn,
        Self::PuBu,
        Self::PuRd,
        Self::RdPu,
        Self::YlGnBu,
        Self::YlGn,
        Self::YlOrBr,
        Self::YlOrRd,
        Self::Rainbow,
        Self::Sinebow,
    ];

    /// Looks a palette up by its interpolator name, e.g. `"interpolateViridis"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The interpolator name.
    pub fn name(self) -> &'static str {
        match self {
            Self::BrBG => "interpolateBrBG",
            Self::PRGn => "interpolatePRGn",
            Self::PiYG => "interpolatePiYG",
            Self::PuOr => "interpolatePuOr",
            Self::RdBu => "interpolateRdBu",
            Self::RdGy => "interpolateRdGy",
            Self::RdYlBu => "interpolateRdYlBu",
            Self::RdYlGn => "interpolateRdYlGn",
            Self::Spectral => "interpolateSpectral",
            Self::Blues => "interpolateBlues",
            Self::Greens => "interpolateGreens",
            Self::Greys => "interpolateGreys",
            Self::Oranges => "interpolateOranges",
            Self::Purples => "interpolatePurples",
            Self::Reds => "interpolateReds",
            Self::Turbo => "interpolateTurbo",
            Self::Viridis => "interpolateViridis",
            Self::Inferno => "interpolateInferno",
            Self::Magma => "interpolateMagma",
            Self::Plasma => "interpolatePlasma",
            Self::Cividis => "interpolateCividis",
            Self::Warm => "interpolateWarm",
            Self::Cool => "interpolateCool",
            Self::CubehelixDefault => "interpolateCubehelixDefault",
            Self::BuGn => "interpolateBuGn",
            Self::BuPu => "interpolateBuPu",
            Self::GnBu => "interpolateGnBu",
            Self::OrRd => "interpolateOrRd",
            Self::PuBuGn => "interpolatePuBuGn",
            Self::PuBu => "interpolatePuBu",
            Self::PuRd => "interpolatePuRd",
            Self::RdPu => "interpolateRdPu",
            Self::YlGnBu => "interpolateYlGnBu",
            Self::YlGn => "interpolateYlGn",
            Self::YlOrBr => "interpolateYlOrBr",
            Self::YlOrRd => "interpolateYlOrRd",
            Self::Rainbow => "interpolateRainbow",
            Self::Sinebow => "interpolateSinebow",
        }
    }

    /// Samples the palette at `t`, clamped to `[0, 1]`.
    pub fn sample(self, t: f64) -> Color {
        let stops = self.stops();
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let last = stops.len() - 1;
        let x = t * last as f64;
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "x is within [0, last]"
        )]
        let i = (x as usize).min(last.saturating_sub(1));
        let frac = x - i as f64;
        let a = rgb(stops[i]);
        let b = rgb(stops[(i + 1).min(last)]);
        Color::from_rgb8(
            mix(a[0], b[0], frac),
            mix(a[1], b[1], frac),
            mix(a[2], b[2], frac),
        )
    }

    fn stops(self) -> &'static [u32] {
        match self {
            Self::BrBG => &[
                0x543005, 0x8c510a, 0xbf812d, 0xdfc27d, 0xf6e8c3, 0xf5f5f5, 0xc7eae5, 0x80cdc1,
                0x35978f, 0x01665e, 0x003c30,
            ],
            Self::PRGn => &[
                0x40004b, 0x762a83, 0x9970ab, 0xc2a5cf, 0xe7d4e8, 0xf7f7f7, 0xd9f0d3, 0xa6dba0,
                0x5aae61, 0x1b7837, 0x00441b,
            ],
            Self::PiYG => &[
                0x8e0152, 0xc51b7d, 0xde77ae, 0xf1b6da, 0xfde0ef, 0xf7f7f7, 0xe6f5d0, 0xb8e186,
                0x7fbc41, 0x4d9221, 0x276419,
            ],
            Self::PuOr => &[
                0x2d004b, 0x542788, 0x8073ac, 0xb2abd2, 0xd8daeb, 0xf7f7f7, 0xfee0b6, 0xfdb863,
                0xe08214, 0xb35806, 0x7f3b08,
            ],
            Self::RdBu => &[
                0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xf7f7f7, 0xd1e5f0, 0x92c5de,
                0x4393c3, 0x2166ac, 0x053061,
            ],
            Self::RdGy => &[
                0x67001f, 0xb2182b, 0xd6604d, 0xf4a582, 0xfddbc7, 0xffffff, 0xe0e0e0, 0xbababa,
                0x878787, 0x4d4d4d, 0x1a1a1a,
            ],
            Self::RdYlBu => &[
                0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee090, 0xffffbf, 0xe0f3f8, 0xabd9e9,
                0x74add1, 0x4575b4, 0x313695,
            ],
            Self::RdYlGn => &[
                0xa50026, 0xd73027, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xd9ef8b, 0xa6d96a,
                0x66bd63, 0x1a9850, 0x006837,
            ],
            Self::Spectral => &[
                0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4,
                0x66c2a5, 0x3288bd, 0x5e4fa2,
            ],
            Self::Blues => &[
                0xf7fbff, 0xdeebf7, 0xc6dbef, 0x9ecae1, 0x6baed6, 0x4292c6, 0x2171b5, 0x08519c,
                0x08306b,
            ],
            Self::Greens => &[
                0xf7fcf5, 0xe5f5e0, 0xc7e9c0, 0xa1d99b, 0x74c476, 0x41ab5d, 0x238b45, 0x006d2c,
                0x00441b,
            ],
            Self::Greys => &[
                0xffffff, 0xf0f0f0, 0xd9d9d9, 0xbdbdbd, 0x969696, 0x737373, 0x525252, 0x252525,
                0x000000,
            ],
            Self::Oranges => &[
                0xfff5eb, 0xfee6ce, 0xfdd0a2, 0xfdae6b, 0xfd8d3c, 0xf16913, 0xd94801, 0xa63603,
                0x7f2704,
            ],
            Self::Purples => &[
                0xfcfbfd, 0xefedf5, 0xdadaeb, 0xbcbddc, 0x9e9ac8, 0x807dba, 0x6a51a3, 0x54278f,
                0x3f007d,
            ],
            Self::Reds => &[
                0xfff5f0, 0xfee0d2, 0xfcbba1, 0xfc9272, 0xfb6a4a, 0xef3b2c, 0xcb181d, 0xa50f15,
                0x67000d,
            ],
            Self::Turbo => &[
                0x30123b, 0x4145ab, 0x4675ed, 0x39a2fc, 0x1bcfd4, 0x24eca6, 0x61fc6c, 0xa4fc3b,
                0xd1e834, 0xf3c63a, 0xfe9b2d, 0xf36315, 0xd93806, 0xb11901, 0x7a0403,
            ],
            Self::Viridis => &[
                0x440154, 0x472d7b, 0x3b528b, 0x2c728e, 0x21918c, 0x28ae80, 0x5ec962, 0xaddc30,
                0xfde725,
            ],
            Self::Inferno => &[
                0x000004, 0x1b0c41, 0x4a0c6b, 0x781c6d, 0xa52c60, 0xcf4446, 0xed6925, 0xfb9b06,
                0xf7d13d, 0xfcffa4,
            ],
            Self::Magma => &[
                0x000004, 0x180f3d, 0x440f76, 0x721f81, 0x9e2f7f, 0xcd4071, 0xf1605d, 0xfd9668,
                0xfeca8d, 0xfcfdbf,
            ],
            Self::Plasma => &[
                0x0d0887, 0x47039f, 0x7301a8, 0x9c179e, 0xbd3786, 0xd8576b, 0xed7953, 0xfb9f3a,
                0xfdca26, 0xf0f921,
            ],
            Self::Cividis => &[
                0x00224e, 0x123570, 0x3b496c, 0x575d6d, 0x707173, 0x8a8678, 0xa59c74, 0xc3b369,
                0xe1cc55, 0xfee838,
            ],
            Self::Warm => &[
                0x6e40aa, 0x963db3, 0xbf3caf, 0xe4419d, 0xfe4b83, 0xff5e63, 0xff7847, 0xfb9633,
                0xe2b72f, 0xc6d63c, 0xaff05b,
            ],
            Self::Cool => &[
                0x6e40aa, 0x6054c8, 0x4c6edb, 0x368ce1, 0x23abd8, 0x1ac7c2, 0x1ddfa3, 0x30ef82,
                0x52f667, 0x7ff658, 0xaff05b,
            ],
            Self::CubehelixDefault => &[
                0x000000, 0x1a1530, 0x163d4e, 0x1f6642, 0x53792f, 0xa07949, 0xd07e93, 0xcf9cda,
                0xc1caf3, 0xd2eeef, 0xffffff,
            ],
            Self::BuGn => &[
                0xf7fcfd, 0xe5f5f9, 0xccece6, 0x99d8c9, 0x66c2a4, 0x41ae76, 0x238b45, 0x006d2c,
                0x00441b,
            ],
            Self::BuPu => &[
                0xf7fcfd, 0xe0ecf4, 0xbfd3e6, 0x9ebcda, 0x8c96c6, 0x8c6bb1, 0x88419d, 0x810f7c,
                0x4d004b,
            ],
            Self::GnBu => &[
                0xf7fcf0, 0xe0f3db, 0xccebc5, 0xa8ddb5, 0x7bccc4, 0x4eb3d3, 0x2b8cbe, 0x0868ac,
                0x084081,
            ],
            Self::OrRd => &[
                0xfff7ec, 0xfee8c8, 0xfdd49e, 0xfdbb84, 0xfc8d59, 0xef6548, 0xd7301f, 0xb30000,
                0x7f0000,
            ],
            Self::PuBuGn => &[
                0xfff7fb, 0xece2f0, 0xd0d1e6, 0xa6bddb, 0x67a9cf, 0x3690c0, 0x02818a, 0x016c59,
                0x014636,
            ],
            Self::PuBu => &[
                0xfff7fb, 0xece7f2, 0xd0d1e6, 0xa6bddb, 0x74a9cf, 0x3690c0, 0x0570b0, 0x045a8d,
                0x023858,
            ],
            Self::PuRd => &[
                0xf7f4f9, 0xe7e1ef, 0xd4b9da, 0xc994c7, 0xdf65b0, 0xe7298a, 0xce1256, 0x980043,
                0x67001f,
            ],
            Self::RdPu => &[
                0xfff7f3, 0xfde0dd, 0xfcc5c0, 0xfa9fb5, 0xf768a1, 0xdd3497, 0xae017e, 0x7a0177,
                0x49006a,
            ],
            Self::YlGnBu => &[
                0xffffd9, 0xedf8b1, 0xc7e9b4, 0x7fcdbb, 0x41b6c4, 0x1d91c0, 0x225ea8, 0x253494,
                0x081d58,
            ],
            Self::YlGn => &[
                0xffffe5, 0xf7fcb9, 0xd9f0a3, 0xaddd8e, 0x78c679, 0x41ab5d, 0x238443, 0x006837,
                0x004529,
            ],
            Self::YlOrBr => &[
                0xffffe5, 0xfff7bc, 0xfee391, 0xfec44f, 0xfe9929, 0xec7014, 0xcc4c02, 0x993404,
                0x662506,
            ],
            Self::YlOrRd => &[
                0xffffcc, 0xffeda0, 0xfed976, 0xfeb24c, 0xfd8d3c, 0xfc4e2a, 0xe31a1c, 0xbd0026,
                0x800026,
            ],
            Self::Rainbow => &[
                0x6e40aa, 0xbf3caf, 0xfe4b83, 0xff7847, 0xe2b72f, 0xaff05b, 0x52f667, 0x1ddfa3,
                0x23abd8, 0x4c6edb, 0x6e40aa,
            ],
            Self::Sinebow => &[
                0xff4040, 0xe78d0b, 0xa7d503, 0x58fc2a, 0x18f472, 0x00bfbf, 0x1872f4, 0x580cfe,
                0xa702d5, 0xe70b8d, 0xff4040,
            ],
        }
    }
}

fn rgb(hex: u32) -> [u8; 3] {
    let [_, r, g, b] = hex.to_be_bytes();
    [r, g, b]
}

fn mix(a: u8, b: u8, t: f64) -> u8 {
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "v lies between two u8 values"
    )]
    let out = (v + 0.5) as u8;
    out
}
