//! Colors and the gamma codec used for blending.
//!
//! Blending happens in (approximately) linear light. Channels are decoded with a gamma of 2.0
//! instead of the usual ~2.2: squaring is cheap on small microcontrollers and the visual
//! difference is negligible. Encoding back is an integer square root computed with a fixed
//! number of Newton-Raphson rounds.
//!
//! Colors are "premultiplied in spirit": [`blend`] adds the top channel at full strength and
//! only attenuates the bottom by the top's alpha. Use [`Color::with_opacity`] or [`apply_alpha`]
//! to build translucent colors from straight ones.

/// An RGBA8 color. `a == 255` is fully opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque_alpha")]
    pub a: u8,
}

fn opaque_alpha() -> u8 {
    255
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Build a translucent color from straight (non-attenuated) channels.
    ///
    /// The channels are scaled by `a / 255` in linear space, so blending the result over a
    /// backdrop gives `a / 255` coverage.
    pub fn with_opacity(r: u8, g: u8, b: u8, a: u8) -> Self {
        let scale = |c: u8| encode_gamma(decode_gamma(c) * u32::from(a) / 255);
        Self {
            r: scale(r),
            g: scale(g),
            b: scale(b),
            a,
        }
    }

    pub fn is_opaque(self) -> bool {
        self.a == 255
    }

    /// Same color with the alpha channel forced to 255.
    pub fn opaque(self) -> Self {
        Self { a: 255, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_array([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<[u8; 4]> for Color {
    fn from(v: [u8; 4]) -> Self {
        Self::from_array(v)
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        c.to_array()
    }
}

/// Decode an 8-bit gamma-encoded channel to a linear intensity in `0..=65025`.
#[inline]
pub fn decode_gamma(component: u8) -> u32 {
    let c = u32::from(component);
    c * c
}

/// Encode a linear intensity back to an 8-bit channel.
///
/// Integer square root by five Newton-Raphson rounds from a seed of 32. For every `n: u8`,
/// `encode_gamma(decode_gamma(n)) == n`. Inputs above `255 * 255` saturate to 255.
#[inline]
pub fn encode_gamma(x: u32) -> u8 {
    if x == 0 {
        return 0;
    }

    let mut a = 32u32;
    for _ in 0..5 {
        a = (a + x / a) / 2;
    }
    u8::try_from(a).unwrap_or(u8::MAX)
}

/// Lay a (possibly translucent) `top` color over a fully opaque `bottom` color.
///
/// The result is always opaque.
#[inline]
pub fn blend(bottom: Color, top: Color) -> Color {
    let inv = 255 - u32::from(top.a);
    let ch = |b: u8, t: u8| encode_gamma(decode_gamma(b) * inv / 255 + decode_gamma(t));
    Color {
        r: ch(bottom.r, top.r),
        g: ch(bottom.g, top.g),
        b: ch(bottom.b, top.b),
        a: 255,
    }
}

/// Make `color` more transparent by a further `alpha / 256`, in linear space.
///
/// Used to feather a single antialiased line pixel.
#[inline]
pub fn apply_alpha(color: Color, alpha: u8) -> Color {
    let alpha = u32::from(alpha);
    let ch = |c: u8| encode_gamma(decode_gamma(c) * alpha / 256);
    Color {
        r: ch(color.r),
        g: ch(color.g),
        b: ch(color.b),
        a: (u32::from(color.a) * alpha / 256) as u8,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/color.rs"]
mod tests;
