use crate::ColorRGBA;

/// A pure pixel combinator: `(destination, source) -> result`.
///
/// The core is opaque to what a [BlendMode] computes; it only ever calls
/// the mixer function the caller supplies.
pub type Mixer = fn(ColorRGBA, ColorRGBA) -> ColorRGBA;

/// A blend mode, i.e. a named [Mixer].
///
/// `Normal` (Porter-Duff source-over) is the only blend mode this crate
/// ships; anything else is supplied by the caller as a raw [Mixer].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BlendMode {
    #[default]
    Normal,
}

impl BlendMode {
    #[must_use]
    pub fn mixer(&self) -> Mixer {
        match self {
            Self::Normal => normal,
        }
    }
}

/// Standard Porter-Duff source-over compositing with straight alpha.
#[must_use]
pub fn normal(dst: ColorRGBA, src: ColorRGBA) -> ColorRGBA {
    if src.a == 255 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }

    let src_a = src.a as f32 / 255.0;
    let dst_a = dst.a as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    if out_a <= f32::EPSILON {
        return ColorRGBA::TRANSPARENT;
    }

    let mix_channel = |s: u8, d: u8| -> u8 {
        let s = s as f32 / 255.0;
        let d = d as f32 / 255.0;
        let out = (s * src_a + d * dst_a * (1.0 - src_a)) / out_a;
        (out * 255.0).round().clamp(0.0, 255.0) as u8
    };

    ColorRGBA::new(
        mix_channel(src.r, dst.r),
        mix_channel(src.g, dst.g),
        mix_channel(src.b, dst.b),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opaque_source_replaces_destination() {
        let dst = ColorRGBA::rgb(10, 20, 30);
        let src = ColorRGBA::rgb(200, 200, 200);
        assert_eq!(normal(dst, src), src);
    }

    #[test]
    fn transparent_source_keeps_destination() {
        let dst = ColorRGBA::rgb(10, 20, 30);
        let src = ColorRGBA::new(200, 200, 200, 0);
        assert_eq!(normal(dst, src), dst);
    }

    #[test]
    fn half_alpha_over_opaque_white_darkens_toward_source() {
        let dst = ColorRGBA::WHITE;
        let src = ColorRGBA::new(0, 0, 0, 128);
        let result = normal(dst, src);
        assert_eq!(result.a, 255);
        assert!(result.r < 255 && result.r > 0);
    }
}
