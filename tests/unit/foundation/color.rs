use super::*;

#[test]
fn gamma_roundtrips_for_every_channel_value() {
    for n in 0..=255u8 {
        let linear = decode_gamma(n);
        assert_eq!(
            encode_gamma(linear),
            n,
            "roundtrip failed for {n} -> {linear}"
        );
    }
}

#[test]
fn encode_zero_is_zero() {
    assert_eq!(encode_gamma(0), 0);
}

#[test]
fn encode_saturates_above_range() {
    assert_eq!(encode_gamma(2 * 255 * 255), 255);
}

#[test]
fn blend_matches_fixed_point_formula() {
    let bottom = Color::rgb(255, 0, 0);
    let top = Color::rgba(0, 128, 0, 128);
    // red: sqrt(65025 * 127 / 255) = sqrt(32385) -> 179; green: sqrt(16384) = 128
    assert_eq!(blend(bottom, top), Color::rgba(179, 128, 0, 255));
}

#[test]
fn blend_with_opaque_top_replaces_bottom() {
    let top = Color::rgb(12, 200, 99);
    assert_eq!(blend(Color::rgb(255, 255, 255), top), top);
}

#[test]
fn blend_with_transparent_top_keeps_bottom() {
    let bottom = Color::rgb(40, 80, 120);
    assert_eq!(blend(bottom, Color::TRANSPARENT), bottom);
}

#[test]
fn blend_result_is_opaque() {
    let out = blend(Color::rgb(1, 2, 3), Color::rgba(10, 10, 10, 10));
    assert!(out.is_opaque());
}

#[test]
fn apply_alpha_scales_alpha_by_256ths() {
    let c = apply_alpha(Color::rgb(255, 255, 255), 128);
    assert_eq!(c.a, 127);
    // 65025 * 128 / 256 = 32512 -> sqrt = 180
    assert_eq!(c.r, 180);
    assert_eq!(apply_alpha(Color::rgb(255, 0, 0), 0), Color::TRANSPARENT);
}

#[test]
fn with_opacity_keeps_full_alpha_at_255() {
    let c = Color::with_opacity(200, 100, 50, 255);
    assert_eq!(c, Color::rgb(200, 100, 50));
    let half = Color::with_opacity(255, 0, 0, 128);
    assert_eq!(half.a, 128);
    assert!(half.r < 255);
}

#[test]
fn array_conversions_roundtrip() {
    let c = Color::rgba(1, 2, 3, 4);
    let a: [u8; 4] = c.into();
    assert_eq!(Color::from(a), c);
}
