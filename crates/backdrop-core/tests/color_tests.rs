// HSL conversion used for entity palettes.

use backdrop_core::color::hsl_to_rgb;

#[test]
fn zero_saturation_is_gray() {
    for l in [0.0, 0.25, 0.5, 1.0] {
        let [r, g, b] = hsl_to_rgb(0.3, 0.0, l);
        assert_eq!(r, l);
        assert_eq!(g, l);
        assert_eq!(b, l);
    }
}

#[test]
fn primary_hues_map_to_primary_channels() {
    let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
    assert!((r - 1.0).abs() < 1e-5 && g.abs() < 1e-5 && b.abs() < 1e-5);
    let [r, g, b] = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
    assert!(r.abs() < 1e-5 && (g - 1.0).abs() < 1e-5 && b.abs() < 1e-5);
    let [r, g, b] = hsl_to_rgb(2.0 / 3.0, 1.0, 0.5);
    assert!(r.abs() < 1e-5 && g.abs() < 1e-5 && (b - 1.0).abs() < 1e-5);
}

#[test]
fn hue_wraps_around() {
    assert_eq!(hsl_to_rgb(0.0, 0.8, 0.5), hsl_to_rgb(1.0, 0.8, 0.5));
    assert_eq!(hsl_to_rgb(0.25, 0.8, 0.5), hsl_to_rgb(1.25, 0.8, 0.5));
}

#[test]
fn output_stays_in_unit_range() {
    let mut h = 0.0;
    while h < 1.0 {
        for c in hsl_to_rgb(h, 0.8, 0.5) {
            assert!((0.0..=1.0).contains(&c));
        }
        h += 0.01;
    }
}
