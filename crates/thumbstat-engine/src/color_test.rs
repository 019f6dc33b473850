use super::*;

fn saturated(hue: f64) -> Hsl {
    Hsl {
        hue,
        saturation: 1.0,
        lightness: 0.5,
    }
}

fn family_of_hex(hex: &str) -> Option<ColorFamily> {
    to_hsl(&ColorValue::from(hex)).map(family_of)
}

// -----------------------------------------------------------------------
// Parsing
// -----------------------------------------------------------------------

#[test]
fn parses_six_digit_hex_with_and_without_hash() {
    let expected = Rgb { r: 255, g: 128, b: 0 };
    assert_eq!(parse_color(&ColorValue::from("#FF8000")), Some(expected));
    assert_eq!(parse_color(&ColorValue::from("ff8000")), Some(expected));
}

#[test]
fn parses_three_digit_hex() {
    assert_eq!(
        parse_color(&ColorValue::from("#f0a")),
        Some(Rgb { r: 255, g: 0, b: 170 })
    );
}

#[test]
fn parses_rgb_function_strings() {
    assert_eq!(
        parse_color(&ColorValue::from("rgb(10, 20, 30)")),
        Some(Rgb { r: 10, g: 20, b: 30 })
    );
    assert_eq!(
        parse_color(&ColorValue::from("RGBA(10,20,30,0.5)")),
        Some(Rgb { r: 10, g: 20, b: 30 })
    );
}

#[test]
fn clamps_out_of_range_channels() {
    assert_eq!(
        parse_color(&ColorValue::Rgb([300.0, -20.0, 127.6])),
        Some(Rgb { r: 255, g: 0, b: 128 })
    );
    assert_eq!(
        parse_color(&ColorValue::from("rgb(999, 0, -1)")),
        Some(Rgb { r: 255, g: 0, b: 0 })
    );
}

#[test]
fn unparseable_input_returns_none() {
    for bad in ["", "not-a-color", "#GGGGGG", "#12345", "rgb(1, 2)", "rgb(a, b, c)", "#ééé"] {
        assert!(
            parse_color(&ColorValue::from(bad)).is_none(),
            "expected None for {bad:?}"
        );
    }
    assert!(parse_color(&ColorValue::Rgb([f64::NAN, 0.0, 0.0])).is_none());
}

#[test]
fn to_hex_is_uppercase_rrggbb() {
    assert_eq!(Rgb { r: 1, g: 171, b: 255 }.to_hex(), "#01ABFF");
}

// -----------------------------------------------------------------------
// RGB → HSL
// -----------------------------------------------------------------------

#[test]
fn primary_colors_convert_to_expected_hues() {
    let red = rgb_to_hsl(Rgb { r: 255, g: 0, b: 0 });
    assert!((red.hue - 0.0).abs() < 1e-9);
    assert!((red.saturation - 1.0).abs() < 1e-9);
    assert!((red.lightness - 0.5).abs() < 1e-9);

    let green = rgb_to_hsl(Rgb { r: 0, g: 255, b: 0 });
    assert!((green.hue - 120.0).abs() < 1e-9);

    let blue = rgb_to_hsl(Rgb { r: 0, g: 0, b: 255 });
    assert!((blue.hue - 240.0).abs() < 1e-9);
}

#[test]
fn achromatic_colors_have_zero_saturation() {
    let gray = rgb_to_hsl(Rgb { r: 128, g: 128, b: 128 });
    assert_eq!(gray.saturation, 0.0);
    assert_eq!(gray.hue, 0.0);
}

#[test]
fn magenta_side_hue_stays_below_360() {
    let hsl = rgb_to_hsl(Rgb { r: 255, g: 0, b: 1 });
    assert!(hsl.hue > 359.0 && hsl.hue < 360.0, "got {}", hsl.hue);
}

// -----------------------------------------------------------------------
// Family classification
// -----------------------------------------------------------------------

#[test]
fn hue_boundaries_are_exact() {
    assert_eq!(family_of(saturated(0.0)), ColorFamily::Red);
    assert_eq!(family_of(saturated(14.9)), ColorFamily::Red);
    assert_eq!(family_of(saturated(14.99)), ColorFamily::Red);
    assert_eq!(family_of(saturated(15.0)), ColorFamily::RedOrange);
    assert_eq!(family_of(saturated(344.9)), ColorFamily::Magenta);
    assert_eq!(family_of(saturated(344.99)), ColorFamily::Magenta);
    assert_eq!(family_of(saturated(345.0)), ColorFamily::Red);
}

#[test]
fn each_sector_maps_to_wheel_order() {
    for (i, expected) in ColorFamily::HUE_WHEEL.iter().enumerate() {
        #[allow(clippy::cast_precision_loss)]
        let center = i as f64 * 30.0;
        assert_eq!(family_of(saturated(center)), *expected, "hue {center}");
    }
}

#[test]
fn neutral_priority_overrides_hue() {
    for hue in [0.0, 90.0, 200.0, 330.0] {
        let white = Hsl {
            hue,
            saturation: 1.0,
            lightness: 0.9,
        };
        assert_eq!(family_of(white), ColorFamily::White);
        let black = Hsl {
            hue,
            saturation: 1.0,
            lightness: 0.1,
        };
        assert_eq!(family_of(black), ColorFamily::Black);
        let gray = Hsl {
            hue,
            saturation: 0.1,
            lightness: 0.5,
        };
        assert_eq!(family_of(gray), ColorFamily::Gray);
    }
}

#[test]
fn classifier_is_total_over_rgb_grid() {
    for r in (0..=255u16).step_by(15) {
        for g in (0..=255u16).step_by(15) {
            for b in (0..=255u16).step_by(15) {
                let rgb = Rgb {
                    r: u8::try_from(r).unwrap(),
                    g: u8::try_from(g).unwrap(),
                    b: u8::try_from(b).unwrap(),
                };
                let family = family_of(rgb_to_hsl(rgb));
                assert!(ColorFamily::ALL.contains(&family));
            }
        }
    }
}

#[test]
fn common_hex_colors_classify() {
    assert_eq!(family_of_hex("#FF0000"), Some(ColorFamily::Red));
    assert_eq!(family_of_hex("#0000FF"), Some(ColorFamily::Blue));
    assert_eq!(family_of_hex("#FFFFFF"), Some(ColorFamily::White));
    assert_eq!(family_of_hex("#000000"), Some(ColorFamily::Black));
    assert_eq!(family_of_hex("#808080"), Some(ColorFamily::Gray));
    assert_eq!(family_of_hex("#FF00FF"), Some(ColorFamily::Violet));
    assert_eq!(family_of_hex("nope"), None);
}

#[test]
fn coarse_groups_partition_families() {
    assert_eq!(coarse_group_of(ColorFamily::Red), CoarseGroup::Warm);
    assert_eq!(coarse_group_of(ColorFamily::YellowGreen), CoarseGroup::Warm);
    assert_eq!(coarse_group_of(ColorFamily::Green), CoarseGroup::Cool);
    assert_eq!(coarse_group_of(ColorFamily::Magenta), CoarseGroup::Cool);
    for neutral in ColorFamily::NEUTRALS {
        assert_eq!(coarse_group_of(neutral), CoarseGroup::Neutral);
    }
    let warm = ColorFamily::ALL
        .iter()
        .filter(|f| coarse_group_of(**f) == CoarseGroup::Warm)
        .count();
    let cool = ColorFamily::ALL
        .iter()
        .filter(|f| coarse_group_of(**f) == CoarseGroup::Cool)
        .count();
    assert_eq!((warm, cool), (5, 7));
}

#[test]
fn family_labels_serialize_with_hyphens() {
    let json = serde_json::to_string(&ColorFamily::BlueViolet).unwrap();
    assert_eq!(json, "\"Blue-Violet\"");
    assert_eq!(ColorFamily::RedOrange.to_string(), "Red-Orange");
}
