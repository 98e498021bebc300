use anyhow::Result;
use squircle_css::{
    NativeShadowStyle, ShadowColor, ShadowDescriptor, parse_box_shadow, parse_box_shadow_opt,
    parse_color, shadow_from_native_style,
};

#[test]
fn parses_a_typical_card_shadow_list() {
    let shadows = parse_box_shadow(
        "0px 1px 2px rgba(0, 0, 0, 0.12), 0px 8px 24px -4px rgba(15, 23, 42, 0.18)",
    );
    assert_eq!(shadows.len(), 2);

    assert_eq!(shadows[0].offset_y, 1.0);
    assert_eq!(shadows[0].blur, 2.0);
    assert_eq!(shadows[0].spread, 0.0);
    assert_eq!(shadows[0].color, ShadowColor::rgba(0, 0, 0, 0.12));

    assert_eq!(shadows[1].offset_y, 8.0);
    assert_eq!(shadows[1].blur, 24.0);
    assert_eq!(shadows[1].spread, -4.0);
    assert_eq!(shadows[1].color, ShadowColor::rgba(15, 23, 42, 0.18));
}

#[test]
fn keeps_source_order() {
    let shadows = parse_box_shadow("1 0 0 #100, 2 0 0 #200, 3 0 0 #300");
    let xs: Vec<f32> = shadows.iter().map(|s| s.offset_x).collect();
    assert_eq!(xs, vec![1.0, 2.0, 3.0]);
}

#[test]
fn one_bad_entry_does_not_poison_the_list() {
    let shadows = parse_box_shadow("0 0 4 hsl(0, 0%, 0%), 0 2 4 #000a, 0 0");
    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].color, ShadowColor::rgba(0, 0, 0, 170.0 / 255.0));
}

#[test]
fn channels_clamp_and_round() {
    assert_eq!(
        parse_color("rgba(300, -4, 127.6, 2)"),
        Some(ShadowColor::rgba(255, 0, 128, 1.0))
    );
    assert_eq!(parse_color("rgb(1, 2)"), None);
    assert_eq!(parse_color("transparent"), None);
}

#[test]
fn dangling_color_components_drop_the_entry() {
    assert_eq!(parse_color("rgb(1,2,)"), None);
    assert_eq!(parse_color("rgba(0,0,0,)"), None);
    assert_eq!(parse_color("rgb(1,,3)"), None);
    assert!(parse_box_shadow("0 0 4 rgba(10,20,30,)").is_empty());

    let shadows = parse_box_shadow("0 0 4 rgba(10,20,30,), 0 1 2 rgb(10,20,30)");
    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].color, ShadowColor::rgb(10, 20, 30));
}

#[test]
fn separators_alone_are_empty() {
    for input in [",", ",,", " , ", "none,"] {
        assert!(parse_box_shadow(input).is_empty(), "{input:?}");
    }
}

#[test]
fn negative_spread_is_kept_as_written() {
    let shadows = parse_box_shadow("0 0 0 -500px #000");
    assert_eq!(shadows.len(), 1);
    assert_eq!(shadows[0].spread, -500.0);
}

#[test]
fn absent_and_none_are_empty() {
    assert!(parse_box_shadow_opt(None).is_empty());
    assert!(parse_box_shadow_opt(Some("NONE")).is_empty());
    assert!(parse_box_shadow("\n\t").is_empty());
}

#[test]
fn native_style_feeds_the_parser() {
    let style = NativeShadowStyle {
        shadow_color: Some("#00000080".into()),
        shadow_opacity: Some(0.5),
        shadow_radius: Some(10.0),
        shadow_offset: Some((0.0, 5.0)),
        ..Default::default()
    };
    let shadow = shadow_from_native_style(&style).unwrap_or_default();
    let parsed = parse_box_shadow(&shadow);
    assert_eq!(
        parsed,
        vec![ShadowDescriptor {
            offset_x: 0.0,
            offset_y: 5.0,
            blur: 10.0,
            spread: 0.0,
            color: ShadowColor::rgba(0, 0, 0, 128.0 / 255.0 * 0.5),
        }]
    );
}

#[test]
fn descriptors_serialize() -> Result<()> {
    let shadows = parse_box_shadow("0 2 4 1 #ff0000");
    let json = serde_json::to_string(&shadows)?;
    let back: Vec<ShadowDescriptor> = serde_json::from_str(&json)?;
    assert_eq!(back, shadows);
    assert!(json.contains("\"spread\":1.0"));
    Ok(())
}
