use super::*;
use serde_json::json;

#[test]
fn parses_hex_rgb_and_rgba() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(json!("#0000FF80")).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));

    assert!(Color::parse_hex("#12345").is_err());
    assert!(Color::parse_hex("#GG0000").is_err());
}

#[test]
fn parses_rgba_object() {
    let c: Color = serde_json::from_value(json!({"r": 1, "g": 2, "b": 3})).unwrap();
    assert_eq!(c, Color::rgba(1, 2, 3, 255));
}

#[test]
fn serializes_as_uppercase_hex() {
    assert_eq!(
        serde_json::to_value(Color::rgb(255, 0, 0)).unwrap(),
        json!("#FF0000")
    );
    assert_eq!(Color::rgba(1, 2, 3, 4).to_string(), "#01020304");
}

#[test]
fn premul_applies_alpha() {
    assert_eq!(
        Color::rgba(255, 255, 255, 0).to_premul(),
        Rgba8Premul::transparent()
    );
    assert_eq!(Color::WHITE.to_premul().to_array(), [255, 255, 255, 255]);
}
