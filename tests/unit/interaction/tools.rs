use super::*;

#[test]
fn paint_family() {
    for t in [Tool::Brush, Tool::Airbrush, Tool::Spray, Tool::Eraser] {
        assert!(t.is_paint(), "{t:?}");
    }
    for t in [Tool::Select, Tool::Text, Tool::Shape] {
        assert!(!t.is_paint(), "{t:?}");
    }
}

#[test]
fn stroke_style_uses_diameter() {
    let s = ToolSettings {
        color: Color::rgb(255, 0, 0),
        brush_radius: 2.0,
    };
    let style = s.stroke_style(Tool::Airbrush).unwrap();
    assert_eq!(style.width, 4.0);
    assert_eq!(style.brush, BrushKind::Airbrush);
    assert!(s.stroke_style(Tool::Select).is_none());
}

#[test]
fn patch_validates_radius() {
    let mut s = ToolSettings {
        color: Color::BLACK,
        brush_radius: 2.0,
    };
    let bad = ToolSettingsPatch {
        color: Some(Color::WHITE),
        brush_radius: Some(0.0),
        ..ToolSettingsPatch::default()
    };
    assert!(bad.apply(&mut s).is_err());
    assert_eq!(s.color, Color::BLACK);

    let patch: ToolSettingsPatch =
        serde_json::from_str(r##"{"tool": "spray", "color": "#00FF00"}"##).unwrap();
    assert_eq!(patch.tool, Some(Tool::Spray));
    patch.apply(&mut s).unwrap();
    assert_eq!(s.color, Color::rgb(0, 255, 0));
    assert_eq!(s.brush_radius, 2.0);
}
