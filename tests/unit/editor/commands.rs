use std::time::Duration;

use super::*;
use crate::foundation::color::Color;
use crate::foundation::error::PlateError;
use crate::model::{ShapeKind, ShapeProps};
use crate::selection::AttachState;

fn small() -> Editor {
    Editor::new(EditorConfig {
        canvas_width: 100.0,
        canvas_height: 40.0,
        plate_offset_y: 10.0,
        ..EditorConfig::default()
    })
    .unwrap()
}

fn rect() -> ElementKind {
    ElementKind::Shape(ShapeProps {
        shape: ShapeKind::Rect,
        width: 20.0,
        height: 10.0,
        fill: Color::rgb(0, 0, 255),
        stroke: None,
        stroke_width: 0.0,
    })
}

#[test]
fn invalid_config_is_rejected() {
    let err = Editor::new(EditorConfig {
        canvas_width: 0.0,
        ..EditorConfig::default()
    })
    .unwrap_err();
    assert!(matches!(err, PlateError::Validation(_)));
}

#[test]
fn add_update_delete() {
    let mut ed = small();
    ed.set_mode(Mode::Plate);
    let id = ed.add_element(rect(), Point::new(5.0, 6.0)).unwrap();
    let el = ed.state().elements().get(id).unwrap();
    assert_eq!((el.x, el.y, el.affinity), (5.0, 6.0, Mode::Plate));

    ed.update_element(
        id,
        &ElementPatch {
            x: Some(9.0),
            ..ElementPatch::default()
        },
    )
    .unwrap();
    assert_eq!(ed.state().elements().get(id).unwrap().x, 9.0);

    ed.select_element(Some(id)).unwrap();
    let removed = ed.delete_element(id).unwrap();
    assert_eq!(removed.id, id);
    assert_eq!(ed.state().selection(), None);
    assert_eq!(ed.handle_controller().state(), AttachState::Idle);
    assert!(matches!(
        ed.delete_element(id),
        Err(PlateError::UnknownElement(_))
    ));
}

#[test]
fn paint_tool_and_selection_exclude_each_other() {
    let mut ed = small();
    let id = ed.add_element(rect(), Point::ZERO).unwrap();
    ed.select_element(Some(id)).unwrap();
    ed.set_active_tool(Tool::Airbrush);
    assert_eq!(ed.state().selection(), None);

    ed.select_element(Some(id)).unwrap();
    assert_eq!(ed.state().tool(), Tool::Select);
}

#[test]
fn tool_settings_patch_switches_tool() {
    let mut ed = small();
    ed.set_tool_settings(&ToolSettingsPatch {
        tool: Some(Tool::Eraser),
        color: Some(Color::rgb(1, 2, 3)),
        brush_radius: Some(7.0),
    })
    .unwrap();
    assert_eq!(ed.state().tool(), Tool::Eraser);
    assert_eq!(ed.state().settings().brush_radius, 7.0);
    assert!(
        ed.set_tool_settings(&ToolSettingsPatch {
            brush_radius: Some(-1.0),
            ..ToolSettingsPatch::default()
        })
        .is_err()
    );
}

#[test]
fn zoom_is_clamped() {
    let mut ed = small();
    assert_eq!(ed.set_zoom(10.0), 3.0);
    assert_eq!(ed.set_zoom(0.01), 0.1);
    assert_eq!(ed.snapshot().zoom, 0.1);
}

#[test]
fn stroke_commands_respect_tool() {
    let mut ed = small();
    assert!(!ed.begin_stroke(Point::new(1.0, 1.0)));
    ed.set_active_tool(Tool::Brush);
    assert!(ed.begin_stroke(Point::new(1.0, 1.0)));
    assert!(ed.append_stroke_point(Point::new(2.0, 1.0)));
    assert!(!ed.append_stroke_point(Point::new(f64::NAN, 1.0)));
    let id = ed.commit_stroke().unwrap().unwrap();
    assert!(ed.state().elements().get(id).unwrap().is_paint());
    assert_eq!(ed.commit_stroke().unwrap(), None);
}

#[test]
fn render_attaches_handles_and_requests_redraw() {
    let mut ed = small();
    let id = ed.add_element(rect(), Point::new(10.0, 10.0)).unwrap();
    ed.select_element(Some(id)).unwrap();

    let now = Instant::now();
    let frame = ed.render(now).unwrap();
    assert_eq!((frame.width, frame.height), (100, 60));
    assert_eq!(ed.handle_controller().attached(), Some(id));
    assert!(ed.needs_redraw());
    assert_eq!(ed.last_redraw().unwrap().node, id);
    assert!(ed.handle_set().is_none());

    ed.render(now).unwrap();
    assert!(!ed.needs_redraw());
    assert_eq!(ed.handle_set().unwrap().target, id);
}

#[test]
fn tick_without_a_render_does_nothing() {
    let mut ed = small();
    assert_eq!(ed.tick(Instant::now() + Duration::from_secs(1)), None);
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut ed = small();
    let id = ed.add_element(rect(), Point::new(3.0, 4.0)).unwrap();
    ed.select_element(Some(id)).unwrap();
    ed.set_mode(Mode::Plate);

    let json = serde_json::to_string(&ed.snapshot()).unwrap();
    let back: EditorSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, ed.snapshot());

    let mut other = small();
    other
        .load_elements(back.elements.as_slice().to_vec())
        .unwrap();
    assert_eq!(other.state().elements(), ed.state().elements());
    assert_eq!(other.state().selection(), None);
}

#[test]
fn load_rejects_duplicate_ids() {
    let mut ed = small();
    let el = Element::new(rect(), Mode::Base);
    let err = ed.load_elements(vec![el.clone(), el]).unwrap_err();
    assert!(matches!(err, PlateError::Validation(_)));
}
