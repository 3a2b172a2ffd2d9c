use super::*;
use crate::config::Action;
use crate::draw::{EncodedSnapshot, RED};
use crate::history::History;
use crate::input::{Cursor, Focus, Key};
use crate::page::{ElementSize, Page};

const WHITE_PX: [u8; 4] = [255, 255, 255, 255];
const BLACK_PX: [u8; 4] = [0, 0, 0, 255];

fn create_test_widget() -> Widget {
    Widget::new(WidgetConfig::new("canvas"), ElementSize::new(100, 100)).unwrap()
}

fn p(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn drag(widget: &mut Widget, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().unwrap();
    widget.pointer_down(p(first.0, first.1));
    for &(x, y) in rest {
        widget.pointer_move(p(x, y));
    }
    widget.pointer_up();
}

fn press_chord(widget: &mut Widget, modifier: Key, c: char) -> bool {
    widget.on_key_press(modifier);
    widget.on_key_press(Key::Shift);
    let handled = widget.on_key_press(Key::Char(c));
    widget.on_key_release(Key::Shift);
    widget.on_key_release(modifier);
    handled
}

fn is_dark(pixel: Option<[u8; 4]>) -> bool {
    matches!(pixel, Some([r, g, b, 255]) if r < 128 && g < 128 && b < 128)
}

#[test]
fn test_fresh_widget() {
    let widget = create_test_widget();
    assert_eq!(widget.history().past_len(), 1);
    assert_eq!(widget.history().future_len(), 0);
    assert_eq!(widget.active_tool(), Tool::Brush);
    assert_eq!(widget.cursor(), Cursor::Pencil);
    assert_eq!(widget.brush(), BrushSettings::default());
    assert!(!widget.is_drawing());
    assert_eq!(widget.surface().pixel(0, 0), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(99, 99), Some(WHITE_PX));
}

#[test]
fn test_stroke_undo_redo_scenario() {
    let mut widget = create_test_widget();
    let blank = widget.surface().capture().unwrap();

    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);
    let stroked = widget.surface().capture().unwrap();
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
    assert_eq!(widget.surface().pixel(50, 60), Some(WHITE_PX));
    assert_eq!(widget.history().past_len(), 2);

    let mut handle = widget.undo().unwrap();
    assert_eq!(widget.history().past_len(), 1);
    assert_eq!(widget.history().future_len(), 1);
    // Restores are deferred until the host runs the queue
    assert!(handle.try_outcome().is_none());
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));

    assert_eq!(widget.run_pending(), 1);
    assert!(matches!(handle.try_outcome(), Some(Ok(()))));
    assert_eq!(widget.surface().capture().unwrap(), blank);

    let handle = widget.redo().unwrap();
    widget.run_pending();
    assert!(futures::executor::block_on(handle).is_ok());
    assert_eq!(widget.history().past_len(), 2);
    assert_eq!(widget.history().future_len(), 0);
    assert_eq!(widget.surface().capture().unwrap(), stroked);
}

#[test]
fn test_undo_at_initial_state_is_noop() {
    let mut widget = create_test_widget();
    let before = widget.surface().capture().unwrap();

    assert!(widget.undo().is_none());
    assert!(widget.undo().is_none());
    assert_eq!(widget.pending_paints(), 0);
    assert_eq!(widget.history().past_len(), 1);
    assert_eq!(widget.history().future_len(), 0);
    assert_eq!(widget.surface().capture().unwrap(), before);
}

#[test]
fn test_redo_without_undo_is_noop() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 10.0), (20.0, 20.0)]);
    assert!(widget.redo().is_none());
    assert_eq!(widget.pending_paints(), 0);
}

#[test]
fn test_new_stroke_clears_future() {
    let mut widget = create_test_widget();
    for y in [20.0, 40.0, 60.0] {
        drag(&mut widget, &[(10.0, y), (90.0, y)]);
    }
    let _ = widget.undo();
    let _ = widget.undo();
    widget.run_pending();
    assert_eq!(widget.history().future_len(), 2);

    drag(&mut widget, &[(10.0, 80.0), (90.0, 80.0)]);
    assert_eq!(widget.history().future_len(), 0);
    assert_eq!(widget.history().past_len(), 3);
    assert!(widget.redo().is_none());
}

#[test]
fn test_pointer_down_settles_pending_paints() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);
    let _ = widget.undo();
    assert_eq!(widget.pending_paints(), 1);

    widget.pointer_down(p(5.0, 5.0));
    assert_eq!(widget.pending_paints(), 0);
    assert_eq!(widget.surface().pixel(50, 50), Some(WHITE_PX));
    widget.pointer_up();
}

#[test]
fn test_shape_preview_does_not_accumulate() {
    let mut widget = create_test_widget();
    assert!(widget.select_tool(Tool::Line));
    assert_eq!(widget.cursor(), Cursor::Crosshair);

    drag(&mut widget, &[(10.0, 10.0), (90.0, 10.0), (10.0, 90.0)]);

    assert_eq!(widget.surface().pixel(50, 10), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(10, 50), Some(BLACK_PX));
    assert_eq!(widget.history().past_len(), 2);
}

#[test]
fn test_negative_rectangle_is_normalized() {
    let mut widget = create_test_widget();
    widget.select_tool(Tool::Rectangle);
    widget.set_brush_size(2.0);

    drag(&mut widget, &[(80.0, 80.0), (20.0, 20.0)]);

    assert_eq!(widget.surface().pixel(50, 20), Some(BLACK_PX));
    assert_eq!(widget.surface().pixel(20, 50), Some(BLACK_PX));
    assert_eq!(widget.surface().pixel(50, 50), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(50, 10), Some(WHITE_PX));
}

#[test]
fn test_circle_radius_from_anchor_distance() {
    let mut widget = create_test_widget();
    widget.select_tool(Tool::Circle);
    widget.set_brush_size(2.0);

    // (10,10) -> (13,14) is a 3-4-5 triangle: radius 5 around the anchor
    drag(&mut widget, &[(10.0, 10.0), (13.0, 14.0)]);

    assert!(is_dark(widget.surface().pixel(15, 10)));
    assert!(is_dark(widget.surface().pixel(10, 15)));
    assert_eq!(widget.surface().pixel(10, 10), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(18, 10), Some(WHITE_PX));
}

#[test]
fn test_eraser_paints_opaque_background() {
    let mut widget = create_test_widget();
    widget.set_brush_size(20.0);
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));

    widget.select_tool(Tool::Eraser);
    assert_eq!(widget.cursor(), Cursor::Disc);
    widget.set_brush_size(12.0);
    drag(&mut widget, &[(50.0, 50.0), (50.0, 50.0)]);

    assert_eq!(widget.surface().pixel(50, 50), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(50, 42), Some(BLACK_PX));

    // Erasing blank areas still yields opaque white
    drag(&mut widget, &[(5.0, 5.0), (5.0, 5.0)]);
    assert_eq!(widget.surface().pixel(5, 5), Some(WHITE_PX));
}

#[test]
fn test_pointer_events_while_idle_are_noops() {
    let mut widget = create_test_widget();
    let before = widget.surface().capture().unwrap();
    let _ = widget.take_dirty_regions();

    widget.pointer_move(p(50.0, 50.0));
    widget.pointer_up();
    widget.pointer_leave();

    assert_eq!(widget.history().past_len(), 1);
    assert_eq!(widget.surface().capture().unwrap(), before);
    assert!(widget.take_dirty_regions().is_empty());
}

#[test]
fn test_pointer_leave_commits_stroke() {
    let mut widget = create_test_widget();
    widget.pointer_down(p(10.0, 50.0));
    widget.pointer_move(p(90.0, 50.0));
    widget.pointer_leave();

    assert!(!widget.is_drawing());
    assert_eq!(widget.history().past_len(), 2);
}

#[test]
fn test_select_tool_ignored_mid_stroke() {
    let mut widget = create_test_widget();
    widget.pointer_down(p(10.0, 10.0));
    assert!(!widget.select_tool(Tool::Circle));
    assert_eq!(widget.active_tool(), Tool::Brush);
    widget.pointer_up();

    assert!(widget.select_tool(Tool::Circle));
    assert_eq!(widget.active_tool(), Tool::Circle);
}

#[test]
fn test_brush_changes_apply_to_next_stroke() {
    let mut widget = create_test_widget();
    widget.pointer_down(p(10.0, 50.0));
    widget.set_brush_size(40.0);
    widget.set_brush_color(RED);
    widget.pointer_move(p(90.0, 50.0));
    widget.pointer_up();

    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
    assert_eq!(widget.surface().pixel(50, 60), Some(WHITE_PX));

    drag(&mut widget, &[(10.0, 20.0), (90.0, 20.0)]);
    assert_eq!(widget.surface().pixel(50, 20), Some([255, 0, 0, 255]));
    assert_eq!(widget.surface().pixel(50, 35), Some([255, 0, 0, 255]));
}

#[test]
fn test_brush_size_is_clamped() {
    let mut widget = create_test_widget();
    widget.set_brush_size(0.0);
    assert_eq!(widget.brush().size(), 1.0);
    widget.set_brush_size(120.0);
    assert_eq!(widget.brush().size(), 50.0);
    widget.set_brush_size(f64::NAN);
    assert_eq!(widget.brush().size(), BrushSettings::DEFAULT_SIZE);
}

#[test]
fn test_brush_color_from_picker_value() {
    let mut widget = create_test_widget();
    assert!(widget.set_brush_color_hex("#ff0000"));
    assert_eq!(widget.brush().color, RED);
    assert!(!widget.set_brush_color_hex("tomato"));
    assert_eq!(widget.brush().color, RED);
}

#[test]
fn test_shortcuts_select_tools() {
    let mut widget = create_test_widget();
    assert!(press_chord(&mut widget, Key::Ctrl, 'E'));
    assert_eq!(widget.active_tool(), Tool::Eraser);

    // Meta works wherever Ctrl does
    assert!(press_chord(&mut widget, Key::Meta, 'l'));
    assert_eq!(widget.active_tool(), Tool::Line);

    widget.on_key_press(Key::Ctrl);
    assert!(!widget.on_key_press(Key::Char('r')));
    widget.on_key_release(Key::Ctrl);
    assert_eq!(widget.active_tool(), Tool::Line);
}

#[test]
fn test_shortcuts_fire_with_alt_held() {
    let mut widget = create_test_widget();
    widget.select_tool(Tool::Line);
    widget.on_key_press(Key::Alt);
    assert!(press_chord(&mut widget, Key::Ctrl, 'b'));
    widget.on_key_release(Key::Alt);
    assert_eq!(widget.active_tool(), Tool::Brush);
}

#[test]
fn test_exact_alt_binding_wins() {
    let mut settings = Config::default();
    settings.keybindings.select_eraser = vec!["Ctrl+Alt+Shift+B".to_string()];
    let mut widget = Widget::new(
        WidgetConfig::new("canvas").with_settings(settings),
        ElementSize::new(10, 10),
    )
    .unwrap();

    widget.on_key_press(Key::Alt);
    assert!(press_chord(&mut widget, Key::Ctrl, 'b'));
    widget.on_key_release(Key::Alt);
    assert_eq!(widget.active_tool(), Tool::Eraser);

    assert!(press_chord(&mut widget, Key::Ctrl, 'b'));
    assert_eq!(widget.active_tool(), Tool::Brush);
}

#[test]
fn test_shortcuts_suppressed_in_text_field() {
    let mut widget = create_test_widget();
    widget.set_focus(Focus::TextField);
    assert!(!press_chord(&mut widget, Key::Ctrl, 'c'));
    assert_eq!(widget.active_tool(), Tool::Brush);

    widget.set_focus(Focus::Canvas);
    assert!(press_chord(&mut widget, Key::Ctrl, 'c'));
    assert_eq!(widget.active_tool(), Tool::Circle);
}

#[test]
fn test_keyboard_undo_and_redo() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);

    assert!(press_chord(&mut widget, Key::Ctrl, 'z'));
    assert_eq!(widget.pending_paints(), 1);
    widget.run_pending();
    assert_eq!(widget.surface().pixel(50, 50), Some(WHITE_PX));

    assert!(press_chord(&mut widget, Key::Meta, 'y'));
    widget.run_pending();
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
}

#[test]
fn test_commands_ignored_mid_stroke() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 20.0), (90.0, 20.0)]);

    widget.pointer_down(p(10.0, 50.0));
    widget.pointer_move(p(90.0, 50.0));
    assert!(widget.undo().is_none());
    assert!(widget.redo().is_none());
    assert!(!widget.clear());
    assert!(widget.save());
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
    widget.pointer_up();

    assert_eq!(widget.history().past_len(), 3);
    assert!(widget.take_pending_export().is_some());
}

#[test]
fn test_toolbar_commands_ignored_mid_stroke() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 20.0), (90.0, 20.0)]);

    widget.pointer_down(p(10.0, 50.0));
    widget.pointer_move(p(90.0, 50.0));
    assert!(widget.activate(Action::Undo).is_none());
    assert!(widget.activate_by_id("clear"));
    assert_eq!(widget.pending_paints(), 0);
    assert_eq!(widget.surface().pixel(50, 20), Some(BLACK_PX));
    assert!(widget.activate_by_id("save"));
    widget.pointer_up();

    assert_eq!(widget.history().past_len(), 3);
    assert!(widget.take_pending_export().is_some());
}

#[test]
fn test_clear_is_undoable() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);

    assert!(widget.clear());
    assert_eq!(widget.surface().pixel(50, 50), Some(WHITE_PX));
    assert_eq!(widget.history().past_len(), 3);

    let _ = widget.activate(Action::Undo);
    widget.run_pending();
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
}

#[test]
fn test_save_queues_png_export() {
    let mut widget = create_test_widget();
    assert!(widget.take_pending_export().is_none());

    assert!(widget.activate_by_id("save"));
    let export = widget.take_pending_export().unwrap();
    assert_eq!(export.filename, "my-drawing.png");
    assert!(export.bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    assert!(widget.take_pending_export().is_none());
}

#[test]
fn test_toolbar_ids_activate_actions() {
    let mut widget = create_test_widget();
    assert!(widget.activate_by_id("rectangle"));
    assert_eq!(widget.active_tool(), Tool::Rectangle);
    assert!(!widget.activate_by_id("spray"));
    assert_eq!(widget.toolbar().len(), Action::ALL.len());
    assert_eq!(widget.toolbar()[0].title, "Brush (Ctrl+Shift+B)");
}

#[test]
fn test_corrupt_snapshot_reports_error_and_keeps_surface() {
    let mut widget = create_test_widget();
    widget.history = History::new(EncodedSnapshot::from_png_bytes(vec![0u8; 8]), 0);
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);
    let before = widget.surface().capture().unwrap();

    let mut handle = widget.undo().unwrap();
    assert_eq!(widget.run_pending(), 1);

    assert!(matches!(
        handle.try_outcome(),
        Some(Err(SnapshotError::Decode(_)))
    ));
    assert_eq!(widget.surface().capture().unwrap(), before);

    // The widget stays usable
    drag(&mut widget, &[(10.0, 80.0), (90.0, 80.0)]);
    assert_eq!(widget.surface().pixel(50, 80), Some(BLACK_PX));
}

#[test]
fn test_widgets_are_independent() {
    let mut page = Page::new();
    let mut first = Widget::mount(&mut page, WidgetConfig::new("first")).unwrap();
    let second = Widget::mount(&mut page, WidgetConfig::new("second")).unwrap();

    first.select_tool(Tool::Line);
    drag(&mut first, &[(10.0, 10.0), (200.0, 10.0)]);

    assert_eq!(second.active_tool(), Tool::Brush);
    assert_eq!(second.history().past_len(), 1);
    assert_eq!(second.surface().pixel(100, 10), Some(WHITE_PX));
    assert_eq!(first.surface().pixel(100, 10), Some(BLACK_PX));
}

#[test]
fn test_mount_creates_missing_canvas() {
    let mut page = Page::new();
    page.insert_canvas("existing", ElementSize::new(64, 48));

    let widget = Widget::mount(&mut page, WidgetConfig::new("existing")).unwrap();
    assert_eq!((widget.surface().width(), widget.surface().height()), (64, 48));

    let widget = Widget::mount(&mut page, WidgetConfig::new("fresh")).unwrap();
    assert_eq!(page.canvas("fresh"), Some(ElementSize::new(800, 600)));
    assert_eq!(widget.canvas_id(), "fresh");
    assert_eq!((widget.surface().width(), widget.surface().height()), (800, 600));
}

#[test]
fn test_mount_rejects_empty_id() {
    let mut page = Page::new();
    assert!(matches!(
        Widget::mount(&mut page, WidgetConfig::new("  ")),
        Err(WidgetError::EmptyCanvasId)
    ));
    assert!(!page.contains("  "));
}

#[test]
fn test_mount_rejects_duplicate_bindings() {
    let mut settings = Config::default();
    settings.keybindings.save = vec!["Ctrl+Shift+Z".to_string()];
    let result = Widget::new(
        WidgetConfig::new("canvas").with_settings(settings),
        ElementSize::new(10, 10),
    );
    assert!(matches!(result, Err(WidgetError::Keybindings(_))));
}

#[test]
fn test_config_defaults_apply() {
    let mut settings = Config::default();
    settings.brush.default_size = 9.0;
    settings.brush.default_color = crate::config::ColorSpec::Name("red".into());
    settings.history.max_depth = 3;
    let mut widget = Widget::new(
        WidgetConfig::new("canvas").with_settings(settings),
        ElementSize::new(50, 50),
    )
    .unwrap();
    assert_eq!(widget.brush(), BrushSettings::new(RED, 9.0));

    for y in [5.0, 15.0, 25.0, 35.0, 45.0] {
        drag(&mut widget, &[(5.0, y), (45.0, y)]);
    }
    assert_eq!(widget.history().past_len(), 3);
}

#[test]
fn test_container_resize_preserves_content() {
    let mut widget = create_test_widget();
    drag(&mut widget, &[(10.0, 50.0), (90.0, 50.0)]);
    let _ = widget.take_dirty_regions();

    widget.on_container_resize(150, 60);
    assert_eq!((widget.surface().width(), widget.surface().height()), (150, 60));
    assert_eq!(widget.surface().pixel(50, 50), Some(BLACK_PX));
    assert_eq!(widget.surface().pixel(10, 10), Some(WHITE_PX));
    assert_eq!(widget.surface().pixel(120, 10).map(|px| px[3]), Some(0));

    let regions = widget.take_dirty_regions();
    assert_eq!(regions.len(), 1);
    assert_eq!((regions[0].width, regions[0].height), (150, 60));
}

#[test]
fn test_dirty_regions_cover_strokes() {
    let mut widget = create_test_widget();
    let initial = widget.take_dirty_regions();
    assert_eq!(initial.len(), 1);

    drag(&mut widget, &[(10.0, 50.0), (30.0, 50.0)]);
    let regions = widget.take_dirty_regions();
    assert!(!regions.is_empty());
    for rect in &regions {
        assert!(rect.x <= 10 && rect.x + rect.width >= 30);
        assert!(rect.y <= 48 && rect.y + rect.height >= 52);
    }
}

#[test]
fn test_far_offscreen_pointer_keeps_damage_local() {
    let mut widget = create_test_widget();
    let _ = widget.take_dirty_regions();

    widget.select_tool(Tool::Line);
    drag(&mut widget, &[(0.0, 0.0), (3e9, 10.0)]);
    let regions = widget.take_dirty_regions();
    assert!(!regions.is_empty());
    for rect in &regions {
        assert!(rect.x >= 0 && rect.x + rect.width <= 100);
        assert!(rect.y >= 0 && rect.height < 100);
    }

    widget.select_tool(Tool::Brush);
    drag(&mut widget, &[(50.0, 10.0), (-3e9, 10.0)]);
    let regions = widget.take_dirty_regions();
    assert!(!regions.is_empty());
    for rect in &regions {
        assert!(rect.x >= 0 && rect.x + rect.width <= 100);
        assert!(rect.y >= 0 && rect.height < 100);
    }
    assert_eq!(widget.history().past_len(), 3);
}
