use std::time::Duration;

use image::{Rgba, RgbaImage};

use super::*;
use crate::config::Config;
use crate::draw::RED;
use crate::draw::text::bundled_renderer;
use crate::error::EditorError;
use crate::input::{Key, Modifiers, PointerEvent, TouchEvent};
use crate::tools::{CommitTrigger, ToolKind};

fn pattern(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| Rgba([x as u8, y as u8, 128, 255]))
}

fn at(x: f64, y: f64) -> PointerEvent {
    PointerEvent::new(x, y)
}

async fn loaded(config: &Config, width: u32, height: u32) -> EditingSession {
    let mut session = EditingSession::attached(config);
    session
        .load_image(ImageSource::Raster(pattern(width, height)))
        .await
        .unwrap();
    session
}

fn pixels(session: &EditingSession) -> RgbaImage {
    session.surface().unwrap().pixels().clone()
}

fn drag(session: &mut EditingSession, from: (f64, f64), to: (f64, f64)) {
    session.pointer_down(at(from.0, from.1));
    session.pointer_move(at(to.0, to.1));
    session.pointer_up(at(to.0, to.1));
}

#[tokio::test]
async fn load_waits_for_the_host_to_attach() {
    let (mut session, signal) = EditingSession::new(&Config::default());
    let host = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        signal.attach();
    });

    session
        .load_image(ImageSource::Raster(pattern(4, 4)))
        .await
        .unwrap();
    host.await.unwrap();
    assert_eq!(session.surface().unwrap().dimensions(), (4, 4));
}

#[tokio::test]
async fn load_fails_when_never_attached() {
    let mut config = Config::default();
    config.session.attach_timeout_ms = 100;

    let (mut session, _signal) = EditingSession::new(&config);
    let err = session
        .load_image(ImageSource::Raster(pattern(4, 4)))
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::NotReady(_)));

    let (mut session, signal) = EditingSession::new(&config);
    drop(signal);
    let err = session
        .load_image(ImageSource::Raster(pattern(4, 4)))
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::NotReady(_)));
    assert!(session.surface().is_none());
}

#[tokio::test]
async fn undecodable_input_leaves_session_untouched() {
    let mut session = loaded(&Config::default(), 8, 8).await;
    let before = pixels(&session);

    let err = session
        .load_image(ImageSource::Encoded(vec![0, 1, 2, 3]))
        .await
        .unwrap_err();
    assert!(matches!(err, EditorError::Decode(_)));
    assert_eq!(pixels(&session), before);
    assert_eq!(session.history().undo_depth(), 1);
}

#[tokio::test]
async fn events_follow_the_session_lifecycle() {
    let mut session = EditingSession::attached(&Config::default());
    let mut events = session.subscribe();

    session
        .load_image(ImageSource::Raster(pattern(6, 3)))
        .await
        .unwrap();
    let exported = session.export_image().await.unwrap();
    session.close();

    assert_eq!(
        events.recv().await,
        Some(SessionEvent::Opened {
            width: 6,
            height: 3
        })
    );
    assert_eq!(
        events.recv().await,
        Some(SessionEvent::OutputProduced(exported))
    );
    assert_eq!(events.recv().await, Some(SessionEvent::Closed));
    assert!(session.surface().is_none());
}

#[tokio::test]
async fn export_of_fresh_load_decodes_to_loaded_pixels() {
    let mut session = loaded(&Config::default(), 20, 10).await;
    let exported = session.export_image().await.unwrap();

    let decoded = image::load_from_memory(&exported.blob).unwrap().to_rgba8();
    assert_eq!(decoded, pattern(20, 10));
    assert_eq!(decode_data_uri(&exported.encoded_text).unwrap(), exported.blob);
}

#[tokio::test]
async fn export_without_image_is_an_encode_error() {
    let mut session = EditingSession::attached(&Config::default());
    assert!(matches!(
        session.export_image().await,
        Err(EditorError::Encode(_))
    ));
}

#[tokio::test]
async fn pointer_input_before_load_is_ignored() {
    let mut session = EditingSession::attached(&Config::default());
    drag(&mut session, (1.0, 1.0), (5.0, 5.0));
    assert!(!session.is_interacting());
    assert!(!session.history().can_undo());
    assert!(!session.undo());
}

#[tokio::test]
async fn undoing_every_gesture_returns_to_the_loaded_image() {
    let mut session = loaded(&Config::default(), 80, 80).await;
    let baseline = pixels(&session);

    drag(&mut session, (10.0, 10.0), (60.0, 10.0));
    session.select_tool("rectangle");
    drag(&mut session, (5.0, 20.0), (40.0, 50.0));
    session.select_tool("arrow");
    drag(&mut session, (10.0, 70.0), (70.0, 70.0));
    assert_ne!(pixels(&session), baseline);

    for _ in 0..3 {
        assert!(session.undo());
    }
    assert_eq!(pixels(&session), baseline);
}

#[tokio::test]
async fn undo_then_redo_is_identity() {
    let mut session = loaded(&Config::default(), 40, 40).await;
    drag(&mut session, (5.0, 5.0), (35.0, 30.0));
    let drawn = pixels(&session);

    assert!(session.undo());
    assert_ne!(pixels(&session), drawn);
    assert!(session.redo());
    assert_eq!(pixels(&session), drawn);
    assert!(!session.redo());
}

#[tokio::test]
async fn history_depth_is_bounded_by_config() {
    let mut config = Config::default();
    config.history.max_depth = 3;
    let mut session = loaded(&config, 30, 30).await;

    for i in 0..5 {
        let y = 5.0 + i as f64 * 4.0;
        drag(&mut session, (2.0, y), (25.0, y));
    }
    assert_eq!(session.history().undo_depth(), 3);
}

#[tokio::test]
async fn preview_shows_only_the_latest_shape() {
    let config = Config::default();
    let mut wandering = loaded(&config, 120, 120).await;
    let mut direct = loaded(&config, 120, 120).await;
    wandering.select_tool("rectangle");
    direct.select_tool("rectangle");

    wandering.pointer_down(at(20.0, 20.0));
    for point in [(50.0, 50.0), (100.0, 30.0), (30.0, 100.0), (90.0, 80.0)] {
        wandering.pointer_move(at(point.0, point.1));
    }
    direct.pointer_down(at(20.0, 20.0));
    direct.pointer_move(at(90.0, 80.0));
    assert_eq!(pixels(&wandering), pixels(&direct));

    wandering.pointer_up(at(90.0, 80.0));
    direct.pointer_up(at(90.0, 80.0));
    assert_eq!(pixels(&wandering), pixels(&direct));
}

#[tokio::test]
async fn crop_replaces_surface_with_selection() {
    let mut session = loaded(&Config::default(), 300, 300).await;
    session.select_tool("crop");

    session.pointer_down(at(10.0, 10.0));
    session.pointer_move(at(60.0, 40.0));
    session.pointer_up(at(110.0, 60.0));

    let cropped = pixels(&session);
    assert_eq!(cropped.dimensions(), (100, 50));
    assert_eq!(cropped.get_pixel(0, 0), &Rgba([10, 10, 128, 255]));
    assert_eq!(cropped.get_pixel(99, 49), &Rgba([109, 59, 128, 255]));

    assert!(session.undo());
    assert_eq!(session.surface().unwrap().dimensions(), (300, 300));
    assert_eq!(pixels(&session), pattern(300, 300));
}

#[tokio::test]
async fn tiny_crop_is_abandoned() {
    let mut session = loaded(&Config::default(), 100, 100).await;
    session.select_tool("crop");

    drag(&mut session, (10.0, 10.0), (60.0, 19.0));
    assert_eq!(pixels(&session), pattern(100, 100));
}

#[tokio::test]
async fn switching_tools_mid_gesture_restores_the_preview_baseline() {
    let mut session = loaded(&Config::default(), 60, 60).await;
    session.select_tool("ellipse");

    session.pointer_down(at(10.0, 10.0));
    session.pointer_move(at(50.0, 40.0));
    assert_ne!(pixels(&session), pattern(60, 60));

    assert!(session.select_tool("line"));
    assert!(!session.is_interacting());
    assert_eq!(pixels(&session), pattern(60, 60));
    assert_eq!(session.active_tool(), Some(ToolKind::Line));

    // The interrupted gesture no longer receives input.
    session.pointer_up(at(50.0, 40.0));
    assert_eq!(pixels(&session), pattern(60, 60));
}

#[tokio::test]
async fn second_pointer_down_drops_the_unfinished_preview() {
    let mut session = loaded(&Config::default(), 60, 60).await;
    session.select_tool("rectangle");

    session.pointer_down(at(5.0, 5.0));
    session.pointer_move(at(50.0, 50.0));
    assert_ne!(pixels(&session), pattern(60, 60));

    // The up for the first gesture never arrives.
    session.pointer_down(at(10.0, 10.0));
    assert_eq!(pixels(&session), pattern(60, 60));
    session.pointer_up(at(10.0, 10.0));
    assert_eq!(pixels(&session), pattern(60, 60));

    while session.undo() {
        assert_eq!(pixels(&session), pattern(60, 60));
    }
}

#[tokio::test]
async fn unknown_tool_names_are_ignored() {
    let mut session = loaded(&Config::default(), 10, 10).await;
    assert!(!session.select_tool("lasso"));
    assert!(!session.select_tool("highlighter"));
    assert_eq!(session.active_tool(), Some(ToolKind::Freehand));
}

#[tokio::test]
async fn highlighter_registers_last_when_enabled() {
    let mut config = Config::default();
    config.tools.enable_highlighter = true;
    let mut session = EditingSession::attached(&config);

    assert_eq!(
        session.tool_names().collect::<Vec<_>>(),
        ["freehand", "rectangle", "ellipse", "arrow", "line", "text", "crop", "highlighter"]
    );
    assert!(session.select_tool("highlighter"));
}

#[tokio::test]
async fn touch_gestures_draw_like_pointer_gestures() {
    let mut session = loaded(&Config::default(), 40, 40).await;
    session.pointer_down(TouchEvent::single(5.0, 20.0));
    session.pointer_move(TouchEvent::single(35.0, 20.0));
    session.pointer_up(TouchEvent::lifted(35.0, 20.0));

    assert_ne!(pixels(&session), pattern(40, 40));
    assert_eq!(session.history().undo_depth(), 2);
}

#[tokio::test]
async fn style_setters_clamp() {
    let mut session = EditingSession::attached(&Config::default());
    session.set_brush_size(0.0);
    session.set_opacity(1.5);
    session.set_font_size(200.0);
    session.set_color(RED);

    let drawing = session.drawing();
    assert_eq!(drawing.brush_size, 1.0);
    assert_eq!(drawing.opacity, 1.0);
    assert_eq!(drawing.font_size, 72.0);
    assert_eq!(drawing.color, RED);
}

#[tokio::test]
async fn text_overlay_collects_keys_and_cancels_cleanly() {
    let mut session = loaded(&Config::default(), 50, 50).await;
    session.select_tool("text");
    session.set_font_size(20.0);

    session.pointer_down(at(12.0, 30.0));
    assert!(!session.is_interacting());
    assert_eq!(session.history().undo_depth(), 1);

    for key in [Key::Char('h'), Key::Char('i'), Key::Space, Key::Char('x')] {
        assert!(session.handle_text_key(key, Modifiers::new()));
    }
    assert!(session.handle_text_key(Key::Backspace, Modifiers::new()));
    assert!(session.handle_text_key(Key::Return, Modifiers::new()));
    assert!(!session.handle_text_key(Key::Unknown, Modifiers::new()));

    let overlay = session.text_overlay().unwrap();
    assert_eq!(overlay.buffer, "hi \n");
    assert_eq!((overlay.x, overlay.y), (12.0, 30.0));
    assert_eq!(overlay.font_size, 20.0);

    assert!(session.handle_text_key(Key::Escape, Modifiers::new()));
    assert!(session.text_overlay().is_none());
    assert!(!session.handle_text_key(Key::Char('a'), Modifiers::new()));
    assert_eq!(pixels(&session), pattern(50, 50));
    assert_eq!(session.history().undo_depth(), 1);
}

#[tokio::test]
async fn modifier_enter_commits_once() {
    let mut session = loaded(&Config::default(), 120, 60).await;
    session.set_text_renderer(bundled_renderer());
    session.select_tool("text");
    session.pointer_down(at(10.0, 10.0));
    session.insert_text("Hello");

    assert!(session.handle_text_key(Key::Return, Modifiers::ctrl()));
    assert!(session.text_overlay().is_none());
    assert!(!session.commit_text(CommitTrigger::Confirm));

    assert_ne!(pixels(&session), pattern(120, 60));
    assert_eq!(session.history().undo_depth(), 2);
}

#[tokio::test]
async fn whitespace_text_commit_changes_nothing() {
    let mut session = loaded(&Config::default(), 40, 40).await;
    session.select_tool("text");
    session.pointer_down(at(5.0, 5.0));
    session.insert_text("  \n\t ");

    assert!(!session.commit_text(CommitTrigger::Confirm));
    assert!(session.text_overlay().is_none());
    assert_eq!(session.history().undo_depth(), 1);
    assert_eq!(pixels(&session), pattern(40, 40));
}

#[tokio::test]
async fn switching_tools_closes_the_text_overlay() {
    let mut session = loaded(&Config::default(), 40, 40).await;
    session.select_tool("text");
    session.pointer_down(at(5.0, 5.0));
    session.insert_text("note");

    assert!(!session.commit_text(CommitTrigger::ClickOutside(
        crate::tools::ClickTarget::Toolbar
    )));
    assert!(session.text_overlay().is_some());

    session.select_tool("freehand");
    assert!(session.text_overlay().is_none());
}

#[tokio::test]
async fn reloading_discards_history_and_overlay() {
    let mut session = loaded(&Config::default(), 30, 30).await;
    drag(&mut session, (2.0, 2.0), (20.0, 20.0));
    session.select_tool("text");
    session.pointer_down(at(5.0, 5.0));

    session
        .load_image(ImageSource::Raster(pattern(12, 8)))
        .await
        .unwrap();
    assert!(session.text_overlay().is_none());
    assert_eq!(session.history().undo_depth(), 1);
    assert_eq!(session.surface().unwrap().dimensions(), (12, 8));
}
