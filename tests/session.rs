use std::time::Duration;

use image::{Rgba, RgbaImage};
use markshot::input::PointerEvent;
use markshot::tools::text::{committed_lines, line_top};
use markshot::util::arrowhead_points;
use markshot::{Config, EditingSession, EditorError, ImageSource, SessionEvent};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 7 % 256) as u8, (y * 3 % 256) as u8, 90, 255])
    })
}

fn drag(session: &mut EditingSession, from: (f64, f64), to: (f64, f64)) {
    session.pointer_down(PointerEvent::new(from.0, from.1));
    session.pointer_move(PointerEvent::new(
        (from.0 + to.0) / 2.0,
        (from.1 + to.1) / 2.0,
    ));
    session.pointer_move(PointerEvent::new(to.0, to.1));
    session.pointer_up(PointerEvent::new(to.0, to.1));
}

#[test]
fn arrowhead_corners_for_horizontal_shaft() {
    let mut corners = arrowhead_points(0.0, 0.0, 100.0, 0.0, 20.0, 30.0);
    corners.sort_by(|a, b| a.1.total_cmp(&b.1));

    let back = 100.0 - 20.0 * 30f64.to_radians().cos();
    assert!((corners[0].0 - back).abs() < 1e-9);
    assert!((corners[0].1 + 10.0).abs() < 1e-9);
    assert!((corners[1].0 - back).abs() < 1e-9);
    assert!((corners[1].1 - 10.0).abs() < 1e-9);
}

#[test]
fn text_lines_stack_by_font_size() {
    let tops: Vec<f64> = committed_lines("a\nb")
        .into_iter()
        .map(|(index, _)| line_top(50.0, index, 16.0))
        .collect();
    assert_eq!(tops.len(), 2);
    assert_eq!(tops[0], 50.0);
    assert!((tops[1] - 69.2).abs() < 1e-9);
    assert!(committed_lines("   \n  ").is_empty());
}

#[tokio::test]
async fn host_attaches_from_another_task() {
    let (mut session, signal) = EditingSession::new(&Config::default());
    let mut events = session.subscribe();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(5)).await;
        signal.attach();
    });

    session
        .load_image(ImageSource::Raster(gradient(32, 16)))
        .await
        .unwrap();
    assert_eq!(
        events.recv().await,
        Some(SessionEvent::Opened {
            width: 32,
            height: 16
        })
    );
}

#[tokio::test]
async fn unattached_session_rejects_loads() {
    let mut config = Config::default();
    config.session.attach_timeout_ms = 100;
    let (mut session, _signal) = EditingSession::new(&config);

    let result = session
        .load_image(ImageSource::Raster(gradient(4, 4)))
        .await;
    assert!(matches!(result, Err(EditorError::NotReady(_))));
}

#[tokio::test]
async fn every_tool_undoes_back_to_the_loaded_image() {
    let mut config = Config::default();
    config.tools.enable_highlighter = true;
    let mut session = EditingSession::attached(&config);
    session
        .load_image(ImageSource::Raster(gradient(200, 200)))
        .await
        .unwrap();

    let mut gestures = 0;
    for (i, tool) in ["freehand", "highlighter", "rectangle", "ellipse", "line", "arrow"]
        .into_iter()
        .enumerate()
    {
        assert!(session.select_tool(tool));
        let offset = 10.0 + i as f64 * 30.0;
        drag(&mut session, (offset, 10.0), (offset + 25.0, 180.0));
        gestures += 1;
    }
    assert_ne!(session.surface().unwrap().pixels(), &gradient(200, 200));

    for _ in 0..gestures {
        assert!(session.undo());
    }
    assert_eq!(session.surface().unwrap().pixels(), &gradient(200, 200));
}

#[tokio::test]
async fn crop_then_export_reloads_identically() {
    let mut session = EditingSession::attached(&Config::default());
    session
        .load_image(ImageSource::Raster(gradient(300, 300)))
        .await
        .unwrap();

    session.select_tool("crop");
    drag(&mut session, (10.0, 10.0), (110.0, 60.0));
    let cropped = session.surface().unwrap().pixels().clone();
    assert_eq!(cropped.dimensions(), (100, 50));
    assert_eq!(cropped.get_pixel(5, 5), gradient(300, 300).get_pixel(15, 15));

    let exported = session.export_image().await.unwrap();
    let mut reopened = EditingSession::attached(&Config::default());
    reopened
        .load_image(ImageSource::DataUri(exported.encoded_text))
        .await
        .unwrap();
    assert_eq!(reopened.surface().unwrap().pixels(), &cropped);

    assert!(session.undo());
    assert_eq!(session.surface().unwrap().dimensions(), (300, 300));
}

#[tokio::test]
async fn crop_under_minimum_changes_nothing() {
    let mut session = EditingSession::attached(&Config::default());
    session
        .load_image(ImageSource::Raster(gradient(120, 120)))
        .await
        .unwrap();

    session.select_tool("crop");
    drag(&mut session, (10.0, 10.0), (19.0, 100.0));
    assert_eq!(session.surface().unwrap().pixels(), &gradient(120, 120));
}
