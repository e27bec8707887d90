use std::time::Duration;

use log::{debug, info};
use tokio::sync::mpsc;
use tokio::task;

use super::events::{EventHub, ExportResult, ImageSource, SessionEvent};
use super::export;
use super::readiness::{ReadySignal, Readiness};
use crate::config::Config;
use crate::draw::{Color, Snapshot, Surface, TextRenderer};
use crate::error::EditorError;
use crate::history::HistoryManager;
use crate::input::{
    BRUSH_SIZE_RANGE, DrawingContext, FONT_SIZE_RANGE, InputEvent, Key, Modifiers, Viewport,
};
use crate::tools::{
    CommitTrigger, GestureCx, TextOverlay, TextTool, Tool, ToolKind, ToolRegistry, ToolSettings,
};

/// A pointer gesture between down and up.
#[derive(Debug)]
struct Interaction {
    tool: ToolKind,
    /// Surface as it was at pointer-down, kept only for preview tools
    baseline: Option<Snapshot>,
}

/// One image being annotated.
///
/// The session owns the surface, the undo history and every registered tool,
/// and routes host input to whichever tool is active. It is driven through
/// `&mut self` from a single task; only loading and exporting suspend.
#[derive(Debug)]
pub struct EditingSession {
    surface: Option<Surface>,
    drawing: DrawingContext,
    history: HistoryManager,
    registry: ToolRegistry,
    active: Option<ToolKind>,
    interaction: Option<Interaction>,
    viewport: Viewport,
    text: TextRenderer,
    settings: ToolSettings,
    readiness: Readiness,
    attach_timeout: Duration,
    events: EventHub,
}

impl EditingSession {
    /// Creates a session that waits for the host to attach before loading.
    pub fn new(config: &Config) -> (Self, ReadySignal) {
        let (readiness, signal) = Readiness::pending();
        (Self::build(config, readiness), signal)
    }

    /// Creates a session with nothing to wait for, as used by headless hosts.
    pub fn attached(config: &Config) -> Self {
        Self::build(config, Readiness::ready())
    }

    fn build(config: &Config, readiness: Readiness) -> Self {
        let registry = ToolRegistry::new(config.tools.enable_highlighter);
        debug!(
            "Registered tools: {}",
            registry.names().collect::<Vec<_>>().join(", ")
        );
        Self {
            surface: None,
            drawing: config.drawing_context(),
            history: HistoryManager::new(config.history.max_depth),
            registry,
            active: Some(ToolKind::Freehand),
            interaction: None,
            viewport: Viewport::default(),
            text: config.text_renderer(),
            settings: config.tool_settings(),
            readiness,
            attach_timeout: config.attach_timeout(),
            events: EventHub::default(),
        }
    }

    /// Replaces the font used for committed text.
    pub fn set_text_renderer(&mut self, text: TextRenderer) {
        self.text = text;
    }

    /// Receives every event emitted after this call.
    pub fn subscribe(&mut self) -> mpsc::UnboundedReceiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn drawing(&self) -> &DrawingContext {
        &self.drawing
    }

    pub fn active_tool(&self) -> Option<ToolKind> {
        self.active
    }

    /// Registered tools in toolbar order.
    pub fn tools(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.registry.kinds()
    }

    pub fn tool_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.registry.names()
    }

    pub fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    /// Where the host currently displays the surface.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    // ---------------------------------------------------------------------
    // Loading and exporting
    // ---------------------------------------------------------------------

    /// Loads an image as the new surface and resets history to it.
    ///
    /// Waits for the host to attach first. Any gesture in flight and any open
    /// text overlay are discarded.
    pub async fn load_image(&mut self, source: ImageSource) -> Result<(), EditorError> {
        self.readiness.wait(self.attach_timeout).await?;

        let pixels = task::spawn_blocking(move || export::decode_source(source))
            .await
            .map_err(|e| EditorError::Decode(format!("Decode task failed: {e}")))??;

        self.abort_gesture();
        if let Some(text) = self.registry.text_mut()
            && text.cancel()
        {
            debug!("Discarded open text overlay on image load");
        }

        let (width, height) = pixels.dimensions();
        let surface = self.surface.insert(Surface::from_image(pixels));
        self.history.clear();
        self.history.snapshot(surface);

        info!("Loaded {}x{} image", width, height);
        self.events.emit(SessionEvent::Opened { width, height });
        Ok(())
    }

    /// Encodes the surface as PNG.
    pub async fn export_image(&mut self) -> Result<ExportResult, EditorError> {
        let Some(surface) = self.surface.as_ref() else {
            return Err(EditorError::Encode("no image loaded".to_string()));
        };
        let pixels = surface.pixels().clone();

        let result = task::spawn_blocking(move || export::encode_export(&pixels))
            .await
            .map_err(|e| EditorError::Encode(format!("Encode task failed: {e}")))??;

        info!("Exported {} bytes of PNG", result.blob.len());
        self.events.emit(SessionEvent::OutputProduced(result.clone()));
        Ok(result)
    }

    /// Drops the surface and all editing state.
    pub fn close(&mut self) {
        if let Some(text) = self.registry.text_mut() {
            text.cancel();
        }
        self.abort_gesture();
        self.surface = None;
        self.history.clear();
        info!("Editing session closed");
        self.events.emit(SessionEvent::Closed);
    }

    // ---------------------------------------------------------------------
    // Pointer routing
    // ---------------------------------------------------------------------

    pub fn pointer_down(&mut self, event: impl Into<InputEvent>) {
        let event = event.into();
        let Some(kind) = self.active else {
            return;
        };
        // A gesture whose up never arrived must not leave its preview behind.
        self.abort_gesture();
        let Some(surface) = self.surface.as_ref() else {
            debug!("Ignoring pointer-down with no image loaded");
            return;
        };

        // Text edits happen in the overlay; only its commit touches history.
        if kind != ToolKind::Text {
            self.history.snapshot(surface);
            let baseline = kind.is_preview().then(|| surface.snapshot());
            self.interaction = Some(Interaction {
                tool: kind,
                baseline,
            });
        }
        self.with_tool(kind, |tool, cx| tool.on_pointer_down(&event, cx));
    }

    pub fn pointer_move(&mut self, event: impl Into<InputEvent>) {
        let Some(interaction) = self.interaction.as_ref() else {
            return;
        };
        let kind = interaction.tool;
        if let (Some(baseline), Some(surface)) =
            (interaction.baseline.as_ref(), self.surface.as_mut())
        {
            surface.restore(baseline);
        }
        let event = event.into();
        self.with_tool(kind, |tool, cx| tool.on_pointer_move(&event, cx));
    }

    pub fn pointer_up(&mut self, event: impl Into<InputEvent>) {
        let Some(interaction) = self.interaction.take() else {
            return;
        };
        if let (Some(baseline), Some(surface)) = (interaction.baseline, self.surface.as_mut()) {
            surface.restore(&baseline);
        }
        let event = event.into();
        self.with_tool(interaction.tool, |tool, cx| tool.on_pointer_up(&event, cx));
    }

    /// Ends an in-progress gesture without committing it.
    ///
    /// Preview tools put the surface back to its pointer-down state. The undo
    /// step pushed at pointer-down stays.
    fn abort_gesture(&mut self) {
        let Some(interaction) = self.interaction.take() else {
            return;
        };
        if let (Some(baseline), Some(surface)) = (interaction.baseline, self.surface.as_mut()) {
            surface.restore(&baseline);
        }
        if let Some(tool) = self.registry.get_mut(interaction.tool) {
            tool.reset();
        }
        debug!("Interrupted {} gesture", interaction.tool.name());
    }

    fn with_tool<R>(
        &mut self,
        kind: ToolKind,
        f: impl FnOnce(&mut Tool, &mut GestureCx<'_>) -> R,
    ) -> Option<R> {
        let tool = self.registry.get_mut(kind)?;
        let mut cx = GestureCx {
            surface: self.surface.as_mut(),
            drawing: &mut self.drawing,
            history: &mut self.history,
            viewport: self.viewport,
            text: &self.text,
            settings: self.settings,
        };
        Some(f(tool, &mut cx))
    }

    // ---------------------------------------------------------------------
    // Tools and history
    // ---------------------------------------------------------------------

    /// Activates a registered tool by name. Unknown names are ignored.
    ///
    /// Switching commits an open text overlay and interrupts any gesture.
    pub fn select_tool(&mut self, name: &str) -> bool {
        let Some(kind) = self.registry.lookup(name) else {
            debug!("Ignoring unknown tool '{}'", name);
            return false;
        };
        self.commit_text(CommitTrigger::FocusLost);
        self.abort_gesture();
        self.active = Some(kind);
        debug!("Selected tool {}", name);
        true
    }

    pub fn undo(&mut self) -> bool {
        self.abort_gesture();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let undone = self.history.undo(surface);
        debug!("Undo: {}", if undone { "applied" } else { "nothing to undo" });
        undone
    }

    pub fn redo(&mut self) -> bool {
        self.abort_gesture();
        let Some(surface) = self.surface.as_mut() else {
            return false;
        };
        let redone = self.history.redo(surface);
        debug!("Redo: {}", if redone { "applied" } else { "nothing to redo" });
        redone
    }

    // ---------------------------------------------------------------------
    // Style
    // ---------------------------------------------------------------------

    pub fn set_color(&mut self, color: Color) {
        self.drawing.color = color;
    }

    /// Sets the stroke width, clamped to 1-20 px.
    pub fn set_brush_size(&mut self, size: f64) {
        self.drawing.brush_size = size.clamp(BRUSH_SIZE_RANGE.0, BRUSH_SIZE_RANGE.1);
    }

    /// Sets stroke opacity, clamped to 0-1.
    pub fn set_opacity(&mut self, opacity: f64) {
        self.drawing.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Sets the size of text opened from now on, clamped to 8-72 px.
    pub fn set_font_size(&mut self, size: f64) {
        self.drawing.font_size = size.clamp(FONT_SIZE_RANGE.0, FONT_SIZE_RANGE.1);
    }

    // ---------------------------------------------------------------------
    // Text overlay
    // ---------------------------------------------------------------------

    pub fn text_overlay(&self) -> Option<&TextOverlay> {
        self.registry.text().and_then(TextTool::overlay)
    }

    pub fn text_overlay_mut(&mut self) -> Option<&mut TextOverlay> {
        self.registry.text_mut().and_then(TextTool::overlay_mut)
    }

    /// Appends typed text to the open overlay.
    pub fn insert_text(&mut self, text: &str) -> bool {
        match self.text_overlay_mut() {
            Some(overlay) => {
                overlay.buffer.push_str(text);
                true
            }
            None => false,
        }
    }

    /// Feeds a key press to the open overlay. Returns false if none is open or
    /// the key is not handled.
    ///
    /// Ctrl/Cmd+Enter commits, Escape cancels, Tab moves focus away (commit),
    /// plain Enter inserts a newline.
    pub fn handle_text_key(&mut self, key: Key, modifiers: Modifiers) -> bool {
        if self.text_overlay().is_none() {
            return false;
        }
        match key {
            Key::Return if modifiers.confirms_enter() => {
                self.commit_text(CommitTrigger::ModifierEnter);
            }
            Key::Tab => {
                self.commit_text(CommitTrigger::FocusLost);
            }
            Key::Escape => {
                self.cancel_text();
            }
            Key::Return => {
                self.insert_text("\n");
            }
            Key::Space => {
                self.insert_text(" ");
            }
            Key::Char(c) => {
                self.insert_text(c.encode_utf8(&mut [0; 4]));
            }
            Key::Backspace => {
                if let Some(overlay) = self.text_overlay_mut() {
                    overlay.buffer.pop();
                }
            }
            Key::Unknown => return false,
        }
        true
    }

    /// Commits the open overlay onto the surface. Returns true if text was drawn.
    pub fn commit_text(&mut self, trigger: CommitTrigger) -> bool {
        self.with_tool(ToolKind::Text, |tool, cx| match tool {
            Tool::Text(text) => text.commit(trigger, cx),
            _ => false,
        })
        .unwrap_or(false)
    }

    /// Closes the open overlay without drawing.
    pub fn cancel_text(&mut self) -> bool {
        self.registry.text_mut().is_some_and(TextTool::cancel)
    }
}
