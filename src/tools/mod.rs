//! Drawing tools and the per-gesture context they draw through.
//!
//! Tools form a closed set dispatched by `match` on [`Tool`]. Every tool sees
//! the same three phases (down, move, up) for both mouse and touch input and
//! gets a fresh [`GestureCx`] on each call. The context lends the surface,
//! the drawing parameters and the history manager for the duration of the call
//! only; no tool keeps a handle to any of them.

pub mod crop;
pub mod freehand;
pub mod icons;
pub mod shape;
pub mod text;


pub use crop::CropTool;
pub use freehand::FreehandTool;
pub use shape::{ShapeKind, ShapeTool};
pub use text::{ClickTarget, CommitTrigger, TextOverlay, TextTool};

use log::warn;

use crate::draw::{Surface, TextRenderer};
use crate::error::EditorError;
use crate::history::HistoryManager;
use crate::input::{DrawingContext, InputEvent, Viewport};

/// Identifier of a drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Freehand,
    Highlighter,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Crop,
    Text,
}

impl ToolKind {
    /// Toolbar order of the always-registered tools.
    pub const DEFAULT_ORDER: [ToolKind; 7] = [
        ToolKind::Freehand,
        ToolKind::Rectangle,
        ToolKind::Ellipse,
        ToolKind::Arrow,
        ToolKind::Line,
        ToolKind::Text,
        ToolKind::Crop,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Freehand => "freehand",
            ToolKind::Highlighter => "highlighter",
            ToolKind::Rectangle => "rectangle",
            ToolKind::Ellipse => "ellipse",
            ToolKind::Line => "line",
            ToolKind::Arrow => "arrow",
            ToolKind::Crop => "crop",
            ToolKind::Text => "text",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "freehand" => Some(ToolKind::Freehand),
            "highlighter" => Some(ToolKind::Highlighter),
            "rectangle" => Some(ToolKind::Rectangle),
            "ellipse" => Some(ToolKind::Ellipse),
            "line" => Some(ToolKind::Line),
            "arrow" => Some(ToolKind::Arrow),
            "crop" => Some(ToolKind::Crop),
            "text" => Some(ToolKind::Text),
            _ => None,
        }
    }

    /// SVG glyph for the toolbar button.
    pub fn icon(self) -> &'static str {
        match self {
            ToolKind::Freehand => icons::FREEHAND,
            ToolKind::Highlighter => icons::HIGHLIGHTER,
            ToolKind::Rectangle => icons::RECTANGLE,
            ToolKind::Ellipse => icons::ELLIPSE,
            ToolKind::Line => icons::LINE,
            ToolKind::Arrow => icons::ARROW,
            ToolKind::Crop => icons::CROP,
            ToolKind::Text => icons::TEXT,
        }
    }

    /// Preview tools redraw over a clean baseline on every move instead of
    /// accumulating onto the surface.
    pub fn is_preview(self) -> bool {
        matches!(
            self,
            ToolKind::Rectangle
                | ToolKind::Ellipse
                | ToolKind::Line
                | ToolKind::Arrow
                | ToolKind::Crop
        )
    }
}

/// Geometry settings that tools read but never change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolSettings {
    /// Arrowhead length in pixels
    pub arrow_head_length: f64,
    /// Arrowhead splay either side of the shaft, in degrees
    pub arrow_head_angle: f64,
    /// Crops narrower or shorter than this are abandoned
    pub crop_min_size: f64,
}

impl Default for ToolSettings {
    fn default() -> Self {
        Self {
            arrow_head_length: 20.0,
            arrow_head_angle: 30.0,
            crop_min_size: 10.0,
        }
    }
}

/// Everything a tool may touch during one event.
pub struct GestureCx<'a> {
    /// Live surface, absent before an image is loaded
    pub surface: Option<&'a mut Surface>,
    pub drawing: &'a mut DrawingContext,
    /// Borrowed so text commits can snapshot before rasterizing
    pub history: &'a mut HistoryManager,
    pub viewport: Viewport,
    pub text: &'a TextRenderer,
    pub settings: ToolSettings,
}

impl GestureCx<'_> {
    /// Maps the event onto surface pixels.
    ///
    /// Returns `None` when there is no surface (logged) or the event carries no
    /// position.
    pub fn locate(&self, event: &InputEvent, tool: &'static str) -> Option<(f64, f64)> {
        let Some(surface) = self.surface.as_deref() else {
            warn!("{}", EditorError::SurfaceUnavailable(tool));
            return None;
        };
        let client = event.client_position()?;
        Some(self.viewport.to_surface(client, surface.dimensions()))
    }

    /// The live surface, logging when it is missing.
    pub fn surface_for(&mut self, tool: &'static str) -> Option<&mut Surface> {
        let surface = self.surface.as_deref_mut();
        if surface.is_none() {
            warn!("{}", EditorError::SurfaceUnavailable(tool));
        }
        surface
    }
}

/// A drawing tool together with its gesture-scoped state.
#[derive(Debug)]
pub enum Tool {
    Freehand(FreehandTool),
    Shape(ShapeTool),
    Crop(CropTool),
    Text(TextTool),
}

impl Tool {
    pub fn for_kind(kind: ToolKind) -> Self {
        match kind {
            ToolKind::Freehand => Tool::Freehand(FreehandTool::pen()),
            ToolKind::Highlighter => Tool::Freehand(FreehandTool::highlighter()),
            ToolKind::Rectangle => Tool::Shape(ShapeTool::new(ShapeKind::Rectangle)),
            ToolKind::Ellipse => Tool::Shape(ShapeTool::new(ShapeKind::Ellipse)),
            ToolKind::Line => Tool::Shape(ShapeTool::new(ShapeKind::Line)),
            ToolKind::Arrow => Tool::Shape(ShapeTool::new(ShapeKind::Arrow)),
            ToolKind::Crop => Tool::Crop(CropTool::default()),
            ToolKind::Text => Tool::Text(TextTool::default()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Tool::Freehand(tool) => tool.kind(),
            Tool::Shape(tool) => tool.shape().kind(),
            Tool::Crop(_) => ToolKind::Crop,
            Tool::Text(_) => ToolKind::Text,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn icon(&self) -> &'static str {
        self.kind().icon()
    }

    pub fn on_pointer_down(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        match self {
            Tool::Freehand(tool) => tool.on_pointer_down(event, cx),
            Tool::Shape(tool) => tool.on_pointer_down(event, cx),
            Tool::Crop(tool) => tool.on_pointer_down(event, cx),
            Tool::Text(tool) => tool.on_pointer_down(event, cx),
        }
    }

    pub fn on_pointer_move(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        match self {
            Tool::Freehand(tool) => tool.on_pointer_move(event, cx),
            Tool::Shape(tool) => tool.on_pointer_move(event, cx),
            Tool::Crop(tool) => tool.on_pointer_move(event, cx),
            // Text is edited out of band.
            Tool::Text(_) => {}
        }
    }

    pub fn on_pointer_up(&mut self, event: &InputEvent, cx: &mut GestureCx<'_>) {
        match self {
            Tool::Freehand(tool) => tool.on_pointer_up(),
            Tool::Shape(tool) => tool.on_pointer_up(event, cx),
            Tool::Crop(tool) => tool.on_pointer_up(event, cx),
            Tool::Text(_) => {}
        }
    }

    /// Drops gesture-scoped state after an interrupted gesture.
    ///
    /// An open text overlay is left alone; it has its own commit and cancel paths.
    pub fn reset(&mut self) {
        match self {
            Tool::Freehand(tool) => tool.reset(),
            Tool::Shape(tool) => tool.reset(),
            Tool::Crop(tool) => tool.reset(),
            Tool::Text(_) => {}
        }
    }
}

/// Registered tools in toolbar order.
#[derive(Debug)]
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Registers the default tools, plus the highlighter at the end when enabled.
    pub fn new(enable_highlighter: bool) -> Self {
        let mut tools: Vec<Tool> = ToolKind::DEFAULT_ORDER
            .iter()
            .map(|&kind| Tool::for_kind(kind))
            .collect();
        if enable_highlighter {
            tools.push(Tool::for_kind(ToolKind::Highlighter));
        }
        Self { tools }
    }

    /// Looks up a registered tool by name.
    pub fn lookup(&self, name: &str) -> Option<ToolKind> {
        let kind = ToolKind::from_name(name)?;
        self.contains(kind).then_some(kind)
    }

    pub fn contains(&self, kind: ToolKind) -> bool {
        self.tools.iter().any(|tool| tool.kind() == kind)
    }

    pub fn get_mut(&mut self, kind: ToolKind) -> Option<&mut Tool> {
        self.tools.iter_mut().find(|tool| tool.kind() == kind)
    }

    pub fn text_mut(&mut self) -> Option<&mut TextTool> {
        self.tools.iter_mut().find_map(|tool| match tool {
            Tool::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn text(&self) -> Option<&TextTool> {
        self.tools.iter().find_map(|tool| match tool {
            Tool::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn kinds(&self) -> impl Iterator<Item = ToolKind> + '_ {
        self.tools.iter().map(Tool::kind)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.tools.iter().map(Tool::name)
    }
}
