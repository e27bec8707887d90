//! Replayable annotation scripts.
//!
//! A script is a TOML file listing `[[step]]` tables, each naming an `action`.
//! Steps drive an [`EditingSession`] through the same calls a host would make,
//! which makes scripts handy for headless rendering and for tests.
//!
//! ```toml
//! [[step]]
//! action = "style"
//! color = "red"
//! brush_size = 4.0
//!
//! [[step]]
//! action = "select"
//! tool = "arrow"
//!
//! [[step]]
//! action = "stroke"
//! points = [[10.0, 10.0], [120.0, 60.0]]
//!
//! [[step]]
//! action = "text"
//! at = [20.0, 90.0]
//! content = "Look here"
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;

use crate::config::ColorSpec;
use crate::input::PointerEvent;
use crate::session::EditingSession;
use crate::tools::{CommitTrigger, ToolKind};

/// One scripted action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum Step {
    /// Activate a tool by name
    Select { tool: String },
    /// Change any of the style settings
    Style {
        #[serde(default)]
        color: Option<ColorSpec>,
        #[serde(default)]
        brush_size: Option<f64>,
        #[serde(default)]
        opacity: Option<f64>,
        #[serde(default)]
        font_size: Option<f64>,
    },
    /// Press at the first point, move through the rest, release at the last
    Stroke { points: Vec<[f64; 2]> },
    /// Place and commit text with the text tool, then return to the previous tool
    Text { at: [f64; 2], content: String },
    Undo,
    Redo,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        toml::from_str(source).context("Failed to parse annotation script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script from {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("In script {}", path.display()))
    }

    /// Runs every step against `session` in order.
    ///
    /// # Errors
    /// Fails on the first step naming an unregistered tool or a stroke with no points.
    pub fn apply(&self, session: &mut EditingSession) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            debug!("Script step {}: {:?}", index + 1, step);
            apply_step(step, session).with_context(|| format!("Script step {}", index + 1))?;
        }
        Ok(())
    }
}

fn apply_step(step: &Step, session: &mut EditingSession) -> Result<()> {
    match step {
        Step::Select { tool } => {
            if !session.select_tool(tool) {
                bail!("unknown or disabled tool '{}'", tool);
            }
        }
        Step::Style {
            color,
            brush_size,
            opacity,
            font_size,
        } => {
            if let Some(color) = color {
                session.set_color(color.to_color());
            }
            if let Some(size) = brush_size {
                session.set_brush_size(*size);
            }
            if let Some(opacity) = opacity {
                session.set_opacity(*opacity);
            }
            if let Some(size) = font_size {
                session.set_font_size(*size);
            }
        }
        Step::Stroke { points } => {
            let Some((first, rest)) = points.split_first() else {
                bail!("stroke needs at least one point");
            };
            let last = rest.last().unwrap_or(first);
            session.pointer_down(PointerEvent::new(first[0], first[1]));
            for point in rest {
                session.pointer_move(PointerEvent::new(point[0], point[1]));
            }
            session.pointer_up(PointerEvent::new(last[0], last[1]));
        }
        Step::Text { at, content } => {
            let previous = session.active_tool();
            session.select_tool(ToolKind::Text.name());
            session.pointer_down(PointerEvent::new(at[0], at[1]));
            session.insert_text(content);
            session.commit_text(CommitTrigger::Confirm);
            if let Some(previous) = previous {
                session.select_tool(previous.name());
            }
        }
        Step::Undo => {
            session.undo();
        }
        Step::Redo => {
            session.redo();
        }
    }
    Ok(())
}
