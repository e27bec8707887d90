use std::sync::Arc;

use async_trait::async_trait;

use crate::capture::types::{CaptureError, SelectionOutcome};
use crate::util::Rect;

/// Interactive region picker, typically an overlay with a drag rectangle.
#[async_trait]
pub trait RegionSelector: Send + Sync {
    async fn select(&self) -> SelectionOutcome;
}

/// Renders the selected region of the page as PNG bytes.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    async fn capture(&self, selection: Rect) -> Result<Vec<u8>, CaptureError>;
}

/// Bundle of collaborators used by the capture pipeline. Each can be mocked in tests.
#[derive(Clone)]
pub struct CaptureDependencies {
    pub selector: Arc<dyn RegionSelector>,
    pub rasterizer: Arc<dyn PageRasterizer>,
}
