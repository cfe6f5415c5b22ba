use smallvec::SmallVec;

use crate::core::LogicalSize;
use crate::error::{ChartError, ChartResult};
use crate::render::{EraseDiskPrimitive, TextPrimitive, WedgePrimitive};

/// Backend-agnostic scene for one full repaint.
///
/// Coordinates are logical pixels; backends apply `pixel_ratio` as a scale
/// transform before clearing `viewport` and drawing. Wedges are painted in
/// order, then `cutout` is erased once, then texts are drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: LogicalSize,
    pub pixel_ratio: f64,
    pub wedges: SmallVec<[WedgePrimitive; 8]>,
    pub cutout: Option<EraseDiskPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: LogicalSize, pixel_ratio: f64) -> Self {
        Self {
            viewport,
            pixel_ratio,
            wedges: SmallVec::new(),
            cutout: None,
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_wedge(mut self, wedge: WedgePrimitive) -> Self {
        self.wedges.push(wedge);
        self
    }

    #[must_use]
    pub fn with_cutout(mut self, cutout: EraseDiskPrimitive) -> Self {
        self.cutout = Some(cutout);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.texts.push(text);
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if !self.pixel_ratio.is_finite() || self.pixel_ratio < 1.0 {
            return Err(ChartError::InvalidData(
                "pixel ratio must be finite and >= 1".to_owned(),
            ));
        }

        for wedge in &self.wedges {
            wedge.validate()?;
        }
        if let Some(cutout) = self.cutout {
            cutout.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wedges.is_empty() && self.cutout.is_none() && self.texts.is_empty()
    }
}
