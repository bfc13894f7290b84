//! Indicator row measurement
//!
//! Pure functions from page count and configuration to the extent the host
//! has to reserve for the indicator row.

use serde::Serialize;

use crate::config::{AnimationStyle, IndicatorConfig};

/// Width of a fully expanded indicator relative to its size
pub const EXPANDED_WIDTH_FACTOR: f32 = 2.5;

/// Measured size of the indicator row
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Geometry {
    /// Horizontal extent of the whole row
    pub total_extent: f32,
    /// Distance from one indicator's start to the next, before expansion
    pub per_step: f32,
    /// Height of the row
    pub rendered_height: f32,
}

impl Geometry {
    /// Nothing to draw
    pub const EMPTY: Geometry = Geometry {
        total_extent: 0.0,
        per_step: 0.0,
        rendered_height: 0.0,
    };
}

/// Measure a row of `page_count` indicators drawn with `style`
pub fn measure(page_count: usize, config: &IndicatorConfig, style: AnimationStyle) -> Geometry {
    if page_count == 0 {
        return Geometry::EMPTY;
    }

    let size = config.size;
    let spacing = config.spacing;
    let per_step = size + spacing;
    let gaps = (page_count - 1) as f32;

    let total_extent = if style.expands_width() {
        gaps * per_step + EXPANDED_WIDTH_FACTOR * size
    } else {
        page_count as f32 * size + gaps * spacing
    };

    Geometry {
        total_extent,
        per_step,
        rendered_height: config.rendered_height(),
    }
}
