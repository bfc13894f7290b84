pub mod color;
pub mod config;
pub mod error;
pub mod indicator;
pub mod presets;

pub use color::Color;
pub use config::{
    AnimationStyle, AppConfig, IndicatorConfig, IndicatorPlacement, IndicatorShape, PageContent,
    PreviewConfig,
};
pub use error::{Error, Result};
pub use indicator::{DrawCommand, Geometry, PageIndicator, PagerEvent, ShapeGeometry, Size};
