mod indicator;
mod page;
mod popup;
mod status_bar;

pub use indicator::{blend, rasterize, signed_distance, IndicatorWidget, Layer, Viewport};
pub use page::PageWidget;
pub use popup::PopupWidget;
pub use status_bar::StatusBarWidget;
