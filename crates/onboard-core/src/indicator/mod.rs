//! Animated page-position indicator
//!
//! A row of small shapes under an onboarding carousel, one per page. The
//! indicator follows the pager continuously while the user drags and plays
//! a short settle animation when a page is selected.
//!
//! # Layers
//!
//! ## Atoms
//! - `easing` - Easing curves on normalized time
//! - `timing` - Progress and interpolation helpers
//! - `state` - Position and animated parameters
//! - `geometry` - Intrinsic size of the row
//!
//! ## Molecules
//! - `tracker` - Maps pager events onto the position state
//! - `engine` - Per-style settle animations with cancellation tokens
//! - `throttle` - Redraw coalescing to one frame budget
//! - `render` - Pure state to draw command projection
//!
//! ## Organism
//! - `controller` - [`PageIndicator`], the lifecycle a host drives

// Atoms
pub mod easing;
pub mod geometry;
pub mod state;
pub mod timing;

// Molecules
pub mod engine;
pub mod render;
pub mod throttle;
pub mod tracker;

// Organism
pub mod controller;

pub use controller::{PageIndicator, PagerEvent};
pub use engine::{AnimationToken, TickOutcome};
pub use geometry::Geometry;
pub use render::{DrawCommand, Glow, Point, Rect, Rotation, ShapeGeometry, Size, Stroke};
pub use state::{AnimatedParams, IndicatorState};
pub use throttle::FRAME_BUDGET;
