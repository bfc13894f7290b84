//! Frame rendering
//!
//! Turns indicator state and configuration into an ordered list of draw
//! commands. Nothing here keeps state; the same inputs always yield the same
//! commands, so hosts can redraw as often as they like and tests need no
//! drawing surface.

use serde::Serialize;

use crate::color::Color;
use crate::config::{AnimationStyle, IndicatorConfig, IndicatorShape};

use super::geometry::{Geometry, EXPANDED_WIDTH_FACTOR};
use super::state::IndicatorState;
use super::timing::lerp;

/// Opacity of inactive indicators in the `Fade` style
pub const FADE_DIM_ALPHA: f32 = 0.3;
/// Opacity of indicators more than one page away from the active one
pub const FAR_ALPHA: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Space available to the indicator row
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn from_center(center: Point, width: f32, height: f32) -> Self {
        Self {
            left: center.x - width / 2.0,
            top: center.y - height / 2.0,
            right: center.x + width / 2.0,
            bottom: center.y + height / 2.0,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new((self.left + self.right) / 2.0, (self.top + self.bottom) / 2.0)
    }
}

/// Outline of one indicator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeGeometry {
    Circle { center: Point, radius: f32 },
    RoundRect { rect: Rect, corner_radius: f32 },
    Rect { rect: Rect },
    /// Top, right, bottom, left
    Polygon { points: [Point; 4] },
}

impl ShapeGeometry {
    /// Bounding box of the shape
    pub fn bounds(&self) -> Rect {
        match self {
            ShapeGeometry::Circle { center, radius } => {
                Rect::from_center(*center, radius * 2.0, radius * 2.0)
            }
            ShapeGeometry::RoundRect { rect, .. } | ShapeGeometry::Rect { rect } => *rect,
            ShapeGeometry::Polygon { points } => Rect {
                left: points[3].x,
                top: points[0].y,
                right: points[1].x,
                bottom: points[2].y,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Glow {
    pub color: Color,
    pub radius: f32,
}

/// Rotation applied about `pivot` before the shape is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rotation {
    pub degrees: f32,
    pub pivot: Point,
}

/// Everything needed to draw one indicator
///
/// Hosts draw the glow first, then the fill, then the stroke, all under the
/// rotation if present.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawCommand {
    pub index: usize,
    pub shape: ShapeGeometry,
    pub fill: Color,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<Rotation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glow: Option<Glow>,
}

/// Whether anything is drawn at all
#[inline]
pub fn is_drawable(state: &IndicatorState, config: &IndicatorConfig) -> bool {
    config.is_visible && state.page_count > 1
}

/// Size of indicator `index` before the animated scale
///
/// With progressive sizing the active page gets `max_size`, its neighbours
/// the average of `max_size` and `min_size`, everything further `min_size`.
pub fn base_size(state: &IndicatorState, config: &IndicatorConfig, index: usize) -> f32 {
    if !config.progressive_sizing {
        return config.size;
    }
    match index.abs_diff(state.current_page) {
        0 => config.max_size,
        1 => (config.max_size + config.min_size) / 2.0,
        _ => config.min_size,
    }
}

/// Size of indicator `index`, including the animated scale for scaling styles
pub fn indicator_size(state: &IndicatorState, config: &IndicatorConfig, index: usize) -> f32 {
    let size = base_size(state, config, index);
    if index == state.current_page && config.animation_style.drives_scale() {
        size * state.animated.scale
    } else {
        size
    }
}

/// How far indicator `index` is expanded, 0 (plain) to 1 (full width)
///
/// The page the gesture is heading toward holds `1 - p/2` and the other page
/// of the dragged pair holds `p/2`, so the two always add up to one full
/// expansion and cross over exactly halfway.
pub fn expansion(state: &IndicatorState, index: usize) -> f32 {
    let p = state.gesture_progress.clamp(0.0, 1.0);
    let leading = state.target_page;
    if index == leading {
        return 1.0 - p / 2.0;
    }
    if state.is_gesture_active && state.gesture_partner(leading) == Some(index) {
        return p / 2.0;
    }
    0.0
}

/// Rendered width of indicator `index`
pub fn indicator_width(state: &IndicatorState, config: &IndicatorConfig, index: usize) -> f32 {
    let size = indicator_size(state, config, index);
    if config.animation_style.expands_width() {
        size * lerp(1.0, EXPANDED_WIDTH_FACTOR, expansion(state, index))
    } else {
        size
    }
}

/// Opacity factor of indicator `index`
pub fn indicator_alpha(state: &IndicatorState, config: &IndicatorConfig, index: usize) -> f32 {
    let is_active = index == state.current_page;
    match config.animation_style {
        AnimationStyle::Fade => {
            if is_active {
                state.animated.alpha
            } else {
                FADE_DIM_ALPHA
            }
        }
        _ => {
            if index.abs_diff(state.current_page) <= 1 {
                1.0
            } else {
                FAR_ALPHA
            }
        }
    }
}

/// Fill color of indicator `index`, before the opacity factor
///
/// Width-expanding styles blend toward the active color with the expansion
/// so the color travels with the wide indicator during a drag.
pub fn indicator_color(state: &IndicatorState, config: &IndicatorConfig, index: usize) -> Color {
    if config.animation_style.expands_width() {
        blend(config.inactive_color, config.active_color, expansion(state, index))
    } else if index == state.current_page {
        config.active_color
    } else {
        config.inactive_color
    }
}

fn blend(from: Color, to: Color, t: f32) -> Color {
    let mix = |a: u8, b: u8| lerp(a as f32, b as f32, t.clamp(0.0, 1.0)).round() as u8;
    Color::from_argb(
        mix(from.alpha(), to.alpha()),
        mix(from.red(), to.red()),
        mix(from.green(), to.green()),
        mix(from.blue(), to.blue()),
    )
}

fn shape_geometry(
    config: &IndicatorConfig,
    center: Point,
    width: f32,
    size: f32,
    expansion: f32,
) -> ShapeGeometry {
    let half_height = size / 2.0;
    let pill_radius = half_height;
    let stretched = width > size;

    match config.shape {
        IndicatorShape::Diamond => {
            let half_width = width / 2.0;
            ShapeGeometry::Polygon {
                points: [
                    Point::new(center.x, center.y - half_height),
                    Point::new(center.x + half_width, center.y),
                    Point::new(center.x, center.y + half_height),
                    Point::new(center.x - half_width, center.y),
                ],
            }
        }
        shape if config.animation_style == AnimationStyle::Morph && stretched => {
            let resting = match shape {
                IndicatorShape::Circle => pill_radius,
                IndicatorShape::RoundedRect => config.corner_radius.min(pill_radius),
                _ => 0.0,
            };
            ShapeGeometry::RoundRect {
                rect: Rect::from_center(center, width, size),
                corner_radius: lerp(resting, pill_radius, expansion),
            }
        }
        IndicatorShape::Circle if stretched => ShapeGeometry::RoundRect {
            rect: Rect::from_center(center, width, size),
            corner_radius: pill_radius,
        },
        IndicatorShape::Circle => ShapeGeometry::Circle {
            center,
            radius: half_height,
        },
        IndicatorShape::RoundedRect => ShapeGeometry::RoundRect {
            rect: Rect::from_center(center, width, size),
            corner_radius: config.corner_radius.min(pill_radius),
        },
        IndicatorShape::Rect => ShapeGeometry::Rect {
            rect: Rect::from_center(center, width, size),
        },
    }
}

/// Draw commands for the whole row, left to right
///
/// The row is centered in `bounds`; when the host has not laid the widget
/// out yet (`bounds` is empty) the measured geometry is used instead.
pub fn render(
    state: &IndicatorState,
    config: &IndicatorConfig,
    geometry: &Geometry,
    bounds: Size,
) -> Vec<DrawCommand> {
    if !is_drawable(state, config) {
        return Vec::new();
    }

    let bounds = if bounds.width <= 0.0 || bounds.height <= 0.0 {
        Size::new(geometry.total_extent, geometry.rendered_height)
    } else {
        bounds
    };

    let count = state.page_count;
    let sizes: Vec<f32> = (0..count).map(|i| indicator_size(state, config, i)).collect();
    let widths: Vec<f32> = (0..count).map(|i| indicator_width(state, config, i)).collect();
    let row_width = widths.iter().sum::<f32>() + config.spacing * (count - 1) as f32;

    let center_y = bounds.height / 2.0;
    let mut cursor = (bounds.width - row_width) / 2.0;
    let mut commands = Vec::with_capacity(count);

    for index in 0..count {
        let size = sizes[index];
        let width = widths[index];
        let center = Point::new(cursor + width / 2.0, center_y);
        let is_active = index == state.current_page;

        let fill = indicator_color(state, config, index)
            .scale_alpha(indicator_alpha(state, config, index));

        let rotation = (config.animation_style == AnimationStyle::Rotate && is_active).then(|| {
            Rotation {
                degrees: state.animated.rotation,
                pivot: center,
            }
        });

        let outlined = is_active || (state.is_gesture_active && index == state.target_page);
        let stroke = (config.stroke_width > 0.0 && outlined).then(|| Stroke {
            width: config.stroke_width,
            color: config.stroke_color,
        });

        let glow = (config.enable_glow && is_active).then(|| Glow {
            color: config.glow_color,
            radius: config.glow_radius,
        });

        commands.push(DrawCommand {
            index,
            shape: shape_geometry(config, center, width, size, expansion(state, index)),
            fill,
            rotation,
            stroke,
            glow,
        });

        cursor += width + config.spacing;
    }

    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicator::geometry::measure;

    const BASE: f32 = 20.0;

    fn config(style: AnimationStyle) -> IndicatorConfig {
        IndicatorConfig {
            animation_style: style,
            size: BASE,
            spacing: 10.0,
            active_color: Color(0xFF2196F3),
            inactive_color: Color(0x4D9E9E9E),
            ..Default::default()
        }
    }

    fn gesture(page_count: usize, base: usize, offset: f32) -> IndicatorState {
        let mut state = IndicatorState::new(page_count);
        state.gesture_base = base;
        state.target_page = if offset > 0.5 { base + 1 } else { base };
        state.gesture_progress = if offset <= 0.5 {
            2.0 * offset
        } else {
            2.0 * (1.0 - offset)
        };
        state.is_gesture_active = offset > 0.0;
        state
    }

    fn widths(state: &IndicatorState, config: &IndicatorConfig) -> Vec<f32> {
        (0..state.page_count)
            .map(|i| indicator_width(state, config, i))
            .collect()
    }

    #[test]
    fn test_slide_at_rest() {
        let config = config(AnimationStyle::Slide);
        let state = gesture(3, 0, 0.0);
        assert_eq!(widths(&state, &config), vec![2.5 * BASE, BASE, BASE]);
    }

    #[test]
    fn test_slide_midpoint_blend() {
        let config = config(AnimationStyle::Slide);
        let state = gesture(3, 0, 0.5);
        assert!((state.gesture_progress - 1.0).abs() < 1e-6);
        let w = widths(&state, &config);
        assert!((w[0] - 1.75 * BASE).abs() < 1e-4);
        assert!((w[1] - 1.75 * BASE).abs() < 1e-4);
        assert_eq!(w[2], BASE);
    }

    #[test]
    fn test_single_expanded_indicator() {
        let expanded_half = 1.75 * BASE;
        for style in [AnimationStyle::Slide, AnimationStyle::Morph] {
            let config = config(style);
            for base in 0..3 {
                for step in 0..=20 {
                    let state = gesture(4, base, step as f32 / 20.0);
                    let w = widths(&state, &config);
                    let wide = w.iter().filter(|&&x| x > expanded_half + 1e-4).count();
                    assert!(wide <= 1, "{style} base {base} step {step}: {w:?}");
                    let grown = w.iter().filter(|&&x| x > BASE + 1e-4).count();
                    assert!(grown <= 2);
                    // Total extra width is always exactly one expansion
                    let extra: f32 = w.iter().map(|x| x - BASE).sum();
                    assert!((extra - 1.5 * BASE).abs() < 1e-3);
                }
            }
        }
    }

    #[test]
    fn test_reversed_drag_keeps_one_expanded() {
        let config = config(AnimationStyle::Slide);
        // Dragging back from page 2 toward page 1
        let state = gesture(3, 1, 0.9);
        let w = widths(&state, &config);
        assert_eq!(state.target_page, 2);
        assert!(w[2] > w[1]);
        assert_eq!(w[0], BASE);
    }

    #[test]
    fn test_progressive_sizes() {
        let config = IndicatorConfig {
            progressive_sizing: true,
            max_size: 36.0,
            min_size: 18.0,
            animation_style: AnimationStyle::None,
            ..Default::default()
        };
        let mut state = IndicatorState::new(6);
        state.current_page = 2;
        state.target_page = 2;
        assert_eq!(indicator_size(&state, &config, 2), 36.0);
        assert_eq!(indicator_size(&state, &config, 1), 27.0);
        assert_eq!(indicator_size(&state, &config, 3), 27.0);
        assert_eq!(indicator_size(&state, &config, 0), 18.0);
        assert_eq!(indicator_size(&state, &config, 5), 18.0);
    }

    #[test]
    fn test_scale_applies_to_active_only() {
        for style in [AnimationStyle::Scale, AnimationStyle::Bounce, AnimationStyle::Pulse] {
            let config = config(style);
            let mut state = IndicatorState::new(3);
            state.animated.scale = 1.2;
            assert!((indicator_size(&state, &config, 0) - 24.0).abs() < 1e-4);
            assert_eq!(indicator_size(&state, &config, 1), BASE);
        }
        let mut state = IndicatorState::new(3);
        state.animated.scale = 1.2;
        assert_eq!(indicator_size(&state, &config(AnimationStyle::Fade), 0), BASE);
    }

    #[test]
    fn test_alpha_tiers() {
        let config = config(AnimationStyle::Scale);
        let mut state = IndicatorState::new(5);
        state.current_page = 2;
        assert_eq!(indicator_alpha(&state, &config, 2), 1.0);
        assert_eq!(indicator_alpha(&state, &config, 1), 1.0);
        assert_eq!(indicator_alpha(&state, &config, 3), 1.0);
        assert_eq!(indicator_alpha(&state, &config, 0), FAR_ALPHA);
        assert_eq!(indicator_alpha(&state, &config, 4), FAR_ALPHA);
    }

    #[test]
    fn test_fade_alpha() {
        let config = config(AnimationStyle::Fade);
        let mut state = IndicatorState::new(3);
        state.animated.alpha = 0.5;
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        assert_eq!(commands[0].fill.alpha(), 128);
        // Inactive: color alpha 0x4D scaled by the dim factor
        assert_eq!(commands[1].fill.alpha(), (0x4D as f32 * FADE_DIM_ALPHA).round() as u8);
    }

    #[test]
    fn test_render_is_pure() {
        for style in AnimationStyle::ALL {
            let config = config(style);
            let state = gesture(5, 1, 0.35);
            let geometry = measure(5, &config, style);
            let bounds = Size::new(400.0, 40.0);
            assert_eq!(
                render(&state, &config, &geometry, bounds),
                render(&state, &config, &geometry, bounds)
            );
        }
    }

    #[test]
    fn test_row_is_centered() {
        let config = config(AnimationStyle::Slide);
        let state = IndicatorState::new(3);
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::new(200.0, 40.0));

        let first = commands[0].shape.bounds();
        let last = commands[2].shape.bounds();
        // Row: 50 + 10 + 20 + 10 + 20 = 110 wide
        assert!((first.left - 45.0).abs() < 1e-4);
        assert!((last.right - 155.0).abs() < 1e-4);
        assert!((first.center().y - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_layout_fills_measured_extent() {
        let config = config(AnimationStyle::Morph);
        let state = IndicatorState::new(4);
        let geometry = measure(4, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        assert!(commands[0].shape.bounds().left.abs() < 1e-4);
        assert!((commands[3].shape.bounds().right - geometry.total_extent).abs() < 1e-3);
    }

    #[test]
    fn test_shapes() {
        let mut config = config(AnimationStyle::None);
        let state = IndicatorState::new(2);
        let geometry = measure(2, &config, config.animation_style);

        config.shape = IndicatorShape::Circle;
        let commands = render(&state, &config, &geometry, Size::default());
        assert!(matches!(commands[0].shape, ShapeGeometry::Circle { radius, .. } if radius == 10.0));

        config.shape = IndicatorShape::RoundedRect;
        config.corner_radius = 4.0;
        let commands = render(&state, &config, &geometry, Size::default());
        assert!(matches!(commands[1].shape, ShapeGeometry::RoundRect { corner_radius, .. } if corner_radius == 4.0));

        config.shape = IndicatorShape::Rect;
        let commands = render(&state, &config, &geometry, Size::default());
        assert!(matches!(commands[0].shape, ShapeGeometry::Rect { .. }));

        config.shape = IndicatorShape::Diamond;
        let commands = render(&state, &config, &geometry, Size::default());
        let bounds = commands[0].shape.bounds();
        assert!((bounds.width() - 20.0).abs() < 1e-4);
        assert!((bounds.height() - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_slide_circle_becomes_pill() {
        let config = config(AnimationStyle::Slide);
        let state = IndicatorState::new(3);
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        match &commands[0].shape {
            ShapeGeometry::RoundRect { rect, corner_radius } => {
                assert!((rect.width() - 50.0).abs() < 1e-4);
                assert_eq!(*corner_radius, 10.0);
            }
            other => panic!("expected pill, got {other:?}"),
        }
        assert!(matches!(commands[1].shape, ShapeGeometry::Circle { .. }));
    }

    #[test]
    fn test_morph_rounds_corners_with_expansion() {
        let mut config = config(AnimationStyle::Morph);
        config.shape = IndicatorShape::Rect;
        let state = gesture(3, 0, 0.25);
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        let radius = |command: &DrawCommand| match command.shape {
            ShapeGeometry::RoundRect { corner_radius, .. } => corner_radius,
            _ => 0.0,
        };
        // Leading indicator is more expanded, so rounder
        assert!(radius(&commands[0]) > radius(&commands[1]));
        assert!(radius(&commands[1]) > 0.0);
        assert!(matches!(commands[2].shape, ShapeGeometry::Rect { .. }));
    }

    #[test]
    fn test_rotation_only_on_active() {
        let config = config(AnimationStyle::Rotate);
        let mut state = IndicatorState::new(3);
        state.current_page = 1;
        state.target_page = 1;
        state.animated.rotation = 45.0;
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        assert!(commands[0].rotation.is_none());
        let rotation = commands[1].rotation.unwrap();
        assert_eq!(rotation.degrees, 45.0);
        assert_eq!(rotation.pivot, commands[1].shape.bounds().center());
    }

    #[test]
    fn test_stroke_and_glow_on_active() {
        let mut config = config(AnimationStyle::Scale);
        config.stroke_width = 2.0;
        config.stroke_color = Color::BLACK;
        config.enable_glow = true;
        let state = IndicatorState::new(3);
        let geometry = measure(3, &config, config.animation_style);
        let commands = render(&state, &config, &geometry, Size::default());
        assert_eq!(commands[0].stroke.unwrap().width, 2.0);
        assert!(commands[0].glow.is_some());
        assert!(commands[1].stroke.is_none());
        assert!(commands[1].glow.is_none());
    }

    #[test]
    fn test_slide_color_follows_expansion() {
        let config = config(AnimationStyle::Slide);
        let state = IndicatorState::new(3);
        assert_eq!(indicator_color(&state, &config, 0), config.active_color);
        assert_eq!(indicator_color(&state, &config, 1), config.inactive_color);
    }

    #[test]
    fn test_nothing_drawn_for_single_page() {
        let config = config(AnimationStyle::Slide);
        let state = IndicatorState::new(1);
        let geometry = measure(1, &config, config.animation_style);
        assert!(render(&state, &config, &geometry, Size::new(100.0, 20.0)).is_empty());
    }
}
