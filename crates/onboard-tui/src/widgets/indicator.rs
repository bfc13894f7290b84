//! Terminal rasterizer for indicator draw commands
//!
//! Draw commands are in indicator pixels. The widget picks a pixel scale so
//! the whole row fits the area, samples every shape at braille dot
//! resolution and paints the covered dots onto a canvas. Translucent colors
//! are blended over the theme background since terminals have no alpha.

use onboard_core::indicator::{DrawCommand, Point, Rect, ShapeGeometry, Size};
use onboard_core::{Color, Geometry, PageIndicator};
use ratatui::{
    layout::Rect as Area,
    style::Color as TermColor,
    symbols::Marker,
    widgets::canvas::{Canvas, Points},
    Frame,
};

use crate::theme::Theme;

/// Smallest pixel scale, keeps short rows from looking blocky
const MIN_PX_PER_COLUMN: f32 = 3.0;
/// Terminal cells are about twice as tall as they are wide
const CELL_ASPECT: f32 = 2.0;
/// Share of the area the row may span
const FILL_RATIO: f32 = 0.85;
const GLOW_OPACITY: f32 = 0.35;

// Braille dots per cell
const DOTS_X: f32 = 2.0;
const DOTS_Y: f32 = 4.0;

pub struct IndicatorWidget;

impl IndicatorWidget {
    pub fn render(frame: &mut Frame, area: Area, indicator: &PageIndicator, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let viewport = Viewport::fit(area.width, area.height, indicator.measure());
        let commands = indicator.render(viewport.bounds);
        let layers = rasterize(&commands, &viewport, theme.background_rgb());

        let canvas = Canvas::default()
            .marker(Marker::Braille)
            .background_color(theme.bg0)
            .x_bounds([0.0, viewport.bounds.width as f64])
            .y_bounds([0.0, viewport.bounds.height as f64])
            .paint(|ctx| {
                for layer in &layers {
                    ctx.draw(&Points {
                        coords: &layer.coords,
                        color: layer.color,
                    });
                }
            });

        frame.render_widget(canvas, area);
    }
}

/// Mapping between terminal cells and indicator pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Area size in indicator pixels
    pub bounds: Size,
    /// Pixel distance between horizontal dots
    pub step_x: f32,
    /// Pixel distance between vertical dots
    pub step_y: f32,
}

impl Viewport {
    /// Scale so that `geometry` fits in `columns` x `rows` cells
    pub fn fit(columns: u16, rows: u16, geometry: Geometry) -> Self {
        let columns = columns.max(1) as f32;
        let rows = rows.max(1) as f32;

        let px_per_column = (geometry.total_extent / (columns * FILL_RATIO))
            .max(geometry.rendered_height / (rows * CELL_ASPECT * FILL_RATIO))
            .max(MIN_PX_PER_COLUMN);
        let px_per_row = px_per_column * CELL_ASPECT;

        Self {
            bounds: Size::new(columns * px_per_column, rows * px_per_row),
            step_x: px_per_column / DOTS_X,
            step_y: px_per_row / DOTS_Y,
        }
    }
}

/// Dots of one color, in canvas coordinates (y up)
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub coords: Vec<(f64, f64)>,
    pub color: TermColor,
}

/// Sample draw commands into colored dot layers, back to front
pub fn rasterize(commands: &[DrawCommand], viewport: &Viewport, background: (u8, u8, u8)) -> Vec<Layer> {
    let mut layers = Vec::new();

    for command in commands {
        let shape = &command.shape;
        let local = |p: Point| match command.rotation {
            Some(rotation) => rotate(p, rotation.pivot, -rotation.degrees),
            None => p,
        };

        if let Some(glow) = command.glow {
            let color = blend(glow.color.scale_alpha(GLOW_OPACITY), background);
            push_layer(&mut layers, viewport, shape, glow.radius, color, |p| {
                signed_distance(shape, local(p)) <= glow.radius
            });
        }

        let fill = blend(command.fill, background);
        push_layer(&mut layers, viewport, shape, 0.0, fill, |p| {
            signed_distance(shape, local(p)) <= 0.0
        });

        if let Some(stroke) = command.stroke {
            let half = stroke.width / 2.0;
            let color = blend(stroke.color, background);
            push_layer(&mut layers, viewport, shape, half, color, |p| {
                signed_distance(shape, local(p)).abs() <= half
            });
        }
    }

    layers
}

fn push_layer(
    layers: &mut Vec<Layer>,
    viewport: &Viewport,
    shape: &ShapeGeometry,
    margin: f32,
    color: TermColor,
    covers: impl Fn(Point) -> bool,
) {
    let coords = sample(viewport, &sample_box(shape, margin), covers);
    if !coords.is_empty() {
        layers.push(Layer { coords, color });
    }
}

/// Dot centers inside `area` for which `covers` holds
fn sample(viewport: &Viewport, area: &Rect, covers: impl Fn(Point) -> bool) -> Vec<(f64, f64)> {
    let mut coords = Vec::new();
    if viewport.step_x <= 0.0 || viewport.step_y <= 0.0 {
        return coords;
    }

    let first_col = (area.left / viewport.step_x).floor().max(0.0) as u32;
    let last_col = (area.right / viewport.step_x).ceil().min(viewport.bounds.width / viewport.step_x) as u32;
    let first_row = (area.top / viewport.step_y).floor().max(0.0) as u32;
    let last_row = (area.bottom / viewport.step_y).ceil().min(viewport.bounds.height / viewport.step_y) as u32;

    for row in first_row..last_row {
        let y = (row as f32 + 0.5) * viewport.step_y;
        for col in first_col..last_col {
            let x = (col as f32 + 0.5) * viewport.step_x;
            if covers(Point::new(x, y)) {
                // Canvas y grows upward
                coords.push((x as f64, (viewport.bounds.height - y) as f64));
            }
        }
    }

    coords
}

/// Region to sample for `shape` grown by `margin`, large enough for any rotation
fn sample_box(shape: &ShapeGeometry, margin: f32) -> Rect {
    let bounds = shape.bounds();
    let reach = (bounds.width().hypot(bounds.height())) / 2.0 + margin;
    Rect::from_center(bounds.center(), reach * 2.0, reach * 2.0)
}

/// Distance from `p` to the outline of `shape`, negative inside
pub fn signed_distance(shape: &ShapeGeometry, p: Point) -> f32 {
    match shape {
        ShapeGeometry::Circle { center, radius } => (p.x - center.x).hypot(p.y - center.y) - radius,
        ShapeGeometry::RoundRect {
            rect,
            corner_radius,
        } => rounded_box_distance(rect, *corner_radius, p),
        ShapeGeometry::Rect { rect } => rounded_box_distance(rect, 0.0, p),
        ShapeGeometry::Polygon { points } => diamond_distance(points, p),
    }
}

fn rounded_box_distance(rect: &Rect, radius: f32, p: Point) -> f32 {
    let center = rect.center();
    let half_width = rect.width() / 2.0;
    let half_height = rect.height() / 2.0;
    let radius = radius.min(half_width).min(half_height).max(0.0);

    let qx = (p.x - center.x).abs() - (half_width - radius);
    let qy = (p.y - center.y).abs() - (half_height - radius);
    let outside = qx.max(0.0).hypot(qy.max(0.0));
    let inside = qx.max(qy).min(0.0);
    outside + inside - radius
}

/// Distance to the nearest edge of a rhombus given as top, right, bottom, left
fn diamond_distance(points: &[Point; 4], p: Point) -> f32 {
    let [top, right, bottom, left] = points;
    let half_width = (right.x - left.x) / 2.0;
    let half_height = (bottom.y - top.y) / 2.0;
    if half_width <= 0.0 || half_height <= 0.0 {
        return f32::INFINITY;
    }

    let dx = (p.x - (left.x + right.x) / 2.0).abs();
    let dy = (p.y - (top.y + bottom.y) / 2.0).abs();
    (dx / half_width + dy / half_height - 1.0) * half_width * half_height
        / half_width.hypot(half_height)
}

/// Rotate `p` around `pivot`, clockwise on screen for positive degrees
fn rotate(p: Point, pivot: Point, degrees: f32) -> Point {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let dx = p.x - pivot.x;
    let dy = p.y - pivot.y;
    Point::new(pivot.x + dx * cos - dy * sin, pivot.y + dx * sin + dy * cos)
}

/// Composite an ARGB color over an opaque background
pub fn blend(color: Color, background: (u8, u8, u8)) -> TermColor {
    let alpha = color.alpha() as f32 / 255.0;
    let mix = |fg: u8, bg: u8| (bg as f32 + (fg as f32 - bg as f32) * alpha).round() as u8;
    TermColor::Rgb(
        mix(color.red(), background.0),
        mix(color.green(), background.1),
        mix(color.blue(), background.2),
    )
}
