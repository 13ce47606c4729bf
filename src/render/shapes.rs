//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::{Color, Vertex, colors};
use crate::sim::Rect;

/// Height of the bar drawn above damaged enemies
pub const HEALTH_BAR_HEIGHT: f32 = 5.0;
/// Gap between the bar and the top of the entity's box
pub const HEALTH_BAR_OFFSET: f32 = 10.0;

/// Triangle fan over a convex polygon, shifted by `-origin`
pub fn polygon_fan(points: &[Vec2], origin: Vec2, color: Color) -> Vec<Vertex> {
    if points.len() < 3 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity((points.len() - 2) * 3);
    let anchor = points[0] - origin;
    for pair in points[1..].windows(2) {
        vertices.push(Vertex::at(anchor, color));
        vertices.push(Vertex::at(pair[0] - origin, color));
        vertices.push(Vertex::at(pair[1] - origin, color));
    }
    vertices
}

/// Two triangles covering an axis-aligned rectangle
pub fn rect(r: Rect, color: Color) -> Vec<Vertex> {
    let (l, t, rt, b) = (r.left(), r.top(), r.right(), r.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(rt, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(rt, t, color),
        Vertex::new(rt, b, color),
    ]
}

/// Green above half, yellow above a quarter, red below
pub fn health_color(ratio: f32) -> Color {
    if ratio > 0.5 {
        colors::GREEN
    } else if ratio > 0.25 {
        colors::YELLOW
    } else {
        colors::RED
    }
}

/// Full-width backing plus a fill proportional to `ratio`, above the box
/// centered at `center` with size `dims` (coordinates already arena-relative)
pub fn health_bar(center: Vec2, dims: Vec2, ratio: f32) -> Vec<Vertex> {
    let ratio = ratio.clamp(0.0, 1.0);
    let x = center.x - dims.x / 2.0;
    let y = center.y - dims.y / 2.0 - HEALTH_BAR_OFFSET;

    let mut vertices = rect(
        Rect::new(x, y, dims.x, HEALTH_BAR_HEIGHT),
        colors::HEALTH_BAR_BACK,
    );
    if ratio > 0.0 {
        vertices.extend(rect(
            Rect::new(x, y, dims.x * ratio, HEALTH_BAR_HEIGHT),
            health_color(ratio),
        ));
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_fan_triangle_count() {
        let square = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let verts = polygon_fan(&square, Vec2::ZERO, colors::WHITE);
        assert_eq!(verts.len(), 6);
        assert!(polygon_fan(&square[..2], Vec2::ZERO, colors::WHITE).is_empty());
    }

    #[test]
    fn test_polygon_fan_applies_origin() {
        let tri = [Vec2::new(10.0, 10.0), Vec2::new(12.0, 10.0), Vec2::new(10.0, 12.0)];
        let verts = polygon_fan(&tri, Vec2::new(10.0, 10.0), colors::WHITE);
        assert_eq!(verts[0].position, [0.0, 0.0]);
        assert_eq!(verts[1].position, [2.0, 0.0]);
    }

    #[test]
    fn test_health_bar_colors() {
        assert_eq!(health_color(0.9), colors::GREEN);
        assert_eq!(health_color(0.4), colors::YELLOW);
        assert_eq!(health_color(0.1), colors::RED);

        // Empty bar draws only the backing
        assert_eq!(health_bar(Vec2::ZERO, Vec2::splat(10.0), 0.0).len(), 6);
        let full = health_bar(Vec2::ZERO, Vec2::splat(10.0), 1.0);
        assert_eq!(full.len(), 12);
        assert_eq!(full[6].color, colors::GREEN);
    }
}
