//! Convex polygon collision via the Separating Axis Theorem
//!
//! Every entity carries a `Polygon`: a shape, its model-space vertices and the
//! same vertices rotated and translated into the world. Two polygons overlap
//! unless some edge normal of either one separates their projections.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Interval, to_world};
use crate::consts::CIRCLE_SEGMENTS;

/// Collision silhouette, scaled by the owning body's dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// Four corners at ±half dimensions
    Rectangle,
    /// Regular polygon approximation; per-axis radii allow ellipses
    Circle,
    /// Apex up, base along the bottom edge
    Triangle,
    /// Five-point silhouette with a narrower base
    Pentagon,
}

impl Shape {
    /// Model-space vertices for the given (unrotated) dimensions
    pub fn local_vertices(&self, dims: Vec2) -> Vec<Vec2> {
        let half = dims / 2.0;
        match self {
            Shape::Rectangle => vec![
                Vec2::new(-half.x, -half.y),
                Vec2::new(half.x, -half.y),
                Vec2::new(half.x, half.y),
                Vec2::new(-half.x, half.y),
            ],
            Shape::Circle => (0..CIRCLE_SEGMENTS)
                .map(|i| {
                    let a = std::f32::consts::TAU / CIRCLE_SEGMENTS as f32 * i as f32;
                    Vec2::new(half.x * a.cos(), half.y * a.sin())
                })
                .collect(),
            Shape::Triangle => vec![
                Vec2::new(0.0, -half.y),
                Vec2::new(-half.x, half.y),
                Vec2::new(half.x, half.y),
            ],
            Shape::Pentagon => {
                // Base corners pulled in by 18% of the width, 4% up from the bottom
                let inset_x = dims.x * 0.18;
                let inset_y = dims.y * 0.04;
                vec![
                    Vec2::new(0.0, -half.y),
                    Vec2::new(half.x, -dims.y / 6.0),
                    Vec2::new(half.x - inset_x, half.y - inset_y),
                    Vec2::new(-half.x + inset_x, half.y - inset_y),
                    Vec2::new(-half.x, -dims.y / 6.0),
                ]
            }
        }
    }
}

/// A shape's local and world vertex buffers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Polygon {
    shape: Shape,
    local: Vec<Vec2>,
    world: Vec<Vec2>,
}

impl Polygon {
    pub fn new(shape: Shape, dims: Vec2, angle: f32, position: Vec2) -> Self {
        let mut polygon = Self {
            shape,
            local: shape.local_vertices(dims),
            world: Vec::new(),
        };
        polygon.transform(angle, position);
        polygon
    }

    /// Build directly from model-space points (no shape rebuild on resize)
    pub fn from_local(shape: Shape, local: Vec<Vec2>, angle: f32, position: Vec2) -> Self {
        let mut polygon = Self {
            shape,
            local,
            world: Vec::new(),
        };
        polygon.transform(angle, position);
        polygon
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn local_vertices(&self) -> &[Vec2] {
        &self.local
    }

    /// World-space points in winding order
    pub fn world_vertices(&self) -> &[Vec2] {
        &self.world
    }

    /// Re-derive local vertices for new dimensions, then re-apply the transform
    pub fn rebuild(&mut self, dims: Vec2, angle: f32, position: Vec2) {
        self.local = self.shape.local_vertices(dims);
        self.transform(angle, position);
    }

    /// Rotate and translate the local vertices into the world buffer
    pub fn transform(&mut self, angle: f32, position: Vec2) {
        self.world.clear();
        self.world
            .extend(self.local.iter().map(|&v| to_world(v, angle, position)));
    }

    /// Symmetric SAT overlap test against another polygon
    pub fn collides_with(&self, other: &Polygon) -> bool {
        sat_overlap(&self.world, &other.world)
    }
}

/// Unit normals of every edge, in winding order
pub fn edge_axes(vertices: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    let n = vertices.len();
    (0..n).map(move |i| {
        let edge = vertices[(i + 1) % n] - vertices[i];
        edge.perp().normalize_or_zero()
    })
}

/// Project a vertex set onto an axis; nothing projects to `Interval::EMPTY`
pub fn project(vertices: &[Vec2], axis: Vec2) -> Interval {
    if vertices.is_empty() {
        log::error!("cannot project an empty vertex set");
        return Interval::EMPTY;
    }
    vertices.iter().fold(Interval::EMPTY, |acc, v| {
        let p = v.dot(axis);
        Interval {
            min: acc.min.min(p),
            max: acc.max.max(p),
        }
    })
}

/// Separating Axis Theorem over two convex vertex sets
///
/// Tests the edge normals of `a` then `b` and returns `false` on the first
/// axis whose projections don't overlap. Degenerate input (an empty set) is
/// logged and reported as no overlap.
pub fn sat_overlap(a: &[Vec2], b: &[Vec2]) -> bool {
    if a.is_empty() || b.is_empty() {
        log::error!(
            "SAT test on empty polygon ({} vs {} vertices)",
            a.len(),
            b.len()
        );
        return false;
    }

    edge_axes(a)
        .chain(edge_axes(b))
        .all(|axis| project(a, axis).overlaps(&project(b, axis)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn rect(center: Vec2, dims: Vec2, angle: f32) -> Polygon {
        Polygon::new(Shape::Rectangle, dims, angle, center)
    }

    #[test]
    fn test_identical_rectangles_collide() {
        let a = rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0), 0.0);
        let b = rect(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0), 0.0);
        assert!(a.collides_with(&b));
    }

    #[test]
    fn test_diagonal_separation_despite_bounding_box_overlap() {
        // Two diamonds whose bounding boxes overlap but which are split by the
        // (1, 1) diagonal
        let a = rect(Vec2::ZERO, Vec2::splat(10.0), FRAC_PI_4);
        let b = rect(Vec2::new(9.0, 9.0), Vec2::splat(10.0), FRAC_PI_4);

        let extent = |p: &Polygon| {
            let xs = p.world_vertices().iter().map(|v| v.x);
            xs.clone().fold(f32::MAX, f32::min)..xs.fold(f32::MIN, f32::max)
        };
        assert!(extent(&a).end > extent(&b).start, "bounding boxes overlap");
        assert!(!a.collides_with(&b));
        assert!(!b.collides_with(&a));
    }

    #[test]
    fn test_separated_rectangles() {
        let a = rect(Vec2::ZERO, Vec2::splat(10.0), 0.0);
        let b = rect(Vec2::new(10.5, 0.0), Vec2::splat(10.0), 0.0);
        assert!(!a.collides_with(&b));
        // Touching edges count as overlap
        let c = rect(Vec2::new(10.0, 0.0), Vec2::splat(10.0), 0.0);
        assert!(a.collides_with(&c));
    }

    #[test]
    fn test_circle_has_twelve_vertices_and_ellipse_extents() {
        let c = Polygon::new(Shape::Circle, Vec2::new(40.0, 20.0), 0.0, Vec2::ZERO);
        assert_eq!(c.world_vertices().len(), CIRCLE_SEGMENTS);
        assert!((c.world_vertices()[0] - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!((c.world_vertices()[3] - Vec2::new(0.0, 10.0)).length() < 1e-4);
    }

    #[test]
    fn test_triangle_and_pentagon_shapes() {
        let t = Shape::Triangle.local_vertices(Vec2::new(60.0, 51.0));
        assert_eq!(t, vec![
            Vec2::new(0.0, -25.5),
            Vec2::new(-30.0, 25.5),
            Vec2::new(30.0, 25.5),
        ]);

        let p = Shape::Pentagon.local_vertices(Vec2::splat(100.0));
        assert_eq!(p.len(), 5);
        assert!((p[2] - Vec2::new(32.0, 46.0)).length() < 1e-4);
        assert!((p[3] - Vec2::new(-32.0, 46.0)).length() < 1e-4);
    }

    #[test]
    fn test_circle_against_rectangle_uses_sixteen_axes() {
        let circle = Polygon::new(Shape::Circle, Vec2::splat(10.0), 0.0, Vec2::ZERO);
        let square = rect(Vec2::new(8.0, 0.0), Vec2::splat(10.0), 0.0);
        assert_eq!(
            edge_axes(circle.world_vertices())
                .chain(edge_axes(square.world_vertices()))
                .count(),
            16
        );
        assert!(circle.collides_with(&square));
    }

    #[test]
    fn test_empty_polygon_never_collides() {
        let square = rect(Vec2::ZERO, Vec2::splat(10.0), 0.0);
        let empty = Polygon::from_local(Shape::Rectangle, Vec::new(), 0.0, Vec2::ZERO);
        assert!(!square.collides_with(&empty));
        assert!(!empty.collides_with(&square));
        assert!(!empty.collides_with(&empty));
        assert!(project(&[], Vec2::X).is_empty());
    }

    #[test]
    fn test_rebuild_tracks_dimensions() {
        let mut p = rect(Vec2::ZERO, Vec2::splat(10.0), 0.0);
        p.rebuild(Vec2::new(40.0, 10.0), 0.0, Vec2::new(1.0, 1.0));
        assert!((p.world_vertices()[1] - Vec2::new(21.0, -4.0)).length() < 1e-5);
    }

    fn shape_strategy() -> impl Strategy<Value = Shape> {
        prop_oneof![
            Just(Shape::Rectangle),
            Just(Shape::Circle),
            Just(Shape::Triangle),
            Just(Shape::Pentagon),
        ]
    }

    fn polygon_strategy() -> impl Strategy<Value = Polygon> {
        (
            shape_strategy(),
            1.0f32..120.0,
            1.0f32..120.0,
            -3.2f32..3.2,
            -150.0f32..150.0,
            -150.0f32..150.0,
        )
            .prop_map(|(shape, w, h, angle, x, y)| {
                Polygon::new(shape, Vec2::new(w, h), angle, Vec2::new(x, y))
            })
    }

    proptest! {
        #[test]
        fn prop_sat_is_symmetric(a in polygon_strategy(), b in polygon_strategy()) {
            prop_assert_eq!(a.collides_with(&b), b.collides_with(&a));
        }

        #[test]
        fn prop_polygon_collides_with_itself(a in polygon_strategy()) {
            prop_assert!(a.collides_with(&a.clone()));
        }
    }
}
