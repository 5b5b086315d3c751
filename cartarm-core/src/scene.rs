use nalgebra::Point2;

use crate::kinematic::{CartGeometry, GripperPoint, WorldPoints};
use crate::Point;

/// Radius of the joint marker dots.
pub const MARKER_RADIUS: f64 = 0.02;

/// Drawing surface.
///
/// Implemented by whatever renders the scene, the core never draws.
pub trait Canvas {
    /// Straight line between two points.
    fn line(&mut self, from: Point2<f64>, to: Point2<f64>);
    /// Circle outline.
    fn circle(&mut self, circle: &Circle);
    /// Filled marker dot.
    fn dot(&mut self, circle: &Circle);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point2<f64>,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2<f64>, radius: f64) -> Self {
        Self { center, radius }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Primitive {
    Segment(Point2<f64>, Point2<f64>),
    Wheel(Circle),
    Marker(Circle),
}

impl std::fmt::Display for Primitive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Segment(from, to) => write!(
                f,
                "Segment ({:.3}, {:.3}) -> ({:.3}, {:.3})",
                from.x, from.y, to.x, to.y
            ),
            Self::Wheel(circle) => write!(
                f,
                "Wheel   ({:.3}, {:.3}) r={:.3}",
                circle.center.x, circle.center.y, circle.radius
            ),
            Self::Marker(circle) => write!(
                f,
                "Marker  ({:.3}, {:.3}) r={:.3}",
                circle.center.x, circle.center.y, circle.radius
            ),
        }
    }
}

#[inline]
fn flatten(point: &Point) -> Point2<f64> {
    Point2::new(point.x, point.y)
}

/// Everything to draw for one evaluation, in drawing order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    primitives: Vec<Primitive>,
}

impl Scene {
    /// Compose the cart drawing from evaluated joint positions.
    pub fn compose(points: &WorldPoints, geometry: &CartGeometry) -> Self {
        let wheel_left = points.wheel_left();
        let wheel_right = points.wheel_right();
        let point_a = flatten(points.point_a());
        let point_b = flatten(points.point_b());
        let point_c = flatten(points.point_c());
        let attachment = flatten(points.gripper(GripperPoint::Attachment));
        let left_top = flatten(points.gripper(GripperPoint::LeftTop));
        let left_bottom = flatten(points.gripper(GripperPoint::LeftBottom));
        let right_top = flatten(points.gripper(GripperPoint::RightTop));
        let right_bottom = flatten(points.gripper(GripperPoint::RightBottom));

        let mut primitives = vec![
            // Platform
            Primitive::Segment(
                Point2::new(wheel_left.x - geometry.platform_overhang, wheel_left.y),
                Point2::new(wheel_right.x + geometry.platform_overhang, wheel_right.y),
            ),
            Primitive::Segment(point_a, point_b),
            Primitive::Segment(point_b, point_c),
            Primitive::Segment(point_c, attachment),
            // Gripper crossbar and fingers
            Primitive::Segment(left_top, right_top),
            Primitive::Segment(left_top, left_bottom),
            Primitive::Segment(right_top, right_bottom),
        ];

        for wheel in [wheel_left, wheel_right] {
            primitives.push(Primitive::Wheel(Circle::new(
                Point2::new(wheel.x, wheel.y - geometry.wheel_radius),
                geometry.wheel_radius,
            )));
        }

        for marker in [point_a, point_b, point_c, attachment] {
            primitives.push(Primitive::Marker(Circle::new(marker, MARKER_RADIUS)));
        }

        Self { primitives }
    }

    #[inline]
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Replay the scene onto a canvas.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        for primitive in &self.primitives {
            match primitive {
                Primitive::Segment(from, to) => canvas.line(*from, *to),
                Primitive::Wheel(circle) => canvas.circle(circle),
                Primitive::Marker(circle) => canvas.dot(circle),
            }
        }
    }
}
