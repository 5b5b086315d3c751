//! Planar kinematic chain of the cart.
//!
//! Every joint is described by a [`Link`]: a transform, one or more local
//! offset vectors and the rules for how the link attaches to its parent.
//! Solving the chain walks the links in order while carrying a running
//! world offset, the position of the last accumulating link.

use nalgebra::{Translation2, Vector2};
use serde::{Deserialize, Serialize};

use crate::geometry::{point, Transform};
use crate::parameter::Parameters;
use crate::Point;

/// Joint names.
pub mod joint {
    pub const WHEEL_LEFT: &str = "wheel_left";
    pub const WHEEL_RIGHT: &str = "wheel_right";
    pub const POINT_A: &str = "point_a";
    pub const POINT_B: &str = "point_b";
    pub const POINT_C: &str = "point_c";
    pub const POINTS_D: &str = "points_d";
}

/// Where a link is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Anchor {
    /// Relative to the running offset of the chain.
    Chain,
    /// Relative to the world origin, outside of the chain.
    World,
}

#[derive(Clone, Debug)]
pub struct Link {
    name: String,
    transform: Transform,
    offsets: Vec<Point>,
    anchor: Anchor,
    accumulates: bool,
}

impl Link {
    /// Construct a new link with a single offset at the local origin.
    pub fn new(name: impl ToString, transform: Transform) -> Self {
        Self {
            name: name.to_string(),
            transform,
            offsets: vec![point(0.0, 0.0)],
            anchor: Anchor::Chain,
            accumulates: true,
        }
    }

    pub fn set_offset(mut self, offset: Point) -> Self {
        self.offsets = vec![offset];
        self
    }

    /// Cluster of points sharing the link transform.
    pub fn set_offsets(mut self, offsets: Vec<Point>) -> Self {
        self.offsets = offsets;
        self
    }

    /// Link does not become the base for subsequent links.
    pub fn terminal(mut self) -> Self {
        self.accumulates = false;
        self
    }

    /// Link hangs off the world origin instead of the chain. Implies terminal.
    pub fn independent(mut self) -> Self {
        self.anchor = Anchor::World;
        self.accumulates = false;
        self
    }
}

/// Ordered sequence of links.
#[derive(Clone, Debug, Default)]
pub struct Chain {
    links: Vec<Link>,
}

impl Chain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    /// Resolve all links into world coordinates.
    ///
    /// Each point is `offset · transform · local` where `offset` is the
    /// translation to the last accumulating link (or the world origin for
    /// independent links). Only the running translation is carried
    /// forward, rotations of earlier links do not compose into later ones.
    pub fn solve(&self) -> WorldPointMap {
        let mut running = Vector2::zeros();
        let mut map = WorldPointMap::default();

        for link in &self.links {
            let base = match link.anchor {
                Anchor::Chain => running,
                Anchor::World => Vector2::zeros(),
            };

            let matrix = Translation2::from(base).to_homogeneous() * link.transform.to_homogeneous();

            let points: Vec<Point> = link.offsets.iter().map(|local| matrix * local).collect();

            log::trace!(
                "Link {}: {} from ({:.2}, {:.2})",
                link.name,
                link.transform,
                base.x,
                base.y
            );

            if link.accumulates {
                if let Some(world) = points.first() {
                    running = world.xy();
                }
            }

            map.insert(link.name.clone(), points);
        }

        map
    }
}

/// Joint name to world coordinates, in chain order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldPointMap {
    entries: Vec<(String, Vec<Point>)>,
}

impl WorldPointMap {
    fn insert(&mut self, name: String, points: Vec<Point>) {
        match self.entries.iter_mut().find(|(entry, _)| entry == &name) {
            Some((_, slot)) => *slot = points,
            None => self.entries.push((name, points)),
        }
    }

    /// All points of a joint.
    pub fn get(&self, name: &str) -> Option<&[Point]> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, points)| points.as_slice())
    }

    /// First point of a joint.
    pub fn point(&self, name: &str) -> Option<&Point> {
        self.get(name).and_then(|points| points.first())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Point])> {
        self.entries
            .iter()
            .map(|(name, points)| (name.as_str(), points.as_slice()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Display for WorldPointMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (name, points) in self.iter() {
            write!(f, "{}=", name)?;
            for point in points {
                write!(f, "[{:.2}, {:.2}]", point.x, point.y)?;
            }
            write!(f, " ")?;
        }
        Ok(())
    }
}

/// Fixed dimensions of the cart.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartGeometry {
    /// Wheel radius.
    pub wheel_radius: f64,
    /// Distance between the wheel centers.
    pub axle_length: f64,
    /// Distance from B to C.
    pub mast_length: f64,
    /// Half the distance between the gripper fingers.
    pub finger_width: f64,
    /// Gripper finger length.
    pub finger_length: f64,
    /// Platform overhang beyond each wheel.
    pub platform_overhang: f64,
}

impl Default for CartGeometry {
    fn default() -> Self {
        Self {
            wheel_radius: 0.06,
            axle_length: 0.4,
            mast_length: 0.3,
            finger_width: 0.05,
            finger_length: 0.05,
            platform_overhang: 0.1,
        }
    }
}

/// Points of the gripper cluster, in cluster order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GripperPoint {
    Attachment = 0,
    LeftTop = 1,
    LeftBottom = 2,
    RightTop = 3,
    RightBottom = 4,
}

/// Number of points in the gripper cluster.
pub const GRIPPER_POINTS: usize = 5;

// Position of every joint in the cart chain.
const WHEEL_LEFT: usize = 0;
const WHEEL_RIGHT: usize = 1;
const POINT_A: usize = 2;
const POINT_B: usize = 3;
const POINT_C: usize = 4;
const POINTS_D: usize = 5;

/// The cart model.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cart {
    geometry: CartGeometry,
}

impl Cart {
    pub fn new(geometry: CartGeometry) -> Self {
        Self { geometry }
    }

    /// Gripper offsets relative to point C for extension `e`.
    pub fn gripper_offsets(&self, e: f64) -> Vec<Point> {
        let width = self.geometry.finger_width;
        let length = self.geometry.finger_length;

        vec![
            point(0.0, -e),
            point(-width, -e),
            point(-width, -e - length),
            point(width, -e),
            point(width, -e - length),
        ]
    }

    /// Build the kinematic chain for a parameter set.
    pub fn chain(&self, params: &Parameters) -> Chain {
        let half_axle = self.geometry.axle_length / 2.0;

        Chain::new()
            .attach(
                Link::new(joint::WHEEL_LEFT, Transform::Translation(params.a, 0.0))
                    .set_offset(point(-half_axle, 0.0))
                    .independent(),
            )
            .attach(
                Link::new(joint::WHEEL_RIGHT, Transform::Translation(params.a, 0.0))
                    .set_offset(point(half_axle, 0.0))
                    .independent(),
            )
            .attach(Link::new(
                joint::POINT_A,
                Transform::Translation(params.a, 0.0),
            ))
            .attach(Link::new(
                joint::POINT_B,
                Transform::Translation(0.0, params.b),
            ))
            .attach(
                Link::new(joint::POINT_C, Transform::Rotation(params.c_rad()))
                    .set_offset(point(self.geometry.mast_length, 0.0)),
            )
            .attach(
                Link::new(joint::POINTS_D, Transform::Rotation(params.d_rad()))
                    .set_offsets(self.gripper_offsets(params.e))
                    .terminal(),
            )
    }

    /// Evaluate the world position of every joint.
    pub fn evaluate(&self, params: &Parameters) -> WorldPoints {
        let points = WorldPoints {
            map: self.chain(params).solve(),
        };

        log::trace!("Evaluated {}: {}", params, points.map);

        points
    }
}

/// Evaluate the default cart.
#[inline]
pub fn evaluate(params: &Parameters) -> WorldPoints {
    Cart::default().evaluate(params)
}

/// World positions of all cart joints.
///
/// Only produced by [`Cart::evaluate`], which guarantees every joint is
/// present.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldPoints {
    map: WorldPointMap,
}

impl WorldPoints {
    #[inline]
    fn joint(&self, index: usize) -> &[Point] {
        &self.map.entries[index].1
    }

    #[inline]
    pub fn point_a(&self) -> &Point {
        &self.joint(POINT_A)[0]
    }

    #[inline]
    pub fn point_b(&self) -> &Point {
        &self.joint(POINT_B)[0]
    }

    #[inline]
    pub fn point_c(&self) -> &Point {
        &self.joint(POINT_C)[0]
    }

    /// The gripper cluster.
    #[inline]
    pub fn points_d(&self) -> &[Point] {
        self.joint(POINTS_D)
    }

    #[inline]
    pub fn gripper(&self, which: GripperPoint) -> &Point {
        &self.joint(POINTS_D)[which as usize]
    }

    #[inline]
    pub fn wheel_left(&self) -> &Point {
        &self.joint(WHEEL_LEFT)[0]
    }

    #[inline]
    pub fn wheel_right(&self) -> &Point {
        &self.joint(WHEEL_RIGHT)[0]
    }

    /// Lookup a joint by name.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&[Point]> {
        self.map.get(name)
    }

    #[inline]
    pub fn as_map(&self) -> &WorldPointMap {
        &self.map
    }
}

impl std::fmt::Display for WorldPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(lhs: &Point, rhs: &Point) {
        assert!(
            (lhs - rhs).norm() < TOLERANCE,
            "[{}, {}, {}] != [{}, {}, {}]",
            lhs.x,
            lhs.y,
            lhs.z,
            rhs.x,
            rhs.y,
            rhs.z
        );
    }

    #[test]
    fn test_determinism() {
        let params = Parameters::new(0.37, 0.41, 123.0, 271.0, 0.33);

        assert_eq!(evaluate(&params), evaluate(&params));
    }

    #[test]
    fn test_wheel_independence() {
        for params in [
            Parameters::new(0.0, 0.2, 0.0, 0.0, 0.2),
            Parameters::new(-1.0, 0.5, 180.0, 360.0, 0.5),
            Parameters::new(0.45, 0.3, 45.0, 90.0, 0.3),
        ] {
            let points = evaluate(&params);

            assert_eq!(*points.wheel_left(), point(-0.2 + params.a, 0.0));
            assert_eq!(*points.wheel_right(), point(0.2 + params.a, 0.0));
        }
    }

    #[test]
    fn test_chain_at_zero() {
        let points = evaluate(&Parameters::new(0.0, 0.0, 0.0, 0.0, 0.2));

        assert_eq!(*points.point_a(), point(0.0, 0.0));
        assert_eq!(*points.point_b(), *points.point_a());
        assert_close(points.point_c(), &point(0.3, 0.0));
    }

    #[test]
    fn test_chain_offsets() {
        let points = evaluate(&Parameters::new(0.25, 0.3, 0.0, 0.0, 0.2));

        assert_eq!(*points.point_a(), point(0.25, 0.0));
        assert_close(points.point_b(), &point(0.25, 0.3));
        assert_close(points.point_c(), &point(0.55, 0.3));
    }

    #[test]
    fn test_mast_rotation() {
        let points = evaluate(&Parameters::new(0.1, 0.3, 90.0, 0.0, 0.2));

        let point_b = points.point_b();
        let point_c = points.point_c();
        assert!((point_c.x - point_b.x).abs() < TOLERANCE);
        assert!((point_c.y - (point_b.y + 0.3)).abs() < TOLERANCE);
    }

    #[test]
    fn test_homogeneous_component() {
        let points = evaluate(&Parameters::new(-0.5, 0.45, 170.0, 300.0, 0.4));

        for (_, joint) in points.as_map().iter() {
            for point in joint {
                assert_eq!(point.z, 1.0);
            }
        }
    }

    #[test]
    fn test_gripper_hangs_down() {
        let e = 0.3;
        let points = evaluate(&Parameters::new(0.0, 0.3, 90.0, 0.0, e));

        let point_c = points.point_c();
        let attachment = points.gripper(GripperPoint::Attachment);
        assert_close(attachment, &point(point_c.x, point_c.y - e));
        assert_close(
            points.gripper(GripperPoint::LeftBottom),
            &point(point_c.x - 0.05, point_c.y - e - 0.05),
        );
        assert_close(
            points.gripper(GripperPoint::RightTop),
            &point(point_c.x + 0.05, point_c.y - e),
        );
    }

    #[test]
    fn test_gripper_flipped() {
        let e = 0.25;
        let points = evaluate(&Parameters::new(0.0, 0.3, 45.0, 180.0, e));

        let point_c = points.point_c();
        assert_close(
            points.gripper(GripperPoint::Attachment),
            &point(point_c.x, point_c.y + e),
        );
    }

    #[test]
    fn test_gripper_rigid() {
        let reference = evaluate(&Parameters::new(0.0, 0.3, 45.0, 0.0, 0.3));

        for d in [30.0, 90.0, 200.0, 359.0] {
            let points = evaluate(&Parameters::new(0.0, 0.3, 45.0, d, 0.3));

            for (lhs, rhs) in points.points_d().iter().zip(reference.points_d()) {
                let distance = (lhs - points.gripper(GripperPoint::Attachment)).norm();
                let expected = (rhs - reference.gripper(GripperPoint::Attachment)).norm();
                assert!((distance - expected).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn test_gripper_terminal() {
        let chain = Cart::default().chain(&Parameters::new(0.0, 0.3, 45.0, 45.0, 0.3));
        let map = chain
            .attach(Link::new("tip", Transform::Translation(0.0, 0.0)))
            .solve();

        assert_eq!(map.point("tip"), map.point(joint::POINT_C));
    }

    #[test]
    fn test_map_names() {
        let points = evaluate(&Parameters::new(0.0, 0.3, 45.0, 45.0, 0.3));

        let names: Vec<&str> = points.as_map().iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                joint::WHEEL_LEFT,
                joint::WHEEL_RIGHT,
                joint::POINT_A,
                joint::POINT_B,
                joint::POINT_C,
                joint::POINTS_D,
            ]
        );
        assert_eq!(points.get(joint::POINTS_D).map(|p| p.len()), Some(GRIPPER_POINTS));
        assert_eq!(points.get(joint::POINT_A), Some(std::slice::from_ref(points.point_a())));
        assert!(points.get("point_z").is_none());
    }

    #[test]
    fn test_custom_geometry() {
        let cart = Cart::new(CartGeometry {
            axle_length: 1.0,
            mast_length: 0.5,
            ..Default::default()
        });
        let points = cart.evaluate(&Parameters::new(0.0, 0.2, 0.0, 0.0, 0.2));

        assert_eq!(*points.wheel_left(), point(-0.5, 0.0));
        assert_close(points.point_c(), &point(0.5, 0.2));
    }

    #[test]
    fn test_empty_chain() {
        assert!(Chain::new().solve().is_empty());
    }
}
