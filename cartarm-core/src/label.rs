use crate::kinematic::{GripperPoint, WorldPoints};
use crate::parameter::{ParameterId, RawParameters, LENGTH_SCALE};
use crate::Point;

/// Format a parameter value for display next to its slider.
///
/// Lengths are shown normalized with two decimals, angles as whole
/// degrees.
pub fn parameter(id: ParameterId, raw: &RawParameters) -> String {
    let value = raw.get(id);

    if id.is_angle() {
        format!("{}°", value)
    } else {
        format!("{:.2}", value as f64 / LENGTH_SCALE)
    }
}

/// Format a world point as `[x: 0.00, y: 0.00, 1]`.
pub fn point(point: &Point) -> String {
    format!("[x: {:.2}, y: {:.2}, 1]", point.x, point.y)
}

/// All labels for one evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Labels {
    /// Parameter labels in slider order.
    pub parameters: [(ParameterId, String); 5],
    pub point_a: String,
    pub point_b: String,
    pub point_c: String,
    pub point_d: String,
}

impl Labels {
    pub fn from_state(raw: &RawParameters, points: &WorldPoints) -> Self {
        Self {
            parameters: ParameterId::ALL.map(|id| (id, parameter(id, raw))),
            point_a: point(points.point_a()),
            point_b: point(points.point_b()),
            point_c: point(points.point_c()),
            point_d: point(points.gripper(GripperPoint::Attachment)),
        }
    }
}

impl std::fmt::Display for Labels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (id, label) in &self.parameters {
            writeln!(f, "{:<18} {} = {}", id.description(), id, label)?;
        }
        writeln!(f, "Reference point A: {}", self.point_a)?;
        writeln!(f, "Reference point B: {}", self.point_b)?;
        writeln!(f, "Reference point C: {}", self.point_c)?;
        write!(f, "Reference point D: {}", self.point_d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry;
    use crate::kinematic::evaluate;

    #[test]
    fn test_parameter_labels() {
        let raw = RawParameters {
            a: -36,
            b: 60,
            c: 45,
            d: 360,
            e: 100,
        };

        assert_eq!(parameter(ParameterId::A, &raw), "-0.18");
        assert_eq!(parameter(ParameterId::B, &raw), "0.30");
        assert_eq!(parameter(ParameterId::C, &raw), "45°");
        assert_eq!(parameter(ParameterId::D, &raw), "360°");
        assert_eq!(parameter(ParameterId::E, &raw), "0.50");
    }

    #[test]
    fn test_point_label() {
        assert_eq!(point(&geometry::point(0.126, -0.5)), "[x: 0.13, y: -0.50, 1]");
        assert_eq!(point(&geometry::point(0.0, 0.3)), "[x: 0.00, y: 0.30, 1]");
    }

    #[test]
    fn test_labels_from_state() {
        let raw = RawParameters {
            a: 0,
            b: 60,
            c: 0,
            d: 0,
            e: 60,
        };
        let points = evaluate(&raw.normalize());
        let labels = Labels::from_state(&raw, &points);

        assert_eq!(labels.point_a, "[x: 0.00, y: 0.00, 1]");
        assert_eq!(labels.point_b, "[x: 0.00, y: 0.30, 1]");
        assert_eq!(labels.point_c, "[x: 0.30, y: 0.30, 1]");
        assert_eq!(labels.point_d, "[x: 0.30, y: 0.00, 1]");
        assert_eq!(labels.parameters[2], (ParameterId::C, "0°".to_string()));
        assert!(labels.to_string().contains("Reference point D: [x: 0.30, y: 0.00, 1]"));
    }
}
