use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Slider ticks per unit length.
pub const LENGTH_SCALE: f64 = 200.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterId {
    /// Horizontal cart offset.
    A,
    /// Mast extension from A to B.
    B,
    /// Mast rotation angle.
    C,
    /// Gripper rotation angle.
    D,
    /// Gripper arm extension.
    E,
}

impl ParameterId {
    pub const ALL: [ParameterId; 5] = [Self::A, Self::B, Self::C, Self::D, Self::E];

    /// Valid raw slider range.
    pub fn range(&self) -> RangeInclusive<i32> {
        match self {
            Self::A => -200..=200,
            Self::B => 40..=100,
            Self::C => 0..=180,
            Self::D => 0..=360,
            Self::E => 40..=100,
        }
    }

    /// Whether the raw value is an angle in degrees.
    pub fn is_angle(&self) -> bool {
        matches!(self, Self::C | Self::D)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::A => "Horizontal offset",
            Self::B => "Mast height",
            Self::C => "Mast rotation",
            Self::D => "Gripper rotation",
            Self::E => "Gripper extension",
        }
    }

    /// Clamp a raw value into the slider range.
    pub fn clamp(&self, value: i32) -> i32 {
        let range = self.range();
        value.clamp(*range.start(), *range.end())
    }
}

impl std::fmt::Display for ParameterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::A => "a",
            Self::B => "b",
            Self::C => "c",
            Self::D => "d",
            Self::E => "e",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for ParameterId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            _ => Err(format!("unknown parameter '{}'", s)),
        }
    }
}

/// Raw slider positions.
///
/// Lengths are in slider ticks, angles in whole degrees.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawParameters {
    pub a: i32,
    pub b: i32,
    pub c: i32,
    pub d: i32,
    pub e: i32,
}

impl Default for RawParameters {
    fn default() -> Self {
        Self {
            a: 0,
            b: 60,
            c: 45,
            d: 45,
            e: 60,
        }
    }
}

impl RawParameters {
    #[inline]
    pub fn get(&self, id: ParameterId) -> i32 {
        match id {
            ParameterId::A => self.a,
            ParameterId::B => self.b,
            ParameterId::C => self.c,
            ParameterId::D => self.d,
            ParameterId::E => self.e,
        }
    }

    #[inline]
    pub fn set(&mut self, id: ParameterId, value: i32) {
        match id {
            ParameterId::A => self.a = value,
            ParameterId::B => self.b = value,
            ParameterId::C => self.c = value,
            ParameterId::D => self.d = value,
            ParameterId::E => self.e = value,
        }
    }

    /// Copy with every value clamped into its slider range.
    pub fn clamped(mut self) -> Self {
        for id in ParameterId::ALL {
            self.set(id, id.clamp(self.get(id)));
        }
        self
    }

    /// Convert slider positions into evaluator parameters.
    pub fn normalize(&self) -> Parameters {
        Parameters {
            a: self.a as f64 / LENGTH_SCALE,
            b: self.b as f64 / LENGTH_SCALE,
            c_deg: self.c as f64,
            d_deg: self.d as f64,
            e: self.e as f64 / LENGTH_SCALE,
        }
    }
}

/// Kinematic parameters as consumed by the chain evaluator.
///
/// Lengths are in world units, angles in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Horizontal cart offset, `[-1.0, 1.0]`.
    pub a: f64,
    /// Mast extension, `[0.2, 0.5]`.
    pub b: f64,
    /// Mast rotation, `[0, 180]` degrees.
    pub c_deg: f64,
    /// Gripper rotation, `[0, 360]` degrees.
    pub d_deg: f64,
    /// Gripper arm extension, `[0.2, 0.5]`.
    pub e: f64,
}

impl Parameters {
    pub fn new(a: f64, b: f64, c_deg: f64, d_deg: f64, e: f64) -> Self {
        Self {
            a,
            b,
            c_deg,
            d_deg,
            e,
        }
    }

    #[inline]
    pub fn c_rad(&self) -> f64 {
        self.c_deg.to_radians()
    }

    #[inline]
    pub fn d_rad(&self) -> f64 {
        self.d_deg.to_radians()
    }
}

impl From<RawParameters> for Parameters {
    fn from(raw: RawParameters) -> Self {
        raw.normalize()
    }
}

impl std::fmt::Display for Parameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "a={:.2} b={:.2} c={:.0}° d={:.0}° e={:.2}",
            self.a, self.b, self.c_deg, self.d_deg, self.e
        )
    }
}
