/// Signed references to the three canonical spatial axes
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use nalgebra::{Unit, Vector3};
use nom::{
    character::complete::{anychar, one_of},
    combinator::{all_consuming, map, map_opt, opt},
    sequence::pair,
    IResult,
};

use crate::error::FrameError;

/// One of the canonical axes X, Y and Z
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AxisName {
    X,
    Y,
    Z,
}

impl AxisName {
    pub const ALL: [AxisName; 3] = [AxisName::X, AxisName::Y, AxisName::Z];

    /// Component index of this axis in an xyz vector
    pub const fn index(self) -> usize {
        match self {
            AxisName::X => 0,
            AxisName::Y => 1,
            AxisName::Z => 2,
        }
    }

    /// Case-insensitive conversion from an axis letter
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'X' => Some(AxisName::X),
            'Y' => Some(AxisName::Y),
            'Z' => Some(AxisName::Z),
            _ => None,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            AxisName::X => 'X',
            AxisName::Y => 'Y',
            AxisName::Z => 'Z',
        }
    }

    /// Canonical unit vector along this axis
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            AxisName::X => Vector3::x_axis(),
            AxisName::Y => Vector3::y_axis(),
            AxisName::Z => Vector3::z_axis(),
        }
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl FromStr for AxisName {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(axis_name)(s)
            .map(|(_, name)| name)
            .map_err(|_| FrameError::Format(s.to_string()))
    }
}

/// A signed axis, e.g. `-Z`
///
/// In a spatial axis set this says which physical direction a logical slot
/// (right, up or forward) points along. In a rotation order it names the
/// axis to rotate about and whether the rotation runs in the negative sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Axis {
    name: AxisName,
    negative: bool,
}

impl Axis {
    pub const fn new(name: AxisName, negative: bool) -> Self {
        Self { name, negative }
    }

    pub const fn positive(name: AxisName) -> Self {
        Self::new(name, false)
    }

    pub const fn negative(name: AxisName) -> Self {
        Self::new(name, true)
    }

    pub fn name(&self) -> AxisName {
        self.name
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// `-1.0` for a negative axis, `1.0` otherwise
    pub fn sign(&self) -> f64 {
        if self.negative {
            -1.0
        } else {
            1.0
        }
    }
}

impl Neg for Axis {
    type Output = Axis;

    fn neg(self) -> Axis {
        Axis::new(self.name, !self.negative)
    }
}

/// Renders `+X` / `-X`; the alternate form `{:#}` renders the bare letter.
impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{}{}", if self.negative { '-' } else { '+' }, self.name)
        }
    }
}

impl FromStr for Axis {
    type Err = FrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        all_consuming(signed_axis)(s)
            .map(|(_, axis)| axis)
            .map_err(|_| FrameError::Format(s.to_string()))
    }
}

pub(crate) fn axis_name(input: &str) -> IResult<&str, AxisName> {
    map_opt(anychar, AxisName::from_char)(input)
}

/// `[+-]?[XYZ]`, sign defaults to positive
pub(crate) fn signed_axis(input: &str) -> IResult<&str, Axis> {
    map(pair(opt(one_of("+-")), axis_name), |(sign, name)| {
        Axis::new(name, sign == Some('-'))
    })(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_name_case_insensitive() {
        assert_eq!(AxisName::from_char('x'), Some(AxisName::X));
        assert_eq!(AxisName::from_char('Z'), Some(AxisName::Z));
        assert_eq!(AxisName::from_char('u'), None);
        assert_eq!("y".parse::<AxisName>().unwrap(), AxisName::Y);
        assert!("xy".parse::<AxisName>().is_err());
    }

    #[test]
    fn test_axis_parse() {
        assert_eq!("-z".parse::<Axis>().unwrap(), Axis::negative(AxisName::Z));
        assert_eq!("+Y".parse::<Axis>().unwrap(), Axis::positive(AxisName::Y));
        assert_eq!("X".parse::<Axis>().unwrap(), Axis::positive(AxisName::X));
        assert!("--X".parse::<Axis>().is_err());
        assert!("W".parse::<Axis>().is_err());
    }

    #[test]
    fn test_negation_flips_sign_only() {
        let axis = Axis::positive(AxisName::Y);
        let flipped = -axis;
        assert_eq!(flipped.name(), AxisName::Y);
        assert!(flipped.is_negative());
        assert_eq!(-flipped, axis);
        assert_eq!(flipped.sign(), -1.0);
    }

    #[test]
    fn test_display() {
        let axis = Axis::negative(AxisName::X);
        assert_eq!(axis.to_string(), "-X");
        assert_eq!(format!("{:#}", axis), "X");
        assert_eq!(Axis::positive(AxisName::Z).to_string(), "+Z");
    }

    #[test]
    fn test_unit_vectors_match_index() {
        for name in AxisName::ALL {
            let unit = name.unit();
            assert_eq!(unit[name.index()], 1.0);
            assert_eq!(unit.norm(), 1.0);
        }
    }
}
