/// Ordered triples of signed axes
use std::fmt;
use std::ops::Index;

use nom::{combinator::all_consuming, sequence::tuple, IResult};
use tracing::trace;

use crate::axis::{signed_axis, Axis, AxisName};
use crate::error::FrameError;
use crate::extraction::EulerSequence;

/// How strictly an axis set is validated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxisSetKind {
    /// Right, up and forward; all three axis names must be distinct.
    Spatial,
    /// First, second and third rotation axis; the first and third may share
    /// a name (proper Euler orders such as `XYX`).
    RotationOrder,
}

/// Three signed axes, validated at construction and immutable afterwards
///
/// Either a spatial convention (which signed axis points right, up and
/// forward) or a rotation order (the first, second and third axis to rotate
/// about). Descriptors look like `"+X+Y-Z"`, `"XY-Z"` or `"-Z-X-Y"`: three
/// `[+-]?[XYZ]` tokens, case-insensitive, with a missing sign meaning
/// positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AxisSet {
    axes: [Axis; 3],
    sequence: EulerSequence,
}

impl AxisSet {
    /// The `+X+Y+Z` convention
    pub const REFERENCE: AxisSet = AxisSet {
        axes: [
            Axis::positive(AxisName::X),
            Axis::positive(AxisName::Y),
            Axis::positive(AxisName::Z),
        ],
        sequence: EulerSequence::Xyz,
    };

    /// Parse and validate a descriptor such as `"+X+Y-Z"`
    pub fn parse(descriptor: &str, kind: AxisSetKind) -> Result<Self, FrameError> {
        let axes = match all_consuming(axis_triple)(descriptor) {
            Ok((_, (a, b, c))) => [a, b, c],
            Err(_) => return Err(FrameError::Format(descriptor.to_uppercase())),
        };
        let set = Self::from_axes(axes, kind)?;
        trace!(descriptor, axes = %set, ?kind, "parsed axis set");
        Ok(set)
    }

    /// Parse a spatial convention (right, up, forward)
    pub fn spatial(descriptor: &str) -> Result<Self, FrameError> {
        Self::parse(descriptor, AxisSetKind::Spatial)
    }

    /// Parse a rotation order
    pub fn rotation_order(descriptor: &str) -> Result<Self, FrameError> {
        Self::parse(descriptor, AxisSetKind::RotationOrder)
    }

    /// Validate three axes directly, skipping the descriptor parser
    pub fn from_axes(axes: [Axis; 3], kind: AxisSetKind) -> Result<Self, FrameError> {
        let [first, middle, last] = axes.map(|axis| axis.name());
        let describe = || axes.iter().map(Axis::to_string).collect::<String>();

        let sequence = EulerSequence::from_names(first, middle, last)
            .ok_or_else(|| FrameError::RedundantMiddle(describe()))?;
        if kind == AxisSetKind::Spatial && sequence.is_proper() {
            return Err(FrameError::RedundantAxes(describe()));
        }

        Ok(Self { axes, sequence })
    }

    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    pub fn iter(&self) -> impl Iterator<Item = Axis> + '_ {
        self.axes.iter().copied()
    }

    /// Slot holding the given axis name, if any.
    ///
    /// Spatial sets hold every name exactly once. Proper rotation orders
    /// hold their outer name twice and report the last slot.
    pub fn position(&self, name: AxisName) -> Option<usize> {
        self.axes.iter().rposition(|axis| axis.name() == name)
    }

    /// Whether all three axis names are distinct
    pub fn is_spatial(&self) -> bool {
        !self.sequence.is_proper()
    }

    /// The unsigned axis names as an extraction sequence
    pub fn sequence(&self) -> EulerSequence {
        self.sequence
    }

    /// Every valid axis set of the given kind: 48 spatial conventions, or
    /// 96 rotation orders (12 sequences with 8 sign patterns each)
    pub fn all(kind: AxisSetKind) -> Vec<AxisSet> {
        let mut sets = Vec::new();
        for sequence in EulerSequence::ALL {
            if kind == AxisSetKind::Spatial && sequence.is_proper() {
                continue;
            }
            let names = sequence.names();
            for signs in 0..8u8 {
                let axes = [0, 1, 2].map(|i| Axis::new(names[i], signs & (1 << i) != 0));
                sets.push(AxisSet { axes, sequence });
            }
        }
        sets
    }
}

impl Index<usize> for AxisSet {
    type Output = Axis;

    fn index(&self, i: usize) -> &Axis {
        &self.axes[i]
    }
}

/// Renders `+X+Y-Z`; the alternate form `{:#}` drops the signs (`XYZ`).
impl fmt::Display for AxisSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for axis in &self.axes {
            if f.alternate() {
                write!(f, "{:#}", axis)?;
            } else {
                write!(f, "{}", axis)?;
            }
        }
        Ok(())
    }
}

fn axis_triple(input: &str) -> IResult<&str, (Axis, Axis, Axis)> {
    tuple((signed_axis, signed_axis, signed_axis))(input)
}
