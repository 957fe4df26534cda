/// Coordinate frames and converters between them
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::axis_set::AxisSet;
use crate::conversions::{
    convert_euler_angles, convert_position, equivalent_rotation_order, to_quaternion,
};
use crate::error::FrameError;
use crate::euler::EulerAngles;

/// A complete convention: how positions are named and how rotations are
/// composed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FrameDescriptor", into = "FrameDescriptor")]
pub struct CoordinateFrame {
    axes: AxisSet,
    rotation_order: AxisSet,
    // `rotation_order` re-expressed in `AxisSet::REFERENCE`
    reference_order: AxisSet,
}

impl CoordinateFrame {
    /// Build a frame from a spatial descriptor and a rotation order
    /// descriptor, e.g. `("+X+Y-Z", "-Z-X-Y")`
    pub fn new(axes: &str, rotation_order: &str) -> Result<Self, FrameError> {
        Self::from_axis_sets(AxisSet::spatial(axes)?, AxisSet::rotation_order(rotation_order)?)
    }

    pub fn from_axis_sets(axes: AxisSet, rotation_order: AxisSet) -> Result<Self, FrameError> {
        let reference_order =
            equivalent_rotation_order(&axes, &AxisSet::REFERENCE, &rotation_order)?;
        Ok(Self {
            axes,
            rotation_order,
            reference_order,
        })
    }

    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    pub fn rotation_order(&self) -> &AxisSet {
        &self.rotation_order
    }

    /// The rotation order as it reads in the `+X+Y+Z` convention
    pub fn reference_order(&self) -> &AxisSet {
        &self.reference_order
    }

    /// Orientation described by `angles`, expressed in the `+X+Y+Z`
    /// convention so orientations of different frames can be compared
    pub fn orientation(&self, angles: &EulerAngles) -> UnitQuaternion<f64> {
        to_quaternion(&self.reference_order, angles)
    }

    /// Re-express a position in this frame as a position in `other`
    pub fn convert_position_to(
        &self,
        other: &CoordinateFrame,
        v: &Vector3<f64>,
    ) -> Vector3<f64> {
        convert_position(&self.axes, &other.axes, v)
    }

    /// Re-express Euler angles in this frame as Euler angles in `other`
    pub fn convert_euler_angles_to(
        &self,
        other: &CoordinateFrame,
        angles: &EulerAngles,
    ) -> EulerAngles {
        convert_euler_angles(self, other, angles)
    }
}

impl fmt::Display for CoordinateFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#}, {:#}", self.axes, self.rotation_order)
        } else {
            write!(f, "{}, {}", self.axes, self.rotation_order)
        }
    }
}

/// Serialized form of a [`CoordinateFrame`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDescriptor {
    pub axes: String,
    pub rotation_order: String,
}

impl TryFrom<FrameDescriptor> for CoordinateFrame {
    type Error = FrameError;

    fn try_from(descriptor: FrameDescriptor) -> Result<Self, Self::Error> {
        CoordinateFrame::new(&descriptor.axes, &descriptor.rotation_order)
    }
}

impl From<CoordinateFrame> for FrameDescriptor {
    fn from(frame: CoordinateFrame) -> Self {
        Self {
            axes: frame.axes.to_string(),
            rotation_order: frame.rotation_order.to_string(),
        }
    }
}

/// Converts positions and rotations from one frame to another
#[derive(Debug, Clone)]
pub struct CoordinateFrameConverter {
    from: CoordinateFrame,
    to: CoordinateFrame,
    inverse: OnceLock<Box<CoordinateFrameConverter>>,
}

impl CoordinateFrameConverter {
    pub fn new(from: CoordinateFrame, to: CoordinateFrame) -> Self {
        Self {
            from,
            to,
            inverse: OnceLock::new(),
        }
    }

    /// Build both frames from descriptors
    pub fn from_descriptors(
        from_axes: &str,
        from_rotation_order: &str,
        to_axes: &str,
        to_rotation_order: &str,
    ) -> Result<Self, FrameError> {
        Ok(Self::new(
            CoordinateFrame::new(from_axes, from_rotation_order)?,
            CoordinateFrame::new(to_axes, to_rotation_order)?,
        ))
    }

    pub fn from(&self) -> &CoordinateFrame {
        &self.from
    }

    pub fn to(&self) -> &CoordinateFrame {
        &self.to
    }

    /// The converter running the other way, built on first use
    pub fn inverse(&self) -> &CoordinateFrameConverter {
        self.inverse
            .get_or_init(|| Box::new(CoordinateFrameConverter::new(self.to, self.from)))
    }

    pub fn convert_position(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.from.convert_position_to(&self.to, v)
    }

    pub fn convert_euler_angles(&self, angles: &EulerAngles) -> EulerAngles {
        self.from.convert_euler_angles_to(&self.to, angles)
    }
}

impl PartialEq for CoordinateFrameConverter {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl Eq for CoordinateFrameConverter {}

impl Hash for CoordinateFrameConverter {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl fmt::Display for CoordinateFrameConverter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            write!(f, "{:#} to {:#}", self.from, self.to)
        } else {
            write!(f, "{} to {}", self.from, self.to)
        }
    }
}
