/// frameconv core library - axis conventions and rotation conversions
///
/// This library provides the stateless core: parsing axis descriptors,
/// converting positions between spatial conventions, and converting Euler
/// angles between rotation orders and coordinate frames.

pub mod axis;
pub mod axis_set;
pub mod conversions;
pub mod error;
pub mod euler;
pub mod extraction;
pub mod frame;

// Re-export commonly used types
pub use axis::{Axis, AxisName};
pub use axis_set::{AxisSet, AxisSetKind};
pub use conversions::{
    convert_euler_angles, convert_euler_order, convert_position, convert_position_str,
    equivalent_rotation_order, extract_euler_angles, extract_euler_angles_with_solution,
    to_quaternion,
};
pub use error::FrameError;
pub use euler::EulerAngles;
pub use extraction::{EulerSequence, Extraction, Solution, GIMBAL_EPSILON};
pub use frame::{CoordinateFrame, CoordinateFrameConverter, FrameDescriptor};
