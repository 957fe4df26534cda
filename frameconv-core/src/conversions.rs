/// Conversions of positions and rotations between axis conventions
use nalgebra::{UnitQuaternion, Vector3};
use tracing::{debug, trace};

use crate::axis::Axis;
use crate::axis_set::{AxisSet, AxisSetKind};
use crate::error::FrameError;
use crate::euler::EulerAngles;
use crate::extraction::Solution;
use crate::frame::CoordinateFrame;

/// Re-express a position given in the `from` convention in the `to`
/// convention. This is a signed permutation of the components.
pub fn convert_position(from: &AxisSet, to: &AxisSet, v: &Vector3<f64>) -> Vector3<f64> {
    let mut res = Vector3::zeros();

    // Walk right, up, forward
    for (from_axis, to_axis) in from.iter().zip(to.iter()) {
        let value = v[from_axis.name().index()];
        res[to_axis.name().index()] = if from_axis.is_negative() == to_axis.is_negative() {
            value
        } else {
            -value
        };
    }
    res
}

/// [`convert_position`] for spatial descriptors such as `"+X+Y-Z"`
pub fn convert_position_str(
    from: &str,
    to: &str,
    v: &Vector3<f64>,
) -> Result<Vector3<f64>, FrameError> {
    Ok(convert_position(
        &AxisSet::spatial(from)?,
        &AxisSet::spatial(to)?,
        v,
    ))
}

/// Compose the rotation described by `angles` (degrees) about `order`
///
/// The first axis of the order is applied first to a vector, so angles
/// `(e0, e1, e2)` about `(a0, a1, a2)` give `R(a2) * R(a1) * R(a0)`. The
/// rotation sense is clockwise: each elementary rotation is built from the
/// negated angle, and a negative axis in the order flips its angle once more.
pub fn to_quaternion(order: &AxisSet, angles: &EulerAngles) -> UnitQuaternion<f64> {
    order
        .iter()
        .zip(angles.iter())
        .fold(UnitQuaternion::identity(), |res, (axis, angle)| {
            let signed = axis.sign() * angle;
            UnitQuaternion::from_axis_angle(&axis.name().unit(), -signed.to_radians()) * res
        })
}

/// Extract Euler angles (degrees) about `order` from a rotation
pub fn extract_euler_angles(order: &AxisSet, quat: &UnitQuaternion<f64>) -> EulerAngles {
    extract_euler_angles_with_solution(order, quat).0
}

/// [`extract_euler_angles`], also reporting whether the angles are unique
pub fn extract_euler_angles_with_solution(
    order: &AxisSet,
    quat: &UnitQuaternion<f64>,
) -> (EulerAngles, Solution) {
    // The extractors expect counter-clockwise rotations, which is the
    // inverse of how `to_quaternion` composes them.
    let matrix = quat.inverse().to_rotation_matrix().into_inner();
    let extraction = order.sequence().extract(&matrix);
    if !extraction.is_unique() {
        debug!(
            %order,
            solution = ?extraction.solution,
            "gimbal lock, third angle pinned to zero"
        );
    }

    let mut res = EulerAngles::from_radians(extraction.angles);
    for (i, axis) in order.iter().enumerate() {
        if axis.is_negative() {
            res[i] = -res[i];
        }
    }
    (res, extraction.solution)
}

/// Re-express angles about one rotation order as angles about another,
/// within the same axis convention
pub fn convert_euler_order(from: &AxisSet, to: &AxisSet, angles: &EulerAngles) -> EulerAngles {
    extract_euler_angles(to, &to_quaternion(from, angles))
}

/// Find the rotation order in the `to_axes` convention that rotates about
/// the same physical directions as `order` does in the `from_axes`
/// convention.
///
/// Each axis of the order keeps its slot (right, up or forward) but takes
/// the name `to_axes` gives that slot. Its sign flips for every convention
/// that points the slot along a negative axis.
pub fn equivalent_rotation_order(
    from_axes: &AxisSet,
    to_axes: &AxisSet,
    order: &AxisSet,
) -> Result<AxisSet, FrameError> {
    for axes in [from_axes, to_axes] {
        if !axes.is_spatial() {
            return Err(FrameError::RedundantAxes(axes.to_string()));
        }
    }

    let mut remapped = *order.axes();
    for target in remapped.iter_mut() {
        let slot = from_axes
            .position(target.name())
            .ok_or_else(|| FrameError::RedundantAxes(from_axes.to_string()))?;
        let (source, dest) = (from_axes[slot], to_axes[slot]);
        let negative = target.is_negative() ^ source.is_negative() ^ dest.is_negative();
        *target = Axis::new(dest.name(), negative);
    }

    let remapped = AxisSet::from_axes(remapped, AxisSetKind::RotationOrder)?;
    trace!(%from_axes, %to_axes, %order, %remapped, "remapped rotation order");
    Ok(remapped)
}

/// Convert Euler angles given in one coordinate frame into the angles that
/// describe the same orientation in another.
///
/// Both rotation orders are first re-expressed in the shared `+X+Y+Z`
/// convention; the rotation is composed with the source order and
/// extracted with the destination order there.
pub fn convert_euler_angles(
    from: &CoordinateFrame,
    to: &CoordinateFrame,
    angles: &EulerAngles,
) -> EulerAngles {
    extract_euler_angles(to.reference_order(), &from.orientation(angles))
}
