/// Euler angle triples
use std::fmt;
use std::ops::{Index, IndexMut};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Three angles in degrees, positionally aligned with a rotation order.
///
/// Index `i` is the angle applied about the `i`-th axis of whichever
/// rotation order the angles are paired with; the triple itself carries no
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles([f64; 3]);

impl EulerAngles {
    pub const fn new(e0: f64, e1: f64, e2: f64) -> Self {
        Self([e0, e1, e2])
    }

    pub const fn zero() -> Self {
        Self([0.0; 3])
    }

    /// Build from radians, converting to degrees
    pub fn from_radians(angles: Vector3<f64>) -> Self {
        Self(angles.map(f64::to_degrees).into())
    }

    pub fn to_radians(&self) -> Vector3<f64> {
        Vector3::from(self.0).map(f64::to_radians)
    }

    pub fn as_array(&self) -> [f64; 3] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }
}

impl Index<usize> for EulerAngles {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl IndexMut<usize> for EulerAngles {
    fn index_mut(&mut self, i: usize) -> &mut f64 {
        &mut self.0[i]
    }
}

impl From<[f64; 3]> for EulerAngles {
    fn from(angles: [f64; 3]) -> Self {
        Self(angles)
    }
}

impl From<Vector3<f64>> for EulerAngles {
    fn from(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl From<EulerAngles> for Vector3<f64> {
    fn from(e: EulerAngles) -> Self {
        Vector3::from(e.0)
    }
}

/// `e0, e1, e2` with one decimal unless a precision is given
impl fmt::Display for EulerAngles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precision = f.precision().unwrap_or(1);
        write!(
            f,
            "{:.*}, {:.*}, {:.*}",
            precision, self.0[0], precision, self.0[1], precision, self.0[2]
        )
    }
}
