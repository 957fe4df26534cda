/// Closed-form Euler angle extraction from rotation matrices
use std::f64::consts::{FRAC_PI_2, PI};
use std::fmt;

use nalgebra::{Matrix3, Vector3};

use crate::axis::AxisName;

/// Width of the band around ±1 treated as gimbal lock.
///
/// Matrices rebuilt from quaternions carry rounding error around 1e-15, so
/// an exact comparison against 1 would hand `asin`/`acos` arguments just
/// outside their domain. The band stays this narrow because its width is
/// also the largest middle-angle error the lock branch can introduce: a
/// sine or cosine of `1 - ε` is `acos(1 - ε) ≈ sqrt(2ε)` radians from the
/// singularity, about 2.6e-3° for 1e-9 but 8e-2° for 1e-6.
pub const GIMBAL_EPSILON: f64 = 1e-9;

const UPPER: f64 = 1.0 - GIMBAL_EPSILON;
const LOWER: f64 = -1.0 + GIMBAL_EPSILON;

/// Whether an extraction recovered the angles uniquely
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Solution {
    Unique,
    /// Only `θ2 - θ0` is determined; `θ2` was set to zero.
    NotUniqueDifference,
    /// Only `θ2 + θ0` is determined; `θ2` was set to zero.
    NotUniqueSum,
}

/// Angles (radians) recovered by an extractor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extraction {
    pub angles: Vector3<f64>,
    pub solution: Solution,
}

impl Extraction {
    fn unique(first: f64, middle: f64, last: f64) -> Self {
        Self {
            angles: Vector3::new(first, middle, last),
            solution: Solution::Unique,
        }
    }

    fn difference(first: f64, middle: f64) -> Self {
        Self {
            angles: Vector3::new(first, middle, 0.0),
            solution: Solution::NotUniqueDifference,
        }
    }

    fn sum(first: f64, middle: f64) -> Self {
        Self {
            angles: Vector3::new(first, middle, 0.0),
            solution: Solution::NotUniqueSum,
        }
    }

    pub fn is_unique(&self) -> bool {
        self.solution == Solution::Unique
    }
}

/// The twelve unsigned rotation sequences
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EulerSequence {
    Xyz,
    Xzy,
    Yxz,
    Yzx,
    Zxy,
    Zyx,
    Xyx,
    Xzx,
    Yxy,
    Yzy,
    Zxz,
    Zyz,
}

impl EulerSequence {
    pub const ALL: [EulerSequence; 12] = [
        EulerSequence::Xyz,
        EulerSequence::Xzy,
        EulerSequence::Yxz,
        EulerSequence::Yzx,
        EulerSequence::Zxy,
        EulerSequence::Zyx,
        EulerSequence::Xyx,
        EulerSequence::Xzx,
        EulerSequence::Yxy,
        EulerSequence::Yzy,
        EulerSequence::Zxz,
        EulerSequence::Zyz,
    ];

    /// Sequence for three axis names, or `None` when the middle axis repeats
    /// a neighbour
    pub fn from_names(first: AxisName, middle: AxisName, last: AxisName) -> Option<Self> {
        use AxisName::{X, Y, Z};

        let sequence = match (first, middle, last) {
            (X, Y, Z) => EulerSequence::Xyz,
            (X, Z, Y) => EulerSequence::Xzy,
            (Y, X, Z) => EulerSequence::Yxz,
            (Y, Z, X) => EulerSequence::Yzx,
            (Z, X, Y) => EulerSequence::Zxy,
            (Z, Y, X) => EulerSequence::Zyx,
            (X, Y, X) => EulerSequence::Xyx,
            (X, Z, X) => EulerSequence::Xzx,
            (Y, X, Y) => EulerSequence::Yxy,
            (Y, Z, Y) => EulerSequence::Yzy,
            (Z, X, Z) => EulerSequence::Zxz,
            (Z, Y, Z) => EulerSequence::Zyz,
            _ => return None,
        };
        Some(sequence)
    }

    pub fn names(self) -> [AxisName; 3] {
        use AxisName::{X, Y, Z};

        match self {
            EulerSequence::Xyz => [X, Y, Z],
            EulerSequence::Xzy => [X, Z, Y],
            EulerSequence::Yxz => [Y, X, Z],
            EulerSequence::Yzx => [Y, Z, X],
            EulerSequence::Zxy => [Z, X, Y],
            EulerSequence::Zyx => [Z, Y, X],
            EulerSequence::Xyx => [X, Y, X],
            EulerSequence::Xzx => [X, Z, X],
            EulerSequence::Yxy => [Y, X, Y],
            EulerSequence::Yzy => [Y, Z, Y],
            EulerSequence::Zxz => [Z, X, Z],
            EulerSequence::Zyz => [Z, Y, Z],
        }
    }

    /// Proper Euler sequences repeat the first axis as the third
    pub fn is_proper(self) -> bool {
        let [first, _, last] = self.names();
        first == last
    }

    /// Extract the angles of this sequence from a rotation matrix
    ///
    /// `r` must be `R_a(θ0) * R_b(θ1) * R_c(θ2)` built from right-handed
    /// elementary rotations about the axes of the sequence (`a`, `b`, `c`);
    /// the result is `(θ0, θ1, θ2)` in radians.
    ///
    /// When the middle angle sits on a singularity (±90° for Tait-Bryan
    /// sequences, 0° or 180° for proper Euler sequences) only the sum or the
    /// difference of the outer angles is determined. The third angle is then
    /// pinned to zero and the whole combined angle is folded into the first.
    pub fn extract(self, r: &Matrix3<f64>) -> Extraction {
        match self {
            EulerSequence::Xyz => extract_xyz(r),
            EulerSequence::Xzy => extract_xzy(r),
            EulerSequence::Yxz => extract_yxz(r),
            EulerSequence::Yzx => extract_yzx(r),
            EulerSequence::Zxy => extract_zxy(r),
            EulerSequence::Zyx => extract_zyx(r),
            EulerSequence::Xyx => extract_xyx(r),
            EulerSequence::Xzx => extract_xzx(r),
            EulerSequence::Yxy => extract_yxy(r),
            EulerSequence::Yzy => extract_yzy(r),
            EulerSequence::Zxz => extract_zxz(r),
            EulerSequence::Zyz => extract_zyz(r),
        }
    }
}

impl fmt::Display for EulerSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.names();
        write!(f, "{}{}{}", a, b, c)
    }
}

// +-           -+   +-                                        -+
// | r00 r01 r02 |   |  cy*cz           -cy*sz            sy    |
// | r10 r11 r12 | = |  cz*sx*sy+cx*sz   cx*cz-sx*sy*sz  -cy*sx |
// | r20 r21 r22 |   | -cx*cz*sy+sx*sz   cz*sx+cx*sy*sz   cx*cy |
// +-           -+   +-                                        -+
pub fn extract_xyz(r: &Matrix3<f64>) -> Extraction {
    let s = r[(0, 2)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                (-r[(1, 2)]).atan2(r[(2, 2)]),
                s.asin(),
                (-r[(0, 1)]).atan2(r[(0, 0)]),
            )
        } else {
            // z - x = atan2(r10, r11)
            Extraction::difference(-r[(1, 0)].atan2(r[(1, 1)]), -FRAC_PI_2)
        }
    } else {
        // z + x = atan2(r10, r11)
        Extraction::sum(r[(1, 0)].atan2(r[(1, 1)]), FRAC_PI_2)
    }
}

// +-           -+   +-                                        -+
// | r00 r01 r02 |   |  cy*cz           -sz      cz*sy          |
// | r10 r11 r12 | = |  sx*sy+cx*cy*sz   cx*cz  -cy*sx+cx*sy*sz |
// | r20 r21 r22 |   | -cx*sy+cy*sx*sz   cz*sx   cx*cy+sx*sy*sz |
// +-           -+   +-                                        -+
pub fn extract_xzy(r: &Matrix3<f64>) -> Extraction {
    let s = r[(0, 1)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                r[(2, 1)].atan2(r[(1, 1)]),
                (-s).asin(),
                r[(0, 2)].atan2(r[(0, 0)]),
            )
        } else {
            // y - x = atan2(-r20, r22)
            Extraction::difference(-(-r[(2, 0)]).atan2(r[(2, 2)]), FRAC_PI_2)
        }
    } else {
        // y + x = atan2(-r20, r22)
        Extraction::sum((-r[(2, 0)]).atan2(r[(2, 2)]), -FRAC_PI_2)
    }
}

// +-           -+   +-                                       -+
// | r00 r01 r02 |   |  cy*cz+sx*sy*sz  cz*sx*sy-cy*sz   cx*sy |
// | r10 r11 r12 | = |  cx*sz           cx*cz           -sx    |
// | r20 r21 r22 |   | -cz*sy+cy*sx*sz  cy*cz*sx+sy*sz   cx*cy |
// +-           -+   +-                                       -+
pub fn extract_yxz(r: &Matrix3<f64>) -> Extraction {
    let s = r[(1, 2)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                r[(0, 2)].atan2(r[(2, 2)]),
                (-s).asin(),
                r[(1, 0)].atan2(r[(1, 1)]),
            )
        } else {
            // z - y = atan2(-r01, r00)
            Extraction::difference(-(-r[(0, 1)]).atan2(r[(0, 0)]), FRAC_PI_2)
        }
    } else {
        // z + y = atan2(-r01, r00)
        Extraction::sum((-r[(0, 1)]).atan2(r[(0, 0)]), -FRAC_PI_2)
    }
}

// +-           -+   +-                                       -+
// | r00 r01 r02 |   |  cy*cz  sx*sy-cx*cy*sz   cx*sy+cy*sx*sz |
// | r10 r11 r12 | = |  sz     cx*cz           -cz*sx          |
// | r20 r21 r22 |   | -cz*sy  cy*sx+cx*sy*sz   cx*cy-sx*sy*sz |
// +-           -+   +-                                       -+
pub fn extract_yzx(r: &Matrix3<f64>) -> Extraction {
    let s = r[(1, 0)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                (-r[(2, 0)]).atan2(r[(0, 0)]),
                s.asin(),
                (-r[(1, 2)]).atan2(r[(1, 1)]),
            )
        } else {
            // x - y = atan2(r21, r22)
            Extraction::difference(-r[(2, 1)].atan2(r[(2, 2)]), -FRAC_PI_2)
        }
    } else {
        // x + y = atan2(r21, r22)
        Extraction::sum(r[(2, 1)].atan2(r[(2, 2)]), FRAC_PI_2)
    }
}

// +-           -+   +-                                        -+
// | r00 r01 r02 |   |  cy*cz-sx*sy*sz  -cx*sz   cz*sy+cy*sx*sz |
// | r10 r11 r12 | = |  cz*sx*sy+cy*sz   cx*cz  -cy*cz*sx+sy*sz |
// | r20 r21 r22 |   | -cx*sy            sx      cx*cy          |
// +-           -+   +-                                        -+
pub fn extract_zxy(r: &Matrix3<f64>) -> Extraction {
    let s = r[(2, 1)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                (-r[(0, 1)]).atan2(r[(1, 1)]),
                s.asin(),
                (-r[(2, 0)]).atan2(r[(2, 2)]),
            )
        } else {
            // y - z = atan2(r02, r00)
            Extraction::difference(-r[(0, 2)].atan2(r[(0, 0)]), -FRAC_PI_2)
        }
    } else {
        // y + z = atan2(r02, r00)
        Extraction::sum(r[(0, 2)].atan2(r[(0, 0)]), FRAC_PI_2)
    }
}

// +-           -+   +-                                      -+
// | r00 r01 r02 |   |  cy*cz  cz*sx*sy-cx*sz  cx*cz*sy+sx*sz |
// | r10 r11 r12 | = |  cy*sz  cx*cz+sx*sy*sz -cz*sx+cx*sy*sz |
// | r20 r21 r22 |   | -sy     cy*sx           cx*cy          |
// +-           -+   +-                                      -+
pub fn extract_zyx(r: &Matrix3<f64>) -> Extraction {
    let s = r[(2, 0)];
    if s < UPPER {
        if s > LOWER {
            Extraction::unique(
                r[(1, 0)].atan2(r[(0, 0)]),
                (-s).asin(),
                r[(2, 1)].atan2(r[(2, 2)]),
            )
        } else {
            // x - z = atan2(r01, r02)
            Extraction::difference(-r[(0, 1)].atan2(r[(0, 2)]), FRAC_PI_2)
        }
    } else {
        // x + z = atan2(-r01, -r02)
        Extraction::sum((-r[(0, 1)]).atan2(-r[(0, 2)]), -FRAC_PI_2)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   |  cy      sy*sx1               sy*cx1             |
// | r10 r11 r12 | = |  sy*sx0  cx0*cx1-cy*sx0*sx1  -cy*cx1*sx0-cx0*sx1 |
// | r20 r21 r22 |   | -sy*cx0  cx1*sx0+cy*cx0*sx1   cy*cx0*cx1-sx0*sx1 |
// +-           -+   +-                                                -+
pub fn extract_xyx(r: &Matrix3<f64>) -> Extraction {
    let c = r[(0, 0)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(1, 0)].atan2(-r[(2, 0)]),
                c.acos(),
                r[(0, 1)].atan2(r[(0, 2)]),
            )
        } else {
            // x1 - x0 = atan2(-r12, r11)
            Extraction::difference(-(-r[(1, 2)]).atan2(r[(1, 1)]), PI)
        }
    } else {
        // x1 + x0 = atan2(-r12, r11)
        Extraction::sum((-r[(1, 2)]).atan2(r[(1, 1)]), 0.0)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   | cz      -sz*cx1               sz*sx1             |
// | r10 r11 r12 | = | sz*cx0   cz*cx0*cx1-sx0*sx1  -cx1*sx0-cz*cx0*sx1 |
// | r20 r21 r22 |   | sz*sx0   cz*cx1*sx0+cx0*sx1   cx0*cx1-cz*sx0*sx1 |
// +-           -+   +-                                                -+
pub fn extract_xzx(r: &Matrix3<f64>) -> Extraction {
    let c = r[(0, 0)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(2, 0)].atan2(r[(1, 0)]),
                c.acos(),
                r[(0, 2)].atan2(-r[(0, 1)]),
            )
        } else {
            // x1 - x0 = atan2(r21, r22)
            Extraction::difference(-r[(2, 1)].atan2(r[(2, 2)]), PI)
        }
    } else {
        // x1 + x0 = atan2(r21, r22)
        Extraction::sum(r[(2, 1)].atan2(r[(2, 2)]), 0.0)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   |  cy0*cy1-cx*sy0*sy1  sx*sy0   cx*cy1*sy0+cy0*sy1 |
// | r10 r11 r12 | = |  sx*sy1              cx      -sx*cy1             |
// | r20 r21 r22 |   | -cy1*sy0-cx*cy0*sy1  sx*cy0   cx*cy0*cy1-sy0*sy1 |
// +-           -+   +-                                                -+
pub fn extract_yxy(r: &Matrix3<f64>) -> Extraction {
    let c = r[(1, 1)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(0, 1)].atan2(r[(2, 1)]),
                c.acos(),
                r[(1, 0)].atan2(-r[(1, 2)]),
            )
        } else {
            // y1 - y0 = atan2(r02, r00)
            Extraction::difference(-r[(0, 2)].atan2(r[(0, 0)]), PI)
        }
    } else {
        // y1 + y0 = atan2(r02, r00)
        Extraction::sum(r[(0, 2)].atan2(r[(0, 0)]), 0.0)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   |  cz*cy0*cy1-sy0*sy1  -sz*cy0  cy1*sy0+cz*cy0*sy1 |
// | r10 r11 r12 | = |  sz*cy1               cz      sz*sy1             |
// | r20 r21 r22 |   | -cz*cy1*sy0-cy0*sy1   sz*sy0  cy0*cy1-cz*sy0*sy1 |
// +-           -+   +-                                                -+
pub fn extract_yzy(r: &Matrix3<f64>) -> Extraction {
    let c = r[(1, 1)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(2, 1)].atan2(-r[(0, 1)]),
                c.acos(),
                r[(1, 2)].atan2(r[(1, 0)]),
            )
        } else {
            // y1 - y0 = atan2(-r20, r22)
            Extraction::difference(-(-r[(2, 0)]).atan2(r[(2, 2)]), PI)
        }
    } else {
        // y1 + y0 = atan2(-r20, r22)
        Extraction::sum((-r[(2, 0)]).atan2(r[(2, 2)]), 0.0)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   | cz0*cz1-cx*sz0*sz1  -cx*cz1*sz0-cz0*sz1   sx*sz0 |
// | r10 r11 r12 | = | cz1*sz0+cx*cz0*sz1   cx*cz0*cz1-sz0*sz1  -sx*cz0 |
// | r20 r21 r22 |   | sx*sz1               sx*cz1               cx     |
// +-           -+   +-                                                -+
pub fn extract_zxz(r: &Matrix3<f64>) -> Extraction {
    let c = r[(2, 2)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(0, 2)].atan2(-r[(1, 2)]),
                c.acos(),
                r[(2, 0)].atan2(r[(2, 1)]),
            )
        } else {
            // z1 - z0 = atan2(-r01, r00)
            Extraction::difference(-(-r[(0, 1)]).atan2(r[(0, 0)]), PI)
        }
    } else {
        // z1 + z0 = atan2(-r01, r00)
        Extraction::sum((-r[(0, 1)]).atan2(r[(0, 0)]), 0.0)
    }
}

// +-           -+   +-                                                -+
// | r00 r01 r02 |   |  cy*cz0*cz1-sz0*sz1  -cz1*sz0-cy*cz0*sz1  sy*cz0 |
// | r10 r11 r12 | = |  cy*cz1*sz0+cz0*sz1   cz0*cz1-cy*sz0*sz1  sy*sz0 |
// | r20 r21 r22 |   | -sy*cz1               sy*sz1              cy     |
// +-           -+   +-                                                -+
pub fn extract_zyz(r: &Matrix3<f64>) -> Extraction {
    let c = r[(2, 2)];
    if c < UPPER {
        if c > LOWER {
            Extraction::unique(
                r[(1, 2)].atan2(r[(0, 2)]),
                c.acos(),
                r[(2, 1)].atan2(-r[(2, 0)]),
            )
        } else {
            // z1 - z0 = atan2(r10, r11)
            Extraction::difference(-r[(1, 0)].atan2(r[(1, 1)]), PI)
        }
    } else {
        // z1 + z0 = atan2(r10, r11)
        Extraction::sum(r[(1, 0)].atan2(r[(1, 1)]), 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Rotation3;

    fn compose(sequence: EulerSequence, angles: [f64; 3]) -> Matrix3<f64> {
        sequence
            .names()
            .iter()
            .zip(angles)
            .fold(Matrix3::identity(), |acc, (name, angle)| {
                acc * Rotation3::from_axis_angle(&name.unit(), angle).into_inner()
            })
    }

    #[test]
    fn test_from_names_rejects_repeated_middle() {
        use AxisName::{X, Y, Z};
        assert_eq!(EulerSequence::from_names(X, X, Z), None);
        assert_eq!(EulerSequence::from_names(Y, Z, Z), None);
        assert_eq!(EulerSequence::from_names(Z, Y, Z), Some(EulerSequence::Zyz));
        for sequence in EulerSequence::ALL {
            let [a, b, c] = sequence.names();
            assert_eq!(EulerSequence::from_names(a, b, c), Some(sequence));
        }
    }

    #[test]
    fn test_proper_sequences() {
        let proper = EulerSequence::ALL.iter().filter(|s| s.is_proper()).count();
        assert_eq!(proper, 6);
        assert!(EulerSequence::Zxz.is_proper());
        assert!(!EulerSequence::Zxy.is_proper());
        assert_eq!(EulerSequence::Yzx.to_string(), "YZX");
    }

    #[test]
    fn test_unique_extraction_recovers_angles() {
        let angles = [0.3, 0.7, -1.2];
        for sequence in EulerSequence::ALL {
            let extraction = sequence.extract(&compose(sequence, angles));
            assert!(extraction.is_unique(), "{} should be unique", sequence);
            assert_abs_diff_eq!(
                extraction.angles,
                Vector3::from(angles),
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_tait_bryan_lock() {
        let tait = EulerSequence::ALL.iter().filter(|s| !s.is_proper());
        for &sequence in tait {
            for middle in [FRAC_PI_2, -FRAC_PI_2] {
                let matrix = compose(sequence, [0.4, middle, 0.25]);
                let extraction = sequence.extract(&matrix);
                assert!(!extraction.is_unique(), "{} should lock", sequence);
                assert_eq!(extraction.angles.z, 0.0);
                assert_abs_diff_eq!(extraction.angles.y, middle, epsilon = 1e-12);
                let rebuilt = compose(sequence, extraction.angles.into());
                assert_abs_diff_eq!(rebuilt, matrix, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_proper_euler_lock() {
        let proper = EulerSequence::ALL.iter().filter(|s| s.is_proper());
        for &sequence in proper {
            for (middle, expected) in [
                (0.0, Solution::NotUniqueSum),
                (PI, Solution::NotUniqueDifference),
            ] {
                let matrix = compose(sequence, [0.4, middle, 0.25]);
                let extraction = sequence.extract(&matrix);
                assert_eq!(extraction.solution, expected, "{}", sequence);
                assert_eq!(extraction.angles.z, 0.0);
                let rebuilt = compose(sequence, extraction.angles.into());
                assert_abs_diff_eq!(rebuilt, matrix, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_sum_solution_folds_into_first_angle() {
        let matrix = compose(EulerSequence::Xyz, [0.2, FRAC_PI_2, 0.3]);
        let extraction = extract_xyz(&matrix);
        assert_eq!(extraction.solution, Solution::NotUniqueSum);
        assert_abs_diff_eq!(extraction.angles.x, 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_drift_past_one_does_not_produce_nan() {
        let mut matrix = compose(EulerSequence::Zyz, [0.1, 0.0, 0.2]);
        matrix[(2, 2)] = 1.0 + 1e-12;
        let extraction = extract_zyz(&matrix);
        assert!(extraction.angles.iter().all(|a| a.is_finite()));
        assert_eq!(extraction.solution, Solution::NotUniqueSum);
    }
}
