/// Command line front end for frameconv
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use frameconv_core::{
    convert_euler_order, convert_position, equivalent_rotation_order,
    extract_euler_angles_with_solution, to_quaternion, AxisSet, AxisSetKind, CoordinateFrame,
    CoordinateFrameConverter, EulerAngles, Solution,
};
use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use std::io::Write;
use tracing::{debug, info};

pub mod report;

pub use report::Report;

/// Convert positions and rotations between axis conventions
#[derive(Parser, Debug)]
#[command(name = "frameconv", version)]
#[command(about = "Convert positions and Euler angles between coordinate frames", long_about = None)]
pub struct Cli {
    /// Decimal places printed for every number
    #[arg(short, long, global = true, default_value_t = 3)]
    pub precision: usize,

    /// Disable coloured labels
    #[arg(long, global = true)]
    pub plain: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Re-express a position in another spatial convention
    Position {
        /// Source convention, e.g. +X+Y-Z (right, up, forward)
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        /// Destination convention
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        #[arg(num_args = 3, required = true, allow_negative_numbers = true, value_names = ["X", "Y", "Z"])]
        values: Vec<f64>,
    },
    /// Convert Euler angles from one coordinate frame to another
    Euler {
        #[arg(long, allow_hyphen_values = true)]
        from_axes: String,
        #[arg(long, allow_hyphen_values = true)]
        from_order: String,
        #[arg(long, allow_hyphen_values = true)]
        to_axes: String,
        #[arg(long, allow_hyphen_values = true)]
        to_order: String,
        #[arg(num_args = 3, required = true, allow_negative_numbers = true, value_names = ["E0", "E1", "E2"])]
        angles: Vec<f64>,
    },
    /// Re-express Euler angles about another rotation order
    Reorder {
        #[arg(long, allow_hyphen_values = true)]
        from: String,
        #[arg(long, allow_hyphen_values = true)]
        to: String,
        #[arg(num_args = 3, required = true, allow_negative_numbers = true, value_names = ["E0", "E1", "E2"])]
        angles: Vec<f64>,
    },
    /// Compose Euler angles into a quaternion
    Quaternion {
        #[arg(long, allow_hyphen_values = true)]
        order: String,
        #[arg(num_args = 3, required = true, allow_negative_numbers = true, value_names = ["E0", "E1", "E2"])]
        angles: Vec<f64>,
    },
    /// Extract Euler angles from a quaternion
    Extract {
        #[arg(long, allow_hyphen_values = true)]
        order: String,
        #[arg(num_args = 4, required = true, allow_negative_numbers = true, value_names = ["W", "I", "J", "K"])]
        quaternion: Vec<f64>,
    },
    /// List every valid spatial convention, or every rotation order
    List {
        /// List rotation orders instead of spatial conventions
        #[arg(long)]
        orders: bool,
    },
}

/// Smallest quaternion norm accepted by `extract`
const MIN_QUATERNION_NORM: f64 = 1e-12;

/// Run one command, writing the report to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> Result<()> {
    let mut report = Report::new(out, cli.precision, !cli.plain);

    match &cli.command {
        Command::Position { from, to, values } => {
            let from_axes = AxisSet::spatial(from).context("invalid source convention")?;
            let to_axes = AxisSet::spatial(to).context("invalid destination convention")?;
            let v = vector(values);
            let res = convert_position(&from_axes, &to_axes, &v);
            info!(%from_axes, %to_axes, "converted position");
            report.vector("position", &res)?;
        }
        Command::Euler {
            from_axes,
            from_order,
            to_axes,
            to_order,
            angles,
        } => {
            let from = CoordinateFrame::new(from_axes, from_order)
                .context("invalid source frame")?;
            let to = CoordinateFrame::new(to_axes, to_order).context("invalid destination frame")?;
            let converter = CoordinateFrameConverter::new(from, to);
            let remapped =
                equivalent_rotation_order(from.axes(), to.axes(), from.rotation_order())?;
            let res = converter.convert_euler_angles(&euler(angles));
            info!(%converter, "converted euler angles");
            report.line("frames", &converter)?;
            report.line("remapped", remapped)?;
            report.angles("angles", &res)?;
        }
        Command::Reorder { from, to, angles } => {
            let from = AxisSet::rotation_order(from).context("invalid source order")?;
            let to = AxisSet::rotation_order(to).context("invalid destination order")?;
            let res = convert_euler_order(&from, &to, &euler(angles));
            report.angles("angles", &res)?;
        }
        Command::Quaternion { order, angles } => {
            let order = AxisSet::rotation_order(order).context("invalid rotation order")?;
            let q = to_quaternion(&order, &euler(angles));
            report.quaternion("quaternion", &q)?;
        }
        Command::Extract { order, quaternion } => {
            let order = AxisSet::rotation_order(order).context("invalid rotation order")?;
            let raw = Quaternion::new(quaternion[0], quaternion[1], quaternion[2], quaternion[3]);
            let Some(q) = UnitQuaternion::try_new(raw, MIN_QUATERNION_NORM) else {
                bail!("quaternion has zero length");
            };
            debug!(norm = raw.norm(), "normalized quaternion");
            let (res, solution) = extract_euler_angles_with_solution(&order, &q);
            report.angles("angles", &res)?;
            if solution != Solution::Unique {
                report.warning("gimbal lock: the third angle was pinned to zero")?;
            }
        }
        Command::List { orders } => {
            let kind = if *orders {
                AxisSetKind::RotationOrder
            } else {
                AxisSetKind::Spatial
            };
            for set in AxisSet::all(kind) {
                report.line(&format!("{:#}", set), set)?;
            }
        }
    }

    report.flush()?;
    Ok(())
}

fn vector(values: &[f64]) -> Vector3<f64> {
    Vector3::new(values[0], values[1], values[2])
}

fn euler(values: &[f64]) -> EulerAngles {
    EulerAngles::new(values[0], values[1], values[2])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn run_args(args: &[&str]) -> Result<String> {
        let cli = Cli::try_parse_from(args)?;
        let mut out = Vec::new();
        run(&cli, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    /// Numbers printed on the line with the given label
    fn numbers(out: &str, label: &str) -> Vec<f64> {
        let line = out
            .lines()
            .find(|line| line.trim_start().starts_with(&format!("{label}:")))
            .unwrap();
        let (_, values) = line.split_once(':').unwrap();
        values
            .trim()
            .trim_matches(|c| c == '(' || c == ')')
            .split(", ")
            .map(|v| v.parse().unwrap())
            .collect()
    }

    #[test]
    fn test_position_command() {
        let out = run_args(&[
            "frameconv", "--plain", "position", "--from", "+X+Y-Z", "--to", "-Y+Z+X", "1", "2",
            "3",
        ])
        .unwrap();
        assert_eq!(out, "  position: -3.000, -1.000, 2.000\n");
    }

    #[test]
    fn test_negative_values_and_precision() {
        let out = run_args(&[
            "frameconv", "position", "--plain", "-p", "1", "--from", "XYZ", "--to", "-X-Y-Z",
            "-1.5", "1", "2",
        ])
        .unwrap();
        assert_eq!(out, "  position: 1.5, -1.0, -2.0\n");
    }

    #[test]
    fn test_reorder_command() {
        let out = run_args(&[
            "frameconv", "--plain", "reorder", "--from", "XYZ", "--to", "ZYX", "0", "0", "35",
        ])
        .unwrap();
        let angles = numbers(&out, "angles");
        assert_abs_diff_eq!(angles[0], 35.0, epsilon = 1e-3);
        assert_abs_diff_eq!(angles[1], 0.0, epsilon = 1e-3);
        assert_abs_diff_eq!(angles[2], 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_quaternion_command() {
        let out = run_args(&[
            "frameconv", "--plain", "quaternion", "--order", "XYZ", "0", "0", "0",
        ])
        .unwrap();
        let q = numbers(&out, "quaternion");
        assert_eq!(q.len(), 4);
        assert_abs_diff_eq!(q[0], 1.0);
        assert!(q[1..].iter().all(|v| v.abs() < 1e-3));
    }

    #[test]
    fn test_extract_reports_gimbal_lock() {
        let half = std::f64::consts::FRAC_1_SQRT_2.to_string();
        let minus_half = format!("-{half}");
        let out = run_args(&[
            "frameconv", "--plain", "extract", "--order", "XYZ", &half, "0", &minus_half, "0",
        ])
        .unwrap();
        let angles = numbers(&out, "angles");
        assert_abs_diff_eq!(angles[1], 90.0, epsilon = 1e-3);
        assert_eq!(angles[2], 0.0);
        assert!(out.contains("gimbal lock"), "{out}");
    }

    #[test]
    fn test_extract_normalizes_input() {
        let out = run_args(&[
            "frameconv", "--plain", "extract", "--order", "XYZ", "2", "0", "0", "0",
        ])
        .unwrap();
        assert!(numbers(&out, "angles").iter().all(|v| v.abs() < 1e-3));
        assert!(!out.contains("gimbal lock"));
    }

    #[test]
    fn test_extract_rejects_zero_quaternion() {
        let err = run_args(&[
            "frameconv", "extract", "--order", "XYZ", "0", "0", "0", "0",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("zero length"));
    }

    #[test]
    fn test_euler_command_identity() {
        let out = run_args(&[
            "frameconv",
            "--plain",
            "euler",
            "--from-axes",
            "+X+Y-Z",
            "--from-order",
            "-Z-X-Y",
            "--to-axes",
            "+X+Y-Z",
            "--to-order",
            "-Z-X-Y",
            "20",
            "40",
            "80",
        ])
        .unwrap();
        assert!(out.contains("  remapped: -Z-X-Y\n"), "{out}");
        let angles = numbers(&out, "angles");
        assert_abs_diff_eq!(angles[0], 20.0, epsilon = 1e-3);
        assert_abs_diff_eq!(angles[1], 40.0, epsilon = 1e-3);
        assert_abs_diff_eq!(angles[2], 80.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_descriptor_is_an_error() {
        let err = run_args(&[
            "frameconv", "position", "--from", "XYX", "--to", "XYZ", "1", "2", "3",
        ])
        .unwrap_err();
        assert!(err.to_string().contains("invalid source convention"));
        assert!(format!("{err:#}").contains("+X+Y+X"));
    }

    #[test]
    fn test_list_command() {
        let out = run_args(&["frameconv", "--plain", "list"]).unwrap();
        assert_eq!(out.lines().count(), 48);
        let out = run_args(&["frameconv", "--plain", "list", "--orders"]).unwrap();
        assert_eq!(out.lines().count(), 96);
        assert!(out.contains("       XYX: -X-Y-X\n"));
    }

    #[test]
    fn test_wrong_value_count_is_rejected() {
        let args = ["frameconv", "position", "--from", "XYZ", "--to", "XYZ", "1"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
