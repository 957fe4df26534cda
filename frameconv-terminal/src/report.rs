/// Coloured label/value output for conversion results
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use frameconv_core::EulerAngles;
use nalgebra::{UnitQuaternion, Vector3};
use std::io::Write;

/// Width the labels are right-aligned to
const LABEL_WIDTH: usize = 10;

/// Queues labelled lines onto a writer, colouring the labels unless plain
/// output was asked for
pub struct Report<'a, W: Write> {
    writer: &'a mut W,
    precision: usize,
    color: bool,
}

impl<'a, W: Write> Report<'a, W> {
    pub fn new(writer: &'a mut W, precision: usize, color: bool) -> Self {
        Self {
            writer,
            precision,
            color,
        }
    }

    pub fn line(&mut self, label: &str, value: impl std::fmt::Display) -> std::io::Result<()> {
        let label = format!("{label:>LABEL_WIDTH$}:");
        if self.color {
            self.writer.queue(SetForegroundColor(Color::Cyan))?;
            self.writer.queue(Print(label))?;
            self.writer.queue(ResetColor)?;
        } else {
            self.writer.queue(Print(label))?;
        }
        self.writer.queue(Print(format!(" {value}\n")))?;
        Ok(())
    }

    pub fn vector(&mut self, label: &str, v: &Vector3<f64>) -> std::io::Result<()> {
        let p = self.precision;
        self.line(label, format!("{:.p$}, {:.p$}, {:.p$}", v.x, v.y, v.z))
    }

    pub fn angles(&mut self, label: &str, angles: &EulerAngles) -> std::io::Result<()> {
        let p = self.precision;
        self.line(label, format!("{angles:.p$}"))
    }

    /// `(w, i, j, k)`
    pub fn quaternion(&mut self, label: &str, q: &UnitQuaternion<f64>) -> std::io::Result<()> {
        let p = self.precision;
        self.line(
            label,
            format!("({:.p$}, {:.p$}, {:.p$}, {:.p$})", q.w, q.i, q.j, q.k),
        )
    }

    /// Warnings always go out in yellow when colour is on
    pub fn warning(&mut self, message: &str) -> std::io::Result<()> {
        if self.color {
            self.writer.queue(SetForegroundColor(Color::Yellow))?;
            self.writer.queue(Print(message))?;
            self.writer.queue(ResetColor)?;
        } else {
            self.writer.queue(Print(message))?;
        }
        self.writer.queue(Print('\n'))?;
        Ok(())
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line() {
        let mut out = Vec::new();
        let mut report = Report::new(&mut out, 2, false);
        report.vector("result", &Vector3::new(1.0, -2.5, 0.126)).unwrap();
        report.flush().unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "    result: 1.00, -2.50, 0.13\n");
    }

    #[test]
    fn test_coloured_label_keeps_value_plain() {
        let mut out = Vec::new();
        let mut report = Report::new(&mut out, 1, true);
        report.angles("angles", &EulerAngles::new(1.0, 2.0, 3.0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains('\u{1b}'));
        assert!(text.ends_with(" 1.0, 2.0, 3.0\n"));
    }

    #[test]
    fn test_quaternion_order() {
        let mut out = Vec::new();
        let mut report = Report::new(&mut out, 1, false);
        report.quaternion("quaternion", &UnitQuaternion::identity()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "quaternion: (1.0, 0.0, 0.0, 0.0)\n");
    }
}
