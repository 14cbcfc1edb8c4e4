//! Conversions between stored minor units (pence) and major units (pounds)
//!
//! Amounts are persisted as integer minor units; calculators work in major
//! units and only round back when a figure is stored or displayed.

/// Minor units per major unit
pub const MINOR_PER_MAJOR: f64 = 100.0;

/// Convert stored minor units to major units
pub fn to_major(minor: i64) -> f64 {
    minor as f64 / MINOR_PER_MAJOR
}

/// Convert major units to minor units, rounding to the nearest integer
pub fn to_minor(major: f64) -> i64 {
    (major * MINOR_PER_MAJOR).round() as i64
}

/// Format a major-unit amount with two decimals, as used in reports
pub fn format_major(major: f64) -> String {
    format!("{:.2}", major)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minor_to_major() {
        assert_eq!(to_major(123_456), 1234.56);
        assert_eq!(to_major(-50), -0.5);
    }

    #[test]
    fn test_major_to_minor_rounds_nearest() {
        assert_eq!(to_minor(1111.6649), 111_166);
        assert_eq!(to_minor(1111.665_1), 111_167);
        assert_eq!(to_minor(-12.345_6), -1_235);
    }

    #[test]
    fn test_format_major() {
        assert_eq!(format_major(0.0), "0.00");
        assert_eq!(format_major(-1.005_1), "-1.01");
    }
}
