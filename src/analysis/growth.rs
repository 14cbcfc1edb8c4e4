//! Unadjusted compound growth rate between two balances

/// Compound annual growth from `start` to `end` over `years`, in percent.
///
/// Ignores interim contributions, so it overstates investment return for a
/// saver; `decompose` gives the contribution-adjusted figure. Returns 0 when
/// the ratio cannot be annualized.
pub fn simple_annualized_return(start: f64, end: f64, years: u32) -> f64 {
    if start <= 0.0 || years == 0 {
        return 0.0;
    }

    let ratio = end / start;
    if ratio <= 0.0 {
        return 0.0;
    }

    (ratio.powf(1.0 / years as f64) - 1.0) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_doubling_over_ten_years() {
        assert_abs_diff_eq!(simple_annualized_return(100.0, 200.0, 10), 7.177_346, epsilon = 1e-6);
    }

    #[test]
    fn test_loss() {
        assert_abs_diff_eq!(simple_annualized_return(1000.0, 900.0, 1), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_guards() {
        assert_eq!(simple_annualized_return(0.0, 100.0, 5), 0.0);
        assert_eq!(simple_annualized_return(100.0, 150.0, 0), 0.0);
        assert_eq!(simple_annualized_return(100.0, -20.0, 3), 0.0);
    }
}
