//! Fixed-payment annuity math for amortizing loans
//!
//! All amounts are major currency units. Rates are annual percentages
//! (4.5 means 4.5%), compounded monthly.

/// Convert an annual percentage rate into the monthly decimal rate
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

/// Calculate the fixed monthly payment (PMT) that repays `principal` over
/// `term_years`.
///
/// # Arguments
/// * `principal` - Amount borrowed (major units, expected >= 0)
/// * `annual_rate_percent` - Annual interest rate in percent
/// * `term_years` - Repayment term in whole years
///
/// # Returns
/// * `0.0` for a zero term, straight-line repayment for a zero rate, and the
///   standard annuity payment otherwise
pub fn monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    if term_years == 0 {
        return 0.0;
    }

    let num_payments = payment_count(term_years);
    if annual_rate_percent == 0.0 {
        return principal / num_payments;
    }

    let rate = monthly_rate(annual_rate_percent);
    // Discount-factor form stays finite once (1 + rate)^n overflows
    let discount = (1.0 + rate).powf(-num_payments);
    principal * rate / (1.0 - discount)
}

/// Outstanding principal after `years_elapsed` years of scheduled payments
/// on a loan sized for `total_term_years`.
pub fn remaining_balance(
    principal: f64,
    annual_rate_percent: f64,
    total_term_years: u32,
    years_elapsed: u32,
) -> f64 {
    let payment = monthly_payment(principal, annual_rate_percent, total_term_years);
    let payments_made = payment_count(years_elapsed);
    let rate = monthly_rate(annual_rate_percent);

    if rate == 0.0 {
        return principal - payment * payments_made;
    }

    let growth = (1.0 + rate).powf(payments_made);
    principal * growth - payment * (growth - 1.0) / rate
}

/// Total of all scheduled payments over the term
pub fn total_repayable(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    monthly_payment(principal, annual_rate_percent, term_years) * payment_count(term_years)
}

/// Number of monthly payments in `years`, computed in floating point so any
/// `u32` year count is representable
fn payment_count(years: u32) -> f64 {
    f64::from(years) * 12.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_reference_mortgage_payment() {
        // £200k over 25 years at 4.5%
        let pmt = monthly_payment(200_000.0, 4.5, 25);
        assert_abs_diff_eq!(pmt, 1111.66, epsilon = 0.01);
    }

    #[test]
    fn test_reference_remaining_balance() {
        let balance = remaining_balance(200_000.0, 4.5, 25, 5);
        assert_abs_diff_eq!(balance, 175_715.81, epsilon = 0.01);
    }

    #[test]
    fn test_zero_term_has_no_payment() {
        assert_eq!(monthly_payment(150_000.0, 3.0, 0), 0.0);
        assert_eq!(monthly_payment(150_000.0, 0.0, 0), 0.0);
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let pmt = monthly_payment(120_000.0, 0.0, 10);
        assert_eq!(pmt, 120_000.0 / 120.0);
        assert_eq!(monthly_payment(99_999.0, 0.0, 7), 99_999.0 / 84.0);
    }

    #[test]
    fn test_payments_cover_principal() {
        for &(principal, rate, term) in &[
            (1_000.0, 0.5, 1),
            (200_000.0, 4.5, 25),
            (350_000.0, 7.25, 35),
            (50_000.0, 12.0, 5),
        ] {
            let total = monthly_payment(principal, rate, term) * payment_count(term);
            assert!(total >= principal, "total {} < principal {}", total, principal);
            assert_abs_diff_eq!(total, total_repayable(principal, rate, term), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_no_reduction_before_payments() {
        assert_eq!(remaining_balance(200_000.0, 4.5, 25, 0), 200_000.0);
        assert_eq!(remaining_balance(80_000.0, 0.0, 10, 0), 80_000.0);
    }

    #[test]
    fn test_fully_repaid_at_term_end() {
        for &(principal, rate, term) in &[
            (200_000.0, 4.5, 25),
            (100_000.0, 6.0, 30),
            (75_000.0, 0.0, 15),
            (10_000.0, 19.9, 3),
        ] {
            let balance = remaining_balance(principal, rate, term, term);
            assert!(
                balance.abs() <= principal * 1e-6,
                "balance {} not repaid for {} at {}% over {}y",
                balance, principal, rate, term
            );
        }
    }

    #[test]
    fn test_balance_strictly_decreases() {
        let mut previous = remaining_balance(250_000.0, 3.9, 30, 0);
        for year in 1..=30 {
            let current = remaining_balance(250_000.0, 3.9, 30, year);
            assert!(current < previous, "year {}: {} >= {}", year, current, previous);
            previous = current;
        }
    }

    #[test]
    fn test_known_thirty_year_balance() {
        assert_relative_eq!(monthly_payment(100_000.0, 6.0, 30), 599.55, max_relative = 1e-5);
        assert_relative_eq!(remaining_balance(100_000.0, 6.0, 30, 10), 83_685.72, max_relative = 1e-6);
    }

    #[test]
    fn test_very_long_term_tends_to_interest_only() {
        // 6% a year on 100k is 500 a month in interest alone
        for &term in &[200_000_000u32, 400_000_000, u32::MAX] {
            let pmt = monthly_payment(100_000.0, 6.0, term);
            assert_relative_eq!(pmt, 500.0, max_relative = 1e-6);
        }
        assert_relative_eq!(total_repayable(1_200.0, 0.0, u32::MAX), 1_200.0, max_relative = 1e-9);
    }
}
