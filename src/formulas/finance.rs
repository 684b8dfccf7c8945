//! # finance.rs
//!
//! Loan amortization, compound interest and return on investment.
//!
//! Rates are entered as annual percentages (`5` means 5 %).

use crate::error::{CalcError, CalcResult};
use crate::formulas::require_finite;

/// Monthly installment of an amortized loan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoanPayment {
    pub monthly_payment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Outcome of compounding an amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompoundInterest {
    pub amount: f64,
    pub interest: f64,
    /// Interest earned as a percentage of the principal.
    pub total_return: f64,
}

/// Return on an investment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnOnInvestment {
    /// Percentage change from the initial value.
    pub roi: f64,
    pub profit: f64,
}

/// Computes the fixed monthly payment of a loan.
///
/// The monthly rate is `annual_rate / 100 / 12` over `years * 12` payments.
///
/// # Errors
/// [`CalcError::InvalidInput`] for a non-finite argument, a zero rate or a
/// zero term.
pub fn loan_payment(principal: f64, annual_rate: f64, years: f64) -> CalcResult<LoanPayment> {
    let principal = require_finite("principal", principal)?;
    let annual_rate = require_finite("rate", annual_rate)?;
    let years = require_finite("years", years)?;
    if annual_rate == 0.0 {
        return Err(CalcError::input("rate", "must not be zero"));
    }
    if years == 0.0 {
        return Err(CalcError::input("years", "must not be zero"));
    }

    let monthly_rate = annual_rate / 100.0 / 12.0;
    let payments = years * 12.0;
    let growth = (1.0 + monthly_rate).powf(payments);
    let monthly_payment = principal * (monthly_rate * growth) / (growth - 1.0);
    let total_paid = monthly_payment * payments;

    Ok(LoanPayment {
        monthly_payment,
        total_paid,
        total_interest: total_paid - principal,
    })
}

/// Computes `P(1 + r/n)^(n·t)` for an annual percentage `r`.
///
/// # Errors
/// [`CalcError::InvalidInput`] for a non-finite argument, zero compounding
/// frequency or a zero principal.
pub fn compound_interest(principal: f64, annual_rate: f64, years: f64, compounds_per_year: f64) -> CalcResult<CompoundInterest> {
    let principal = require_finite("principal", principal)?;
    let annual_rate = require_finite("rate", annual_rate)?;
    let years = require_finite("years", years)?;
    let compounds = require_finite("compounds", compounds_per_year)?;
    if compounds == 0.0 {
        return Err(CalcError::input("compounds", "must not be zero"));
    }
    if principal == 0.0 {
        return Err(CalcError::input("principal", "must not be zero"));
    }

    let amount = principal * (1.0 + annual_rate / 100.0 / compounds).powf(compounds * years);
    let interest = amount - principal;
    Ok(CompoundInterest {
        amount,
        interest,
        total_return: interest / principal * 100.0,
    })
}

/// Computes the percentage change from `initial` to `final_value`.
///
/// # Errors
/// [`CalcError::InvalidInput`] for a non-finite argument or a zero initial value.
pub fn roi(initial: f64, final_value: f64) -> CalcResult<ReturnOnInvestment> {
    let initial = require_finite("initial", initial)?;
    let final_value = require_finite("final", final_value)?;
    if initial == 0.0 {
        return Err(CalcError::input("initial", "must not be zero"));
    }

    let profit = final_value - initial;
    Ok(ReturnOnInvestment {
        roi: profit / initial * 100.0,
        profit,
    })
}

impl std::fmt::Display for LoanPayment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Monthly Payment: ${:.2}", self.monthly_payment)?;
        writeln!(f, "Total Paid: ${:.2}", self.total_paid)?;
        write!(f, "Total Interest: ${:.2}", self.total_interest)
    }
}

impl std::fmt::Display for CompoundInterest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Final Amount: ${:.2}", self.amount)?;
        writeln!(f, "Interest Earned: ${:.2}", self.interest)?;
        write!(f, "Total Return: {:.2}%", self.total_return)
    }
}

impl std::fmt::Display for ReturnOnInvestment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Return on Investment: {:.2}%", self.roi)?;
        write!(f, "Profit/Loss: ${:.2}", self.profit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_loan_payment() {
        let loan = loan_payment(100000.0, 6.0, 30.0).unwrap();
        assert_abs_diff_eq!(loan.monthly_payment, 599.55, epsilon = 1.0e-2);
        assert_abs_diff_eq!(loan.total_paid, loan.monthly_payment * 360.0, epsilon = 1.0e-9);
        assert_abs_diff_eq!(loan.total_interest, loan.total_paid - 100000.0, epsilon = 1.0e-9);
        assert!(loan.to_string().starts_with("Monthly Payment: $599.55\n"));
    }

    #[test]
    fn test_loan_rejects_zero_rate_and_term() {
        assert_eq!(loan_payment(1000.0, 0.0, 5.0), Err(CalcError::input("rate", "must not be zero")));
        assert_eq!(loan_payment(1000.0, 5.0, 0.0), Err(CalcError::input("years", "must not be zero")));
        assert!(loan_payment(f64::NAN, 5.0, 1.0).is_err());
    }

    #[test]
    fn test_compound_interest() {
        let c = compound_interest(1000.0, 5.0, 10.0, 12.0).unwrap();
        assert_abs_diff_eq!(c.amount, 1647.01, epsilon = 1.0e-2);
        assert_abs_diff_eq!(c.interest, c.amount - 1000.0);
        assert_abs_diff_eq!(c.total_return, 64.70, epsilon = 1.0e-2);
        assert_eq!(
            compound_interest(1000.0, 10.0, 1.0, 1.0).unwrap().to_string(),
            "Final Amount: $1100.00\nInterest Earned: $100.00\nTotal Return: 10.00%"
        );
    }

    #[test]
    fn test_compound_interest_rejects_zero_divisors() {
        assert!(compound_interest(1000.0, 5.0, 10.0, 0.0).is_err());
        assert!(compound_interest(0.0, 5.0, 10.0, 12.0).is_err());
    }

    #[test]
    fn test_roi() {
        let r = roi(200.0, 250.0).unwrap();
        assert_eq!(r, ReturnOnInvestment { roi: 25.0, profit: 50.0 });
        assert_eq!(r.to_string(), "Return on Investment: 25.00%\nProfit/Loss: $50.00");
        assert_eq!(roi(200.0, 150.0).unwrap().roi, -25.0);
        assert_eq!(roi(0.0, 10.0), Err(CalcError::input("initial", "must not be zero")));
    }
}
