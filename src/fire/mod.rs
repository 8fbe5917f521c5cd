//! FIRE projection core.
//!
//! Computes the target nest egg (25x annual expenses) and a year-by-year
//! savings projection until the target is reached or the year cap elapses.
//! Pure and stateless: no I/O, no shared state, at most 100 iterations.

use serde::Serialize;
use thiserror::Error;

/// Annual return rate assumed when the caller does not supply one.
pub const DEFAULT_RETURN_RATE: f64 = 0.05;

/// Hard cap on simulated years. Bounds the loop when the savings rate and
/// return rate combination never reaches the target.
pub const MAX_PROJECTION_YEARS: u32 = 100;

const FIRE_MULTIPLE: f64 = 25.0;

const UNREACHABLE_MESSAGE: &str =
    "Your savings rate is zero or negative. FIRE is not possible with current values.";

#[derive(Debug, Clone, Copy)]
pub struct ProjectionInput {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub annual_return_rate: f64,
}

impl ProjectionInput {
    pub fn new(monthly_income: f64, monthly_expenses: f64, annual_return_rate: f64) -> Self {
        Self {
            monthly_income,
            monthly_expenses,
            annual_return_rate,
        }
    }
}

/// One simulated year: cumulative balance after growth and contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionYear {
    pub year: u32,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub fire_number: f64,
    /// `None` when the savings rate is zero or negative and the target can
    /// never be reached. `Some(100)` with `exhausted` set means the cap
    /// elapsed first.
    pub years_to_fire: Option<u32>,
    pub projections: Vec<ProjectionYear>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// True when the cap elapsed with the balance still below the target.
    /// Distinguishes "gave up after 100 years" from "reached at year 100".
    pub exhausted: bool,
}

#[derive(Debug, Error)]
pub enum FireError {
    #[error("calculation produced a non-finite value")]
    NonFinite,
}

/// Project savings growth toward the FIRE target.
///
/// Accumulation runs at full precision; reported figures are rounded to
/// cents only when the output rows are built.
pub fn project(input: ProjectionInput) -> Result<Projection, FireError> {
    if !input.monthly_income.is_finite()
        || !input.monthly_expenses.is_finite()
        || !input.annual_return_rate.is_finite()
    {
        return Err(FireError::NonFinite);
    }

    let annual_expenses = input.monthly_expenses * 12.0;
    let fire_number = annual_expenses * FIRE_MULTIPLE;
    let yearly_savings = (input.monthly_income - input.monthly_expenses) * 12.0;

    if yearly_savings <= 0.0 {
        // Terminal, non-error outcome: the target exists but can never be
        // reached at the current savings rate.
        return Ok(Projection {
            fire_number: round2(fire_number),
            years_to_fire: None,
            projections: Vec::new(),
            message: Some(UNREACHABLE_MESSAGE.to_string()),
            exhausted: false,
        });
    }

    let mut savings = 0.0_f64;
    let mut years = 0_u32;
    let mut rows = Vec::new();

    while savings < fire_number && years < MAX_PROJECTION_YEARS {
        savings = savings * (1.0 + input.annual_return_rate) + yearly_savings;
        if !savings.is_finite() {
            return Err(FireError::NonFinite);
        }
        years += 1;
        rows.push(ProjectionYear {
            year: years,
            savings: round2(savings),
        });
    }

    Ok(Projection {
        fire_number: round2(fire_number),
        years_to_fire: Some(years),
        projections: rows,
        message: None,
        exhausted: savings < fire_number,
    })
}

/// Round half away from zero to two decimals.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_surplus_means_no_projection() {
        let result = project(ProjectionInput::new(3000.0, 3000.0, 0.05)).unwrap();
        assert_eq!(result.years_to_fire, None);
        assert!(result.projections.is_empty());
        assert!(result.message.is_some());
        assert!(!result.exhausted);
        // Target is still reported: 3000 * 12 * 25.
        assert_relative_eq!(result.fire_number, 900_000.0);
    }

    #[test]
    fn negative_surplus_means_no_projection() {
        let result = project(ProjectionInput::new(2000.0, 3000.0, 0.05)).unwrap();
        assert_eq!(result.years_to_fire, None);
        assert!(result.projections.is_empty());
        assert_relative_eq!(result.fire_number, 900_000.0);
    }

    #[test]
    fn reaches_target_with_standard_inputs() {
        let result = project(ProjectionInput::new(10_000.0, 4_000.0, 0.05)).unwrap();
        assert_relative_eq!(result.fire_number, 1_200_000.0);

        let years = result.years_to_fire.expect("reachable target");
        assert!(years >= 1 && years <= MAX_PROJECTION_YEARS);
        assert_eq!(result.projections.len() as u32, years);
        assert!(!result.exhausted);

        let last = result.projections.last().expect("at least one year");
        assert!(last.savings >= result.fire_number);
    }

    #[test]
    fn rows_are_ordered_and_monotonic() {
        let cases = [
            ProjectionInput::new(10_000.0, 4_000.0, 0.05),
            ProjectionInput::new(5_000.0, 4_500.0, 0.0),
            ProjectionInput::new(4_000.0, 3_000.0, -0.5),
        ];
        for input in cases {
            let result = project(input).unwrap();
            let rows = &result.projections;
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.year, i as u32 + 1);
            }
            for pair in rows.windows(2) {
                assert!(
                    pair[1].savings >= pair[0].savings,
                    "savings decreased: {} -> {}",
                    pair[0].savings,
                    pair[1].savings
                );
            }
        }
    }

    #[test]
    fn identical_inputs_give_identical_output() {
        let input = ProjectionInput::new(8_000.0, 3_200.0, 0.07);
        let first = project(input).unwrap();
        let second = project(input).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn cap_is_reported_as_exhausted() {
        // Positive surplus, but at -50% the balance converges on
        // yearly_savings * 2 = 24_000, far below the 900_000 target.
        let result = project(ProjectionInput::new(4_000.0, 3_000.0, -0.5)).unwrap();
        assert_eq!(result.years_to_fire, Some(MAX_PROJECTION_YEARS));
        assert_eq!(result.projections.len() as u32, MAX_PROJECTION_YEARS);
        assert!(result.exhausted);

        let last = result.projections.last().unwrap();
        assert!(last.savings < result.fire_number);
    }

    #[test]
    fn reported_figures_are_rounded_to_cents() {
        let result = project(ProjectionInput::new(1_234.567, 567.891, 0.0712)).unwrap();
        let mut values: Vec<f64> = result.projections.iter().map(|r| r.savings).collect();
        values.push(result.fire_number);
        for value in values {
            let cents = value * 100.0;
            assert!(
                (cents - cents.round()).abs() < 1e-6,
                "not rounded to cents: {value}"
            );
        }
    }

    #[test]
    fn non_finite_input_is_rejected() {
        assert!(project(ProjectionInput::new(f64::NAN, 3000.0, 0.05)).is_err());
        assert!(project(ProjectionInput::new(5000.0, f64::INFINITY, 0.05)).is_err());
        assert!(project(ProjectionInput::new(5000.0, 3000.0, f64::NAN)).is_err());
    }

    #[test]
    fn zero_expenses_is_immediately_satisfied() {
        // Target of zero is met before the first simulated year.
        let result = project(ProjectionInput::new(5_000.0, 0.0, 0.05)).unwrap();
        assert_eq!(result.years_to_fire, Some(0));
        assert!(result.projections.is_empty());
        assert!(!result.exhausted);
    }
}
