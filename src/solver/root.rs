//! Root finder for the per-period rate
//!
//! Newton-Raphson with a numeric derivative, falling back to bisection when
//! the iteration stalls. The discount term mixes a power with a linear
//! factor, so no closed-form derivative is used.

use log::debug;

use super::npv::NpvEquation;

/// Convergence tolerance on the rate iterate
const STEP_TOLERANCE: f64 = 1e-10;

/// A converged root must balance the equation at least this tightly
const RESIDUAL_TOLERANCE: f64 = 1e-6;

/// Search bracket for the per-period rate
const RATE_FLOOR: f64 = -0.99;
const RATE_CEILING: f64 = 10.0;

/// Half-width of the central-difference derivative stencil
const DERIVATIVE_STEP: f64 = 1e-7;

const MAX_ITERATIONS: usize = 1000;

/// Outcome of a fee-rate solve. Non-convergence is recovered, not raised:
/// callers receive the closed-form approximation tagged as `FallbackUsed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SolvedRate {
    /// The root finder balanced the NPV equation
    Converged(f64),
    /// The root finder failed; the rate is the linear approximation
    FallbackUsed(f64),
}

impl SolvedRate {
    /// The annualized rate, however it was obtained
    pub fn value(&self) -> f64 {
        match *self {
            SolvedRate::Converged(rate) | SolvedRate::FallbackUsed(rate) => rate,
        }
    }

    pub fn converged(&self) -> bool {
        matches!(self, SolvedRate::Converged(_))
    }
}

/// Solve `equation` for the per-period rate, starting from `guess`.
///
/// Returns `None` when neither Newton-Raphson nor bisection can balance the
/// equation; the engine then substitutes its closed-form fallback.
pub fn solve_periodic_rate(equation: &NpvEquation, guess: f64) -> Option<f64> {
    let mut rate = guess.clamp(RATE_FLOOR, RATE_CEILING);

    for _ in 0..MAX_ITERATIONS {
        let residual = equation.residual(rate);
        let derivative = (equation.residual(rate + DERIVATIVE_STEP)
            - equation.residual(rate - DERIVATIVE_STEP))
            / (2.0 * DERIVATIVE_STEP);

        if derivative.abs() < 1e-20 {
            debug!("derivative vanished at rate {rate}; switching to bisection");
            return bisect(equation);
        }

        let next = (rate - residual / derivative).clamp(RATE_FLOOR, RATE_CEILING);
        if (next - rate).abs() < STEP_TOLERANCE {
            // A stalled iterate pinned at the bracket edge is not a root
            if equation.residual(next).abs() < RESIDUAL_TOLERANCE {
                return Some(next);
            }
            return bisect(equation);
        }
        rate = next;
    }

    bisect(equation)
}

fn bisect(equation: &NpvEquation) -> Option<f64> {
    let mut low = RATE_FLOOR;
    let mut high = RATE_CEILING;
    let mut residual_low = equation.residual(low);
    let residual_high = equation.residual(high);

    // No sign change means no root in the bracket
    if residual_low * residual_high > 0.0 {
        return None;
    }

    for _ in 0..MAX_ITERATIONS {
        let mid = (low + high) / 2.0;
        let residual_mid = equation.residual(mid);

        if residual_mid.abs() < STEP_TOLERANCE || (high - low) / 2.0 < STEP_TOLERANCE {
            return Some(mid);
        }

        if residual_mid * residual_low < 0.0 {
            high = mid;
        } else {
            low = mid;
            residual_low = residual_mid;
        }
    }

    None
}
