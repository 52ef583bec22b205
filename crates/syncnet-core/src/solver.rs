//! Numeric integration schemes.
//!
//! The phase update integrates one scalar ODE per oscillator, with the
//! derivative evaluated against the frozen phase vector of the previous step.
//! Three schemes are supported:
//!
//! - `Fast`: single explicit Euler step over the whole increment
//! - `Rk4`: classic 4th-order Runge-Kutta with fixed sub-steps of `int_step`
//! - `Rkf45`: adaptive Runge-Kutta-Fehlberg, starting from `int_step` and
//!   rescaling against a local error estimate
//!
//! All schemes are deterministic given identical inputs.

use serde::{Deserialize, Serialize};

/// Integration scheme selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveType {
    /// Explicit Euler, one step per increment.
    Fast,
    /// Fixed-step 4th-order Runge-Kutta.
    Rk4,
    /// Adaptive Runge-Kutta-Fehlberg 4(5).
    Rkf45,
}

/// Advance a scalar ODE `dy/dt = f(t, y)` from `t` to `t + step`.
pub(crate) fn integrate<F>(solver: SolveType, f: F, t: f64, y: f64, step: f64, int_step: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    match solver {
        SolveType::Fast => y + step * f(t, y),
        SolveType::Rk4 => rk4_integrate(&f, t, y, step, int_step),
        SolveType::Rkf45 => rkf45_integrate(&f, t, y, t + step, int_step),
    }
}

fn rk4_integrate<F>(f: &F, t0: f64, y0: f64, step: f64, int_step: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let substeps = ((step / int_step).ceil() as usize).max(1);
    let h = step / substeps as f64;

    let mut t = t0;
    let mut y = y0;
    for _ in 0..substeps {
        y = rk4_step(f, t, y, h);
        t += h;
    }
    y
}

fn rk4_step<F>(f: &F, t: f64, y: f64, h: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    let k1 = f(t, y);
    let k2 = f(t + 0.5 * h, y + 0.5 * h * k1);
    let k3 = f(t + 0.5 * h, y + 0.5 * h * k2);
    let k4 = f(t + h, y + h * k3);
    y + h * (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0
}

/// Fehlberg 4(5) with local-error step control.
///
/// `initial_h` seeds the internal step. The step never drops below
/// `initial_h / 1e3`; once at the floor a step is accepted regardless of the
/// error estimate, so the loop always reaches `t_end`.
fn rkf45_integrate<F>(f: &F, mut t: f64, mut y: f64, t_end: f64, initial_h: f64) -> f64
where
    F: Fn(f64, f64) -> f64,
{
    const SAFETY: f64 = 0.84;
    const TOLERANCE: f64 = 1e-9;
    const MIN_SCALE: f64 = 0.1;
    const MAX_SCALE: f64 = 4.0;

    let h_floor = initial_h / 1e3;
    let mut h = initial_h;

    while t < t_end {
        h = h.min(t_end - t);

        let k1 = f(t, y);
        let k2 = f(t + h / 4.0, y + h * k1 / 4.0);
        let k3 = f(
            t + 3.0 * h / 8.0,
            y + h * (3.0 * k1 / 32.0 + 9.0 * k2 / 32.0),
        );
        let k4 = f(
            t + 12.0 * h / 13.0,
            y + h * (1932.0 * k1 - 7200.0 * k2 + 7296.0 * k3) / 2197.0,
        );
        let k5 = f(
            t + h,
            y + h * (439.0 * k1 / 216.0 - 8.0 * k2 + 3680.0 * k3 / 513.0 - 845.0 * k4 / 4104.0),
        );
        let k6 = f(
            t + h / 2.0,
            y + h
                * (-8.0 * k1 / 27.0 + 2.0 * k2 - 3544.0 * k3 / 2565.0 + 1859.0 * k4 / 4104.0
                    - 11.0 * k5 / 40.0),
        );

        let y4 = y
            + h * (25.0 * k1 / 216.0 + 1408.0 * k3 / 2565.0 + 2197.0 * k4 / 4104.0 - k5 / 5.0);
        let y5 = y
            + h * (16.0 * k1 / 135.0 + 6656.0 * k3 / 12825.0 + 28561.0 * k4 / 56430.0
                - 9.0 * k5 / 50.0
                + 2.0 * k6 / 55.0);

        let err = (y5 - y4).abs();
        if err <= TOLERANCE || h <= h_floor {
            t += h;
            y = y5;
        }

        let scale = if err > 0.0 {
            (SAFETY * (TOLERANCE / err).powf(0.25)).clamp(MIN_SCALE, MAX_SCALE)
        } else {
            MAX_SCALE
        };
        h = (h * scale).max(h_floor);
    }
    y
}
