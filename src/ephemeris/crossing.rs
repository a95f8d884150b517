//! Bounded search for horizon crossings.
//!
//! The searched function is sampled on a fixed grid starting at the anchor until the first
//! sign change in the requested direction, then the bracket is refined by bisection. The
//! scan step is short enough that no rise/set pair of the Sun or Moon can fall between two
//! samples, and the window is long enough to cover a full lunar day.

use hifitime::{Epoch, Unit};
use log::trace;

use crate::ephem_errors::EphemError;
use crate::ephemeris::Event;

/// Length of the search window after the anchor.
pub const SEARCH_WINDOW_HOURS: i64 = 48;

/// Coarse scan step.
pub const SCAN_STEP_MINUTES: i64 = 10;

/// Bisection stops once the bracket is narrower than this.
pub const TIME_RESOLUTION_SECONDS: f64 = 1.0;

const MAX_BISECTIONS: usize = 64;

/// Does going from `before` to `after` match the requested crossing direction?
fn is_crossing(event: Event, before: f64, after: f64) -> bool {
    match event {
        Event::Rising => before < 0.0 && after >= 0.0,
        Event::Setting => before >= 0.0 && after < 0.0,
    }
}

/// Find the first zero of `f` after `start` crossed in the direction of `event`.
///
/// `Event::Rising` looks for `f` going from negative to non-negative, `Event::Setting` for
/// the opposite.
///
/// Arguments
/// ---------
/// * `f`: the function to follow in time, typically the height of a body's upper limb above
///   the horizon.
/// * `start`: the anchor; only crossings strictly after it are reported.
/// * `event`: crossing direction.
///
/// Return
/// ------
/// * `Ok(Some(t))` with `t` within [`TIME_RESOLUTION_SECONDS`] of the crossing,
/// * `Ok(None)` if no crossing happens within [`SEARCH_WINDOW_HOURS`],
/// * `Err` as soon as `f` fails.
pub fn find_crossing<F>(mut f: F, start: Epoch, event: Event) -> Result<Option<Epoch>, EphemError>
where
    F: FnMut(Epoch) -> Result<f64, EphemError>,
{
    let step = Unit::Minute * SCAN_STEP_MINUTES;
    let n_steps = SEARCH_WINDOW_HOURS * 60 / SCAN_STEP_MINUTES;

    let mut lo = start;
    let mut f_lo = f(lo)?;

    for _ in 0..n_steps {
        let hi = lo + step;
        let f_hi = f(hi)?;

        if is_crossing(event, f_lo, f_hi) {
            trace!("{event} bracketed between {lo} and {hi}");
            return bisect(&mut f, lo, hi, event).map(Some);
        }

        lo = hi;
        f_lo = f_hi;
    }

    Ok(None)
}

/// Refine a bracket `[lo, hi]` known to contain a crossing in the direction of `event`.
fn bisect<F>(f: &mut F, mut lo: Epoch, mut hi: Epoch, event: Event) -> Result<Epoch, EphemError>
where
    F: FnMut(Epoch) -> Result<f64, EphemError>,
{
    let mut f_lo = f(lo)?;

    for _ in 0..MAX_BISECTIONS {
        let width = (hi - lo).to_seconds();
        if width <= TIME_RESOLUTION_SECONDS {
            break;
        }

        let mid = lo + Unit::Second * (width / 2.0);
        let f_mid = f(mid)?;

        if is_crossing(event, f_lo, f_mid) {
            hi = mid;
        } else {
            lo = mid;
            f_lo = f_mid;
        }
    }

    Ok(lo + Unit::Second * ((hi - lo).to_seconds() / 2.0))
}
