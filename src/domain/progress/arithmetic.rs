//! Shared arithmetic for the progress calculators.
//!
//! Every division here is guarded so callers never see NaN or infinity.

use crate::domain::foundation::Score;

/// Rounds half toward positive infinity (`round(-2.5) == -2`).
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// Relative change from `initial` to `current`, in whole percent.
///
/// Returns 0 when `initial` is not positive.
pub fn percentage_change(initial: i64, current: i64) -> i32 {
    if initial <= 0 {
        return 0;
    }
    let change = ((current - initial) as f64 / initial as f64) * 100.0;
    round_half_up(change).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Rounded arithmetic mean of scores. An empty input averages to zero.
pub fn rounded_mean<I>(scores: I) -> Score
where
    I: IntoIterator<Item = Score>,
{
    let (sum, count) = scores
        .into_iter()
        .fold((0_i64, 0_i64), |(sum, count), s| (sum + s.as_i64(), count + 1));

    if count == 0 {
        return Score::ZERO;
    }
    Score::new(round_half_up(sum as f64 / count as f64).clamp(0, 100) as u8)
}
