//! Numeric helpers shared by every formula.
//!
//! These are the only places division, roots and powers happen. Each returns
//! `None` for an absent input, an exactly-zero denominator, a non-positive
//! base or a non-finite result.

/// `numerator / denominator`.
pub(crate) fn ratio(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    let denominator = denominator?;
    if denominator == 0.0 {
        return None;
    }
    finite(numerator? / denominator)
}

/// Relative change `current / prior - 1`.
pub(crate) fn change(current: Option<f64>, prior: Option<f64>) -> Option<f64> {
    ratio(current, prior).map(|r| r - 1.0)
}

/// Annualised growth `(end / start)^(1 / years) - 1`.
///
/// Both values must be strictly positive.
pub(crate) fn compound_rate(end: Option<f64>, start: Option<f64>, years: u32) -> Option<f64> {
    let (end, start) = (end?, start?);
    if end <= 0.0 || start <= 0.0 || years == 0 {
        return None;
    }
    root(end / start, years).map(|r| r - 1.0)
}

/// `base^(1 / n)` for a strictly positive base.
pub(crate) fn root(base: f64, n: u32) -> Option<f64> {
    if base <= 0.0 || n == 0 {
        return None;
    }
    finite(base.powf(1.0 / f64::from(n)))
}

/// `base^n` for a strictly positive base.
pub(crate) fn power(base: f64, n: u32) -> Option<f64> {
    if base <= 0.0 {
        return None;
    }
    finite(base.powf(f64::from(n)))
}

/// Arithmetic mean of the present values, skipping absent ones.
pub(crate) fn mean_present(values: impl IntoIterator<Item = Option<f64>>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .fold((0.0, 0_u32), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return None;
    }
    finite(sum / f64::from(count))
}

pub(crate) fn finite(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
