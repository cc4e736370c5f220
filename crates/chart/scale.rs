use std::ops::Range;

/// Smallest and largest finite value.
pub fn extent<I: IntoIterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Axis range covering `values` with 5% headroom on both sides.
pub fn padded_range<I: IntoIterator<Item = f64>>(values: I, include_zero: bool) -> Range<f64> {
    let (mut lo, mut hi) = extent(values).unwrap_or((0.0, 0.0));
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    let span = hi - lo;
    if span == 0.0 {
        let pad = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - pad)..(hi + pad);
    }
    let pad = span * 0.05;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    let hi = if include_zero && hi == 0.0 { 0.0 } else { hi + pad };
    lo..hi
}

/// Range for a logarithmic axis over the positive values, `None` without any.
pub fn log_range<I: IntoIterator<Item = f64>>(values: I) -> Option<Range<f64>> {
    let (lo, hi) = extent(values.into_iter().filter(|v| *v > 0.0))?;
    if lo == hi {
        return Some((lo / 2.0)..(hi * 2.0));
    }
    Some((lo / 1.25)..(hi * 1.25))
}

/// Position of `value` inside `domain`, 0.5 when the domain is a single point.
pub fn normalize(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if hi <= lo || !value.is_finite() {
        return 0.5;
    }
    ((value - lo) / (hi - lo)).clamp(0.0, 1.0)
}

/// Marker radius growing linearly with `value` across `domain`.
pub fn lerp_radius(value: f64, domain: (f64, f64), (small, large): (u32, u32)) -> u32 {
    let t = normalize(value, domain);
    (small as f64 + (large as f64 - small as f64) * t).round() as u32
}
