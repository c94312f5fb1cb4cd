//! "Nice" tick generation and tick label formatting for linear axes.
//!
//! Ticks land on multiples of 1, 2 or 5 times a power of ten so axis labels
//! stay readable whatever the metric's magnitude.

const E10: f64 = 7.071_067_811_865_475_5;
const E5: f64 = 3.162_277_660_168_379_5;
const E2: f64 = std::f64::consts::SQRT_2;

const MAX_TICK_PRECISION: usize = 20;

/// Integer tick bounds plus increment.
///
/// A negative increment means "divide by `-inc`", which keeps sub-unit steps
/// exact (0.2 is computed as 1 / 5 instead of accumulating 0.1 + 0.1).
fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let scaled = 10f64.powf(-power) / factor;
        i1 = (start * scaled).round();
        i2 = (stop * scaled).round();
        if i1 / scaled < start {
            i1 += 1.0;
        }
        if i2 / scaled > stop {
            i2 -= 1.0;
        }
        inc = -scaled;
    } else {
        let scaled = 10f64.powf(power) * factor;
        i1 = (start / scaled).round();
        i2 = (stop / scaled).round();
        if i1 * scaled < start {
            i1 += 1.0;
        }
        if i2 * scaled > stop {
            i2 -= 1.0;
        }
        inc = scaled;
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    (i1, i2, inc)
}

/// Returns roughly `count` evenly spaced round values inside `[start, stop]`.
///
/// Reversed bounds produce ticks in descending order. Equal bounds produce a
/// single tick.
#[must_use]
pub fn nice_ticks(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if count == 0 || !start.is_finite() || !stop.is_finite() {
        return Vec::new();
    }
    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (i1, i2, inc) = tick_spec(low, high, count as f64);
    if !(i2 >= i1) {
        return Vec::new();
    }

    let n = (i2 - i1) as usize + 1;
    let value_at = |index: f64| {
        if inc < 0.0 {
            index / -inc
        } else {
            index * inc
        }
    };

    if reverse {
        (0..n).map(|i| value_at(i2 - i as f64)).collect()
    } else {
        (0..n).map(|i| value_at(i1 + i as f64)).collect()
    }
}

/// Distance between adjacent ticks produced by [`nice_ticks`].
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    if count == 0 || !start.is_finite() || !stop.is_finite() || start == stop {
        return 0.0;
    }
    let reverse = stop < start;
    let (low, high) = if reverse { (stop, start) } else { (start, stop) };
    let (_, _, inc) = tick_spec(low, high, count as f64);
    let step = if inc < 0.0 { 1.0 / -inc } else { inc };
    if reverse { -step } else { step }
}

/// Number of fraction digits needed to tell ticks `step` apart.
#[must_use]
pub fn tick_precision(step: f64) -> usize {
    let step = step.abs();
    if !step.is_finite() || step == 0.0 {
        return 0;
    }
    let exponent = step.log10().floor();
    if exponent >= 0.0 {
        0
    } else {
        (-exponent as usize).min(MAX_TICK_PRECISION)
    }
}

/// Formats a tick value with fixed precision and thousands grouping.
///
/// Negative values use U+2212 MINUS SIGN.
#[must_use]
pub fn format_tick(value: f64, precision: usize) -> String {
    let fixed = format!("{:.*}", precision, value.abs());
    let (integer, fraction) = match fixed.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::with_capacity(fixed.len() + integer.len() / 3 + 1);
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        out.push('\u{2212}');
    }
    for (index, digit) in integer.chars().enumerate() {
        if index > 0 && (integer.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}
