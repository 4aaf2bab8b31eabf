use crate::foundation::core::Point;

/// Next index in a cyclic space of `len` slots.
pub fn increment(n: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (n + 1) % len
}

/// Previous index in a cyclic space of `len` slots.
pub fn decrement(n: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    (n + len - 1) % len
}

/// Four digit, zero padded label for `n`. Longer numbers keep their last four digits.
pub fn pad_index(n: usize) -> String {
    let s = format!("{n:04}");
    s[s.len() - 4..].to_string()
}

/// The `count` indices that follow `current`, wrapping at `len`.
pub fn upcoming_indices(current: usize, count: usize, len: usize) -> Vec<usize> {
    if len == 0 {
        return Vec::new();
    }
    let mut out = Vec::with_capacity(count);
    let mut i = current;
    for _ in 0..count {
        i = increment(i, len);
        out.push(i);
    }
    out
}

pub(crate) fn travel_distance(a: Point, b: Point) -> f64 {
    (b - a).hypot()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
