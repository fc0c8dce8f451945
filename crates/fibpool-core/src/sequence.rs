//! Fibonacci-like sequence generator.
//!
//! `compute(0) = compute(1) = 1` and every later term is the sum of the two
//! before it. [`compute`] is deliberately the naive recursive form: its
//! exponential cost is the workload each worker burns between paced delays.

/// Largest index whose term still fits in a `u64`.
pub const MAX_INDEX: u32 = 92;

/// Computes the `n`th term by plain recursion.
///
/// Cost grows exponentially with `n`; indices in the 30s take milliseconds,
/// indices past ~45 take minutes.
pub fn compute(n: u32) -> u64 {
    match n {
        0 | 1 => 1,
        _ => compute(n - 1) + compute(n - 2),
    }
}

/// Computes the `n`th term in linear time.
///
/// Always agrees with [`compute`]. Overflows (and panics in debug builds)
/// past [`MAX_INDEX`].
pub fn compute_iterative(n: u32) -> u64 {
    let (mut prev, mut curr) = (1u64, 1u64);
    for _ in 1..n {
        let next = prev + curr;
        prev = curr;
        curr = next;
    }
    curr
}
