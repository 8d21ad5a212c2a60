//! Iterative Fibonacci.

/// Compute Fibonacci(n), wrapping on overflow.
///
/// Runs `n - 1` steps of the two-accumulator recurrence. Values past
/// Fibonacci(93) wrap modulo 2^64 instead of panicking.
pub fn fibonacci(n: u64) -> u64 {
    if n <= 1 {
        return n;
    }

    let (mut prev, mut curr) = (0u64, 1u64);
    for _ in 1..n {
        let next = curr.wrapping_add(prev);
        prev = curr;
        curr = next;
    }
    curr
}

/// Compute Fibonacci(n), returning `None` once the value leaves u64.
pub fn checked_fibonacci(n: u64) -> Option<u64> {
    if n <= 1 {
        return Some(n);
    }

    let (mut prev, mut curr) = (0u64, 1u64);
    for _ in 1..n {
        let next = curr.checked_add(prev)?;
        prev = curr;
        curr = next;
    }
    Some(curr)
}
