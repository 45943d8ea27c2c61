//! Prime capacity selection.
//!
//! The table capacity is always prime; combined with the 0.5 load-factor
//! ceiling this keeps quadratic probe walks from cycling before they find
//! an empty slot.

/// Smallest prime greater than or equal to `n`.
pub(crate) fn next_prime(n: usize) -> usize {
    let mut i = n;
    while !is_prime(i) {
        i += 1;
    }
    i
}

/// Trial division by odd numbers up to the square root. 2 is the only
/// even prime; every other even number is rejected up front.
pub(crate) fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}
