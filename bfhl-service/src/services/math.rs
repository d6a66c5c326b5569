//! Integer helpers behind the `fibonacci`, `prime`, `lcm` and `hcf`
//! operations.
//!
//! Callers validate shapes before getting here, but every function still
//! guards its own preconditions and reports them as [`MathError`].

use num_bigint::BigUint;
use service_core::error::AppError;
use thiserror::Error;

/// Longest sequence served. Terms are exact, so this bounds response size.
pub const MAX_FIBONACCI_LEN: i64 = 2000;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MathError {
    #[error("Invalid input")]
    InvalidInput,

    #[error("Input sequence is empty")]
    EmptyInput,

    #[error("Result exceeds the supported integer range")]
    Overflow,

    #[error("Requested sequence is too long")]
    TooLong,
}

impl From<MathError> for AppError {
    fn from(err: MathError) -> Self {
        AppError::InternalError(anyhow::Error::new(err))
    }
}

/// First `n` Fibonacci numbers, starting `0, 1`.
pub fn fibonacci(n: i64) -> Result<Vec<BigUint>, MathError> {
    if n < 0 {
        return Err(MathError::InvalidInput);
    }
    if n > MAX_FIBONACCI_LEN {
        return Err(MathError::TooLong);
    }

    let len = n as usize;
    let mut sequence = Vec::with_capacity(len);
    let (mut a, mut b) = (BigUint::from(0u8), BigUint::from(1u8));

    for _ in 0..len {
        let next = &a + &b;
        sequence.push(std::mem::replace(&mut a, b));
        b = next;
    }

    Ok(sequence)
}

/// Trial division up to the integer square root.
pub fn is_prime(x: i64) -> bool {
    if x < 2 {
        return false;
    }

    let mut divisor = 2i64;
    while divisor <= x / divisor {
        if x % divisor == 0 {
            return false;
        }
        divisor += 1;
    }

    true
}

/// Primes of `xs`, in input order, duplicates kept.
pub fn get_primes(xs: &[i64]) -> Vec<i64> {
    xs.iter().copied().filter(|&x| is_prime(x)).collect()
}

pub fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

pub fn lcm(a: u64, b: u64) -> Result<u64, MathError> {
    let divisor = gcd(a, b);
    if divisor == 0 {
        return Err(MathError::InvalidInput);
    }

    (a / divisor).checked_mul(b).ok_or(MathError::Overflow)
}

pub fn calculate_lcm(xs: &[u64]) -> Result<u64, MathError> {
    let (&first, rest) = xs.split_first().ok_or(MathError::EmptyInput)?;
    rest.iter().try_fold(first, |acc, &x| lcm(acc, x))
}

pub fn calculate_hcf(xs: &[u64]) -> Result<u64, MathError> {
    let (&first, rest) = xs.split_first().ok_or(MathError::EmptyInput)?;
    Ok(rest.iter().fold(first, |acc, &x| gcd(acc, x)))
}
