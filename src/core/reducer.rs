use crate::utils::error::{KahinError, Result};

pub fn digit_sum(mut n: u64) -> u64 {
    let mut sum = 0;
    while n > 0 {
        sum += n % 10;
        n /= 10;
    }
    sum
}

/// Iterated digit sum until a single digit remains.
pub fn digital_root(mut n: u64) -> u8 {
    while n >= 10 {
        n = digit_sum(n);
    }
    n as u8
}

/// Checked entry point for untrusted input; negative numbers have no
/// digital root here.
pub fn reduce(n: i64) -> Result<u8> {
    u64::try_from(n)
        .map(digital_root)
        .map_err(|_| KahinError::invalid_argument(format!("cannot reduce negative number {}", n)))
}
