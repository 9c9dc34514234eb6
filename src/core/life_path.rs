use crate::core::reducer::digital_root;
use crate::domain::model::{Birthdate, LifePath};

/// Digit sum of `DDMMYYYY` and its reduction. Sums of 9 or less are kept as is.
pub fn life_path(birthdate: &Birthdate) -> LifePath {
    let raw_sum: u32 = birthdate
        .digit_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .sum();

    let reduced = if raw_sum > 9 {
        digital_root(raw_sum as u64)
    } else {
        raw_sum as u8
    };

    LifePath { raw_sum, reduced }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Birthdate {
        Birthdate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_known_life_paths() {
        assert_eq!(life_path(&date(2002, 7, 31)), LifePath { raw_sum: 15, reduced: 6 });
        assert_eq!(life_path(&date(2002, 12, 22)), LifePath { raw_sum: 11, reduced: 2 });
    }

    #[test]
    fn test_small_sum_is_not_reduced() {
        // 01.01.2000 -> 0+1+0+1+2+0+0+0
        assert_eq!(life_path(&date(2000, 1, 1)), LifePath { raw_sum: 4, reduced: 4 });
    }

    #[test]
    fn test_large_sum_reduces_fully() {
        // 29.09.1999 -> 2+9+0+9+1+9+9+9 = 48 -> 12 -> 3
        assert_eq!(life_path(&date(1999, 9, 29)), LifePath { raw_sum: 48, reduced: 3 });
    }
}
