use crate::core::reducer::digital_root;
use crate::domain::model::{Birthdate, PinCode};

pub fn pin_code(birthdate: &Birthdate) -> PinCode {
    let r = |n: u32| digital_root(n as u64) as u32;

    let d1 = r(birthdate.day());
    let d2 = r(birthdate.month());
    let d3 = r(birthdate.year());
    let d4 = r(d1 + d2 + d3);
    let d5 = r(d1 + d4);
    let d6 = r(d1 + d2);
    let d7 = r(d2 + d3);
    let d8 = r(d6 + d7);
    // Ninth digit ("sense of life") folds the first eight together.
    let d9 = r(d1 + d2 + d3 + d4 + d5 + d6 + d7 + d8);

    PinCode([d1, d2, d3, d4, d5, d6, d7, d8, d9].map(|d| d as u8))
}
