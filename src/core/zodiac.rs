use crate::domain::model::{Birthdate, ZodiacAssignment, ZodiacSign};
use crate::utils::error::{KahinError, Result};

/// One row of the cusp table. Both ends are inclusive; a row may wrap the
/// new year (start month after end month).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZodiacRange {
    pub start: (u32, u32),
    pub end: (u32, u32),
    pub sign: ZodiacSign,
    pub enneagram: u8,
}

impl ZodiacRange {
    pub fn contains(&self, month: u32, day: u32) -> bool {
        let (start_month, start_day) = self.start;
        let (end_month, end_day) = self.end;
        (month == start_month && day >= start_day) || (month == end_month && day <= end_day)
    }

    pub fn assignment(&self) -> ZodiacAssignment {
        ZodiacAssignment {
            sign: self.sign,
            enneagram: self.enneagram,
        }
    }
}

const fn row(start: (u32, u32), end: (u32, u32), sign: ZodiacSign, enneagram: u8) -> ZodiacRange {
    ZodiacRange {
        start,
        end,
        sign,
        enneagram,
    }
}

pub const ZODIAC_TABLE: [ZodiacRange; 12] = [
    row((3, 21), (4, 20), ZodiacSign::Aries, 8),
    row((4, 21), (5, 21), ZodiacSign::Taurus, 9),
    row((5, 22), (6, 21), ZodiacSign::Gemini, 7),
    row((6, 22), (7, 22), ZodiacSign::Cancer, 2),
    row((7, 23), (8, 23), ZodiacSign::Leo, 3),
    row((8, 24), (9, 23), ZodiacSign::Virgo, 1),
    row((9, 24), (10, 23), ZodiacSign::Libra, 9),
    row((10, 24), (11, 22), ZodiacSign::Scorpio, 8),
    row((11, 23), (12, 21), ZodiacSign::Sagittarius, 7),
    row((12, 22), (1, 20), ZodiacSign::Capricorn, 6),
    row((1, 21), (2, 19), ZodiacSign::Aquarius, 5),
    row((2, 20), (3, 20), ZodiacSign::Pisces, 4),
];

pub fn find_zodiac(month: u32, day: u32) -> Result<ZodiacAssignment> {
    ZODIAC_TABLE
        .iter()
        .find(|range| range.contains(month, day))
        .map(ZodiacRange::assignment)
        .ok_or_else(|| {
            KahinError::invalid_argument(format!("no zodiac sign covers {:02}.{:02}", day, month))
        })
}

pub fn zodiac(birthdate: &Birthdate) -> Result<ZodiacAssignment> {
    find_zodiac(birthdate.month(), birthdate.day())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};

    fn sign_of(y: i32, m: u32, d: u32) -> ZodiacSign {
        zodiac(&Birthdate::new(y, m, d).unwrap()).unwrap().sign
    }

    #[test]
    fn test_known_signs() {
        assert_eq!(sign_of(2002, 7, 31).label(), "Aslan");
        assert_eq!(sign_of(1452, 4, 15), ZodiacSign::Aries);
        assert_eq!(sign_of(1840, 5, 7), ZodiacSign::Taurus);
        assert_eq!(sign_of(1942, 5, 22), ZodiacSign::Gemini);
        assert_eq!(sign_of(1912, 6, 23), ZodiacSign::Cancer);
        assert_eq!(sign_of(1769, 8, 15), ZodiacSign::Leo);
        assert_eq!(sign_of(1981, 9, 4), ZodiacSign::Virgo);
        assert_eq!(sign_of(1969, 10, 3), ZodiacSign::Libra);
        assert_eq!(sign_of(1867, 11, 7), ZodiacSign::Scorpio);
        assert_eq!(sign_of(2001, 12, 18), ZodiacSign::Sagittarius);
        assert_eq!(sign_of(1892, 1, 3), ZodiacSign::Capricorn);
        assert_eq!(sign_of(1564, 2, 15), ZodiacSign::Aquarius);
        assert_eq!(sign_of(1879, 3, 14), ZodiacSign::Pisces);
    }

    #[test]
    fn test_every_day_of_leap_year_has_exactly_one_sign() {
        let mut day = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        while day.year() == 2000 {
            let hits = ZODIAC_TABLE
                .iter()
                .filter(|r| r.contains(day.month(), day.day()))
                .count();
            assert_eq!(hits, 1, "{day} matched {hits} rows");
            day = day.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_cusps_are_inclusive_on_both_sides() {
        for (i, range) in ZODIAC_TABLE.iter().enumerate() {
            let next = &ZODIAC_TABLE[(i + 1) % ZODIAC_TABLE.len()];
            let (end_month, end_day) = range.end;
            let (start_month, start_day) = next.start;

            assert_eq!(find_zodiac(end_month, end_day).unwrap().sign, range.sign);
            assert_eq!(find_zodiac(start_month, start_day).unwrap().sign, next.sign);
        }
    }

    #[test]
    fn test_enneagram_follows_sign() {
        let leo = zodiac(&Birthdate::new(2002, 7, 31).unwrap()).unwrap();
        assert_eq!(leo.enneagram, 3);
        let capricorn = find_zodiac(1, 1).unwrap();
        assert_eq!((capricorn.sign, capricorn.enneagram), (ZodiacSign::Capricorn, 6));
    }

    #[test]
    fn test_impossible_day_is_invalid_argument() {
        assert!(matches!(find_zodiac(13, 1), Err(KahinError::InvalidArgument { .. })));
    }
}
