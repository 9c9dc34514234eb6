use crate::utils::error::{KahinError, Result};
use chrono::{Datelike, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Birthdate as typed by the user: `DD.MM.YYYY`.
pub const BIRTHDATE_FORMAT: &str = "%d.%m.%Y";

/// A calendar date with a four-digit year. Every derivation starts here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Birthdate(NaiveDate);

impl Birthdate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(0..=9999).contains(&year) {
            return Err(KahinError::invalid_argument(format!(
                "year {} does not fit four digits",
                year
            )));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or_else(|| {
                KahinError::invalid_argument(format!(
                    "{:02}.{:02}.{:04} is not a calendar date",
                    day, month, year
                ))
            })
    }

    /// Parses exactly `DD.MM.YYYY`, surrounding whitespace allowed.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let shape_ok = trimmed.len() == 10
            && trimmed.char_indices().all(|(i, c)| match i {
                2 | 5 => c == '.',
                _ => c.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(KahinError::invalid_argument(format!(
                "'{}' is not in DD.MM.YYYY format",
                trimmed
            )));
        }

        let date = NaiveDate::parse_from_str(trimmed, BIRTHDATE_FORMAT).map_err(|e| {
            KahinError::invalid_argument(format!("'{}' is not a valid date: {}", trimmed, e))
        })?;
        Ok(Self(date))
    }

    pub fn year(&self) -> u32 {
        // Constructors keep the year in 0..=9999.
        self.0.year() as u32
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `DDMMYYYY`, the digit string the life path is summed over.
    pub fn digit_string(&self) -> String {
        format!("{:02}{:02}{:04}", self.day(), self.month(), self.year())
    }

    /// `YYYY.MM.DD`, used for report file names.
    pub fn report_stem(&self) -> String {
        format!("{:04}.{:02}.{:02}", self.year(), self.month(), self.day())
    }
}

impl fmt::Display for Birthdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}.{:02}.{:04}", self.day(), self.month(), self.year())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LifePath {
    pub raw_sum: u32,
    pub reduced: u8,
}

impl fmt::Display for LifePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.raw_sum, self.reduced)
    }
}

pub const PIN_CODE_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PinCode(pub [u8; PIN_CODE_LEN]);

impl PinCode {
    pub fn digits(&self) -> &[u8; PIN_CODE_LEN] {
        &self.0
    }

    /// `(position, digit)` pairs, positions starting at 1.
    pub fn positions(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.0.iter().enumerate().map(|(i, d)| (i as u8 + 1, *d))
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for digit in self.0 {
            write!(f, "{}", digit)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    /// Turkish label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Aries => "Koç",
            Self::Taurus => "Boğa",
            Self::Gemini => "İkizler",
            Self::Cancer => "Yengeç",
            Self::Leo => "Aslan",
            Self::Virgo => "Başak",
            Self::Libra => "Terazi",
            Self::Scorpio => "Akrep",
            Self::Sagittarius => "Yay",
            Self::Capricorn => "Oğlak",
            Self::Aquarius => "Kova",
            Self::Pisces => "Balık",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZodiacAssignment {
    pub sign: ZodiacSign,
    pub enneagram: u8,
}

/// Addresses one static content fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKey {
    LifePath(LifePath),
    PinDigit { position: u8, digit: u8 },
    Enneagram(u8),
}

impl ContentKey {
    pub fn file_stem(&self) -> String {
        match self {
            Self::LifePath(lp) => format!("{}_{}", lp.raw_sum, lp.reduced),
            Self::PinDigit { position, digit } => format!("{}_{}", position, digit),
            Self::Enneagram(n) => n.to_string(),
        }
    }

    pub fn markdown_file(&self) -> String {
        format!("{}.md", self.file_stem())
    }

    pub fn json_file(&self) -> String {
        format!("{}.json", self.file_stem())
    }
}

/// Which content collection a key is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shelf {
    MillmanFull,
    MillmanSummary,
    MillmanShortJson,
    MillmanLongJson,
    ForbesFull,
    ForbesSummary,
    Enneagrams,
}

/// One section of a structured life-path summary. Either a flat bullet list
/// or named sub-groups (positive, negative, advice, ...) in file order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SummarySection {
    Bullets(Vec<String>),
    Groups(IndexMap<String, Vec<String>>),
}

pub type SummaryDocument = IndexMap<String, SummarySection>;

/// Everything derived from one birthdate message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Message the replies are threaded under.
    pub message_id: i64,
    pub birthdate: Birthdate,
    pub life_path: LifePath,
    pub pin_code: PinCode,
    pub zodiac: ZodiacAssignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    FullTextMillman,
    FullTextForbes,
    SummaryMillman,
    SummaryForbes,
    JsonShortMillman,
    JsonLongMillman,
    ZodiacTraits,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::FullTextMillman,
        Action::FullTextForbes,
        Action::SummaryMillman,
        Action::SummaryForbes,
        Action::JsonShortMillman,
        Action::JsonLongMillman,
        Action::ZodiacTraits,
    ];

    /// Callback payload carried by the inline button.
    pub fn id(&self) -> &'static str {
        match self {
            Self::FullTextMillman => "full_text_millman",
            Self::FullTextForbes => "full_text_forbes",
            Self::SummaryMillman => "summary_millman",
            Self::SummaryForbes => "summary_forbes",
            Self::JsonShortMillman => "json_short_millman",
            Self::JsonLongMillman => "json_long_millman",
            Self::ZodiacTraits => "zodiac_traits",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.id() == id)
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::FullTextMillman => "Tam Metin (Millman)",
            Self::FullTextForbes => "Tam Metin (Forbes)",
            Self::SummaryMillman => "Özet (Millman)",
            Self::SummaryForbes => "Özet (Forbes)",
            Self::JsonShortMillman => "Kısa Maddeler (Millman)",
            Self::JsonLongMillman => "Uzun Maddeler (Millman)",
            Self::ZodiacTraits => "Enneagram Özellikleri",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Button {
    pub label: String,
    pub data: String,
}

impl From<Action> for Button {
    fn from(action: Action) -> Self {
        Self {
            label: action.button_label().to_string(),
            data: action.id().to_string(),
        }
    }
}

/// One outbound message. `text` is HTML and already fits the transport limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub reply_to: Option<i64>,
    /// One button per row.
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Text {
        sender: i64,
        chat: i64,
        message_id: i64,
        text: String,
    },
    Action {
        sender: i64,
        chat: i64,
        callback_id: String,
        data: String,
    },
}

impl InboundEvent {
    pub fn sender(&self) -> i64 {
        match self {
            Self::Text { sender, .. } | Self::Action { sender, .. } => *sender,
        }
    }

    pub fn chat(&self) -> i64 {
        match self {
            Self::Text { chat, .. } | Self::Action { chat, .. } => *chat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_birthdate() {
        let date = Birthdate::parse(" 31.07.2002 ").unwrap();
        assert_eq!((date.day(), date.month(), date.year()), (31, 7, 2002));
        assert_eq!(date.digit_string(), "31072002");
        assert_eq!(date.report_stem(), "2002.07.31");
        assert_eq!(date.to_string(), "31.07.2002");
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        for input in ["31.7.2002", "31/07/2002", "bugün 31.07.2002", "31.02.2002", "", "2002.07.31"] {
            assert!(
                matches!(Birthdate::parse(input), Err(KahinError::InvalidArgument { .. })),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(Birthdate::new(10_000, 1, 1).is_err());
        assert!(Birthdate::new(-1, 1, 1).is_err());
        assert!(Birthdate::new(2001, 2, 29).is_err());
        assert!(Birthdate::new(2000, 2, 29).is_ok());
    }

    #[test]
    fn test_content_key_file_names() {
        let lp = ContentKey::LifePath(LifePath { raw_sum: 15, reduced: 6 });
        assert_eq!(lp.markdown_file(), "15_6.md");
        assert_eq!(lp.json_file(), "15_6.json");
        assert_eq!(ContentKey::PinDigit { position: 9, digit: 2 }.markdown_file(), "9_2.md");
        assert_eq!(ContentKey::Enneagram(3).markdown_file(), "3.md");
    }

    #[test]
    fn test_action_ids_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_id(action.id()), Some(action));
        }
        assert_eq!(Action::from_id("unknown"), None);
    }

    #[test]
    fn test_pin_code_display_and_positions() {
        let pin = PinCode([4, 3, 4, 2, 6, 7, 7, 5, 2]);
        assert_eq!(pin.to_string(), "434267752");
        let positions: Vec<_> = pin.positions().collect();
        assert_eq!(positions.first(), Some(&(1, 4)));
        assert_eq!(positions.last(), Some(&(9, 2)));
    }
}
