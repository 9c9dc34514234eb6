use crate::core::{life_path::life_path, pin_code::pin_code, zodiac::zodiac};
use crate::domain::model::{
    Birthdate, ContentKey, LifePath, PinCode, Session, Shelf, ZodiacAssignment,
};
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;

/// All values derived from a birthdate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub birthdate: Birthdate,
    pub life_path: LifePath,
    pub pin_code: PinCode,
    pub zodiac: ZodiacAssignment,
}

impl Profile {
    pub fn derive(birthdate: Birthdate) -> Result<Self> {
        Ok(Self {
            birthdate,
            life_path: life_path(&birthdate),
            pin_code: pin_code(&birthdate),
            zodiac: zodiac(&birthdate)?,
        })
    }

    pub fn into_session(self, message_id: i64) -> Session {
        Session {
            message_id,
            birthdate: self.birthdate,
            life_path: self.life_path,
            pin_code: self.pin_code,
            zodiac: self.zodiac,
        }
    }
}

pub fn life_path_text<C: ContentStore + ?Sized>(
    store: &C,
    shelf: Shelf,
    life_path: LifePath,
) -> Result<String> {
    store.lookup(shelf, &ContentKey::LifePath(life_path))
}

/// One fragment per pin position, in position order. Fails on the first
/// missing fragment.
pub fn pin_code_texts<C: ContentStore + ?Sized>(
    store: &C,
    shelf: Shelf,
    pin_code: &PinCode,
) -> Result<Vec<String>> {
    pin_code
        .positions()
        .map(|(position, digit)| store.lookup(shelf, &ContentKey::PinDigit { position, digit }))
        .collect()
}

pub fn enneagram_text<C: ContentStore + ?Sized>(
    store: &C,
    zodiac: &ZodiacAssignment,
) -> Result<String> {
    store.lookup(Shelf::Enneagrams, &ContentKey::Enneagram(zodiac.enneagram))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{SummaryDocument, ZodiacSign};
    use crate::utils::error::KahinError;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MapStore(HashMap<String, String>);

    impl ContentStore for MapStore {
        fn lookup(&self, _shelf: Shelf, key: &ContentKey) -> Result<String> {
            let name = key.markdown_file();
            self.0.get(&name).cloned().ok_or(KahinError::NotFound {
                path: PathBuf::from(name),
            })
        }

        fn lookup_summary(&self, _shelf: Shelf, key: &ContentKey) -> Result<SummaryDocument> {
            Err(KahinError::NotFound {
                path: PathBuf::from(key.json_file()),
            })
        }
    }

    #[test]
    fn test_profile_for_known_date() {
        let profile = Profile::derive(Birthdate::new(2002, 7, 31).unwrap()).unwrap();
        assert_eq!(profile.life_path, LifePath { raw_sum: 15, reduced: 6 });
        assert_eq!(profile.pin_code.to_string(), "474612243");
        assert_eq!(profile.zodiac.sign, ZodiacSign::Leo);
    }

    #[test]
    fn test_pin_code_texts_in_position_order() {
        let pin = PinCode([4, 3, 4, 2, 6, 7, 7, 5, 2]);
        let store = MapStore(
            pin.positions()
                .map(|(p, d)| (format!("{p}_{d}.md"), format!("parça {p}")))
                .collect(),
        );
        let texts = pin_code_texts(&store, Shelf::ForbesFull, &pin).unwrap();
        assert_eq!(texts.len(), 9);
        assert_eq!(texts[0], "parça 1");
        assert_eq!(texts[8], "parça 9");
    }

    #[test]
    fn test_pin_code_texts_fail_on_missing_fragment() {
        let pin = PinCode([4, 3, 4, 2, 6, 7, 7, 5, 2]);
        let store = MapStore(HashMap::from([("1_4.md".to_string(), "tek".to_string())]));
        let err = pin_code_texts(&store, Shelf::ForbesFull, &pin).unwrap_err();
        assert!(matches!(err, KahinError::NotFound { path } if path == PathBuf::from("2_3.md")));
    }
}
