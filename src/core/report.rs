use crate::core::reading::{enneagram_text, life_path_text, pin_code_texts, Profile};
use crate::domain::model::{Birthdate, Shelf};
use crate::domain::ports::ContentStore;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ReportMethod {
    /// Life path reading.
    Millman,
    /// Pin code reading.
    Forbes,
    /// Enneagram reading of the zodiac sign.
    Zodiac,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub birthdate: Birthdate,
    /// One-line description of the derived value, for the console.
    pub headline: String,
    pub content: String,
}

impl Report {
    pub fn file_name(&self) -> String {
        format!("{}.md", self.birthdate.report_stem())
    }
}

pub fn build_report<C: ContentStore + ?Sized>(
    store: &C,
    birthdate: Birthdate,
    method: ReportMethod,
) -> Result<Report> {
    let profile = Profile::derive(birthdate)?;

    let (headline, content) = match method {
        ReportMethod::Millman => (
            format!("Life path for birthdate {} is {}", birthdate, profile.life_path),
            life_path_text(store, Shelf::MillmanFull, profile.life_path)?,
        ),
        ReportMethod::Forbes => {
            let texts = pin_code_texts(store, Shelf::ForbesFull, &profile.pin_code)?;
            let content = texts.iter().map(|t| format!("{}\n\n", t)).collect();
            (
                format!("Pin code for birthdate {} is {}", birthdate, profile.pin_code),
                content,
            )
        }
        ReportMethod::Zodiac => (
            format!(
                "Zodiac sign for birthdate {} is {} (enneagram {})",
                birthdate, profile.zodiac.sign, profile.zodiac.enneagram
            ),
            enneagram_text(store, &profile.zodiac)?,
        ),
    };

    Ok(Report {
        birthdate,
        headline,
        content,
    })
}

/// Writes `{YYYY.MM.DD}.md` under `reports_dir`, creating the directory.
pub fn write_report(reports_dir: &Path, report: &Report) -> Result<PathBuf> {
    std::fs::create_dir_all(reports_dir)?;
    let path = reports_dir.join(report.file_name());
    std::fs::write(&path, &report.content)?;
    Ok(path)
}
