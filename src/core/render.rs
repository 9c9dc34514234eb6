//! HTML rendering for Telegram's `parse_mode=HTML`.

use crate::domain::model::{Session, SummaryDocument, SummarySection, ZodiacAssignment};

/// Section order of the structured summaries.
pub const SUMMARY_SECTIONS: [&str; 8] = [
    "key_traits",
    "challenges",
    "opportunities",
    "health",
    "relationships",
    "talents_work_finances",
    "fulfilling_destiny",
    "famous_people",
];

pub fn heading(text: &str) -> String {
    format!("<b><u>{}</u></b>", text)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes the text and turns markdown `#` heading lines into bold,
/// underlined titles.
pub fn markdown_to_html(content: &str) -> String {
    content
        .lines()
        .map(|line| {
            if line.starts_with('#') {
                let title = line.rsplit('#').next().unwrap_or_default().trim();
                heading(&escape_html(title))
            } else {
                escape_html(line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section_title(key: &str) -> String {
    let title = match key {
        "challenges" => "ZORLUKLAR",
        "famous_people" => "ÜNLÜ İNSANLAR",
        "fulfilling_destiny" => "KADERİNİ GERÇEKLEŞTİRMEK",
        "guidelines" | "advice" => "TAVSİYELER",
        "questions" => "SORULAR",
        "health" => "SAĞLIK",
        "positive" => "POZİTİF YÖNLER",
        "negative" => "NEGATİF YÖNLER",
        "key_traits" => "TEMEL ÖZELLİKLER",
        "opportunities" => "FIRSATLAR",
        "relationships" => "İLİŞKİLER",
        "talents_work_finances" => "YETENEKLER, İŞ VE FİNANS",
        other => return heading(&escape_html(&other.replace('_', " ").to_uppercase())),
    };
    heading(title)
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {}", escape_html(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_section(key: &str, section: &SummarySection, out: &mut String) {
    match section {
        SummarySection::Bullets(items) => {
            if !items.is_empty() {
                out.push_str(&section_title(key));
                out.push_str("\n\n");
                out.push_str(&bullets(items));
                out.push_str("\n\n");
            }
        }
        SummarySection::Groups(groups) => {
            out.push_str(&section_title(key));
            out.push_str("\n\n");
            for (name, items) in groups {
                if !items.is_empty() {
                    out.push_str(&section_title(name));
                    out.push_str("\n\n");
                    out.push_str(&bullets(items));
                    out.push_str("\n\n");
                }
            }
        }
    }
}

/// Bullet-point rendering of a summary document under `title`. Sections
/// missing from the document are skipped.
pub fn render_summary(title: &str, document: &SummaryDocument) -> String {
    let mut out = heading(title);
    out.push_str("\n\n");
    for key in SUMMARY_SECTIONS {
        if let Some(section) = document.get(key) {
            render_section(key, section, &mut out);
        }
    }
    out.trim().to_string()
}

pub fn status_card(session: &Session) -> String {
    format!(
        "{}: {}\n{}: {}\n{}: {}\n{}: {}",
        heading("HAYAT SAYISI"),
        session.life_path,
        heading("PİN KODU"),
        session.pin_code,
        heading("BURÇ"),
        session.zodiac.sign,
        heading("BURCUN ENNEAGRAM DEĞERİ"),
        session.zodiac.enneagram,
    )
}

pub fn zodiac_traits(zodiac: &ZodiacAssignment, content: &str) -> String {
    markdown_to_html(&format!(
        "Burç: {} \nEnneagram: {}\nİçerik: {}",
        zodiac.sign, zodiac.enneagram, content
    ))
}

pub fn paraphrased_summary(paraphrased: &str) -> String {
    format!("{}\n{}", heading("GENEL ÖZET"), escape_html(paraphrased))
}
