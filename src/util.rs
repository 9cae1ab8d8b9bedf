use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static INTRO_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Вовед во |Операции со |Основи на ").expect("prefix pattern is valid")
});

/// Drops the first introductory prefix ("Вовед во ", ...) from a concept title.
pub fn short_label(title: &str) -> Cow<'_, str> {
    INTRO_PREFIX.replace(title, "")
}

pub fn base_title(title: &str) -> String {
    short_label(title).trim().to_owned()
}

pub fn roman_grade(level: u32) -> String {
    const NUMERALS: [&str; 12] = [
        "I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X", "XI", "XII",
    ];

    match level {
        1..=12 => NUMERALS[level as usize - 1].to_owned(),
        _ => level.to_string(),
    }
}
