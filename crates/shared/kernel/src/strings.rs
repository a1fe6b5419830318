//! String canonicalisation for persistence-safe identifiers.
//!
//! Entities never decide how an alias is cleaned; they hand the raw value and a [`CleanMode`]
//! to a [`StringCleaner`]. [`DefaultStringCleaner`] is the stock implementation.

use bitflags::bitflags;
use std::borrow::Cow;

bitflags! {
    /// What kind of string is produced and which casing convention it follows.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CleanMode: u8 {
        /// Identifier charset: ASCII letters and digits, must start with a letter.
        const ALIAS = 1 << 0;
        /// `siteEditors`
        const CAMEL_CASE = 1 << 1;
        /// `SiteEditors`
        const PASCAL_CASE = 1 << 2;
        /// `site-editors`
        const LOWER_CASE = 1 << 3;
    }
}

/// Turns free text into a clean identifier.
pub trait StringCleaner: Send + Sync {
    fn clean(&self, input: &str, mode: CleanMode) -> String;
}

/// Word-based cleaner: folds accented Latin letters to ASCII (`é` to `e`, `ß` to `ss`),
/// splits on anything that is not an ASCII letter or digit, then joins the words according
/// to the casing flag.
///
/// Without a casing flag the words are concatenated unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultStringCleaner;

impl StringCleaner for DefaultStringCleaner {
    fn clean(&self, input: &str, mode: CleanMode) -> String {
        let input = fold_to_ascii(input);
        let mut words: Vec<&str> =
            input.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()).collect();

        if mode.contains(CleanMode::ALIAS) {
            strip_leading_digits(&mut words);
        }

        if mode.contains(CleanMode::LOWER_CASE) {
            return words.iter().map(|w| w.to_ascii_lowercase()).collect::<Vec<_>>().join("-");
        }

        let mut out = String::with_capacity(input.len());
        for (index, word) in words.iter().enumerate() {
            if mode.contains(CleanMode::CAMEL_CASE) {
                if index == 0 {
                    out.push_str(&lower_first(word));
                } else {
                    out.push_str(&upper_first(word));
                }
            } else if mode.contains(CleanMode::PASCAL_CASE) {
                out.push_str(&upper_first(word));
            } else {
                out.push_str(word);
            }
        }
        out
    }
}

/// Replaces accented Latin letters by their ASCII base; other characters pass through.
fn fold_to_ascii(input: &str) -> Cow<'_, str> {
    if input.is_ascii() {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match fold_char(c) {
            Some(folded) => out.push_str(folded),
            None => out.push(c),
        }
    }
    Cow::Owned(out)
}

const fn fold_char(c: char) -> Option<&'static str> {
    Some(match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' | 'ā' | 'ă' | 'ą' => "a",
        'À' | 'Á' | 'Â' | 'Ã' | 'Ä' | 'Å' | 'Ā' | 'Ă' | 'Ą' => "A",
        'ç' | 'ć' | 'č' => "c",
        'Ç' | 'Ć' | 'Č' => "C",
        'ď' | 'đ' => "d",
        'Ď' | 'Đ' => "D",
        'è' | 'é' | 'ê' | 'ë' | 'ē' | 'ė' | 'ę' | 'ě' => "e",
        'È' | 'É' | 'Ê' | 'Ë' | 'Ē' | 'Ė' | 'Ę' | 'Ě' => "E",
        'ì' | 'í' | 'î' | 'ï' | 'ī' | 'į' | 'ı' => "i",
        'Ì' | 'Í' | 'Î' | 'Ï' | 'Ī' | 'Į' | 'İ' => "I",
        'ł' | 'ľ' | 'ĺ' => "l",
        'Ł' | 'Ľ' | 'Ĺ' => "L",
        'ñ' | 'ń' | 'ň' => "n",
        'Ñ' | 'Ń' | 'Ň' => "N",
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' | 'ō' | 'ő' => "o",
        'Ò' | 'Ó' | 'Ô' | 'Õ' | 'Ö' | 'Ø' | 'Ō' | 'Ő' => "O",
        'ŕ' | 'ř' => "r",
        'Ŕ' | 'Ř' => "R",
        'ś' | 'š' | 'ş' => "s",
        'Ś' | 'Š' | 'Ş' => "S",
        'ť' | 'ţ' => "t",
        'Ť' | 'Ţ' => "T",
        'ù' | 'ú' | 'û' | 'ü' | 'ū' | 'ů' | 'ű' | 'ų' => "u",
        'Ù' | 'Ú' | 'Û' | 'Ü' | 'Ū' | 'Ů' | 'Ű' | 'Ų' => "U",
        'ý' | 'ÿ' => "y",
        'Ý' | 'Ÿ' => "Y",
        'ź' | 'ż' | 'ž' => "z",
        'Ź' | 'Ż' | 'Ž' => "Z",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "Ae",
        'œ' => "oe",
        'Œ' => "Oe",
        'þ' => "th",
        'Þ' => "Th",
        _ => return None,
    })
}

fn strip_leading_digits(words: &mut Vec<&str>) {
    while let Some(first) = words.first_mut() {
        let trimmed = first.trim_start_matches(|c: char| c.is_ascii_digit());
        if trimmed.is_empty() {
            words.remove(0);
        } else {
            *first = trimmed;
            break;
        }
    }
}

/// `"SiteEditors"` -> `"siteEditors"`, `"HTMLBlock"` -> `"htmlBlock"`.
fn lower_first(word: &str) -> String {
    let upper_run = word.chars().take_while(char::is_ascii_uppercase).count();
    match upper_run {
        0 => word.to_owned(),
        n if n == word.len() => word.to_ascii_lowercase(),
        1 => format!("{}{}", &word[..1].to_ascii_lowercase(), &word[1..]),
        // Keep the last capital of an acronym as the start of the next word.
        n => format!("{}{}", &word[..n - 1].to_ascii_lowercase(), &word[n - 1..]),
    }
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut out = String::with_capacity(word.len());
        out.push(first.to_ascii_uppercase());
        out.push_str(chars.as_str());
        out
    })
}
