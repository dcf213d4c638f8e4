//! BIP-39 wordlist tables and mnemonic conversion between languages.
//!
//! A mnemonic word is semantically its index: converting a mnemonic between
//! languages maps each word to its index in the source list and emits the
//! word at the same index in the target list. Checksum validation stays
//! with the wallet toolkit; this layer never re-orders or guesses words.

use crate::error::{Result, SeedkitError};
use bip39::Language;
use std::collections::HashMap;
use std::sync::OnceLock;

pub const WORDLIST_SIZE: usize = 2048;

/// Every language published in the BIP-39 reference wordlists.
pub const ALL_LANGUAGES: [Language; 10] = [
    Language::English,
    Language::Japanese,
    Language::Korean,
    Language::Spanish,
    Language::SimplifiedChinese,
    Language::TraditionalChinese,
    Language::French,
    Language::Italian,
    Language::Czech,
    Language::Portuguese,
];

/// One language's fixed 2048-entry table with an O(1) inverse map, built
/// once per language and cached for the process lifetime.
pub struct Wordlist {
    language: Language,
    words: &'static [&'static str],
    index: HashMap<&'static str, u16>,
}

impl Wordlist {
    fn new(language: Language) -> Self {
        let words = language.word_list();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, &word)| (word, i as u16))
            .collect();
        Self {
            language,
            words,
            index,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Word at `index`, or `None` past the end of the table.
    pub fn word(&self, index: u16) -> Option<&'static str> {
        self.words.get(index as usize).copied()
    }

    /// Index of `word`, or `None` when the word is not in this list.
    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }
}

/// Shared table for `language`.
pub fn wordlist(language: Language) -> &'static Wordlist {
    static REGISTRY: OnceLock<Vec<Wordlist>> = OnceLock::new();
    let registry =
        REGISTRY.get_or_init(|| ALL_LANGUAGES.iter().map(|&lang| Wordlist::new(lang)).collect());
    &registry[language_slot(language)]
}

fn language_slot(language: Language) -> usize {
    match language {
        Language::English => 0,
        Language::Japanese => 1,
        Language::Korean => 2,
        Language::Spanish => 3,
        Language::SimplifiedChinese => 4,
        Language::TraditionalChinese => 5,
        Language::French => 6,
        Language::Italian => 7,
        Language::Czech => 8,
        Language::Portuguese => 9,
    }
}

/// Parse a language name or ISO-ish code as accepted on the CLI.
pub fn parse_language(name: &str) -> Option<Language> {
    match name.to_lowercase().as_str() {
        "english" | "en" => Some(Language::English),
        "japanese" | "ja" => Some(Language::Japanese),
        "korean" | "ko" => Some(Language::Korean),
        "spanish" | "es" => Some(Language::Spanish),
        "chinese-simplified" | "zh-hans" | "zh" => Some(Language::SimplifiedChinese),
        "chinese-traditional" | "zh-hant" => Some(Language::TraditionalChinese),
        "french" | "fr" => Some(Language::French),
        "italian" | "it" => Some(Language::Italian),
        "czech" | "cs" => Some(Language::Czech),
        "portuguese" | "pt" => Some(Language::Portuguese),
        _ => None,
    }
}

/// Convert a mnemonic word-for-word from one wordlist to another.
///
/// Order and count are preserved exactly. Fails with `UnknownWord` naming
/// the word and its position when a word is absent from the source list.
pub fn convert<S: AsRef<str>>(
    words: &[S],
    from: &Wordlist,
    to: &Wordlist,
) -> Result<Vec<String>> {
    words
        .iter()
        .enumerate()
        .map(|(position, word)| {
            let word = word.as_ref();
            let index = from
                .index_of(word)
                .ok_or_else(|| SeedkitError::UnknownWord {
                    word: word.to_string(),
                    position,
                })?;
            // both tables are exactly WORDLIST_SIZE entries
            Ok(to.words[index as usize].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_are_complete() {
        for &language in &ALL_LANGUAGES {
            let list = wordlist(language);
            assert_eq!(list.words.len(), WORDLIST_SIZE);
            assert_eq!(list.index.len(), WORDLIST_SIZE, "{:?} has duplicates", language);
        }
    }

    #[test]
    fn test_index_round_trip() {
        let english = wordlist(Language::English);
        assert_eq!(english.word(0), Some("abandon"));
        assert_eq!(english.index_of("abandon"), Some(0));
        assert_eq!(english.index_of("zoo"), Some(2047));
        assert_eq!(english.index_of("notaword"), None);
    }

    #[test]
    fn test_convert_preserves_order_and_count() {
        let english = wordlist(Language::English);
        let spanish = wordlist(Language::Spanish);
        let words = ["zoo", "abandon", "zoo"];
        let converted = convert(&words, english, spanish).unwrap();
        assert_eq!(converted.len(), 3);
        assert_eq!(converted[0], converted[2]);
        assert_ne!(converted[0], converted[1]);
    }

    #[test]
    fn test_convert_round_trip_all_languages() {
        let english = wordlist(Language::English);
        let words = [
            "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract",
            "absurd", "abuse", "access", "zoo",
        ];
        for &language in &ALL_LANGUAGES {
            let other = wordlist(language);
            let there = convert(&words, english, other).unwrap();
            let back = convert(&there, other, english).unwrap();
            assert_eq!(back, words.to_vec(), "round trip failed for {:?}", language);
        }
    }

    #[test]
    fn test_unknown_word_names_word_and_position() {
        let english = wordlist(Language::English);
        let spanish = wordlist(Language::Spanish);
        let words = ["abandon", "definitely-not-bip39"];
        match convert(&words, english, spanish) {
            Err(SeedkitError::UnknownWord { word, position }) => {
                assert_eq!(word, "definitely-not-bip39");
                assert_eq!(position, 1);
            }
            other => panic!("expected UnknownWord, got {:?}", other),
        }
    }

    #[test]
    fn test_no_cross_list_guessing() {
        // a Spanish word must not resolve against the English list
        let english = wordlist(Language::English);
        let spanish = wordlist(Language::Spanish);
        let first_spanish = spanish.word(0).unwrap();
        assert_eq!(spanish.index_of(first_spanish), Some(0));
        assert!(english.index_of(first_spanish).is_none());
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse_language("English"), Some(Language::English));
        assert_eq!(parse_language("zh-hant"), Some(Language::TraditionalChinese));
        assert_eq!(parse_language("klingon"), None);
    }
}
