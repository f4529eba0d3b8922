//! Text normalization applied before TF-IDF vectorization
//!
//! The pre-trained vectorizer was fitted on text cleaned by exactly this
//! chain, so every step and its position in [`STEPS`] is part of the model
//! contract. Any change here silently shifts the classifier's input
//! distribution.
//!
//! Steps run in order, each on the previous step's output. Later patterns
//! assume earlier ones already ran; in particular, once non-word characters
//! are blanked (step 3) the URL and HTML-tag patterns can no longer match
//! anything. They are kept so the chain stays identical to the one the
//! model was trained with.

use once_cell::sync::Lazy;
use regex::Regex;

/// One word character: any letter, any numeric character, or `_`
///
/// This is the `\w` the training pipeline used (`str.isalnum()` plus
/// underscore). The regex crate's own `\w` also admits combining marks,
/// connector punctuation and alphabetic symbols like `Ⓐ`, and rejects
/// numerics outside `Nd` like `²`, so it is never used directly here.
pub const WORD_CHAR: &str = r"[\p{L}\p{N}_]";

/// ASCII punctuation characters removed by [`strip_punctuation`]
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

static BRACKETED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[.*?\]").expect("bracketed annotation regex"));
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\p{L}\p{N}_]").expect("non-word regex"));
static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("url regex"));
static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>+").expect("html tag regex"));
static PUNCT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("[{}]", regex::escape(PUNCTUATION))).expect("punctuation regex")
});
static DIGIT_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{w}*\d{w}*", w = WORD_CHAR)).expect("digit token regex")
});

/// One named transformation in the normalization chain
#[derive(Debug, Clone, Copy)]
pub struct NormalizeStep {
    pub name: &'static str,
    pub apply: fn(&str) -> String,
}

/// The normalization chain, in application order
pub const STEPS: [NormalizeStep; 7] = [
    NormalizeStep { name: "lowercase", apply: lowercase },
    NormalizeStep { name: "strip_bracketed", apply: strip_bracketed },
    NormalizeStep { name: "blank_non_word", apply: blank_non_word },
    NormalizeStep { name: "strip_urls", apply: strip_urls },
    NormalizeStep { name: "strip_html_tags", apply: strip_html_tags },
    NormalizeStep { name: "strip_punctuation", apply: strip_punctuation },
    NormalizeStep { name: "strip_digit_tokens", apply: strip_digit_tokens },
];

/// Normalize raw article text for vectorization
///
/// Never fails; empty input yields an empty string.
pub fn normalize(text: &str) -> String {
    STEPS
        .iter()
        .fold(text.to_string(), |current, step| (step.apply)(&current))
}

/// Lower-case the whole string
pub fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

/// Remove `[...]` annotations, brackets included (non-greedy)
pub fn strip_bracketed(text: &str) -> String {
    BRACKETED.replace_all(text, "").into_owned()
}

/// Replace each character that is not a letter, digit or underscore with a space
pub fn blank_non_word(text: &str) -> String {
    NON_WORD.replace_all(text, " ").into_owned()
}

/// Remove `http(s)://...` and `www....` runs up to the next whitespace
pub fn strip_urls(text: &str) -> String {
    URL.replace_all(text, "").into_owned()
}

/// Remove `<...>` tag-like substrings
pub fn strip_html_tags(text: &str) -> String {
    HTML_TAG.replace_all(text, "").into_owned()
}

/// Remove every ASCII punctuation character
pub fn strip_punctuation(text: &str) -> String {
    PUNCT.replace_all(text, "").into_owned()
}

/// Remove every word-character run that contains a digit
///
/// Pure numbers go too. This is deliberately as loose as the pattern the
/// training data was cleaned with.
pub fn strip_digit_tokens(text: &str) -> String {
    DIGIT_TOKEN.replace_all(text, "").into_owned()
}
