//! Normalization properties over a spread of realistic inputs
//!
//! The output must never contain bracketed annotations, tag-like
//! substrings, URLs, punctuation or tokens with digits, and the chain must
//! be deterministic and stable on its own output.

use demo_fn::normalize::{normalize, PUNCTUATION};

const SAMPLES: &[&str] = &[
    "",
    "   ",
    "BREAKING: [Reuters] Scientists confirm http://fake.example moon is made of cheese!!! 123abc",
    "<p>Officials said <b>nothing</b></p> [photo: AP]",
    "Visit www.example.com/news?id=42 for MORE",
    "The G7 summit in 2019 — covid19 and 5G rumours",
    "snake_case_words and __dunder__ names",
    "Unicode café naïve résumé ÉTÉ",
    "multi\nline\ttext\r\nwith [a\nbracket] pieces",
    "[unclosed bracket and ]stray close",
    "emoji 🎉 and math ∑ symbols 3.14",
];

fn assert_clean(input: &str, output: &str) {
    assert!(!output.contains('['), "bracket left in {:?} -> {:?}", input, output);
    assert!(!output.contains(']'), "bracket left in {:?} -> {:?}", input, output);
    assert!(!output.contains('<') && !output.contains('>'), "tag left in {:?}", output);
    assert!(!output.contains("http://") && !output.contains("https://"), "url left in {:?}", output);
    assert!(!output.contains("www."), "url left in {:?}", output);
    assert!(
        !output.chars().any(|c| PUNCTUATION.contains(c)),
        "punctuation left in {:?} -> {:?}",
        input,
        output
    );
    for token in output.split_whitespace() {
        assert!(
            !token.chars().any(|c| c.is_numeric()),
            "digit token {:?} left in {:?}",
            token,
            output
        );
    }
}

#[test]
fn test_outputs_are_clean() {
    for input in SAMPLES {
        let output = normalize(input);
        assert_clean(input, &output);
    }
}

#[test]
fn test_empty_string() {
    assert_eq!(normalize(""), "");
}

#[test]
fn test_deterministic() {
    for input in SAMPLES {
        assert_eq!(normalize(input), normalize(input));
    }
}

#[test]
fn test_stable_on_own_output() {
    for input in SAMPLES {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "second pass changed {:?}", input);
    }
}

#[test]
fn test_output_is_lowercase() {
    for input in SAMPLES {
        let output = normalize(input);
        assert_eq!(output.to_lowercase(), output);
    }
}

#[test]
fn test_breaking_news_scenario() {
    let input =
        "BREAKING: [Reuters] Scientists confirm http://fake.example moon is made of cheese!!! 123abc";
    let output = normalize(input);

    assert!(output
        .chars()
        .all(|c| c == ' ' || (c.is_alphabetic() && c.is_lowercase())));
    assert!(!output.contains("reuters"));
    assert!(!output.contains("://"));
    assert!(!output.contains("fake.example"));
    assert!(!output.contains("123abc"));
    assert_eq!(
        output.split_whitespace().collect::<Vec<_>>(),
        vec![
            "breaking", "scientists", "confirm", "http", "fake", "example", "moon", "is", "made",
            "of", "cheese"
        ]
    );
    assert_eq!(
        output,
        "breaking   scientists confirm http   fake example moon is made of cheese    "
    );
}

#[test]
fn test_underscores_join_words() {
    assert_eq!(normalize("snake_case"), "snakecase");
}

#[test]
fn test_digit_stripping_is_aggressive() {
    let output = normalize("g7 leaders met 2019 in paris");
    assert_eq!(
        output.split_whitespace().collect::<Vec<_>>(),
        vec!["leaders", "met", "in", "paris"]
    );
}
