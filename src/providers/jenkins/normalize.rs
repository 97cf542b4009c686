use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Folds text for search comparisons.
///
/// Accents are stripped, letters lower-cased, and whitespace runs collapsed
/// to a single space with no leading or trailing space. Criteria and job
/// fields go through this same function.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}
