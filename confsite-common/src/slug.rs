//! URL slug generation for talk titles

/// Convert a talk title into a URL slug.
///
/// Lowercases, folds common Latin accented characters to their base letter,
/// and collapses every run of non-alphanumeric characters into a single `-`.
pub fn to_slug(input: &str) -> String {
    let folded: String = input
        .to_lowercase()
        .chars()
        .map(strip_accent)
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    folded.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Fold a Latin accented character to its unaccented base letter
fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        'œ' => 'o',
        'æ' => 'a',
        other => other,
    }
}
