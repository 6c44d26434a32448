/// Longest nickname shown as-is in leaderboard tables.
pub const MAX_NICKNAME_LEN: usize = 15;

/// Characters kept when a nickname is shortened; ".." is appended.
const TRUNCATED_NICKNAME_LEN: usize = 13;

/// Canonical form used for every name and tier comparison.
///
/// Lowercases, folds accented Latin letters to their plain equivalents and
/// drops all whitespace, so `"Grão Mestre"`, `"grao mestre"` and
/// `"GRAOMESTRE"` normalize to the same key. Decomposed input (a base letter
/// followed by a combining mark) folds the same way as the precomposed form.
pub fn normalize(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .filter(|c| !c.is_whitespace() && !is_combining_mark(*c))
        .map(fold_diacritic)
        .collect()
}

/// Compare two names under [`normalize`].
pub fn names_match(a: &str, b: &str) -> bool {
    normalize(a) == normalize(b)
}

/// Combining Diacritical Marks block.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' | 'à' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'õ' | 'ö' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        'ñ' => 'n',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

/// Edit-distance similarity in `0.0..=1.0` between two normalized names.
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    // Levenshtein distance, one row at a time.
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    1.0 - previous[b.len()] as f64 / longest as f64
}

/// Up to `limit` candidates scoring at least `cutoff` against `query`, best
/// first. Ties keep candidate order.
pub fn closest_matches<'a>(query: &str, candidates: &'a [String], limit: usize, cutoff: f64) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &str)> = candidates
        .iter()
        .map(|candidate| (similarity(query, candidate), candidate.as_str()))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.into_iter().take(limit).map(|(_, name)| name).collect()
}

/// Shorten a nickname for table display: anything longer than
/// [`MAX_NICKNAME_LEN`] characters becomes its first 13 characters plus "..".
pub fn truncate_nickname(nickname: &str) -> String {
    if nickname.chars().count() > MAX_NICKNAME_LEN {
        let mut short: String = nickname.chars().take(TRUNCATED_NICKNAME_LEN).collect();
        short.push_str("..");
        short
    } else {
        nickname.to_string()
    }
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
