use unicode_normalization::UnicodeNormalization;

const APOSTROPHES: [char; 5] = ['\u{0027}', '\u{2018}', '\u{2019}', '\u{201B}', '\u{02BC}'];

/// Turn a display title into the stem used for its image files.
///
/// "Léon: The Professional" becomes "leon_the_professional". The result only
/// holds `[a-z0-9_]`, never starts or ends with `_`, and is stable under a
/// second pass.
pub fn normalize_title(title: &str) -> String {
    let lowered = title.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_sep = false;

    for ch in lowered.nfd().filter(|c| !is_combining_mark(*c)) {
        let ch = if APOSTROPHES.contains(&ch) { '_' } else { ch };
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            out.push(ch);
        } else {
            pending_sep = true;
        }
    }

    out
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036F}').contains(&c)
}

/// Poster and backdrop paths for a title, relative to the page.
/// Nothing checks that the files exist.
pub fn asset_paths(assets_dir: &str, title: &str) -> (String, String) {
    let stem = normalize_title(title);
    let dir = assets_dir.trim_end_matches('/');
    (
        format!("{}/{}_poster.jpg", dir, stem),
        format!("{}/{}.jpg", dir, stem),
    )
}
