use unicode_normalization::UnicodeNormalization;

pub const FALLBACK_SLUG: &str = "work";

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for ch in text.nfd().filter(|ch| !COMBINING_MARKS.contains(ch)) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        return FALLBACK_SLUG.to_string();
    }
    slug
}
