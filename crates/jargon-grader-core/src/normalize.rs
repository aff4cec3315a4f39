//! Text normalization.
//!
//! Turns raw input into a canonical string of lowercase letters, internal
//! hyphens and single spaces, ready for [`crate::tokenize`]. The pipeline is:
//!
//! 1. General cleaning through a [`TextCleaner`] (case, Unicode, whitespace)
//! 2. Blind removal of every `'s`
//! 3. Every character outside `[a-zA-Z- ]` becomes a space
//! 4. Hyphens touching a space become a space (`"3-dimensional"` must not
//!    leave `"-dimensional"` behind)
//! 5. Space runs collapse to one space
//! 6. Leading and trailing space is trimmed

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

/// Any character that can't appear in a normalized token.
static NON_WORD_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z\- ]").expect("valid regex"));

/// A hyphen with a space on either side.
static DANGLING_HYPHEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" -|- ").expect("valid regex"));

/// Runs of spaces.
static SPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" +").expect("valid regex"));

/// Horizontal whitespace runs (everything but line breaks).
static INLINE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Blank-line runs.
static LINE_BREAK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

/// General-purpose text cleaning applied before the jargon-specific steps.
pub trait TextCleaner {
    /// Clean `text`. Implementations should lowercase their output.
    fn clean(&self, text: &str) -> String;
}

/// The default cleaner: ASCII transliteration (`café` → `cafe`,
/// `Straße` → `strasse`), lowercasing, and whitespace normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCleaner;

impl TextCleaner for StandardCleaner {
    fn clean(&self, text: &str) -> String {
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        // NFKC first so decomposed accents reach the transliterator as one char.
        let mut ascii = String::with_capacity(text.len());
        for c in text.nfkc() {
            push_ascii(c, &mut ascii);
        }
        let lowered = ascii.to_lowercase();

        let lines: Vec<&str> = lowered.split('\n').map(str::trim).collect();
        let joined = INLINE_WHITESPACE.replace_all(&lines.join("\n"), " ").into_owned();
        LINE_BREAK_RUNS
            .replace_all(&joined, "\n")
            .trim()
            .to_string()
    }
}

/// Append the ASCII form of `c` to `out`.
///
/// Letters and digits are transliterated (`æ` → `ae`). Other symbols keep
/// their transliteration only when it has no letters in it, so `’` becomes
/// `'` but an emoji becomes a space rather than its name.
fn push_ascii(c: char, out: &mut String) {
    if c.is_ascii() {
        out.push(c);
        return;
    }
    let quote = fold_quote(c);
    if quote.is_ascii() {
        out.push(quote);
        return;
    }
    match deunicode::deunicode_char(c) {
        Some(ascii)
            if c.is_alphanumeric() || !ascii.bytes().any(|b| b.is_ascii_alphabetic()) =>
        {
            out.push_str(ascii);
        }
        _ => out.push(' '),
    }
}

/// Map typographic quotes onto their ASCII forms.
const fn fold_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{FF07}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' => '"',
        _ => c,
    }
}

/// Normalize text with the [`StandardCleaner`].
///
/// Returns an empty string when the input has no letters.
pub fn normalize(text: &str) -> String {
    normalize_with(&StandardCleaner, text)
}

/// Normalize text with a caller-supplied cleaner.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn normalize_with<C: TextCleaner + ?Sized>(cleaner: &C, text: &str) -> String {
    let cleaned = cleaner.clean(text);
    let without_possessives = remove_apos_s(&cleaned);
    let stripped = strip_characters(&without_possessives);
    remove_spaces(&stripped).trim().to_string()
}

/// Remove every `'s` from the text.
///
/// This is a plain substring removal, so `"it's"` becomes `"it"` and
/// `"o'shea"` becomes `"ohea"`.
pub fn remove_apos_s(text: &str) -> String {
    text.replace("'s", "")
}

/// Replace everything except letters, hyphens and spaces with a space, then
/// drop hyphens that touch a space.
///
/// The hyphen pass repeats until nothing touches a space, so `"a --- b"`
/// loses its middle hyphen too.
pub fn strip_characters(text: &str) -> String {
    let mut stripped = NON_WORD_CHARS.replace_all(text, " ").into_owned();
    while DANGLING_HYPHEN.is_match(&stripped) {
        stripped = DANGLING_HYPHEN.replace_all(&stripped, " ").into_owned();
    }
    stripped
}

/// Collapse runs of spaces into one.
pub fn remove_spaces(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(
            normalize("The the the cat sat on a mat."),
            "the the the cat sat on a mat"
        );
    }

    #[test]
    fn removes_possessive_suffix() {
        assert_eq!(normalize("The cat's toy"), "the cat toy");
    }

    #[test]
    fn possessive_removal_is_blind() {
        // "'s" inside a name goes too
        assert_eq!(normalize("O'Sullivan"), "oullivan");
        assert_eq!(normalize("it's"), "it");
    }

    #[test]
    fn curly_apostrophe_is_folded_first() {
        assert_eq!(normalize("the reviewer\u{2019}s notes"), "the reviewer notes");
    }

    #[test]
    fn numeral_hyphen_word_keeps_no_leading_hyphen() {
        assert_eq!(normalize("a 3-dimensional model"), "a dimensional model");
    }

    #[test]
    fn internal_hyphens_survive() {
        assert_eq!(normalize("State-of-the-art"), "state-of-the-art");
    }

    #[test]
    fn trailing_and_isolated_hyphens_removed() {
        assert_eq!(normalize("well- known - fact"), "well known fact");
    }

    #[test]
    fn double_hyphen_surrounded_by_spaces_leaves_no_token() {
        // the hyphen pass repeats until no hyphen touches a space
        assert_eq!(normalize("a -- b"), "a b");
    }

    #[test]
    fn hyphen_runs_between_spaces_fully_removed() {
        assert_eq!(normalize("a --- b"), "a b");
        assert_eq!(normalize("x ---- y"), "x y");
    }

    #[test]
    fn accents_are_transliterated() {
        assert_eq!(normalize("Café naïve résumé"), "cafe naive resume");
    }

    #[test]
    fn undecomposable_letters_are_transliterated() {
        assert_eq!(normalize("encyclopædia"), "encyclopaedia");
        assert_eq!(normalize("Straße"), "strasse");
        assert_eq!(normalize("Œuvre"), "oeuvre");
        assert_eq!(normalize("Ørsted Łódź"), "orsted lodz");
    }

    #[test]
    fn decomposed_accents_are_transliterated() {
        assert_eq!(normalize("cafe\u{301}"), "cafe");
    }

    #[test]
    fn emoji_do_not_become_words() {
        assert_eq!(normalize("a great \u{1F680} launch"), "a great launch");
    }

    #[test]
    fn line_breaks_become_spaces() {
        assert_eq!(normalize("first line\n\n\nsecond\tline"), "first line second line");
    }

    #[test]
    fn digits_and_symbols_split_words() {
        assert_eq!(normalize("x2y & z@w.com"), "x y z w com");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn no_letters_yields_empty() {
        assert_eq!(normalize("123 456 !!! -- 7.8"), "");
    }

    #[test]
    fn normalization_is_idempotent() {
        for input in [
            "The the the cat sat on a mat.",
            "Don't re-use the 3-D printer's  --  output!",
            "Ünïcödé ‘quotes’ and “more”",
            "-leading and trailing-",
            "x's's's",
            "a --- b",
            "",
            "42",
        ] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn custom_cleaner_is_used() {
        struct Identity;
        impl TextCleaner for Identity {
            fn clean(&self, text: &str) -> String {
                text.to_string()
            }
        }
        // Without lowercasing, case survives the later steps
        assert_eq!(normalize_with(&Identity, "Hello, World"), "Hello World");
    }

    #[test]
    fn step_helpers() {
        assert_eq!(remove_apos_s("bob's and jan's"), "bob and jan");
        assert_eq!(strip_characters("a1-b -c"), "a b c");
        assert_eq!(remove_spaces("a   b  c"), "a b c");
    }
}
