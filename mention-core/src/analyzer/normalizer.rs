//! Canonical word form of transcript text.
//!
//! The normalizer rewrites raw text into lowercase words joined by single
//! ASCII spaces. Everything the word definition treats as a separator is
//! dropped here, so the tokenizer only has to split on `b' '`.
//!
//! ## Word definition
//!
//! - A word character is any `char` with [`char::is_alphanumeric`].
//! - A word is a maximal run of word characters.
//! - An apostrophe (`'`, or `’` which is rewritten to `'`) or a hyphen (`-`)
//!   stays inside a word only between two word characters: `don't`,
//!   `rate-hike`, `covid-19`.
//! - Everything else separates words and is discarded.
//!
//! This definition fixes every stored word count and every position
//! percentage. Changing it changes reported numbers.

#[rustfmt::skip]
const LOWERCASE_TABLE: [u8; 128] = [
    0x00,0x01,0x02,0x03,0x04,0x05,0x06,0x07,0x08,0x09,0x0a,0x0b,0x0c,0x0d,0x0e,0x0f,
    0x10,0x11,0x12,0x13,0x14,0x15,0x16,0x17,0x18,0x19,0x1a,0x1b,0x1c,0x1d,0x1e,0x1f,
    0x20,0x21,0x22,0x23,0x24,0x25,0x26,0x27,0x28,0x29,0x2a,0x2b,0x2c,0x2d,0x2e,0x2f,
    0x30,0x31,0x32,0x33,0x34,0x35,0x36,0x37,0x38,0x39,0x3a,0x3b,0x3c,0x3d,0x3e,0x3f,
    0x40,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x5b,0x5c,0x5d,0x5e,0x5f,
    0x60,0x61,0x62,0x63,0x64,0x65,0x66,0x67,0x68,0x69,0x6a,0x6b,0x6c,0x6d,0x6e,0x6f,
    0x70,0x71,0x72,0x73,0x74,0x75,0x76,0x77,0x78,0x79,0x7a,0x7b,0x7c,0x7d,0x7e,0x7f,
];

/// Separator inserted between words in canonical text.
pub const WORD_SEPARATOR: u8 = b' ';

#[inline(always)]
const fn is_ascii_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

/// Canonical joiner for `c`, if it may appear inside a word.
#[inline(always)]
const fn joiner(c: char) -> Option<char> {
    match c {
        '\'' | '\u{2019}' => Some('\''),
        '-' => Some('-'),
        _ => None,
    }
}

/// Incremental writer for canonical text.
///
/// Tracks whether we are inside a word and whether a joiner is waiting for
/// the next word character to confirm it.
struct Canonical<'a> {
    out: &'a mut String,
    in_word: bool,
    pending_joiner: Option<char>,
}

impl<'a> Canonical<'a> {
    fn new(out: &'a mut String) -> Self {
        Self {
            out,
            in_word: false,
            pending_joiner: None,
        }
    }

    #[inline(always)]
    fn begin_char(&mut self) {
        if self.in_word {
            if let Some(j) = self.pending_joiner.take() {
                self.out.push(j);
            }
        } else {
            if !self.out.is_empty() {
                self.out.push(WORD_SEPARATOR as char);
            }
            self.in_word = true;
        }
    }

    #[inline(always)]
    fn push_ascii(&mut self, b: u8) {
        self.begin_char();
        self.out.push(LOWERCASE_TABLE[b as usize] as char);
    }

    #[inline(always)]
    fn push_char(&mut self, c: char) {
        self.begin_char();
        self.out.extend(c.to_lowercase());
    }

    #[inline(always)]
    fn separator_or_joiner(&mut self, c: char) {
        match joiner(c) {
            Some(j) if self.in_word && self.pending_joiner.is_none() => {
                self.pending_joiner = Some(j);
            }
            _ => self.separator(),
        }
    }

    #[inline(always)]
    fn separator(&mut self) {
        self.in_word = false;
        self.pending_joiner = None;
    }
}

/// Text normalizer producing canonical word text.
///
/// Output contract (relied on by [`Tokenizer`](super::tokenizer::Tokenizer)):
/// - lowercase
/// - words separated by exactly one ASCII space
/// - no leading or trailing space
///
/// # Examples
///
/// ```
/// use mention_core::analyzer::TextNormalizer;
///
/// let normalizer = TextNormalizer::default();
/// assert_eq!(normalizer.normalize("  The FOMC met. Rate-hike talk!"), "the fomc met rate-hike talk");
/// assert_eq!(normalizer.normalize("!!!"), "");
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TextNormalizer;

impl TextNormalizer {
    /// Creates a new normalizer.
    pub const fn new() -> Self {
        Self
    }

    /// Normalizes text into an existing String buffer.
    ///
    /// Clears the buffer before writing and reuses its capacity.
    pub fn normalize_into(&self, input: &str, out: &mut String) {
        out.clear();
        out.reserve(input.len());

        let bytes = input.as_bytes();
        let mut writer = Canonical::new(out);
        let mut i = 0usize;

        while i < bytes.len() {
            let b = bytes[i];
            if b < 128 {
                if is_ascii_word_byte(b) {
                    writer.push_ascii(b);
                } else {
                    writer.separator_or_joiner(b as char);
                }
                i += 1;
                continue;
            }

            // Non-ASCII: decode one char. `i` is always on a char boundary
            // because ASCII bytes and whole chars are the only steps taken.
            let Some(c) = input[i..].chars().next() else {
                break;
            };
            i += c.len_utf8();

            if c.is_alphanumeric() {
                writer.push_char(c);
            } else {
                writer.separator_or_joiner(c);
            }
        }
    }

    /// Normalizes text and returns a new String.
    #[inline]
    pub fn normalize(&self, input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        self.normalize_into(input, &mut out);
        out
    }

    /// Returns `true` if `normalized` satisfies the output contract.
    pub fn is_canonical(normalized: &str) -> bool {
        let bytes = normalized.as_bytes();
        if bytes.first() == Some(&WORD_SEPARATOR) || bytes.last() == Some(&WORD_SEPARATOR) {
            return false;
        }
        !bytes.windows(2).any(|w| w == [WORD_SEPARATOR, WORD_SEPARATOR])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(input: &str) -> String {
        TextNormalizer::default().normalize(input)
    }

    #[test]
    fn ascii_basic_lowercase() {
        assert_eq!(norm("HELLO"), "hello");
        assert_eq!(norm("HeLlO"), "hello");
        assert_eq!(norm("123 ABC!"), "123 abc");
    }

    #[test]
    fn ascii_full_alphabet() {
        let upper: String = (b'A'..=b'Z').map(|b| b as char).collect();
        let lower: String = (b'a'..=b'z').map(|b| b as char).collect();
        assert_eq!(norm(&upper), lower);
    }

    #[test]
    fn punctuation_separates_words() {
        assert_eq!(norm("Hello,\n\nWorld!\tThis   is  a  test."), "hello world this is a test");
        assert_eq!(norm("fomc.powell"), "fomc powell");
        assert_eq!(norm("foo_bar"), "foo bar");
        assert_eq!(norm("(cpi)"), "cpi");
    }

    #[test]
    fn internal_apostrophe_kept() {
        assert_eq!(norm("Don't stop"), "don't stop");
        assert_eq!(norm("Powell\u{2019}s remarks"), "powell's remarks");
    }

    #[test]
    fn internal_hyphen_kept() {
        assert_eq!(norm("rate-hike"), "rate-hike");
        assert_eq!(norm("COVID-19"), "covid-19");
        assert_eq!(norm("state-of-the-art"), "state-of-the-art");
    }

    #[test]
    fn edge_joiners_dropped() {
        assert_eq!(norm("'quoted'"), "quoted");
        assert_eq!(norm("-dash-"), "dash");
        assert_eq!(norm("rock 'n' roll"), "rock n roll");
        assert_eq!(norm("end- start"), "end start");
    }

    #[test]
    fn doubled_joiners_split() {
        assert_eq!(norm("well--known"), "well known");
        assert_eq!(norm("it'-s"), "it s");
    }

    #[test]
    fn whitespace_collapse() {
        assert_eq!(norm("hello   world"), "hello world");
        assert_eq!(norm("hello\t\nworld"), "hello world");
        assert_eq!(norm("hello \r\n world"), "hello world");
    }

    #[test]
    fn leading_and_trailing_removed() {
        assert_eq!(norm("   hello"), "hello");
        assert_eq!(norm("hello   "), "hello");
        assert_eq!(norm(" ... hello ... "), "hello");
    }

    #[test]
    fn only_separators() {
        assert_eq!(norm(""), "");
        assert_eq!(norm("   "), "");
        assert_eq!(norm("\n\t\r"), "");
        assert_eq!(norm("!!! --- '''"), "");
    }

    #[test]
    fn unicode_lowercase() {
        assert_eq!(norm("ПРИВЕТ"), "привет");
        assert_eq!(norm("ÜNITED Café"), "ünited café");
        assert_eq!(norm("ΆΈΉ"), "άέή");
    }

    #[test]
    fn unicode_punctuation_separates() {
        assert_eq!(norm("hello\u{2014}world"), "hello world");
        assert_eq!(norm("\u{201C}quoted\u{201D}"), "quoted");
        assert_eq!(norm("a\u{00A0}b"), "a b");
    }

    #[test]
    fn non_latin_scripts_are_words() {
        assert_eq!(norm("你好世界"), "你好世界");
        assert_eq!(norm("한글 テスト"), "한글 テスト");
        assert_eq!(norm("مرحبا"), "مرحبا");
    }

    #[test]
    fn emoji_and_symbols_separate() {
        assert_eq!(norm("Hello 🌍 World"), "hello world");
        assert_eq!(norm("$5 + 10%"), "5 10");
    }

    #[test]
    fn control_chars_separate() {
        assert_eq!(norm("hello\x01\x02world"), "hello world");
        assert_eq!(norm("a\0b"), "a b");
    }

    #[test]
    fn expanding_lowercase_does_not_panic() {
        let result = norm("İstanbul İİİİ");
        assert!(std::str::from_utf8(result.as_bytes()).is_ok());
        assert!(result.starts_with('i'));
    }

    #[test]
    fn output_is_canonical() {
        let inputs = [
            "hello",
            "  Hello,  world!  ",
            "rate--hike -- 'test'",
            "İstanbul",
            "ΠΡΟΒΛΗΜΑ",
            "...",
            "a",
        ];

        for input in inputs {
            let out = norm(input);
            assert!(TextNormalizer::is_canonical(&out), "not canonical: {out:?}");
        }
    }

    #[test]
    fn idempotent_on_ascii() {
        let n = TextNormalizer::default();
        let samples = ["hello world", "foo   bar", "Don't rate-hike", "ÜBER Café"];

        for s in samples {
            let once = n.normalize(s);
            let twice = n.normalize(&once);
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn normalize_into_reuses_capacity() {
        let normalizer = TextNormalizer::default();
        let mut buf = String::with_capacity(64);
        let cap = buf.capacity();

        normalizer.normalize_into("HELLO", &mut buf);
        assert_eq!(buf, "hello");
        assert_eq!(buf.capacity(), cap);

        normalizer.normalize_into("WORLD", &mut buf);
        assert_eq!(buf, "world");
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn very_long_ascii() {
        let input = "Word ".repeat(10_000);
        let out = norm(&input);
        assert_eq!(out.len(), 10_000 * 5 - 1);
        assert!(!out.ends_with(' '));
    }

    #[test]
    fn is_canonical_detects_violations() {
        assert!(TextNormalizer::is_canonical(""));
        assert!(TextNormalizer::is_canonical("a b"));
        assert!(!TextNormalizer::is_canonical(" a"));
        assert!(!TextNormalizer::is_canonical("a "));
        assert!(!TextNormalizer::is_canonical("a  b"));
    }
}
