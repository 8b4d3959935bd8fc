use std::iter::Peekable;

use unicode_properties::{GeneralCategory, GeneralCategoryGroup, UnicodeGeneralCategory};
use unicode_segmentation::{UWordBoundIndices, UnicodeSegmentation};

use text_parsing::{Local, Localize, Snip};

use crate::patterns::is_word_part;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Eq, Ord)]
pub(crate) enum BasicToken<'t> {
    Word(&'t str),
    Punctuation(char),
    Symbol(char),
}

fn is_format(c: char) -> bool {
    c.general_category() == GeneralCategory::Format
}

// zero width space and BOM always break; other format chars only join words
fn is_invisible(c: char) -> bool {
    (c == '\u{200b}') || (c == '\u{feff}') || is_format(c)
}

fn is_joiner(c: char) -> bool {
    (c == '-') || ((c != '\u{200b}') && (c != '\u{feff}') && is_format(c))
}

/// Splits an unclaimed stretch of text: whitespace and stray invisible characters
/// are dropped, word runs are kept whole, anything else stands alone.
///
/// Words end at unicode word boundaries (so ideographs stand one by one), except
/// where a hyphen or a format character joins two word parts.
pub(crate) struct WordBreaker<'t> {
    segment: &'t str,
    bounds: Peekable<UWordBoundIndices<'t>>,
    offset: usize,
    char_offset: usize,
    // position of the segment inside the whole text
    byte_base: usize,
    char_base: usize,
}
impl<'t> WordBreaker<'t> {
    pub(crate) fn new(segment: &'t str, char_base: usize, byte_base: usize) -> WordBreaker<'t> {
        WordBreaker {
            segment,
            bounds: segment.split_word_bound_indices().peekable(),
            offset: 0,
            char_offset: 0,
            byte_base,
            char_base,
        }
    }

    // queried offsets only grow
    fn at_bound(&mut self, at: usize) -> bool {
        while let Some(&(i, _)) = self.bounds.peek() {
            if i >= at {
                return i == at;
            }
            self.bounds.next();
        }
        false
    }

    // (bytes, chars) of the word starting at the current offset
    fn word_len(&mut self) -> (usize, usize) {
        let segment = self.segment;
        let mut len = 0;
        let mut char_len = 0;
        let mut joined = true;
        let mut chs = segment[self.offset..].chars().peekable();
        while let Some(c) = chs.next() {
            if is_word_part(c) && (joined || !self.at_bound(self.offset + len)) {
                len += c.len_utf8();
                char_len += 1;
                joined = false;
                continue;
            }
            match chs.peek() {
                Some(n) if is_joiner(c) && is_word_part(*n) => {
                    len += c.len_utf8();
                    char_len += 1;
                    joined = true;
                }
                _ => break,
            }
        }
        (len, char_len)
    }
}
impl<'t> Iterator for WordBreaker<'t> {
    type Item = Local<BasicToken<'t>>;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let c = self.segment[self.offset..].chars().next()?;
            if c.is_whitespace() || is_invisible(c) {
                self.offset += c.len_utf8();
                self.char_offset += 1;
                continue;
            }
            let (len, char_len) = match is_word_part(c) {
                true => self.word_len(),
                false => (c.len_utf8(), 1),
            };
            let local = ().localize(
                Snip {
                    offset: self.char_base + self.char_offset,
                    length: char_len,
                },
                Snip {
                    offset: self.byte_base + self.offset,
                    length: len,
                },
            );
            let w = &self.segment[self.offset..self.offset + len];
            self.offset += len;
            self.char_offset += char_len;
            return Some(local.local(match char_len {
                1 if !is_word_part(c) => match c.general_category_group() {
                    GeneralCategoryGroup::Punctuation => BasicToken::Punctuation(c),
                    _ => BasicToken::Symbol(c),
                },
                _ => BasicToken::Word(w),
            }));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<(BasicToken<'_>, usize, usize)> {
        WordBreaker::new(s, 0, 0)
            .map(|local| {
                let (local, bt) = local.into_inner();
                (bt, local.chars().offset, local.bytes().offset)
            })
            .collect()
    }

    #[test]
    fn words_and_punctuation() {
        assert_eq!(
            words("it: \"Blood/x"),
            vec![
                (BasicToken::Word("it"), 0, 0),
                (BasicToken::Punctuation(':'), 2, 2),
                (BasicToken::Punctuation('"'), 4, 4),
                (BasicToken::Word("Blood"), 5, 5),
                (BasicToken::Punctuation('/'), 10, 10),
                (BasicToken::Word("x"), 11, 11),
            ]
        );
    }

    #[test]
    fn joiners() {
        assert_eq!(
            words("well-known -x y- a--b"),
            vec![
                (BasicToken::Word("well-known"), 0, 0),
                (BasicToken::Punctuation('-'), 11, 11),
                (BasicToken::Word("x"), 12, 12),
                (BasicToken::Word("y"), 14, 14),
                (BasicToken::Punctuation('-'), 15, 15),
                (BasicToken::Word("a"), 17, 17),
                (BasicToken::Punctuation('-'), 18, 18),
                (BasicToken::Punctuation('-'), 19, 19),
                (BasicToken::Word("b"), 20, 20),
            ]
        );
        assert_eq!(
            words("a\u{200d}b"),
            vec![(BasicToken::Word("a\u{200d}b"), 0, 0)]
        );
    }

    #[test]
    fn ideographs() {
        assert_eq!(
            words("中文abc 日本-語"),
            vec![
                (BasicToken::Word("中"), 0, 0),
                (BasicToken::Word("文"), 1, 3),
                (BasicToken::Word("abc"), 2, 6),
                (BasicToken::Word("日"), 6, 10),
                (BasicToken::Word("本-語"), 7, 13),
            ]
        );
        assert_eq!(words("カタカナ"), vec![(BasicToken::Word("カタカナ"), 0, 0)]);
    }

    #[test]
    fn invisibles() {
        assert_eq!(
            words("a\u{200b}b \u{feff}\u{200d}c"),
            vec![
                (BasicToken::Word("a"), 0, 0),
                (BasicToken::Word("b"), 2, 4),
                (BasicToken::Word("c"), 6, 12),
            ]
        );
        assert_eq!(words("\u{200d}"), vec![]);
        assert_eq!(words(" \t\n"), vec![]);
    }

    #[test]
    fn symbols_and_offsets() {
        assert_eq!(
            WordBreaker::new("$ né", 10, 20)
                .map(|local| {
                    let (local, bt) = local.into_inner();
                    (bt, local.chars(), local.bytes())
                })
                .collect::<Vec<_>>(),
            vec![
                (
                    BasicToken::Symbol('$'),
                    Snip { offset: 10, length: 1 },
                    Snip { offset: 20, length: 1 }
                ),
                (
                    BasicToken::Word("né"),
                    Snip { offset: 12, length: 2 },
                    Snip { offset: 22, length: 3 }
                ),
            ]
        );
    }
}
