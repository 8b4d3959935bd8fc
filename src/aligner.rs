use text_parsing::{Local, Localize, Snip};

use crate::{Normalization, PatternRegistry, TokenizerOptions, TokenizerParams};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AlignError {
    #[error("token {index} {token:?} not found at or after char {cursor}")]
    TokenNotFound {
        index: usize,
        token: String,
        cursor: usize,
    },
}

/// Source span of one token, in codepoints; `offset` is inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignmentSpan {
    pub index: usize,
    pub onset: usize,
    pub offset: usize,
    bytes: Snip,
}
impl AlignmentSpan {
    pub fn as_pair(&self) -> (usize, usize) {
        (self.onset, self.offset)
    }
    pub fn chars(&self) -> Snip {
        Snip {
            offset: self.onset,
            length: self.offset + 1 - self.onset,
        }
    }
    pub fn bytes(&self) -> Snip {
        self.bytes
    }
    pub fn local(&self) -> Local<()> {
        ().localize(self.chars(), self.bytes)
    }
    /// The raw text the token was recovered from; `text` must be the aligned text.
    pub fn original_str<'s>(&self, text: &'s str) -> &'s str {
        let Snip { offset, length } = self.bytes;
        &text[offset..offset + length]
    }
}

/// Maps tokens back onto the text they came from.
///
/// A cursor moves left to right over the text. Each token is searched at or after
/// the cursor, either literally or through the pre-images of the normalizations
/// that could have produced it (`&quot;` for `"`, `“` for `"`). At the leftmost
/// position where anything matches, the longest raw match is taken and the cursor
/// moves past it. Skipped characters belong to no token.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner {
    fold_case: bool,
}
impl Aligner {
    /// Aligner for tokens produced with `params`.
    pub fn new(params: &TokenizerParams) -> Aligner {
        Aligner {
            fold_case: params.contains(TokenizerOptions::Casefold),
        }
    }

    fn literal(&self, token: &str, src: &str) -> Option<usize> {
        match self.fold_case {
            true => Normalization::Identity.folded_preimage_at(token, src),
            false => Normalization::Identity.preimage_at(token, src),
        }
    }

    // whether the tokens after the current one spell out `rest` literally
    fn spelled_out<S: AsRef<str>>(&self, mut rest: &str, following: &[S]) -> bool {
        for token in following {
            if rest.is_empty() {
                break;
            }
            match self.literal(token.as_ref(), rest) {
                Some(len) => rest = &rest[len..],
                None => return false,
            }
        }
        rest.is_empty()
    }

    // longest raw match, unless the following tokens are the rest of it: "AT&amp;T"
    // tokenized as "AT", "&", "amp", ";", "T"
    fn match_at<S: AsRef<str>>(
        &self,
        token: &str,
        normalizations: &[Normalization],
        src: &str,
        following: &[S],
    ) -> Option<usize> {
        let literal = self.literal(token, src);
        let longest = normalizations
            .iter()
            .filter_map(|n| match self.fold_case {
                true => n.folded_preimage_at(token, src),
                false => n.preimage_at(token, src),
            })
            .chain(literal)
            .max()?;
        match literal {
            Some(len) if (len < longest) && self.spelled_out(&src[len..longest], following) => {
                Some(len)
            }
            Some(_) | None => Some(longest),
        }
    }

    // (byte start, byte length) of the first match at or after `cursor`
    fn locate<S: AsRef<str>>(
        &self,
        text: &str,
        cursor: usize,
        token: &str,
        following: &[S],
    ) -> Option<(usize, usize)> {
        if token.is_empty() {
            return None;
        }
        let normalizations = PatternRegistry::global().normalizations_for(token);
        if normalizations.is_empty() && !self.fold_case {
            return text[cursor..]
                .find(token)
                .map(|i| (cursor + i, token.len()));
        }
        text[cursor..].char_indices().find_map(|(i, _)| {
            self.match_at(token, &normalizations, &text[cursor + i..], following)
                .map(|len| (cursor + i, len))
        })
    }

    pub fn align<S: AsRef<str>>(
        &self,
        text: &str,
        tokens: &[S],
    ) -> Result<Vec<AlignmentSpan>, AlignError> {
        let mut spans = Vec::with_capacity(tokens.len());
        let mut cursor = 0;
        let mut char_cursor = 0;
        for (index, token) in tokens.iter().enumerate() {
            let token = token.as_ref();
            let (start, len) = match self.locate(text, cursor, token, &tokens[index + 1..]) {
                Some(found) => found,
                None => {
                    log::debug!("token {} {:?} not found after char {}", index, token, char_cursor);
                    return Err(AlignError::TokenNotFound {
                        index,
                        token: token.to_string(),
                        cursor: char_cursor,
                    });
                }
            };
            let onset = char_cursor + text[cursor..start].chars().count();
            let char_len = text[start..start + len].chars().count();
            let span = AlignmentSpan {
                index,
                onset,
                offset: onset + char_len - 1,
                bytes: Snip {
                    offset: start,
                    length: len,
                },
            };
            log::trace!("{:?} -> {:?}", token, span.as_pair());
            spans.push(span);
            cursor = start + len;
            char_cursor = onset + char_len;
        }
        Ok(spans)
    }
}
