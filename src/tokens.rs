use std::borrow::Cow;
use std::collections::VecDeque;

use text_parsing::{Local, Localize, Snip};

use crate::{
    IntoTokenizer, Normalization, PatternRegistry, Token, TokenKind, TokenizerOptions,
    TokenizerParams,
    punct::is_punctuation_only,
    wordbreaker::{BasicToken, WordBreaker},
};

impl<'t> IntoTokenizer for &'t str {
    type IntoTokens = Tokens<'t>;

    fn into_tokenizer(self, params: TokenizerParams) -> Self::IntoTokens {
        Tokens::new(self, &params)
    }
}

impl<'t> Iterator for Tokens<'t> {
    type Item = Local<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(tok) = self.buffer.pop_front() {
                return Some(tok);
            }
            if self.offset >= self.text.len() {
                return None;
            }
            self.fill();
        }
    }
}

/// Token stream over a text: protected spans are emitted whole, the text between
/// them goes through the residual word breaker.
pub struct Tokens<'t> {
    text: &'t str,
    registry: &'static PatternRegistry,
    offset: usize,
    char_offset: usize,
    index: usize,
    buffer: VecDeque<Local<Token>>,

    casefold: bool,
    elim_punct: bool,
    raw_entities: bool,
    raw_quotes: bool,
}
impl<'t> Tokens<'t> {
    pub(crate) fn new(text: &'t str, params: &TokenizerParams) -> Tokens<'t> {
        Tokens {
            text,
            registry: PatternRegistry::global(),
            offset: 0,
            char_offset: 0,
            index: 0,
            buffer: VecDeque::new(),
            casefold: params.contains(TokenizerOptions::Casefold),
            elim_punct: params.contains(TokenizerOptions::ElimPunct),
            raw_entities: params.contains(TokenizerOptions::RawEntities),
            raw_quotes: params.contains(TokenizerOptions::RawQuotes),
        }
    }

    fn normalization(&self, normalization: Normalization) -> Normalization {
        match normalization {
            Normalization::DecodeEntity | Normalization::DecodeApostrophes if self.raw_entities => {
                Normalization::Identity
            }
            Normalization::UnifyQuotes if self.raw_quotes => Normalization::Identity,
            n => n,
        }
    }

    fn push(&mut self, local: Local<()>, text: Cow<'_, str>, kind: TokenKind) {
        if self.elim_punct && is_punctuation_only(&text) {
            return;
        }
        let text = match self.casefold {
            true => text.to_lowercase(),
            false => text.into_owned(),
        };
        let token = Token {
            index: self.index,
            text,
            kind,
        };
        self.index += 1;
        self.buffer.push_back(local.local(token));
    }

    // everything up to and including the next protected span
    fn fill(&mut self) {
        let text = self.text;
        let registry = self.registry;
        let offset = self.offset;
        let claim = text[offset..]
            .char_indices()
            .find_map(|(i, _)| registry.claim_at(text, offset + i));
        let segment_end = match &claim {
            Some((_, span)) => span.start,
            None => text.len(),
        };

        let segment = &text[self.offset..segment_end];
        for local_bt in WordBreaker::new(segment, self.char_offset, self.offset) {
            let (local, bt) = local_bt.into_inner();
            let (word, kind) = match bt {
                BasicToken::Word(w) => (Cow::Borrowed(w), TokenKind::Word),
                BasicToken::Punctuation(c) => (Cow::Owned(c.to_string()), TokenKind::Punctuation),
                BasicToken::Symbol(c) => (Cow::Owned(c.to_string()), TokenKind::Symbol),
            };
            self.push(local, word, kind);
        }
        self.char_offset += segment.chars().count();
        self.offset = segment_end;

        if let Some((pc, span)) = claim {
            let raw = span.as_str(text);
            let char_len = raw.chars().count();
            log::trace!("{} {:?} at {}..{}", pc.name(), raw, span.start, span.end);
            let local = ().localize(
                Snip {
                    offset: self.char_offset,
                    length: char_len,
                },
                Snip {
                    offset: span.start,
                    length: span.end - span.start,
                },
            );
            let normalized = self.normalization(pc.normalization()).apply(raw);
            self.push(local, normalized, TokenKind::Protected(pc.category()));
            self.char_offset += char_len;
            self.offset = span.end;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;

    fn kinds(s: &str, params: TokenizerParams) -> Vec<(String, TokenKind)> {
        s.into_tokenizer(params)
            .map(|t| {
                let (_, t) = t.into_inner();
                (t.text, t.kind)
            })
            .collect()
    }

    #[test]
    fn kinds_and_indices() {
        let res = "Miller's &amp; co: ♥ http://t.co/x"
            .into_tokenizer(TokenizerParams::default())
            .map(|t| t.into_inner().1)
            .collect::<Vec<_>>();
        assert_eq!(
            res.iter().map(|t| t.index).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(
            res.iter()
                .map(|t| (t.text.as_str(), t.kind))
                .collect::<Vec<_>>(),
            vec![
                ("Miller's", TokenKind::Protected(Category::Contraction)),
                ("&", TokenKind::Protected(Category::Entity)),
                ("co", TokenKind::Word),
                (":", TokenKind::Punctuation),
                ("♥", TokenKind::Protected(Category::Decoration)),
                ("http://t.co/x", TokenKind::Protected(Category::Url)),
            ]
        );
    }

    #[test]
    fn localities() {
        let s = "a “b” €5";
        let res = s
            .into_tokenizer(TokenizerParams::default())
            .map(|t| {
                let (local, t) = t.into_inner();
                let Snip { offset, length } = local.bytes();
                (t.text, local.chars(), &s[offset..offset + length])
            })
            .collect::<Vec<_>>();
        assert_eq!(
            res,
            vec![
                ("a".to_string(), Snip { offset: 0, length: 1 }, "a"),
                ("\"".to_string(), Snip { offset: 2, length: 1 }, "“"),
                ("b".to_string(), Snip { offset: 3, length: 1 }, "b"),
                ("\"".to_string(), Snip { offset: 4, length: 1 }, "”"),
                ("€5".to_string(), Snip { offset: 6, length: 2 }, "€5"),
            ]
        );
    }

    #[test]
    fn options() {
        let s = "Don't &quot;SHOUT&quot;!!";
        assert_eq!(
            kinds(s, TokenizerParams::content_words())
                .into_iter()
                .map(|(t, _)| t)
                .collect::<Vec<_>>(),
            vec!["don't", "shout"]
        );
        assert_eq!(
            kinds(s, TokenizerParams::verbatim())
                .into_iter()
                .map(|(t, _)| t)
                .collect::<Vec<_>>(),
            vec!["Don't", "&quot;", "SHOUT", "&quot;", "!!"]
        );
        assert_eq!(
            kinds("“hi”", TokenizerParams::default().add_option(TokenizerOptions::RawQuotes)),
            vec![
                ("“".to_string(), TokenKind::Protected(Category::Quote)),
                ("hi".to_string(), TokenKind::Word),
                ("”".to_string(), TokenKind::Protected(Category::Quote)),
            ]
        );
    }

    #[test]
    fn elim_punct_indices() {
        let res = "Hi , there !"
            .into_tokenizer(TokenizerParams::default().add_option(TokenizerOptions::ElimPunct))
            .map(|t| {
                let (_, t) = t.into_inner();
                (t.index, t.text)
            })
            .collect::<Vec<_>>();
        assert_eq!(res, vec![(0, "Hi".to_string()), (1, "there".to_string())]);
    }

    #[test]
    fn encoded_apostrophes() {
        assert_eq!(
            kinds("it&#39;s @ann&apos;s", TokenizerParams::default()),
            vec![
                ("it's".to_string(), TokenKind::Protected(Category::Contraction)),
                ("@ann's".to_string(), TokenKind::Protected(Category::Mention)),
            ]
        );
        assert_eq!(
            kinds("it&#39;s", TokenizerParams::default().add_option(TokenizerOptions::RawEntities)),
            vec![("it&#39;s".to_string(), TokenKind::Protected(Category::Contraction))]
        );
    }

    // time of the faster of two runs over `unit` repeated up to `len` bytes
    fn elapsed(unit: &str, len: usize) -> std::time::Duration {
        let text = unit.repeat(len / unit.len());
        (0..2)
            .map(|_| {
                let started = std::time::Instant::now();
                let count = text.as_str().into_tokenizer(TokenizerParams::default()).count();
                assert!(count > 0);
                started.elapsed()
            })
            .min()
            .unwrap_or_default()
    }

    #[test]
    fn long_runs() {
        for unit in ["(", "=", "<", "—", "&", "+.", "a-", "<^", "x'", "a.b "] {
            let short = elapsed(unit, 10_000);
            let long = elapsed(unit, 40_000);
            assert!(
                long < short * 10 + std::time::Duration::from_millis(50),
                "{:?}: {:?} for 10k, {:?} for 40k",
                unit,
                short,
                long
            );
        }
    }

    #[test]
    fn empty() {
        assert_eq!(kinds("", TokenizerParams::default()), vec![]);
        assert_eq!(kinds(" \u{200b} ", TokenizerParams::default()), vec![]);
    }
}
