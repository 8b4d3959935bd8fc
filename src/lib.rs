use text_parsing::Local;

mod abbrev;
mod emoticons;
mod numbers;
mod punct;
mod symbols;
mod urls;
mod words;

mod normalize;
pub use normalize::Normalization;

mod patterns;
pub use patterns::{Category, PatternCategory, PatternRegistry, ProtectedSpan};

mod wordbreaker;

mod options;
pub use options::{IntoTokenizer, TokenizerOptions, TokenizerParams};

mod tokens;
pub use tokens::Tokens;

mod aligner;
pub use aligner::{AlignError, Aligner, AlignmentSpan};

pub use punct::is_punctuation_only;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenKind {
    /// Claimed whole by a pattern category.
    Protected(Category),
    Word,
    Punctuation,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Token {
    /// Position in the emitted sequence.
    pub index: usize,
    pub text: String,
    pub kind: TokenKind,
}

pub trait OriginalStr {
    /// Slice of the tokenized text the value was produced from.
    fn original_str<'s>(&self, text: &'s str) -> &'s str;
}
impl<T> OriginalStr for Local<T> {
    fn original_str<'s>(&self, text: &'s str) -> &'s str {
        let text_parsing::Snip { offset, length } = self.bytes();
        &text[offset..offset + length]
    }
}

/// Tokenizes `text` with default parameters.
///
/// ```
/// assert_eq!(
///     twokenize::tokenize("Miller's Crossing &amp; more :-)"),
///     vec!["Miller's", "Crossing", "&", "more", ":-)"]
/// );
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    tokenize_with(text, TokenizerParams::default())
}

pub fn tokenize_with(text: &str, params: TokenizerParams) -> Vec<String> {
    text.into_tokenizer(params)
        .map(|local| local.into_inner().1.text)
        .collect()
}

/// Recovers the source span of every token, see [`Aligner`].
///
/// ```
/// let spans = twokenize::align("Oh Captain! My Captain!", &["Oh", "Captain", "!"]).unwrap();
/// assert_eq!(spans[2].as_pair(), (10, 10));
/// ```
pub fn align<S: AsRef<str>>(text: &str, tokens: &[S]) -> Result<Vec<AlignmentSpan>, AlignError> {
    Aligner::default().align(text, tokens)
}
