use std::collections::BTreeSet;

pub trait IntoTokenizer: Sized {
    type IntoTokens;
    fn into_tokenizer(self, params: TokenizerParams) -> Self::IntoTokens;
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum TokenizerOptions {
    /// Emitted tokens are lower-cased.
    Casefold,
    /// Tokens made of punctuation only are not emitted.
    ElimPunct,

    RawEntities,
    RawQuotes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizerParams {
    pub(crate) options: BTreeSet<TokenizerOptions>,
}
impl TokenizerParams {
    /// Casefolded tokens without punctuation, as for bag-of-words counting.
    pub fn content_words() -> TokenizerParams {
        TokenizerParams::default()
            .add_option(TokenizerOptions::Casefold)
            .add_option(TokenizerOptions::ElimPunct)
    }
    /// Tokens that are exact substrings of the input.
    pub fn verbatim() -> TokenizerParams {
        TokenizerParams::default()
            .add_option(TokenizerOptions::RawEntities)
            .add_option(TokenizerOptions::RawQuotes)
    }
    pub fn add_option(mut self, option: TokenizerOptions) -> TokenizerParams {
        self.options.insert(option);
        self
    }
    pub fn contains(&self, option: TokenizerOptions) -> bool {
        self.options.contains(&option)
    }
}
