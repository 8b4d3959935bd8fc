use lazy_static::lazy_static;
use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::{Normalization, abbrev, emoticons, numbers, punct, symbols, urls, words};

lazy_static! {
    static ref REGISTRY: PatternRegistry = PatternRegistry::new();
}

pub(crate) fn char_before(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

pub(crate) fn char_after(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || (c == '_')
}

/// Word character or a combining mark attached to one.
pub(crate) fn is_word_part(c: char) -> bool {
    is_word_char(c) || (c.general_category_group() == GeneralCategoryGroup::Mark)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Heart,
    Email,
    Url,
    Emoticon,
    Arrow,
    Entity,

    Hashtag,
    Mention,

    Time,
    Number,

    Abbreviation,

    Contraction,
    EmbeddedApostrophe,

    Quote,
    PunctuationRun,
    Separator,

    Decoration,
    Emoji,
    SymbolRun,
}
impl Category {
    pub fn name(&self) -> &'static str {
        match self {
            Category::Heart => "heart",
            Category::Email => "email",
            Category::Url => "url",
            Category::Emoticon => "emoticon",
            Category::Arrow => "arrow",
            Category::Entity => "html-entity",
            Category::Hashtag => "hashtag",
            Category::Mention => "mention",
            Category::Time => "time",
            Category::Number => "number",
            Category::Abbreviation => "abbreviation",
            Category::Contraction => "contraction",
            Category::EmbeddedApostrophe => "embedded-apostrophe",
            Category::Quote => "quote",
            Category::PunctuationRun => "repeated-punctuation",
            Category::Separator => "separator",
            Category::Decoration => "decoration",
            Category::Emoji => "emoji",
            Category::SymbolRun => "symbol",
        }
    }

    // byte offset of the end of the match starting at `pos`
    fn find_end(&self, text: &str, pos: usize) -> Option<usize> {
        match self {
            Category::Heart => emoticons::heart(text, pos),
            Category::Email => urls::email(text, pos),
            Category::Url => urls::url(text, pos),
            Category::Emoticon => emoticons::emoticon(text, pos),
            Category::Arrow => emoticons::arrow(text, pos),
            Category::Entity => crate::normalize::entity_at(&text[pos..]).map(|(len, _)| pos + len),
            Category::Hashtag => words::hashtag(text, pos),
            Category::Mention => words::mention(text, pos),
            Category::Time => numbers::time(text, pos),
            Category::Number => numbers::number(text, pos),
            Category::Abbreviation => abbrev::abbreviation(text, pos),
            Category::Contraction => words::contraction(text, pos),
            Category::EmbeddedApostrophe => words::embedded_apostrophe(text, pos),
            Category::Quote => punct::quote_run(text, pos),
            Category::PunctuationRun => punct::punctuation_run(text, pos),
            Category::Separator => punct::separator(text, pos),
            Category::Decoration => emoticons::decoration(text, pos),
            Category::Emoji => symbols::emoji(text, pos),
            Category::SymbolRun => symbols::symbol_run(text, pos),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternCategory {
    category: Category,
    rank: u8,
    normalization: Normalization,
}
impl PatternCategory {
    fn new(category: Category, rank: u8) -> PatternCategory {
        PatternCategory {
            category,
            rank,
            normalization: Normalization::Identity,
        }
    }
    fn normalized(mut self, normalization: Normalization) -> PatternCategory {
        self.normalization = normalization;
        self
    }

    pub fn category(&self) -> Category {
        self.category
    }
    pub fn name(&self) -> &'static str {
        self.category.name()
    }
    /// Priority group, 1 is the highest.
    pub fn rank(&self) -> u8 {
        self.rank
    }
    pub fn normalization(&self) -> Normalization {
        self.normalization
    }

    /// Span claimed by this category at byte offset `pos` of `text`, if any.
    pub fn match_at(&self, text: &str, pos: usize) -> Option<ProtectedSpan> {
        match self.category.find_end(text, pos) {
            Some(end) if end > pos => Some(ProtectedSpan {
                category: self.category,
                start: pos,
                end,
            }),
            Some(_) | None => None,
        }
    }
}

/// A region of the input claimed by one category; it is never split further.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectedSpan {
    pub category: Category,
    /// byte offset
    pub start: usize,
    /// byte offset, exclusive
    pub end: usize,
}
impl ProtectedSpan {
    pub fn as_str<'s>(&self, text: &'s str) -> &'s str {
        &text[self.start..self.end]
    }
}

/// Ordered catalog of token categories, highest priority first.
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    categories: Vec<PatternCategory>,
}
impl PatternRegistry {
    fn new() -> PatternRegistry {
        use Category::*;
        PatternRegistry {
            categories: vec![
                // protected literals: internal punctuation never splits
                PatternCategory::new(Heart, 1),
                PatternCategory::new(Email, 1),
                PatternCategory::new(Url, 1),
                PatternCategory::new(Emoticon, 1),
                PatternCategory::new(Arrow, 1),
                PatternCategory::new(Entity, 1).normalized(Normalization::DecodeEntity),
                PatternCategory::new(Hashtag, 2).normalized(Normalization::DecodeApostrophes),
                PatternCategory::new(Mention, 2).normalized(Normalization::DecodeApostrophes),
                PatternCategory::new(Time, 3),
                PatternCategory::new(Number, 3),
                PatternCategory::new(Abbreviation, 4),
                PatternCategory::new(Contraction, 5).normalized(Normalization::DecodeApostrophes),
                PatternCategory::new(EmbeddedApostrophe, 5)
                    .normalized(Normalization::DecodeApostrophes),
                PatternCategory::new(Quote, 6).normalized(Normalization::UnifyQuotes),
                PatternCategory::new(PunctuationRun, 6),
                PatternCategory::new(Separator, 6),
                PatternCategory::new(Decoration, 7),
                PatternCategory::new(Emoji, 7),
                PatternCategory::new(SymbolRun, 7),
            ],
        }
    }

    /// The process-wide registry.
    pub fn global() -> &'static PatternRegistry {
        &REGISTRY
    }

    pub fn categories(&self) -> &[PatternCategory] {
        &self.categories
    }

    pub fn get(&self, category: Category) -> Option<&PatternCategory> {
        self.categories.iter().find(|pc| pc.category == category)
    }

    /// First category in priority order that matches at `pos`.
    pub fn claim_at(&self, text: &str, pos: usize) -> Option<(&PatternCategory, ProtectedSpan)> {
        self.categories
            .iter()
            .find_map(|pc| pc.match_at(text, pos).map(|span| (pc, span)))
    }

    /// Normalizations that may have produced `token` from something other than
    /// its literal text.
    pub fn normalizations_for(&self, token: &str) -> Vec<Normalization> {
        let mut res: Vec<Normalization> = self
            .categories
            .iter()
            .map(|pc| pc.normalization)
            .filter(|n| (*n != Normalization::Identity) && n.could_produce(token))
            .collect();
        res.sort();
        res.dedup();
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(text: &str) -> Option<(Category, &str)> {
        PatternRegistry::global()
            .claim_at(text, 0)
            .map(|(pc, span)| (pc.category(), span.as_str(text)))
    }

    #[test]
    fn ranks_are_ordered() {
        let ranks = PatternRegistry::global()
            .categories()
            .iter()
            .map(|pc| pc.rank())
            .collect::<Vec<_>>();
        let mut sorted = ranks.clone();
        sorted.sort();
        assert_eq!(ranks, sorted);
        assert_eq!(ranks.first(), Some(&1));
        assert_eq!(ranks.last(), Some(&7));
    }

    #[test]
    fn normalizing_categories() {
        let reg = PatternRegistry::global();
        assert_eq!(
            reg.get(Category::Entity).map(|pc| pc.normalization()),
            Some(Normalization::DecodeEntity)
        );
        assert_eq!(
            reg.get(Category::Quote).map(|pc| pc.normalization()),
            Some(Normalization::UnifyQuotes)
        );
        assert_eq!(
            reg.get(Category::Url).map(|pc| pc.normalization()),
            Some(Normalization::Identity)
        );
        assert_eq!(
            reg.normalizations_for("\""),
            vec![Normalization::DecodeEntity, Normalization::UnifyQuotes]
        );
        assert_eq!(
            reg.get(Category::Contraction).map(|pc| pc.normalization()),
            Some(Normalization::DecodeApostrophes)
        );
        assert_eq!(
            reg.normalizations_for("it's"),
            vec![Normalization::DecodeApostrophes]
        );
        assert_eq!(reg.normalizations_for("word"), vec![]);
    }

    #[test]
    fn priorities() {
        assert_eq!(claim("<3 you"), Some((Category::Heart, "<3")));
        assert_eq!(claim(":-) ok"), Some((Category::Emoticon, ":-)")));
        assert_eq!(claim("http://t.co/x."), Some((Category::Url, "http://t.co/x")));
        assert_eq!(claim("me@mail.com"), Some((Category::Email, "me@mail.com")));
        assert_eq!(claim("&amp;"), Some((Category::Entity, "&amp;")));
        assert_eq!(claim("#1 fan"), Some((Category::Hashtag, "#1")));
        assert_eq!(claim("#tag's"), Some((Category::Hashtag, "#tag's")));
        assert_eq!(claim("@user's"), Some((Category::Mention, "@user's")));
        assert_eq!(claim("10:30pm"), Some((Category::Time, "10:30")));
        assert_eq!(claim("1984;"), Some((Category::Number, "1984")));
        assert_eq!(claim("Mrs. Smith"), Some((Category::Abbreviation, "Mrs.")));
        assert_eq!(claim("Miller's Crossing"), Some((Category::Contraction, "Miller's")));
        assert_eq!(claim("O'Brien"), Some((Category::EmbeddedApostrophe, "O'Brien")));
        assert_eq!(claim("it&#39;s"), Some((Category::Contraction, "it&#39;s")));
        assert_eq!(claim("“quoted"), Some((Category::Quote, "“")));
        assert_eq!(claim("?!? what"), Some((Category::PunctuationRun, "?!?")));
        assert_eq!(claim("-- so"), Some((Category::Separator, "--")));
        assert_eq!(claim("-->"), Some((Category::Arrow, "-->")));
        assert_eq!(claim("Think"), None);
        assert_eq!(claim(": x"), None);
    }

    #[test]
    fn no_empty_claims() {
        let text = "plain words only";
        for (pos, _) in text.char_indices() {
            if let Some((_, span)) = PatternRegistry::global().claim_at(text, pos) {
                assert!(span.end > span.start);
            }
        }
    }
}
