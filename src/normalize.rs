use std::borrow::Cow;

const NAMED_ENTITIES: &[(&str, char)] = &[
    ("amp", '&'),
    ("lt", '<'),
    ("gt", '>'),
    ("quot", '"'),
    ("apos", '\''),
];

// longest entity body we look for, "&#x10FFFF;" included
const MAX_ENTITY: usize = 10;

pub(crate) const DOUBLE_QUOTES: &[char] = &['"', '“', '”', '„', '‟', '«', '»', '″'];
pub(crate) const SINGLE_QUOTES: &[char] = &['\'', '‘', '’', '‚', '‛', '‹', '›'];
pub(crate) const APOSTROPHES: &[char] = &['\'', '’', '′', '`'];

/// How the raw text of a protected span turns into the emitted token.
///
/// Every non-identity normalization can also answer the reverse question
/// ("does this raw text produce that token?"), which is what the aligner uses
/// to recover spans of decoded or unified tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Normalization {
    Identity,
    /// The whole span is one entity: `&amp;` -> `&`.
    DecodeEntity,
    /// Entity-encoded apostrophes inside a word: `it&#39;s` -> `it's`.
    DecodeApostrophes,
    UnifyQuotes,
}

impl Normalization {
    pub fn apply<'s>(&self, raw: &'s str) -> Cow<'s, str> {
        match self {
            Normalization::Identity => Cow::Borrowed(raw),
            Normalization::DecodeEntity => match entity_at(raw) {
                Some((len, c)) if len == raw.len() => Cow::Owned(c.to_string()),
                Some(_) | None => Cow::Borrowed(raw),
            },
            Normalization::DecodeApostrophes => {
                if !raw.contains('&') {
                    return Cow::Borrowed(raw);
                }
                let mut res = String::with_capacity(raw.len());
                let mut rest = raw;
                while let Some(c) = rest.chars().next() {
                    match apostrophe_entity(rest) {
                        Some((len, a)) => {
                            res.push(a);
                            rest = &rest[len..];
                        }
                        None => {
                            res.push(c);
                            rest = &rest[c.len_utf8()..];
                        }
                    }
                }
                Cow::Owned(res)
            }
            Normalization::UnifyQuotes => {
                if raw.chars().all(|c| unify_quote(c) == Some(c)) {
                    Cow::Borrowed(raw)
                } else {
                    Cow::Owned(raw.chars().map(|c| unify_quote(c).unwrap_or(c)).collect())
                }
            }
        }
    }

    /// Cheap test whether `token` lies in the image of this normalization.
    pub fn could_produce(&self, token: &str) -> bool {
        match self {
            Normalization::Identity => !token.is_empty(),
            Normalization::DecodeEntity => {
                let mut cs = token.chars();
                matches!((cs.next(), cs.next()), (Some(_), None))
            }
            Normalization::DecodeApostrophes => {
                (token.chars().count() > 1) && token.chars().any(|c| APOSTROPHES.contains(&c))
            }
            Normalization::UnifyQuotes => {
                !token.is_empty() && token.chars().all(|c| (c == '"') || (c == '\''))
            }
        }
    }

    /// Length in bytes of the raw prefix of `src` that normalizes to `token`.
    pub fn preimage_at(&self, token: &str, src: &str) -> Option<usize> {
        self.preimage(token, src, false)
    }

    /// Same as [`Normalization::preimage_at`], for tokens that were lower-cased after
    /// normalization.
    pub fn folded_preimage_at(&self, token: &str, src: &str) -> Option<usize> {
        self.preimage(token, src, true)
    }

    fn preimage(&self, token: &str, src: &str, fold: bool) -> Option<usize> {
        if !self.could_produce(token) {
            return None;
        }
        match self {
            Normalization::Identity if !fold => match src.starts_with(token) {
                true => Some(token.len()),
                false => None,
            },
            Normalization::Identity => raw_prefix(src, token, fold, false),
            Normalization::DecodeApostrophes => raw_prefix(src, token, fold, true),
            Normalization::DecodeEntity => {
                let (len, c) = entity_at(src)?;
                let want = wanted(token, fold);
                let mut at = 0;
                match consume(&want, &mut at, c, fold) && (at == want.len()) {
                    true => Some(len),
                    false => None,
                }
            }
            Normalization::UnifyQuotes => {
                let mut len = 0;
                let mut raw = src.chars();
                for t in token.chars() {
                    let r = raw.next()?;
                    if unify_quote(r) != Some(t) {
                        return None;
                    }
                    len += r.len_utf8();
                }
                Some(len)
            }
        }
    }
}

// lower case maps a word-final sigma to 'ς' and a lone one to 'σ'
fn unify_sigma(c: char) -> char {
    match c {
        'ς' => 'σ',
        c => c,
    }
}

fn wanted(token: &str, fold: bool) -> Vec<char> {
    match fold {
        true => token
            .chars()
            .flat_map(char::to_lowercase)
            .map(unify_sigma)
            .collect(),
        false => token.chars().collect(),
    }
}

// matches `c` against `want` from `*at` on, moving `*at` past it
fn consume(want: &[char], at: &mut usize, c: char, fold: bool) -> bool {
    let mut eat = |l: char| {
        let same = want.get(*at) == Some(&l);
        *at += 1;
        same
    };
    match fold {
        true => c.to_lowercase().map(unify_sigma).all(eat),
        false => eat(c),
    }
}

// shortest prefix of `src` spelling `token`, optionally through encoded apostrophes
fn raw_prefix(src: &str, token: &str, fold: bool, apostrophes: bool) -> Option<usize> {
    let want = wanted(token, fold);
    let mut at = 0;
    let mut len = 0;
    while at < want.len() {
        let rest = &src[len..];
        if apostrophes {
            if let Some((raw, a)) = apostrophe_entity(rest) {
                if want[at] == a {
                    at += 1;
                    len += raw;
                    continue;
                }
            }
        }
        let c = rest.chars().next()?;
        if !consume(&want, &mut at, c, fold) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

pub(crate) fn unify_quote(c: char) -> Option<char> {
    if DOUBLE_QUOTES.contains(&c) {
        return Some('"');
    }
    if SINGLE_QUOTES.contains(&c) {
        return Some('\'');
    }
    None
}

/// Parses an HTML entity at the start of `src`: `&name;`, `&#NNN;` or `&#xHH;`.
///
/// Returns the raw length in bytes and the decoded character. Numeric entities
/// that decode to whitespace, control or format characters are rejected, so
/// the decoded token is always visible text.
pub(crate) fn entity_at(src: &str) -> Option<(usize, char)> {
    let rest = src.strip_prefix('&')?;
    let semi = rest
        .bytes()
        .take(MAX_ENTITY + 1)
        .position(|b| b == b';')?;
    if semi == 0 {
        return None;
    }
    let body = &rest[..semi];
    let c = match body.strip_prefix('#') {
        Some(num) => {
            let code = match num.strip_prefix(['x', 'X']) {
                Some(hex) if !hex.is_empty() && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                    u32::from_str_radix(hex, 16).ok()?
                }
                Some(_) => return None,
                None if !num.is_empty() && num.bytes().all(|b| b.is_ascii_digit()) => {
                    num.parse::<u32>().ok()?
                }
                None => return None,
            };
            let c = char::from_u32(code)?;
            if c.is_whitespace() || c.is_control() || is_format(c) {
                return None;
            }
            c
        }
        None => NAMED_ENTITIES
            .iter()
            .find(|(name, _)| *name == body)
            .map(|(_, c)| *c)?,
    };
    Some((semi + 2, c))
}

/// An entity at the start of `src` that decodes to an apostrophe: `&#39;`, `&apos;`, `&#8217;`.
pub(crate) fn apostrophe_entity(src: &str) -> Option<(usize, char)> {
    entity_at(src).filter(|(_, c)| APOSTROPHES.contains(c))
}

fn is_format(c: char) -> bool {
    use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};
    c.general_category() == GeneralCategory::Format
}
