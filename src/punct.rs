use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::normalize::unify_quote;

const STOPS: &[char] = &['.', '。', '?', '!', ',', '…'];
const COLONS: &[char] = &[':', ';'];
const DASHES: &[char] = &['―', '—', '~', '–', '='];
const MORE_PUNCT: &[char] = &['-', '+', '―', '—', '~', '–', '=', '|', '_', '^'];

fn run(src: &str, set: impl Fn(char) -> bool) -> usize {
    src.char_indices()
        .find(|(_, c)| !set(*c))
        .map(|(i, _)| i)
        .unwrap_or(src.len())
}

pub(crate) fn quote_run(text: &str, pos: usize) -> Option<usize> {
    match run(&text[pos..], |c| unify_quote(c).is_some()) {
        0 => None,
        len => Some(pos + len),
    }
}

/// `...`, `?!?`, `…`, `::`; a single stop is left to the residual pass.
pub(crate) fn punctuation_run(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    let stops = run(src, |c| STOPS.contains(&c));
    if (stops > 0) && ((src[..stops].chars().count() > 1) || src[..stops].contains('…')) {
        return Some(pos + stops);
    }
    match run(src, |c| COLONS.contains(&c)) {
        len if len > 1 => Some(pos + len),
        _ => None,
    }
}

pub(crate) fn separator(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    match run(src, |c| c == '-') {
        0 => src
            .chars()
            .next()
            .filter(|c| DASHES.contains(c))
            .map(|c| pos + c.len_utf8()),
        1 => None,
        len => Some(pos + len),
    }
}

fn is_edge_punct(c: char) -> bool {
    matches!(
        c.general_category(),
        GeneralCategory::InitialPunctuation
            | GeneralCategory::FinalPunctuation
            | GeneralCategory::OpenPunctuation
            | GeneralCategory::ClosePunctuation
            | GeneralCategory::OtherPunctuation
    ) || (c == '\'')
        || (c == '"')
}

/// Token consisting of punctuation only, dropped when punctuation is eliminated.
pub fn is_punctuation_only(token: &str) -> bool {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (None, _) => false,
        (Some(c), None) if is_edge_punct(c) => true,
        (Some(_), _) => {
            token.chars().all(|c| unify_quote(c).is_some())
                || token.chars().all(|c| STOPS.contains(&c))
                || token.chars().all(|c| COLONS.contains(&c))
                || token.chars().all(|c| MORE_PUNCT.contains(&c))
        }
    }
}
