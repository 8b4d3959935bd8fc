use crate::normalize::{APOSTROPHES, apostrophe_entity};
use crate::patterns::{char_after, char_before, is_word_char, is_word_part};

const SUFFIXES: &[&str] = &["s", "t", "re", "ve", "ll", "d", "m"];
const MAX_HYPHENS: usize = 4;

fn word_run(text: &str, from: usize) -> usize {
    text[from..]
        .char_indices()
        .find(|(_, c)| !is_word_part(*c))
        .map(|(i, _)| from + i)
        .unwrap_or(text.len())
}

fn tagged(text: &str, pos: usize, sigils: &[char]) -> Option<usize> {
    let sigil = char_after(text, pos).filter(|c| sigils.contains(c))?;
    let from = pos + sigil.len_utf8();
    match word_run(text, from) {
        end if end > from => Some(clitic(text, end).unwrap_or(end)),
        _ => None,
    }
}

/// `#tag`, `#tag's`.
pub(crate) fn hashtag(text: &str, pos: usize) -> Option<usize> {
    tagged(text, pos, &['#'])
}

pub(crate) fn mention(text: &str, pos: usize) -> Option<usize> {
    tagged(text, pos, &['@', '＠'])
}

// word starting at `pos`, a few single hyphens inside: "mother-in-law"
fn host(text: &str, pos: usize) -> Option<usize> {
    if char_before(text, pos).is_some_and(is_word_part)
        || !char_after(text, pos).is_some_and(is_word_char)
    {
        return None;
    }
    let mut end = word_run(text, pos);
    let mut hyphens = 0;
    while (hyphens < MAX_HYPHENS) && text[end..].starts_with('-') {
        match word_run(text, end + 1) {
            next if next > end + 1 => end = next,
            _ => break,
        }
        hyphens += 1;
    }
    Some(end)
}

// a plain apostrophe or an entity standing for one
fn apostrophe(text: &str, at: usize) -> Option<usize> {
    match char_after(text, at) {
        Some(c) if APOSTROPHES.contains(&c) => Some(at + c.len_utf8()),
        Some('&') => apostrophe_entity(&text[at..]).map(|(len, _)| at + len),
        Some(_) | None => None,
    }
}

// apostrophe plus suffix right after a host ending at `at`
fn clitic(text: &str, at: usize) -> Option<usize> {
    let from = apostrophe(text, at)?;
    let end = SUFFIXES
        .iter()
        .find(|suffix| {
            text[from..]
                .get(..suffix.len())
                .is_some_and(|s| s.eq_ignore_ascii_case(suffix))
        })
        .map(|suffix| from + suffix.len())?;
    match char_after(text, end) {
        Some(c) if is_word_part(c) => None,
        Some(_) | None => Some(end),
    }
}

/// Host word with a clitic: `Miller's`, `don't`, `we’ll`, `it&#39;s`.
pub(crate) fn contraction(text: &str, pos: usize) -> Option<usize> {
    clitic(text, host(text, pos)?)
}

/// Apostrophes inside a word: `O'Brien`, `rock'n'roll`.
pub(crate) fn embedded_apostrophe(text: &str, pos: usize) -> Option<usize> {
    let mut end = host(text, pos)?;
    let mut parts = 0;
    while let Some(from) = apostrophe(text, end) {
        if !char_after(text, from).is_some_and(is_word_char) {
            break;
        }
        end = word_run(text, from);
        parts += 1;
    }
    match parts {
        0 => None,
        _ => Some(end),
    }
}
