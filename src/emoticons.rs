use lazy_static::lazy_static;
use regex::Regex;

use crate::patterns::{char_after, char_before, is_word_char};

lazy_static! {
    // eyes, optional nose (empty nose preferred), mouth
    static ref WESTERN: Regex = Regex::new(
        r"^[:=;](?:-|[^a-zA-Z0-9 ])??(?:[pPd3]+|[oO]+|[/\\]+|[vV]+|[Ss]+|\|+|[(\[{]|[D)\]}])"
    ).unwrap();
    static ref OTHER_FACES: Regex = Regex::new(
        r#"^(?:--['"]|(?:<|&lt;|>|&gt;)[._-]{1,8}(?:<|&lt;|>|&gt;)|\._{1,8}\.)"#
    ).unwrap();
    static ref HEARTS: Regex = Regex::new(r"^(?:<{1,4}/?3+)+").unwrap();
    static ref ARROWS: Regex = Regex::new(r"^(?:<{0,4}[-―—=]{0,8}>+|<{1,4}[-―—=]{0,8}>*)").unwrap();
}

const FACE_EYES: &[char] = &[
    '♥', '0', 'o', '°', 'v', '$', 't', 'x', ';', '\u{0CA0}', '@', 'ʘ', '•', '・', '◕', '^', '¬', '*',
];

// longest arm and face of an east-asian emote, in characters
const EAST_SIDE: usize = 3;
const EAST_BODY: usize = 8;

const EAST_LEFT: &[char] = &['＼', '\\', 'ƪ', 'Ԅ', '(', '（', '<', '>', ';', 'ヽ', '-', '=', '~', '*'];
const EAST_RIGHT: &[char] = &[
    '-', '=', ')', ';', '\'', '"', '<', '>', 'ʃ', '）', '/', '／', 'ノ', 'ﾉ', '丿', '╯', 'σ', 'っ', 'µ',
    '~', '\\', '*',
];

pub(crate) fn heart(text: &str, pos: usize) -> Option<usize> {
    HEARTS.find(&text[pos..]).map(|m| pos + m.end())
}

pub(crate) fn arrow(text: &str, pos: usize) -> Option<usize> {
    ARROWS.find(&text[pos..]).map(|m| pos + m.end())
}

/// Longest of the western, symmetric and east-asian emoticon forms at `pos`.
pub(crate) fn emoticon(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    let western = WESTERN.find(src).map(|m| m.end()).filter(|end| {
        // ":D" must not be the start of ":Disney"
        let last = src[..*end].chars().next_back();
        match (last, char_after(text, pos + end)) {
            (Some(l), Some(n)) => !(l.is_alphanumeric() && n.is_alphanumeric()),
            _ => true,
        }
    });
    let face = basic_face(text, pos);
    let other = OTHER_FACES.find(src).map(|m| m.end());
    let east = east_emote(src);
    [western, face, other, east]
        .into_iter()
        .flatten()
        .max()
        .map(|len| pos + len)
}

fn same_eye(a: char, b: char) -> bool {
    a.to_lowercase().eq(b.to_lowercase())
}

fn face_eye(c: char) -> bool {
    c.to_lowercase().all(|l| FACE_EYES.contains(&l))
}

// eye, '.' or a run of '_'/'-', the same eye again: "^_^", "o.O", "x_x"
fn face_len(src: &str) -> Option<usize> {
    let mut chars = src.char_indices().peekable();
    let (_, eye) = chars.next()?;
    if !face_eye(eye) {
        return None;
    }
    let (_, center) = chars.next()?;
    match center {
        // "0.0" and "2-0" are numbers
        '.' | '-' if eye == '0' => return None,
        '.' => {}
        '_' | '-' => {
            while let Some((_, '_' | '-')) = chars.peek() {
                chars.next();
            }
        }
        _ => return None,
    }
    let (i, right) = chars.next()?;
    match same_eye(eye, right) {
        true => Some(i + right.len_utf8()),
        false => None,
    }
}

fn basic_face(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    let len = face_len(src)?;
    let first = src.chars().next()?;
    let last = src[..len].chars().next_back()?;
    if first.is_alphanumeric() && char_before(text, pos).is_some_and(is_word_char) {
        return None;
    }
    if last.is_alphanumeric() && char_after(text, pos + len).is_some_and(is_word_char) {
        return None;
    }
    Some(len)
}

fn east_symbol(c: char) -> bool {
    !(c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '(' | ')' | '*' | ':' | '=' | '-'))
}

// left+ (face | symbol)+ right+, e.g. "(^_^)", "\(^▽^)/", "ヽ(´ー`)ノ"
fn east_emote(src: &str) -> Option<usize> {
    let left = src
        .char_indices()
        .take(EAST_SIDE)
        .take_while(|(_, c)| EAST_LEFT.contains(c))
        .last()
        .map(|(i, c)| i + c.len_utf8())?;

    let mut boundaries = Vec::new();
    let mut face_like = false;
    let mut i = left;
    while boundaries.len() < EAST_BODY {
        if let Some(len) = face_len(&src[i..]) {
            face_like = true;
            i += len;
        } else {
            match src[i..].chars().next() {
                Some(c) if east_symbol(c) => {
                    face_like = face_like || !c.is_ascii();
                    i += c.len_utf8();
                }
                Some(_) | None => break,
            }
        }
        boundaries.push(i);
    }
    // plain ascii punctuation in brackets, "(...)" or "(!)", is not a face
    if !face_like {
        return None;
    }
    boundaries.into_iter().rev().find_map(|b| {
        src[b..]
            .char_indices()
            .take(EAST_SIDE)
            .take_while(|(_, c)| EAST_RIGHT.contains(c))
            .last()
            .map(|(j, c)| b + j + c.len_utf8())
    })
}

fn decoration_class(c: char) -> Option<u8> {
    match c {
        '♫' | '♪' => Some(0),
        '★' | '☆' => Some(1),
        '♥' | '❤' | '♡' => Some(2),
        '\u{2639}'..='\u{263b}' => Some(3),
        '\u{e001}'..='\u{ebbb}' => Some(4),
        _ => None,
    }
}

pub(crate) fn decoration(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    let class = decoration_class(src.chars().next()?)?;
    let len = src
        .char_indices()
        .take_while(|(_, c)| decoration_class(*c) == Some(class))
        .last()
        .map(|(i, c)| i + c.len_utf8())?;
    // keep a trailing variation selector with its heart
    match src[len..].starts_with('\u{fe0f}') {
        true => Some(pos + len + '\u{fe0f}'.len_utf8()),
        false => Some(pos + len),
    }
}
