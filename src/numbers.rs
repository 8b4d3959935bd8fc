use unicode_properties::{GeneralCategoryGroup, UnicodeGeneralCategory};

use crate::patterns::{char_after, char_before};

fn is_currency(c: char) -> bool {
    matches!(c, '$' | '£' | '¥' | 'ƒ' | '\u{20a0}'..='\u{20cf}')
}

fn digits(text: &str, from: usize) -> usize {
    text[from..].bytes().take_while(|b| b.is_ascii_digit()).count()
}

// sign is only a sign at the start of a word: "-5" but not "5-5"
fn prefix(text: &str, pos: usize) -> usize {
    match char_after(text, pos) {
        Some(c) if is_currency(c) => c.len_utf8(),
        Some('+') | Some('-') if char_before(text, pos).is_none_or(char::is_whitespace) => 1,
        Some(_) | None => 0,
    }
}

/// Clock time: `10:30`, `1:05:59`.
pub(crate) fn time(text: &str, pos: usize) -> Option<usize> {
    if char_before(text, pos).is_some_and(char::is_alphanumeric) {
        return None;
    }
    let mut end = match digits(text, pos) {
        0 => return None,
        n => pos + n,
    };
    let mut groups = 0;
    while groups < 2 && text[end..].starts_with(':') {
        match digits(text, end + 1) {
            0 => break,
            n => end += 1 + n,
        }
        groups += 1;
    }
    match groups {
        0 => None,
        _ => Some(end),
    }
}

/// Signed or priced number with optional thousands groups, decimal parts and percent.
pub(crate) fn number(text: &str, pos: usize) -> Option<usize> {
    if char_before(text, pos).is_some_and(char::is_alphanumeric) {
        return None;
    }
    let start = pos + prefix(text, pos);
    let mut end = match digits(text, start) {
        0 => return None,
        n => start + n,
    };

    let mut grouped = end;
    while text[grouped..].starts_with(',') && (digits(text, grouped + 1) == 3) {
        grouped += 4;
    }
    // "1,2345" or "1,000,00" are not thousand-separated
    let grouped = (grouped > end)
        && !char_after(text, grouped).is_some_and(|c| (c == ',') || c.is_ascii_digit());
    if grouped {
        while text[end..].starts_with(',') && (digits(text, end + 1) == 3) {
            end += 4;
        }
    }

    let mut fractional = false;
    while text[end..].starts_with('.') {
        match digits(text, end + 1) {
            0 => break,
            n => end += 1 + n,
        }
        fractional = true;
    }

    if text[end..].starts_with('%') {
        return Some(end + 1);
    }
    if !grouped && !fractional && !bare_integer_ends(text, end) {
        return None;
    }
    Some(end)
}

// "2nd", "1980's" and "5\u{301}" continue as words
fn bare_integer_ends(text: &str, end: usize) -> bool {
    match char_after(text, end) {
        None => true,
        Some(c) if c.is_alphanumeric() => false,
        Some(c) if c.general_category_group() == GeneralCategoryGroup::Mark => false,
        Some(c @ ('\'' | '’')) => {
            !char_after(text, end + c.len_utf8()).is_some_and(char::is_alphanumeric)
        }
        Some(_) => true,
    }
}
