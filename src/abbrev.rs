use lazy_static::lazy_static;
use regex::Regex;

use crate::normalize::entity_at;
use crate::patterns::{char_before, is_word_char};

lazy_static! {
    static ref DOTTED: Regex = Regex::new(r"^(?:[A-Za-z]\.){2,8}").unwrap();
    static ref DOTTED_OPEN: Regex = Regex::new(r"^(?:[A-Za-z]\.){1,8}[A-Za-z]").unwrap();
}

const TITLES: &[&str] = &[
    "mr.", "messrs.", "mrs.", "mmes.", "ms.", "dr.", "drs.", "prof.", "rev.", "hon.", "st.", "sr.",
    "jr.", "ph.d.", "m.d.", "b.a.", "m.a.", "d.d.s", "gen.", "rep.", "sem.",
];
const STREETS: &[&str] = &["st.", "dr.", "ave.", "blvd.", "cir.", "crt.", "ct."];
const OTHER_ABBREVS: &[&str] = &[
    "a.m.", "p.m.", "u.s.", "u.s.a.", "i.e.", "e.g.", "a.d.", "c.e.", "b.c.", "b.c.e.", "d.c.",
    "no.",
];

fn known(src: &str) -> Option<usize> {
    TITLES
        .iter()
        .chain(STREETS)
        .chain(OTHER_ABBREVS)
        .filter(|abbr| {
            src.len() >= abbr.len()
                && src.is_char_boundary(abbr.len())
                && src[..abbr.len()].eq_ignore_ascii_case(abbr)
        })
        .map(|abbr| abbr.len())
        .max()
}

// what may follow a dotted abbreviation that is not a sentence end
fn closes_dotted(src: &str) -> bool {
    match src.chars().next() {
        None => true,
        Some(c) if c.is_whitespace() => true,
        Some('“' | '"' | '?' | '!' | ',' | ':' | ';') => true,
        Some('&') => entity_at(src).is_some(),
        Some(_) => false,
    }
}

fn dotted(src: &str) -> Option<usize> {
    [&*DOTTED, &*DOTTED_OPEN]
        .into_iter()
        .filter_map(|re| re.find(src))
        .map(|m| m.end())
        .filter(|end| closes_dotted(&src[*end..]))
        .max()
}

/// Titles and common abbreviations (`Mrs.`, `a.m.`) or dotted initials (`U.S.A`, `f.b.i.`).
pub(crate) fn abbreviation(text: &str, pos: usize) -> Option<usize> {
    if char_before(text, pos).is_some_and(is_word_char) {
        return None;
    }
    let src = &text[pos..];
    [known(src), dotted(src)]
        .into_iter()
        .flatten()
        .max()
        .map(|len| pos + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abbr(s: &str) -> Option<&str> {
        abbreviation(s, 0).map(|end| &s[..end])
    }

    #[test]
    fn known_abbreviations() {
        assert_eq!(abbr("Mrs. Smith"), Some("Mrs."));
        assert_eq!(abbr("MR. T"), Some("MR."));
        assert_eq!(abbr("u.s.a. today"), Some("u.s.a."));
        assert_eq!(abbr("Ph.D."), Some("Ph.D."));
        assert_eq!(abbr("st."), Some("st."));
        assert_eq!(abbreviation("1st.", 1), None);
        assert_eq!(abbr("Mr Smith"), None);
    }

    #[test]
    fn dotted_initials() {
        assert_eq!(abbr("F.B.I. agents"), Some("F.B.I."));
        assert_eq!(abbr("U.K, then"), Some("U.K"));
        assert_eq!(abbr("a.k.a&quot;"), Some("a.k.a"));
        assert_eq!(abbr("x.y.z."), Some("x.y.z."));
        assert_eq!(abbr("a.b.c.defg"), None);
        assert_eq!(abbr("A. Smith"), None);
    }
}
