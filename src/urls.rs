use crate::normalize::entity_at;
use crate::patterns::{char_after, char_before, is_word_char};

const COMMON_TLDS: &[&str] = &[
    "com", "co.uk", "org", "edu", "gov", "net", "mil", "aero", "asia", "biz", "cat", "coop", "info",
    "int", "jobs", "mobi", "museum", "name", "pro", "tel", "travel", "xxx", "ca",
];

const COMMON_CC_TLDS: &[&str] = &[
    "ac", "ad", "ae", "af", "ag", "ai", "al", "am", "an", "ao", "aq", "ar", "as", "at", "au", "aw",
    "ax", "az", "ba", "bb", "bd", "be", "bf", "bg", "bh", "bi", "bj", "bm", "bn", "bo", "br", "bs",
    "bt", "bv", "bw", "by", "bz", "ca", "cc", "cd", "cf", "cg", "ch", "ci", "ck", "cl", "cm", "cn",
    "co", "cr", "cs", "cu", "cv", "cx", "cy", "cz", "dd", "de", "dj", "dk", "dm", "do", "dz", "ec",
    "ee", "eg", "eh", "er", "es", "et", "eu", "fi", "fj", "fk", "fm", "fo", "fr", "ga", "gb", "gd",
    "ge", "gf", "gg", "gh", "gi", "gl", "gm", "gn", "gp", "gq", "gr", "gs", "gt", "gu", "gw", "gy",
    "hk", "hm", "hn", "hr", "ht", "hu", "id", "ie", "il", "im", "in", "io", "iq", "ir", "is", "it",
    "je", "jm", "jo", "jp", "ke", "kg", "kh", "ki", "km", "kn", "kp", "kr", "kw", "ky", "kz", "la",
    "lb", "lc", "li", "lk", "lr", "ls", "lt", "lu", "lv", "ly", "ma", "mc", "md", "me", "mg", "mh",
    "mk", "ml", "mm", "mn", "mo", "mp", "mq", "mr", "ms", "mt", "mu", "mv", "mw", "mx", "my", "mz",
    "na", "nc", "ne", "nf", "ng", "ni", "nl", "no", "np", "nr", "nu", "nz", "om", "pa", "pe", "pf",
    "pg", "ph", "pk", "pl", "pm", "pn", "pr", "ps", "pt", "pw", "py", "qa", "re", "ro", "rs", "ru",
    "rw", "sa", "sb", "sc", "sd", "se", "sg", "sh", "si", "sj", "sk", "sl", "sm", "sn", "so", "sr",
    "ss", "st", "su", "sv", "sy", "sz", "tc", "td", "tf", "tg", "th", "tj", "tk", "tl", "tm", "tn",
    "to", "tp", "tr", "tt", "tv", "tw", "tz", "ua", "ug", "uk", "us", "uy", "uz", "va", "vc", "ve",
    "vg", "vi", "vn", "vu", "wf", "ws", "ye", "yt", "za", "zm", "zw",
];

const URL_TRAILING: &[char] = &[
    '\'', '"', '“', '”', '‘', '’', '.', '。', '?', '!', '…', ',', ':', ';',
];

const SCHEMES: &[&str] = &["http://", "https://"];

// longest host name and local part looked at
const MAX_DOMAIN: usize = 253;
const MAX_LOCAL: usize = 64;
const ENTITY_TAIL: usize = 12;

fn is_domain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || (c == '.') || (c == '-')
}

fn ends_with_ci(s: &str, suffix: &str) -> bool {
    (s.len() >= suffix.len())
        && s.is_char_boundary(s.len() - suffix.len())
        && s[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// `domain` ends in ".tld" or ".tld.cc" with something in front of it.
fn has_known_tld(domain: &str) -> bool {
    let with_tld = |d: &str| {
        COMMON_TLDS.iter().chain(COMMON_CC_TLDS.iter()).any(|tld| {
            ends_with_ci(d, tld)
                && d[..d.len() - tld.len()].ends_with('.')
                && (d.len() > tld.len() + 1)
        })
    };
    if with_tld(domain) {
        return true;
    }
    match domain.rsplit_once('.') {
        Some((head, cc)) if COMMON_CC_TLDS.iter().any(|t| t.eq_ignore_ascii_case(cc)) => {
            with_tld(head)
        }
        _ => false,
    }
}

// end offsets inside a run of domain chars where a `\W` lookahead holds
fn domain_cuts(text: &str, start: usize) -> Vec<usize> {
    let run_end = text[start..]
        .char_indices()
        .take(MAX_DOMAIN + 1)
        .find(|(i, c)| (*i == MAX_DOMAIN) || !is_domain_char(*c))
        .map(|(i, _)| start + i)
        .unwrap_or(text.len());
    let mut cuts: Vec<usize> = text[start..run_end]
        .char_indices()
        .filter(|(i, c)| (*i > 0) && ((*c == '.') || (*c == '-')))
        .map(|(i, _)| start + i)
        .collect();
    if !char_after(text, run_end).is_some_and(is_word_char) {
        cuts.push(run_end);
    }
    cuts.reverse();
    cuts
}

fn scheme_prefix(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    for scheme in SCHEMES {
        if src.len() >= scheme.len()
            && src.is_char_boundary(scheme.len())
            && src[..scheme.len()].eq_ignore_ascii_case(scheme)
        {
            return Some(pos + scheme.len());
        }
    }
    let www = "www.";
    if src.len() >= www.len()
        && src.is_char_boundary(www.len())
        && src[..www.len()].eq_ignore_ascii_case(www)
        && !char_before(text, pos).is_some_and(is_word_char)
    {
        return Some(pos + www.len());
    }
    None
}

fn bare_domain(text: &str, pos: usize) -> Option<usize> {
    let first = text[pos..].chars().next()?;
    if !first.is_ascii_alphanumeric() || char_before(text, pos).is_some_and(is_word_char) {
        return None;
    }
    let cuts = domain_cuts(text, pos);
    if !text[pos..*cuts.first()?].contains('.') {
        return None;
    }
    cuts.into_iter().find(|end| has_known_tld(&text[pos..*end]))
}

fn url_body_end(text: &str, from: usize) -> usize {
    match text[from..].chars().next() {
        Some(c) if (c != '.') && !c.is_whitespace() && (c != '<') && (c != '>') => text[from..]
            .char_indices()
            .find(|(_, c)| c.is_whitespace() || (*c == '<') || (*c == '>'))
            .map(|(i, _)| from + i)
            .unwrap_or(text.len()),
        Some(_) | None => from,
    }
}

// peel trailing punctuation and entities that belong to the sentence, not the link
fn trim_url(text: &str, min: usize, mut end: usize) -> usize {
    let opens = text[min..end].matches('(').count();
    let mut closes = text[min..end].matches(')').count();
    while end > min {
        let url = &text[..end];
        if url.ends_with(';') {
            let mut from = end.saturating_sub(ENTITY_TAIL).max(min);
            while !url.is_char_boundary(from) {
                from += 1;
            }
            if let Some(amp) = url[from..].rfind('&') {
                let amp = from + amp;
                if entity_at(&url[amp..]).map(|(len, _)| amp + len) == Some(end) {
                    end = amp;
                    continue;
                }
            }
        }
        match url.chars().next_back() {
            Some(c) if URL_TRAILING.contains(&c) => end -= c.len_utf8(),
            Some(')') if opens < closes => {
                closes -= 1;
                end -= 1
            }
            Some(_) | None => break,
        }
    }
    end
}

/// URL with a scheme, a `www.` prefix, or a bare domain ending in a known TLD.
pub(crate) fn url(text: &str, pos: usize) -> Option<usize> {
    let min = match scheme_prefix(text, pos) {
        Some(end) => end,
        None => bare_domain(text, pos)?,
    };
    let end = trim_url(text, min, url_body_end(text, min));
    Some(end)
}

/// `local@domain.tld` surrounded by non-word characters.
pub(crate) fn email(text: &str, pos: usize) -> Option<usize> {
    if char_before(text, pos).is_some_and(is_word_char) {
        return None;
    }
    let local = text[pos..]
        .char_indices()
        .take(MAX_LOCAL + 1)
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '%' | '+' | '-')))
        .map(|(i, _)| pos + i)?;
    if (local == pos) || !text[local..].starts_with('@') {
        return None;
    }
    let domain = local + 1;
    domain_cuts(text, domain).into_iter().find(|end| {
        match text[domain..*end].rsplit_once('.') {
            Some((head, tld)) => {
                !head.is_empty()
                    && (2..=4).contains(&tld.len())
                    && tld.bytes().all(|b| b.is_ascii_alphabetic())
            }
            None => false,
        }
    })
}
