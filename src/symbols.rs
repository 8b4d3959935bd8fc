use unicode_properties::{GeneralCategoryGroup, UnicodeEmoji, UnicodeGeneralCategory};
use unicode_segmentation::UnicodeSegmentation;

fn is_emoji(c: char) -> bool {
    !c.is_ascii() && c.is_emoji_char()
}

// "1️⃣", "#⃣"
fn is_keycap(src: &str) -> bool {
    let mut chars = src.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some('0'..='9' | '#' | '*'), Some('\u{fe0f}' | '\u{20e3}'))
    )
}

/// One emoji grapheme cluster: modifiers, ZWJ sequences, flags and keycaps stay together.
pub(crate) fn emoji(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    let first = src.chars().next()?;
    if !is_emoji(first) && !is_keycap(src) {
        return None;
    }
    src.graphemes(true).next().map(|g| pos + g.len())
}

fn is_plain_symbol(c: char) -> bool {
    !c.is_ascii() && (c.general_category_group() == GeneralCategoryGroup::Symbol) && !is_emoji(c)
}

/// Run of non-ascii, non-emoji symbols: `→→`, `°`, `€€`.
pub(crate) fn symbol_run(text: &str, pos: usize) -> Option<usize> {
    let src = &text[pos..];
    match src
        .char_indices()
        .find(|(_, c)| !is_plain_symbol(*c))
        .map(|(i, _)| i)
        .unwrap_or(src.len())
    {
        0 => None,
        len => Some(pos + len),
    }
}
