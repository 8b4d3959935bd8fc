use proptest::prelude::*;

use crate::{
    Aligner, IntoTokenizer, TokenizerOptions, TokenizerParams, align, is_punctuation_only,
    tokenize, tokenize_with,
};

fn noisy_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just(" ".to_string()),
            Just("&amp;".to_string()),
            Just("&quot;".to_string()),
            Just("&#39;".to_string()),
            Just("“".to_string()),
            Just("”".to_string()),
            Just(":-)".to_string()),
            Just("<3".to_string()),
            Just("http://t.co/x".to_string()),
            Just("don't".to_string()),
            Just("1,000".to_string()),
            Just("\u{200b}".to_string()),
            Just("\u{200d}".to_string()),
            Just("👍🏽".to_string()),
            Just("—".to_string()),
            Just("ΟΔΟΣ".to_string()),
            Just("it&#39;s".to_string()),
            Just("@user's".to_string()),
            Just("中文".to_string()),
            "[a-zA-Z0-9]{1,6}",
            "[ .,!?'\"#@:;()<>&=~_/-]{1,3}",
            "\\PC{1,3}",
        ],
        0..24,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn tokens_are_never_empty(text in noisy_text()) {
        for token in tokenize(&text) {
            prop_assert!(!token.is_empty());
        }
    }

    #[test]
    fn tokenize_is_deterministic(text in noisy_text()) {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }

    #[test]
    fn spans_are_ordered_and_in_range(text in noisy_text()) {
        let tokens = tokenize(&text);
        let spans = align(&text, &tokens);
        prop_assert!(spans.is_ok(), "{:?} {:?}", text, spans);
        let spans = spans.unwrap_or_default();
        let len = text.chars().count();
        prop_assert_eq!(spans.len(), tokens.len());
        for span in &spans {
            prop_assert!(span.onset <= span.offset);
            prop_assert!(span.offset < len);
        }
        for pair in spans.windows(2) {
            prop_assert!(pair[1].onset > pair[0].offset);
        }
    }

    #[test]
    fn spans_recover_token_sources(text in noisy_text()) {
        let locals = text.as_str().into_tokenizer(TokenizerParams::default()).collect::<Vec<_>>();
        let tokens = locals.iter().map(|l| l.data().text.clone()).collect::<Vec<_>>();
        let spans = align(&text, &tokens).unwrap_or_default();
        prop_assert_eq!(spans.len(), locals.len());
        for (span, local) in spans.iter().zip(locals.iter()) {
            prop_assert_eq!(span.chars(), local.chars());
            prop_assert_eq!(span.bytes(), local.bytes());
        }
    }

    #[test]
    fn casefolded_tokens_align(text in noisy_text()) {
        let params = TokenizerParams::default().add_option(TokenizerOptions::Casefold);
        let tokens = tokenize_with(&text, params.clone());
        let spans = Aligner::new(&params).align(&text, &tokens);
        prop_assert!(spans.is_ok(), "{:?} {:?}", text, spans);
        prop_assert_eq!(spans.unwrap_or_default().len(), tokens.len());
    }

    #[test]
    fn punctuation_elimination_filters(text in noisy_text()) {
        let expected = tokenize(&text)
            .into_iter()
            .filter(|t| !is_punctuation_only(t))
            .collect::<Vec<_>>();
        let params = TokenizerParams::default().add_option(TokenizerOptions::ElimPunct);
        prop_assert_eq!(tokenize_with(&text, params), expected);
    }
}
