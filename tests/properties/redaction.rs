//! Property tests for log secret scrubbing

use hoist::domain::value_objects::AccessToken;
use hoist::infrastructure::log::Redactor;
use proptest::prelude::*;
use url::Url;

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// PROPERTY: a registered token never survives scrubbing, wherever it sits
    #[test]
    fn token_never_survives(
        token in "[A-Za-z0-9_]{8,40}",
        prefix in "\\PC{0,30}",
        suffix in "\\PC{0,30}",
    ) {
        let redactor = Redactor::new();
        redactor.add_token(&AccessToken::parse(token.clone()).unwrap());

        let line = format!("{}{}{}{}", prefix, token, suffix, token);
        let scrubbed = redactor.scrub(&line);
        prop_assert!(!scrubbed.contains(&token));
    }

    /// PROPERTY: the percent-encoded form inside a remote URL is scrubbed too
    #[test]
    fn url_embedded_token_never_survives(token in "[A-Za-z0-9@:/#%?+_-]{8,32}") {
        let redactor = Redactor::new();
        redactor.add_token(&AccessToken::parse(token.clone()).unwrap());

        let mut url = Url::parse("https://git.example.test/org/app.git").unwrap();
        url.set_username("x-access-token").unwrap();
        url.set_password(Some(&token)).unwrap();
        let line = format!("fatal: unable to access '{}': 403", url);

        let scrubbed = redactor.scrub(&line);
        prop_assert!(!scrubbed.contains(&token));
        if let Some(encoded) = url.password() {
            prop_assert!(!scrubbed.contains(encoded));
        }
    }

    /// PROPERTY: text without the secret passes through unchanged
    #[test]
    fn unrelated_text_untouched(token in "[A-Z]{12}", text in "[a-z0-9 .:/]{0,60}") {
        let redactor = Redactor::new();
        redactor.add_token(&AccessToken::parse(token).unwrap());
        prop_assert_eq!(redactor.scrub(&text), text);
    }
}
