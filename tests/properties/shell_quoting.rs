//! Property tests for remote command rendering

use hoist::domain::value_objects::{shell_quote, RemoteCommand};
use proptest::prelude::*;

/// Split a rendered line back into words the way a POSIX shell would for
/// the subset `shell_quote` produces: bare words, single-quoted runs and
/// the `\'` escape.
fn shell_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut chars = line.chars();
    while let Some(c) = chars.next() {
        match c {
            ' ' => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    current.push(q);
                }
            }
            '\\' => {
                in_word = true;
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            other => {
                in_word = true;
                current.push(other);
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// PROPERTY: a quoted word is read back by the shell as exactly one word
    #[test]
    fn quoted_word_survives_the_shell(word in "\\PC{0,40}") {
        prop_assert_eq!(shell_words(&shell_quote(&word)), vec![word]);
    }

    /// PROPERTY: rendering keeps every argument boundary
    #[test]
    fn rendered_command_keeps_argv(args in proptest::collection::vec("\\PC{0,16}", 0..6)) {
        let command = RemoteCommand::new("docker").args(args.iter().cloned());
        let mut expected = vec!["docker".to_string()];
        expected.extend(args);
        prop_assert_eq!(shell_words(&command.render()), expected);
    }

    /// PROPERTY: shell metacharacters never appear outside quotes
    #[test]
    fn metacharacters_are_always_quoted(word in "[a-z]{0,4}[;&|$`<>(){}*? \"]{1,3}[a-z]{0,4}") {
        let quoted = shell_quote(&word);
        prop_assert!(quoted.starts_with('\'') && quoted.ends_with('\''));
    }
}
