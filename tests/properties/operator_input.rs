//! Property tests for operator input validation

use hoist::domain::value_objects::{AppPort, BranchName, RemoteHost, RepoUrl};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]

    /// PROPERTY: a numeric port is accepted exactly when it is in 1..=65535
    #[test]
    fn port_accepted_iff_in_range(n in 0u32..200_000) {
        let parsed = AppPort::parse(&n.to_string());
        prop_assert_eq!(parsed.is_ok(), (1..=65535).contains(&n));
        if let Ok(port) = parsed {
            prop_assert_eq!(u32::from(port.get()), n);
        }
    }

    /// PROPERTY: port parsing never panics on arbitrary text
    #[test]
    fn port_parse_never_panics(input in ".{0,12}") {
        let _ = AppPort::parse(&input);
    }

    /// PROPERTY: the derived project name is always safe for docker and nginx
    #[test]
    fn project_name_is_sanitized(name in "[A-Za-z0-9][A-Za-z0-9_.~!$-]{0,24}") {
        let url = format!("https://git.example.test/org/{}.git", name);
        if let Ok(repo) = RepoUrl::parse(&url) {
            let project = repo.project_name();
            prop_assert!(!project.is_empty());
            prop_assert!(project.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()));
            prop_assert!(project
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || "_.-".contains(c)));
        }
    }

    /// PROPERTY: the scp-like and https forms of one repository agree on the name
    #[test]
    fn transports_agree_on_project_name(name in "[a-z0-9][a-z0-9_-]{0,16}") {
        let https = RepoUrl::parse(&format!("https://git.example.test/org/{}.git", name)).unwrap();
        let scp = RepoUrl::parse(&format!("git@git.example.test:org/{}.git", name)).unwrap();
        prop_assert_eq!(https.project_name(), scp.project_name());
        prop_assert_eq!(https.project_name(), name.as_str());
    }

    /// PROPERTY: an accepted branch can never be mistaken for a git option
    #[test]
    fn accepted_branch_is_never_an_option(input in "[-a-zA-Z0-9/._@{}~^ ]{0,20}") {
        if let Ok(branch) = BranchName::parse(&input) {
            prop_assert!(!branch.as_str().starts_with('-'));
            prop_assert!(!branch.as_str().contains(".."));
            prop_assert!(!branch.as_str().chars().any(char::is_whitespace));
        }
    }

    /// PROPERTY: every dotted-quad IPv4 address is accepted unchanged
    #[test]
    fn ipv4_literals_round_trip(a: u8, b: u8, c: u8, d: u8) {
        let text = format!("{}.{}.{}.{}", a, b, c, d);
        let host = RemoteHost::parse(&text).unwrap();
        prop_assert_eq!(host.as_str(), text.as_str());
    }

    /// PROPERTY: digit-and-dot strings that are not IPv4 addresses are rejected
    #[test]
    fn bogus_dotted_numbers_rejected(a in 256u32..100_000, b: u8) {
        let text = format!("{}.{}.0.1", a, b);
        prop_assert!(RemoteHost::parse(&text).is_err());
    }
}
