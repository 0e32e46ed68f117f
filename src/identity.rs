// Identity normalization — turns raw handles and topic names into comparable keys.
//
// Every set, graph node and overlap in the crate is keyed by the output of
// these functions. An empty key means "no identity" and must never be stored.

use serde::{Deserialize, Serialize};

/// What kind of entity an identity key refers to.
///
/// Accounts and topics live in separate namespaces: the same string used as
/// a handle and as a topic name are two different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityKind {
    Account,
    Topic,
}

impl IdentityKind {
    /// Prefix used when identities of both kinds share one set.
    pub fn tag(&self) -> &'static str {
        match self {
            IdentityKind::Account => "acc:",
            IdentityKind::Topic => "topic:",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityKind::Account => "account",
            IdentityKind::Topic => "topic",
        }
    }
}

impl std::fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Normalize an account handle: trim, lowercase, drop the leading `@`.
///
/// The whole leading run of `@` and whitespace is removed so that the result
/// is a fixed point (`"@ @Bob"` and `"bob"` both become `"bob"`).
pub fn normalize_account(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    raw.trim()
        .to_lowercase()
        .trim_start_matches(|c: char| c == '@' || c.is_whitespace())
        .trim_end()
        .to_string()
}

/// Normalize a topic name: trim and lowercase. Topics keep any `@`.
pub fn normalize_topic(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_lowercase()).unwrap_or_default()
}

/// Normalize a raw string according to the kind of entity it names.
pub fn normalize(kind: IdentityKind, raw: Option<&str>) -> String {
    match kind {
        IdentityKind::Account => normalize_account(raw),
        IdentityKind::Topic => normalize_topic(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_strips_at_and_case() {
        assert_eq!(normalize_account(Some("  @Bob ")), "bob");
        assert_eq!(normalize_account(Some("ALICE")), "alice");
    }

    #[test]
    fn test_absent_is_empty() {
        assert_eq!(normalize_account(None), "");
        assert_eq!(normalize_topic(None), "");
        assert_eq!(normalize_account(Some("   ")), "");
        assert_eq!(normalize_account(Some("@")), "");
    }

    #[test]
    fn test_topic_keeps_at() {
        assert_eq!(normalize_topic(Some(" @Home Cooking ")), "@home cooking");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "@@bob", "@ bob", " @Bob\t", "bob", "", "@", "Ünïcödé", " a b ", "@@ @x@",
        ];
        for raw in inputs {
            for kind in [IdentityKind::Account, IdentityKind::Topic] {
                let once = normalize(kind, Some(raw));
                let twice = normalize(kind, Some(&once));
                assert_eq!(once, twice, "{kind} normalization not idempotent for {raw:?}");
            }
        }
    }
}
