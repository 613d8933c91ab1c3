//! JID helpers.

/// Reduce an address to its bare form: resource dropped, node and domain
/// lowercased.
///
/// `Alice@Example.org/Phone` becomes `alice@example.org`.
pub fn bare_jid(address: &str) -> String {
    let bare = match address.split_once('/') {
        Some((bare, _resource)) => bare,
        None => address,
    };
    bare.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_jid_strips_resource() {
        assert_eq!(bare_jid("alice@example.org/phone"), "alice@example.org");
        assert_eq!(bare_jid("alice@example.org"), "alice@example.org");
    }

    #[test]
    fn test_bare_jid_lowercases() {
        assert_eq!(bare_jid("Alice@Example.ORG/Laptop"), "alice@example.org");
    }
}
