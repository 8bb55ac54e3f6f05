/// Client identity resolver
///
/// Determines whether a candidate client already exists, using normalized
/// comparison keys:
///
/// - **Phone**: digits-only projection. `"+974 3071 2345"`, `"30712345"` and
///   `"3071-2345"` with the same digits compare equal.
/// - **Name**: trimmed and case-folded.
///
/// The scan runs over the full client collection in its stable fetch order;
/// the first match wins. This is a deliberate first-occurrence tie-break,
/// not a best-match ranking. A client matching both keys is reported once,
/// tagged as a phone match.
///
/// # Example
///
/// ```
/// use glowdesk_shared::identity::{find_duplicates, normalize_phone};
///
/// assert_eq!(normalize_phone("+974 3071-2345"), "97430712345");
///
/// // Both inputs empty is a caller error
/// assert!(find_duplicates(None, None, &[]).is_err());
/// ```

use serde::{Deserialize, Serialize};

use crate::models::client::ClientWithAccount;

/// Error type for identity resolution
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// Neither a name nor a phone was supplied
    #[error("Either a name or a phone number is required")]
    MissingInput,
}

/// Which comparison key matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateKind {
    /// Matched on the digits-only phone key; takes priority over name
    Phone,

    /// Matched on the trimmed, case-folded name key
    Name,
}

impl DuplicateKind {
    /// String tag used in API payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            DuplicateKind::Phone => "phone",
            DuplicateKind::Name => "name",
        }
    }

    /// Human-readable conflict message distinguishing the two cases.
    pub fn message(&self) -> &'static str {
        match self {
            DuplicateKind::Phone => "A client with this phone number already exists",
            DuplicateKind::Name => "A client with this name already exists",
        }
    }
}

/// A single duplicate found by the scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicateMatch {
    /// Which key matched
    pub match_type: DuplicateKind,

    /// The existing client that matched
    pub client: ClientWithAccount,
}

/// Strips every non-digit character from a phone string.
///
/// This is the sole phone comparison key: two phone strings are equal iff
/// their digit-only projections are equal. Empty input yields an empty
/// string. Idempotent.
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Trims and case-folds a name.
///
/// Two names are equal iff their normalized forms are identical strings.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Derives the initials avatar for a client name: the first letter of each
/// of the first two whitespace-separated tokens, or the first two characters
/// of a single-token name, uppercased.
pub fn initials_avatar(name: &str) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();

    match tokens.as_slice() {
        [] => String::new(),
        [only] => only.chars().take(2).collect::<String>().to_uppercase(),
        [first, second, ..] => {
            let mut avatar = String::new();
            avatar.extend(first.chars().next());
            avatar.extend(second.chars().next());
            avatar.to_uppercase()
        }
    }
}

/// Scans the client collection for duplicates of the candidate.
///
/// Fails with [`IdentityError::MissingInput`] when both inputs are empty or
/// absent. Otherwise performs, in order:
///
/// 1. a phone pass — the first client whose normalized phone equals the
///    candidate's, if a phone was supplied;
/// 2. a name pass — the first client whose normalized name equals the
///    candidate's, if a name was supplied, suppressed when it is the client
///    already reported by the phone pass.
///
/// The collection must be in its stable fetch order; first match wins.
///
/// # Example
///
/// ```no_run
/// use glowdesk_shared::identity::{find_duplicates, DuplicateKind};
/// # use glowdesk_shared::models::client::ClientWithAccount;
///
/// # fn example(clients: &[ClientWithAccount]) {
/// let matches = find_duplicates(Some("jane doe"), Some("555-12345"), clients).unwrap();
/// for m in &matches {
///     println!("{}: {}", m.match_type.as_str(), m.client.name);
/// }
/// # }
/// ```
pub fn find_duplicates(
    name: Option<&str>,
    phone: Option<&str>,
    clients: &[ClientWithAccount],
) -> Result<Vec<DuplicateMatch>, IdentityError> {
    let phone_key = phone.map(normalize_phone).filter(|k| !k.is_empty());
    let name_key = name.map(normalize_name).filter(|k| !k.is_empty());

    if phone_key.is_none() && name_key.is_none() {
        return Err(IdentityError::MissingInput);
    }

    let mut matches = Vec::new();

    let phone_match = phone_key.as_ref().and_then(|key| {
        clients
            .iter()
            .find(|c| c.phone.as_deref().is_some_and(|p| normalize_phone(p) == *key))
    });

    if let Some(client) = phone_match {
        matches.push(DuplicateMatch {
            match_type: DuplicateKind::Phone,
            client: client.clone(),
        });
    }

    if let Some(key) = name_key.as_ref() {
        let name_match = clients.iter().find(|c| normalize_name(&c.name) == *key);

        if let Some(client) = name_match {
            // A client matching both keys is reported once, tagged "phone"
            let already_reported = phone_match.is_some_and(|p| p.id == client.id);

            if !already_reported {
                matches.push(DuplicateMatch {
                    match_type: DuplicateKind::Name,
                    client: client.clone(),
                });
            }
        }
    }

    Ok(matches)
}

/// Picks the duplicate that blocks a create, with phone matches taking
/// priority over name matches when both would hit different existing clients.
pub fn blocking_duplicate(matches: &[DuplicateMatch]) -> Option<&DuplicateMatch> {
    matches
        .iter()
        .find(|m| m.match_type == DuplicateKind::Phone)
        .or_else(|| matches.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn client(name: &str, phone: Option<&str>) -> ClientWithAccount {
        ClientWithAccount {
            id: Uuid::new_v4(),
            name: name.to_string(),
            phone: phone.map(str::to_string),
            email: None,
            preferred_location_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_normalize_phone_strips_non_digits() {
        assert_eq!(normalize_phone("+974 3071 2345"), "97430712345");
        assert_eq!(normalize_phone("3071-2345"), "30712345");
        assert_eq!(normalize_phone("(555) 123.4567"), "5551234567");
        assert_eq!(normalize_phone(""), "");
    }

    #[test]
    fn test_normalize_phone_idempotent() {
        let inputs = ["+974 3071 2345", "30712345", "", "abc", "555-12345"];
        for input in inputs {
            let once = normalize_phone(input);
            assert_eq!(normalize_phone(&once), once);
        }
    }

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  Jane Doe  "), "jane doe");
        assert_eq!(normalize_name("AMINA K."), "amina k.");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_missing_input_is_an_error() {
        assert!(matches!(
            find_duplicates(None, None, &[]),
            Err(IdentityError::MissingInput)
        ));
        assert!(matches!(
            find_duplicates(Some(""), Some(""), &[]),
            Err(IdentityError::MissingInput)
        ));
        // Whitespace-only name and punctuation-only phone normalize to empty
        assert!(matches!(
            find_duplicates(Some("   "), Some("+-() "), &[]),
            Err(IdentityError::MissingInput)
        ));
    }

    #[test]
    fn test_name_only_match() {
        let clients = vec![client("Jane Doe", Some("55512345"))];

        let matches = find_duplicates(Some("jane doe"), None, &clients).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_type, DuplicateKind::Name);
        assert_eq!(matches[0].client.name, "Jane Doe");
    }

    #[test]
    fn test_phone_only_match_ignores_punctuation() {
        let clients = vec![client("Jane Doe", Some("55512345"))];

        let matches = find_duplicates(None, Some("555-12345"), &clients).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_type, DuplicateKind::Phone);
    }

    #[test]
    fn test_same_client_on_both_keys_reported_once_as_phone() {
        let clients = vec![client("Jane Doe", Some("55512345"))];

        let matches = find_duplicates(Some("jane doe"), Some("555-12345"), &clients).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_type, DuplicateKind::Phone);
    }

    #[test]
    fn test_different_clients_on_each_key_are_both_reported() {
        let clients = vec![
            client("Jane Doe", Some("11112222")),
            client("Mary Poppins", Some("55512345")),
        ];

        let matches = find_duplicates(Some("jane doe"), Some("55512345"), &clients).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].match_type, DuplicateKind::Phone);
        assert_eq!(matches[0].client.name, "Mary Poppins");
        assert_eq!(matches[1].match_type, DuplicateKind::Name);
        assert_eq!(matches[1].client.name, "Jane Doe");
    }

    #[test]
    fn test_first_occurrence_wins() {
        let first = client("Jane Doe", Some("99990000"));
        let second = client("Jane Doe", Some("88880000"));
        let first_id = first.id;
        let clients = vec![first, second];

        let matches = find_duplicates(Some("Jane Doe"), None, &clients).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].client.id, first_id);
    }

    #[test]
    fn test_clients_without_phone_are_skipped_by_phone_pass() {
        let clients = vec![client("Jane Doe", None)];

        let matches = find_duplicates(None, Some("55512345"), &clients).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_blocking_duplicate_prefers_phone() {
        let clients = vec![
            client("Jane Doe", Some("11112222")),
            client("Mary Poppins", Some("55512345")),
        ];

        let matches = find_duplicates(Some("jane doe"), Some("55512345"), &clients).unwrap();
        let blocking = blocking_duplicate(&matches).unwrap();
        assert_eq!(blocking.match_type, DuplicateKind::Phone);
        assert_eq!(blocking.client.name, "Mary Poppins");
    }

    #[test]
    fn test_initials_avatar() {
        assert_eq!(initials_avatar("Jane Doe"), "JD");
        assert_eq!(initials_avatar("Amina K."), "AK");
        assert_eq!(initials_avatar("Cher"), "CH");
        assert_eq!(initials_avatar("a"), "A");
        assert_eq!(initials_avatar(""), "");
        assert_eq!(initials_avatar("Mary Jane Watson"), "MJ");
    }
}
