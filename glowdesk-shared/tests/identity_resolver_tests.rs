/// Identity resolver behavior tests
///
/// These pin the normalization keys and the duplicate-scan semantics the
/// create-client flow depends on: first occurrence wins, phone outranks
/// name, and a client matching both keys is reported once.

use chrono::Utc;
use uuid::Uuid;

use glowdesk_shared::identity::{
    blocking_duplicate, find_duplicates, initials_avatar, normalize_phone, DuplicateKind,
    IdentityError,
};
use glowdesk_shared::models::client::ClientWithAccount;

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
fn phone_formats_differing_only_in_punctuation_compare_equal() {
    let variants = ["+974 3071 2345", "97430712345", "3071-2345"];

    assert_eq!(normalize_phone(variants[0]), normalize_phone(variants[1]));
    // The third drops the country code, so its projection differs
    assert_ne!(normalize_phone(variants[0]), normalize_phone(variants[2]));

    let clients = vec![client("Jane Doe", Some("+974 3071 2345"))];
    let matches = find_duplicates(None, Some("974-3071-2345"), &clients).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, DuplicateKind::Phone);
}

#[test]
fn empty_candidate_is_a_validation_error() {
    let clients = vec![client("Jane Doe", Some("55512345"))];

    assert!(matches!(
        find_duplicates(Some(""), Some(""), &clients),
        Err(IdentityError::MissingInput)
    ));
}

#[test]
fn name_and_phone_scans_report_the_expected_kinds() {
    let clients = vec![client("Jane Doe", Some("55512345"))];

    let by_name = find_duplicates(Some("jane doe"), None, &clients).unwrap();
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].match_type, DuplicateKind::Name);

    let by_phone = find_duplicates(None, Some("555-12345"), &clients).unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].match_type, DuplicateKind::Phone);

    // Both keys hitting the same client collapse to a single phone match
    let both = find_duplicates(Some("jane doe"), Some("555-12345"), &clients).unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].match_type, DuplicateKind::Phone);
}

#[test]
fn create_blocking_match_is_phone_regardless_of_name() {
    // Candidate name matches nobody, phone matches an existing client
    let clients = vec![client("Jane Doe", Some("55512345"))];

    let matches = find_duplicates(Some("Completely Different"), Some("55512345"), &clients).unwrap();
    let blocking = blocking_duplicate(&matches).unwrap();
    assert_eq!(blocking.match_type, DuplicateKind::Phone);
}

#[test]
fn name_match_with_different_phone_blocks_as_name() {
    // Mirrors the walk-in scenario: same name, phone differs after
    // normalization, so the name pass is what blocks the create.
    let clients = vec![client("Amina K.", Some("+974 5551234"))];

    let matches = find_duplicates(Some("Amina K."), Some("55512340"), &clients).unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_type, DuplicateKind::Name);

    let blocking = blocking_duplicate(&matches).unwrap();
    assert_eq!(blocking.match_type, DuplicateKind::Name);
    assert_eq!(blocking.match_type.as_str(), "name");
}

#[test]
fn scan_order_is_first_occurrence_not_best_match() {
    let older = client("Jane Doe", Some("10000000"));
    let newer = client("Jane Doe", Some("20000000"));
    let older_id = older.id;

    let clients = vec![older, newer];
    let matches = find_duplicates(Some("JANE DOE"), None, &clients).unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].client.id, older_id);
}

#[test]
fn avatar_derivation_rules() {
    assert_eq!(initials_avatar("Amina K."), "AK");
    assert_eq!(initials_avatar("Jane Doe"), "JD");
    // Single-token names take their first two characters
    assert_eq!(initials_avatar("Cher"), "CH");
    // Extra tokens beyond the first two are ignored
    assert_eq!(initials_avatar("Mary Jane Watson"), "MJ");
}
