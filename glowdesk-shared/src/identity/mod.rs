/// Client identity resolution
///
/// Duplicate clients are the single biggest data-quality problem at the
/// reception desk: the same person shows up as "Jane Doe / +974 3071 2345"
/// and "jane doe / 30712345" depending on who typed them in. This module
/// owns the normalized comparison keys and the duplicate scan that every
/// client-creation path must run.
///
/// # Modules
///
/// - [`resolver`]: normalization, the duplicate scan, and avatar derivation

pub mod resolver;

pub use resolver::{
    blocking_duplicate, find_duplicates, initials_avatar, normalize_name, normalize_phone,
    DuplicateKind, DuplicateMatch, IdentityError,
};
