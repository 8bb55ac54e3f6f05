/// Role/location access scoping
///
/// This module decides which locations, staff, and appointments a principal
/// may see, and gates dashboard navigation. All checks take the principal as
/// an explicit parameter; there is no ambient session lookup inside the core
/// logic.
///
/// # Modules
///
/// - [`principal`]: the closed role set and the authenticated principal
/// - [`scope`]: per-item location access and collection filters
/// - [`route_guard`]: one-shot navigation redirect decisions
///
/// # Example
///
/// ```
/// use glowdesk_shared::access::{has_location_access, Principal, Role};
/// use uuid::Uuid;
///
/// let admin = Principal::new(Uuid::new_v4(), Role::Admin, vec![]);
/// assert!(has_location_access(Some(&admin), "home"));
///
/// // Unauthenticated callers fall back to public read
/// assert!(has_location_access(None, "downtown"));
/// ```

pub mod principal;
pub mod route_guard;
pub mod scope;

pub use principal::{Principal, Role, ALL_LOCATIONS};
pub use route_guard::RouteGuard;
pub use scope::{
    filter_appointments, filter_locations, filter_staff, has_location_access, LocationScoped,
};
