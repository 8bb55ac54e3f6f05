/// Location access checks and collection filters
///
/// These functions operate purely over in-memory collections already fetched
/// by the list endpoints; they never query the store themselves.
///
/// Access rules, in evaluation order:
///
/// 1. No principal → allowed (public-read fallback)
/// 2. Admin → allowed
/// 3. The online storefront id → sales only (admin handled above)
/// 4. The home-service id → denied (admin handled above)
/// 5. The "all" sentinel → allowed for any physical id
/// 6. Literal membership in the assigned set
///
/// Sales principals are additionally narrowed by the collection filters to
/// online-only items — a strictly tighter rule than their nominal access.
/// `filter_staff` intersects assigned sets and deliberately does not
/// special-case the virtual ids.

use crate::models::appointment::Appointment;
use crate::models::location::{Location, HOME_SERVICE, ONLINE_STORE};
use crate::models::staff::StaffWithLocations;

use super::principal::{Principal, Role};

/// Anything addressable by a location id
pub trait LocationScoped {
    /// The location this item belongs to
    fn location_id(&self) -> &str;
}

impl LocationScoped for Location {
    fn location_id(&self) -> &str {
        &self.id
    }
}

impl LocationScoped for Appointment {
    fn location_id(&self) -> &str {
        &self.location_id
    }
}

/// Decides whether a principal may see a location id.
///
/// # Example
///
/// ```
/// use glowdesk_shared::access::{has_location_access, Principal, Role};
/// use uuid::Uuid;
///
/// let sales = Principal::new(Uuid::new_v4(), Role::Sales, vec![]);
/// assert!(has_location_access(Some(&sales), "online"));
/// assert!(!has_location_access(Some(&sales), "home"));
/// assert!(!has_location_access(Some(&sales), "downtown"));
/// ```
pub fn has_location_access(principal: Option<&Principal>, location_id: &str) -> bool {
    let Some(principal) = principal else {
        // Public-read fallback for unauthenticated callers
        return true;
    };

    if principal.role == Role::Admin {
        return true;
    }

    // The virtual ids follow their own rules, ahead of the "all" sentinel
    match location_id {
        ONLINE_STORE => principal.role == Role::Sales,
        HOME_SERVICE => false,
        _ => principal.has_all_locations() || principal.is_assigned(location_id),
    }
}

fn filter_scoped<T: LocationScoped>(principal: Option<&Principal>, items: Vec<T>) -> Vec<T> {
    match principal {
        // Sales see only the online storefront, even with nominal "all" access
        Some(p) if p.role == Role::Sales => items
            .into_iter()
            .filter(|item| item.location_id() == ONLINE_STORE)
            .collect(),
        _ => items
            .into_iter()
            .filter(|item| has_location_access(principal, item.location_id()))
            .collect(),
    }
}

/// Filters a location list down to what the principal may see.
pub fn filter_locations(principal: Option<&Principal>, locations: Vec<Location>) -> Vec<Location> {
    filter_scoped(principal, locations)
}

/// Filters an appointment list down to what the principal may see.
pub fn filter_appointments(
    principal: Option<&Principal>,
    appointments: Vec<Appointment>,
) -> Vec<Appointment> {
    filter_scoped(principal, appointments)
}

/// Filters a staff list down to what the principal may see.
///
/// Admin and "all"-access principals see everyone; all others see staff whose
/// assigned-location set intersects their own. Unlike the other filters,
/// the virtual ids get no special treatment here.
pub fn filter_staff(
    principal: Option<&Principal>,
    staff: Vec<StaffWithLocations>,
) -> Vec<StaffWithLocations> {
    match principal {
        None => staff,
        Some(p) if p.role == Role::Admin || p.has_all_locations() => staff,
        Some(p) => staff
            .into_iter()
            .filter(|member| member.location_ids.iter().any(|lid| p.is_assigned(lid)))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn principal(role: Role, locations: &[&str]) -> Principal {
        Principal::new(
            Uuid::new_v4(),
            role,
            locations.iter().map(|s| s.to_string()).collect(),
        )
    }

    fn location(id: &str) -> Location {
        Location {
            id: id.to_string(),
            name: id.to_string(),
            address: None,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_unauthenticated_sees_everything() {
        assert!(has_location_access(None, "downtown"));
        assert!(has_location_access(None, ONLINE_STORE));
        assert!(has_location_access(None, HOME_SERVICE));
    }

    #[test]
    fn test_admin_sees_everything_including_virtual() {
        let admin = principal(Role::Admin, &[]);
        assert!(has_location_access(Some(&admin), "downtown"));
        assert!(has_location_access(Some(&admin), ONLINE_STORE));
        assert!(has_location_access(Some(&admin), HOME_SERVICE));
    }

    #[test]
    fn test_online_is_sales_and_admin_only() {
        assert!(has_location_access(
            Some(&principal(Role::Sales, &[])),
            ONLINE_STORE
        ));
        assert!(!has_location_access(
            Some(&principal(Role::Manager, &["all"])),
            ONLINE_STORE
        ));
        assert!(!has_location_access(
            Some(&principal(Role::Staff, &["all"])),
            ONLINE_STORE
        ));
    }

    #[test]
    fn test_home_is_admin_only() {
        assert!(!has_location_access(
            Some(&principal(Role::Sales, &["all"])),
            HOME_SERVICE
        ));
        assert!(!has_location_access(
            Some(&principal(Role::Manager, &["all"])),
            HOME_SERVICE
        ));
    }

    #[test]
    fn test_all_sentinel_covers_physical_ids() {
        let p = principal(Role::Staff, &["all"]);
        assert!(has_location_access(Some(&p), "downtown"));
        assert!(has_location_access(Some(&p), "westbay"));
    }

    #[test]
    fn test_membership_check() {
        let p = principal(Role::Staff, &["downtown"]);
        assert!(has_location_access(Some(&p), "downtown"));
        assert!(!has_location_access(Some(&p), "westbay"));
    }

    #[test]
    fn test_sales_collection_filter_is_online_only() {
        let sales = principal(Role::Sales, &["all"]);
        let locations = vec![location("downtown"), location(ONLINE_STORE), location("westbay")];

        let visible = filter_locations(Some(&sales), locations);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, ONLINE_STORE);
    }

    #[test]
    fn test_staff_filter_intersects_assignments() {
        let manager = principal(Role::Manager, &["downtown"]);

        let staff = vec![
            StaffWithLocations {
                id: Uuid::new_v4(),
                name: "Noor".to_string(),
                title: None,
                phone: None,
                active: true,
                location_ids: vec!["downtown".to_string(), "westbay".to_string()],
                created_at: Utc::now(),
            },
            StaffWithLocations {
                id: Uuid::new_v4(),
                name: "Layla".to_string(),
                title: None,
                phone: None,
                active: true,
                location_ids: vec!["westbay".to_string()],
                created_at: Utc::now(),
            },
        ];

        let visible = filter_staff(Some(&manager), staff);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Noor");
    }
}
