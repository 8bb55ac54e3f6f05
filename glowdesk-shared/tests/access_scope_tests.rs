/// Access scope filter behavior tests
///
/// These pin the role/location visibility rules, including the deliberate
/// asymmetry of the staff filter and the sales-only collection narrowing.

use chrono::Utc;
use uuid::Uuid;

use glowdesk_shared::access::{
    filter_appointments, filter_locations, filter_staff, has_location_access, Principal, Role,
    RouteGuard,
};
use glowdesk_shared::models::appointment::{Appointment, AppointmentStatus};
use glowdesk_shared::models::location::{Location, HOME_SERVICE, ONLINE_STORE};
use glowdesk_shared::models::staff::StaffWithLocations;

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
        name: format!("GlowDesk {}", id),
        address: None,
        active: true,
        created_at: Utc::now(),
    }
}

fn appointment(location_id: &str) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        client_id: Uuid::new_v4(),
        staff_id: None,
        location_id: location_id.to_string(),
        service: "Classic Facial".to_string(),
        scheduled_at: now,
        status: AppointmentStatus::Scheduled,
        created_at: now,
        updated_at: now,
    }
}

fn staff_member(name: &str, locations: &[&str]) -> StaffWithLocations {
    StaffWithLocations {
        id: Uuid::new_v4(),
        name: name.to_string(),
        title: None,
        phone: None,
        active: true,
        location_ids: locations.iter().map(|s| s.to_string()).collect(),
        created_at: Utc::now(),
    }
}

#[test]
fn admin_has_access_to_every_location_id() {
    let admin = principal(Role::Admin, &[]);

    for id in ["downtown", "westbay", ONLINE_STORE, HOME_SERVICE, "anything"] {
        assert!(has_location_access(Some(&admin), id), "admin denied {}", id);
    }
}

#[test]
fn online_store_is_sales_accessible_but_all_sentinel_is_not_enough() {
    let sales = principal(Role::Sales, &[]);
    assert!(has_location_access(Some(&sales), ONLINE_STORE));

    // "all" grants physical-wide access, not the virtual ids
    let staff_all = principal(Role::Staff, &["all"]);
    assert!(!has_location_access(Some(&staff_all), ONLINE_STORE));
    assert!(!has_location_access(Some(&staff_all), HOME_SERVICE));
    assert!(has_location_access(Some(&staff_all), "downtown"));
}

#[test]
fn sales_collection_filters_are_online_only_despite_nominal_access() {
    let sales = principal(Role::Sales, &["all"]);

    // Nominal access to online holds
    assert!(has_location_access(Some(&sales), ONLINE_STORE));

    let locations = vec![location("downtown"), location(ONLINE_STORE), location("westbay")];
    let visible = filter_locations(Some(&sales), locations);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, ONLINE_STORE);

    let appointments = vec![
        appointment("downtown"),
        appointment(ONLINE_STORE),
        appointment(ONLINE_STORE),
    ];
    let visible = filter_appointments(Some(&sales), appointments);
    assert_eq!(visible.len(), 2);
    assert!(visible.iter().all(|a| a.location_id == ONLINE_STORE));
}

#[test]
fn unauthenticated_filters_pass_everything_through() {
    let locations = vec![location("downtown"), location(ONLINE_STORE)];
    assert_eq!(filter_locations(None, locations).len(), 2);

    let staff = vec![staff_member("Noor", &["downtown"])];
    assert_eq!(filter_staff(None, staff).len(), 1);
}

#[test]
fn staff_filter_intersects_assigned_sets() {
    let manager = principal(Role::Manager, &["downtown", "pearl"]);

    let staff = vec![
        staff_member("Noor", &["downtown"]),
        staff_member("Layla", &["westbay"]),
        staff_member("Fatima", &["pearl", "westbay"]),
    ];

    let visible = filter_staff(Some(&manager), staff);
    let names: Vec<&str> = visible.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Noor", "Fatima"]);
}

#[test]
fn staff_filter_ignores_virtual_location_ids() {
    // Unlike every other filter, staff filtering has no special case for the
    // virtual ids: a sales principal assigned "online" sees exactly the staff
    // whose assigned set contains "online" literally, and nothing else.
    let sales = principal(Role::Sales, &[ONLINE_STORE]);

    let staff = vec![
        staff_member("Noor", &["downtown"]),
        staff_member("Web Team", &[ONLINE_STORE]),
    ];

    let visible = filter_staff(Some(&sales), staff);
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].name, "Web Team");

    // And an admin still sees everyone
    let staff = vec![
        staff_member("Noor", &["downtown"]),
        staff_member("Web Team", &[ONLINE_STORE]),
    ];
    assert_eq!(filter_staff(Some(&principal(Role::Admin, &[])), staff).len(), 2);
}

#[test]
fn route_guard_redirects_sales_to_pos() {
    let mut guard = RouteGuard::default();

    // Role tags arrive in arbitrary case; parsing happens at the boundary
    let sales = Principal::new(Uuid::new_v4(), Role::parse("SaLeS"), vec![]);

    assert_eq!(
        guard.evaluate(Some(&sales), "/dashboard/reports"),
        Some("/dashboard/pos")
    );
}

#[test]
fn route_guard_allows_descendants_of_allowed_paths() {
    let mut guard = RouteGuard::default();
    let sales = principal(Role::Sales, &[]);

    assert_eq!(guard.evaluate(Some(&sales), "/dashboard/pos/history"), None);
    assert_eq!(guard.evaluate(Some(&sales), "/dashboard/pos"), None);
}

#[test]
fn route_guard_waits_for_authentication() {
    let mut guard = RouteGuard::default();

    // No principal yet: no redirect decision
    assert_eq!(guard.evaluate(None, "/dashboard/reports"), None);

    // Once the principal resolves, the same path redirects
    let sales = principal(Role::Sales, &[]);
    assert_eq!(
        guard.evaluate(Some(&sales), "/dashboard/reports"),
        Some("/dashboard/pos")
    );

    // And only once
    assert_eq!(guard.evaluate(Some(&sales), "/dashboard/reports"), None);
}
