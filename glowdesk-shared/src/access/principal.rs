/// Roles and the authenticated principal
///
/// Role strings arrive from the session provider in arbitrary case; they are
/// parsed once at the boundary into the closed role set. Unrecognized roles
/// map to the least-privileged default.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Sentinel location id granting access to every physical location.
///
/// The two virtual ids ("online", "home") follow their own rules and are not
/// covered by the sentinel.
pub const ALL_LOCATIONS: &str = "all";

/// Closed role vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full visibility over every location, physical and virtual
    Admin,

    /// Location-scoped management
    Manager,

    /// Location-scoped service staff
    Staff,

    /// Online storefront sales; collection filters narrow them to online-only
    Sales,

    /// Least-privileged default; also the fallback for unrecognized roles
    Client,
}

impl Role {
    /// Parses a role tag case-insensitively.
    ///
    /// Unrecognized input behaves like the least-privileged default
    /// (non-admin, non-sales).
    pub fn parse(role: &str) -> Self {
        match role.trim().to_lowercase().as_str() {
            "admin" => Role::Admin,
            "manager" => Role::Manager,
            "staff" => Role::Staff,
            "sales" => Role::Sales,
            _ => Role::Client,
        }
    }

    /// Converts role to its canonical string tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::Staff => "staff",
            Role::Sales => "sales",
            Role::Client => "client",
        }
    }
}

/// The authenticated actor making a request
///
/// Produced by the session layer from validated token claims and threaded
/// explicitly into every filter and guard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    /// Account ID
    pub id: Uuid,

    /// Parsed role
    pub role: Role,

    /// Assigned location identifiers; may contain the "all" sentinel
    pub locations: Vec<String>,

    /// Account email, when known
    pub email: Option<String>,
}

impl Principal {
    /// Creates a principal with no email.
    pub fn new(id: Uuid, role: Role, locations: Vec<String>) -> Self {
        Self {
            id,
            role,
            locations,
            email: None,
        }
    }

    /// True when the assigned set contains the "all" sentinel.
    pub fn has_all_locations(&self) -> bool {
        self.locations.iter().any(|l| l == ALL_LOCATIONS)
    }

    /// True when the assigned set literally contains the id.
    pub fn is_assigned(&self, location_id: &str) -> bool {
        self.locations.iter().any(|l| l == location_id)
    }
}
