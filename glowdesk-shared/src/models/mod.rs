/// Database models for GlowDesk
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `account`: Login accounts backing clients and staff
/// - `client`: Client profiles and composed client views
/// - `loyalty`: Loyalty-program accounts (points, tier, active flag)
/// - `location`: Physical salon locations and the virtual location tags
/// - `staff`: Staff members and their assigned-location sets
/// - `appointment`: Bookings tied to a client, staff member, and location
/// - `transaction`: Sales records; only completed rows count toward spend
///
/// # Example
///
/// ```no_run
/// use glowdesk_shared::models::client::Client;
/// use glowdesk_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// let clients = Client::list_with_accounts(&pool).await?;
/// # Ok(())
/// # }
/// ```

pub mod account;
pub mod appointment;
pub mod client;
pub mod location;
pub mod loyalty;
pub mod staff;
pub mod transaction;
