/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint
/// - `auth`: Authentication endpoints (login, refresh)
/// - `clients`: Client listing, creation, and duplicate checking
/// - `locations`: Location listing (scope-filtered)
/// - `staff`: Staff listing and creation (scope-filtered)
/// - `appointments`: Appointment listing (scope-filtered)
/// - `transactions`: Transaction recording

pub mod appointments;
pub mod auth;
pub mod clients;
pub mod health;
pub mod locations;
pub mod staff;
pub mod transactions;
