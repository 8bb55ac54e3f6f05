/// Authentication utilities
///
/// This module provides the authentication primitives for GlowDesk:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and the default walk-in credential
/// - [`jwt`]: JWT token generation and validation; claims carry the principal
/// - [`middleware`]: bearer extraction and claims-to-principal conversion
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: verification uses constant-time operations

pub mod jwt;
pub mod middleware;
pub mod password;
