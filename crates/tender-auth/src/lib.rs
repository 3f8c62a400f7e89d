//! # tender-auth
//!
//! Authentication for the operator console.
//!
//! ## Modules
//!
//! - `provider`: the identity provider collaborator (Identity Toolkit REST or in-memory)
//! - `policy`: allow-list checks layered on top of the provider
//! - `password`: Argon2id hashing and sign-up password rules
//! - `jwt`: session token encoding and validation
//! - `session`: the session manager and its live session table

pub mod identity;
pub mod jwt;
pub mod password;
pub mod policy;
pub mod provider;
pub mod session;

pub use identity::{Identity, SignInMethod};
pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
pub use policy::AccessPolicy;
pub use provider::{IdentityProvider, build_provider};
pub use session::{Session, SessionCleanup, SessionManager, SessionStore, SignInResult};
