//! Request middleware for the admin.

pub mod auth;
pub mod session;

pub use auth::RequireAdminAuth;
pub use session::create_session_layer;
