//! Request plumbing shared by the routes.

pub mod auth;
pub mod origin;
