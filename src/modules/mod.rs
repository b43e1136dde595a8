pub mod auth;
pub mod multimedia;
