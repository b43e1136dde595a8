pub mod get_session;
pub mod login_admin;
pub mod logout_admin;

pub use get_session::get_admin_session_handler;
pub use login_admin::{login_admin_handler, AdminLoginDto, AdminLoginResponse};
pub use logout_admin::{logout_admin_handler, LogoutAdminResponse};
