//! Plumbing shared by the Supabase-backed adapters: endpoint configuration,
//! the in-process session store and HTTP failure decoding.

mod api_failure;
mod session_store;
mod supabase_config;

pub use api_failure::{extract_message, send_json, send_unit, ApiFailure};
pub use session_store::SessionStore;
pub use supabase_config::SupabaseConfig;
