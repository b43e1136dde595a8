pub mod admin_policy;
