pub mod domain;
pub mod library;
pub mod media_use_cases;
pub mod ports;
