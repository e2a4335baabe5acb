// src/services/mod.rs
pub mod provider;
pub mod rate_limiter;
pub mod usage;
pub mod validation;
