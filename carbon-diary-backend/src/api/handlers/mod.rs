// src/api/handlers/mod.rs
pub mod usage_summary_handler;
