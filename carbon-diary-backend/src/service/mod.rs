// src/service/mod.rs
pub mod usage_summary_service;
