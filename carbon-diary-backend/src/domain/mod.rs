// src/domain/mod.rs
pub mod usage_summary_model;
