// src/api/dto/mod.rs
pub mod usage_summary_dto;
