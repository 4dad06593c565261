//! # aja-core
//!
//! Core types and pure data-shaping logic for the AJALabs analytics client.
//!
//! This crate provides the foundational types shared across all `aja-*` crates:
//! - Entity structs for sessions, users, files, report history, table pages,
//!   dashboards and filters
//! - Status enums with state machine transitions
//! - The static insight catalog and its required source files
//! - Page-number windowing, CSV export, KPI formatting and chart shaping
//! - Cross-cutting error types

pub mod catalog;
pub mod chart;
pub mod csv_export;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod kpi;
pub mod pagination;
