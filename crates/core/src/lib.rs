//! Core business logic for the back office.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `inventory` - Batch tracking and FIFO stock consumption planning
//! - `journal` - Double-entry journal lines and balance validation
//! - `depreciation` - Straight-line schedules and posting aggregation
//! - `settings` - Finance settings preconditions for transaction flows

pub mod depreciation;
pub mod inventory;
pub mod journal;
pub mod settings;
