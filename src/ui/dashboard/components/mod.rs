//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod alert;
pub mod chart_panel;
pub mod controls;
pub mod footer;
pub mod header;
pub mod logs;
pub mod readings;
pub mod sidebar_panel;
pub mod table;
