//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod chat;
pub mod footer;
pub mod header;
pub mod logs;
pub mod results;
pub mod sidebar;
pub mod tabs;
