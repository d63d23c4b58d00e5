pub mod header_action;
pub mod sheets;
pub mod sync_mode;
pub mod sync_report;
pub mod table;
