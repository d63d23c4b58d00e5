pub mod auth;
pub mod http_client;
pub mod sheet_tab;
pub mod spreadsheet_manager;
pub mod value_range_factory;
