pub mod csv_loader;
pub mod in_memory_spreadsheet;
pub mod sheets;
