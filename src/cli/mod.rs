pub mod args;
pub mod cli_adapter;
pub mod sync_service_factory;
