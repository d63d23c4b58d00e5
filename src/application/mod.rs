pub mod reconciler;
pub mod sync_service;
