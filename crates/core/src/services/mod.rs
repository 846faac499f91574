pub mod asset_service;
pub mod bank_service;
pub mod fast_track_service;
pub mod metrics_service;
