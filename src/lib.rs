pub mod config;
pub mod demo_feed;
pub mod expected_points;
pub mod feed;
pub mod fixture_difficulty;
pub mod fpl_fetch;
pub mod http_cache;
pub mod http_client;
pub mod model;
pub mod squad_export;
pub mod state;
pub mod transfer_eval;
