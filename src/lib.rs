pub mod app;
pub mod bucketizer;
pub mod client;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod labels;
pub mod models;
pub mod period;
pub mod shortcode;
pub mod state;
pub mod ui;

pub use app::router;
pub use bucketizer::{bucketize, windows, ClickEvent, Window};
pub use config::{Config, TimeZonePolicy};
pub use labels::LabelFormatter;
pub use period::Period;
pub use state::AppState;
