pub mod config;
pub mod discovery;
pub mod label;
pub mod region;

pub use config::{AppConfig, DiscoverySchedule, RevealCadence};
pub use label::{LabelLines, split_display_name};
pub use region::{RegionConfig, RegionRegistry};
