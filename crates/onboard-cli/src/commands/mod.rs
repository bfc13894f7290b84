pub mod config;
pub mod frame;
pub mod measure;
pub mod presets;
pub mod preview;
