pub mod audio;
pub mod commands;
pub mod config;
pub mod logging;
pub mod screen;
pub mod state;
pub mod utils;

pub use audio::BellAudioService;
pub use config::UiConfig;
pub use screen::CalculatorScreen;
