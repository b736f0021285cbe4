pub mod config;
pub mod engine;
pub mod error;
pub mod scene;
pub mod source;

pub use config::{AppConfig, StripConfig, UiConfig};
pub use engine::{DrawCommand, ScrollEngine, TickFrame};
pub use error::{Error, Result};
pub use scene::{ImageList, Scene, SceneBuilder};
pub use source::{load_sources, scale_to_height, FsImageSource, ImageSource, StripImage};
