pub mod app;
pub mod event;
pub mod widgets;

pub use app::App;
pub use event::{AppEvent, EventHandler};
