pub mod status_bar;
pub mod strip;

pub use status_bar::StatusBarWidget;
pub use strip::StripWidget;
