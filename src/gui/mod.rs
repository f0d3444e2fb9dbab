pub mod app;
pub mod chart;
pub mod controls;
pub mod theme;
pub mod top_bar;

pub use app::MyoSimApp;
