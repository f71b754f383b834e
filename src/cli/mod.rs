pub mod app;
pub mod interaction;
pub mod output;
pub mod session;

pub use app::run_cli;
