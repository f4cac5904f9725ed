mod app;
mod cli;
mod render;

pub use app::run;
pub use cli::*;
pub use render::render;
