mod assistant;
mod auth;
mod base;
mod classifier;
mod error;
mod request;
mod text_to_speech;
mod visual_recognition;

pub use assistant::*;
pub use auth::*;
pub use base::*;
pub use classifier::*;
pub use error::*;
pub use request::*;
pub use text_to_speech::*;
pub use visual_recognition::*;
