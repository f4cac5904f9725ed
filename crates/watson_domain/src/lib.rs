mod assistant;
mod classifier;
mod error;
mod fields;
mod generic;
mod message_input;
mod text_to_speech;
mod visual_recognition;

pub use assistant::*;
pub use classifier::*;
pub use error::*;
pub use fields::*;
pub use generic::*;
pub use message_input::*;
pub use text_to_speech::*;
pub use visual_recognition::*;
