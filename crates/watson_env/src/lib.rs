mod auth_type;
mod http_config;
mod service_config;

pub use auth_type::*;
pub use http_config::*;
pub use service_config::*;
