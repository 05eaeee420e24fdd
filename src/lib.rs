pub mod about;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;

pub use assay_engine as engine;
pub use assay_protocol as protocol;
pub use assay_render as render;
