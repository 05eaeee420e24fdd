//! Machine-readable request and response contracts for the assay planner.

pub mod capabilities;
pub mod error;
pub mod payload;
pub mod requests;

pub use capabilities::{Capabilities, PROTOCOL_VERSION, capabilities};
pub use error::ProtocolError;
pub use requests::{
    ErrorResponse, HealthResponse, PlateMapResponse, dilutions, plate_map, reagent_b,
};
