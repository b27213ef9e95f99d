// driver/mod.rs
// Volume driver core: namespace translation, lifecycle operations, engine boundary

mod engine;
mod error;
mod namespace;
mod volumes;

#[cfg(test)]
pub mod testutil;

pub use engine::{DatasetEngine, ZettaEngine};
pub use error::DriverError;
pub use namespace::Namespace;
pub use volumes::{VolumeInfo, ZfsDriver};
