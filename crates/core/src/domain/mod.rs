//! Domain entities and business rules

pub mod channel;
pub mod config;
pub mod element;
pub mod registry;
pub mod scale;

#[cfg(test)]
pub(crate) mod testing;

// Re-export specific items to avoid ambiguous glob imports
pub use channel::ChannelVolume;
pub use config::{AppConfig, BackendKind, ConfigError};
pub use element::{
    ControlRange, MixerBackend, MixerDevice, MixerElement, MixerError, Result, Side,
};
pub use registry::MixerRegistry;
pub use scale::ScaleController;
