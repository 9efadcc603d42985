//! Hardware mixer element abstractions
//!
//! This module defines the seam between the volume model and the actual
//! mixer hardware. Backend implementations (ALSA, the scriptable fake) live
//! in the `fader-infra` crate; the unit tests here use local stubs.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur in the hardware mixer layer
#[derive(Debug, Error)]
pub enum MixerError {
    /// Requested sound card was not found or could not be opened
    #[error("Card not found: {0}")]
    CardNotFound(String),

    /// A mixer element rejected an operation or disappeared
    #[error("Element error: {0}")]
    ElementError(String),

    /// Input/Output error at the OS level
    #[error("OS error: {0}")]
    OsError(String),

    /// No usable hardware backend is compiled in or reachable
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
}

pub type Result<T> = std::result::Result<T, MixerError>;

/// Physical side of a mixer element a control is bound to.
///
/// Stereo elements expose `Left` and `Right`; single-control elements are
/// addressed through `Mono`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
    Mono,
}

/// Capability range reported by an element for one native scale
/// (decibel or raw linear units).
///
/// A range is usable only when `max > min`; anything else means the
/// element could not be queried or offers a degenerate control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRange {
    pub min: i64,
    pub max: i64,
}

impl ControlRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub fn is_usable(&self) -> bool {
        self.max > self.min
    }

    pub fn span(&self) -> i64 {
        self.max - self.min
    }
}

/// One hardware mixer element with playback volume.
///
/// Decibel values are integer millibels (1/100 dB), matching what ALSA
/// reports; raw values are whatever linear unit the element natively uses.
/// All calls are synchronous and blocking.
pub trait MixerElement: Send + Sync {
    /// Hardware-reported element name (e.g. "Speaker")
    fn name(&self) -> &str;

    /// Whether the element has a playback control for the given side
    fn has_playback_side(&self, side: Side) -> bool;

    /// Decibel capability range, in millibels
    fn playback_db_range(&self) -> Result<ControlRange>;

    /// Raw linear capability range
    fn playback_raw_range(&self) -> Result<ControlRange>;

    /// Current decibel value for one side, in millibels
    fn playback_db(&self, side: Side) -> Result<i64>;

    /// Write a decibel value for one side, in millibels
    fn set_playback_db(&self, side: Side, millibel: i64) -> Result<()>;

    /// Current raw linear value for one side
    fn playback_raw(&self, side: Side) -> Result<i64>;

    /// Write a raw linear value for one side
    fn set_playback_raw(&self, side: Side, value: i64) -> Result<()>;
}

/// One physical sound device (card) exposing mixer elements
pub trait MixerDevice: Send + Sync {
    /// Device name (e.g. "hw:0")
    fn name(&self) -> &str;

    /// Active elements of this device that support playback volume
    fn playback_elements(&self) -> Result<Vec<Arc<dyn MixerElement>>>;
}

/// Trait for enumerating the mixer devices of one hardware backend
pub trait MixerBackend: Send + Sync {
    /// List all reachable mixer devices
    fn devices(&self) -> Result<Vec<Box<dyn MixerDevice>>>;
}
