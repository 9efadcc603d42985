//! Discovery and ownership of volume channels
//!
//! The registry walks a hardware backend once, builds one [`ChannelVolume`]
//! per playback-capable element, and then stays read-only. There is no
//! re-enumeration while running; callers construct a registry explicitly and
//! own it for as long as they need the channels.

use crate::domain::channel::ChannelVolume;
use crate::domain::element::{MixerBackend, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Insertion-ordered collection of all discovered volume channels.
pub struct MixerRegistry {
    channels: Vec<Arc<ChannelVolume>>,
}

impl MixerRegistry {
    /// Enumerate every device of the backend and build channels for the
    /// playback elements found.
    ///
    /// A device whose elements cannot be listed is skipped with a warning;
    /// only a failure to enumerate devices at all is propagated.
    pub fn discover(backend: &dyn MixerBackend) -> Result<Self> {
        info!("Enumerating mixer devices");
        let mut channels = Vec::new();

        for device in backend.devices()? {
            match device.playback_elements() {
                Ok(elements) => {
                    for elem in elements {
                        debug!("Found playback element: {}", elem.name());
                        channels.push(Arc::new(ChannelVolume::from_element(elem)));
                    }
                }
                Err(e) => {
                    warn!("Skipping device {}: {}", device.name(), e);
                }
            }
        }

        info!("Discovered {} volume channels", channels.len());
        Ok(Self { channels })
    }

    /// All channels, in discovery order
    pub fn channels(&self) -> &[Arc<ChannelVolume>] {
        &self.channels
    }

    /// Find a channel by its hardware-reported name
    pub fn find(&self, name: &str) -> Option<&Arc<ChannelVolume>> {
        self.channels.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
