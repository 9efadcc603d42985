//! ALSA simple-mixer backend
//!
//! Cards are enumerated through `alsa::card::Iter`; each card that opens
//! successfully keeps its `Mixer` handle alive for the lifetime of the
//! device so the elements stay valid. libasound handles are not thread-safe,
//! so all element access on one card is serialized behind the card's mutex.
//! Decibel values cross the trait boundary as plain millibel integers.
//!
//! The safe `alsa` Selem API exposes no element activity query, so inactive
//! elements are enumerated alongside active ones; their controls degrade to
//! no-ops like any other unusable element.

use alsa::mixer::{Mixer, Selem, SelemChannelId, SelemId};
use alsa::Round;
use fader_core::domain::element::{
    ControlRange, MixerBackend, MixerDevice, MixerElement, MixerError, Result, Side,
};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

fn channel_id(side: Side) -> SelemChannelId {
    match side {
        Side::Left => SelemChannelId::FrontLeft,
        Side::Right => SelemChannelId::FrontRight,
        Side::Mono => SelemChannelId::Mono,
    }
}

fn os_err(e: alsa::Error) -> MixerError {
    MixerError::OsError(e.to_string())
}

/// Shared, serialized handle to one card's mixer
struct CardHandle {
    mixer: Mutex<Mixer>,
}

impl CardHandle {
    fn with_selem<T>(&self, id: &SelemId, f: impl FnOnce(&Selem) -> Result<T>) -> Result<T> {
        let mixer = self
            .mixer
            .lock()
            .map_err(|_| MixerError::ElementError("mixer lock poisoned".to_string()))?;
        let selem = mixer.find_selem(id).ok_or_else(|| {
            MixerError::ElementError(format!("element {:?} vanished", id.get_name()))
        })?;
        f(&selem)
    }
}

/// One ALSA simple mixer element
pub struct AlsaElement {
    name: String,
    id: SelemId,
    handle: Arc<CardHandle>,
}

impl MixerElement for AlsaElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_playback_side(&self, side: Side) -> bool {
        self.handle
            .with_selem(&self.id, |s| Ok(s.has_playback_channel(channel_id(side))))
            .unwrap_or(false)
    }

    fn playback_db_range(&self) -> Result<ControlRange> {
        self.handle.with_selem(&self.id, |s| {
            let (min, max) = s.get_playback_db_range();
            Ok(ControlRange::new(min.0, max.0))
        })
    }

    fn playback_raw_range(&self) -> Result<ControlRange> {
        self.handle.with_selem(&self.id, |s| {
            let (min, max) = s.get_playback_volume_range();
            Ok(ControlRange::new(min, max))
        })
    }

    fn playback_db(&self, side: Side) -> Result<i64> {
        self.handle.with_selem(&self.id, |s| {
            s.get_playback_vol_db(channel_id(side))
                .map(|mb| mb.0)
                .map_err(os_err)
        })
    }

    fn set_playback_db(&self, side: Side, millibel: i64) -> Result<()> {
        self.handle.with_selem(&self.id, |s| {
            s.set_playback_db(channel_id(side), alsa::mixer::MilliBel(millibel), Round::Floor)
                .map_err(os_err)
        })
    }

    fn playback_raw(&self, side: Side) -> Result<i64> {
        self.handle.with_selem(&self.id, |s| {
            s.get_playback_volume(channel_id(side)).map_err(os_err)
        })
    }

    fn set_playback_raw(&self, side: Side, value: i64) -> Result<()> {
        self.handle.with_selem(&self.id, |s| {
            s.set_playback_volume(channel_id(side), value).map_err(os_err)
        })
    }
}

/// One opened ALSA card
pub struct AlsaDevice {
    name: String,
    handle: Arc<CardHandle>,
}

impl AlsaDevice {
    fn open(hwname: &str) -> Result<Self> {
        let mixer = Mixer::new(hwname, false)
            .map_err(|e| MixerError::CardNotFound(format!("{}: {}", hwname, e)))?;
        debug!("Opened mixer {}", hwname);
        Ok(Self {
            name: hwname.to_string(),
            handle: Arc::new(CardHandle {
                mixer: Mutex::new(mixer),
            }),
        })
    }
}

impl MixerDevice for AlsaDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn playback_elements(&self) -> Result<Vec<Arc<dyn MixerElement>>> {
        let mixer = self
            .handle
            .mixer
            .lock()
            .map_err(|_| MixerError::ElementError("mixer lock poisoned".to_string()))?;

        let mut elements: Vec<Arc<dyn MixerElement>> = Vec::new();
        for elem in mixer.iter() {
            let Some(selem) = Selem::new(elem) else {
                continue;
            };
            if !selem.has_playback_volume() {
                continue;
            }

            let id = selem.get_id();
            let name = id.get_name().map_err(os_err)?.to_string();
            debug!("Element '{}' on {}", name, self.name);
            elements.push(Arc::new(AlsaElement {
                name,
                id,
                handle: self.handle.clone(),
            }));
        }
        Ok(elements)
    }
}

/// Backend enumerating every ALSA card on the system
#[derive(Default)]
pub struct AlsaBackend;

impl AlsaBackend {
    pub fn new() -> Self {
        Self
    }
}

impl MixerBackend for AlsaBackend {
    fn devices(&self) -> Result<Vec<Box<dyn MixerDevice>>> {
        info!("Enumerating ALSA cards");
        let mut devices: Vec<Box<dyn MixerDevice>> = Vec::new();

        for card in alsa::card::Iter::new() {
            let card = match card {
                Ok(card) => card,
                Err(e) => {
                    warn!("Card enumeration error: {}", e);
                    continue;
                }
            };

            let hwname = format!("hw:{}", card.get_index());
            match AlsaDevice::open(&hwname) {
                Ok(device) => devices.push(Box::new(device)),
                Err(e) => warn!("Skipping {}: {}", hwname, e),
            }
        }

        Ok(devices)
    }
}
