//! In-memory mixer backend with scriptable elements
//!
//! Elements are configured through a small builder: which sides exist, which
//! capability ranges are reported, and whether reads fail. Written values are
//! stored per side with exact readback, which makes the percentage
//! conversion deterministic in tests. An unwritten side reads back as the
//! range minimum, like powered-down hardware.

use fader_core::domain::element::{
    ControlRange, MixerBackend, MixerDevice, MixerElement, MixerError, Result, Side,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::debug;

#[derive(Debug, Default)]
struct FakeState {
    db: HashMap<Side, i64>,
    raw: HashMap<Side, i64>,
}

/// One scriptable mixer element
#[derive(Debug)]
pub struct FakeElement {
    name: String,
    has_left: bool,
    has_right: bool,
    db_range: Option<ControlRange>,
    raw_range: Option<ControlRange>,
    fail_reads: bool,
    state: Mutex<FakeState>,
}

impl FakeElement {
    /// A mono element with no capability ranges; add them with the
    /// `with_*` builders.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            has_left: false,
            has_right: false,
            db_range: None,
            raw_range: None,
            fail_reads: false,
            state: Mutex::new(FakeState::default()),
        }
    }

    /// Report distinct left and right playback sides
    pub fn stereo(mut self) -> Self {
        self.has_left = true;
        self.has_right = true;
        self
    }

    /// Report a decibel capability range (millibels)
    pub fn with_db_range(mut self, min: i64, max: i64) -> Self {
        self.db_range = Some(ControlRange::new(min, max));
        self
    }

    /// Report a raw linear capability range
    pub fn with_raw_range(mut self, min: i64, max: i64) -> Self {
        self.raw_range = Some(ControlRange::new(min, max));
        self
    }

    /// Make every value read fail, as if the hardware stopped responding
    pub fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Last decibel value written to a side, if any
    pub fn db_value(&self, side: Side) -> Option<i64> {
        self.state.lock().unwrap().db.get(&side).copied()
    }

    /// Last raw value written to a side, if any
    pub fn raw_value(&self, side: Side) -> Option<i64> {
        self.state.lock().unwrap().raw.get(&side).copied()
    }

    /// Preset a decibel value, as if set by another program
    pub fn set_db_value(&self, side: Side, millibel: i64) {
        self.state.lock().unwrap().db.insert(side, millibel);
    }

    /// Preset a raw value, as if set by another program
    pub fn set_raw_value(&self, side: Side, value: i64) {
        self.state.lock().unwrap().raw.insert(side, value);
    }

    fn range(&self, range: Option<ControlRange>) -> Result<ControlRange> {
        range.ok_or_else(|| {
            MixerError::ElementError(format!("{}: no such capability", self.name))
        })
    }

    fn read(&self, stored: Option<i64>, range: Option<ControlRange>) -> Result<i64> {
        if self.fail_reads {
            return Err(MixerError::OsError(format!("{}: read failed", self.name)));
        }
        let range = self.range(range)?;
        Ok(stored.unwrap_or(range.min))
    }
}

impl MixerElement for FakeElement {
    fn name(&self) -> &str {
        &self.name
    }

    fn has_playback_side(&self, side: Side) -> bool {
        match side {
            Side::Left => self.has_left,
            Side::Right => self.has_right,
            Side::Mono => true,
        }
    }

    fn playback_db_range(&self) -> Result<ControlRange> {
        self.range(self.db_range)
    }

    fn playback_raw_range(&self) -> Result<ControlRange> {
        self.range(self.raw_range)
    }

    fn playback_db(&self, side: Side) -> Result<i64> {
        let stored = self.state.lock().unwrap().db.get(&side).copied();
        self.read(stored, self.db_range)
    }

    fn set_playback_db(&self, side: Side, millibel: i64) -> Result<()> {
        self.range(self.db_range)?;
        self.state.lock().unwrap().db.insert(side, millibel);
        Ok(())
    }

    fn playback_raw(&self, side: Side) -> Result<i64> {
        let stored = self.state.lock().unwrap().raw.get(&side).copied();
        self.read(stored, self.raw_range)
    }

    fn set_playback_raw(&self, side: Side, value: i64) -> Result<()> {
        self.range(self.raw_range)?;
        self.state.lock().unwrap().raw.insert(side, value);
        Ok(())
    }
}

/// One fake sound card holding a list of elements
#[derive(Debug, Clone)]
pub struct FakeDevice {
    name: String,
    elements: Vec<Arc<FakeElement>>,
}

impl FakeDevice {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, element: FakeElement) -> Self {
        self.elements.push(Arc::new(element));
        self
    }

    /// Shared handle to an element, for asserting on written values
    pub fn element(&self, name: &str) -> Option<Arc<FakeElement>> {
        self.elements.iter().find(|e| e.name == name).cloned()
    }
}

impl MixerDevice for FakeDevice {
    fn name(&self) -> &str {
        &self.name
    }

    fn playback_elements(&self) -> Result<Vec<Arc<dyn MixerElement>>> {
        Ok(self
            .elements
            .iter()
            .map(|e| e.clone() as Arc<dyn MixerElement>)
            .collect())
    }
}

/// Backend over a fixed list of fake devices
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    devices: Vec<FakeDevice>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_device(mut self, device: FakeDevice) -> Self {
        self.devices.push(device);
        self
    }

    /// Shared handle to a device, for inspecting its elements
    pub fn device(&self, name: &str) -> Option<&FakeDevice> {
        self.devices.iter().find(|d| d.name == name)
    }

    /// A plausible demo card for the CLI's `--fake` mode: a stereo dB
    /// master, a stereo raw PCM, a mono mic, and one element without any
    /// usable control.
    pub fn demo() -> Self {
        debug!("Building demo mixer card");
        Self::new().with_device(
            FakeDevice::new("hw:0")
                .with_element(FakeElement::new("Master").stereo().with_db_range(-6375, 0))
                .with_element(FakeElement::new("PCM").stereo().with_raw_range(0, 255))
                .with_element(FakeElement::new("Mic").with_raw_range(0, 31))
                .with_element(FakeElement::new("Beep")),
        )
    }
}

impl MixerBackend for FakeBackend {
    fn devices(&self) -> Result<Vec<Box<dyn MixerDevice>>> {
        Ok(self
            .devices
            .iter()
            .map(|d| Box::new(d.clone()) as Box<dyn MixerDevice>)
            .collect())
    }
}
