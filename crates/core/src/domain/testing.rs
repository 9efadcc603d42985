//! In-memory element stubs for unit tests
//!
//! Kept crate-local so the core tests do not pull in any backend crate.
//! Written values are stored per side with exact readback; an unwritten
//! side reads back as the range minimum.

use crate::domain::element::{
    ControlRange, MixerBackend, MixerDevice, MixerElement, MixerError, Result, Side,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct StubState {
    db: HashMap<Side, i64>,
    raw: HashMap<Side, i64>,
}

/// One scriptable mixer element
#[derive(Debug)]
pub(crate) struct StubElement {
    name: String,
    has_left: bool,
    has_right: bool,
    db_range: Option<ControlRange>,
    raw_range: Option<ControlRange>,
    fail_reads: bool,
    state: Mutex<StubState>,
}

impl StubElement {
    /// A mono element with no capability ranges
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            has_left: false,
            has_right: false,
            db_range: None,
            raw_range: None,
            fail_reads: false,
            state: Mutex::new(StubState::default()),
        }
    }

    pub(crate) fn stereo(mut self) -> Self {
        self.has_left = true;
        self.has_right = true;
        self
    }

    pub(crate) fn with_db_range(mut self, min: i64, max: i64) -> Self {
        self.db_range = Some(ControlRange::new(min, max));
        self
    }

    pub(crate) fn with_raw_range(mut self, min: i64, max: i64) -> Self {
        self.raw_range = Some(ControlRange::new(min, max));
        self
    }

    pub(crate) fn with_failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    pub(crate) fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Last decibel value written to a side, if any
    pub(crate) fn db_value(&self, side: Side) -> Option<i64> {
        self.state.lock().unwrap().db.get(&side).copied()
    }

    /// Last raw value written to a side, if any
    pub(crate) fn raw_value(&self, side: Side) -> Option<i64> {
        self.state.lock().unwrap().raw.get(&side).copied()
    }

    /// Preset a decibel value, as if set by another program
    pub(crate) fn set_db_value(&self, side: Side, millibel: i64) {
        self.state.lock().unwrap().db.insert(side, millibel);
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

impl MixerElement for StubElement {
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

/// One stub sound card holding a list of elements
#[derive(Debug, Clone)]
pub(crate) struct StubDevice {
    name: String,
    elements: Vec<Arc<StubElement>>,
}

impl StubDevice {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            elements: Vec::new(),
        }
    }

    pub(crate) fn with_element(mut self, element: StubElement) -> Self {
        self.elements.push(Arc::new(element));
        self
    }
}

impl MixerDevice for StubDevice {
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

/// Backend over a fixed list of stub devices
#[derive(Debug, Clone, Default)]
pub(crate) struct StubBackend {
    devices: Vec<StubDevice>,
}

impl StubBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_device(mut self, device: StubDevice) -> Self {
        self.devices.push(device);
        self
    }
}

impl MixerBackend for StubBackend {
    fn devices(&self) -> Result<Vec<Box<dyn MixerDevice>>> {
        Ok(self
            .devices
            .iter()
            .map(|d| Box::new(d.clone()) as Box<dyn MixerDevice>)
            .collect())
    }
}
