//! Percentage to native-scale conversion for one element side
//!
//! Every physical side (left, right, mono) of a mixer element gets its own
//! [`ScaleController`]. The controller is bound once, at construction, to
//! whichever native scale the element actually supports: decibel if a usable
//! dB range is reported, raw linear as a fallback, or a dummy that absorbs
//! all calls when the element offers no usable control at all. Decibel wins
//! over linear because it tracks perceived loudness better.

use crate::domain::element::{ControlRange, MixerElement, Side};
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Native scale variant selected for one (element, side) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    Decibel(ControlRange),
    Linear(ControlRange),
    Dummy,
}

/// Converts between a 0..=100 percentage and one element side's native scale.
///
/// All hardware failures degrade silently: writes are fire-and-forget and a
/// failed read counts as 0. Callers are expected to clamp percentages at
/// their own boundary ([`ChannelVolume`](crate::domain::channel::ChannelVolume)
/// does); the controller only guards against degenerate ranges, and those are
/// rejected at bind time.
pub struct ScaleController {
    elem: Option<Arc<dyn MixerElement>>,
    side: Side,
    scale: Scale,
}

impl ScaleController {
    /// Inspect the element's capability ranges and bind the matching variant.
    ///
    /// Selection order: no element -> dummy; usable dB range -> decibel;
    /// usable raw range -> linear; otherwise dummy. The choice is final for
    /// the lifetime of the controller since element capabilities are static.
    pub fn bind(elem: Option<Arc<dyn MixerElement>>, side: Side) -> Self {
        let scale = match &elem {
            None => Scale::Dummy,
            Some(e) => match e.playback_db_range() {
                Ok(range) if range.is_usable() => Scale::Decibel(range),
                _ => match e.playback_raw_range() {
                    Ok(range) if range.is_usable() => Scale::Linear(range),
                    _ => Scale::Dummy,
                },
            },
        };

        if let Some(e) = &elem {
            trace!("Bound {:?} scale for element '{}' side {:?}", scale, e.name(), side);
        }

        Self { elem, side, scale }
    }

    /// Whether this controller absorbs all operations
    pub fn is_dummy(&self) -> bool {
        matches!(self.scale, Scale::Dummy)
    }

    /// Write `percent` (0..=100) to the hardware in the native scale.
    ///
    /// Out-of-range input is clamped; write failures are swallowed, so the
    /// hardware either applies the value or keeps its previous one.
    pub fn set_percent(&self, percent: i32) {
        let Some(elem) = &self.elem else { return };
        match self.scale {
            Scale::Decibel(range) => {
                let _ = elem.set_playback_db(self.side, to_native(range, percent));
            }
            Scale::Linear(range) => {
                let _ = elem.set_playback_raw(self.side, to_native(range, percent));
            }
            Scale::Dummy => {}
        }
    }

    /// Read the current hardware value back as a percentage.
    ///
    /// Returns 0 for dummy controllers and on any read failure.
    pub fn percent(&self) -> i32 {
        let Some(elem) = &self.elem else { return 0 };
        match self.scale {
            Scale::Decibel(range) => elem
                .playback_db(self.side)
                .map(|value| from_native(range, value))
                .unwrap_or(0),
            Scale::Linear(range) => elem
                .playback_raw(self.side)
                .map(|value| from_native(range, value))
                .unwrap_or(0),
            Scale::Dummy => 0,
        }
    }
}

impl fmt::Debug for ScaleController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleController")
            .field("side", &self.side)
            .field("scale", &self.scale)
            .finish()
    }
}

/// Map a percentage onto a native range by linear interpolation.
fn to_native(range: ControlRange, percent: i32) -> i64 {
    let norm = (percent as f64 / 100.0).clamp(0.0, 1.0);
    range.min + (norm * range.span() as f64).round() as i64
}

/// Map a native value back onto 0..=100, clamped.
fn from_native(range: ControlRange, value: i64) -> i32 {
    let norm = (value - range.min) as f64 / range.span() as f64;
    ((norm * 100.0).round() as i32).clamp(0, 100)
}
