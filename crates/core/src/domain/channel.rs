//! Logical volume channels with a combined volume/balance model
//!
//! A [`ChannelVolume`] wraps one hardware element and exposes volume as a
//! 0..=100 percentage and balance as -100 (left only) to +100 (right only).
//! Balance is never stored; it is always derived from the two current
//! hardware readings, so there is no cached value to drift out of sync with
//! the registers. The flip side is that repeated volume/balance round-trips
//! can lose a little precision to hardware granularity and rounding.

use crate::domain::element::{MixerElement, Side};
use crate::domain::scale::ScaleController;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// One named volume channel (e.g. "Speaker"), mono or stereo.
///
/// Three controllers are always constructed; the mono slot doubles as the
/// fallback path for elements that do not expose distinct left/right sides.
pub struct ChannelVolume {
    name: String,
    has_left: bool,
    has_right: bool,
    left: ScaleController,
    right: ScaleController,
    mono: ScaleController,
}

impl ChannelVolume {
    /// Build a channel from one hardware element, querying its sides and
    /// binding a scale controller per side.
    pub fn from_element(elem: Arc<dyn MixerElement>) -> Self {
        let name = elem.name().to_string();
        let has_left = elem.has_playback_side(Side::Left);
        let has_right = elem.has_playback_side(Side::Right);

        Self {
            name,
            has_left,
            has_right,
            left: ScaleController::bind(Some(elem.clone()), Side::Left),
            right: ScaleController::bind(Some(elem.clone()), Side::Right),
            mono: ScaleController::bind(Some(elem), Side::Mono),
        }
    }

    /// Hardware-reported channel name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the channel has independent left and right controls
    pub fn is_stereo(&self) -> bool {
        self.has_left && self.has_right
    }

    /// Current volume (0..=100).
    ///
    /// The maximum of the left, right and mono readings. For stereo channels
    /// this collapses to max(left, right) since the unused mono slot reads 0;
    /// taking the max of all three also covers elements that unexpectedly
    /// expose a mono control alongside the stereo pair.
    pub fn volume(&self) -> i32 {
        let left = self.left.percent();
        let right = self.right.percent();
        let mono = self.mono.percent();
        left.max(right).max(mono)
    }

    /// Set the overall volume (clamped to 0..=100), preserving balance.
    ///
    /// On a stereo channel the current balance is read first and the louder
    /// side is pinned to the requested volume while the quieter side scales
    /// down proportionally. Mono channels forward directly.
    pub fn set_volume(&self, volume: i32) {
        let volume = volume.clamp(0, 100);
        trace!("Channel {} volume set to {}", self.name, volume);

        if self.is_stereo() {
            self.spread(volume, self.balance());
        } else {
            self.mono.set_percent(volume);
        }
    }

    /// Current balance (-100..=100), derived from the left/right readings.
    ///
    /// Always 0 for mono channels.
    pub fn balance(&self) -> i32 {
        if !self.is_stereo() {
            return 0;
        }
        self.right.percent() - self.left.percent()
    }

    /// Set the balance (clamped to -100..=100) while keeping the overall
    /// volume. No-op on mono channels.
    pub fn set_balance(&self, balance: i32) {
        if !self.is_stereo() {
            return;
        }
        let balance = balance.clamp(-100, 100);
        trace!("Channel {} balance set to {}", self.name, balance);

        self.spread(self.volume(), balance);
    }

    /// Write both sides for a given overall volume and target balance:
    /// the louder side gets `volume`, the quieter side gets `volume` scaled
    /// by how far the balance sits off center.
    fn spread(&self, volume: i32, balance: i32) {
        let balance_norm = (100 - balance.abs()) as f64 / 100.0;
        let scaled = (volume as f64 * balance_norm).round() as i32;

        match balance.cmp(&0) {
            Ordering::Less => {
                // left louder
                self.left.set_percent(volume);
                self.right.set_percent(scaled);
            }
            Ordering::Greater => {
                // right louder
                self.left.set_percent(scaled);
                self.right.set_percent(volume);
            }
            Ordering::Equal => {
                self.left.set_percent(volume);
                self.right.set_percent(volume);
            }
        }
    }
}

impl fmt::Debug for ChannelVolume {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelVolume")
            .field("name", &self.name)
            .field("has_left", &self.has_left)
            .field("has_right", &self.has_right)
            .finish()
    }
}
