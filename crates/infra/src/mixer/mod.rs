//! Mixer backend implementations
//!
//! `AlsaBackend` (feature `alsa`) talks to real sound cards through
//! libasound's simple mixer interface. `FakeBackend` is an in-memory double
//! with scriptable elements, used by tests, benches and the CLI demo mode.

#[cfg(feature = "alsa")]
pub mod alsa_backend;
pub mod fake;

#[cfg(feature = "alsa")]
pub use alsa_backend::AlsaBackend;
pub use fake::{FakeBackend, FakeDevice, FakeElement};
