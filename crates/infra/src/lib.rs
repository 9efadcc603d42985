//! Hardware backends for fader

pub mod mixer;
