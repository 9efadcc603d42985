//! Cross-crate integration tests for fader

#[cfg(test)]
mod volume_integration;
