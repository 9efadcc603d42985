//! Core logic for fader: a percentage volume/balance model over
//! heterogeneous hardware mixer elements.
//!
//! Hardware access goes through the traits in [`domain::element`];
//! real backends live in the `fader-infra` crate.

pub mod domain;
