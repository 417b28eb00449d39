#![forbid(unsafe_code)]

//! Core: geometry and normalized input events.
//!
//! # Role in vplayer
//! `vplayer-core` is the vocabulary shared by every other crate. It owns the
//! rectangle and point types used for region placement and hit testing, and
//! the canonical [`event::Event`] values that display backends produce and
//! the runtime consumes.
//!
//! # How it fits in the system
//! Backends (`vplayer-backend`) translate platform input into
//! [`event::Event`]; the runtime (`vplayer-runtime`) routes those events to
//! its controllers. The render kernel (`vplayer-render`) only needs
//! [`geometry`], so it stays independent of input.

pub mod event;
pub mod geometry;
