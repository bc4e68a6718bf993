#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
//! # Ray March Runtime
//!
//! Headless frame driver for the ray march scene. The binary `runtime_main`
//! parses [`config::Args`] and hands them to [`app::run`]; the pieces are
//! public so tests (and a future windowed front end) can drive frames
//! directly through [`FrameLoop`].

pub mod app;
pub mod config;
pub mod frame_loop;
pub mod input;

pub use frame_loop::{FrameLoop, FrameReport};
pub use input::{Idle, InputSource, Orbit, Scripted};
