//! fwbuild-lib: build orchestration for the flight software
//!
//! This crate turns build parameters into:
//! - `config`: the generated compile-time configuration header
//! - `dispatch`: the install/clean/program/build actions for a target platform
//!
//! It never compiles anything itself. External tools run through an
//! `execute::Executor`, which tests replace with an in-memory recorder.

pub mod config;
pub mod consts;
pub mod dispatch;
pub mod execute;
pub mod params;
pub mod platform;
pub mod template;
pub mod util;
pub mod version;
