//! Board-agnostic core logic for the Echolink nodes
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Echo pulse capture bookkeeping
//! - Moving-average filters and dead-band
//! - Distance and tilt estimation
//! - Proximity alarm levels and tones
//! - Seven-segment display model
//! - Role/mode state machine
//! - Interrupt-safe shared cells
//! - Defect counting
//! - Configuration types and TOML loader

#![no_std]
#![deny(unsafe_code)]

pub mod alarm;
pub mod capture;
pub mod config;
pub mod display;
pub mod estimator;
pub mod filter;
pub mod state;
pub mod sync;
pub mod telemetry;
