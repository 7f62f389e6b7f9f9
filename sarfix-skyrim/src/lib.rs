//! # sarfix-skyrim: Skyrim Integration for sarfix
//!
//! This crate wires the game-agnostic `sarfix-core` engine to Skyrim's
//! vocabulary and to the patcher's user-facing settings.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │   settings.json        RUST_LOG         │
//! │  ┌───────────────────────────────────┐  │
//! │  │       sarfix-skyrim               │  │
//! │  │  ┌─────────────┐ ┌─────────────┐ │  │
//! │  │  │  Settings   │ │   Presets   │ │  │
//! │  │  └──────┬──────┘ └──────┬──────┘ │  │
//! │  │         ▼               ▼         │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │     SkyrimPatcher       │    │  │
//! │  │    └────────────┬────────────┘    │  │
//! │  │                 ▼                 │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │      sarfix-core        │    │  │
//! │  │    └─────────────────────────┘    │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `keywords`: keyword editor ids (weapon types, `ActorTypeNPC`)
//! - `presets`: built-in weapon profile tables
//! - `settings`: `settings.json` import
//! - `logging`: tracing subscriber setup
//! - `patch`: patcher entry point and JSON output

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod keywords;
pub mod logging;
pub mod patch;
pub mod presets;
pub mod settings;

pub use patch::{PatchOutput, SkyrimPatcher};
pub use presets::WeaponPreset;
