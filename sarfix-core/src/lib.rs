//! # sarfix core library
//!
//! Game-agnostic load-order conflict resolution and record stat patching.
//!
//! Many plugins may each redefine the same record. For every record the
//! engine picks the winning definition, runs the configured rules over it and
//! writes an override into the output patch only when a field really changes:
//!
//! - **Resolver**: last non-null definition in load order wins
//! - **Rules**: weapon speed/reach profiles, attack strike angles, game
//!   setting tables
//! - **Patcher**: clone, apply, commit; stale identical-to-master overrides
//!   are removed
//!
//! ```
//! use sarfix_core::config::{PatcherConfig, StatProfile};
//! use sarfix_core::record::{Plugin, Weapon};
//! use sarfix_core::store::{LoadOrder, RecordStore};
//! use sarfix_core::types::{FormKey, ModKey};
//!
//! let key = FormKey::new(ModKey::new("Skyrim.esm"), 0x012EB7);
//! let mut store = LoadOrder::new("SpeedAndReachFixes.esp").with_plugin(
//!     Plugin::new(ModKey::new("Skyrim.esm"))
//!         .with(Weapon::new(key.clone(), "IronSword").with_keyword("WeapTypeSword").with_stats(0.9, 1.0)),
//! );
//!
//! let mut config = PatcherConfig::default();
//! config.weapons.profiles.push(StatProfile::new("Swords", &["WeapTypeSword"], Some(1.0), None));
//!
//! let summary = sarfix_core::run(&config, &mut store)?;
//! assert_eq!(summary.weapons, 1);
//! assert!(store.override_of::<Weapon>(&key).is_some());
//! # Ok::<(), sarfix_core::PatchError>(())
//! ```

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod patcher;
pub mod record;
pub mod resolver;
pub mod rules;
pub mod store;
pub mod types;

pub use config::PatcherConfig;
pub use error::PatchError;
pub use patcher::{Outcome, PatchEmitter, RunSummary, run};
pub use store::{LoadOrder, RecordStore};
pub use types::*;
