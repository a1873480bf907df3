#![recursion_limit = "256"]
#![deny(nonstandard_style, clippy::all)]
#![allow(clippy::module_name_repetitions, clippy::multiple_inherent_impl, clippy::implicit_return, clippy::missing_inline_in_public_items, clippy::missing_docs_in_private_items)]

//! Typed command/control layer over `zfs(8)` and `zpool(8)`.
//!
//! This library lets you enumerate, create, destroy and configure pools and datasets without
//! hand-building shell invocations or parsing tabular output yourself.
//!
//! # Overview
//! ## properties
//! Everything both tools report is a property: `entity, property, value, source`. Values are kept
//! as the raw string the tool emitted and interpreted lazily by typed accessors (bytes, percent,
//! ratio, bool, time, integer). An unparseable value reads as "not present" instead of failing the
//! whole entity.
//!
//! Refer to the [properties module documentation](properties/index.html) for more information.
//!
//! ## zfs
//! [`ZfsOpen3`](zfs/struct.ZfsOpen3.html) wraps `zfs(8)` and returns
//! [`Dataset`](zfs/struct.Dataset.html) snapshots.
//!
//! ## zpool
//! [`ZpoolOpen3`](zpool/struct.ZpoolOpen3.html) wraps `zpool(8)` and returns
//! [`Pool`](zpool/struct.Pool.html) snapshots.
//!
//! # Usage
//! ```rust,no_run
//! use zetta_ctl::zfs::{ZfsEngine, ZfsOpen3};
//!
//! let zfs = ZfsOpen3::new();
//! let dataset = zfs.get_dataset("tank/home", &[]).unwrap();
//! println!("quota: {:?}", dataset.quota());
//! ```
//!
//! # Project Structure
//! ### parsers
//! Tab-delimited stdout decoding and a PEG grammar backed by [Pest](https://pest.rs/) for stderr.
//!
//! ### runner
//! The seam where processes actually get spawned. Swap it to run through `sudo` or to replay
//! canned output in tests.

#[macro_use] extern crate derive_builder;
#[macro_use] extern crate getset;

#[macro_use] extern crate lazy_static;

#[macro_use] extern crate quick_error;

#[macro_use] pub extern crate slog;

// library modules
pub mod parsers;
pub mod properties;
pub mod runner;
pub mod zfs;
pub mod zpool;

mod log;
pub use crate::log::GlobalLogger;

const VERSION: &str = env!("CARGO_PKG_VERSION");
