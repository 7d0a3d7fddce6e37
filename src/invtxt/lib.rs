//! # invtxt Architecture
//!
//! invtxt keeps a home inventory in a single plain text file, one item per
//! line, in a format meant to be edited by hand as much as by the tool:
//!
//! ```text
//! (2/5) *widget small screws -> @hardware #metal *bolts +3
//! ```
//!
//! The library does all the work; the `invtxt` binary only parses arguments
//! and prints.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (args.rs, cli/, main.rs)                               │
//! │  - Argument parsing, colored output, viewer launch          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Load once, dispatch, save once if anything changed       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands (commands/*.rs)                                   │
//! │  - One module per action, returns CmdResult, never prints   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────┐ ┌────────────────────────────┐
//! │  Inventory (inventory.rs)    │ │  Store (store/)            │
//! │  Codec (codec.rs)            │ │  StorageBackend trait      │
//! │  Pure, no I/O                │ │  FsBackend, MemBackend     │
//! └──────────────────────────────┘ └────────────────────────────┘
//! ```
//!
//! ## Round trips
//!
//! Parsing is total: any line yields an [`model::Item`], with unrecognized
//! structure falling into the free text. Serializing writes the canonical
//! form, and parsing that form again gives the same item. Hand-written lines
//! are normalized the first time the inventory is saved.
//!
//! ## Module Overview
//!
//! - [`codec`]: one line to an item and back.
//! - [`inventory`]: the ordered list of items and its queries.
//! - [`store`]: loading, saving with backup, picture bookkeeping.
//! - [`pictures`]: ImageMagick import and the picture viewer.
//! - [`commands`]: the CLI actions.
//! - [`api`]: the facade the binary talks to.
//! - [`config`]: `config.json`.
//! - [`error`]: error types.

pub mod api;
pub mod codec;
pub mod commands;
pub mod config;
pub mod error;
pub mod inventory;
pub mod model;
pub mod pictures;
pub mod store;
