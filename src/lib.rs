//! BookVault: a personal bookmark manager core.
//!
//! Keeps three related collections (bookmarks, folders, sharing groups)
//! consistent across a local blob cache and an optional remote single-file
//! store, with bulk editing, cross-page selection and JSON / Netscape-markup
//! import/export. Programmatic API only; no UI or CLI surface.

pub mod app;
pub mod codec;
pub mod persistence;
pub mod services;
pub mod stores;
pub mod types;
pub mod view;
