// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable management.
//!
//! # Architecture
//!
//! ```text
//! current_env()  --> Env (host snapshot, read-only by convention)
//!                          |
//! EnvSection ----> EnvComposer::compose() --> Env (per subprocess call)
//!                          |
//!                  AllowlistAlias (legacy/current union)
//! ```
//!
//! - **Case-insensitive on Windows**
//! - **Copy-on-write**: Clones share data until modified
//! - **Raw values**: host values keep their bytes; only the allowlist pair
//!   is decoded, where a non-UTF-8 value counts as malformed

pub mod alias;
pub mod compose;
pub mod container;
mod types;


/// Captures the current process environment.
///
/// Values are kept as raw OS strings. Non-UTF-8 names are converted lossily,
/// which can never match a declared name.
#[must_use]
pub fn current_env() -> container::Env {
    std::env::vars_os()
        .map(|(k, v)| (k.to_string_lossy().into_owned(), v))
        .collect()
}
