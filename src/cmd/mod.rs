// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.
//!
//! ```text
//! build-dir | env | shell   need a Context (build dir prepared)
//! dump | options | inis     work on the merged Config only
//! ```

pub mod config;
pub mod dump;
pub mod env;
