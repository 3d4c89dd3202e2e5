// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for build directory, environment and process management.
//!
//! ```text
//!                 core
//!                  |
//!      +-----------+-----------+
//!      |           |           |
//!      v           v           v
//!  build_dir      env       process
//!      |           |           |
//!  BuildDir    Env, Alias   Builder
//!  resolve     compose      Output
//!  ensure
//! ```

pub mod build_dir;
pub mod env;
pub mod process;
