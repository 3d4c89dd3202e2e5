// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async process spawning.
//!
//! ```text
//! ProcessBuilder::raw("bitbake core-image-minimal")
//!   .cwd(build_dir) .env(resolved)
//!   .run()
//!       --> tokio::process::Command (env_clear + resolved env)
//!       --> ProcessOutput { exit_code }
//! ```

pub mod builder;
mod runner;
