// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Build automation for the Tempo profiler workspace
// Run with: cargo xtask <command>

mod commands {
    pub mod ci;
}
mod helpers;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::ci;

#[derive(Parser)]
#[command(name = "xtask", version, about = "Build automation for the Tempo workspace")]
struct Cli {
    #[command(subcommand)]
    command: Task,
}

#[derive(Subcommand)]
enum Task {
    /// Build all crates in the workspace.
    Build,
    /// Run all tests in the workspace.
    Test,
    /// Run `cargo check` on all crates.
    Check,
    /// Check tempo-infra with every combination of the `cuda` and `nvtx` features.
    Features,
    /// Format all code in the workspace.
    Format,
    /// Run clippy on all crates with warnings as errors.
    Clippy,
    /// Run all CI tasks (build, test, features, format, clippy).
    All,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Task::Build => ci::build(),
        Task::Test => ci::test(),
        Task::Check => ci::check(),
        Task::Features => ci::features(),
        Task::Format => ci::format(),
        Task::Clippy => ci::clippy(),
        Task::All => ci::all(),
    }
}
