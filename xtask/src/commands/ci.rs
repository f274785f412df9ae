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

use crate::helpers::*;
use anyhow::Result;
use std::time::Instant;

/// Feature sets checked by `cargo xtask features`. `check` never links, so
/// the CUDA and NVTX libraries need not be installed.
const FEATURE_MATRIX: &[&str] = &["", "cuda", "nvtx", "cuda,nvtx"];

/// One `cargo` invocation of the pipeline.
struct CargoStep {
    title: &'static str,
    emoji: &'static str,
    color: &'static str,
    info: &'static str,
    label: &'static str,
    args: &'static [&'static str],
}

impl CargoStep {
    fn run(&self) -> Result<()> {
        print_task_start(self.title, self.emoji, self.color);
        println!("{BOLD}💡 Info:{RESET} {}", self.info);
        run_cargo(self.args, self.label)
    }
}

const BUILD: CargoStep = CargoStep {
    title: "Building All Crates",
    emoji: HAMMER,
    color: BLUE,
    info: "Compiling the profiler crates and the sandbox in debug mode",
    label: "Build",
    args: &["build", "--workspace", "--exclude", "xtask"],
};

const TEST: CargoStep = CargoStep {
    title: "Running All Tests",
    emoji: TEST_TUBE,
    color: GREEN,
    info: "Running unit tests, integration tests and doc tests",
    label: "Tests",
    args: &["test", "--workspace"],
};

const CHECK_STEP: CargoStep = CargoStep {
    title: "Checking All Crates",
    emoji: MAGNIFIER,
    color: CYAN,
    info: "Type-checking every crate without producing binaries",
    label: "Check",
    args: &["check", "--workspace"],
};

const FORMAT: CargoStep = CargoStep {
    title: "Formatting Code",
    emoji: BRUSH,
    color: MAGENTA,
    info: "Formatting code using rustfmt with default settings",
    label: "Format",
    // `fmt` takes `--all`, not `--workspace`
    args: &["fmt", "--all"],
};

const CLIPPY_STEP: CargoStep = CargoStep {
    title: "Running Clippy",
    emoji: CLIPPY,
    color: YELLOW,
    info: "Running Clippy linter with warnings as errors",
    label: "Clippy",
    args: &["clippy", "--workspace", "--", "-D", "warnings"],
};

pub fn build() -> Result<()> {
    BUILD.run()
}

pub fn test() -> Result<()> {
    TEST.run()
}

pub fn check() -> Result<()> {
    CHECK_STEP.run()
}

pub fn features() -> Result<()> {
    print_task_start("Checking Backend Features", FLAG, MAGENTA);
    println!(
        "{BOLD}💡 Info:{RESET} Checking tempo-infra against every device/annotation feature set"
    );
    for &set in FEATURE_MATRIX {
        let label = if set.is_empty() { "no features" } else { set };
        let mut args = vec!["check", "--package", "tempo-infra", "--all-targets"];
        if !set.is_empty() {
            args.extend(["--features", set]);
        }
        run_cargo(&args, &format!("Check ({label})"))?;
    }
    Ok(())
}

pub fn format() -> Result<()> {
    FORMAT.run()
}

pub fn clippy() -> Result<()> {
    CLIPPY_STEP.run()
}

pub fn all() -> Result<()> {
    println!("{}", BANNER);
    println!("{}{}Starting full build pipeline...{}", BOLD, CYAN, RESET);
    println!(
        "{}💡 Pipeline:{} This will run build → test → features → format → clippy",
        BOLD, RESET
    );

    let start_time = Instant::now();
    let tasks = [
        ("Build Phase", build as fn() -> Result<()>),
        ("Test Phase", test),
        ("Feature Phase", features),
        ("Format Phase", format),
        ("Clippy Phase", clippy),
    ];
    let total_tasks = tasks.len();
    let mut success_count = 0;

    for (i, (name, task_fn)) in tasks.iter().enumerate() {
        println!(
            "\n{}{}[{}/{}] {}{}",
            BOLD,
            BLUE,
            i + 1,
            total_tasks,
            name,
            RESET
        );
        match task_fn() {
            Ok(()) => success_count += 1,
            Err(e) => print_error(&format!("{name} failed: {e}")),
        }
    }

    let total_duration = start_time.elapsed();
    println!(
        "\n{}{}╔═══════════════════════════════════════╗{}",
        BOLD, CYAN, RESET
    );
    println!(
        "{}{}║            PIPELINE SUMMARY           ║{}",
        BOLD, CYAN, RESET
    );
    println!(
        "{}{}╚═══════════════════════════════════════╝{}",
        BOLD, CYAN, RESET
    );

    if success_count == total_tasks {
        println!(
            "{}{} {} All {} tasks completed successfully! {}{}",
            BOLD, GREEN, CHECK, total_tasks, ROCKET, RESET
        );
    } else {
        println!(
            "{}{} ⚠ {}/{} tasks completed{}",
            BOLD, YELLOW, success_count, total_tasks, RESET
        );
    }

    println!(
        "{}{}Total time: {:.2}s{}",
        BOLD,
        BLUE,
        total_duration.as_secs_f64(),
        RESET
    );

    if success_count != total_tasks {
        anyhow::bail!(
            "Pipeline failed with {}/{} successful tasks.",
            success_count,
            total_tasks
        );
    }

    Ok(())
}
