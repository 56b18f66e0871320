//! cvbuild - interactive CMake configure and build
//!
//! Collects the build type, the OpenCV location and the compile database
//! choice, then runs CMake's configure and build steps in the build
//! directory.

mod cli;
mod error;
mod logging;

use crate::cli::Cli;
use crate::error::CliError;
use clap::Parser;
use cvbuild_builder::{CMakeInvoker, ProcessRunner, Prompter};
use cvbuild_config::Config;
use std::io::{self, Write};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_tracing(cli.debug);

    // A CMake failure is reported by the final status line alone
    if let Err(e) = run(cli).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting cvbuild v{}", env!("CARGO_PKG_VERSION"));

    // 1. File config (or defaults)
    let mut config = Config::load_or_default(cli.config.as_deref()).await?;

    // 2. Environment
    config.merge_env()?;

    // 3. CLI flags (highest precedence)
    apply_cli_config(&mut config, &cli);

    let project_dir = std::env::current_dir()?;
    let mut stdout = io::stdout();
    writeln!(stdout, "Build Configuration")?;

    let mut prompter = Prompter::new(io::stdin().lock(), stdout);
    let settings = prompter.gather(
        cli.overrides(&config.build.default_library_path),
        &config.build.default_library_path,
    )?;
    let mut stdout = prompter.into_output();
    info!(?settings, "collected build settings");

    let invoker = CMakeInvoker::new(&config.build, &project_dir);
    let outcome = invoker.run(&ProcessRunner, &settings, &mut stdout).await?;
    info!(?outcome, "build finished");

    if outcome.is_success() {
        writeln!(stdout, "Build process complete!")?;
    } else {
        writeln!(stdout, "Build failed!")?;
    }
    stdout.flush()?;

    Ok(())
}

/// Apply CLI configuration overrides
fn apply_cli_config(config: &mut Config, cli: &Cli) {
    if let Some(cmake) = &cli.cmake {
        config.build.cmake.clone_from(cmake);
    }
    if let Some(build_dir) = &cli.build_dir {
        config.build.build_dir.clone_from(build_dir);
    }
}
