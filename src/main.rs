use clap::Parser;
use colored::*;
use std::process::ExitCode;

mod cli;
mod commands;
mod config;
mod error;
mod executor;

use cli::{Cli, Commands};
use commands::{execute_build, execute_clean, BuildOptions};
use config::Config;
use error::{ExtBuildError, Result};
use executor::{CommandRunner, ProcessLauncher};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.debug {
        eprintln!("{} {:?}", "DEBUG:".yellow(), cli);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report(&e);
            // 에러 경로에서는 0으로 끝나지 않도록
            let code = u8::try_from(e.exit_code())
                .ok()
                .filter(|code| *code != 0)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    if cli.debug {
        eprintln!("{} {:?}", "DEBUG:".yellow(), config);
    }

    if let Some(dir) = &cli.directory {
        if !dir.is_dir() {
            return Err(ExtBuildError::InvalidDirectory(dir.clone()));
        }
    }

    let runner = CommandRunner::new(ProcessLauncher::new(cli.directory.clone())).dry_run(cli.dry_run);

    match &cli.command {
        Commands::Build { llvm_home_dir } => {
            // 빌드 단계를 시작하기 전에 경로부터 확인
            let options =
                BuildOptions::resolve(llvm_home_dir.as_deref(), cli.directory.as_deref())?;
            execute_build(&runner, &config, &options).await?;
        }
        Commands::Clean => {
            execute_clean(&runner, &config).await?;
        }
    }

    if runner.is_dry_run() {
        eprintln!("{} Commands were printed only, not executed.", "[DRY-RUN]".yellow());
    }

    Ok(())
}

fn report(error: &ExtBuildError) {
    match error {
        // 빌드 출력과 같은 stdout으로
        ExtBuildError::InvalidLlvmHomeDir(_) => println!("{}", error),
        _ => eprintln!("{} {}", "[X]".red(), error),
    }
}
