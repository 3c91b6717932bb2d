use colored::*;
use env_logger::{Builder, Env, Target};
use log::info;
use std::fs;
use std::process;
use termaudit::error::{Result, TermAuditError};
use termaudit::{Cli, Parser, app};

fn main() {
    let cli = Cli::parse();
    if let Err(e) = setup_logging(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        process::exit(1);
    }

    info!("Application started with config: {}", cli.config.display());

    if let Err(e) = app::run(&cli) {
        eprintln!("{} {e}", "Error:".red().bold());
        process::exit(1);
    }
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let default_filter = if cli.verbose { "debug" } else { "info" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_filter));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir)?;
            }
        }
        let log_file = fs::File::create(log_path)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| TermAuditError::Other(e.to_string()))?;
    Ok(())
}
