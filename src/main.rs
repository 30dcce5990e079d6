use anyhow::Result;
use cellglyph::{cli, logging};
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    let config = cli::load_config(cli.config.as_deref())?;

    // CLI --log-level takes precedence, then RUST_LOG, then the config file.
    let rust_log = std::env::var("RUST_LOG").ok();
    let level = logging::resolve_level(cli.log_level, rust_log.as_deref(), config.log_level);
    if let Err(e) = logging::init(level, config.log_file.as_deref()) {
        eprintln!("cellglyph: warning: logging disabled: {e:#}");
    }

    let stdout = std::io::stdout();
    let result = cli::execute(&cli.command, config, &mut stdout.lock());
    if let Err(ref e) = result {
        eprintln!("cellglyph: error: {e:#}");
    }
    result
}
