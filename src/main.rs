use clap::Parser;
use flexi_logger::{AdaptiveFormat, Logger, WriteMode};
use lib_clickgrid::cli::{self, Cli};

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let options = Cli::parse();
    let _logger = Logger::try_with_env_or_str(options.log_level.clone().unwrap_or_else(|| "info".into()))?
        .write_mode(WriteMode::BufferAndFlush)
        .log_to_stderr()
        .adaptive_format_for_stderr(match cfg!(debug_assertions) {
            true => AdaptiveFormat::WithThread,
            _ => AdaptiveFormat::Default,
        })
        .set_palette("b196;208;195;111;67".to_owned())
        .start()?;

    if let Err(err) = cli::run(&options) {
        log::error!("fatal error: {err}");
        return Err(err);
    }
    Ok(())
}
