mod editor;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use mapedit_engine::device::GpuInit;
use mapedit_engine::logging::{LoggingConfig, init_logging};
use mapedit_engine::scheduler::{LoopConfig, SleepGranularity};
use mapedit_engine::window::{Runtime, RuntimeConfig};

use editor::Editor;

/// Map editor.
#[derive(Debug, Parser)]
#[command(name = "mapedit", version)]
struct Cli {
    /// Target frames per second (1 to 127).
    #[arg(long, default_value_t = 60, allow_negative_numbers = true)]
    fps: i32,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 500.0)]
    width: f64,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 500.0)]
    height: f64,

    /// Log filter in env_logger syntax (overrides RUST_LOG).
    #[arg(long)]
    log: Option<String>,

    /// Sleep with nanosecond precision instead of whole milliseconds.
    #[arg(long)]
    fine_sleep: bool,

    /// Measure oversleep and shorten the following sleep by it.
    #[arg(long)]
    compensate_oversleep: bool,
}

impl Cli {
    fn loop_config(&self) -> Result<LoopConfig> {
        let granularity = if self.fine_sleep {
            SleepGranularity::Nanosecond
        } else {
            SleepGranularity::Millisecond
        };

        Ok(LoopConfig::new(self.fps)
            .context("invalid --fps")?
            .with_sleep_granularity(granularity)
            .with_oversleep_compensation(self.compensate_oversleep)
            .with_update_each_cycle(true))
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..Default::default()
    });

    let loop_config = cli.loop_config()?;
    log::info!(
        "map editor: {} fps ({:?} sleeps)",
        loop_config.frequency_hz(),
        loop_config.sleep_granularity()
    );

    let window = RuntimeConfig {
        title: "Map Editor".to_string(),
        initial_size: LogicalSize::new(cli.width, cli.height),
        resizable: true,
    };

    Runtime::run(window, loop_config, GpuInit::default(), Editor::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let cli = Cli::try_parse_from(["mapedit"]).unwrap();
        let config = cli.loop_config().unwrap();
        assert_eq!(config.frequency_hz(), 60);
        assert!(config.update_each_cycle());
        assert_eq!(config.sleep_granularity(), SleepGranularity::Millisecond);
    }

    #[test]
    fn negative_fps_reaches_range_check() {
        let cli = Cli::try_parse_from(["mapedit", "--fps", "-5"]).unwrap();
        let err = cli.loop_config().unwrap_err();
        assert!(format!("{err:#}").contains("-5"));
    }

    #[test]
    fn timing_flags_apply() {
        let cli = Cli::try_parse_from(["mapedit", "--fps", "30", "--fine-sleep", "--compensate-oversleep"])
            .unwrap();
        let config = cli.loop_config().unwrap();
        assert_eq!(config.period_ns(), 33_333_333);
        assert_eq!(config.sleep_granularity(), SleepGranularity::Nanosecond);
        assert!(config.compensate_oversleep());
    }
}
