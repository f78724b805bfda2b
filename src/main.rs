use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use log::{info, warn, LevelFilter};
use url::Url;

use mojo_harvest::{logger, CsvSink, HttpNavigator, NavigatorError, Pipeline, PipelineConfig};

#[derive(Parser)]
#[command(name = "mojo-harvest")]
#[command(about = "Collect yearly worldwide box-office records into CSV files")]
struct Cli {
    #[arg(short, long, help = "JSON config file; flags below override it")]
    config: Option<PathBuf>,

    #[arg(long, help = "First release year to collect")]
    from: Option<i32>,

    #[arg(long, help = "Last release year to collect (inclusive)")]
    to: Option<i32>,

    #[arg(short, long, help = "Directory for the per-year CSV files")]
    out_dir: Option<PathBuf>,

    #[arg(long, help = "Seconds to wait for each page")]
    timeout: Option<u64>,

    #[arg(long, help = "Site root url")]
    base_url: Option<Url>,

    #[arg(short, long, default_value = "info", help = "Logging level (debug, info, warn, error)")]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> Result<PipelineConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(year) = self.from {
            config.first_year = year;
        }
        if let Some(year) = self.to {
            config.last_year = year;
        }
        if let Some(dir) = self.out_dir {
            config.output_dir = dir;
        }
        if let Some(secs) = self.timeout {
            config.wait_timeout_secs = secs;
        }
        if let Some(url) = self.base_url {
            config.base_url = url;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = LevelFilter::from_str(&cli.log_level)
        .map_err(|e| format!("invalid log level {:?}: {e}", cli.log_level))?;
    logger::init(level);

    let config = cli.into_config()?;
    info!(
        "Collecting {}..={} into {}",
        config.first_year,
        config.last_year,
        config.output_dir.display()
    );

    let user_agent = config.user_agent.clone();
    let timeout = config.wait_timeout();
    let launcher = move || Ok::<_, NavigatorError>(HttpNavigator::new(&user_agent, timeout));
    let mut pipeline = Pipeline::new(&config, launcher, CsvSink::new(&config.output_dir));

    let summary = pipeline.run(config.years());
    info!(
        "Done: {} records over {} years",
        summary.total_records(),
        summary.reports.len()
    );
    if !summary.failed.is_empty() {
        warn!("Years without output: {:?}", summary.failed_years());
    }
    Ok(())
}
