use anyhow::Result;
use clap::Parser;
use console::style;
use log::{error, info};
use random_frame_bot::component::frame_poster::{FfmpegMedia, Guessit, PosterSettings};
use random_frame_bot::component::{BlueskyClient, FramePoster, Scheduler};
use random_frame_bot::config::{Config, RunMode};
use random_frame_bot::init;
use random_frame_bot::signal::setup_shutdown_signal;
use random_frame_bot::tools::DirectoryList;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(
    name = "random_frame_bot",
    version,
    about = "Post a random frame from a random video to Bluesky"
)]
struct Cli {
    /// Text file listing candidate video directories, one per line
    #[arg(value_name = "DIRECTORIES_FILE")]
    directories_file: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;
    init::init(config.log_file.as_deref())?;

    let Some(directories_file) = cli.directories_file else {
        anyhow::bail!("Please provide a text file with directory paths as the first argument.");
    };
    let directories = DirectoryList::load(&directories_file)?;

    let poster = FramePoster::new(
        PosterSettings::from(&config),
        FfmpegMedia::new(&config.tools),
        Guessit::new(&config.tools),
        BlueskyClient::new(&config.service_url),
    );

    match &config.mode {
        RunMode::OneShot => {
            let report = poster.run(&directories)?;
            info!("Posted {} from {}", report.post.uri, report.video.display());
        }
        RunMode::Recurring { cron } => {
            let scheduler = Scheduler::new(cron, setup_shutdown_signal()?)?;
            scheduler.run(move || match poster.run(&directories) {
                Ok(report) => {
                    info!("Posted {} from {}", report.post.uri, report.video.display());
                }
                Err(e) => error!("An error occurred: {:#}", anyhow::Error::new(e)),
            });
        }
    }

    info!("Program exited normally");
    Ok(())
}
