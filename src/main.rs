use ocrprobe::{
    cli::report,
    Config,
    HttpOcrClient,
    ImageSynthesizer,
    ProbeRunner,
    SearchDriver,
};

use clap::Parser;
use anyhow::Result;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ocrprobe")]
#[command(about = "Find the largest image an OCR web API accepts")]
struct Cli {
    /// Enable development mode (debug logging with source locations)
    #[arg(long)]
    dev: bool,

    /// Config file to use instead of the default search path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Skip the pause between successful requests
    #[arg(long)]
    no_pause: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.dev);

    let mut config = Config::load(cli.config.as_deref())?;
    if cli.no_pause {
        config.probe.pause_ms = 0;
    }

    if config.api.has_placeholder_credentials() {
        println!("⚠️  Placeholder credentials in use, set app_id and app_key in configs/ocrprobe.toml");
    }

    let client = HttpOcrClient::new(&config.api)?;
    let synth = ImageSynthesizer::new(&config.image);

    println!("🔍 Searching for the maximum image size accepted by {}", client.endpoint());
    println!("🔤 Font: {}", synth.face().describe());
    println!("🕒 Started: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!("{}", "=".repeat(60));

    let mut runner = ProbeRunner::new(synth, client, config.probe.jpeg_quality);
    let driver = SearchDriver::new(
        config.probe.sizes.clone(),
        config.probe.pause(),
        config.probe.safety_percent,
    );

    let search = driver.run(&mut runner);
    tracing::debug!("Search ended in state {:?} after {} probes", search.state, search.results.len());

    report::print_report(&search);

    Ok(())
}

fn setup_logging(dev_mode: bool) {
    if dev_mode {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_file(true)
            .with_line_number(true)
            .with_thread_ids(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }
}
