use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use clap::Parser;
use crate::config::Config;
use crate::display::PngFileDisplay;
use crate::rendering::PanelRenderer;
use crate::sources::aircraft_source::AircraftSource;
use crate::sources::httpclient::{HttpClient, ReqwestClient};
use crate::sources::logos::LogoResolver;
use crate::sources::routes::RouteEnricher;
use crate::tracker::clock::{Clock, SystemClock};
use crate::tracker::display_loop::{DisplayLoop, Sources};

mod config;
mod data;
mod display;
mod errors;
mod geo;
mod logging;
mod rendering;
mod sources;
mod tracker;

#[cfg(test)]
mod testing;

/// Shows the nearest aircraft around a rotating set of metro areas on a fixed-size panel
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// RON configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("logging unavailable: {}", e);
    }

    let config = match Config::load(&args.config) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid configuration: {}", e);
            return ExitCode::from(2);
        }
    };

    let display_loop = match build_loop(&config) {
        Ok(display_loop) => display_loop,
        Err(e) => {
            tracing::error!("cannot start: {}", e);
            return ExitCode::from(2);
        }
    };

    let shutdown = Arc::new(AtomicBool::new(false));
    let handler_flag = shutdown.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::SeqCst)) {
        tracing::warn!("interrupt handler not installed: {}", e);
    }

    run(display_loop, &shutdown)
}

fn build_loop(config: &Config) -> Result<DisplayLoop, failure::Error> {
    let http: Rc<dyn HttpClient> = Rc::new(ReqwestClient::new(config.http_timeout(), &config.api.user_agent)?);
    let sources = config.source_provider();
    let clock: Rc<dyn Clock> = Rc::new(SystemClock);

    let (width, height) = (config.display.width, config.display.height);
    tracing::info!(output = %config.display.output.display(), width, height, portrait = config.display.portrait, "panel configured");

    let display_loop = DisplayLoop::new(
        config.locations()?,
        config.home,
        config.schedule(),
        Sources {
            aircraft: AircraftSource::new(http.clone(), sources.clone()),
            routes: RouteEnricher::new(http.clone(), sources.clone()),
            logos: LogoResolver::new(http, sources, &config.logo_domains)
        },
        PanelRenderer::new(width, height, config.display.portrait),
        Box::new(PngFileDisplay::new(&config.display.output, width, height)),
        clock)?;

    Ok(display_loop)
}

fn run(mut display_loop: DisplayLoop, shutdown: &AtomicBool) -> ExitCode {
    match display_loop.run(shutdown) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(location = display_loop.current_location().name(), "display loop failed: {}", e);
            ExitCode::from(1)
        }
    }
}
