mod config;
mod cycle;
mod error;
mod filter;
mod models;
mod output;
mod presentation;
mod registry;
mod utils;
mod wifi;

use log::{debug, error, info};
use time::OffsetDateTime;
use tokio::time::sleep;

use config::PresenceConfig;
use cycle::ScanCycle;
use models::CycleResult;
use output::{ConsoleDisplay, IndicatorDriver, LogIndicators, Outputs, SysfsLeds};
use presentation::{render, strength_report};
use utils::format_datetime;
use wifi::{IwScanner, ScanProvider};

/// Build the output peripherals enabled in `config`
fn build_outputs(config: &PresenceConfig) -> Outputs {
    let indicators = config.indicators_enabled.then(|| {
        let driver: Box<dyn IndicatorDriver> = if config.indicator_leds.is_empty() {
            info!(
                "No INDICATOR_LEDS configured, logging {} indicator slots",
                config.indicator_capacity
            );
            Box::new(LogIndicators::new(config.indicator_capacity))
        } else {
            Box::new(SysfsLeds::new(&config.indicator_leds))
        };
        driver
    });

    let display = config.display_enabled.then(|| {
        Box::new(ConsoleDisplay::stdout(config.display_width)) as Box<dyn output::DisplayDriver>
    });

    Outputs {
        indicators,
        display,
    }
}

/// Run one scan cycle and push the result to the outputs.
///
/// Returns `None` when the scan itself failed; the outputs keep showing the
/// previous result in that case.
async fn run_once<P: ScanProvider>(
    cycle: &mut ScanCycle<P>,
    config: &PresenceConfig,
    outputs: &mut Outputs,
) -> Option<CycleResult> {
    let num_devices = match cycle.run(&config.mac_filter).await {
        Ok(count) => count,
        Err(e) => {
            error!("Scan failed: {}", e);
            return None;
        }
    };

    info!(
        "Counted {} devices. {} known in total.",
        num_devices,
        cycle.registry().size()
    );

    let strengths = strength_report(cycle.registry());
    for line in &strengths {
        debug!("  {}", line);
    }

    let plan = render(num_devices, outputs.capacity());
    let extra_lines = if config.show_strengths {
        strengths
    } else {
        Vec::new()
    };
    outputs.dispatch(&plan, &extra_lines);

    Some(num_devices)
}

async fn main_loop(
    config: &PresenceConfig,
    outputs: &mut Outputs,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting WiFi presence counter");

    let mut cycle = ScanCycle::new(IwScanner::new(config.interface.as_str()));

    loop {
        debug!(
            "Starting scan cycle at: {}",
            format_datetime(&OffsetDateTime::now_utc())
        );

        run_once(&mut cycle, config, outputs).await;

        sleep(config.scan_interval).await;
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_secs()
        .init();

    // Load configuration
    let config = match PresenceConfig::new() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let mut outputs = build_outputs(&config);
    outputs.init();

    // Run main loop or wait for shutdown signal
    tokio::select! {
        result = main_loop(&config, &mut outputs) => {
            match result {
                Ok(_) => info!("Program completed successfully"),
                Err(e) => error!("Fatal error: {}", e),
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Program terminated by user. Exiting gracefully.");
        }
    }

    outputs.all_off();

    Ok(())
}
