use std::{
    convert::TryFrom,
    error::Error,
    path::PathBuf,
    time::{Duration, Instant},
};

use c8vm_base::{
    processor::{ControlEvent, Key, KeyState, Processor, ProcessorEvent},
    runner::RunnerConfig,
    scheduler::SchedulerConfig,
};
use clap::Parser;
use flume::RecvTimeoutError;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{self, fmt::format::FmtSpan, EnvFilter};

/// Parse a keypad key from a single hex digit, e.g. `a` or `0xA`.
fn parse_key(s: &str) -> Result<Key, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    let id = u8::from_str_radix(digits, 16).map_err(|error| format!("{}: {}", s, error))?;
    Key::try_from(id).map_err(|_| format!("{} is not a key of the hex keypad", s))
}

#[derive(Debug, Parser)]
#[clap(version, about)]
struct CliOpts {
    /// The path to the file containing the ROM.
    /// The file's contents will be loaded into the emulator's memory,
    /// starting at address 0x200.
    rom_file: PathBuf,
    /// Instructions executed per timer tick.
    #[clap(short, long, default_value_t = SchedulerConfig::DEFAULT_INSTRUCTIONS_PER_TICK)]
    instructions_per_tick: u32,
    /// Frequency of the delay and sound timers in Hz.
    #[clap(short, long, default_value_t = SchedulerConfig::DEFAULT_TIMER_FREQUENCY_HZ)]
    timer_hz: u32,
    /// Number of timer ticks to run for before printing the screen.
    #[clap(short, long, default_value_t = 600)]
    frames: u32,
    /// Seed for the random number generator, random if omitted.
    #[clap(short, long)]
    seed: Option<u64>,
    /// A key held down for the whole run, as a hex digit. May be repeated.
    #[clap(short = 'k', long = "hold-key", value_parser = parse_key)]
    hold_keys: Vec<Key>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli_opts = CliOpts::parse();

    tracing_subscriber::fmt()
        .pretty()
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let program = std::fs::read(&cli_opts.rom_file)?;
    let mut builder = Processor::builder().program(&program)?;
    if let Some(seed) = cli_opts.seed {
        builder = builder.rng_seed(seed);
    }
    let processor = builder.build();
    let mut screen = *processor.screen();

    let config = RunnerConfig {
        scheduler: SchedulerConfig {
            timer_frequency_hz: cli_opts.timer_hz,
            instructions_per_tick: cli_opts.instructions_per_tick,
        },
    };
    info!(
        rom_file = %cli_opts.rom_file.display(),
        instructions_per_second = config.scheduler.instructions_per_second(),
        "starting"
    );
    let (control, events, join_handle) = processor.start(config)?;

    for key in cli_opts.hold_keys {
        let event = ControlEvent::KeyStateChange {
            key,
            new_state: KeyState::Pressed,
        };
        if control.send(event).is_err() {
            warn!(?key, "processor stopped before the key could be pressed");
        }
    }

    let run_time = Duration::from_secs_f64(cli_opts.frames as f64 / cli_opts.timer_hz as f64);
    let deadline = Instant::now() + run_time;

    loop {
        match events.recv_deadline(deadline) {
            Ok(ProcessorEvent::ScreenUpdate { new_screen }) => screen = new_screen,
            Ok(ProcessorEvent::ScreenCleared) => debug!("screen cleared"),
            // No audio device, the tone is only logged.
            Ok(ProcessorEvent::StartPlayingSound) => info!("tone on"),
            Ok(ProcessorEvent::StopPlayingSound) => info!("tone off"),
            Ok(ProcessorEvent::WaitForKeyPress) => info!("waiting for a key press"),
            Ok(ProcessorEvent::ErrorEncountered { error }) => {
                error!(%error, "processor stopped");
                break;
            }
            Err(RecvTimeoutError::Timeout) => break,
            Err(RecvTimeoutError::Disconnected) => {
                warn!("processor event sender dropped");
                break;
            }
        }
    }

    drop(control);
    let result = join_handle
        .join()
        .map_err(|_| "processor thread panicked")?;

    println!("{:#?}", screen);

    Ok(result?)
}
