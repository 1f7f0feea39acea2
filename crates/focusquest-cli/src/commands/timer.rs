use std::time::Duration;

use clap::Subcommand;
use focusquest_core::timer::to_time_string;
use focusquest_core::{Driver, Event, JsonFileStore, Mode, TimerState};

use crate::common::{print_json, save_timer, today, Session};
use crate::notify::TerminalNotifier;

type CliDriver = Driver<JsonFileStore, TerminalNotifier>;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Stop,
    /// Stop and rewind the current phase
    Reset,
    /// Discard counters and start a new session at a stopped work phase
    New,
    /// Print current timer state as JSON
    Status,
    /// Jump to a phase (stops the timer)
    Switch {
        /// Target phase: work or break
        mode: Mode,
    },
    /// Advance the timer by whole seconds without waiting
    Tick {
        /// Number of seconds to advance
        #[arg(long, default_value = "1")]
        count: u64,
    },
    /// Run the countdown in the foreground until Ctrl-C
    Run {
        /// Stop after this many seconds
        #[arg(long)]
        ticks: Option<u64>,
    },
}

pub fn run(
    action: TimerAction,
    config: focusquest_core::Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::open(config)?;
    let notifier = TerminalNotifier::new(
        session.config.notifications.enabled,
        session.config.notifications.bell,
    );
    let dir = session.dir;
    let mut state = session.state;
    if matches!(action, TimerAction::New) {
        state.timer = TimerState::new(session.config.timer_settings());
    }
    let mut driver = Driver::new(state, session.store, notifier);

    match action {
        TimerAction::Start => driver.start(),
        TimerAction::Stop => driver.stop(),
        TimerAction::Reset => driver.reset(),
        TimerAction::New | TimerAction::Status => {}
        TimerAction::Switch { mode } => driver.switch_mode(mode),
        TimerAction::Tick { count } => {
            let day = today();
            for _ in 0..count {
                for event in driver.tick(day) {
                    print_json(&event)?;
                }
            }
        }
        TimerAction::Run { ticks } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime.block_on(run_foreground(&mut driver, ticks))?;
        }
    }

    let timer = driver.state().timer;
    save_timer(&dir, &timer)?;
    print_json(&Event::snapshot(&timer))
}

/// `MM:SS status [elapsed%]` for the live display.
fn progress_line(timer: &TimerState) -> String {
    let elapsed = (1.0 - timer.remaining_ratio()) * 100.0;
    format!(
        "{} {} [{:>3.0}%]",
        to_time_string(timer.remaining_seconds),
        timer.status_text(),
        elapsed
    )
}

/// Tick once per second until `ticks` elapse or Ctrl-C arrives.
async fn run_foreground(
    driver: &mut CliDriver,
    ticks: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    driver.start();
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    // The first tick completes immediately.
    interval.tick().await;

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut elapsed = 0u64;
    while ticks.map_or(true, |limit| elapsed < limit) {
        tokio::select! {
            _ = interval.tick() => {
                for event in driver.tick(today()) {
                    println!("{}", serde_json::to_string(&event)?);
                }
                elapsed += 1;
                eprint!("\r{}   ", progress_line(&driver.state().timer));
            }
            result = &mut ctrl_c => {
                result?;
                tracing::info!("Interrupted after {} seconds", elapsed);
                break;
            }
        }
    }
    eprintln!();
    driver.stop();
    Ok(())
}
