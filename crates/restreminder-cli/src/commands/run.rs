//! Foreground host loop for the interval engine.
//!
//! One task owns the engine and processes ticks and manual commands in
//! arrival order, so `reminder_fired` and phase transitions always see a
//! single ordered timeline. Collaborator failures (notification
//! delivery, hook commands) are logged to stderr and never interrupt the
//! tick stream.

use std::io::{BufRead, Write};
use std::process::Stdio;

use clap::Args;
use notify_rust::Notification;
use restreminder_core::{Config, Effect, IntervalEngine, Phase};
use tokio::sync::mpsc;
use tokio::time::{interval, Duration, MissedTickBehavior};

#[derive(Args)]
pub struct RunArgs {
    /// Exit after this many ticks (runs until interrupted by default)
    #[arg(long)]
    ticks: Option<u64>,
    /// Tick period in milliseconds. The engine still counts each tick as
    /// one second; shorten this only for scripting and tests.
    #[arg(long, default_value = "1000")]
    tick_ms: u64,
    /// Suppress the once-per-second status line
    #[arg(long)]
    quiet: bool,
}

/// Manual override commands, from stdin or from a notification action.
enum EngineCommand {
    Rest,
    Reset,
    Status,
    Quit,
}

enum LockEdge {
    Locked,
    Unlocked,
}

/// Edge detector over the configured lock probe command.
struct LockWatch {
    locked: bool,
}

impl LockWatch {
    fn new() -> Self {
        Self { locked: false }
    }

    /// Run the probe (exit status 0 = locked) and report a transition,
    /// if any. Probe failures count as unlocked.
    fn poll(&mut self, probe_command: Option<&str>) -> Option<LockEdge> {
        let probe = probe_command?.trim();
        if probe.is_empty() {
            return None;
        }

        let locked = match std::process::Command::new("sh")
            .arg("-c")
            .arg(probe)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                eprintln!("lock probe failed to run: {e}");
                false
            }
        };

        if locked == self.locked {
            return None;
        }
        self.locked = locked;
        Some(if locked {
            LockEdge::Locked
        } else {
            LockEdge::Unlocked
        })
    }
}

pub async fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    let mut engine = IntervalEngine::new(&config.intervals());

    let (tx, mut rx) = mpsc::unbounded_channel::<EngineCommand>();
    spawn_stdin_reader(tx.clone());

    let mut lock_watch = LockWatch::new();
    let mut ticker = interval(Duration::from_millis(args.tick_ms.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick fires immediately; skip it so tick #1
    // lands one period after startup.
    ticker.tick().await;

    let mut ticks_done: u64 = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Re-read so settings edits apply without a restart.
                config = Config::load_or_default();
                let cfg = config.intervals();

                // Probe before ticking so an unlock reset lands ahead of
                // this second's tick.
                match lock_watch.poll(config.lock_watch.probe_command.as_deref()) {
                    Some(LockEdge::Locked) => engine.on_screen_locked(),
                    Some(LockEdge::Unlocked) => {
                        let effect = engine.on_screen_unlocked(&cfg);
                        dispatch(&effect, &config, &tx);
                    }
                    None => {}
                }

                for effect in engine.tick(&cfg) {
                    dispatch(&effect, &config, &tx);
                }

                if !args.quiet {
                    print_status_line(&engine);
                }

                ticks_done += 1;
                if let Some(limit) = args.ticks {
                    if ticks_done >= limit {
                        break;
                    }
                }
            }
            cmd = rx.recv() => {
                let Some(cmd) = cmd else { break };
                let cfg = config.intervals();
                match cmd {
                    EngineCommand::Rest => {
                        let effect = engine.start_rest(&cfg);
                        dispatch(&effect, &config, &tx);
                    }
                    EngineCommand::Reset => {
                        let effect = engine.reset(&cfg);
                        dispatch(&effect, &config, &tx);
                    }
                    EngineCommand::Status => {
                        println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
                    }
                    EngineCommand::Quit => break,
                }
            }
        }
    }

    if !args.quiet {
        println!();
    }
    Ok(())
}

/// Read manual commands from stdin on a blocking thread and feed them
/// into the engine's command channel.
fn spawn_stdin_reader(tx: mpsc::UnboundedSender<EngineCommand>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            let cmd = match line.trim() {
                "rest" => EngineCommand::Rest,
                "reset" => EngineCommand::Reset,
                "status" => EngineCommand::Status,
                "quit" | "q" => EngineCommand::Quit,
                "" => continue,
                other => {
                    eprintln!("unknown command: {other} (rest, reset, status, quit)");
                    continue;
                }
            };
            if tx.send(cmd).is_err() {
                break;
            }
        }
    });
}

/// Deliver one effect to the collaborator that owns it.
fn dispatch(effect: &Effect, config: &Config, tx: &mpsc::UnboundedSender<EngineCommand>) {
    match effect {
        Effect::SendReminder { minutes_left, .. } => {
            send_reminder(*minutes_left, config, tx.clone());
        }
        Effect::EnterRest { .. } => {
            run_hook("overlay.enter_command", config.overlay.enter_command.as_deref());
        }
        Effect::ExitRest { .. } => {
            run_hook("overlay.exit_command", config.overlay.exit_command.as_deref());
        }
        Effect::RestComplete { .. } => {
            run_hook(
                "overlay.enforce_command",
                config.overlay.enforce_command.as_deref(),
            );
        }
    }
}

/// Fire the pre-break notification with a "Rest now" action wired back
/// into the engine's command channel. Fire-and-forget: delivery failure
/// is logged and never retried.
fn send_reminder(minutes_left: u64, config: &Config, tx: mpsc::UnboundedSender<EngineCommand>) {
    if !config.notifications.enabled {
        return;
    }

    tokio::task::spawn_blocking(move || {
        let shown = Notification::new()
            .summary("Almost at your work limit")
            .body(&format!(
                "{minutes_left} minutes left, save your work and get ready to rest"
            ))
            .action("rest-now", "Rest now")
            .show();

        match shown {
            Ok(handle) => {
                #[cfg(all(unix, not(target_os = "macos")))]
                handle.wait_for_action(|action| {
                    if action == "rest-now" {
                        let _ = tx.send(EngineCommand::Rest);
                    }
                });
                #[cfg(not(all(unix, not(target_os = "macos"))))]
                let _ = (handle, tx);
            }
            Err(e) => eprintln!("reminder delivery failed: {e}"),
        }
    });
}

/// Run a configured hook command, detached. An unset or blank command is
/// a no-op.
fn run_hook(name: &str, command: Option<&str>) {
    let Some(command) = command.map(str::trim).filter(|c| !c.is_empty()) else {
        return;
    };

    match std::process::Command::new("sh").arg("-c").arg(command).spawn() {
        Ok(mut child) => {
            // Reap the child off the engine timeline.
            std::thread::spawn(move || {
                let _ = child.wait();
            });
        }
        Err(e) => eprintln!("{name} failed to start: {e}"),
    }
}

/// Menu-bar-title analog: one line, phase glyph plus remaining time.
fn print_status_line(engine: &IntervalEngine) {
    let glyph = match engine.phase() {
        Phase::Working => "\u{1f4bc}",
        Phase::Resting => "\u{2615}",
    };
    let remaining = engine.remaining_seconds();
    print!("\r{glyph} {:02}:{:02} ", remaining / 60, remaining % 60);
    let _ = std::io::stdout().flush();
}
