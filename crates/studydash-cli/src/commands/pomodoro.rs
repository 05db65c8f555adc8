use std::io::{self, Write};
use std::time::Instant;

use studydash_core::{Config, PomodoroEngine, PomodoroMode};

use crate::bell;

pub fn run(mode: PomodoroMode, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    runtime.block_on(countdown(mode, config))
}

/// Count one session down, redrawing the line every second.
async fn countdown(mode: PomodoroMode, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let mut alerts = bell::alert_sink(config);
    let mut engine = PomodoroEngine::new();
    engine.select_mode(mode);
    engine.start(Instant::now());

    let mut stdout = io::stdout();
    println!("{}", mode.button_label());
    loop {
        write!(stdout, "\r  {}  {}", engine.display(), engine.status_text())?;
        stdout.flush()?;

        if !engine.is_running() {
            break;
        }
        engine.wait().await;

        if let Some(event) = engine.poll(Instant::now()) {
            writeln!(stdout, "\r  {}  {:<20}", engine.display(), "")?;
            if let Some(description) = event.ring_description() {
                alerts.notify(description);
                println!("{description}");
            }
            break;
        }
    }
    Ok(())
}
