use anyhow::Result;
use chatsweep_runtime::{AppEvent, EventReceiver};
use is_terminal::IsTerminal;
use std::future::Future;

/// Drive a batch on a current-thread runtime while a second task prints its
/// progress to stderr.
///
/// The printer stops once every event sender is gone, so `batch` must own
/// (and drop) the workbench that holds them.
pub fn run_batch<T>(json: bool, events: EventReceiver, batch: impl Future<Output = T>) -> Result<T> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let value = runtime.block_on(async move {
        let printer = tokio::spawn(print_progress(events, json));
        let value = batch.await;
        if let Err(err) = printer.await {
            tracing::debug!(error = %err, "progress printer ended abnormally");
        }
        value
    });

    Ok(value)
}

async fn print_progress(mut events: EventReceiver, json: bool) {
    // Keep stderr quiet for machine-readable runs.
    if json {
        while events.recv().await.is_some() {}
        return;
    }

    let inline = std::io::stderr().is_terminal();
    while let Some(event) = events.recv().await {
        match event {
            AppEvent::DeleteStarted { total } => eprintln!("Deleting {} item(s)...", total),
            AppEvent::Progress(p) if inline => {
                eprint!("\r\x1b[2K[{}/{}] {}", p.current, p.total, p.label)
            }
            AppEvent::Progress(p) => eprintln!("[{}/{}] {}", p.current, p.total, p.label),
            AppEvent::DeleteFinished(_) if inline => eprintln!(),
            _ => {}
        }
    }
}
