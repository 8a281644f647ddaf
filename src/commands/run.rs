use anyhow::{Context, Result};
use aprs_router::display::LogDisplay;
use aprs_router::queue_config::{FROM_MODEM_QUEUE_SIZE, TO_APRS_IS_QUEUE_SIZE, TO_MODEM_QUEUE_SIZE};
use aprs_router::{AprsMessage, RouterTask, SharedMessage, StationConfig, TaskQueue};
use std::path::Path;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use tracing::{Instrument, debug, error, info, warn};

/// Host harness around the router.
///
/// TNC2 lines on stdin stand in for the radio modem; egress packets are printed
/// to stdout prefixed with `RF>` or `IS>`. A tokio interval plays the role of
/// the cooperative scheduler and calls the router once per tick.
pub async fn handle_run(config_path: &Path, tick_ms: u64, metrics_port: Option<u16>) -> Result<()> {
    let config = StationConfig::load(config_path)
        .with_context(|| format!("Failed to load station configuration {:?}", config_path))?;

    info!(
        "Starting router for {} (APRS-IS gate: {}, digipeater: {}, RF beacon: {}, every {} min)",
        config.callsign,
        config.aprs_is.active,
        config.digi.active,
        config.digi.beacon,
        config.beacon.timeout_minutes
    );

    if let Some(port) = metrics_port {
        tokio::spawn(
            async move {
                if let Err(e) = aprs_router::metrics::start_metrics_server(port).await {
                    error!("Metrics server stopped: {:#}", e);
                }
            }
            .instrument(tracing::info_span!("metrics_server")),
        );
    }

    let from_modem: TaskQueue<SharedMessage> = TaskQueue::new("from_modem", FROM_MODEM_QUEUE_SIZE);
    let to_modem: TaskQueue<SharedMessage> = TaskQueue::new("to_modem", TO_MODEM_QUEUE_SIZE);
    let to_aprs_is: TaskQueue<SharedMessage> = TaskQueue::new("to_aprs_is", TO_APRS_IS_QUEUE_SIZE);

    let (eof_tx, eof_rx) = tokio::sync::oneshot::channel::<()>();
    let reader = tokio::spawn(
        read_modem_lines(from_modem.clone(), eof_tx).instrument(tracing::info_span!("modem_reader")),
    );
    let rf_printer = tokio::spawn(print_egress("RF", to_modem.clone()));
    let is_printer = tokio::spawn(print_egress("IS", to_aprs_is.clone()));

    let mut router = RouterTask::new(&config, from_modem.clone(), to_modem.clone(), to_aprs_is.clone());

    schedule_cycles(
        &mut router,
        &config,
        &from_modem,
        eof_rx,
        shutdown_signal(),
        Duration::from_millis(tick_ms.max(1)),
    )
    .await;

    reader.abort();
    rf_printer.abort();
    is_printer.abort();

    // anything the printers did not get to before the abort
    while let Some(packet) = to_modem.get_element() {
        println!("RF> {}", packet);
    }
    while let Some(packet) = to_aprs_is.get_element() {
        println!("IS> {}", packet);
    }

    Ok(())
}

/// Cooperative scheduler loop: one router cycle per tick.
///
/// Returns on `shutdown`, or once `input_done` has resolved and the inbound
/// queue is empty.
async fn schedule_cycles(
    router: &mut RouterTask,
    config: &StationConfig,
    from_modem: &TaskQueue<SharedMessage>,
    mut input_done: tokio::sync::oneshot::Receiver<()>,
    shutdown: impl Future<Output = ()>,
    tick: Duration,
) {
    let display = LogDisplay;

    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);

    let mut input_closed = false;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let report = router.run_cycle(config, &display, Instant::now());
                if report.received || report.beacon {
                    debug!("{:?} ({})", report, router.state_info());
                }
                if input_closed && from_modem.is_empty() {
                    info!("Modem input closed and drained, stopping router");
                    break;
                }
            }
            _ = &mut input_done, if !input_closed => {
                input_closed = true;
            }
            _ = &mut shutdown => {
                info!("Shutdown requested, stopping router");
                break;
            }
        }
    }
}

async fn read_modem_lines(from_modem: TaskQueue<SharedMessage>, eof_tx: tokio::sync::oneshot::Sender<()>) {
    match feed_modem_lines(BufReader::new(tokio::io::stdin()), &from_modem).await {
        Ok(count) => info!("Modem input reached end of stream after {} packets", count),
        Err(e) => error!("Failed to read modem input: {}", e),
    }

    let _ = eof_tx.send(());
}

/// Decode TNC2 lines into the inbound queue until end of stream.
///
/// Blank lines and `#` comments are ignored; undecodable lines are logged and
/// skipped. Returns the number of packets queued.
async fn feed_modem_lines<R>(reader: R, from_modem: &TaskQueue<SharedMessage>) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut queued = 0;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match line.parse::<AprsMessage>() {
            Ok(packet) => {
                if from_modem.add_element(packet.into_shared()) {
                    queued += 1;
                }
            }
            Err(e) => warn!("Skipping undecodable line {:?}: {}", line, e),
        }
    }

    Ok(queued)
}

async fn print_egress(prefix: &'static str, queue: TaskQueue<SharedMessage>) {
    while let Some(packet) = queue.recv_async().await {
        println!("{}> {}", prefix, packet);
    }
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT (Ctrl+C)"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!("Failed to register signal handlers: {}", e);
                std::future::pending::<()>().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for SIGINT signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
