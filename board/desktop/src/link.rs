use std::{
    future::Future,
    sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard},
    thread::JoinHandle,
    time::Duration,
};

use anyhow::{anyhow, bail, Context};
use log::{debug, info, warn};
use remote::{Calibration, Command, ControlState, FlightMode, Panel, Telemetry};
use reqwest::Url;
use tokio::{
    sync::mpsc,
    time::{interval_at, Instant, Interval, MissedTickBehavior},
};

use crate::config::Config;

/// GET requests to the vehicle
pub trait Transport: Clone + Send + Sync + 'static {
    /// Resolves to the response body. Connection errors and non-success
    /// statuses are errors.
    fn get(&self, path: String) -> impl Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> anyhow::Result<Self> {
        // no timeout, a request lives until the vehicle answers or the connection drops
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, base_url })
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: String) -> impl Future<Output = anyhow::Result<String>> + Send {
        let client = self.client.clone();
        let url = self.base_url.join(&path);
        async move {
            let url = url.with_context(|| format!("Invalid endpoint {path}"))?;
            let res = client.get(url).send().await?;

            if res.status().is_success() {
                Ok(res.text().await?)
            } else {
                Err(anyhow!("Request to {} failed: {:?}", path, res.status()))
            }
        }
    }
}

enum LinkCommand {
    Send(Command),
    Calibrate(Calibration),
    Stop,
}

pub(crate) fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

pub(crate) fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

struct LinkWorker<T> {
    transport: T,
    controls: Arc<RwLock<ControlState>>,
    panel: Arc<RwLock<Panel>>,
    control_interval: Duration,
    telemetry_interval: Duration,
}

impl<T: Transport> LinkWorker<T> {
    fn run(self, to_worker_rx: mpsc::UnboundedReceiver<LinkCommand>) -> anyhow::Result<JoinHandle<()>> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build link runtime")?;

        std::thread::Builder::new()
            .name("link".to_string())
            .spawn(move || runtime.block_on(self.serve(to_worker_rx)))
            .context("Failed to spawn link worker")
    }

    async fn serve(self, mut to_worker_rx: mpsc::UnboundedReceiver<LinkCommand>) {
        let mut control_tick = ticker(self.control_interval);
        let mut telemetry_tick = ticker(self.telemetry_interval);

        loop {
            tokio::select! {
                _ = control_tick.tick() => self.send_controls(),
                _ = telemetry_tick.tick() => self.poll_telemetry(),
                command = to_worker_rx.recv() => match command {
                    Some(LinkCommand::Send(command)) => self.dispatch(command),
                    Some(LinkCommand::Calibrate(calibration)) => self.calibrate(calibration),
                    Some(LinkCommand::Stop) | None => break,
                },
            }
        }
        info!("Link worker stopped");
    }

    fn send_controls(&self) {
        let controls = *read(&self.controls);
        self.dispatch(Command::Control(controls));
    }

    // Every request is its own task: nothing waits for an answer and a slow
    // vehicle never delays the next tick.
    fn dispatch(&self, command: Command) {
        let transport = self.transport.clone();
        tokio::spawn(async move {
            if let Err(e) = transport.get(command.path()).await {
                debug!("Dropped {}: {:?}", command, e);
            }
        });
    }

    fn poll_telemetry(&self) {
        let transport = self.transport.clone();
        let panel = self.panel.clone();
        tokio::spawn(async move {
            let report = transport
                .get(Command::Telemetry.path())
                .await
                .and_then(|body| Ok(Telemetry::from_json(&body)?));
            let telemetry = match report {
                Ok(telemetry) => telemetry,
                Err(e) => {
                    debug!("Dropped telemetry: {:?}", e);
                    return;
                }
            };

            let disarmed = write(&panel).apply_telemetry(&telemetry);
            if disarmed {
                warn!("Vehicle reports disarmed, clearing local arm state");
            }
        });
    }

    fn calibrate(&self, calibration: Calibration) {
        let transport = self.transport.clone();
        let panel = self.panel.clone();
        tokio::spawn(async move {
            let succeeded = match transport.get(Command::Calibrate.path()).await {
                Ok(_) => true,
                Err(e) => {
                    warn!("Calibration failed: {:?}", e);
                    false
                }
            };
            let notice = write(&panel).finish_calibration(calibration, succeeded);
            info!("{}", notice.message());
        });
    }
}

// First tick one period after start, late ticks are skipped rather than bunched up
fn ticker(period: Duration) -> Interval {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    ticker
}

/// Connection to the vehicle.
///
/// Owns the shared control and panel state. A worker thread pushes the
/// controls and polls telemetry at fixed rates; user actions update the panel
/// right away and queue their request to the worker.
#[derive(Default)]
pub struct Link {
    controls: Arc<RwLock<ControlState>>,
    panel: Arc<RwLock<Panel>>,
    to_worker_tx: Option<mpsc::UnboundedSender<LinkCommand>>,
    worker_thread: Option<JoinHandle<()>>,
}

impl Link {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &RwLock<ControlState> {
        &self.controls
    }

    pub fn panel(&self) -> &RwLock<Panel> {
        &self.panel
    }

    pub fn start<T: Transport>(&mut self, transport: T, config: &Config) -> anyhow::Result<()> {
        if self.worker_thread.is_some() {
            bail!("Link already started");
        }

        let (to_worker_tx, to_worker_rx) = mpsc::unbounded_channel();
        let worker = LinkWorker {
            transport,
            controls: self.controls.clone(),
            panel: self.panel.clone(),
            control_interval: config.control_interval,
            telemetry_interval: config.telemetry_interval,
        };
        self.worker_thread = Some(worker.run(to_worker_rx)?);
        self.to_worker_tx = Some(to_worker_tx);
        Ok(())
    }

    /// Start the link and put the vehicle in MANUAL, the mode the display
    /// starts in.
    pub fn connect<T: Transport>(&mut self, transport: T, config: &Config) -> anyhow::Result<()> {
        self.start(transport, config)?;
        self.select_mode(FlightMode::Manual);
        Ok(())
    }

    pub fn toggle_arm(&self) {
        let command = write(&self.panel).toggle_arm();
        info!("{}", if command == Command::Arm { "Arming" } else { "Disarming" });
        self.send(LinkCommand::Send(command));
    }

    pub fn select_mode(&self, mode: FlightMode) {
        let command = write(&self.panel).select_mode(mode);
        info!("Flight mode {}", mode);
        self.send(LinkCommand::Send(command));
    }

    /// Start a calibration. The user must have confirmed the prompt already.
    pub fn calibrate(&self) {
        let (_, calibration) = write(&self.panel).begin_calibration();
        info!("Calibrating");
        self.send(LinkCommand::Calibrate(calibration));
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.to_worker_tx.take() {
            let _ = tx.send(LinkCommand::Stop);
        }
        if let Some(handle) = self.worker_thread.take() {
            if handle.join().is_err() {
                warn!("Link worker panicked");
            }
        }
    }

    fn send(&self, command: LinkCommand) {
        let Some(tx) = &self.to_worker_tx else {
            debug!("Link not started, request dropped");
            return;
        };
        if tx.send(command).is_err() {
            debug!("Link worker gone, request dropped");
        }
    }
}

impl Drop for Link {
    fn drop(&mut self) {
        self.stop();
    }
}
