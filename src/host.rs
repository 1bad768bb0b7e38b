//! Headless host: drives an [`InventorySession`] from scripted input.

use anyhow::{Context, Result};
use slotgrid_core::{
    compute_display_state, Flow, FileStore, InventorySession, ItemCatalog, Notification,
    Presenter, RngSource, SampleAssignment, SessionOptions, SlotView,
};
use slotgrid_testkit::{HostEvent, JsonlSink};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::command_script::{CommandScriptPlayer, HostStep};
use crate::config::HostConfig;
use crate::input::Bindings;

/// Presenter that logs through `tracing` and keeps a virtual notification clock.
///
/// The clock only moves on `wait` steps. Expired notifications are dropped whenever
/// the clock advances or a new notification arrives.
pub struct ConsolePresenter {
    width: u32,
    clock: Duration,
    active: Vec<(String, Duration)>,
    sink: Option<JsonlSink>,
}

impl ConsolePresenter {
    pub fn new(width: u32, sink: Option<JsonlSink>) -> Self {
        Self {
            width,
            clock: Duration::ZERO,
            active: Vec::new(),
            sink,
        }
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        debug!(width, "viewport resized");
        self.width = width;
    }

    /// Advance the notification clock, dropping expired notifications.
    pub fn advance(&mut self, dt: Duration) {
        self.clock = self.clock.saturating_add(dt);
        self.prune_expired();
    }

    fn prune_expired(&mut self) {
        let now = self.clock;
        self.active.retain(|(_, expires_at)| *expires_at > now);
    }

    /// Messages still on screen, oldest first.
    pub fn active_notifications(&self) -> Vec<&str> {
        self.active.iter().map(|(message, _)| message.as_str()).collect()
    }

    fn record(&mut self, event: HostEvent) {
        if let Some(sink) = self.sink.as_mut() {
            if let Err(err) = sink.write(&event) {
                warn!("Disabling event log after write failure: {err:#}");
                self.sink = None;
            }
        }
    }
}

impl Presenter for ConsolePresenter {
    fn render(&mut self, index: usize, view: &SlotView) {
        debug!(
            slot = index,
            label = %view.label_text(),
            selected = view.selected,
            item = view.item_id.as_deref().unwrap_or("-"),
            "render"
        );
        self.record(HostEvent::Render {
            slot: index,
            view: view.clone(),
        });
    }

    fn notify(&mut self, notification: Notification) {
        info!("{}", notification.message);
        let expires_at = self.clock.saturating_add(notification.duration);
        self.active.push((notification.message.clone(), expires_at));
        self.prune_expired();
        self.record(HostEvent::Notify {
            message: notification.message,
            duration_ms: notification.duration.as_millis() as u64,
        });
    }

    fn focus(&mut self, cell: usize) {
        debug!(cell, "focus");
        self.record(HostEvent::Focus { cell });
    }

    fn viewport_width(&self) -> u32 {
        self.width
    }
}

type HostSession = InventorySession<ConsolePresenter, FileStore, RngSource>;

/// Outcome of a host run.
#[derive(Debug)]
pub struct RunSummary {
    pub steps: usize,
    pub failed_steps: usize,
    pub reloads: usize,
    pub exited: bool,
    pub selected_slot: usize,
    pub slots: Vec<SlotView>,
    pub notifications_on_screen: Vec<String>,
}

pub fn run(config: &HostConfig, script: Option<CommandScriptPlayer>) -> Result<RunSummary> {
    let catalog = match &config.catalog_path {
        Some(path) => ItemCatalog::from_path(path)
            .with_context(|| format!("failed to load item catalog {}", path.display()))?,
        None => ItemCatalog::builtin(),
    };
    let store = FileStore::new(&config.save_dir)
        .with_context(|| format!("failed to open save dir {}", config.save_dir.display()))?;
    let random = match config.seed {
        Some(seed) => RngSource::seeded(seed),
        None => RngSource::from_entropy(),
    };
    let sink = config
        .event_log
        .as_ref()
        .map(JsonlSink::create)
        .transpose()
        .context("failed to create event log")?;
    let presenter = ConsolePresenter::new(config.viewport_width, sink);
    let options = SessionOptions {
        notification_duration: config.notification_duration(),
        sample_fill: config.sample_fill.then(SampleAssignment::defaults),
    };
    let bindings = Bindings::from_config(config);

    let mut session = InventorySession::open(catalog, presenter, store, random, options.clone());
    let mut summary = RunSummary {
        steps: 0,
        failed_steps: 0,
        reloads: 0,
        exited: false,
        selected_slot: 0,
        slots: Vec::new(),
        notifications_on_screen: Vec::new(),
    };

    if let Some(mut script) = script {
        while let Some(step) = script.next_step() {
            summary.steps += 1;
            match apply_step(&mut session, &bindings, step) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Reload) => {
                    info!("reloading session from saved state");
                    summary.reloads += 1;
                    session = reopen(session, options.clone());
                }
                Ok(Flow::Exit) => {
                    info!("exit requested");
                    summary.exited = true;
                    break;
                }
                Err(err) => {
                    warn!("step {} failed: {err:#}", summary.steps);
                    summary.failed_steps += 1;
                }
            }
        }
    }

    summary.selected_slot = session.inventory().selected_slot();
    summary.slots = compute_display_state(session.inventory());
    summary.notifications_on_screen = session
        .presenter()
        .active_notifications()
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(summary)
}

fn apply_step(session: &mut HostSession, bindings: &Bindings, step: HostStep) -> Result<Flow> {
    let flow = match step {
        HostStep::Command(command) => session.dispatch(command)?,
        HostStep::Key(key) => match bindings.action_for_key(&key) {
            Some(action) => session.dispatch(action.command())?,
            None => {
                debug!(key = %key, "unbound key");
                Flow::Continue
            }
        },
        HostStep::Resize(width) => {
            session.presenter_mut().set_viewport_width(width);
            Flow::Continue
        }
        HostStep::Clear { confirmed } => {
            if confirmed {
                session.clear_all();
            } else {
                info!("clear cancelled");
            }
            Flow::Continue
        }
        HostStep::Wait(dt) => {
            session.presenter_mut().advance(dt);
            Flow::Continue
        }
    };
    Ok(flow)
}

fn reopen(session: HostSession, options: SessionOptions) -> HostSession {
    let (catalog, presenter, store, random) = session.into_parts();
    InventorySession::open(catalog, presenter, store, random, options)
}
