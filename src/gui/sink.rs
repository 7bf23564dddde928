// src/gui/sink.rs
use std::{sync::{Arc, Mutex}, time::Instant};

use eframe::egui;

use crate::{
    format::{Dashboard, Freshness},
    poll::{Sink, StopReason},
};

/// What the poll worker shares with the UI thread.
#[derive(Clone, Debug)]
pub struct Shared {
    pub board: Dashboard,
    pub status: String,
    pub running: bool,
    pub fetching: bool,
    pub cycles: u64,
    pub last_update: Option<Instant>,
}

impl Default for Shared {
    fn default() -> Self {
        Self {
            board: Dashboard::default(),
            status: s!("Starting…"),
            running: true,
            fetching: false,
            cycles: 0,
            last_update: None,
        }
    }
}

pub struct GuiSink {
    shared: Arc<Mutex<Shared>>,
    ctx: egui::Context,
}

impl GuiSink {
    pub fn new(shared: Arc<Mutex<Shared>>, ctx: egui::Context) -> Self {
        Self { shared, ctx }
    }

    fn update(&self, f: impl FnOnce(&mut Shared)) {
        {
            let mut s = self.shared.lock().unwrap_or_else(|e| e.into_inner());
            f(&mut s);
        }
        self.ctx.request_repaint();
    }
}

impl Sink for GuiSink {
    fn cycle_started(&mut self, n: u64) {
        self.update(|s| {
            s.fetching = true;
            s.cycles = n;
            s.status = format!("Fetching (cycle {n})…");
        });
    }

    fn show(&mut self, board: &Dashboard) {
        let status = status_line(board);
        self.update(|s| {
            s.board = board.clone();
            s.fetching = false;
            s.last_update = Some(Instant::now());
            s.status = status;
        });
    }

    fn finish(&mut self, reason: StopReason) {
        self.update(|s| {
            s.running = false;
            s.fetching = false;
            s.status = match reason {
                StopReason::Overtaken => s!("Stopped: bitcoin has overtaken gold"),
                StopReason::Cancelled => s!("Stopped"),
                StopReason::MaxCycles => format!("Stopped after {} cycle(s)", s.cycles),
            };
        });
    }
}

pub fn status_line(board: &Dashboard) -> String {
    let note = board.note.as_deref().unwrap_or("unknown error");
    match board.freshness {
        Freshness::Pending => s!("Waiting for first update"),
        Freshness::Fresh => s!("Up to date"),
        Freshness::Cached => format!("Showing cached values: {note}"),
        Freshness::Partial => format!("Incomplete data: {note}"),
        Freshness::Failed => format!("Fetch failed: {note}"),
    }
}
