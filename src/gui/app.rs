// src/gui/app.rs
use std::{
    error::Error,
    sync::{Arc, Mutex},
    time::Duration,
};

use eframe::egui;
use tokio_util::sync::CancellationToken;

use crate::{
    config::options::AppOptions,
    market::MemoryCache,
    poll::PollDriver,
    scrape::Collector,
    source::Upstream,
};

use super::sink::{GuiSink, Shared};

pub fn run(native: eframe::NativeOptions, opts: AppOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Bitcoin vs Gold",
        native,
        Box::new(move |cc| Ok(Box::new(App::new(cc, opts)))),
    )?;
    Ok(())
}

pub struct App {
    pub opts: AppOptions,
    // single source of truth for the view; the poll worker writes, we read
    pub shared: Arc<Mutex<Shared>>,
    cancel: CancellationToken,
}

impl App {
    pub fn new(cc: &eframe::CreationContext<'_>, opts: AppOptions) -> Self {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let cancel = CancellationToken::new();

        logf!(
            "Init: source={} url={} interval={:?} fallback={:?}",
            opts.source.kind, opts.source.url, opts.poll.interval, opts.fallback
        );
        spawn_worker(opts.clone(), Arc::clone(&shared), cancel.clone(), cc.egui_ctx.clone());

        Self { opts, shared, cancel }
    }

    /// Copy of the shared state; keeps the lock out of the drawing code.
    pub fn snapshot(&self) -> Shared {
        self.shared.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn stop(&self) {
        logf!("UI: Stop polling");
        self.cancel.cancel();
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let view = self.snapshot();

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            super::components::status_bar::draw(ui, self, &view);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            super::components::board::draw(ui, &view);
        });

        // keep "updated Ns ago" moving between cycles
        if view.running {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}

/// Poll loop on its own runtime thread so the UI thread never blocks on I/O.
fn spawn_worker(
    opts: AppOptions,
    shared: Arc<Mutex<Shared>>,
    cancel: CancellationToken,
    ctx: egui::Context,
) {
    std::thread::spawn(move || {
        let fail = |msg: String| {
            loge!("Init: {msg}");
            let mut s = shared.lock().unwrap_or_else(|e| e.into_inner());
            s.running = false;
            s.status = msg;
            ctx.request_repaint();
        };

        let rt = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => return fail(format!("Runtime failed to start: {e}")),
        };

        rt.block_on(async {
            let upstream = match Upstream::from_options(&opts.source) {
                Ok(u) => u,
                Err(e) => return fail(format!("Source setup failed: {e}")),
            };
            let cache = Arc::new(MemoryCache::new());
            let collector = Arc::new(Collector::new(upstream, cache, opts.fallback));

            let driver = PollDriver::new(collector, opts.poll.clone()).with_cancel(cancel);
            let mut sink = GuiSink::new(Arc::clone(&shared), ctx.clone());
            driver.run(&mut sink).await;
        });
    });
}
