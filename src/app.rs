use std::sync::mpsc::{channel, Receiver};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::thread;

use eframe::egui;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::core::processor::{run_split, RunConfig, RunProgressMessage};
use crate::core::stats::RunStatistics;
use crate::core::tagging::FinderTagger;
use crate::state::Settings;
use crate::ui;

/// Lifecycle of the current (or most recent) distribution run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RunStatus {
    #[default]
    Idle,
    Running,
    Complete,
    Cancelled,
    Failed(String),
}

pub struct SplitImgApp {
    pub config: AppConfig,
    pub settings: Settings,
    pub designer_input: String,
    pub status: RunStatus,
    pub scan_count: usize,
    pub processed: usize,
    pub total: usize,
    pub stats: Option<RunStatistics>,
    progress_receiver: Option<Receiver<RunProgressMessage>>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl SplitImgApp {
    pub fn new() -> Self {
        let settings = Settings::load();
        Self {
            config: AppConfig::default(),
            designer_input: settings.last_num_designers.to_string(),
            settings,
            status: RunStatus::default(),
            scan_count: 0,
            processed: 0,
            total: 0,
            stats: None,
            progress_receiver: None,
            cancel_flag: None,
        }
    }

    pub fn is_processing(&self) -> bool {
        self.status == RunStatus::Running
    }

    /// Designer count from the input field, if it is within the product
    /// bound. The engine accepts any positive count; this boundary enforces
    /// 1..=max_designers.
    pub fn parsed_designer_count(&self) -> Option<usize> {
        self.designer_input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=self.config.max_designers).contains(n))
    }

    /// Ask for the source folder and launch the pipeline on a background
    /// thread.
    pub fn start_run(&mut self) {
        let num_designers = match self.parsed_designer_count() {
            Some(n) => n,
            None => return,
        };

        let mut dialog = rfd::FileDialog::new().set_title("Select Image Folder");
        if let Some(last) = &self.settings.last_source_folder {
            dialog = dialog.set_directory(last);
        }
        let source_folder = match dialog.pick_folder() {
            Some(folder) => folder,
            None => return,
        };

        self.settings.last_source_folder = Some(source_folder.clone());
        self.settings.last_num_designers = num_designers;
        self.settings.save();

        let run_config = RunConfig {
            source_folder,
            num_designers,
            background_policy: self.settings.background_policy,
            partition_strategy: self.settings.partition_strategy,
            recursive_scan: self.settings.recursive_scan,
        };

        info!(
            "Launching split: {:?} across {} designers",
            run_config.source_folder, run_config.num_designers
        );

        let (tx, rx) = channel::<RunProgressMessage>();
        let cancel_flag = Arc::new(AtomicBool::new(false));

        self.progress_receiver = Some(rx);
        self.cancel_flag = Some(cancel_flag.clone());
        self.status = RunStatus::Running;
        self.scan_count = 0;
        self.processed = 0;
        self.total = 0;
        self.stats = None;

        thread::spawn(move || {
            let tagger = FinderTagger;
            if let Err(e) = run_split(&run_config, &tagger, Some(tx), Some(cancel_flag)) {
                warn!("Run aborted: {}", e);
            }
        });
    }

    pub fn cancel_run(&mut self) {
        info!("User requested run cancellation");
        if let Some(flag) = &self.cancel_flag {
            flag.store(true, Ordering::Relaxed);
        }
    }

    fn poll_progress(&mut self) {
        let mut finished = false;

        if let Some(receiver) = &self.progress_receiver {
            while let Ok(message) = receiver.try_recv() {
                match message {
                    RunProgressMessage::Scanned { found, stats } => {
                        self.scan_count = found;
                        self.stats = Some(stats);
                    }
                    RunProgressMessage::Progress {
                        processed,
                        total,
                        stats,
                    } => {
                        self.processed = processed;
                        self.total = total;
                        self.stats = Some(stats);
                    }
                    RunProgressMessage::Complete { stats } => {
                        self.processed = stats.processed();
                        self.total = stats.total_images;
                        self.stats = Some(stats);
                        self.status = RunStatus::Complete;
                        finished = true;
                    }
                    RunProgressMessage::Cancelled { stats } => {
                        self.processed = stats.processed();
                        self.stats = Some(stats);
                        self.status = RunStatus::Cancelled;
                        finished = true;
                    }
                    RunProgressMessage::Error(message) => {
                        self.status = RunStatus::Failed(message);
                        finished = true;
                    }
                }
            }
        }

        if finished {
            self.progress_receiver = None;
            self.cancel_flag = None;
        }
    }
}

impl eframe::App for SplitImgApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_progress();

        ui::render_top_panel(self, ctx);
        ui::render_bottom_panel(self, ctx);
        ui::render_central_panel(self, ctx);

        if self.is_processing() {
            ctx.request_repaint();
        }
    }
}
