#![cfg(feature = "egui")]

use eframe::egui;

use crate::config::DisplayConfig;
use crate::model::Dataset;
use crate::view::{ViewController, Viewport};

/// Storage key for the one persisted flag: whether the first-run guide has
/// been completed once.
const GUIDE_COMPLETED_KEY: &str = "mandalaviz_guide_completed";

/// Named audio cues the UI wants played. Playback itself is an external
/// collaborator's concern; the adapter only queues cue names per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCue {
    Click,
    Zoom,
    Open,
    Close,
}

/// Initialization outcome. A load failure replaces the whole UI with one
/// error panel; no partial rendering, no retry (the user reloads).
#[derive(Debug, Clone)]
pub enum LoadState {
    /// Splash overlay; `shown_since_ms` is set on the first rendered frame so
    /// the minimum display duration is joined with data readiness.
    Loading { shown_since_ms: Option<f64> },
    Ready,
    Failed { message: String },
}

/// The verse detail dialog, keyed by the verse's stable `original_index`.
#[derive(Debug, Clone)]
pub struct VerseDialog {
    pub index: usize,
    pub open: bool,
}

/// First-run onboarding guide: a fixed sequence of steps walked with
/// back/next/skip, shown automatically until completed once.
#[derive(Debug, Clone)]
pub struct GuideState {
    pub step: usize,
    pub open: bool,
    pub completed: bool,
}

impl GuideState {
    /// Title/body pairs of the guide steps.
    pub const STEPS: &[(&str, &str)] = &[
        (
            "Welcome",
            "Each large circle is one mandala; every dot inside it is a single verse.",
        ),
        (
            "Navigate",
            "Drag to pan and scroll to zoom. Click a mandala to zoom into it, or a dot to read that verse.",
        ),
        (
            "Explore",
            "Use the dice button to fly to a random verse, and the reset button to return to the full view.",
        ),
    ];

    pub fn step_count(&self) -> usize {
        Self::STEPS.len()
    }

    /// Counter text, e.g. "2 / 3".
    pub fn counter(&self) -> String {
        format!("{} / {}", self.step + 1, self.step_count())
    }

    pub fn is_last_step(&self) -> bool {
        self.step + 1 >= self.step_count()
    }

    pub fn next(&mut self) {
        if !self.is_last_step() {
            self.step += 1;
        }
    }

    pub fn back(&mut self) {
        self.step = self.step.saturating_sub(1);
    }

    /// Open at the first step (manual re-open via the guide button).
    pub fn open(&mut self) {
        self.step = 0;
        self.open = true;
    }

    /// Close and mark completed; the completed flag is the only state the
    /// application ever persists.
    pub fn close(&mut self) {
        self.open = false;
        self.completed = true;
    }
}

/// Interactive egui application that displays and navigates the verse atlas.
pub struct AtlasApp {
    pub dataset: Dataset,
    pub display: DisplayConfig,
    pub controller: ViewController,
    pub load: LoadState,
    pub verse_dialog: Option<VerseDialog>,
    pub info_open: bool,
    pub guide: GuideState,
    /// Audio cues queued this frame for an external player to drain.
    pub pending_cues: Vec<AudioCue>,
    pub rng: rand::rngs::ThreadRng,
}

impl AtlasApp {
    /// Create the app around an already-loaded, grouped dataset. The layout
    /// and home transform are derived here; the guide opens automatically
    /// unless it was completed in an earlier session.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        mut dataset: Dataset,
        display: DisplayConfig,
    ) -> Self {
        let completed = cc
            .storage
            .and_then(|s| s.get_string(GUIDE_COMPLETED_KEY))
            .map(|v| v == "true")
            .unwrap_or(false);
        // Placeholder viewport; the first frame relayouts to the real size.
        let viewport = Viewport::new(1280.0, 800.0, 0.0);
        let controller = ViewController::new(&mut dataset, viewport, display.layout);
        Self {
            dataset,
            display,
            controller,
            load: LoadState::Loading {
                shown_since_ms: None,
            },
            verse_dialog: None,
            info_open: false,
            guide: GuideState {
                step: 0,
                open: false,
                completed,
            },
            pending_cues: Vec::new(),
            rng: rand::rng(),
        }
    }

    /// Create an app stuck in the failed state, rendering only the error
    /// panel with `message`.
    pub fn failed(dataset_error: impl Into<String>) -> Self {
        let mut dataset = Dataset::default();
        let display = DisplayConfig::default();
        let controller =
            ViewController::new(&mut dataset, Viewport::new(1280.0, 800.0, 0.0), display.layout);
        Self {
            dataset,
            display,
            controller,
            load: LoadState::Failed {
                message: dataset_error.into(),
            },
            verse_dialog: None,
            info_open: false,
            guide: GuideState {
                step: 0,
                open: false,
                completed: true,
            },
            pending_cues: Vec::new(),
            rng: rand::rng(),
        }
    }

    pub fn cue(&mut self, cue: AudioCue) {
        self.pending_cues.push(cue);
    }

    /// Open the detail dialog for a verse by its `original_index`.
    /// Unknown indices are ignored.
    pub fn open_verse(&mut self, index: usize) {
        if self.dataset.verse_by_original_index(index).is_none() {
            return;
        }
        self.verse_dialog = Some(VerseDialog { index, open: true });
    }

    pub fn close_verse(&mut self) {
        self.cue(AudioCue::Close);
        self.verse_dialog = None;
    }

    /// Step the open dialog through source order; disabled past the ends.
    pub fn step_verse(&mut self, direction: i64) {
        let Some(dialog) = &self.verse_dialog else {
            return;
        };
        let next = dialog.index as i64 + direction;
        if next >= 0 && (next as usize) < self.dataset.verse_count() {
            self.cue(AudioCue::Click);
            self.open_verse(next as usize);
        }
    }

    /// Close the dialog and fly to a random verse; its dialog opens on
    /// arrival via [`crate::view::ViewEvent::ItemFocused`].
    pub fn random_verse(&mut self) {
        self.cue(AudioCue::Zoom);
        self.verse_dialog = None;
        self.controller.focus_random_item(&self.dataset, &mut self.rng);
    }
}

impl eframe::App for AtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        super::ui::update(self, ctx, _frame);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        storage.set_string(GUIDE_COMPLETED_KEY, self.guide.completed.to_string());
    }
}
