//! Pan/zoom view-transform controller.
//!
//! Owns the affine map from layout space to screen pixels and everything that
//! changes it:
//! - the fitted "home" transform derived from the scene bounding box,
//! - programmatic focus targets (mandala, verse) with animated transitions,
//! - manual pan and cursor-anchored zoom with scale clamping,
//! - the destructive, idempotent relayout performed on viewport resize.
//!
//! Transitions are cooperative and last-request-wins: starting a new
//! transition replaces any in-flight one immediately, and a replaced verse
//! transition never fires its arrival event. Time is passed in explicitly
//! (milliseconds) via [`ViewController::tick`], so tests can drive the clock
//! and the UI adapter can feed its own frame time.

use rand::Rng;

use crate::config::LayoutConfig;
use crate::layout::{self, RectD, Vec2d};
use crate::model::Dataset;

// ────────────────────────────────────────────────────────────────────────────
// Transform
// ────────────────────────────────────────────────────────────────────────────

/// Affine pan/zoom map: `screen = world · k + (x, y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub k: f64,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        x: 0.0,
        y: 0.0,
        k: 1.0,
    };

    pub fn apply(&self, p: Vec2d) -> Vec2d {
        Vec2d::new(p.x * self.k + self.x, p.y * self.k + self.y)
    }

    /// Screen point back to layout space.
    pub fn invert(&self, p: Vec2d) -> Vec2d {
        Vec2d::new((p.x - self.x) / self.k, (p.y - self.y) / self.k)
    }

    /// Transform that shows the world point `world` at `screen` with scale `k`.
    /// Equivalent to `translate(screen) · scale(k) · translate(-world)`.
    pub fn centered_on(world: Vec2d, screen: Vec2d, k: f64) -> Transform {
        Transform {
            x: screen.x - world.x * k,
            y: screen.y - world.y * k,
            k,
        }
    }

    /// Linear interpolation in translate and scale; `t` in `[0, 1]`.
    pub fn lerp(a: Transform, b: Transform, t: f64) -> Transform {
        Transform {
            x: a.x + (b.x - a.x) * t,
            y: a.y + (b.y - a.y) * t,
            k: a.k + (b.k - a.k) * t,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Viewport
// ────────────────────────────────────────────────────────────────────────────

/// Screen-space viewport. `top_margin` is the reserved strip (header) above
/// the usable drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub top_margin: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64, top_margin: f64) -> Self {
        Self {
            width,
            height,
            top_margin,
        }
    }

    /// Center of the usable area: horizontally centered, vertically centered
    /// within the strip below `top_margin`.
    pub fn usable_center(&self) -> Vec2d {
        let available = self.height - self.top_margin;
        Vec2d::new(self.width * 0.5, self.top_margin + available * 0.5)
    }

    pub fn center(&self) -> Vec2d {
        Vec2d::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Fit `bounds` into the viewport's usable area with breathing room.
/// This is the canonical "reset view" transform and the lower bound of the
/// zoom range.
pub fn compute_home_transform(bounds: &RectD, viewport: &Viewport, cfg: &LayoutConfig) -> Transform {
    let available_height = viewport.height - viewport.top_margin;
    let box_width = bounds.width().max(1.0);
    let box_height = bounds.height().max(1.0);
    let scale =
        (viewport.width / box_width).min(available_height / box_height) * cfg.margin_factor;
    let center = bounds.center();
    let target = viewport.usable_center();
    Transform {
        x: target.x - center.x * scale,
        y: target.y - center.y * scale,
        k: scale,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Events & transitions
// ────────────────────────────────────────────────────────────────────────────

/// Outbound notifications the controller emits to its collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A verse-focus transition arrived; open the detail view for this
    /// `original_index`. Fired exactly once, never on interruption.
    ItemFocused(usize),
    /// A mandala-focus transition arrived.
    GroupFocused(u32),
    /// The home transform was recomputed (relayout); re-render.
    HomeChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Arrival {
    Item(usize),
    Group(u32),
}

#[derive(Debug, Clone)]
struct Transition {
    from: Transform,
    to: Transform,
    duration_ms: f64,
    /// Set on the first tick so the animation clock starts when rendering
    /// actually observes it.
    started_at: Option<f64>,
    arrival: Option<Arrival>,
}

// ────────────────────────────────────────────────────────────────────────────
// ViewController
// ────────────────────────────────────────────────────────────────────────────

/// Owner of the current view transform and focus state.
///
/// The dataset itself stays outside (immutable after load except for layout
/// fields); operations that need geometry take it as a parameter, which keeps
/// the controller testable without a rendering surface.
#[derive(Debug, Clone)]
pub struct ViewController {
    cfg: LayoutConfig,
    viewport: Viewport,
    bounds: RectD,
    home: Transform,
    current: Transform,
    min_scale: f64,
    max_scale: f64,
    current_item: Option<usize>,
    transition: Option<Transition>,
}

impl ViewController {
    /// Lay out the dataset for `viewport` and start at the home transform.
    pub fn new(dataset: &mut Dataset, viewport: Viewport, cfg: LayoutConfig) -> Self {
        let mut controller = Self {
            cfg,
            viewport,
            bounds: RectD::from_center_radius(Vec2d::new(0.0, 0.0), cfg.central_radius),
            home: Transform::IDENTITY,
            current: Transform::IDENTITY,
            min_scale: 0.0,
            max_scale: f64::INFINITY,
            current_item: None,
            transition: None,
        };
        controller.relayout(dataset, viewport);
        controller
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.cfg
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The transform to render the scene with right now.
    pub fn current(&self) -> Transform {
        self.current
    }

    pub fn home(&self) -> Transform {
        self.home
    }

    pub fn scene_bounds(&self) -> RectD {
        self.bounds
    }

    /// `[min, max]` scale range: the home scale up to `home · multiplier`.
    pub fn scale_extent(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// The most recently requested verse focus (recorded at request time,
    /// before the transition arrives).
    pub fn current_item(&self) -> Option<usize> {
        self.current_item
    }

    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    // ── Layout & home ──────────────────────────────────────────────────────

    /// Destructive, idempotent re-derivation of all view state from the
    /// current viewport and the dataset: re-runs the layout, recomputes the
    /// scene bounds and home transform, and snaps the view to home. Any
    /// in-flight transition is dropped without firing its arrival.
    pub fn relayout(&mut self, dataset: &mut Dataset, viewport: Viewport) -> ViewEvent {
        self.viewport = viewport;
        layout::layout_mandalas(&mut dataset.mandalas, &self.cfg);
        self.bounds = layout::scene_bounds(&dataset.mandalas, &self.cfg);
        self.home = compute_home_transform(&self.bounds, &self.viewport, &self.cfg);
        self.min_scale = self.home.k;
        self.max_scale = self.home.k * self.cfg.max_zoom_multiplier;
        self.current = self.home;
        self.transition = None;
        ViewEvent::HomeChanged
    }

    /// Animate back to the fitted home transform.
    pub fn reset_to_home(&mut self) {
        let (home, duration) = (self.home, self.cfg.reset_duration_ms);
        self.begin(home, duration, None);
    }

    // ── Focus operations ───────────────────────────────────────────────────

    /// Animate to a mandala, centered in the usable viewport area at
    /// `home.k · group_zoom_factor`. Unknown numbers are silently ignored.
    pub fn focus_group(&mut self, dataset: &Dataset, number: u32) {
        let Some(mandala) = dataset.mandala_by_number(number) else {
            return;
        };
        let target = Transform::centered_on(
            Vec2d::new(mandala.center_x, mandala.center_y),
            self.viewport.usable_center(),
            self.home.k * self.cfg.group_zoom_factor,
        );
        let duration = self.cfg.group_focus_duration_ms;
        self.begin(target, duration, Some(Arrival::Group(number)));
    }

    /// Animate to a single verse at `home.k · item_zoom_factor`. The focused
    /// index is recorded immediately; [`ViewEvent::ItemFocused`] fires only on
    /// uninterrupted arrival. Out-of-range indices are silently ignored.
    pub fn focus_item(&mut self, dataset: &Dataset, index: usize) {
        let Some((mandala, verse)) = dataset.verse_by_original_index(index) else {
            return;
        };
        let (abs_x, abs_y) = mandala.verse_position(verse);
        self.current_item = Some(index);
        let target = Transform::centered_on(
            Vec2d::new(abs_x, abs_y),
            self.viewport.usable_center(),
            self.home.k * self.cfg.item_zoom_factor,
        );
        let duration = self.cfg.item_focus_duration_ms;
        self.begin(target, duration, Some(Arrival::Item(index)));
    }

    /// Focus a uniformly random verse.
    pub fn focus_random_item<R: Rng>(&mut self, dataset: &Dataset, rng: &mut R) {
        let count = dataset.verse_count();
        if count == 0 {
            return;
        }
        let index = rng.random_range(0..count);
        self.focus_item(dataset, index);
    }

    // ── Manual pan/zoom ────────────────────────────────────────────────────

    /// Animated multiplicative zoom step (the +/− buttons), anchored at the
    /// viewport center and clamped to the scale extent.
    pub fn zoom_step(&mut self, factor: f64) {
        let target = self.anchored_zoom(self.viewport.center(), factor);
        let duration = self.cfg.zoom_step_duration_ms;
        self.begin(target, duration, None);
    }

    /// Immediate wheel/pinch zoom anchored at `anchor` (cursor or pinch
    /// center). The scale is clamped first and the translate re-derived from
    /// the anchor, so clamping never distorts the gesture's focal point.
    /// Cancels any in-flight transition without firing its arrival.
    pub fn zoom_at(&mut self, anchor: Vec2d, factor: f64) {
        self.transition = None;
        self.current = self.anchored_zoom(anchor, factor);
    }

    /// Immediate drag pan. Cancels any in-flight transition without firing
    /// its arrival.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.transition = None;
        self.current.x += dx;
        self.current.y += dy;
    }

    fn anchored_zoom(&self, anchor: Vec2d, factor: f64) -> Transform {
        let k = (self.current.k * factor).clamp(self.min_scale, self.max_scale);
        let world = self.current.invert(anchor);
        Transform::centered_on(world, anchor, k)
    }

    // ── Transition driver ──────────────────────────────────────────────────

    /// Advance the in-flight transition to wall-clock time `now_ms` and
    /// update the current transform. Returns the arrival event when a
    /// transition completes on this tick, otherwise `None`.
    pub fn tick(&mut self, now_ms: f64) -> Option<ViewEvent> {
        let transition = self.transition.as_mut()?;
        let started = *transition.started_at.get_or_insert(now_ms);
        let t = if transition.duration_ms <= 0.0 {
            1.0
        } else {
            ((now_ms - started) / transition.duration_ms).clamp(0.0, 1.0)
        };
        if t >= 1.0 {
            // Land exactly on the target so reset is bit-for-bit idempotent.
            self.current = transition.to;
            let arrival = transition.arrival;
            self.transition = None;
            return arrival.map(|a| match a {
                Arrival::Item(i) => ViewEvent::ItemFocused(i),
                Arrival::Group(n) => ViewEvent::GroupFocused(n),
            });
        }
        self.current = Transform::lerp(transition.from, transition.to, t);
        None
    }

    /// Replace any in-flight transition with a new one (last-request-wins).
    /// The replaced transition's arrival is dropped, never fired.
    fn begin(&mut self, to: Transform, duration_ms: f64, arrival: Option<Arrival>) {
        self.transition = Some(Transition {
            from: self.current,
            to,
            duration_ms,
            started_at: None,
            arrival,
        });
    }
}
