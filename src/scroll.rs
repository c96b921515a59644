use std::fmt;

/// Fraction of the remaining distance covered per tick.
pub const DEFAULT_DAMPING: f64 = 0.1;

/// Distances below this snap straight to the target.
const SETTLE_EPS: f64 = 0.05;

const DIAL_ARC_START: f64 = 225.0;
const DIAL_ARC_END: f64 = 333.0;

/// A vertical extent in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub start: f64,
    pub len: f64,
}

impl Span {
    pub fn new(start: f64, len: f64) -> Self {
        Self { start, len }
    }

    pub fn end(&self) -> f64 {
        self.start + self.len
    }
}

/// Snapshot handed to scroll listeners after the offset moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    pub offset: f64,
    pub content_height: f64,
    pub viewport_height: f64,
}

impl ScrollUpdate {
    /// Maximum scrollable offset for these metrics.
    pub fn limit(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }
}

type Listener = Box<dyn FnMut(&ScrollUpdate)>;

/// Damped scroll position over a content column. Input deltas move the
/// target; `tick` glides the rendered offset toward it a fraction at a time,
/// so releases keep coasting the way a momentum scrollbar does.
pub struct ScrollController {
    offset: f64,
    target: f64,
    content_height: f64,
    viewport_height: f64,
    damping: f64,
    suppressed: bool,
    listeners: Vec<Listener>,
}

impl fmt::Debug for ScrollController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollController")
            .field("offset", &self.offset)
            .field("target", &self.target)
            .field("content_height", &self.content_height)
            .field("viewport_height", &self.viewport_height)
            .field("damping", &self.damping)
            .field("suppressed", &self.suppressed)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ScrollController {
    pub fn new(damping: f64) -> Self {
        Self {
            offset: 0.0,
            target: 0.0,
            content_height: 0.0,
            viewport_height: 0.0,
            damping: damping.clamp(0.01, 1.0),
            suppressed: false,
            listeners: Vec::new(),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Maximum scrollable offset.
    pub fn limit(&self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Scrolled fraction in `0.0..=1.0`; zero when nothing scrolls.
    pub fn progress(&self) -> f64 {
        let limit = self.limit();
        if limit <= 0.0 {
            0.0
        } else {
            (self.offset / limit).clamp(0.0, 1.0)
        }
    }

    pub fn suppressed(&self) -> bool {
        self.suppressed
    }

    /// While suppressed, input deltas are swallowed. Programmatic moves
    /// (`set_position`, `scroll_into_view`) still go through.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
        tracing::debug!(suppressed, "scroll input lock");
    }

    pub fn add_listener(&mut self, listener: impl FnMut(&ScrollUpdate) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Updates content and viewport heights, re-clamping both target and
    /// offset. Listeners fire if the clamp moved the offset.
    pub fn set_extent(&mut self, content_height: f64, viewport_height: f64) {
        self.content_height = content_height.max(0.0);
        self.viewport_height = viewport_height.max(0.0);
        let limit = self.limit();
        self.target = self.target.clamp(0.0, limit);
        let clamped = self.offset.clamp(0.0, limit);
        if clamped != self.offset {
            self.offset = clamped;
            self.notify();
        }
    }

    /// Applies an input delta to the target. Swallowed while suppressed.
    pub fn handle_delta(&mut self, delta: f64) {
        if self.suppressed {
            return;
        }
        self.target = (self.target + delta).clamp(0.0, self.limit());
    }

    /// Jumps both offset and target, bypassing the glide.
    pub fn set_position(&mut self, offset: f64) {
        let clamped = offset.clamp(0.0, self.limit());
        self.target = clamped;
        if clamped != self.offset {
            self.offset = clamped;
            self.notify();
        }
    }

    /// Glides the minimum distance that brings `span` fully into view.
    /// With `only_if_needed`, an already-visible span moves nothing.
    /// Returns whether a glide was started. Ignores suppression.
    pub fn scroll_into_view(&mut self, span: Span, only_if_needed: bool) -> bool {
        let top = self.offset;
        let bottom = self.offset + self.viewport_height;
        let visible = span.start >= top && span.end() <= bottom;
        if visible && only_if_needed {
            return false;
        }
        let next = if span.start < top || span.len > self.viewport_height {
            span.start
        } else if span.end() > bottom {
            span.end() - self.viewport_height
        } else {
            self.target
        };
        self.target = next.clamp(0.0, self.limit());
        true
    }

    /// Advances the glide one frame. Listeners fire whenever the offset
    /// moved; once the remaining distance drops under the settle epsilon
    /// the offset snaps to the target exactly.
    pub fn tick(&mut self) {
        let remaining = self.target - self.offset;
        if remaining == 0.0 {
            return;
        }
        if remaining.abs() < SETTLE_EPS {
            self.offset = self.target;
        } else {
            self.offset += remaining * self.damping;
        }
        self.notify();
    }

    pub fn is_settled(&self) -> bool {
        self.offset == self.target
    }

    fn notify(&mut self) {
        let update = ScrollUpdate {
            offset: self.offset,
            content_height: self.content_height,
            viewport_height: self.viewport_height,
        };
        for listener in &mut self.listeners {
            listener(&update);
        }
    }
}

/// Gauge that maps scroll progress onto a needle arc, the way a tape
/// counter follows playback. Degrees are whole numbers so the needle
/// steps instead of shimmering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dial {
    pub progress_deg: i32,
    pub angle: i32,
}

// The needle starts on the arc; updates only fire once the offset moves.
impl Default for Dial {
    fn default() -> Self {
        Self {
            progress_deg: 0,
            angle: DIAL_ARC_START as i32,
        }
    }
}

impl Dial {
    pub fn observe(&mut self, update: &ScrollUpdate) {
        let limit = update.limit();
        self.progress_deg = if limit <= 0.0 {
            0
        } else {
            (update.offset / limit * 360.0).round() as i32
        };
        self.angle =
            (f64::from(self.progress_deg) * (DIAL_ARC_END - DIAL_ARC_START) / 360.0
                + DIAL_ARC_START)
                .round() as i32;
    }
}
