use crate::scroll::Span;

/// Default visible fraction at which a target counts as on screen.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// One visibility transition for a watched span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub index: usize,
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Watches spans against a moving viewport and reports threshold crossings.
/// Each target fires once when first processed, then only when its
/// intersecting state flips, so a long dwell over one card stays quiet.
#[derive(Debug)]
pub struct ViewportObserver {
    threshold: f64,
    spans: Vec<Span>,
    states: Vec<Option<bool>>,
}

impl ViewportObserver {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
            spans: Vec::new(),
            states: Vec::new(),
        }
    }

    /// Registers the spans to watch, replacing any previous set. All
    /// targets report again on the next `process` pass.
    pub fn observe(&mut self, spans: Vec<Span>) {
        self.states = vec![None; spans.len()];
        self.spans = spans;
    }

    /// Compares every target against the viewport and returns the
    /// transitions since the last pass, in target order.
    pub fn process(&mut self, viewport: Span) -> Vec<Intersection> {
        let mut events = Vec::new();
        for (index, span) in self.spans.iter().enumerate() {
            let ratio = visible_ratio(*span, viewport);
            let is_intersecting = ratio >= self.threshold;
            if self.states[index] == Some(is_intersecting) {
                continue;
            }
            self.states[index] = Some(is_intersecting);
            events.push(Intersection {
                index,
                ratio,
                is_intersecting,
            });
        }
        events
    }
}

fn visible_ratio(span: Span, viewport: Span) -> f64 {
    if span.len <= 0.0 {
        return 0.0;
    }
    let overlap = span.end().min(viewport.end()) - span.start.max(viewport.start);
    (overlap / span.len).clamp(0.0, 1.0)
}
