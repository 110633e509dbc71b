//! The styling pass
//!
//! A pass restyles one paragraph-aligned window of the document. Each rule
//! contributes a layer of attribute patches over its matches, in theme
//! order; hidden-glyph layers go on last. Flattening the layers
//! last-writer-wins per key gives the window's attributed runs.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::Range;

use super::labels::{LabelWithOffset, TriggerSet};
use super::range::{clamp, expand, Dirty, DEFAULT_PADDING};
use super::style::{AttributePatch, Attributes};
use super::theme::Theme;

/// A maximal span of uniform attributes
#[derive(Debug, Clone, PartialEq)]
pub struct StyledRun {
    /// Absolute byte range
    pub range: Range<usize>,
    pub attributes: Attributes,
}

/// Replacement attributes for exactly one window of the document
#[derive(Debug, Clone, PartialEq)]
pub struct StyledWindow {
    /// The window this replaces
    pub range: Range<usize>,
    runs: Vec<StyledRun>,
}

impl StyledWindow {
    /// Runs in offset order, covering the window without gaps
    pub fn runs(&self) -> &[StyledRun] {
        &self.runs
    }

    pub fn into_runs(self) -> Vec<StyledRun> {
        self.runs
    }

    /// Attributes at an absolute offset, if it lies in the window
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        let idx = self.runs.partition_point(|run| run.range.end <= offset);
        self.runs
            .get(idx)
            .filter(|run| run.range.contains(&offset))
            .map(|run| &run.attributes)
    }
}

/// Everything a pass produces
#[derive(Debug, Clone, PartialEq)]
pub struct StylingOutput {
    pub window: StyledWindow,
    pub labels: BTreeSet<LabelWithOffset>,
}

/// One rule's write over one span
struct Layer<'p> {
    range: Range<usize>,
    patch: &'p AttributePatch,
}

/// Restyle `range` of `text` with `theme`
///
/// `range` should already be expanded (see [`expand`]); it is clamped to
/// the text either way. The pass never fails: inert rules and rules without
/// matches simply contribute nothing.
pub fn style(text: &str, range: Range<usize>, theme: &Theme, triggers: &TriggerSet) -> StylingOutput {
    let window = clamp(range, text);
    let patches: Vec<AttributePatch> = theme
        .rules()
        .iter()
        .map(|rule| rule.patch(theme.fonts()))
        .collect();
    let muted = AttributePatch::muted();

    let mut layers = Vec::new();
    let mut hidden = Vec::new();
    let mut labels = BTreeSet::new();

    for (rule, patch) in theme.rules().iter().zip(&patches) {
        if rule.is_inert() {
            tracing::trace!(pattern = rule.pattern(), "skipping inert rule");
            continue;
        }

        for m in rule.matches_in(text, window.clone()) {
            if let Some(label) = LabelWithOffset::extract(m.captured, m.range.start, triggers, rule, patch) {
                labels.insert(label);
            }
            layers.push(Layer { range: m.range, patch });
        }

        for range in rule.hidden_ranges(text) {
            let start = range.start.max(window.start);
            let end = range.end.min(window.end);
            if start < end {
                hidden.push(Layer { range: start..end, patch: &muted });
            }
        }
    }

    tracing::debug!(
        window = ?window,
        layers = layers.len(),
        hidden = hidden.len(),
        labels = labels.len(),
        "styling pass"
    );

    layers.append(&mut hidden);
    let runs = flatten(&window, theme.base_attributes(), &layers);

    StylingOutput {
        window: StyledWindow { range: window, runs },
        labels,
    }
}

/// Reduce ordered layers to non-overlapping runs
///
/// Each segment starts from `base` and applies the layers covering it in
/// order. Equal neighbours merge.
fn flatten(window: &Range<usize>, base: Attributes, layers: &[Layer<'_>]) -> Vec<StyledRun> {
    let mut runs: Vec<StyledRun> = Vec::new();
    sweep(window, layers, |range, active| {
        let mut attributes = base.clone();
        for patch in active.values() {
            attributes.apply(patch);
        }

        match runs.last_mut() {
            Some(last) if last.attributes == attributes => last.range.end = range.end,
            _ => runs.push(StyledRun { range, attributes }),
        }
    });
    runs
}

/// Walk the window segment by segment with the layers covering each one
///
/// Layer boundaries are sorted once; the active set is keyed by layer index
/// so it iterates in theme order. Work is proportional to the number of
/// segments times the overlap depth, not to the total layer count.
fn sweep<'p>(
    window: &Range<usize>,
    layers: &[Layer<'p>],
    mut visit: impl FnMut(Range<usize>, &BTreeMap<usize, &'p AttributePatch>),
) {
    let mut events: Vec<(usize, usize, bool)> = Vec::with_capacity(layers.len() * 2);
    for (idx, layer) in layers.iter().enumerate() {
        let start = layer.range.start.max(window.start);
        let end = layer.range.end.min(window.end);
        if start < end {
            events.push((start, idx, true));
            events.push((end, idx, false));
        }
    }
    events.sort_unstable_by_key(|&(offset, idx, _)| (offset, idx));

    let mut active = BTreeMap::new();
    let mut next_event = 0;
    let mut pos = window.start;
    while pos < window.end {
        while let Some(&(offset, idx, opens)) = events.get(next_event) {
            if offset > pos {
                break;
            }
            if opens {
                active.insert(idx, layers[idx].patch);
            } else {
                active.remove(&idx);
            }
            next_event += 1;
        }

        let end = events
            .get(next_event)
            .map_or(window.end, |&(offset, _, _)| offset)
            .min(window.end);
        visit(pos..end, &active);
        pos = end;
    }
}

/// Expand-then-style with a fixed theme and host settings
#[derive(Debug, Clone)]
pub struct Styler {
    theme: Theme,
    triggers: TriggerSet,
    padding: usize,
}

impl Styler {
    /// Create a styler with default triggers and padding
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            triggers: TriggerSet::default(),
            padding: DEFAULT_PADDING,
        }
    }

    /// Builder: set trigger characters
    pub fn with_triggers(mut self, triggers: TriggerSet) -> Self {
        self.triggers = triggers;
        self
    }

    /// Builder: set paragraph padding
    pub fn with_padding(mut self, padding: usize) -> Self {
        self.padding = padding;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn triggers(&self) -> &TriggerSet {
        &self.triggers
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// The window a pass over `dirty` would cover
    pub fn window_for(&self, text: &str, dirty: &Dirty) -> Range<usize> {
        expand(dirty.resolve(text), text, self.padding)
    }

    /// Expand the dirty span and restyle it
    pub fn restyle(&self, text: &str, dirty: &Dirty) -> StylingOutput {
        let window = self.window_for(text, dirty);
        style(text, window, &self.theme, &self.triggers)
    }
}

impl Default for Styler {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}
