//! Document host - text, caret and attributed storage
//!
//! `Document` plays the part of an editor surface: it owns the mutable text
//! and its attributed runs, runs the styler after each edit, splices the
//! restyled window back and reports to the registered callbacks.

use std::collections::BTreeSet;
use std::ops::Range;

use crate::syntax::{
    clamp, paragraph_at, paragraph_range, Attributes, Dirty, LabelWithOffset, StyledRun,
    StyledWindow, Styler,
};

/// Callback receiving text (full document, paragraph, or pasted text)
pub type TextCallback = Box<dyn FnMut(&str)>;

/// Callback receiving the trigger labels of a pass
pub type LabelsCallback = Box<dyn FnMut(&BTreeSet<LabelWithOffset>)>;

/// A styled, editable document
pub struct Document {
    /// Document text
    text: String,
    /// Caret or selection (byte offsets)
    selection: Range<usize>,
    /// Ordered runs covering the whole text
    storage: Vec<StyledRun>,
    styler: Styler,
    on_text_change: Option<TextCallback>,
    on_paragraph_change: Option<TextCallback>,
    on_paste: Option<TextCallback>,
    on_styling_results: Option<LabelsCallback>,
}

impl Document {
    /// Create a document and style all of it
    pub fn new(text: impl Into<String>, styler: Styler) -> Self {
        let mut doc = Self {
            text: text.into(),
            selection: 0..0,
            storage: Vec::new(),
            styler,
            on_text_change: None,
            on_paragraph_change: None,
            on_paste: None,
            on_styling_results: None,
        };
        doc.restyle(Dirty::All);
        doc
    }

    /// Builder: called with the full text after each edit
    pub fn on_text_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_text_change = Some(Box::new(f));
        self
    }

    /// Builder: called with the caret's paragraph after each edit
    pub fn on_paragraph_change(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_paragraph_change = Some(Box::new(f));
        self
    }

    /// Builder: called with pasted text
    pub fn on_paste(mut self, f: impl FnMut(&str) + 'static) -> Self {
        self.on_paste = Some(Box::new(f));
        self
    }

    /// Builder: called with the trigger labels after each pass
    pub fn on_styling_results(mut self, f: impl FnMut(&BTreeSet<LabelWithOffset>) + 'static) -> Self {
        self.on_styling_results = Some(Box::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self) -> Range<usize> {
        self.selection.clone()
    }

    /// Move the caret or selection, clamped to the text
    pub fn set_selection(&mut self, selection: Range<usize>) {
        self.selection = clamp(selection, &self.text);
    }

    pub fn styler(&self) -> &Styler {
        &self.styler
    }

    /// Attributed runs covering the whole document
    pub fn runs(&self) -> &[StyledRun] {
        &self.storage
    }

    /// Attributes at a byte offset
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        let idx = self.storage.partition_point(|run| run.range.end <= offset);
        self.storage
            .get(idx)
            .filter(|run| run.range.contains(&offset))
            .map(|run| &run.attributes)
    }

    /// Replace a range with new text, as typing or deleting would
    ///
    /// The caret ends up after the inserted text. Every paragraph the
    /// replacement touched, through the caret's paragraph, is restyled
    /// (plus padding).
    pub fn replace_range(&mut self, range: Range<usize>, replacement: &str) -> BTreeSet<LabelWithOffset> {
        let range = clamp(range, &self.text);
        self.apply_edit(range.clone(), replacement);

        let caret = range.start + replacement.len();
        self.selection = caret..caret;

        let paragraph = paragraph_at(&self.text, caret);
        if let Some(f) = self.on_paragraph_change.as_mut() {
            f(&self.text[paragraph]);
        }
        if let Some(f) = self.on_text_change.as_mut() {
            f(&self.text);
        }

        let touched = self.edited_span(range.start, caret);
        self.restyle(Dirty::Range(touched))
    }

    /// Replace the selection with `text`
    pub fn insert(&mut self, text: &str) -> BTreeSet<LabelWithOffset> {
        self.replace_range(self.selection.clone(), text)
    }

    /// Paste over the selection; restyles every paragraph the paste touched
    pub fn paste(&mut self, pasted: &str) -> BTreeSet<LabelWithOffset> {
        let start = self.selection.start;
        self.apply_edit(self.selection.clone(), pasted);

        let caret = start + pasted.len();
        self.selection = caret..caret;

        if let Some(f) = self.on_paste.as_mut() {
            f(pasted);
        }

        let touched = self.edited_span(start, caret);
        self.restyle(Dirty::Range(touched))
    }

    /// Paragraphs from an edit's start through the caret's paragraph
    fn edited_span(&self, start: usize, caret: usize) -> Range<usize> {
        let inserted = paragraph_range(&self.text, start..caret);
        let at_caret = paragraph_at(&self.text, caret);
        inserted.start.min(at_caret.start)..inserted.end.max(at_caret.end)
    }

    /// Replace the whole text; the selection is kept where it still fits
    pub fn set_text(&mut self, text: impl Into<String>) -> BTreeSet<LabelWithOffset> {
        self.text = text.into();
        self.selection = clamp(self.selection.clone(), &self.text);
        self.storage.clear();
        self.restyle(Dirty::All)
    }

    /// Restyle a dirty span and splice the result into storage
    pub fn restyle(&mut self, dirty: Dirty) -> BTreeSet<LabelWithOffset> {
        let output = self.styler.restyle(&self.text, &dirty);
        let selection = self.selection.clone();
        self.splice(output.window);
        self.selection = selection;

        if let Some(f) = self.on_styling_results.as_mut() {
            f(&output.labels);
        }
        output.labels
    }

    /// Edit the text and shift storage to match
    ///
    /// Inserted text takes the attributes of the run before it, or of the
    /// first run when inserting at offset 0.
    fn apply_edit(&mut self, range: Range<usize>, replacement: &str) {
        let range = clamp(range, &self.text);
        self.text.replace_range(range.clone(), replacement);

        let inserted = replacement.len();
        let map_end = |p: usize| {
            if p < range.start {
                p
            } else if p >= range.end {
                p - range.len() + inserted
            } else {
                range.start + inserted
            }
        };
        let map_start = |p: usize| {
            if p == 0 {
                0
            } else {
                map_end(p)
            }
        };

        let runs = std::mem::take(&mut self.storage);
        self.storage = runs
            .into_iter()
            .map(|run| StyledRun {
                range: map_start(run.range.start)..map_end(run.range.end),
                attributes: run.attributes,
            })
            .filter(|run| !run.range.is_empty())
            .collect();

        if self.storage.is_empty() && !self.text.is_empty() {
            let base = self.styler.theme().base_attributes();
            self.storage.push(StyledRun {
                range: 0..self.text.len(),
                attributes: base,
            });
        }
    }

    /// Replace storage over the window's range with the window's runs
    fn splice(&mut self, window: StyledWindow) {
        let span = window.range.clone();
        if span.is_empty() {
            return;
        }

        let mut runs = Vec::with_capacity(self.storage.len() + window.runs().len());
        for run in self.storage.drain(..) {
            if run.range.end <= span.start || run.range.start >= span.end {
                runs.push(run);
                continue;
            }
            if run.range.start < span.start {
                runs.push(StyledRun {
                    range: run.range.start..span.start,
                    attributes: run.attributes.clone(),
                });
            }
            if run.range.end > span.end {
                runs.push(StyledRun {
                    range: span.end..run.range.end,
                    attributes: run.attributes,
                });
            }
        }
        runs.extend(window.into_runs());
        runs.sort_by_key(|run| run.range.start);

        // Merge equal neighbours at the splice seams
        let mut merged: Vec<StyledRun> = Vec::with_capacity(runs.len());
        for run in runs {
            match merged.last_mut() {
                Some(last) if last.range.end == run.range.start && last.attributes == run.attributes => {
                    last.range.end = run.range.end;
                }
                _ => merged.push(run),
            }
        }
        self.storage = merged;
    }
}
