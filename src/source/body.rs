use std::collections::{BTreeMap, BTreeSet};

use crate::debugger::EventNotifier;
use crate::source::LineMap;

/// Per-routine breakpoint storage. The interpreter proper hangs one of these
/// off every routine body; here it also knows which lines hold executable
/// statements so requested lines can snap forward past blanks and comments.
#[derive(Debug, Clone, Default)]
pub struct BodyStore {
    executable: BTreeSet<u32>,
    breakpoints: BTreeMap<u32, String>,
}

impl BodyStore {
    pub fn new(executable: impl IntoIterator<Item = u32>) -> Self {
        BodyStore {
            executable: executable.into_iter().collect(),
            breakpoints: BTreeMap::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn has_statements(&self) -> bool {
        !self.executable.is_empty()
    }

    /// Insert a breakpoint for each requested line, snapping forward to the
    /// next executable line. Entries that cannot be placed map to 0.
    /// Inserting again at an occupied line overwrites the stored condition.
    pub fn insert(
        &mut self,
        notifier: &mut dyn EventNotifier,
        file: &str,
        lines: &LineMap,
        condition: &str,
    ) -> LineMap {
        let mut actual = LineMap::new();

        for (&idx, &requested) in lines {
            match self.executable.range(requested..).next().copied() {
                Some(line) => {
                    self.breakpoints.insert(line, condition.to_string());
                    if !file.is_empty() {
                        notifier.breakpoint_changed(true, file, line);
                    }
                    actual.insert(idx, line);
                }
                None => {
                    actual.insert(idx, 0);
                }
            }
        }

        actual
    }

    /// Delete the breakpoint at an exact line. Returns whether one was there.
    pub fn delete(&mut self, line: u32) -> bool {
        self.breakpoints.remove(&line).is_some()
    }

    pub fn lines(&self) -> Vec<u32> {
        self.breakpoints.keys().copied().collect()
    }

    pub fn lines_with_conditions(&self) -> Vec<(u32, String)> {
        self.breakpoints
            .iter()
            .map(|(&line, cond)| (line, cond.clone()))
            .collect()
    }

    /// Drop every breakpoint, reporting each removal. Returns the removed
    /// lines as an index map.
    pub fn remove_all(&mut self, notifier: &mut dyn EventNotifier, file: &str) -> LineMap {
        let removed: Vec<u32> = self.breakpoints.keys().copied().collect();
        self.breakpoints.clear();

        let mut result = LineMap::new();
        for (idx, line) in removed.into_iter().enumerate() {
            if !file.is_empty() {
                notifier.breakpoint_changed(false, file, line);
            }
            result.insert(idx, line);
        }
        result
    }
}
