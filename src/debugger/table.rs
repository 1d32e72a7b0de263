use std::collections::{BTreeMap, BTreeSet};

use crate::debugger::condition::validate_condition;
use crate::debugger::locate::locate;
use crate::debugger::status::{stop_status, StopStatus};
use crate::debugger::triggers::TriggerState;
use crate::debugger::{EventNotifier, NullNotifier};
use crate::error::{DebugError, Result};
use crate::expr::{ExprParser, ScriptParser};
use crate::source::{base_name, LineMap, Routine, RoutineResolver};

/// Qualified routine name -> ordered (line, condition) pairs.
pub type BreakpointList = BTreeMap<String, Vec<(u32, String)>>;

/// The session's breakpoint table.
///
/// Tracks which files currently hold breakpoints and owns the stop-on-event
/// trigger state. The breakpoint records themselves live in each routine's
/// body store; the table only indexes by name and orchestrates insertion,
/// removal and reporting. One instance per interpreter session.
pub struct BreakpointTable {
    bp_set: BTreeSet<String>,
    pub triggers: TriggerState,
    parser: Box<dyn ExprParser>,
    notifier: Box<dyn EventNotifier>,
    debug_state_stale: bool,
}

impl Default for BreakpointTable {
    fn default() -> Self {
        BreakpointTable::new(Box::new(ScriptParser::new()), Box::new(NullNotifier))
    }
}

impl BreakpointTable {
    pub fn new(parser: Box<dyn ExprParser>, notifier: Box<dyn EventNotifier>) -> Self {
        BreakpointTable {
            bp_set: BTreeSet::new(),
            triggers: TriggerState::new(),
            parser,
            notifier,
            debug_state_stale: false,
        }
    }

    /// Insert a breakpoint at each requested line of the named routine,
    /// stopping only when `condition` is true.
    ///
    /// Each line resolves to the sub/nested routine containing it; the
    /// body store may snap the breakpoint forward to the next executable
    /// line, so the returned map holds actual lines, not requested ones.
    /// Insertion is not transactional across lines: a line that fails to
    /// place does not undo earlier ones in the same call.
    pub fn add_breakpoint(
        &mut self,
        resolver: &mut dyn RoutineResolver,
        name: &str,
        class_name: &str,
        lines: &LineMap,
        condition: &str,
    ) -> Result<LineMap> {
        if resolver.find(name, class_name).is_none() {
            return Err(DebugError::not_found(format!(
                "add_breakpoint: unable to find function '{}'",
                name
            )));
        }

        validate_condition(self.parser.as_ref(), "stop", condition)?;

        let mut actual = LineMap::new();

        for (&idx, &requested) in lines {
            let top = match resolver.find(name, class_name) {
                Some(top) => top,
                None => break,
            };
            let path = match locate(top, requested) {
                Some(path) => path,
                None => continue,
            };

            let top = match resolver.find_mut(name, class_name) {
                Some(top) => top,
                None => break,
            };
            let routine = match top.descend_mut(&path) {
                Some(routine) => routine,
                None => continue,
            };

            let file = routine.file().to_string();
            let mut one = LineMap::new();
            one.insert(idx, requested);
            let placed = routine
                .body_mut()
                .insert(self.notifier.as_mut(), &file, &one, condition);

            if let Some(&line) = placed.get(&idx) {
                if line != 0 {
                    // Normalize so file>subfunction and file never coexist
                    // in the name set; a duplicate pair breaks bulk clear.
                    self.bp_set.insert(base_name(name).to_string());
                    actual.insert(idx, line);
                    log::debug!(
                        "breakpoint added: {} line {} (requested {})",
                        name,
                        line,
                        requested
                    );
                }
            }
        }

        self.reset_debug_state();

        Ok(actual)
    }

    /// Remove breakpoints at the given lines of the named file. With no
    /// lines, removes every breakpoint in the file, subfunctions included.
    /// Returns the number of records actually removed.
    pub fn remove_breakpoint(
        &mut self,
        resolver: &mut dyn RoutineResolver,
        name: &str,
        lines: &LineMap,
    ) -> Result<usize> {
        let removed = if lines.is_empty() {
            self.remove_all_breakpoints_in_file(resolver, name, false)?.len()
        } else {
            let top = resolver.find_mut(name, "").ok_or_else(|| {
                DebugError::not_found(format!(
                    "remove_breakpoint: unable to find function {}",
                    name
                ))
            })?;

            let mut count = remove_lines_from(top, lines, self.notifier.as_mut());

            // Sweep subfunctions in file-declaration order, accumulating the
            // count; each one gets the same full line list.
            let sub_names: Vec<String> = top
                .subroutine_names()
                .into_iter()
                .map(str::to_string)
                .collect();
            for sub_name in sub_names {
                if let Some(sub) = top.subroutine_mut(&sub_name) {
                    count += remove_lines_from(sub, lines, self.notifier.as_mut());
                }
            }

            let any_left =
                !top.body().is_empty() || top.subroutines().iter().any(|s| !s.body().is_empty());
            if !any_left {
                self.bp_set.remove(base_name(name));
            }

            count
        };

        self.reset_debug_state();

        Ok(removed)
    }

    /// Remove all breakpoints from a file, including those in subfunctions.
    /// With `silent`, an unresolvable name yields an empty result instead of
    /// an error.
    pub fn remove_all_breakpoints_in_file(
        &mut self,
        resolver: &mut dyn RoutineResolver,
        name: &str,
        silent: bool,
    ) -> Result<LineMap> {
        let removed = match resolver.find_mut(name, "") {
            Some(top) => {
                let mut lines = Vec::new();
                remove_every_breakpoint(top, self.notifier.as_mut(), &mut lines);
                self.bp_set.remove(base_name(name));

                let mut result = LineMap::new();
                for (idx, line) in lines.into_iter().enumerate() {
                    result.insert(idx, line);
                }
                result
            }
            None if silent => LineMap::new(),
            None => {
                return Err(DebugError::not_found(format!(
                    "remove_all_breakpoints_in_file: unable to find function {}",
                    name
                )));
            }
        };

        self.reset_debug_state();

        Ok(removed)
    }

    /// Remove every breakpoint in the session.
    pub fn remove_all_breakpoints(&mut self, resolver: &mut dyn RoutineResolver) -> Result<()> {
        // Removal mutates the name set, so iterate a snapshot of it.
        let snapshot: Vec<String> = self.bp_set.iter().cloned().collect();
        for name in snapshot {
            self.remove_all_breakpoints_in_file(resolver, &name, false)?;
        }

        self.reset_debug_state();

        Ok(())
    }

    /// Every breakpoint currently set, keyed by qualified routine name,
    /// optionally restricted to the named files.
    pub fn get_breakpoint_list(
        &self,
        resolver: &dyn RoutineResolver,
        name_filter: &[String],
    ) -> BreakpointList {
        let mut list = BreakpointList::new();

        for name in &self.bp_set {
            if !name_filter.is_empty() && !name_filter.iter().any(|f| f == name) {
                continue;
            }
            let top = match resolver.find(name, "") {
                Some(top) => top,
                None => continue,
            };

            let bkpts = top.body().lines_with_conditions();
            if !bkpts.is_empty() {
                list.insert(name.clone(), bkpts);
            }

            for sub in top.subroutines() {
                let bkpts = sub.body().lines_with_conditions();
                if !bkpts.is_empty() {
                    list.insert(format!("{}>{}", name, sub.name()), bkpts);
                }
            }
        }

        list
    }

    /// Clear all reasons to stop other than breakpoints. Kept separate from
    /// [`BreakpointTable::remove_all_breakpoints`] so breakpoints and
    /// triggers can be cleared independently.
    pub fn clear_all_signals(&mut self) {
        self.triggers.clear_all();
    }

    /// Structured status of the stop-on-event triggers. Render with
    /// `Display` for the one-line-per-condition text form.
    pub fn stop_status(&self) -> StopStatus {
        stop_status(&self.triggers)
    }

    /// Names of the files currently holding at least one breakpoint.
    pub fn breakpoint_files(&self) -> Vec<&str> {
        self.bp_set.iter().map(String::as_str).collect()
    }

    pub fn has_breakpoints(&self) -> bool {
        !self.bp_set.is_empty()
    }

    /// The evaluator caches whether any breakpoint exists; every table
    /// mutation marks that cache stale so it re-checks before the next step.
    pub fn debug_state_stale(&self) -> bool {
        self.debug_state_stale
    }

    pub fn mark_debug_state_fresh(&mut self) {
        self.debug_state_stale = false;
    }

    fn reset_debug_state(&mut self) {
        self.debug_state_stale = true;
    }
}

/// Delete the listed lines from one routine's body, reporting each removal.
fn remove_lines_from(
    routine: &mut Routine,
    lines: &LineMap,
    notifier: &mut dyn EventNotifier,
) -> usize {
    let file = routine.file().to_string();
    let mut count = 0;

    for &line in lines.values() {
        if routine.body_mut().delete(line) {
            count += 1;
            if !file.is_empty() {
                notifier.breakpoint_changed(false, &file, line);
            }
        }
    }

    count
}

/// Recursively strip every breakpoint under `routine`, collecting the lines.
fn remove_every_breakpoint(
    routine: &mut Routine,
    notifier: &mut dyn EventNotifier,
    removed: &mut Vec<u32>,
) {
    let file = routine.file().to_string();
    let cleared = routine.body_mut().remove_all(notifier, &file);
    removed.extend(cleared.values().copied());

    for idx in 0..routine.subroutines().len() {
        if let Some(sub) = routine.descend_mut(&[idx]) {
            remove_every_breakpoint(sub, notifier, removed);
        }
    }
}
