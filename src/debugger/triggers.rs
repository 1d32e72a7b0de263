use std::collections::BTreeSet;

/// The event-trigger families that carry an identifier set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Error,
    CaughtError,
    Warning,
}

impl TriggerKind {
    pub fn label(self) -> &'static str {
        match self {
            TriggerKind::Error => "error",
            TriggerKind::CaughtError => "caught error",
            TriggerKind::Warning => "warning",
        }
    }
}

/// Session-scoped stop-on-event state: one flag/identifier-set pair per
/// trigger family plus the interrupt and NaN/Inf booleans. Flag on with an
/// empty set means stop unconditionally; flag on with identifiers means stop
/// only for those; flag off is inactive regardless of the set.
#[derive(Debug, Default)]
pub struct TriggerState {
    errors_that_stop: BTreeSet<String>,
    caught_that_stop: BTreeSet<String>,
    warnings_that_stop: BTreeSet<String>,
    stop_on_error: bool,
    stop_on_caught: bool,
    stop_on_warning: bool,
    stop_on_interrupt: bool,
    stop_on_naninf: bool,
}

impl TriggerState {
    pub fn new() -> Self {
        TriggerState::default()
    }

    fn set(&mut self, kind: TriggerKind) -> &mut BTreeSet<String> {
        match kind {
            TriggerKind::Error => &mut self.errors_that_stop,
            TriggerKind::CaughtError => &mut self.caught_that_stop,
            TriggerKind::Warning => &mut self.warnings_that_stop,
        }
    }

    fn flag(&mut self, kind: TriggerKind) -> &mut bool {
        match kind {
            TriggerKind::Error => &mut self.stop_on_error,
            TriggerKind::CaughtError => &mut self.stop_on_caught,
            TriggerKind::Warning => &mut self.stop_on_warning,
        }
    }

    pub fn is_active(&self, kind: TriggerKind) -> bool {
        match kind {
            TriggerKind::Error => self.stop_on_error,
            TriggerKind::CaughtError => self.stop_on_caught,
            TriggerKind::Warning => self.stop_on_warning,
        }
    }

    pub fn identifiers(&self, kind: TriggerKind) -> &BTreeSet<String> {
        match kind {
            TriggerKind::Error => &self.errors_that_stop,
            TriggerKind::CaughtError => &self.caught_that_stop,
            TriggerKind::Warning => &self.warnings_that_stop,
        }
    }

    /// Adjust one trigger. With an identifier, activation inserts it and
    /// forces the flag on; deactivation erases it and turns the flag off
    /// only once the set drains empty. With no identifier this is a bulk
    /// toggle: the set is cleared and the flag set to exactly `active`.
    ///
    /// Bulk-enabling the error trigger also raises the interrupt flag
    /// (stop-on-error implies stop-on-interrupt); disabling it leaves the
    /// interrupt flag alone.
    pub fn upsert(&mut self, kind: TriggerKind, active: bool, identifier: Option<&str>) {
        match identifier {
            Some(id) => {
                if active {
                    self.set(kind).insert(id.to_string());
                    *self.flag(kind) = true;
                } else {
                    self.set(kind).remove(id);
                    if self.set(kind).is_empty() {
                        *self.flag(kind) = false;
                    }
                }
            }
            None => {
                self.set(kind).clear();
                *self.flag(kind) = active;
                if kind == TriggerKind::Error && active {
                    self.stop_on_interrupt = true;
                }
            }
        }
    }

    /// Flip a flag without touching the identifier set.
    pub fn set_flag(&mut self, kind: TriggerKind, active: bool) {
        *self.flag(kind) = active;
    }

    pub fn interrupt(&self) -> bool {
        self.stop_on_interrupt
    }

    pub fn set_interrupt(&mut self, active: bool) {
        self.stop_on_interrupt = active;
    }

    pub fn naninf(&self) -> bool {
        self.stop_on_naninf
    }

    pub fn set_naninf(&mut self, active: bool) {
        self.stop_on_naninf = active;
    }

    /// Clear every reason to stop other than breakpoints.
    pub fn clear_all(&mut self) {
        self.stop_on_error = false;
        self.errors_that_stop.clear();

        self.stop_on_caught = false;
        self.caught_that_stop.clear();

        self.stop_on_warning = false;
        self.warnings_that_stop.clear();

        self.stop_on_interrupt = false;
        self.stop_on_naninf = false;
    }
}
