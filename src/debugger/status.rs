use std::fmt;

use serde::Serialize;

use crate::debugger::triggers::{TriggerKind, TriggerState};

/// Structured report of the stop-on-event triggers.
///
/// A trigger that is inactive has its field omitted entirely; active with no
/// identifiers is an empty list ("stop unconditionally"); active with
/// identifiers lists them. `intr` is presence-only. Callers branch on field
/// presence, so the distinction between `None` and `Some(vec![])` matters.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct StopStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caught: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warn: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intr: Option<()>,
}

fn trigger_field(triggers: &TriggerState, kind: TriggerKind) -> Option<Vec<String>> {
    if !triggers.is_active(kind) {
        return None;
    }
    Some(triggers.identifiers(kind).iter().cloned().collect())
}

/// Snapshot the trigger state into a structured report.
pub fn stop_status(triggers: &TriggerState) -> StopStatus {
    StopStatus {
        errs: trigger_field(triggers, TriggerKind::Error),
        caught: trigger_field(triggers, TriggerKind::CaughtError),
        warn: trigger_field(triggers, TriggerKind::Warning),
        intr: if triggers.interrupt() { Some(()) } else { None },
    }
}

impl StopStatus {
    fn write_trigger(
        f: &mut fmt::Formatter<'_>,
        label: &str,
        field: &Option<Vec<String>>,
    ) -> fmt::Result {
        if let Some(ids) = field {
            if ids.is_empty() {
                writeln!(f, "stop if {}", label)?;
            } else {
                for id in ids {
                    writeln!(f, "stop if {} {}", label, id)?;
                }
            }
        }
        Ok(())
    }
}

/// Text mode: one line per active condition or identifier.
impl fmt::Display for StopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        StopStatus::write_trigger(f, "error", &self.errs)?;
        StopStatus::write_trigger(f, "caught error", &self.caught)?;
        StopStatus::write_trigger(f, "warning", &self.warn)?;
        if self.intr.is_some() {
            writeln!(f, "stop if interrupt")?;
        }
        Ok(())
    }
}
