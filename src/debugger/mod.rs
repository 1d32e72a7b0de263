mod condition;
mod locate;
mod status;
mod table;
mod triggers;

pub use condition::validate_condition;
pub use locate::{locate, RoutinePath};
pub use status::{stop_status, StopStatus};
pub use table::{BreakpointList, BreakpointTable};
pub use triggers::{TriggerKind, TriggerState};

/// Best-effort notification channel for external tooling (an IDE, a debug
/// adapter). Failures here must never affect table bookkeeping, so the hook
/// returns nothing.
pub trait EventNotifier {
    fn breakpoint_changed(&mut self, inserted: bool, file: &str, line: u32);
}

/// Default notifier: nobody is listening.
#[derive(Debug, Default)]
pub struct NullNotifier;

impl EventNotifier for NullNotifier {
    fn breakpoint_changed(&mut self, _inserted: bool, _file: &str, _line: u32) {}
}

/// Notifier that reports breakpoint changes on the log, used by the console
/// binary.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl EventNotifier for LogNotifier {
    fn breakpoint_changed(&mut self, inserted: bool, file: &str, line: u32) {
        if inserted {
            log::info!("breakpoint set in {} at line {}", file, line);
        } else {
            log::info!("breakpoint cleared in {} at line {}", file, line);
        }
    }
}

/// What the command parser needs to know about the running debug session:
/// whether execution is currently stopped inside a routine, and which one.
/// A bare line number with no `in` clause is resolved against this.
pub trait SessionContext {
    fn stopped_routine(&self) -> Option<String>;
}

/// Session context for a debugger that is not stopped anywhere.
#[derive(Debug, Default)]
pub struct NoSession;

impl SessionContext for NoSession {
    fn stopped_routine(&self) -> Option<String> {
        None
    }
}

/// Session context stopped inside a known routine.
#[derive(Debug)]
pub struct StoppedIn(pub String);

impl SessionContext for StoppedIn {
    fn stopped_routine(&self) -> Option<String> {
        Some(self.0.clone())
    }
}
