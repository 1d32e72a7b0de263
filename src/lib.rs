pub mod command;
pub mod debugger;
pub mod error;
pub mod expr;
pub mod source;

pub use command::{parse_debug_args, parse_structured_args, CommandArg, CommandVerb, StopParams};
pub use debugger::{BreakpointTable, StopStatus, TriggerKind, TriggerState};
pub use error::{DebugError, Result};
pub use source::{BodyStore, LineMap, Routine, RoutineResolver, Workspace};
