mod args;
mod structured;

pub use args::{parse_debug_args, CommandArg, CommandVerb, StopParams};
pub use structured::parse_structured_args;

use crate::debugger::{BreakpointTable, SessionContext};
use crate::error::Result;
use crate::source::{LineMap, RoutineResolver};

/// Split a raw console line into command arguments, honoring quoting.
pub fn split_command_line(line: &str) -> Option<Vec<CommandArg>> {
    shlex::split(line).map(|words| words.into_iter().map(CommandArg::Str).collect())
}

/// Apply a complete stop command. Event forms are handled entirely inside
/// the parser; when a routine is named, breakpoints are inserted, at line 1
/// if the command carries no `at` clause. Returns the actual lines set.
pub fn stop_command(
    table: &mut BreakpointTable,
    resolver: &mut dyn RoutineResolver,
    session: &dyn SessionContext,
    args: &[CommandArg],
) -> Result<LineMap> {
    let params = parse_debug_args(CommandVerb::Stop, args, &mut table.triggers, session)?;

    if let Some(function) = params.function {
        let mut lines = params.lines;
        if lines.is_empty() {
            lines.insert(0, 1);
        }
        let condition = params.condition.unwrap_or_default();
        let class = params.class.unwrap_or_default();
        return table.add_breakpoint(resolver, &function, &class, &lines, &condition);
    }

    Ok(LineMap::new())
}

/// Apply a complete clear command. `clear all` wipes every breakpoint and
/// every stop-on-event signal. Returns the number of breakpoints removed.
pub fn clear_command(
    table: &mut BreakpointTable,
    resolver: &mut dyn RoutineResolver,
    session: &dyn SessionContext,
    args: &[CommandArg],
) -> Result<usize> {
    if let [CommandArg::Str(word)] = args {
        if word == "all" {
            table.remove_all_breakpoints(resolver)?;
            table.clear_all_signals();
            return Ok(0);
        }
    }

    let params = parse_debug_args(CommandVerb::Clear, args, &mut table.triggers, session)?;

    if let Some(function) = params.function {
        return table.remove_breakpoint(resolver, &function, &params.lines);
    }

    Ok(0)
}
