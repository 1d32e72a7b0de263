use crate::error::{DebugError, Result};
use crate::expr::ExprParser;

/// Cursory check that `cond` can be used as a breakpoint condition.
///
/// An empty condition always passes. Otherwise the text must parse, with a
/// statement terminator appended so partial expressions like `y==` are
/// rejected, into exactly one expression statement. A plain assignment is
/// refused since the user almost certainly meant `==`; side-effecting forms
/// like `y+=10` and `y++` are deliberately accepted.
pub fn validate_condition(parser: &dyn ExprParser, who: &str, cond: &str) -> Result<()> {
    if cond.is_empty() {
        return Ok(());
    }

    let program = parser.parse_program(&format!("{} ;", cond)).map_err(|_| {
        DebugError::invalid_condition(format!("{}: cannot parse condition '{}'", who, cond))
    })?;

    if program.is_empty() {
        return Err(DebugError::invalid_condition(format!(
            "{}: condition is not empty, but has nothing to evaluate",
            who
        )));
    }

    match &program[..] {
        [stmt] if stmt.is_expression() => {
            if stmt.expression().is_some_and(|expr| expr.is_assignment()) {
                return Err(DebugError::invalid_syntax(format!(
                    "{}: condition cannot be an assignment.  Did you mean '=='?",
                    who
                )));
            }
            Ok(())
        }
        _ => Err(DebugError::invalid_condition(format!(
            "{}: condition must be an expression",
            who
        ))),
    }
}
