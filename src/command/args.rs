use crate::debugger::{SessionContext, TriggerKind, TriggerState};
use crate::error::{DebugError, Result};
use crate::source::LineMap;

/// One argument of a debug command: a word from the console, or a numeric
/// array supplied through the programmatic call form.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandArg {
    Str(String),
    Num(Vec<u32>),
}

impl From<&str> for CommandArg {
    fn from(value: &str) -> Self {
        CommandArg::Str(value.to_string())
    }
}

impl From<u32> for CommandArg {
    fn from(value: u32) -> Self {
        CommandArg::Num(vec![value])
    }
}

impl From<Vec<u32>> for CommandArg {
    fn from(values: Vec<u32>) -> Self {
        CommandArg::Num(values)
    }
}

/// Which debug command the arguments belong to. `stop` forms enable event
/// triggers; `clear` forms disable them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandVerb {
    Stop,
    Clear,
}

impl CommandVerb {
    pub fn name(self) -> &'static str {
        match self {
            CommandVerb::Stop => "stop",
            CommandVerb::Clear => "clear",
        }
    }

    fn enables(self) -> bool {
        self == CommandVerb::Stop
    }
}

/// Parsed `[in name] [at spec] [if condition]` clauses. Unset fields mean
/// "not specified", not an error.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct StopParams {
    pub function: Option<String>,
    pub class: Option<String>,
    pub lines: LineMap,
    pub condition: Option<String>,
}

/// Clause tags after token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Clause {
    In,
    At,
    If,
}

impl Clause {
    fn keyword(self) -> &'static str {
        match self {
            Clause::In => "in",
            Clause::At => "at",
            Clause::If => "if",
        }
    }
}

fn parse_line_number(token: &str) -> Option<u32> {
    token.parse::<u32>().ok().filter(|&n| n > 0)
}

fn string_arg<'a>(who: &str, arg: &'a CommandArg) -> Result<&'a str> {
    match arg {
        CommandArg::Str(s) => Ok(s),
        CommandArg::Num(_) => Err(DebugError::invalid_syntax(format!(
            "{}: expected a string argument",
            who
        ))),
    }
}

fn usage(who: &str) -> DebugError {
    DebugError::invalid_syntax(format!(
        "{}: usage: {} [[in] routine] [[at] [method | line [line ...]]] [if condition]",
        who, who
    ))
}

/// Parse the flat argument list of a stop/clear command.
///
/// `in` and `at` may be implicit: a bare name is an `in` clause, a bare
/// positive integer an `at` clause. Clause order is enforced, never silently
/// corrected. The event forms of `if` (error, warning, caught error,
/// interrupt, naninf) apply to `triggers` immediately; everything else is
/// returned in [`StopParams`] for the caller to act on.
pub fn parse_debug_args(
    verb: CommandVerb,
    args: &[CommandArg],
    triggers: &mut TriggerState,
    session: &dyn SessionContext,
) -> Result<StopParams> {
    let who = verb.name();
    let nargin = args.len();

    match args.first() {
        Some(CommandArg::Str(_)) => {}
        _ => return Err(usage(who)),
    }

    let mut params = StopParams::default();
    let mut list_idx = 0usize;
    let mut seen_in = false;
    let mut seen_at = false;
    let mut seen_if = false;
    let mut pos = 0usize;

    while pos < nargin {
        // Classify with "in" and "at" allowed to be implicit.
        let clause = match &args[pos] {
            CommandArg::Str(word) => match word.as_str() {
                "in" => {
                    pos += 1;
                    Clause::In
                }
                "at" => {
                    pos += 1;
                    Clause::At
                }
                "if" => {
                    pos += 1;
                    Clause::If
                }
                other if parse_line_number(other).is_some() => Clause::At,
                _ => Clause::In,
            },
            CommandArg::Num(_) => Clause::At,
        };

        if pos >= nargin {
            return Err(DebugError::invalid_syntax(format!(
                "{}: '{}' missing argument",
                who,
                clause.keyword()
            )));
        }

        match clause {
            Clause::In => {
                let name = string_arg(who, &args[pos])?;
                if seen_in {
                    return Err(DebugError::invalid_syntax(format!(
                        "{}: too many function names specified -- {}",
                        who, name
                    )));
                }
                if seen_at || seen_if {
                    return Err(DebugError::invalid_syntax(format!(
                        "{}: function name must come before line number and 'if'",
                        who
                    )));
                }
                params.function = Some(name.to_string());
                seen_in = true;
                pos += 1;
            }

            Clause::At => {
                if seen_at {
                    return Err(DebugError::invalid_syntax(format!(
                        "{}: only one 'at' clause is allowed",
                        who
                    )));
                }
                if seen_if {
                    return Err(DebugError::invalid_syntax(format!(
                        "{}: line number must come before 'if' clause",
                        who
                    )));
                }
                seen_at = true;

                if seen_in {
                    if let CommandArg::Str(word) = &args[pos] {
                        if parse_line_number(word).is_none() {
                            // A second name: what we captured as the
                            // function is really a class name, and this
                            // token is the method.
                            params.class = params.function.take();
                            params.function = Some(word.clone());
                            pos += 1;
                            continue;
                        }
                    }
                } else {
                    // A line number with no routine named yet. Legal only
                    // while stopped inside one.
                    match session.stopped_routine() {
                        Some(name) => {
                            params.function = Some(name);
                            seen_in = true;
                        }
                        None => {
                            return Err(DebugError::invalid_syntax(format!(
                                "{}: function name must come before line number and 'if'",
                                who
                            )));
                        }
                    }
                }

                // Read a list of line numbers (or arrays thereof). The first
                // token that is neither begins the next clause.
                while pos < nargin {
                    match &args[pos] {
                        CommandArg::Str(word) => match parse_line_number(word) {
                            Some(line) => {
                                params.lines.insert(list_idx, line);
                                list_idx += 1;
                                pos += 1;
                            }
                            None => break, // may be "if" or a method name
                        },
                        CommandArg::Num(values) => {
                            for &line in values {
                                params.lines.insert(list_idx, line);
                                list_idx += 1;
                            }
                            pos += 1;
                        }
                    }
                }
            }

            Clause::If => {
                seen_if = true;

                if seen_in {
                    // Conditional breakpoint: the remaining arguments form
                    // the condition text.
                    let mut parts = Vec::with_capacity(nargin - pos);
                    while pos < nargin {
                        match &args[pos] {
                            CommandArg::Str(word) => parts.push(word.as_str()),
                            CommandArg::Num(_) => {
                                return Err(DebugError::invalid_syntax(format!(
                                    "{}: arguments to 'if' must all be strings",
                                    who
                                )));
                            }
                        }
                        pos += 1;
                    }
                    params.condition = Some(parts.join(" ").trim().to_string());
                } else {
                    // Stop on event (error, warning, interrupt, NaN/Inf).
                    parse_event_clause(verb, args, &mut pos, triggers)?;
                }
            }
        }
    }

    Ok(params)
}

/// Handle `if <event> [identifier]`, applying the trigger change directly.
fn parse_event_clause(
    verb: CommandVerb,
    args: &[CommandArg],
    pos: &mut usize,
    triggers: &mut TriggerState,
) -> Result<()> {
    let who = verb.name();
    let on_off = verb.enables();
    let event = string_arg(who, &args[*pos])?.to_string();

    match event.as_str() {
        "error" => {
            process_id_list(who, TriggerKind::Error, args, pos, on_off, triggers)?;
        }
        "warning" => {
            process_id_list(who, TriggerKind::Warning, args, pos, on_off, triggers)?;
        }
        "caught"
            if matches!(args.get(*pos + 1), Some(CommandArg::Str(next)) if next == "error") =>
        {
            *pos += 1;
            process_id_list(who, TriggerKind::CaughtError, args, pos, on_off, triggers)?;
        }
        "interrupt" => {
            triggers.set_interrupt(on_off);
        }
        "naninf" => {
            // Recognized but not available in this build; the rest of the
            // command still applies.
            log::warn!("{}: condition '{}' not yet supported", who, event);
        }
        other => {
            return Err(DebugError::invalid_condition(format!(
                "{}: invalid condition {}",
                who, other
            )));
        }
    }

    *pos = args.len();
    Ok(())
}

/// Handle the optional single identifier scoping an error/warning trigger.
fn process_id_list(
    who: &str,
    kind: TriggerKind,
    args: &[CommandArg],
    pos: &mut usize,
    on_off: bool,
    triggers: &mut TriggerState,
) -> Result<()> {
    *pos += 1;

    if *pos < args.len() {
        // Only affect a single identifier.
        let id = match &args[*pos] {
            CommandArg::Str(id) if args.len() == *pos + 1 => id,
            _ => {
                return Err(DebugError::invalid_syntax(format!(
                    "{}: ID must be a single string",
                    who
                )));
            }
        };
        triggers.upsert(kind, on_off, Some(id));
    } else {
        // Unqualified: turn the whole trigger on or off.
        triggers.upsert(kind, on_off, None);
    }

    Ok(())
}
