use serde_json::Value;

use crate::debugger::{TriggerKind, TriggerState};
use crate::error::{DebugError, Result};

/// Restore trigger state from a structured record, the non-interactive
/// counterpart of the `if <event>` command forms. The record carries
/// optional `errs`, `warn` and `caught` fields (empty for "stop
/// unconditionally", a list of identifier strings for "stop only for these")
/// and a presence-only `intr` field.
pub fn parse_structured_args(record: &Value, triggers: &mut TriggerState) -> Result<()> {
    process_field(record, "errs", TriggerKind::Error, triggers)?;
    process_field(record, "caught", TriggerKind::CaughtError, triggers)?;
    process_field(record, "warn", TriggerKind::Warning, triggers)?;

    if record.get("intr").is_some() {
        triggers.set_interrupt(true);
    }

    Ok(())
}

fn process_field(
    record: &Value,
    field: &str,
    kind: TriggerKind,
    triggers: &mut TriggerState,
) -> Result<()> {
    let value = match record.get(field) {
        Some(value) => value,
        None => return Ok(()),
    };

    match value {
        // Like "stop if <event>" with no identifier.
        Value::Null => triggers.set_flag(kind, true),
        Value::String(s) if s.is_empty() => triggers.set_flag(kind, true),
        Value::Array(items) if items.is_empty() => triggers.set_flag(kind, true),
        Value::Array(items) => {
            for item in items {
                match item.as_str() {
                    Some(id) => triggers.upsert(kind, true, Some(id)),
                    None => {
                        return Err(DebugError::invalid_syntax(format!(
                            "stop: invalid '{}' field",
                            field
                        )));
                    }
                }
            }
        }
        _ => {
            return Err(DebugError::invalid_syntax(format!(
                "stop: invalid '{}' field",
                field
            )));
        }
    }

    Ok(())
}
