mod body;
mod routine;
mod workspace;

use std::collections::BTreeMap;

pub use body::BodyStore;
pub use routine::{Routine, RoutineKind};
pub use workspace::{RoutineResolver, Workspace};

/// Ordered index -> line number mapping. Callers pass requested lines in and
/// get the actual inserted lines back; 0 means the entry did not apply.
pub type LineMap = BTreeMap<usize, u32>;

/// Strip a `file>subroutine` qualifier down to the file name.
pub fn base_name(name: &str) -> &str {
    match name.find('>') {
        Some(pos) => &name[..pos],
        None => name,
    }
}
