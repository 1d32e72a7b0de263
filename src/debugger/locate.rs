use crate::source::Routine;

/// Child-index path from a top-level routine down to the (sub)routine that
/// owns a line. Empty path = the top-level routine itself.
pub type RoutinePath = Vec<usize>;

/// Find the sub/nested/main routine of `top` that contains `line`.
///
/// Among all enclosing candidates the one with the smallest ending line wins,
/// which picks the innermost range when nesting is several levels deep. A
/// line falling between routines snaps to the first routine beginning at or
/// after it. Scripts contain every line. Returns `None` when nothing in the
/// construct can own the line.
pub fn locate(top: &Routine, line: u32) -> Option<RoutinePath> {
    locate_in(top, line, None)
}

/// `end_line`, when given, receives the ending line of the resolved routine
/// so ancestor containment checks stay constrained while unwinding.
fn locate_in(routine: &Routine, line: u32, end_line: Option<&mut u32>) -> Option<RoutinePath> {
    let mut found: Option<RoutinePath> = None;
    let mut next_routine: Option<usize> = None;
    let mut earliest_end = u32::MAX;

    for (idx, sub) in routine.subroutines().iter().enumerate() {
        if sub.end_line() < earliest_end && sub.end_line() >= line && sub.begin_line() <= line {
            earliest_end = sub.end_line();
            found = locate_in(sub, line, Some(&mut earliest_end)).map(|mut inner| {
                let mut path = vec![idx];
                path.append(&mut inner);
                path
            });
        }

        // First routine starting after the line, used when the line is in a
        // gap between routines.
        if sub.begin_line() >= line && next_routine.is_none() {
            next_routine = Some(idx);
        }
    }

    // The line is either in a subroutine found above or in this routine.
    if routine.is_function() {
        let end = routine.end_line();
        if end >= line && end < earliest_end {
            found = Some(Vec::new());
        }
        if found.is_none() {
            found = next_routine.map(|idx| vec![idx]);
        }
    } else if found.is_none() {
        found = Some(Vec::new());
    }

    if let Some(end_line) = end_line {
        if earliest_end < *end_line {
            *end_line = earliest_end;
        }
    }

    found
}
