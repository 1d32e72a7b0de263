use script_debugger::command::{self, CommandArg};
use script_debugger::debugger::{BreakpointTable, NoSession};
use script_debugger::source::{BodyStore, LineMap, Routine, Workspace};

// Fixture: `help` spans lines 1-120 with subfunction `do_contents` at
// 150-210 in the same file; `ls` spans 55-110 with line 102 blank (the next
// statement is at 105).
fn fixture_workspace() -> Workspace {
    let mut workspace = Workspace::new();

    workspace.add(
        Routine::function("help", 1, 120)
            .with_body(BodyStore::new([52, 60, 104, 118]))
            .with_subroutine(
                Routine::function("do_contents", 150, 210)
                    .with_file("help")
                    .with_body(BodyStore::new([151, 160, 204, 209])),
            ),
    );

    workspace.add(Routine::function("ls", 55, 110).with_body(BodyStore::new([60, 75, 105])));

    workspace
}

fn str_args(words: &[&str]) -> Vec<CommandArg> {
    words.iter().map(|w| CommandArg::from(*w)).collect()
}

fn stop(table: &mut BreakpointTable, workspace: &mut Workspace, words: &[&str]) -> LineMap {
    command::stop_command(table, workspace, &NoSession, &str_args(words))
        .expect("stop command should succeed")
}

fn lines_of(lines: &[u32]) -> LineMap {
    lines
        .iter()
        .enumerate()
        .map(|(idx, &line)| (idx, line))
        .collect()
}

mod table_tests {
    use super::*;

    #[test]
    fn add_breakpoint_reports_actual_line_top_level() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        // 50 is blank; the next executable line of help is 52.
        let actual = table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[50]), "")
            .unwrap();
        assert_eq!(actual, lines_of(&[52]));

        let list = table.get_breakpoint_list(&workspace, &[]);
        assert_eq!(list["help"], vec![(52, String::new())]);
    }

    #[test]
    fn add_breakpoint_reports_actual_line_nested() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        // 200 falls inside do_contents; its next statement is at 204.
        let actual = table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[200]), "")
            .unwrap();
        assert_eq!(actual, lines_of(&[204]));

        let list = table.get_breakpoint_list(&workspace, &[]);
        assert!(!list.contains_key("help"), "top-level body should be empty");
        assert_eq!(list["help>do_contents"], vec![(204, String::new())]);
    }

    #[test]
    fn qualified_name_normalizes_to_file() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help>do_contents", "", &lines_of(&[204]), "")
            .unwrap();

        assert_eq!(table.breakpoint_files(), vec!["help"]);
    }

    #[test]
    fn duplicate_insertion_keeps_last_condition() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104]), "x==1")
            .unwrap();
        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104]), "x==2")
            .unwrap();

        let list = table.get_breakpoint_list(&workspace, &[]);
        assert_eq!(list["help"], vec![(104, "x==2".to_string())]);
    }

    #[test]
    fn multi_line_insert_is_not_transactional() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        // 104 places fine; 500 is beyond everything in the file and is
        // dropped without undoing the first line.
        let actual = table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104, 500]), "")
            .unwrap();
        assert_eq!(actual.len(), 1);
        assert_eq!(actual[&0], 104);

        let list = table.get_breakpoint_list(&workspace, &[]);
        assert_eq!(list["help"], vec![(104, String::new())]);
    }

    #[test]
    fn add_breakpoint_unknown_function_fails() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        let err = table
            .add_breakpoint(&mut workspace, "nonesuch", "", &lines_of(&[1]), "")
            .unwrap_err();
        assert!(
            err.to_string().contains("unable to find function"),
            "unexpected message: {}",
            err
        );
    }

    #[test]
    fn remove_breakpoint_sweeps_subfunctions() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104, 204]), "")
            .unwrap();

        // Same line list applied to the top level and every subfunction.
        let removed = table
            .remove_breakpoint(&mut workspace, "help", &lines_of(&[104, 204]))
            .unwrap();
        assert_eq!(removed, 2);
        assert!(!table.has_breakpoints());
    }

    #[test]
    fn remove_breakpoint_keeps_name_while_any_remain() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104, 204]), "")
            .unwrap();

        table
            .remove_breakpoint(&mut workspace, "help", &lines_of(&[104]))
            .unwrap();
        assert_eq!(table.breakpoint_files(), vec!["help"]);

        table
            .remove_breakpoint(&mut workspace, "help", &lines_of(&[204]))
            .unwrap();
        assert!(!table.has_breakpoints());
    }

    #[test]
    fn remove_all_in_file_clears_listing_and_name_set() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[52, 204]), "")
            .unwrap();
        table
            .add_breakpoint(&mut workspace, "ls", "", &lines_of(&[60]), "")
            .unwrap();

        let removed = table
            .remove_all_breakpoints_in_file(&mut workspace, "help", false)
            .unwrap();
        assert_eq!(removed.len(), 2);

        let filter = vec!["help".to_string()];
        assert!(table.get_breakpoint_list(&workspace, &filter).is_empty());
        assert_eq!(table.breakpoint_files(), vec!["ls"]);
    }

    #[test]
    fn remove_all_in_file_silent_tolerates_unknown_name() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        let removed = table
            .remove_all_breakpoints_in_file(&mut workspace, "nonesuch", true)
            .unwrap();
        assert!(removed.is_empty());

        let err = table
            .remove_all_breakpoints_in_file(&mut workspace, "nonesuch", false)
            .unwrap_err();
        assert!(err.to_string().contains("unable to find function"));
    }

    #[test]
    fn remove_all_breakpoints_empties_the_table() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[52, 104, 204]), "")
            .unwrap();
        table
            .add_breakpoint(&mut workspace, "ls", "", &lines_of(&[60, 105]), "")
            .unwrap();

        // Removal mutates the name set being iterated; must still terminate
        // and leave nothing behind.
        table.remove_all_breakpoints(&mut workspace).unwrap();
        assert!(!table.has_breakpoints());
        assert!(table.get_breakpoint_list(&workspace, &[]).is_empty());
    }

    #[test]
    fn mutations_mark_debug_state_stale() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();
        assert!(!table.debug_state_stale());

        table
            .add_breakpoint(&mut workspace, "help", "", &lines_of(&[104]), "")
            .unwrap();
        assert!(table.debug_state_stale());

        table.mark_debug_state_fresh();
        table
            .remove_breakpoint(&mut workspace, "help", &lines_of(&[104]))
            .unwrap();
        assert!(table.debug_state_stale());
    }
}

mod end_to_end {
    use super::*;

    #[test]
    fn console_session_matches_expected_listing() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        assert_eq!(stop(&mut table, &mut workspace, &["help"]), lines_of(&[52]));
        assert_eq!(
            stop(&mut table, &mut workspace, &["in", "ls"]),
            lines_of(&[60])
        );
        assert_eq!(
            stop(&mut table, &mut workspace, &["help", "at", "104"]),
            lines_of(&[104])
        );
        // 102 is not executable; the breakpoint snaps to 105.
        assert_eq!(
            stop(&mut table, &mut workspace, &["in", "ls", "102"]),
            lines_of(&[105])
        );
        assert_eq!(
            stop(&mut table, &mut workspace, &["help", "204", "if", "a==5"]),
            lines_of(&[204])
        );
        stop(&mut table, &mut workspace, &["if", "error", "X:y"]);

        let list = table.get_breakpoint_list(&workspace, &[]);
        let expected: Vec<(&str, u32)> = vec![
            ("help", 52),
            ("help", 104),
            ("help>do_contents", 204),
            ("ls", 60),
            ("ls", 105),
        ];
        let actual: Vec<(&str, u32)> = list
            .iter()
            .flat_map(|(name, bkpts)| bkpts.iter().map(move |&(line, _)| (name.as_str(), line)))
            .collect();
        assert_eq!(actual, expected);

        assert_eq!(
            list["help>do_contents"],
            vec![(204, "a==5".to_string())]
        );

        let status = table.stop_status();
        assert_eq!(status.errs, Some(vec!["X:y".to_string()]));

        // clear all wipes breakpoints and signals alike.
        command::clear_command(&mut table, &mut workspace, &NoSession, &str_args(&["all"]))
            .unwrap();
        assert!(table.get_breakpoint_list(&workspace, &[]).is_empty());
        assert_eq!(table.stop_status(), Default::default());
    }

    #[test]
    fn clear_command_with_lines_removes_only_those() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        stop(&mut table, &mut workspace, &["help", "at", "104"]);
        stop(&mut table, &mut workspace, &["help", "204"]);

        let removed = command::clear_command(
            &mut table,
            &mut workspace,
            &NoSession,
            &str_args(&["help", "at", "204"]),
        )
        .unwrap();
        assert_eq!(removed, 1);

        let list = table.get_breakpoint_list(&workspace, &[]);
        assert_eq!(list["help"], vec![(104, String::new())]);
        assert!(!list.contains_key("help>do_contents"));
    }

    #[test]
    fn clear_command_with_name_only_clears_whole_file() {
        let mut workspace = fixture_workspace();
        let mut table = BreakpointTable::default();

        stop(&mut table, &mut workspace, &["help", "at", "104"]);
        stop(&mut table, &mut workspace, &["help", "204"]);
        stop(&mut table, &mut workspace, &["in", "ls"]);

        let removed = command::clear_command(
            &mut table,
            &mut workspace,
            &NoSession,
            &str_args(&["help"]),
        )
        .unwrap();
        assert_eq!(removed, 2);
        assert_eq!(table.breakpoint_files(), vec!["ls"]);
    }
}

mod line_resolution {
    use super::*;
    use script_debugger::debugger::locate;

    fn nested_fixture() -> Routine {
        // outer 1-100 holding inner 20-60, which holds innermost 30-40.
        Routine::function("outer", 1, 100)
            .with_body(BodyStore::new([2, 70, 99]))
            .with_subroutine(
                Routine::function("inner", 20, 60)
                    .with_file("outer")
                    .with_body(BodyStore::new([21, 50]))
                    .with_subroutine(
                        Routine::function("innermost", 30, 40)
                            .with_file("outer")
                            .with_body(BodyStore::new([31, 39])),
                    ),
            )
    }

    #[test]
    fn innermost_range_wins() {
        let outer = nested_fixture();

        let path = locate(&outer, 35).unwrap();
        assert_eq!(outer.descend(&path).unwrap().name(), "innermost");

        let path = locate(&outer, 50).unwrap();
        assert_eq!(outer.descend(&path).unwrap().name(), "inner");

        let path = locate(&outer, 70).unwrap();
        assert_eq!(outer.descend(&path).unwrap().name(), "outer");
    }

    #[test]
    fn gap_snaps_to_next_routine() {
        // ahead starts after the requested line; the gap between the
        // top-level range and the subfunction snaps forward.
        let top = Routine::function("top", 1, 10)
            .with_body(BodyStore::new([2]))
            .with_subroutine(
                Routine::function("ahead", 30, 50)
                    .with_file("top")
                    .with_body(BodyStore::new([31])),
            );

        let path = locate(&top, 15).unwrap();
        assert_eq!(top.descend(&path).unwrap().name(), "ahead");
    }

    #[test]
    fn scripts_contain_every_line() {
        let script = Routine::script("setup").with_body(BodyStore::new([2, 4, 9]));
        let path = locate(&script, 9999).unwrap();
        assert!(path.is_empty());
    }

    #[test]
    fn line_beyond_everything_resolves_nowhere() {
        let top = Routine::function("top", 1, 10).with_body(BodyStore::new([2]));
        assert!(locate(&top, 500).is_none());
    }
}
