use std::io::{self, BufRead, Write};

use script_debugger::command::{self, CommandArg};
use script_debugger::debugger::{BreakpointTable, LogNotifier, NoSession};
use script_debugger::expr::ScriptParser;
use script_debugger::source::{BodyStore, Routine, Workspace};

/// Small interactive console over the breakpoint table. The real
/// interpreter's command dispatch sits where this loop is; here a demo
/// workspace stands in for user-loaded code.
fn main() -> io::Result<()> {
    env_logger::init();

    let mut workspace = demo_workspace();
    let mut table = BreakpointTable::new(Box::new(ScriptParser::new()), Box::new(LogNotifier));
    let session = NoSession;

    eprintln!("script-debugger console. Commands: stop, clear, status, list, quit.");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let args = match command::split_command_line(line.trim()) {
            Some(args) if !args.is_empty() => args,
            _ => continue,
        };

        let (verb, rest) = match &args[0] {
            CommandArg::Str(word) => (word.as_str(), &args[1..]),
            CommandArg::Num(_) => continue,
        };

        match verb {
            "quit" | "exit" => break,
            "stop" => match command::stop_command(&mut table, &mut workspace, &session, rest) {
                Ok(lines) if !lines.is_empty() => {
                    let placed: Vec<String> = lines.values().map(u32::to_string).collect();
                    println!("breakpoint(s) set at line(s) {}", placed.join(", "));
                }
                Ok(_) => {}
                Err(err) => eprintln!("error: {}", err),
            },
            "clear" => match command::clear_command(&mut table, &mut workspace, &session, rest) {
                Ok(count) => println!("{} breakpoint(s) removed", count),
                Err(err) => eprintln!("error: {}", err),
            },
            "status" => {
                let status = table.stop_status();
                print!("{}", status);
                for (name, bkpts) in table.get_breakpoint_list(&workspace, &[]) {
                    for (line, condition) in bkpts {
                        if condition.is_empty() {
                            println!("breakpoint in {} at line {}", name, line);
                        } else {
                            println!("breakpoint in {} at line {} if {}", name, line, condition);
                        }
                    }
                }
            }
            "list" => {
                for name in table.breakpoint_files() {
                    println!("{}", name);
                }
            }
            other => eprintln!("unknown command: {}", other),
        }
    }

    Ok(())
}

/// A couple of routines to poke at: a function with a subfunction, and a
/// script.
fn demo_workspace() -> Workspace {
    let mut workspace = Workspace::new();

    workspace.add(
        Routine::function("greet", 1, 40)
            .with_body(BodyStore::new([3, 5, 8, 12, 20, 33]))
            .with_subroutine(
                Routine::function("format_name", 45, 60)
                    .with_file("greet")
                    .with_body(BodyStore::new([46, 47, 52, 59])),
            ),
    );

    workspace.add(Routine::script("setup").with_body(BodyStore::new([2, 4, 9, 15])));

    workspace
}
