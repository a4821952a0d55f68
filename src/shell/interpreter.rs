use log::{debug, warn};
use std::io;

use crate::shell::commands::transfer::Transfer;
use crate::shell::commands::{cat, cd, help, ls, rm, transfer, CommandKind};
use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::parser::ast::CommandLine;
use crate::shell::parser::Parser;
use crate::shell::session::Session;

/// 一行执行完之后 REPL 该做什么
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Clear,
    Exit,
}

pub struct Interpreter {
    session: Session,
}

impl Interpreter {
    pub fn new(session: Session) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 解析并执行一行。命令自身的失败只打印，不会中断循环；
    /// 只有写控制台失败才返回 `Err`。
    pub fn execute(&mut self, line: &str, console: &mut Console<'_>) -> io::Result<Flow> {
        let command_line = Parser::parse_line(line);
        debug!("执行命令: {:?}", command_line);

        if command_line.has_argument("--help") {
            console.info(&help::help_text(&command_line.program))?;
            return Ok(Flow::Continue);
        }

        if command_line.program == "man" {
            if let Some(name) = command_line.arguments.first() {
                console.info(&help::manual_text(name))?;
                return Ok(Flow::Continue);
            }
        }

        let Some(kind) = CommandKind::parse(&command_line.program) else {
            console.info(&format!("Command '{}' not found.", command_line.raw))?;
            return Ok(Flow::Continue);
        };

        match self.dispatch(kind, &command_line, console) {
            Ok(flow) => Ok(flow),
            Err(CommandError::Output(e)) => Err(e),
            Err(e) => {
                warn!("{} 失败: {}", kind.name(), e);
                console.error(&e.to_string())?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch(
        &mut self,
        kind: CommandKind,
        command_line: &CommandLine,
        console: &mut Console<'_>,
    ) -> Result<Flow, CommandError> {
        let tokens = command_line.tokens();
        match kind {
            CommandKind::Ls => ls::run(&self.session, console, &tokens)?,
            CommandKind::Cd => cd::run(&mut self.session, console, &command_line.arguments)?,
            CommandKind::Clear => return Ok(Flow::Clear),
            CommandKind::Exit => {
                let farewell = console.theme().get_message("exit");
                console.error(&farewell)?;
                return Ok(Flow::Exit);
            }
            CommandKind::Cp => transfer::run(Transfer::Copy, &self.session, console, &tokens)?,
            CommandKind::Mv => transfer::run(Transfer::Move, &self.session, console, &tokens)?,
            CommandKind::Rm => rm::run(&self.session, console, &tokens)?,
            CommandKind::Cat => cat::run(&self.session, console, &tokens)?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::console::AutoConfirm;
    use crate::utils::theme::Theme;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        _dir: tempfile::TempDir,
        root: PathBuf,
        interpreter: Interpreter,
        theme: Theme,
        confirm: AutoConfirm,
    }

    #[allow(clippy::unwrap_used)]
    fn fixture() -> Fixture {
        colored::control::set_override(false);
        let dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(dir.path()).unwrap();
        Fixture {
            _dir: dir,
            interpreter: Interpreter::new(Session::with_home(root.clone(), root.clone())),
            root,
            theme: Theme::default(),
            confirm: AutoConfirm(false),
        }
    }

    #[allow(clippy::unwrap_used)]
    fn exec(fixture: &mut Fixture, line: &str) -> (Flow, String) {
        let mut out = Vec::new();
        let mut console = Console::new(&mut out, &mut fixture.confirm, &fixture.theme);
        let flow = fixture.interpreter.execute(line, &mut console).unwrap();
        (flow, String::from_utf8(out).unwrap())
    }

    #[test]
    fn unknown_command_echoes_original_line() {
        let mut fx = fixture();
        let (flow, output) = exec(&mut fx, "foo bar");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(output, "Command 'foo bar' not found.\n");
    }

    #[test]
    fn empty_line_is_not_found() {
        let mut fx = fixture();
        let (_, output) = exec(&mut fx, "");
        assert_eq!(output, "Command '' not found.\n");
    }

    #[test]
    fn help_wins_over_dispatch_even_for_unknown_commands() {
        let mut fx = fixture();
        let (_, output) = exec(&mut fx, "RM target --help");
        assert!(output.starts_with("Usage: rm [-r] [-f] [file/directory]"));

        let (_, output) = exec(&mut fx, "frobnicate --help");
        assert_eq!(output, "No help available for 'frobnicate'\n");

        let (_, output) = exec(&mut fx, "man --help");
        assert!(output.starts_with("Usage: man"));
    }

    #[test]
    fn man_prints_manual_or_default() {
        let mut fx = fixture();
        let (_, output) = exec(&mut fx, "man cat");
        assert!(output.starts_with("cat - Display or concatenate files"));

        let (_, output) = exec(&mut fx, "MAN nothing");
        assert_eq!(output, "No manual entry for 'nothing'\n");

        let (_, output) = exec(&mut fx, "man");
        assert_eq!(output, "Command 'man' not found.\n");
    }

    #[test]
    fn clear_and_exit_are_reported_to_the_loop() {
        let mut fx = fixture();
        assert_eq!(exec(&mut fx, "clear").0, Flow::Clear);
        let (flow, output) = exec(&mut fx, "Exit");
        assert_eq!(flow, Flow::Exit);
        assert!(output.contains("Exiting RogueV1.0..."));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn command_failures_are_printed_not_propagated() {
        let mut fx = fixture();
        let (flow, output) = exec(&mut fx, "rm ghost");
        assert_eq!(flow, Flow::Continue);
        assert_eq!(output, "Error: ghost is neither a file nor a directory.\n");

        let (_, output) = exec(&mut fx, "cp only-one");
        assert_eq!(output, "Usage: cp [-i] [-v] [source] [destination]\n");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn commands_share_session_state() {
        let mut fx = fixture();
        fs::create_dir(fx.root.join("sub")).unwrap();
        fs::write(fx.root.join("sub/a.txt"), "hello\n").unwrap();

        exec(&mut fx, "cd sub");
        let (_, output) = exec(&mut fx, "cat a.txt");
        assert_eq!(output, "hello\n");

        exec(&mut fx, "cd -");
        assert_eq!(fx.interpreter.session().cwd(), fx.root);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn auto_decline_keeps_destination() {
        let mut fx = fixture();
        fs::write(fx.root.join("a.txt"), "new").unwrap();
        fs::write(fx.root.join("b.txt"), "old").unwrap();

        let (_, output) = exec(&mut fx, "cp -i a.txt b.txt");
        assert!(output.contains("Aborted."));
        assert_eq!(fs::read_to_string(fx.root.join("b.txt")).unwrap(), "old");
    }
}
