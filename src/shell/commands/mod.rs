pub mod cat;
pub mod cd;
pub mod help;
pub mod ls;
pub mod rm;
pub mod transfer;

/// 内建命令。新增命令时 `Interpreter::dispatch` 的 match 会强制处理它
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Ls,
    Cd,
    Clear,
    Exit,
    Cp,
    Mv,
    Rm,
    Cat,
}

impl CommandKind {
    pub const ALL: [CommandKind; 8] = [
        CommandKind::Ls,
        CommandKind::Cd,
        CommandKind::Clear,
        CommandKind::Exit,
        CommandKind::Cp,
        CommandKind::Mv,
        CommandKind::Rm,
        CommandKind::Cat,
    ];

    /// 期望已经转成小写的命令词
    pub fn parse(program: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == program)
    }

    pub fn name(self) -> &'static str {
        match self {
            CommandKind::Ls => "ls",
            CommandKind::Cd => "cd",
            CommandKind::Clear => "clear",
            CommandKind::Exit => "exit",
            CommandKind::Cp => "cp",
            CommandKind::Mv => "mv",
            CommandKind::Rm => "rm",
            CommandKind::Cat => "cat",
        }
    }
}
