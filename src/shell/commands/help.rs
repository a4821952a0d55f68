use once_cell::sync::Lazy;
use std::collections::HashMap;

/// `<cmd> --help` 的文本，第一行同时是参数错误时的用法提示
static COMMANDS_HELP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "ls",
            "Usage: ls [-l] [-a]\n\nList directory contents. Use -l for long listing format and -a for including hidden files.",
        ),
        (
            "cd",
            "Usage: cd [path] or cd .. or cd - or cd + or cd ~ or cd \\\n\nChange the current directory. 'cd +' remembers the current directory, 'cd -' returns to it.",
        ),
        (
            "cp",
            "Usage: cp [-i] [-v] [source] [destination]\n\nCopy files from source to destination. Use -i for interactive mode, and -v for verbose output.",
        ),
        (
            "mv",
            "Usage: mv [-i] [-v] [source] [destination]\n\nMove files from source to destination. Use -i for interactive mode, and -v for verbose output.",
        ),
        (
            "rm",
            "Usage: rm [-r] [-f] [file/directory]\n\nRemove a file or directory. Use -r for recursive removal and -f for forced removal.",
        ),
        (
            "cat",
            "Usage: cat [file] or cat [source...] > [target] or cat [source...] >> [target]\n\nDisplay a file, or concatenate files into a target ('>' overwrites, '>>' appends).",
        ),
        ("clear", "Usage: clear\n\nClear the terminal screen."),
        ("exit", "Usage: exit\n\nLeave the shell."),
        ("man", "Usage: man [command]\n\nShow the manual page of a command."),
    ])
});

static COMMANDS_MANUAL: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        (
            "ls",
            "ls - List directory contents\n    Usage: ls [-l] [-a]\n    Options:\n    -l: Long listing format\n    -a: Show all files, including hidden ones\n",
        ),
        (
            "cd",
            "cd - Change the current directory\n    Usage: cd [path|-|+|~|\\]\n    (none): Go to the home directory\n    -: Go back to the stored or previous directory\n    +: Remember the current directory for 'cd -'\n    ~: Go to the home directory\n    \\: Go to the root of the current volume\n",
        ),
        (
            "cp",
            "cp - Copy files and directories\n    Usage: cp [-i] [-v] [source] [destination]\n    Options:\n    -i: Interactive mode (prompt before overwrite)\n    -v: Verbose mode (show what is being done)\n",
        ),
        (
            "mv",
            "mv - Move or rename files\n    Usage: mv [-i] [-v] [source] [destination]\n    Options:\n    -i: Interactive mode (prompt before overwrite)\n    -v: Verbose mode (show what is being done)\n",
        ),
        (
            "rm",
            "rm - Remove files or directories\n    Usage: rm [-r] [-f] [file/directory]\n    Options:\n    -r: Remove directories recursively\n    -f: Force removal (failures are reported as warnings)\n",
        ),
        (
            "cat",
            "cat - Display or concatenate files\n    Usage: cat [file]\n           cat [source...] > [target]\n           cat [source...] >> [target]\n    >: Replace target with the sources\n    >>: Append the sources to target\n",
        ),
        ("clear", "clear - Clear the terminal screen\n    Usage: clear\n"),
        ("exit", "exit - Leave the shell\n    Usage: exit\n"),
        ("man", "man - Show a manual page\n    Usage: man [command]\n"),
    ])
});

pub fn help_text(command: &str) -> String {
    COMMANDS_HELP
        .get(command)
        .map(|text| text.to_string())
        .unwrap_or_else(|| format!("No help available for '{}'", command))
}

pub fn manual_text(command: &str) -> String {
    COMMANDS_MANUAL
        .get(command)
        .map(|text| text.to_string())
        .unwrap_or_else(|| format!("No manual entry for '{}'", command))
}

/// help 文本的第一行
pub fn usage(command: &str) -> &'static str {
    COMMANDS_HELP
        .get(command)
        .and_then(|&text| text.lines().next())
        .unwrap_or("Usage: unknown command")
}
