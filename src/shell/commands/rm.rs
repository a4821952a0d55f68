use log::{debug, warn};
use std::fs;
use std::io;

use crate::shell::commands::help;
use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::parser::Parser;
use crate::shell::session::Session;

#[derive(Debug, PartialEq)]
enum Removed {
    File,
    Directory,
}

/// `-f` 只改变失败时的措辞（黄色警告），失败本身仍然报告出来
fn removal_failure(target: &str, force: bool, e: &io::Error) -> (bool, String) {
    if force {
        (true, format!("Force removal failed for {}. Error: {}", target, e))
    } else {
        (false, format!("Error removing {}: {}", target, e))
    }
}

/// `rm [-r] [-f] <target>`
pub fn run(session: &Session, console: &mut Console<'_>, tokens: &[String]) -> Result<(), CommandError> {
    let (flags, positional) = Parser::extract_flags(tokens, &["-r", "-f"]);
    if positional.len() != 2 {
        return Err(CommandError::Usage(help::usage("rm")));
    }
    let target = positional[1];
    let recursive = flags.has("-r");
    let force = flags.has("-f");
    let path = session.resolve(target);

    let result = if path.is_dir() {
        if !recursive {
            return Err(CommandError::failed(format!(
                "Error: {} is a directory. Use -r to remove it.",
                target
            )));
        }
        fs::remove_dir_all(&path).map(|_| Removed::Directory)
    } else if path.is_file() {
        fs::remove_file(&path).map(|_| Removed::File)
    } else {
        return Err(CommandError::failed(format!(
            "Error: {} is neither a file nor a directory.",
            target
        )));
    };

    match result {
        Ok(Removed::Directory) => console.success(&format!("Removed directory {}", target))?,
        Ok(Removed::File) => console.success(&format!("Removed file {}", target))?,
        Err(e) => {
            let (warning, msg) = removal_failure(target, force, &e);
            if !warning {
                return Err(CommandError::failed(msg));
            }
            warn!("rm: {}", msg);
            console.warn(&msg)?;
        }
    }
    debug!("rm: {} 处理完成", path.display());
    Ok(())
}
