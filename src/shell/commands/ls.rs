use log::{debug, warn};
use std::fs;
use std::os::unix::fs::PermissionsExt;

use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::parser::Parser;
use crate::shell::session::Session;
use crate::utils::path::mode_string;

/// `ls [-l] [-a]`，flag 可以出现在任意位置，多余的参数忽略
pub fn run(session: &Session, console: &mut Console<'_>, tokens: &[String]) -> Result<(), CommandError> {
    let (flags, positional) = Parser::extract_flags(tokens, &["-l", "-a"]);
    let long_format = flags.has("-l");
    let show_all = flags.has("-a");
    if positional.len() > 1 {
        debug!("ls: 忽略多余参数 {:?}", &positional[1..]);
    }

    let entries = fs::read_dir(session.cwd()).map_err(|e| {
        CommandError::failed(format!(
            "Error listing {}: {}",
            session.cwd().display(),
            e
        ))
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("ls: 读取目录项失败: {}", e);
                continue;
            }
        };
        let name = entry.file_name().to_string_lossy().into_owned();
        if !show_all && name.starts_with('.') {
            continue;
        }

        let path = entry.path();
        if long_format {
            // 跟随符号链接；断开的链接退回到链接本身
            match fs::metadata(&path).or_else(|_| fs::symlink_metadata(&path)) {
                Ok(meta) => writeln!(
                    console.out,
                    "{} {:>10} {}",
                    mode_string(meta.permissions().mode()),
                    meta.len(),
                    name
                )?,
                Err(e) => console.error(&format!("Error reading {}: {}", name, e))?,
            }
        } else if path.is_dir() {
            names.push((console.theme().dir_style)(format!("{}/", name)));
        } else {
            names.push((console.theme().file_style)(name));
        }
    }

    if !long_format {
        writeln!(console.out, "{}", names.join(" "))?;
    }
    Ok(())
}
