use log::{debug, warn};
use nix::errno::Errno;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::shell::commands::help;
use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::parser::Parser;
use crate::shell::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transfer {
    Copy,
    Move,
}

impl Transfer {
    fn name(self) -> &'static str {
        match self {
            Transfer::Copy => "cp",
            Transfer::Move => "mv",
        }
    }

    fn past(self) -> &'static str {
        match self {
            Transfer::Copy => "Copied",
            Transfer::Move => "Moved",
        }
    }

    fn gerund(self) -> &'static str {
        match self {
            Transfer::Copy => "copying",
            Transfer::Move => "moving",
        }
    }
}

/// `cp|mv [-i] [-v] <src> <dst>`
pub fn run(
    transfer: Transfer,
    session: &Session,
    console: &mut Console<'_>,
    tokens: &[String],
) -> Result<(), CommandError> {
    let (flags, positional) = Parser::extract_flags(tokens, &["-i", "-v"]);
    if positional.len() != 3 {
        return Err(CommandError::Usage(help::usage(transfer.name())));
    }
    let (source, destination) = (positional[1], positional[2]);

    if flags.has("-i") {
        let question = format!("Are you sure you want to overwrite {}? (y/n): ", destination);
        if !console.confirm(&question)? {
            console.warn("Aborted.")?;
            return Ok(());
        }
    }

    let src = session.resolve(source);
    let dst = session.resolve(destination);
    debug!("{}: {} -> {}", transfer.name(), src.display(), dst.display());
    let result = match transfer {
        Transfer::Copy => copy_path(&src, &dst),
        Transfer::Move => move_path(&src, &dst),
    };

    match result {
        Ok(()) => {
            if flags.has("-v") {
                console.success(&format!("{} {} to {}", transfer.past(), source, destination))?;
            }
            Ok(())
        }
        Err(e) => Err(CommandError::failed(format!(
            "Error {} file: {}",
            transfer.gerund(),
            e
        ))),
    }
}

/// 目标是已存在的目录时，源放进该目录
fn destination_for(src: &Path, dst: &Path) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst.to_path_buf(),
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

pub fn copy_path(src: &Path, dst: &Path) -> io::Result<()> {
    let target = destination_for(src, dst);
    copy_into(src, &target)
}

fn copy_into(src: &Path, target: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    if same_file(src, target) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("'{}' and '{}' are the same file", src.display(), target.display()),
        ));
    }

    if meta.is_dir() {
        let parent = target.parent().and_then(|p| fs::canonicalize(p).ok());
        let source = fs::canonicalize(src)?;
        if parent.is_some_and(|p| p.starts_with(&source)) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("cannot copy directory '{}' into itself", src.display()),
            ));
        }
        copy_dir_all(src, target)
    } else {
        fs::copy(src, target).map(|_| ())
    }
}

fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir_all(dst)?;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let from = entry.path();
        let to = dst.join(entry.file_name());
        if fs::metadata(&from)?.is_dir() {
            copy_dir_all(&from, &to)?;
        } else {
            fs::copy(&from, &to)?;
        }
    }
    Ok(())
}

pub fn move_path(src: &Path, dst: &Path) -> io::Result<()> {
    fs::symlink_metadata(src)?;
    let target = destination_for(src, dst);
    match fs::rename(src, &target) {
        Ok(()) => Ok(()),
        // 跨设备时退回到复制后删除
        Err(e) if e.raw_os_error() == Some(Errno::EXDEV as i32) => {
            warn!("mv: {} 跨设备，改为复制后删除", src.display());
            copy_into(src, &target)?;
            if fs::metadata(src)?.is_dir() {
                fs::remove_dir_all(src)
            } else {
                fs::remove_file(src)
            }
        }
        Err(e) => Err(e),
    }
}
