use log::{debug, warn};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::shell::commands::help;
use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::parser::ast::Redirection;
use crate::shell::parser::lexer::RedirectOp;
use crate::shell::parser::Parser;
use crate::shell::session::Session;

/// 逐行搬运，保留原始换行和非 UTF-8 字节
fn stream_lines(path: &Path, out: &mut dyn Write) -> io::Result<u64> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut line = Vec::new();
    let mut total = 0;
    loop {
        line.clear();
        let n = reader.read_until(b'\n', &mut line)?;
        if n == 0 {
            break;
        }
        out.write_all(&line)?;
        total += n as u64;
    }
    Ok(total)
}

/// `cat <file>` 或 `cat <src...> (>|>>) <target>`
pub fn run(session: &Session, console: &mut Console<'_>, tokens: &[String]) -> Result<(), CommandError> {
    let arguments = tokens.get(1..).unwrap_or_default();
    match Parser::parse_redirection(arguments) {
        Ok(None) if arguments.len() == 1 => display(session, console, &arguments[0]),
        Ok(Some(redirection)) => concatenate(session, console, &redirection),
        Ok(None) => Err(CommandError::Usage(help::usage("cat"))),
        Err(reason) => {
            debug!("cat: {}", reason);
            Err(CommandError::Usage(help::usage("cat")))
        }
    }
}

fn display(session: &Session, console: &mut Console<'_>, name: &str) -> Result<(), CommandError> {
    let path = session.resolve(name);
    if path.is_dir() {
        return Err(CommandError::failed(format!("cat: {}: Is a directory", name)));
    }
    match stream_lines(&path, &mut *console.out) {
        Ok(bytes) => {
            debug!("cat: 输出 {} 字节", bytes);
            Ok(())
        }
        Err(e) => Err(CommandError::failed(format!("Error reading file {}: {}", name, e))),
    }
}

fn concatenate(
    session: &Session,
    console: &mut Console<'_>,
    redirection: &Redirection,
) -> Result<(), CommandError> {
    let target = session.resolve(&redirection.target);
    let target_canonical = fs::canonicalize(&target).ok();

    // 先校验所有源文件，坏的只警告并跳过
    let mut sources: Vec<(&str, PathBuf)> = Vec::new();
    for name in &redirection.sources {
        let path = session.resolve(name);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => {
                if target_canonical.is_some() && fs::canonicalize(&path).ok() == target_canonical {
                    console.warn(&format!("Warning: {}: input file is output file, skipping.", name))?;
                    continue;
                }
                sources.push((name.as_str(), path));
            }
            Ok(_) => console.warn(&format!("Warning: {} is a directory, skipping.", name))?,
            Err(_) => console.warn(&format!("Warning: {} does not exist, skipping.", name))?,
        }
    }

    if redirection.operator == RedirectOp::Output && fs::symlink_metadata(&target).is_ok() {
        fs::remove_file(&target).map_err(|e| {
            CommandError::failed(format!("Error overwriting {}: {}", redirection.target, e))
        })?;
    }

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&target)
        .map_err(|e| CommandError::failed(format!("Error opening {}: {}", redirection.target, e)))?;
    let mut writer = BufWriter::new(file);

    for (name, path) in sources {
        match stream_lines(&path, &mut writer) {
            Ok(bytes) => debug!("cat: {} -> {} ({} 字节)", name, redirection.target, bytes),
            Err(e) => {
                warn!("cat: {} 拼接失败: {}", name, e);
                console.error(&format!("Error concatenating {}: {}", name, e))?;
            }
        }
    }

    writer
        .flush()
        .map_err(|e| CommandError::failed(format!("Error writing {}: {}", redirection.target, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testing::{tokens, Harness};

    fn exec(harness: &mut Harness, line: &str) -> Result<(), CommandError> {
        let args = tokens(line);
        harness.run(|s, c| run(s, c, &args))
    }

    #[allow(clippy::unwrap_used)]
    fn with_sources() -> Harness {
        let harness = Harness::new();
        fs::write(harness.path("a.txt"), "a1\na2\n").unwrap();
        fs::write(harness.path("b.txt"), "b1\nb2").unwrap();
        harness
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn displays_single_file() {
        let mut harness = with_sources();
        exec(&mut harness, "cat a.txt").unwrap();
        assert_eq!(harness.output(), "a1\na2\n");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn display_errors_are_reported() {
        let mut harness = with_sources();
        let err = exec(&mut harness, "cat ghost.txt").unwrap_err();
        assert!(err.to_string().starts_with("Error reading file ghost.txt:"));

        fs::create_dir(harness.path("dir")).unwrap();
        let err = exec(&mut harness, "cat dir").unwrap_err();
        assert_eq!(err.to_string(), "cat: dir: Is a directory");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn overwrite_replaces_existing_target() {
        let mut harness = with_sources();
        fs::write(harness.path("c.txt"), "stale content\n").unwrap();

        exec(&mut harness, "cat a.txt b.txt > c.txt").unwrap();
        assert_eq!(fs::read_to_string(harness.path("c.txt")).unwrap(), "a1\na2\nb1\nb2");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn append_keeps_existing_target() {
        let mut harness = with_sources();
        fs::write(harness.path("c.txt"), "X\n").unwrap();

        exec(&mut harness, "cat a.txt b.txt >> c.txt").unwrap();
        assert_eq!(fs::read_to_string(harness.path("c.txt")).unwrap(), "X\na1\na2\nb1\nb2");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn bad_sources_are_skipped_not_fatal() {
        let mut harness = with_sources();
        fs::create_dir(harness.path("dir")).unwrap();

        exec(&mut harness, "cat ghost.txt dir b.txt > c.txt").unwrap();
        let output = harness.output();
        assert!(output.contains("Warning: ghost.txt does not exist, skipping."));
        assert!(output.contains("Warning: dir is a directory, skipping."));
        assert_eq!(fs::read_to_string(harness.path("c.txt")).unwrap(), "b1\nb2");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn target_is_never_its_own_source() {
        let mut harness = with_sources();
        exec(&mut harness, "cat a.txt b.txt >> a.txt").unwrap();
        assert!(harness.output().contains("input file is output file"));
        assert_eq!(fs::read_to_string(harness.path("a.txt")).unwrap(), "a1\na2\nb1\nb2");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn redirect_without_sources_creates_empty_target() {
        let mut harness = with_sources();
        fs::write(harness.path("c.txt"), "old").unwrap();
        exec(&mut harness, "cat > c.txt").unwrap();
        assert_eq!(fs::read_to_string(harness.path("c.txt")).unwrap(), "");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn usage_errors_perform_no_io() {
        let mut harness = with_sources();
        for line in [
            "cat",
            "cat a.txt b.txt",
            "cat a.txt >",
            "cat a.txt > c.txt d.txt",
            "cat a.txt > c.txt >> d.txt",
        ] {
            let err = exec(&mut harness, line).unwrap_err();
            assert!(matches!(err, CommandError::Usage(_)), "{}", line);
        }
        assert!(!harness.path("c.txt").exists());
        assert!(!harness.path("d.txt").exists());
        assert_eq!(harness.output(), "");
    }
}
