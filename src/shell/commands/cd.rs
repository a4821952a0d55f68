use log::debug;
use std::path::Path;

use crate::shell::console::Console;
use crate::shell::error::CommandError;
use crate::shell::session::Session;

fn go_home(session: &mut Session) -> Result<(), CommandError> {
    let home = session.home().to_path_buf();
    if !home.is_dir() {
        return Err(CommandError::failed(format!(
            "Error: Home directory '{}' does not exist.",
            home.display()
        )));
    }
    session.change_dir(&home).map_err(io_error)
}

fn io_error(e: std::io::Error) -> CommandError {
    CommandError::failed(format!("Error: {}", e))
}

/// 只看第一个参数：无参数、`-`、`+`、`\`、`~`，其余当作路径
pub fn run(session: &mut Session, console: &mut Console<'_>, arguments: &[String]) -> Result<(), CommandError> {
    match arguments.first().map(String::as_str) {
        None | Some("~") => go_home(session)?,
        Some("-") => {
            if !session.go_back().map_err(io_error)? {
                console.info("No previous directory to return to.")?;
            }
        }
        Some("+") => {
            let stored = session.store_next().display().to_string();
            console.info(&format!("Next directory stored: {}", stored))?;
        }
        Some("\\") => session.change_to_root().map_err(io_error)?,
        Some(path) => session.change_dir(Path::new(path)).map_err(io_error)?,
    }
    debug!(
        "cd: 当前目录 {} (previous: {:?}, next: {:?})",
        session.cwd().display(),
        session.previous(),
        session.next()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::commands::testing::{tokens, Harness};
    use std::fs;

    #[allow(clippy::unwrap_used)]
    fn with_dirs() -> Harness {
        let harness = Harness::new();
        fs::create_dir(harness.path("a")).unwrap();
        fs::create_dir(harness.path("b")).unwrap();
        harness
    }

    fn cd(harness: &mut Harness, line: &str) -> Result<(), CommandError> {
        let args = tokens(line);
        harness.run(|s, c| run(s, c, &args[1..]))
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn no_argument_and_tilde_go_home() {
        let mut harness = with_dirs();
        let home = harness.session.home().to_path_buf();

        cd(&mut harness, "cd").unwrap();
        assert_eq!(harness.session.cwd(), home);

        cd(&mut harness, "cd a").unwrap_err();
        let absolute = format!("cd {}", harness.root.join("a").display());
        cd(&mut harness, &absolute).unwrap();
        cd(&mut harness, "cd ~").unwrap();
        assert_eq!(harness.session.cwd(), home);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn dash_returns_to_prior_directory() {
        let mut harness = with_dirs();
        let root = harness.root.clone();

        cd(&mut harness, "cd a").unwrap();
        assert_eq!(harness.session.cwd(), root.join("a"));
        cd(&mut harness, "cd -").unwrap();
        assert_eq!(harness.session.cwd(), root);
        cd(&mut harness, "cd -").unwrap();
        assert_eq!(harness.session.cwd(), root.join("a"));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn dash_without_history_reports_and_stays() {
        let mut harness = with_dirs();
        cd(&mut harness, "cd -").unwrap();
        assert!(harness.output().contains("No previous directory to return to."));
        assert_eq!(harness.session.cwd(), harness.root);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn plus_then_dash_twice_swaps_back_and_forth() {
        let mut harness = with_dirs();
        let root = harness.root.clone();

        cd(&mut harness, "cd a").unwrap();
        cd(&mut harness, "cd +").unwrap();
        assert_eq!(harness.session.cwd(), root.join("a"));
        assert!(harness
            .output()
            .contains(&format!("Next directory stored: {}", root.join("a").display())));

        cd(&mut harness, "cd ../b").unwrap();
        assert_eq!(harness.session.cwd(), root.join("b"));

        cd(&mut harness, "cd -").unwrap();
        assert_eq!(harness.session.cwd(), root.join("a"));
        cd(&mut harness, "cd -").unwrap();
        assert_eq!(harness.session.cwd(), root.join("b"));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn backslash_goes_to_root() {
        let mut harness = with_dirs();
        cd(&mut harness, "cd \\").unwrap();
        assert_eq!(harness.session.cwd(), Path::new("/"));
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn missing_path_is_reported_and_cwd_kept() {
        let mut harness = with_dirs();
        let err = cd(&mut harness, "cd nowhere").unwrap_err();
        assert!(err.to_string().starts_with("Error: "));
        assert_eq!(harness.session.cwd(), harness.root);
        assert_eq!(harness.session.previous(), None);
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn missing_home_is_reported() {
        let mut harness = with_dirs();
        let root = harness.root.clone();
        harness.session = Session::with_home(root.clone(), root.join("gone"));
        let err = cd(&mut harness, "cd").unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert_eq!(harness.session.cwd(), root);
    }
}
