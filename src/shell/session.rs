use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::utils::path::{home_dir, root_of};

/// 一个 shell 会话的可变状态：工作目录和 `cd -`/`cd +` 的两个历史槽位
#[derive(Debug, Clone)]
pub struct Session {
    cwd: PathBuf,
    home: PathBuf,
    previous: Option<PathBuf>,
    next: Option<PathBuf>,
}

impl Session {
    pub fn new(cwd: PathBuf) -> Self {
        Self::with_home(cwd, home_dir())
    }

    pub fn with_home(cwd: PathBuf, home: PathBuf) -> Self {
        Self {
            cwd,
            home,
            previous: None,
            next: None,
        }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn previous(&self) -> Option<&Path> {
        self.previous.as_deref()
    }

    pub fn next(&self) -> Option<&Path> {
        self.next.as_deref()
    }

    /// 相对路径按会话工作目录解析
    pub fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// 切换目录；成功后离开的目录进入 previous 槽位，失败时状态不变
    pub fn change_dir(&mut self, target: &Path) -> io::Result<()> {
        let resolved = if target.is_absolute() {
            target.to_path_buf()
        } else {
            self.cwd.join(target)
        };
        let canonical = fs::canonicalize(&resolved)?;
        if !fs::metadata(&canonical)?.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("Not a directory: '{}'", target.display()),
            ));
        }
        // 没有搜索权限时 stat `dir/.` 会失败，和 chdir 的行为一致
        fs::metadata(canonical.join("."))?;

        debug!("cd: {} -> {}", self.cwd.display(), canonical.display());
        let left = std::mem::replace(&mut self.cwd, canonical);
        self.previous = Some(left);
        Ok(())
    }

    pub fn change_to_root(&mut self) -> io::Result<()> {
        let root = root_of(&self.cwd);
        self.change_dir(&root)
    }

    /// 记录当前目录到 next 槽位，不切换目录
    pub fn store_next(&mut self) -> &Path {
        self.next.insert(self.cwd.clone())
    }

    /// `cd -`：优先回到 next 并与当前目录互换，否则回到 previous。
    /// 两个槽位都为空时返回 `Ok(false)`。
    pub fn go_back(&mut self) -> io::Result<bool> {
        if let Some(next) = self.next.clone() {
            let left = self.cwd.clone();
            self.change_dir(&next)?;
            self.next = Some(left);
            return Ok(true);
        }
        match self.previous.clone() {
            Some(previous) => {
                self.change_dir(&previous)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
