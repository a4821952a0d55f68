use std::borrow::Cow;
use std::env;
use std::path::{Path, PathBuf};

use log::error;
use nix::libc::mode_t;
use nix::sys::stat::{Mode, SFlag};
use nix::unistd::{getuid, User};

pub fn basename(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim_end_matches('/');
    let mut pieces = trimmed.rsplit('/');
    match pieces.next() {
        Some(p) if !p.is_empty() => p.into(),
        _ => path.into(),
    }
}

pub fn home_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde("~").as_ref())
}

/// 当前卷的根目录
pub fn root_of(path: &Path) -> PathBuf {
    path.ancestors()
        .last()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("/"))
}

pub fn current_dir() -> PathBuf {
    match env::current_dir() {
        Ok(x) => x,
        Err(e) => {
            error!("rogue: env current_dir error: {}", e);
            home_dir()
        }
    }
}

pub fn user_name() -> String {
    match User::from_uid(getuid()) {
        Ok(Some(user)) => user.name,
        Ok(None) => env::var("USER").unwrap_or_else(|_| "user".to_string()),
        Err(e) => {
            error!("rogue: getpwuid error: {}", e);
            env::var("USER").unwrap_or_else(|_| "user".to_string())
        }
    }
}

/// 把 st_mode 渲染成 `drwxr-xr-x` 形式
pub fn mode_string(mode: u32) -> String {
    let mode = mode as mode_t;
    let kind = SFlag::from_bits_truncate(mode & SFlag::S_IFMT.bits());
    let type_char = match kind {
        k if k == SFlag::S_IFDIR => 'd',
        k if k == SFlag::S_IFLNK => 'l',
        k if k == SFlag::S_IFCHR => 'c',
        k if k == SFlag::S_IFBLK => 'b',
        k if k == SFlag::S_IFIFO => 'p',
        k if k == SFlag::S_IFSOCK => 's',
        _ => '-',
    };

    let perms = Mode::from_bits_truncate(mode);
    let bits = [
        (Mode::S_IRUSR, 'r'),
        (Mode::S_IWUSR, 'w'),
        (Mode::S_IXUSR, 'x'),
        (Mode::S_IRGRP, 'r'),
        (Mode::S_IWGRP, 'w'),
        (Mode::S_IXGRP, 'x'),
        (Mode::S_IROTH, 'r'),
        (Mode::S_IWOTH, 'w'),
        (Mode::S_IXOTH, 'x'),
    ];

    let mut out = String::with_capacity(10);
    out.push(type_char);
    for (flag, c) in bits {
        out.push(if perms.contains(flag) { c } else { '-' });
    }
    out
}
