use dotenv::dotenv;
use log::warn;
use rustyline::EditMode;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// 非交互模式下 `-i` 确认的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    Ask,
    AssumeYes,
    AssumeNo,
}

impl ConfirmMode {
    fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => ConfirmMode::AssumeYes,
            "no" | "n" | "false" => ConfirmMode::AssumeNo,
            _ => ConfirmMode::Ask,
        }
    }
}

pub struct Config {
    pub name: String,
    pub theme: String,
    pub history_file: PathBuf,
    pub editor_mode: String,
    pub logger_level: String,
    pub logger_dir: PathBuf,
    pub banner_file: PathBuf,
    pub confirm_mode: ConfirmMode,
    pub exit_delay: Duration,
}

impl Config {
    fn get_config_dir() -> PathBuf {
        if let Ok(home) = env::var("HOME") {
            PathBuf::from(home).join(".config/rogue")
        } else {
            PathBuf::from("tmp")
        }
    }

    fn default() -> Self {
        let config_dir = Self::get_config_dir();
        Config {
            name: String::from("rogue"),
            theme: String::from("default"),
            history_file: config_dir.join(".rogue_history"),
            editor_mode: String::from("emacs"),
            logger_level: String::from("warn"),
            logger_dir: config_dir.join("logs"),
            banner_file: PathBuf::from("banner.txt"),
            confirm_mode: ConfirmMode::Ask,
            exit_delay: Duration::from_millis(1000),
        }
    }

    pub fn new() -> Self {
        // 优先加载环境变量
        if cfg!(debug_assertions) {
            dotenv::from_filename(".env.development").ok();
        } else {
            dotenv().ok();
        }

        // 默认配置
        let mut config = Config::default();

        // 从环境变量加载配置
        if let Ok(theme) = env::var("ROGUE_THEME") {
            config.theme = theme;
        }

        if let Ok(editor) = env::var("ROGUE_EDITOR") {
            config.editor_mode = editor;
        }

        if let Ok(history) = env::var("ROGUE_HISTORY") {
            config.history_file = PathBuf::from(history);
        }

        if let Ok(level) = env::var("ROGUE_LOG_LEVEL") {
            config.logger_level = level;
        }

        if let Ok(dir) = env::var("ROGUE_LOG_DIR") {
            config.logger_dir = PathBuf::from(dir);
        }

        if let Ok(banner) = env::var("ROGUE_BANNER") {
            config.banner_file = PathBuf::from(banner);
        }

        if let Ok(mode) = env::var("ROGUE_CONFIRM") {
            config.confirm_mode = ConfirmMode::parse(&mode);
        }

        if let Ok(delay) = env::var("ROGUE_EXIT_DELAY_MS") {
            match delay.trim().parse::<u64>() {
                Ok(ms) => config.exit_delay = Duration::from_millis(ms),
                Err(e) => warn!("ROGUE_EXIT_DELAY_MS 无效: {} ({})", delay, e),
            }
        }

        // 确保历史文件目录存在
        if let Some(parent) = config.history_file.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!("无法创建历史记录目录 {}: {}", parent.display(), e);
            }
        }

        config
    }

    pub fn get_edit_mode(&self) -> EditMode {
        match self.editor_mode.to_lowercase().as_str() {
            "vi" => EditMode::Vi,
            _ => EditMode::Emacs,
        }
    }
}
