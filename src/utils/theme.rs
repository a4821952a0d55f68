use colored::Colorize;
use std::collections::HashMap;

type Style = Box<dyn Fn(String) -> String>;

pub struct Theme {
    messages: HashMap<&'static str, String>,
    pub user_style: Style,
    pub path_style: Style,
    pub dir_style: Style,
    pub file_style: Style,
    pub error_style: Style,
    pub warning_style: Style,
    pub success_style: Style,
    pub info_style: Style,
}

fn default_messages() -> HashMap<&'static str, String> {
    HashMap::from([
        ("welcome", "Welcome to RogueV1.0. Type 'man <cmd>' or '<cmd> --help'.".to_string()),
        ("exit", "Exiting RogueV1.0...".to_string()),
        ("banner_missing", "Banner file '{}' not found!".to_string()),
        ("interrupt_signal", "^C (type 'exit' to quit)".to_string()),
        ("eof_signal", "EOF received, leaving RogueV1.0...".to_string()),
        ("error", "Error".to_string()),
    ])
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            messages: default_messages(),
            user_style: Box::new(|s| s.green().to_string()),
            path_style: Box::new(|s| s.cyan().to_string()),
            dir_style: Box::new(|s| s.yellow().to_string()),
            file_style: Box::new(|s| s.white().to_string()),
            // 接近 VS Code 的亮红色 (256 色 196)
            error_style: Box::new(|s| s.truecolor(255, 0, 0).to_string()),
            warning_style: Box::new(|s| s.yellow().to_string()),
            success_style: Box::new(|s| s.green().to_string()),
            info_style: Box::new(|s| s.white().to_string()),
        }
    }
}

impl Theme {
    pub fn load_theme(theme_name: &str) -> Theme {
        match theme_name {
            "dark" => Theme {
                messages: default_messages(),
                user_style: Box::new(|s| s.bright_green().to_string()),
                path_style: Box::new(|s| s.bright_blue().to_string()),
                dir_style: Box::new(|s| s.bright_yellow().to_string()),
                file_style: Box::new(|s| s.bright_white().to_string()),
                error_style: Box::new(|s| s.red().to_string()),
                warning_style: Box::new(|s| s.bright_yellow().to_string()),
                success_style: Box::new(|s| s.bright_green().to_string()),
                info_style: Box::new(|s| s.bright_white().to_string()),
            },
            _ => Theme::default(),
        }
    }

    pub fn get_message(&self, key: &str) -> String {
        self.messages.get(key).cloned().unwrap_or_default()
    }

    /// `user@localhost:/full/path/dirname$ `
    pub fn prompt(&self, user: &str, cwd: &str, dir_name: &str) -> String {
        format!(
            "{}{}{} ",
            (self.user_style)(format!("{}@localhost:", user)),
            (self.path_style)(format!("{}/", cwd.trim_end_matches('/'))),
            (self.error_style)(format!("{}$", dir_name))
        )
    }
}
