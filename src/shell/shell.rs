use log::{debug, error, warn};
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::process::{Command, Stdio};
use std::thread;

use crate::shell::console::{AutoConfirm, Confirm, Console, StdinConfirm};
use crate::shell::interpreter::{Flow, Interpreter};
use crate::shell::readline::{ReadlineError, ReadlineManager};
use crate::shell::session::Session;
use crate::utils::config::{Config, ConfirmMode};
use crate::utils::path::{basename, current_dir, user_name};
use crate::utils::theme::Theme;

pub struct Shell<'a> {
    config: &'a Config,
    theme: Theme,
    interpreter: Interpreter,
    user: String,
}

// 根据操作系统选择清屏命令
fn create_clear_command() -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "cls"]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "clear"]);
        cmd
    }
}

impl<'a> Shell<'a> {
    pub fn new(config: &'a Config, theme: Theme) -> Self {
        Self {
            config,
            theme,
            interpreter: Interpreter::new(Session::new(current_dir())),
            user: user_name(),
        }
    }

    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        debug!("初始化 Rogue...");
        self.display_banner()?;

        if io::stdin().is_terminal() {
            self.run_interactive()?;
        } else {
            debug!("stdin 不是终端，进入非交互模式");
            self.run_script()?;
        }

        debug!("退出 Rogue...");
        Ok(())
    }

    fn display_banner(&self) -> io::Result<()> {
        match fs::read_to_string(&self.config.banner_file) {
            Ok(banner) => println!("{}", (self.theme.success_style)(banner)),
            Err(e) => {
                debug!("banner 读取失败: {}", e);
                let msg = self
                    .theme
                    .get_message("banner_missing")
                    .replace("{}", &self.config.banner_file.display().to_string());
                println!("{}", (self.theme.error_style)(msg));
            }
        }
        io::stdout().flush()
    }

    // 输入结束时和 `exit` 一样道别
    fn farewell(&self) {
        println!("{}", (self.theme.error_style)(self.theme.get_message("exit")));
    }

    fn prompt(&self) -> String {
        let cwd = self.interpreter.session().cwd().display().to_string();
        let dir_name = basename(&cwd).into_owned();
        self.theme.prompt(&self.user, &cwd, &dir_name)
    }

    fn run_interactive(&mut self) -> Result<(), Box<dyn Error>> {
        let mut readline = ReadlineManager::new(self.config)?;
        readline.load_history();
        println!("{}", (self.theme.success_style)(self.theme.get_message("welcome")));
        debug!("Rogue 准备就绪...");

        let mut confirm = StdinConfirm;
        loop {
            io::stdout().flush()?;
            let prompt = self.prompt();

            match readline.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        readline.add_history(line)?;
                    }
                    if self.handle_input(line, &mut confirm)? == Flow::Exit {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    warn!("接收到中断信号...");
                    println!(
                        "{}",
                        (self.theme.warning_style)(self.theme.get_message("interrupt_signal"))
                    );
                }
                Err(ReadlineError::Eof) => {
                    warn!("接收到 EOF 信号，退出 Rogue...");
                    println!(
                        "\n{}",
                        (self.theme.warning_style)(self.theme.get_message("eof_signal"))
                    );
                    self.farewell();
                    break;
                }
                Err(err) => {
                    error!("发生错误: {}", err);
                    eprintln!(
                        "{}: {}",
                        (self.theme.error_style)(self.theme.get_message("error")),
                        err
                    );
                }
            }
        }

        readline.save_history();
        Ok(())
    }

    /// 非交互模式：逐行读取 stdin，不打印提示符，读到 EOF 即退出
    fn run_script(&mut self) -> Result<(), Box<dyn Error>> {
        let mut confirm: Box<dyn Confirm> = match self.config.confirm_mode {
            ConfirmMode::Ask => Box::new(StdinConfirm),
            ConfirmMode::AssumeYes => Box::new(AutoConfirm(true)),
            ConfirmMode::AssumeNo => Box::new(AutoConfirm(false)),
        };

        // 按字节读行，非 UTF-8 的输入按有损解码继续执行
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if io::stdin().lock().read_until(b'\n', &mut buf)? == 0 {
                debug!("stdin 已结束");
                self.farewell();
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if self.handle_input(line.trim(), confirm.as_mut())? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    fn handle_input(&mut self, line: &str, confirm: &mut dyn Confirm) -> Result<Flow, Box<dyn Error>> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let flow = {
            let mut console = Console::new(&mut out, confirm, &self.theme);
            self.interpreter.execute(line, &mut console)?
        };
        out.flush()?;
        drop(out);

        match flow {
            Flow::Continue => self.sync_process_cwd(),
            Flow::Clear => self.clear_screen(),
            Flow::Exit => {
                debug!("等待 {:?} 后退出", self.config.exit_delay);
                thread::sleep(self.config.exit_delay);
            }
        }
        Ok(flow)
    }

    fn sync_process_cwd(&self) {
        let cwd = self.interpreter.session().cwd();
        if env::current_dir().ok().as_deref() != Some(cwd) {
            if let Err(e) = env::set_current_dir(cwd) {
                warn!("无法同步进程工作目录到 {}: {}", cwd.display(), e);
            }
        }
    }

    fn clear_screen(&self) {
        let status = create_clear_command()
            .current_dir(self.interpreter.session().cwd())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => {}
            Ok(status) => warn!("clear 退出码: {}", status.code().unwrap_or(1)),
            Err(e) => {
                error!("clear 执行失败: {}", e);
                eprintln!(
                    "{}",
                    (self.theme.error_style)(format!("Error clearing screen: {}", e))
                );
            }
        }
    }
}
