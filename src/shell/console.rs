use std::io::{self, BufRead, Write};

use crate::utils::theme::Theme;

/// `-i` 的覆盖确认
pub trait Confirm {
    fn confirm(&mut self, out: &mut dyn Write, question: &str) -> io::Result<bool>;
}

fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// 从任意 BufRead 读取一行作为回答
pub struct LineConfirm<R> {
    reader: R,
}

impl<R: BufRead> LineConfirm<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Confirm for LineConfirm<R> {
    fn confirm(&mut self, out: &mut dyn Write, question: &str) -> io::Result<bool> {
        write!(out, "{}", question)?;
        out.flush()?;
        let mut answer = String::new();
        self.reader.read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// 每次确认时临时锁 stdin，和非交互模式的读行共用同一个缓冲
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, out: &mut dyn Write, question: &str) -> io::Result<bool> {
        LineConfirm::new(io::stdin().lock()).confirm(out, question)
    }
}

/// 非交互模式：不阻塞，固定回答
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, out: &mut dyn Write, question: &str) -> io::Result<bool> {
        writeln!(out, "{}{}", question, if self.0 { "y" } else { "n" })?;
        Ok(self.0)
    }
}

/// 命令处理器看到的控制台：输出、确认和配色
pub struct Console<'a> {
    pub out: &'a mut dyn Write,
    confirm: &'a mut dyn Confirm,
    theme: &'a Theme,
}

impl<'a> Console<'a> {
    pub fn new(out: &'a mut dyn Write, confirm: &'a mut dyn Confirm, theme: &'a Theme) -> Self {
        Self {
            out,
            confirm,
            theme,
        }
    }

    pub fn theme(&self) -> &Theme {
        self.theme
    }

    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.confirm.confirm(&mut *self.out, question)
    }

    pub fn info(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}", (self.theme.info_style)(msg.to_string()))
    }

    pub fn success(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}", (self.theme.success_style)(msg.to_string()))
    }

    pub fn warn(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}", (self.theme.warning_style)(msg.to_string()))
    }

    pub fn error(&mut self, msg: &str) -> io::Result<()> {
        writeln!(self.out, "{}", (self.theme.error_style)(msg.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[allow(clippy::unwrap_used)]
    #[test]
    fn line_confirm_accepts_only_y() {
        let mut out = Vec::new();
        let mut confirm = LineConfirm::new(Cursor::new("Y\nn\nyes\n"));
        assert!(confirm.confirm(&mut out, "ok? ").unwrap());
        assert!(!confirm.confirm(&mut out, "ok? ").unwrap());
        assert!(!confirm.confirm(&mut out, "ok? ").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "ok? ok? ok? ");
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn line_confirm_declines_on_eof() {
        let mut out = Vec::new();
        let mut confirm = LineConfirm::new(Cursor::new(""));
        assert!(!confirm.confirm(&mut out, "ok? ").unwrap());
    }

    #[allow(clippy::unwrap_used)]
    #[test]
    fn auto_confirm_echoes_its_answer() {
        let mut out = Vec::new();
        assert!(!AutoConfirm(false).confirm(&mut out, "q? ").unwrap());
        assert!(AutoConfirm(true).confirm(&mut out, "q? ").unwrap());
        assert_eq!(String::from_utf8(out).unwrap(), "q? n\nq? y\n");
    }
}
