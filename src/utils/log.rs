use crate::utils::config::Config;
use chrono::Local;
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::fs::{self, File};
use std::io::Write;
use std::process;

fn parse_level(level: &str) -> LevelFilter {
    match level {
        level if level.eq_ignore_ascii_case("off") => LevelFilter::Off,
        level if level.eq_ignore_ascii_case("error") => LevelFilter::Error,
        level if level.eq_ignore_ascii_case("warn") => LevelFilter::Warn,
        level if level.eq_ignore_ascii_case("info") => LevelFilter::Info,
        level if level.eq_ignore_ascii_case("debug") => LevelFilter::Debug,
        level if level.eq_ignore_ascii_case("trace") => LevelFilter::Trace,
        _ => LevelFilter::Warn,
    }
}

fn open_log_file(config: &Config) -> std::io::Result<File> {
    fs::create_dir_all(&config.logger_dir)?;
    let date = Local::now().format("%Y-%m-%d");
    let log_file = config.logger_dir.join(format!("{}_{}.log", config.name, date));
    File::options().create(true).append(true).open(log_file)
}

pub fn init_logger(config: &Config) {
    let level = parse_level(&config.logger_level);

    // 提示符占用 stdout，日志只写 stderr 和文件
    let mut writers: Vec<Box<dyn Write + Send + Sync>> = vec![Box::new(std::io::stderr())];
    let file_error = match open_log_file(config) {
        Ok(file) => {
            writers.push(Box::new(file));
            None
        }
        Err(e) => Some(e),
    };

    let result = Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "[PID:{}][{}] {} - {}",
                process::id(),
                record.level(),
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.args()
            )
        })
        .target(Target::Pipe(Box::new(MultiWriter { writers })))
        .filter(Some(config.name.as_str()), level)
        .filter(None, LevelFilter::Warn)
        .try_init();

    if let Err(e) = result {
        eprintln!("日志初始化失败: {}", e);
        return;
    }

    if let Some(e) = file_error {
        log::warn!(
            "无法创建日志文件 {}: {}，仅输出到 stderr",
            config.logger_dir.display(),
            e
        );
    }
    log::debug!("日志级别设置为: {}", level);
}

struct MultiWriter {
    writers: Vec<Box<dyn Write + Send + Sync>>,
}

impl Write for MultiWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        for writer in &mut self.writers {
            writer.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        for writer in &mut self.writers {
            writer.flush()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_are_case_insensitive() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("nonsense"), LevelFilter::Warn);
    }

    #[test]
    fn multi_writer_tees_every_write() {
        let mut writer = MultiWriter {
            writers: vec![Box::new(Vec::<u8>::new()), Box::new(std::io::sink())],
        };
        assert_eq!(writer.write(b"hello").ok(), Some(5));
        assert!(writer.flush().is_ok());
    }
}
