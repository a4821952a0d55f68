use super::ast::{CommandLine, FlagSet, Redirection};
use super::lexer::{Lexer, RedirectOp};

pub struct Parser;

impl Parser {
    /// 命令词转小写，参数保留大小写
    pub fn parse_line(line: &str) -> CommandLine {
        let mut words = Lexer::new(line);
        let program = words.next().map(|w| w.to_lowercase()).unwrap_or_default();
        CommandLine {
            raw: line.to_string(),
            program,
            arguments: words.collect(),
        }
    }

    /// 按成员关系拆出已知 flag，剩下的按原顺序作为位置参数
    pub fn extract_flags<'t>(tokens: &'t [String], known: &[&'static str]) -> (FlagSet, Vec<&'t str>) {
        let mut flags = FlagSet::default();
        let mut positional = Vec::new();
        for token in tokens {
            match known.iter().find(|k| **k == token.as_str()) {
                Some(flag) => flags.insert(*flag),
                None => positional.push(token.as_str()),
            }
        }
        (flags, positional)
    }

    /// 找出 `cat` 参数里的重定向。没有重定向返回 `Ok(None)`；
    /// 出现多个重定向或目标不是恰好一个时返回错误。
    pub fn parse_redirection(arguments: &[String]) -> Result<Option<Redirection>, String> {
        let markers: Vec<(usize, RedirectOp)> = arguments
            .iter()
            .enumerate()
            .filter_map(|(i, word)| RedirectOp::from_word(word).map(|op| (i, op)))
            .collect();

        let (index, operator) = match markers.as_slice() {
            [] => return Ok(None),
            [single] => *single,
            _ => return Err("Only one of '>' or '>>' may be given".to_string()),
        };

        let targets = &arguments[index + 1..];
        if targets.len() != 1 {
            return Err("Expected exactly one file after redirection operator".to_string());
        }

        Ok(Some(Redirection {
            operator,
            sources: arguments[..index].to_vec(),
            target: targets[0].clone(),
        }))
    }
}
