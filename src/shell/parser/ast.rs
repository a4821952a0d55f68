use super::lexer::RedirectOp;

/// 一行输入拆分后的结果，处理完即丢弃
#[derive(Debug, Clone, Default)]
pub struct CommandLine {
    pub raw: String,
    pub program: String,
    pub arguments: Vec<String>,
}

impl CommandLine {
    /// 包含命令词本身的完整词列表，供按成员判断 flag 的命令使用
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.arguments.len() + 1);
        tokens.push(self.program.clone());
        tokens.extend(self.arguments.iter().cloned());
        tokens
    }

    pub fn has_argument(&self, word: &str) -> bool {
        self.arguments.iter().any(|a| a == word)
    }
}

/// 识别出的布尔开关
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlagSet {
    flags: Vec<&'static str>,
}

impl FlagSet {
    pub fn insert(&mut self, flag: &'static str) {
        if !self.has(flag) {
            self.flags.push(flag);
        }
    }

    pub fn has(&self, flag: &str) -> bool {
        self.flags.iter().any(|f| *f == flag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Redirection {
    pub operator: RedirectOp,
    pub sources: Vec<String>,
    pub target: String,
}
