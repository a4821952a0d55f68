use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RedirectOp {
    Output, // >
    Append, // >>
}

impl RedirectOp {
    /// 只有完整的 `>` / `>>` 词才算重定向，`a>b` 仍是普通参数
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            ">" => Some(RedirectOp::Output),
            ">>" => Some(RedirectOp::Append),
            _ => None,
        }
    }
}

/// 按空白切词，不处理引号和转义
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
        }
    }

    pub fn next_word(&mut self) -> Option<String> {
        self.skip_whitespace();
        self.peek_char()?;
        Some(self.read_word())
    }

    fn read_char(&mut self) -> Option<char> {
        self.input.next()
    }

    fn peek_char(&mut self) -> Option<char> {
        self.input.peek().copied()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek_char() {
            if !c.is_whitespace() {
                break;
            }
            self.read_char();
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                break;
            }
            word.push(c);
            self.read_char();
        }
        word
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_word()
    }
}
