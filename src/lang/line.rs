use super::ast::*;
use super::lex::*;
use super::parse::*;
use super::token::*;

/// One line of source text with its tokens.
#[derive(Debug, PartialEq, Clone)]
pub struct Line {
    source: String,
    tokens: Vec<Token>,
}

impl Line {
    pub fn new(s: &str) -> Line {
        let source = s.trim_end_matches(|c| c == '\n' || c == '\r').to_string();
        let tokens = lex(&source);
        Line { source, tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn ast(&self) -> Node {
        parse(&self.tokens)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.source)
    }
}
