use std::collections::HashMap;

thread_local!(
    static STRING_TO_TOKEN: HashMap<std::string::String, Token> = Word::all()
        .iter()
        .cloned()
        .map(Token::Word)
        .chain(Command::all().iter().cloned().map(Token::Command))
        .map(|d| (d.to_string(), d))
        .collect();
);

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    Unknown(String),
    Integer(u64),
    Ident(String),
    Remark(String),
    Word(Word),
    Command(Command),
    Operator(Operator),
    LParen,
    RParen,
    EndOfLine,
}

impl Token {
    /// Keyword lookup. Matching is case sensitive.
    pub fn from_string(s: &str) -> Option<Token> {
        STRING_TO_TOKEN.with(|stt| stt.get(s).cloned())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Token::Unknown(_))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Token::*;
        match self {
            Unknown(s) => write!(f, "{}", s),
            Integer(n) => write!(f, "{}", n),
            Ident(s) => write!(f, "{}", s),
            Remark(s) => write!(f, "{}", s),
            Word(s) => write!(f, "{}", s),
            Command(s) => write!(f, "{}", s),
            Operator(s) => write!(f, "{}", s),
            LParen => write!(f, "("),
            RParen => write!(f, ")"),
            EndOfLine => Ok(()),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Word {
    End,
    Goto,
    If,
    Input,
    Let,
    Print,
    Rem,
    Then,
}

impl Word {
    pub fn all() -> [Word; 8] {
        use Word::*;
        [End, Goto, If, Input, Let, Print, Rem, Then]
    }
}

impl std::fmt::Display for Word {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Word::*;
        match self {
            End => write!(f, "END"),
            Goto => write!(f, "GOTO"),
            If => write!(f, "IF"),
            Input => write!(f, "INPUT"),
            Let => write!(f, "LET"),
            Print => write!(f, "PRINT"),
            Rem => write!(f, "REM"),
            Then => write!(f, "THEN"),
        }
    }
}

/// Bare commands. Only valid alone on an unnumbered line.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Command {
    Clear,
    Help,
    List,
    Load,
    Quit,
    Run,
}

impl Command {
    pub fn all() -> [Command; 6] {
        use Command::*;
        [Clear, Help, List, Load, Quit, Run]
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Command::*;
        match self {
            Clear => write!(f, "CLEAR"),
            Help => write!(f, "HELP"),
            List => write!(f, "LIST"),
            Load => write!(f, "LOAD"),
            Quit => write!(f, "QUIT"),
            Run => write!(f, "RUN"),
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Operator {
    Power,
    Multiply,
    Divide,
    Plus,
    Minus,
    Equal,
    Less,
    Greater,
}

impl Operator {
    pub fn from_char(ch: char) -> Option<Operator> {
        use Operator::*;
        match ch {
            '*' => Some(Multiply),
            '/' => Some(Divide),
            '+' => Some(Plus),
            '-' => Some(Minus),
            '=' => Some(Equal),
            '<' => Some(Less),
            '>' => Some(Greater),
            _ => None,
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use Operator::*;
        match self {
            Power => write!(f, "**"),
            Multiply => write!(f, "*"),
            Divide => write!(f, "/"),
            Plus => write!(f, "+"),
            Minus => write!(f, "-"),
            Equal => write!(f, "="),
            Less => write!(f, "<"),
            Greater => write!(f, ">"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_string() {
        let t = Token::from_string("REM");
        assert_eq!(t, Some(Token::Word(Word::Rem)));
        let t = Token::from_string("QUIT");
        assert_eq!(t, Some(Token::Command(Command::Quit)));
        let t = Token::from_string("PICKLES");
        assert_eq!(t, None);
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(Token::from_string("print"), None);
        assert_eq!(Token::from_string("Goto"), None);
    }
}
