use super::token::*;

/// Tokenize one line. The result always ends with `Token::EndOfLine`.
pub fn lex(s: &str) -> Vec<Token> {
    BasicLexer::lex(s)
}

fn is_basic_whitespace(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\n' || c == '\r'
}

fn is_basic_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_basic_alphabetic(c: char) -> bool {
    c.is_ascii_alphabetic()
}

trait Tokenizers<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>>;

    fn whitespace(&mut self) {
        while let Some(pk) = self.chars().peek() {
            if !is_basic_whitespace(*pk) {
                break;
            }
            self.chars().next();
        }
    }

    fn number(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_basic_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        match s.parse::<u64>() {
            Ok(n) => Some(Token::Integer(n)),
            Err(_) => Some(Token::Unknown(s)),
        }
    }

    fn alphabetic(&mut self) -> Option<Token> {
        let mut s = String::new();
        while let Some(pk) = self.chars().peek() {
            if !is_basic_alphabetic(*pk) && !is_basic_digit(*pk) {
                break;
            }
            s.push(*pk);
            self.chars().next();
        }
        match Token::from_string(&s) {
            Some(token) => Some(token),
            None => Some(Token::Ident(s)),
        }
    }

    fn star(&mut self) -> Option<Token> {
        self.chars().next();
        if let Some('*') = self.chars().peek() {
            self.chars().next();
            return Some(Token::Operator(Operator::Power));
        }
        Some(Token::Operator(Operator::Multiply))
    }

    fn minutia(&mut self) -> Option<Token> {
        let ch = self.chars().next()?;
        if let Some(op) = Operator::from_char(ch) {
            return Some(Token::Operator(op));
        }
        match ch {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            _ => Some(Token::Unknown(ch.to_string())),
        }
    }

    fn remark_text(&mut self) -> Option<Token> {
        let s: String = self.chars().by_ref().collect();
        let s = s.trim();
        if s.is_empty() {
            None
        } else {
            Some(Token::Remark(s.to_string()))
        }
    }
}

struct BasicLexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    remark: bool,
}

impl<'a> Tokenizers<'a> for BasicLexer<'a> {
    fn chars(&mut self) -> &mut std::iter::Peekable<std::str::Chars<'a>> {
        &mut self.chars
    }
}

impl<'a> Iterator for BasicLexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remark {
            self.remark = false;
            return self.remark_text();
        }
        self.whitespace();
        let pk = *self.chars.peek()?;
        if is_basic_digit(pk) {
            return self.number();
        }
        if is_basic_alphabetic(pk) {
            let r = self.alphabetic();
            if let Some(Token::Word(Word::Rem)) = r {
                self.remark = true;
            }
            return r;
        }
        if pk == '*' {
            return self.star();
        }
        self.minutia()
    }
}

impl<'a> BasicLexer<'a> {
    fn lex(s: &str) -> Vec<Token> {
        let mut tokens: Vec<Token> = BasicLexer {
            chars: s.chars().peekable(),
            remark: false,
        }
        .collect();
        tokens.push(Token::EndOfLine);
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_only() {
        assert_eq!(lex(" \t \n"), vec![Token::EndOfLine]);
        assert_eq!(lex(""), vec![Token::EndOfLine]);
    }

    #[test]
    fn test_rem_takes_rest_of_line() {
        assert_eq!(
            lex("10 REM  hello ** (world"),
            vec![
                Token::Integer(10),
                Token::Word(Word::Rem),
                Token::Remark("hello ** (world".to_string()),
                Token::EndOfLine,
            ]
        );
    }

    #[test]
    fn test_bare_rem() {
        assert_eq!(
            lex("10 REM   "),
            vec![Token::Integer(10), Token::Word(Word::Rem), Token::EndOfLine]
        );
    }
}
