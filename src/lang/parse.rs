use super::{ast::*, token::*, Error, LineNumber};

type Result<T> = std::result::Result<T, Error>;

/// Parse the tokens of one line. Never fails; problems come back as
/// `Node::Invalid` and the rest of the line is discarded.
pub fn parse(tokens: &[Token]) -> Node {
    if let Some(unknown) = tokens.iter().find(|t| t.is_unknown()) {
        return Node::Invalid(error!(SyntaxError; &format!("unknown token {}", unknown)));
    }
    match Parser::parse(tokens) {
        Ok(node) => node,
        Err(e) => Node::Invalid(e),
    }
}

struct Parser<'a> {
    token_stream: std::slice::Iter<'a, Token>,
    peeked: Option<&'a Token>,
}

impl<'a> Parser<'a> {
    fn parse(tokens: &'a [Token]) -> Result<Node> {
        let mut parse = Parser {
            token_stream: tokens.iter(),
            peeked: None,
        };
        match parse.next() {
            None | Some(Token::EndOfLine) => Ok(Node::Nop),
            Some(Token::Integer(number)) => parse.line(*number),
            Some(Token::Command(command)) => {
                parse.expect_end("unexpected token after command")?;
                Ok(Node::Command(*command))
            }
            Some(_) => Err(error!(SyntaxError; "unexpected token at begin of line")),
        }
    }

    fn next(&mut self) -> Option<&'a Token> {
        if self.peeked.is_some() {
            return self.peeked.take();
        }
        self.token_stream.next()
    }

    fn peek(&mut self) -> Option<&'a Token> {
        if self.peeked.is_none() {
            self.peeked = self.token_stream.next();
        }
        self.peeked
    }

    fn line(&mut self, number: LineNumber) -> Result<Node> {
        let statement = match self.next() {
            Some(Token::EndOfLine) => return Ok(Node::Delete(number)),
            Some(Token::Word(word)) => Statement::for_word(self, *word)?,
            _ => return Err(error!(SyntaxError; "unexpected token in statement")),
        };
        Ok(Node::Line(number, statement))
    }

    fn expect_end(&mut self, msg: &str) -> Result<()> {
        match self.next() {
            Some(Token::EndOfLine) => Ok(()),
            _ => Err(error!(SyntaxError; msg)),
        }
    }

    fn ident(&mut self, msg: &str) -> Result<String> {
        match self.next() {
            Some(Token::Ident(i)) => Ok(i.clone()),
            _ => Err(error!(SyntaxError; msg)),
        }
    }

    fn line_number(&mut self, msg: &str) -> Result<LineNumber> {
        match self.next() {
            Some(Token::Integer(n)) => Ok(*n),
            _ => Err(error!(SyntaxError; msg)),
        }
    }

    // Precedence from loosest to tightest:
    // comparison, additive, multiplicative, unary sign, power, primary.
    // Power recurses through unary for its right side, which makes it
    // right-associative and lets `2**-1` parse.

    fn expression(&mut self) -> Result<Expression> {
        let lhs = self.additive()?;
        let op = match self.peek() {
            Some(Token::Operator(op)) => *op,
            _ => return Ok(lhs),
        };
        match op {
            Operator::Equal | Operator::Less | Operator::Greater => {
                self.next();
                let rhs = self.additive()?;
                Ok(Expression::for_binary_op(op, lhs, rhs))
            }
            _ => Ok(lhs),
        }
    }

    fn additive(&mut self) -> Result<Expression> {
        let mut lhs = self.multiplicative()?;
        while let Some(Token::Operator(op)) = self.peek() {
            let op = *op;
            if op != Operator::Plus && op != Operator::Minus {
                break;
            }
            self.next();
            let rhs = self.multiplicative()?;
            lhs = Expression::for_binary_op(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> Result<Expression> {
        let mut lhs = self.unary()?;
        while let Some(Token::Operator(op)) = self.peek() {
            let op = *op;
            if op != Operator::Multiply && op != Operator::Divide {
                break;
            }
            self.next();
            let rhs = self.unary()?;
            lhs = Expression::for_binary_op(op, lhs, rhs);
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expression> {
        match self.peek() {
            Some(Token::Operator(Operator::Minus)) => {
                self.next();
                Ok(Expression::Negation(Box::new(self.unary()?)))
            }
            Some(Token::Operator(Operator::Plus)) => {
                self.next();
                Ok(Expression::Identity(Box::new(self.unary()?)))
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expression> {
        let base = self.primary()?;
        if let Some(Token::Operator(Operator::Power)) = self.peek() {
            self.next();
            let exponent = self.unary()?;
            return Ok(Expression::Power(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expression> {
        match self.next() {
            Some(Token::LParen) => {
                let expr = self.expression()?;
                match self.next() {
                    Some(Token::RParen) => Ok(expr),
                    _ => Err(error!(SyntaxError; "unmatched left parenthesis")),
                }
            }
            Some(Token::Ident(i)) => Ok(Expression::Var(i.clone())),
            Some(Token::Integer(n)) => Ok(Expression::Integer(*n)),
            _ => Err(error!(SyntaxError; "unexpected token in expression")),
        }
    }
}

impl Expression {
    fn for_binary_op(op: Operator, lhs: Expression, rhs: Expression) -> Expression {
        use Operator::*;
        let (lhs, rhs) = (Box::new(lhs), Box::new(rhs));
        match op {
            Power => Expression::Power(lhs, rhs),
            Multiply => Expression::Multiply(lhs, rhs),
            Divide => Expression::Divide(lhs, rhs),
            Plus => Expression::Add(lhs, rhs),
            Minus => Expression::Subtract(lhs, rhs),
            Equal => Expression::Equal(lhs, rhs),
            Less => Expression::Less(lhs, rhs),
            Greater => Expression::Greater(lhs, rhs),
        }
    }
}

impl Statement {
    fn for_word(parse: &mut Parser, word: Word) -> Result<Statement> {
        use Word::*;
        match word {
            Rem => Self::r#rem(parse),
            Let => Self::r#let(parse),
            Print => Self::r#print(parse),
            Input => Self::r#input(parse),
            Goto => Self::r#goto(parse),
            If => Self::r#if(parse),
            End => Self::r#end(parse),
            Then => Err(error!(SyntaxError; "unexpected token in statement")),
        }
    }

    fn r#rem(parse: &mut Parser) -> Result<Statement> {
        let text = match parse.peek() {
            Some(Token::Remark(s)) => {
                parse.next();
                s.clone()
            }
            Some(Token::EndOfLine) => String::new(),
            _ => return Err(error!(SyntaxError; "unexpected token after rem")),
        };
        parse.expect_end("unexpected token after rem string")?;
        Ok(Statement::Rem(text))
    }

    fn r#let(parse: &mut Parser) -> Result<Statement> {
        let ident = parse.ident("let requires variable")?;
        match parse.next() {
            Some(Token::Operator(Operator::Equal)) => {}
            _ => return Err(error!(SyntaxError; "let requires '='")),
        }
        let expr = parse.expression()?;
        parse.expect_end("unexpected token after expression")?;
        Ok(Statement::Let(ident, expr))
    }

    fn r#print(parse: &mut Parser) -> Result<Statement> {
        let expr = parse.expression()?;
        parse.expect_end("unexpected token after expression")?;
        Ok(Statement::Print(expr))
    }

    fn r#input(parse: &mut Parser) -> Result<Statement> {
        let ident = parse.ident("unexpected token after input")?;
        parse.expect_end("unexpected token after variable")?;
        Ok(Statement::Input(ident))
    }

    fn r#goto(parse: &mut Parser) -> Result<Statement> {
        let number = parse.line_number("unexpected token after goto")?;
        parse.expect_end("unexpected token after number")?;
        Ok(Statement::Goto(number))
    }

    fn r#if(parse: &mut Parser) -> Result<Statement> {
        let expr = parse.expression()?;
        match parse.next() {
            Some(Token::Word(Word::Then)) => {}
            _ => return Err(error!(SyntaxError; "unexpected token after expression")),
        }
        let number = parse.line_number("unexpected token after then")?;
        parse.expect_end("unexpected token after number")?;
        Ok(Statement::If(expr, number))
    }

    fn r#end(parse: &mut Parser) -> Result<Statement> {
        parse.expect_end("unexpected token after end")?;
        Ok(Statement::End)
    }
}

#[cfg(test)]
mod tests {
    use super::super::lex;
    use super::*;

    fn parse_str(s: &str) -> Node {
        parse(&lex(s))
    }

    fn int(n: u64) -> Box<Expression> {
        Box::new(Expression::Integer(n))
    }

    #[test]
    fn test_let_foo_eq_bar() {
        let answer = Node::Line(
            10,
            Statement::Let("foo".to_string(), Expression::Var("bar".to_string())),
        );
        assert_eq!(parse_str("10 LET foo=bar"), answer);
    }

    #[test]
    fn test_unary_binds_tighter_than_multiply() {
        let answer = Node::Line(
            1,
            Statement::Print(Expression::Multiply(
                Box::new(Expression::Negation(int(2))),
                int(3),
            )),
        );
        assert_eq!(parse_str("1 PRINT -2*3"), answer);
    }

    #[test]
    fn test_power_takes_signed_exponent() {
        let answer = Node::Line(
            1,
            Statement::Print(Expression::Power(int(2), Box::new(Expression::Negation(int(1))))),
        );
        assert_eq!(parse_str("1 PRINT 2**-1"), answer);
    }

    #[test]
    fn test_comparison_does_not_chain() {
        match parse_str("1 PRINT 1<2<3") {
            Node::Invalid(e) => assert_eq!(e.text(), "unexpected token after expression"),
            other => panic!("{:?}", other),
        }
    }

    #[test]
    fn test_empty_token_slice() {
        assert_eq!(parse(&[]), Node::Nop);
    }

    #[test]
    fn test_missing_end_of_line() {
        let tokens = [Token::Integer(1), Token::Word(Word::End)];
        match parse(&tokens) {
            Node::Invalid(e) => assert_eq!(e.text(), "unexpected token after end"),
            other => panic!("{:?}", other),
        }
    }
}
