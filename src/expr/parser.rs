use super::lexer::Token;

/// Statement keywords the condition grammar recognizes but never accepts as
/// breakpoint conditions.
const STMT_KEYWORDS: &[&str] = &["return", "break", "continue", "global"];

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression(Expr),
    Keyword(String),
}

impl Stmt {
    pub fn is_expression(&self) -> bool {
        matches!(self, Stmt::Expression(_))
    }

    pub fn expression(&self) -> Option<&Expr> {
        match self {
            Stmt::Expression(expr) => Some(expr),
            Stmt::Keyword(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Ident(String),
    Str(String),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// Plain `x = e`. The only form the condition validator refuses.
    Assign {
        target: String,
        value: Box<Expr>,
    },
    /// `x += e` and friends. Parses as an expression, not an assignment.
    CompoundAssign {
        target: String,
        op: BinaryOp,
        value: Box<Expr>,
    },
    /// Postfix `x++` / `x--`.
    Increment {
        target: String,
        decrement: bool,
    },
    Call {
        name: String,
        args: Vec<Expr>,
    },
}

impl Expr {
    pub fn is_assignment(&self) -> bool {
        matches!(self, Expr::Assign { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

/// The built-in stand-in for the host language parser.
#[derive(Debug, Default)]
pub struct ScriptParser;

impl ScriptParser {
    pub fn new() -> Self {
        ScriptParser
    }
}

/// Parse a `;`-separated statement list. Empty statements are dropped, so a
/// bare terminator yields an empty program.
pub fn parse_statements(tokens: Vec<Token>) -> Result<Vec<Stmt>, String> {
    let mut parser = Parser { tokens, pos: 0 };
    let mut statements = Vec::new();

    while !parser.at_end() {
        if parser.eat(&Token::Semicolon) {
            continue;
        }
        statements.push(parser.statement()?);
        if !parser.at_end() && !parser.eat(&Token::Semicolon) {
            return Err(format!("unexpected token {:?}", parser.peek()));
        }
    }

    Ok(statements)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn statement(&mut self) -> Result<Stmt, String> {
        if let Some(Token::Ident(name)) = self.peek() {
            if STMT_KEYWORDS.contains(&name.as_str()) {
                let keyword = name.clone();
                self.advance();
                // "global x y" style trailing names belong to the statement.
                while matches!(self.peek(), Some(Token::Ident(_))) {
                    self.advance();
                }
                return Ok(Stmt::Keyword(keyword));
            }
        }
        Ok(Stmt::Expression(self.expression()?))
    }

    fn expression(&mut self) -> Result<Expr, String> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr, String> {
        let lhs = self.logical_or()?;

        let op = match self.peek() {
            Some(Token::Assign) => None,
            Some(Token::PlusAssign) => Some(BinaryOp::Add),
            Some(Token::MinusAssign) => Some(BinaryOp::Sub),
            Some(Token::StarAssign) => Some(BinaryOp::Mul),
            Some(Token::SlashAssign) => Some(BinaryOp::Div),
            _ => return Ok(lhs),
        };
        self.advance();

        let target = match lhs {
            Expr::Ident(name) => name,
            other => return Err(format!("invalid assignment target {:?}", other)),
        };
        let value = Box::new(self.assignment()?);

        Ok(match op {
            None => Expr::Assign { target, value },
            Some(op) => Expr::CompoundAssign { target, op, value },
        })
    }

    fn logical_or(&mut self) -> Result<Expr, String> {
        let mut expr = self.logical_and()?;
        while self.eat(&Token::Or) {
            let rhs = self.logical_and()?;
            expr = binary(BinaryOp::Or, expr, rhs);
        }
        Ok(expr)
    }

    fn logical_and(&mut self) -> Result<Expr, String> {
        let mut expr = self.equality()?;
        while self.eat(&Token::And) {
            let rhs = self.equality()?;
            expr = binary(BinaryOp::And, expr, rhs);
        }
        Ok(expr)
    }

    fn equality(&mut self) -> Result<Expr, String> {
        let mut expr = self.comparison()?;
        loop {
            let op = match self.peek() {
                Some(Token::Eq) => BinaryOp::Eq,
                Some(Token::Ne) => BinaryOp::Ne,
                _ => break,
            };
            self.advance();
            let rhs = self.comparison()?;
            expr = binary(op, expr, rhs);
        }
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr, String> {
        let mut expr = self.additive()?;
        loop {
            let op = match self.peek() {
                Some(Token::Lt) => BinaryOp::Lt,
                Some(Token::Le) => BinaryOp::Le,
                Some(Token::Gt) => BinaryOp::Gt,
                Some(Token::Ge) => BinaryOp::Ge,
                _ => break,
            };
            self.advance();
            let rhs = self.additive()?;
            expr = binary(op, expr, rhs);
        }
        Ok(expr)
    }

    fn additive(&mut self) -> Result<Expr, String> {
        let mut expr = self.multiplicative()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.advance();
            let rhs = self.multiplicative()?;
            expr = binary(op, expr, rhs);
        }
        Ok(expr)
    }

    fn multiplicative(&mut self) -> Result<Expr, String> {
        let mut expr = self.unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => break,
            };
            self.advance();
            let rhs = self.unary()?;
            expr = binary(op, expr, rhs);
        }
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr, String> {
        let op = match self.peek() {
            Some(Token::Not) => Some(UnaryOp::Not),
            Some(Token::Minus) => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = Box::new(self.unary()?);
            return Ok(Expr::Unary { op, operand });
        }
        self.postfix()
    }

    fn postfix(&mut self) -> Result<Expr, String> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::Incr) | Some(Token::Decr) => {
                    let decrement = self.peek() == Some(&Token::Decr);
                    let target = match expr {
                        Expr::Ident(name) => name,
                        other => {
                            return Err(format!("invalid increment target {:?}", other));
                        }
                    };
                    self.advance();
                    expr = Expr::Increment { target, decrement };
                }
                Some(Token::LParen) => {
                    let name = match expr {
                        Expr::Ident(name) => name,
                        other => return Err(format!("cannot call {:?}", other)),
                    };
                    self.advance();
                    let mut args = Vec::new();
                    if !self.eat(&Token::RParen) {
                        loop {
                            args.push(self.expression()?);
                            if self.eat(&Token::RParen) {
                                break;
                            }
                            if !self.eat(&Token::Comma) {
                                return Err("expected ',' or ')' in call".to_string());
                            }
                        }
                    }
                    expr = Expr::Call { name, args };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, String> {
        match self.advance() {
            Some(Token::Number(value)) => Ok(Expr::Number(value)),
            Some(Token::Ident(name)) => Ok(Expr::Ident(name)),
            Some(Token::Str(text)) => Ok(Expr::Str(text)),
            Some(Token::LParen) => {
                let expr = self.expression()?;
                if !self.eat(&Token::RParen) {
                    return Err("expected ')'".to_string());
                }
                Ok(expr)
            }
            Some(other) => Err(format!("unexpected token {:?}", other)),
            None => Err("unexpected end of expression".to_string()),
        }
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}
