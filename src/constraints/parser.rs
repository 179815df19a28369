//! Recursive-descent parser with type checking.
//!
//! Precedence, loosest first: `or`, `and`, `not`, comparisons (chainable),
//! `+ -`, `* /`, unary `-`, `^` (right-associative).

use super::expr::{ArithOp, BoolExpr, CmpOp, Func, NumExpr};
use super::lexer::{Token, tokenize};

/// A parsed subexpression tagged with its type.
#[derive(Debug)]
enum Typed {
    Num(NumExpr),
    Bool(BoolExpr),
}

impl Typed {
    fn into_num(self, context: &str) -> Result<NumExpr, String> {
        match self {
            Self::Num(expr) => Ok(expr),
            Self::Bool(_) => Err(format!("{context} expects a number, found a condition")),
        }
    }

    fn into_bool(self, context: &str) -> Result<BoolExpr, String> {
        match self {
            Self::Bool(expr) => Ok(expr),
            Self::Num(_) => Err(format!("{context} expects a condition, found a number")),
        }
    }
}

/// Compiles one predicate over `dimension` variables.
pub(crate) fn parse_predicate(text: &str, dimension: usize) -> Result<BoolExpr, String> {
    let tokens = tokenize(text)?;
    let mut parser = Parser { tokens, pos: 0 };

    let expr = parser.or_expr()?;
    if let Some(token) = parser.peek() {
        return Err(format!("unexpected {token} after complete expression"));
    }
    let expr = expr.into_bool("a predicate")?;

    if let Some(index) = expr.max_var()
        && index >= dimension
    {
        return Err(format!(
            "variable x{index} is out of range for dimension {dimension}"
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        self.pos += 1;
        token
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if matches!(self.peek(), Some(Token::Ident(name)) if name == keyword) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), String> {
        match self.next() {
            Some(ref token) if token == expected => Ok(()),
            Some(token) => Err(format!("expected {expected}, found {token}")),
            None => Err(format!("expected {expected}, found end of line")),
        }
    }

    fn or_expr(&mut self) -> Result<Typed, String> {
        let mut lhs = self.and_expr()?;
        while self.eat(&Token::OrOr) || self.eat_keyword("or") {
            let rhs = self.and_expr()?.into_bool("'or'")?;
            lhs = Typed::Bool(BoolExpr::Or(
                Box::new(lhs.into_bool("'or'")?),
                Box::new(rhs),
            ));
        }
        Ok(lhs)
    }

    fn and_expr(&mut self) -> Result<Typed, String> {
        let mut lhs = self.not_expr()?;
        while self.eat(&Token::AndAnd) || self.eat_keyword("and") {
            let rhs = self.not_expr()?.into_bool("'and'")?;
            lhs = Typed::Bool(BoolExpr::And(
                Box::new(lhs.into_bool("'and'")?),
                Box::new(rhs),
            ));
        }
        Ok(lhs)
    }

    fn not_expr(&mut self) -> Result<Typed, String> {
        if self.eat(&Token::Bang) || self.eat_keyword("not") {
            let inner = self.not_expr()?.into_bool("'not'")?;
            return Ok(Typed::Bool(BoolExpr::Not(Box::new(inner))));
        }
        self.comparison()
    }

    /// `a < b <= c` becomes `a < b and b <= c`.
    fn comparison(&mut self) -> Result<Typed, String> {
        let first = self.additive()?;
        let Some(op) = self.comparison_op() else {
            return Ok(first);
        };

        let lhs = first.into_num("a comparison")?;
        let mut rhs = self.additive()?.into_num("a comparison")?;
        let mut chain = BoolExpr::Compare(op, lhs, rhs.clone());
        while let Some(op) = self.comparison_op() {
            let next = self.additive()?.into_num("a comparison")?;
            let link = BoolExpr::Compare(op, rhs, next.clone());
            chain = BoolExpr::And(Box::new(chain), Box::new(link));
            rhs = next;
        }
        Ok(Typed::Bool(chain))
    }

    fn comparison_op(&mut self) -> Option<CmpOp> {
        let op = match self.peek()? {
            Token::Lt => CmpOp::Lt,
            Token::Le => CmpOp::Le,
            Token::Gt => CmpOp::Gt,
            Token::Ge => CmpOp::Ge,
            Token::EqEq => CmpOp::Eq,
            Token::Ne => CmpOp::Ne,
            _ => return None,
        };
        self.pos += 1;
        Some(op)
    }

    fn additive(&mut self) -> Result<Typed, String> {
        let mut lhs = self.term()?;
        loop {
            let op = if self.eat(&Token::Plus) {
                ArithOp::Add
            } else if self.eat(&Token::Minus) {
                ArithOp::Sub
            } else {
                return Ok(lhs);
            };
            lhs = self.arith(op, lhs, Self::term)?;
        }
    }

    fn term(&mut self) -> Result<Typed, String> {
        let mut lhs = self.unary()?;
        loop {
            let op = if self.eat(&Token::Star) {
                ArithOp::Mul
            } else if self.eat(&Token::Slash) {
                ArithOp::Div
            } else {
                return Ok(lhs);
            };
            lhs = self.arith(op, lhs, Self::unary)?;
        }
    }

    fn arith(
        &mut self,
        op: ArithOp,
        lhs: Typed,
        operand: fn(&mut Self) -> Result<Typed, String>,
    ) -> Result<Typed, String> {
        let lhs = lhs.into_num("arithmetic")?;
        let rhs = operand(self)?.into_num("arithmetic")?;
        Ok(Typed::Num(NumExpr::Binary(op, Box::new(lhs), Box::new(rhs))))
    }

    fn unary(&mut self) -> Result<Typed, String> {
        if self.eat(&Token::Minus) {
            let inner = self.unary()?.into_num("unary '-'")?;
            return Ok(Typed::Num(NumExpr::Neg(Box::new(inner))));
        }
        if self.eat(&Token::Plus) {
            return Ok(Typed::Num(self.unary()?.into_num("unary '+'")?));
        }
        self.power()
    }

    /// The exponent may carry its own sign: `2^-1`.
    fn power(&mut self) -> Result<Typed, String> {
        let base = self.primary()?;
        if self.eat(&Token::Caret) {
            return self.arith(ArithOp::Pow, base, Self::unary);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Typed, String> {
        match self.next() {
            Some(Token::Number(value)) => Ok(Typed::Num(NumExpr::Const(value))),
            Some(Token::LParen) => {
                let inner = self.or_expr()?;
                self.expect(&Token::RParen)?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => self.identifier(&name),
            Some(token) => Err(format!("unexpected {token}")),
            None => Err("unexpected end of line".to_string()),
        }
    }

    fn identifier(&mut self, name: &str) -> Result<Typed, String> {
        match name {
            "pi" => return Ok(Typed::Num(NumExpr::Const(core::f64::consts::PI))),
            "e" => return Ok(Typed::Num(NumExpr::Const(core::f64::consts::E))),
            "true" => return Ok(Typed::Bool(BoolExpr::Const(true))),
            "false" => return Ok(Typed::Bool(BoolExpr::Const(false))),
            "x" => return self.indexed_variable(),
            _ => {}
        }

        if let Some(digits) = name.strip_prefix('x')
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
        {
            let index = digits
                .parse::<usize>()
                .map_err(|_| format!("variable index in '{name}' is too large"))?;
            return Ok(Typed::Num(NumExpr::Var(index)));
        }

        if let Some(func) = Func::from_name(name) {
            return self.call(name, func);
        }

        Err(format!("unknown name '{name}'"))
    }

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::float_cmp
    )]
    fn indexed_variable(&mut self) -> Result<Typed, String> {
        self.expect(&Token::LBracket)?;
        let index = match self.next() {
            Some(Token::Number(v)) if v >= 0.0 && v.fract() == 0.0 && v < 1e15 => v as usize,
            Some(token) => {
                return Err(format!(
                    "variable index must be a non-negative integer, found {token}"
                ));
            }
            None => return Err("unexpected end of line in variable index".to_string()),
        };
        self.expect(&Token::RBracket)?;
        Ok(Typed::Num(NumExpr::Var(index)))
    }

    fn call(&mut self, name: &str, func: Func) -> Result<Typed, String> {
        self.expect(&Token::LParen)?;
        let mut args = Vec::new();
        if !self.eat(&Token::RParen) {
            loop {
                args.push(self.or_expr()?.into_num(&format!("'{name}'"))?);
                if self.eat(&Token::Comma) {
                    continue;
                }
                self.expect(&Token::RParen)?;
                break;
            }
        }

        let (min, max) = func.arity();
        if args.len() < min || max.is_some_and(|max| args.len() > max) {
            let expected = match max {
                Some(max) if max == min => format!("{min}"),
                Some(max) => format!("{min} to {max}"),
                None => format!("at least {min}"),
            };
            return Err(format!(
                "'{name}' takes {expected} argument(s), got {}",
                args.len()
            ));
        }
        Ok(Typed::Num(NumExpr::Call(func, args)))
    }
}
