//! 内置算术求值器
//!
//! 语法：
//! - 语句以 `;` 或换行分隔，返回最后一个语句的值
//! - `name = expr` 赋值，变量保存在 BindingContext 中
//! - `+ - * / %`、括号、一元负号；整数运算溢出或除零报错

use super::binding::{BindingContext, EvalStrategy, EvalValue};
use crate::core::EvalError;

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Num(EvalValue),
    Ident(String),
    Op(char),
    Sep,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl EvalStrategy for Calculator {
    fn name(&self) -> &str {
        "calc"
    }

    fn evaluate(&self, source: &str, cx: &mut BindingContext) -> Result<EvalValue, EvalError> {
        let tokens = lex(source)?;
        let mut parser = Parser {
            tokens,
            pos: 0,
            end: source.len(),
            cx,
        };
        parser.program()
    }
}

fn lex(source: &str) -> Result<Vec<(usize, Token)>, EvalError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();

    while let Some(&(start, ch)) = chars.peek() {
        match ch {
            '\n' | ';' => {
                chars.next();
                tokens.push((start, Token::Sep));
            }
            c if c.is_whitespace() => {
                chars.next();
            }
            '+' | '-' | '*' | '/' | '%' | '(' | ')' | '=' => {
                chars.next();
                tokens.push((start, Token::Op(ch)));
            }
            c if c.is_ascii_digit() => {
                let mut end = start;
                let mut is_float = false;
                while let Some(&(ix, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        end = ix + 1;
                        chars.next();
                    } else if c == '.' && !is_float {
                        chars.next();
                        match chars.peek() {
                            Some(&(_, d)) if d.is_ascii_digit() => is_float = true,
                            _ => {
                                return Err(EvalError::Parse {
                                    offset: ix,
                                    message: "expected digit after `.`".to_string(),
                                })
                            }
                        }
                    } else {
                        break;
                    }
                }
                let text = &source[start..end];
                let value = if is_float {
                    text.parse::<f64>().map(EvalValue::Float).ok()
                } else {
                    text.parse::<i64>().map(EvalValue::Int).ok()
                };
                let value = value.ok_or_else(|| EvalError::Parse {
                    offset: start,
                    message: format!("number `{}` is out of range", text),
                })?;
                tokens.push((start, Token::Num(value)));
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start;
                while let Some(&(ix, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' {
                        end = ix + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push((start, Token::Ident(source[start..end].to_string())));
            }
            other => {
                return Err(EvalError::Parse {
                    offset: start,
                    message: format!("unexpected character `{}`", other),
                })
            }
        }
    }

    Ok(tokens)
}

struct Parser<'a> {
    tokens: Vec<(usize, Token)>,
    pos: usize,
    end: usize,
    cx: &'a mut BindingContext,
}

impl Parser<'_> {
    fn program(&mut self) -> Result<EvalValue, EvalError> {
        let mut last = EvalValue::Nil;
        loop {
            while self.eat(&Token::Sep) {}
            if self.peek().is_none() {
                return Ok(last);
            }
            last = self.statement()?;
            match self.peek() {
                None | Some(Token::Sep) => {}
                Some(_) => return Err(self.unexpected()),
            }
        }
    }

    fn statement(&mut self) -> Result<EvalValue, EvalError> {
        if let (Some(Token::Ident(name)), Some(Token::Op('='))) = (self.peek(), self.peek_at(1))
        {
            let name = name.clone();
            self.pos += 2;
            let value = self.expr()?;
            self.cx.vars.insert(name, value.clone());
            return Ok(value);
        }
        self.expr()
    }

    fn expr(&mut self) -> Result<EvalValue, EvalError> {
        let mut lhs = self.term()?;
        while let Some(Token::Op(op @ ('+' | '-'))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn term(&mut self) -> Result<EvalValue, EvalError> {
        let mut lhs = self.unary()?;
        while let Some(Token::Op(op @ ('*' | '/' | '%'))) = self.peek() {
            let op = *op;
            self.pos += 1;
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs)?;
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<EvalValue, EvalError> {
        if self.eat(&Token::Op('-')) {
            let value = self.unary()?;
            return binary('-', EvalValue::Int(0), value);
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<EvalValue, EvalError> {
        match self.peek().cloned() {
            Some(Token::Num(value)) => {
                self.pos += 1;
                Ok(value)
            }
            Some(Token::Ident(name)) => {
                self.pos += 1;
                self.cx
                    .vars
                    .get(&name)
                    .cloned()
                    .ok_or_else(|| EvalError::Runtime(format!("undefined variable `{}`", name)))
            }
            Some(Token::Op('(')) => {
                self.pos += 1;
                let value = self.expr()?;
                if !self.eat(&Token::Op(')')) {
                    return Err(self.unexpected());
                }
                Ok(value)
            }
            _ => Err(self.unexpected()),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.peek_at(0)
    }

    fn peek_at(&self, ahead: usize) -> Option<&Token> {
        self.tokens.get(self.pos + ahead).map(|(_, t)| t)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn unexpected(&self) -> EvalError {
        match self.tokens.get(self.pos) {
            Some((offset, token)) => EvalError::Parse {
                offset: *offset,
                message: format!("unexpected {}", describe(token)),
            },
            None => EvalError::Parse {
                offset: self.end,
                message: "unexpected end of input".to_string(),
            },
        }
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Num(value) => format!("number `{}`", value),
        Token::Ident(name) => format!("name `{}`", name),
        Token::Op(op) => format!("`{}`", op),
        Token::Sep => "end of statement".to_string(),
    }
}

fn binary(op: char, lhs: EvalValue, rhs: EvalValue) -> Result<EvalValue, EvalError> {
    match (lhs, rhs) {
        (EvalValue::Int(a), EvalValue::Int(b)) => {
            if matches!(op, '/' | '%') && b == 0 {
                return Err(EvalError::Runtime("divided by 0".to_string()));
            }
            let out = match op {
                '+' => a.checked_add(b),
                '-' => a.checked_sub(b),
                '*' => a.checked_mul(b),
                '/' => a.checked_div(b),
                _ => a.checked_rem(b),
            };
            out.map(EvalValue::Int)
                .ok_or_else(|| EvalError::Runtime("integer overflow".to_string()))
        }
        (a, b) => {
            let (a, b) = (as_float(&a)?, as_float(&b)?);
            if matches!(op, '/' | '%') && b == 0.0 {
                return Err(EvalError::Runtime("divided by 0".to_string()));
            }
            Ok(EvalValue::Float(match op {
                '+' => a + b,
                '-' => a - b,
                '*' => a * b,
                '/' => a / b,
                _ => a % b,
            }))
        }
    }
}

fn as_float(value: &EvalValue) -> Result<f64, EvalError> {
    match value {
        EvalValue::Int(n) => Ok(*n as f64),
        EvalValue::Float(x) => Ok(*x),
        other => Err(EvalError::Runtime(format!(
            "can't do arithmetic on `{}`",
            other
        ))),
    }
}
