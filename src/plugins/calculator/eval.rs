//! Arithmetic evaluator for the calculator skill.
//!
//! Input is tokenized and evaluated by recursive descent; nothing is ever
//! handed to a host interpreter. Grammar, loosest binding first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%') unary)*
//! unary   := ('+' | '-') unary | power
//! power   := postfix ('^' unary)?
//! postfix := primary '!'*
//! primary := number | ident | ident '(' args ')' | '(' expr ')'
//! ```

use std::fmt;

/// Nesting limit for signs, parentheses, exponents and call arguments.
const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnexpectedChar { ch: char, pos: usize },
    UnexpectedToken { found: String, pos: usize },
    UnexpectedEnd,
    UnknownIdentifier(String),
    Arity { function: String, expected: &'static str, found: usize },
    Domain(String),
    TooDeep,
    Empty,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnexpectedChar { ch, pos } => {
                write!(f, "unexpected character '{}' at {}", ch, pos)
            }
            EvalError::UnexpectedToken { found, pos } => {
                write!(f, "unexpected '{}' at {}", found, pos)
            }
            EvalError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            EvalError::UnknownIdentifier(name) => write!(f, "unknown identifier '{}'", name),
            EvalError::Arity {
                function,
                expected,
                found,
            } => write!(
                f,
                "{}() expects {} argument(s), got {}",
                function, expected, found
            ),
            EvalError::Domain(msg) => write!(f, "{}", msg),
            EvalError::TooDeep => write!(f, "expression nested deeper than {}", MAX_DEPTH),
            EvalError::Empty => write!(f, "empty expression"),
        }
    }
}

impl std::error::Error for EvalError {}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    Ident(String),
    Op(char),
    LParen,
    RParen,
    Comma,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(n) => n.to_string(),
            Token::Ident(name) => name.clone(),
            Token::Op(op) => op.to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
            Token::Comma => ",".to_string(),
        }
    }
}

fn tokenize(input: &str) -> Result<Vec<(Token, usize)>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        match ch {
            c if c.is_whitespace() => i += 1,
            '0'..='9' | '.' => {
                let start = i;
                while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                    i += 1;
                }
                // Exponent only when digits follow; a bare `2e` leaves `e` as an identifier.
                if i < chars.len() && (chars[i] == 'e' || chars[i] == 'E') {
                    let mut j = i + 1;
                    if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                        j += 1;
                    }
                    if j < chars.len() && chars[j].is_ascii_digit() {
                        while j < chars.len() && chars[j].is_ascii_digit() {
                            j += 1;
                        }
                        i = j;
                    }
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<f64>()
                    .map_err(|_| EvalError::UnexpectedToken {
                        found: literal.clone(),
                        pos: start,
                    })?;
                tokens.push((Token::Number(value), start));
            }
            c if c.is_alphabetic() || c == '_' => {
                let start = i;
                while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                tokens.push((Token::Ident(name), start));
            }
            '+' | '-' | '*' | '/' | '%' | '^' | '!' => {
                tokens.push((Token::Op(ch), i));
                i += 1;
            }
            '×' => {
                tokens.push((Token::Op('*'), i));
                i += 1;
            }
            '÷' => {
                tokens.push((Token::Op('/'), i));
                i += 1;
            }
            '(' => {
                tokens.push((Token::LParen, i));
                i += 1;
            }
            ')' => {
                tokens.push((Token::RParen, i));
                i += 1;
            }
            ',' => {
                tokens.push((Token::Comma, i));
                i += 1;
            }
            other => return Err(EvalError::UnexpectedChar { ch: other, pos: i }),
        }
    }

    Ok(tokens)
}

struct Parser {
    tokens: Vec<(Token, usize)>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(token, _)| token)
    }

    fn next(&mut self) -> Option<(Token, usize)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_op(&mut self, op: char) -> bool {
        if self.peek() == Some(&Token::Op(op)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        match self.next() {
            Some((token, _)) if token == expected => Ok(()),
            Some((token, pos)) => Err(EvalError::UnexpectedToken {
                found: token.describe(),
                pos,
            }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.term()?;
        loop {
            if self.eat_op('+') {
                value += self.term()?;
            } else if self.eat_op('-') {
                value -= self.term()?;
            } else {
                return Ok(value);
            }
        }
    }

    fn term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.unary()?;
        loop {
            if self.eat_op('*') {
                value *= self.unary()?;
            } else if self.eat_op('/') {
                value /= self.unary()?;
            } else if self.eat_op('%') {
                let divisor = self.unary()?;
                value = modulo(value, divisor);
            } else {
                return Ok(value);
            }
        }
    }

    /// Every recursive path of the grammar passes through here, so this is
    /// where nesting is bounded.
    fn unary(&mut self) -> Result<f64, EvalError> {
        if self.depth == MAX_DEPTH {
            return Err(EvalError::TooDeep);
        }
        self.depth += 1;
        let value = self.signed();
        self.depth -= 1;
        value
    }

    fn signed(&mut self) -> Result<f64, EvalError> {
        if self.eat_op('-') {
            return Ok(-self.unary()?);
        }
        if self.eat_op('+') {
            return self.unary();
        }
        self.power()
    }

    /// `^` is right-associative and binds tighter than a leading sign, so
    /// `-2^2` is `-4` and `2^-1` is `0.5`.
    fn power(&mut self) -> Result<f64, EvalError> {
        let base = self.postfix()?;
        if self.eat_op('^') {
            let exponent = self.unary()?;
            return Ok(base.powf(exponent));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<f64, EvalError> {
        let mut value = self.primary()?;
        while self.eat_op('!') {
            value = factorial(value)?;
        }
        Ok(value)
    }

    fn primary(&mut self) -> Result<f64, EvalError> {
        match self.next() {
            Some((Token::Number(value), _)) => Ok(value),
            Some((Token::LParen, _)) => {
                let value = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(value)
            }
            Some((Token::Ident(name), _)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.pos += 1;
                    let args = self.arguments()?;
                    call(&name, &args)
                } else {
                    constant(&name)
                }
            }
            Some((token, pos)) => Err(EvalError::UnexpectedToken {
                found: token.describe(),
                pos,
            }),
            None => Err(EvalError::UnexpectedEnd),
        }
    }

    fn arguments(&mut self) -> Result<Vec<f64>, EvalError> {
        let mut args = Vec::new();
        if self.peek() == Some(&Token::RParen) {
            self.pos += 1;
            return Ok(args);
        }
        loop {
            args.push(self.expr()?);
            match self.next() {
                Some((Token::Comma, _)) => continue,
                Some((Token::RParen, _)) => return Ok(args),
                Some((token, pos)) => {
                    return Err(EvalError::UnexpectedToken {
                        found: token.describe(),
                        pos,
                    })
                }
                None => return Err(EvalError::UnexpectedEnd),
            }
        }
    }
}

fn modulo(value: f64, divisor: f64) -> f64 {
    // Sign follows the divisor, as in most calculator languages.
    let rem = value % divisor;
    if rem != 0.0 && (rem < 0.0) != (divisor < 0.0) {
        rem + divisor
    } else {
        rem
    }
}

fn factorial(value: f64) -> Result<f64, EvalError> {
    if value < 0.0 || value.fract() != 0.0 {
        return Err(EvalError::Domain(format!(
            "factorial is only defined for non-negative integers, got {}",
            value
        )));
    }
    if value > 170.0 {
        return Ok(f64::INFINITY);
    }
    Ok((1..=value as u64).fold(1.0, |acc, n| acc * n as f64))
}

fn constant(name: &str) -> Result<f64, EvalError> {
    match name {
        "pi" | "PI" => Ok(std::f64::consts::PI),
        "e" | "E" => Ok(std::f64::consts::E),
        "tau" => Ok(std::f64::consts::TAU),
        "Infinity" => Ok(f64::INFINITY),
        _ => Err(EvalError::UnknownIdentifier(name.to_string())),
    }
}

fn arity(name: &str, args: &[f64], expected: usize) -> Result<(), EvalError> {
    if args.len() == expected {
        return Ok(());
    }
    Err(EvalError::Arity {
        function: name.to_string(),
        expected: match expected {
            1 => "1",
            2 => "2",
            _ => "a different number of",
        },
        found: args.len(),
    })
}

fn call(name: &str, args: &[f64]) -> Result<f64, EvalError> {
    let unary = |f: fn(f64) -> f64| -> Result<f64, EvalError> {
        arity(name, args, 1)?;
        Ok(f(args[0]))
    };

    match name {
        "sqrt" => unary(f64::sqrt),
        "cbrt" => unary(f64::cbrt),
        "abs" => unary(f64::abs),
        "exp" => unary(f64::exp),
        "log10" => unary(f64::log10),
        "log2" => unary(f64::log2),
        "sin" => unary(f64::sin),
        "cos" => unary(f64::cos),
        "tan" => unary(f64::tan),
        "asin" => unary(f64::asin),
        "acos" => unary(f64::acos),
        "atan" => unary(f64::atan),
        "round" => unary(f64::round),
        "floor" => unary(f64::floor),
        "ceil" => unary(f64::ceil),
        "log" => match args {
            [x] => Ok(x.ln()),
            [x, base] => Ok(x.ln() / base.ln()),
            _ => Err(EvalError::Arity {
                function: name.to_string(),
                expected: "1 or 2",
                found: args.len(),
            }),
        },
        "pow" => {
            arity(name, args, 2)?;
            Ok(args[0].powf(args[1]))
        }
        "min" | "max" => {
            if args.is_empty() {
                return Err(EvalError::Arity {
                    function: name.to_string(),
                    expected: "at least 1",
                    found: 0,
                });
            }
            let pick = if name == "min" { f64::min } else { f64::max };
            Ok(args[1..].iter().fold(args[0], |acc, &v| pick(acc, v)))
        }
        _ => Err(EvalError::UnknownIdentifier(name.to_string())),
    }
}

/// Evaluates `input`. Results without a real value (`sqrt(-1)`, `0/0`) are
/// domain errors; infinities are returned as-is.
pub fn evaluate(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let value = parser.expr()?;
    if let Some((token, pos)) = parser.next() {
        return Err(EvalError::UnexpectedToken {
            found: token.describe(),
            pos,
        });
    }

    if value.is_nan() {
        return Err(EvalError::Domain("result is not a real number".to_string()));
    }
    Ok(value)
}

/// Formats a result the way a calculator prints it: integers without a
/// fractional part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    format!("{}", value)
}
