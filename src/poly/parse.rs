//! Read polynomials with rational coefficients from text.
//!
//! The accepted input is a sum of products of numbers, variables, parenthesized
//! subexpressions and powers with a constant non-negative integer exponent.
//! Juxtaposition multiplies, so `2x y` is `2*x*y`. Division is only allowed by
//! a nonzero constant.
use std::sync::Arc;

use smartstring::{LazyCompact, SmartString};

use crate::domains::{
    integer::Integer,
    rational::{Rational, RationalField, Q},
};

use super::{
    polynomial::MultivariatePolynomial, univariate::UnivariatePolynomial, PolynomialError,
    Variable, VariableMap,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Number(SmartString<LazyCompact>),
    ID(SmartString<LazyCompact>),
    Op(Operator),
    OpenParenthesis,
    CloseParenthesis,
    EOF,
}

fn syntax_error(position: usize, message: impl Into<String>) -> PolynomialError {
    PolynomialError::Syntax {
        position,
        message: message.into(),
    }
}

fn not_polynomial(reason: impl Into<String>) -> PolynomialError {
    PolynomialError::NotPolynomial {
        reason: reason.into(),
    }
}

/// Split the input into tokens, each tagged with its byte offset.
fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, PolynomialError> {
    let mut tokens = vec![];
    let mut chars = input.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        let token = match c {
            c if c.is_whitespace() => continue,
            '+' => Token::Op(Operator::Add),
            '-' => Token::Op(Operator::Sub),
            '*' => Token::Op(Operator::Mul),
            '/' => Token::Op(Operator::Div),
            '^' => Token::Op(Operator::Pow),
            '(' => Token::OpenParenthesis,
            ')' => Token::CloseParenthesis,
            c if c.is_ascii_digit() => {
                let mut s = SmartString::<LazyCompact>::new();
                s.push(c);
                while let Some((_, d)) = chars.next_if(|(_, d)| d.is_ascii_digit()) {
                    s.push(d);
                }
                Token::Number(s)
            }
            c if c.is_alphabetic() || c == '_' => {
                let mut s = SmartString::<LazyCompact>::new();
                s.push(c);
                while let Some((_, d)) =
                    chars.next_if(|(_, d)| d.is_alphanumeric() || *d == '_')
                {
                    s.push(d);
                }
                Token::ID(s)
            }
            c => return Err(syntax_error(pos, format!("unexpected character '{}'", c))),
        };

        tokens.push((pos, token));
    }

    tokens.push((input.len(), Token::EOF));
    Ok(tokens)
}

/// Collect the variable names in order of first appearance. An identifier
/// directly followed by an opening parenthesis is a function application.
fn collect_variables(
    tokens: &[(usize, Token)],
    names: &mut Vec<SmartString<LazyCompact>>,
) -> Result<(), PolynomialError> {
    for (i, (_, t)) in tokens.iter().enumerate() {
        if let Token::ID(name) = t {
            if let Some((_, Token::OpenParenthesis)) = tokens.get(i + 1) {
                return Err(not_polynomial(format!("function application {}(..)", name)));
            }

            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    Ok(())
}

fn parse_number(digits: &str, position: usize) -> Result<Integer, PolynomialError> {
    if let Ok(n) = digits.parse::<i64>() {
        return Ok(Integer::from(n));
    }

    rug::Integer::from_str_radix(digits, 10)
        .map(Integer::from)
        .map_err(|e| syntax_error(position, e.to_string()))
}

struct Parser<'a> {
    tokens: &'a [(usize, Token)],
    index: usize,
    zero: &'a MultivariatePolynomial<RationalField>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &'a Token {
        &self.tokens[self.index].1
    }

    fn position(&self) -> usize {
        self.tokens[self.index].0
    }

    fn advance(&mut self) -> &'a Token {
        let t = &self.tokens[self.index].1;
        if self.index + 1 < self.tokens.len() {
            self.index += 1;
        }
        t
    }

    fn parse(mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        let p = self.sum()?;
        match self.peek() {
            Token::EOF => Ok(p),
            t => Err(syntax_error(
                self.position(),
                format!("unexpected token {:?}", t),
            )),
        }
    }

    fn sum(&mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        let mut acc = self.zero.clone();
        let mut negate = false;
        loop {
            match self.peek() {
                Token::Op(Operator::Add) => {
                    self.advance();
                }
                Token::Op(Operator::Sub) => {
                    self.advance();
                    negate = !negate;
                }
                _ => {
                    let p = self.product()?;
                    acc = if negate { &acc - &p } else { &acc + &p };
                    negate = false;

                    match self.peek() {
                        Token::Op(Operator::Add | Operator::Sub) => {}
                        _ => return Ok(acc),
                    }
                }
            }
        }
    }

    fn product(&mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        let mut acc = self.unary()?;
        loop {
            match self.peek() {
                Token::Op(Operator::Mul) => {
                    self.advance();
                    let f = self.unary()?;
                    acc = checked_mul(&acc, &f)?;
                }
                Token::Op(Operator::Div) => {
                    self.advance();
                    let d = self.unary()?;
                    if !d.is_constant() {
                        return Err(not_polynomial(format!("division by {}", d)));
                    }
                    if d.is_zero() {
                        return Err(not_polynomial("division by zero"));
                    }
                    acc = acc.mul_coeff(&d.get_constant().inv());
                }
                Token::Number(_) | Token::ID(_) | Token::OpenParenthesis => {
                    let f = self.unary()?;
                    acc = checked_mul(&acc, &f)?;
                }
                _ => return Ok(acc),
            }
        }
    }

    fn unary(&mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        match self.peek() {
            Token::Op(Operator::Sub) => {
                self.advance();
                Ok(-self.unary()?)
            }
            Token::Op(Operator::Add) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        let base = self.atom()?;
        if self.peek() != &Token::Op(Operator::Pow) {
            return Ok(base);
        }

        self.advance();
        let exp = self.unary()?;
        if !exp.is_constant() {
            return Err(not_polynomial(format!("symbolic exponent {}", exp)));
        }

        let e = exp.get_constant();
        if !e.is_integer() || e.is_negative() {
            return Err(not_polynomial(format!("exponent {}", e)));
        }

        let e = match e.numerator().to_i64() {
            Some(e) if e <= u32::MAX as i64 => e as u64,
            _ => return Err(not_polynomial(format!("exponent {} is too large", e))),
        };

        for v in 0..base.nvars() {
            if base.degree(v) as u64 * e > u32::MAX as u64 {
                return Err(exponent_too_large(&base, v));
            }
        }
        Ok(base.pow(e as usize))
    }

    fn atom(&mut self) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
        let pos = self.position();
        match self.advance() {
            Token::Number(n) => Ok(self.zero.constant(Rational::from(parse_number(n, pos)?))),
            Token::ID(name) => match self.zero.variables.index_of(name) {
                Some(i) => Ok(self.zero.variable(i)),
                None => Err(not_polynomial(format!("unknown variable {}", name))),
            },
            Token::OpenParenthesis => {
                let p = self.sum()?;
                let pos = self.position();
                match self.advance() {
                    Token::CloseParenthesis => Ok(p),
                    _ => Err(syntax_error(pos, "expected ')'")),
                }
            }
            Token::EOF => Err(syntax_error(pos, "unexpected end of input")),
            t => Err(syntax_error(pos, format!("unexpected token {:?}", t))),
        }
    }
}

fn exponent_too_large(p: &MultivariatePolynomial<RationalField>, var: usize) -> PolynomialError {
    not_polynomial(format!("exponent of {} is too large", p.variables.get(var)))
}

/// Multiply two polynomials, rejecting products whose exponents do not fit in a `u32`.
fn checked_mul(
    a: &MultivariatePolynomial<RationalField>,
    b: &MultivariatePolynomial<RationalField>,
) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
    for v in 0..a.nvars() {
        if a.degree(v) as u64 + b.degree(v) as u64 > u32::MAX as u64 {
            return Err(exponent_too_large(a, v));
        }
    }
    Ok(a * b)
}

fn parse_tokens(
    tokens: &[(usize, Token)],
    variables: Arc<VariableMap>,
) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
    let zero = MultivariatePolynomial::new(&Q, variables);
    Parser {
        tokens,
        index: 0,
        zero: &zero,
    }
    .parse()
}

/// Parse a polynomial. Without a variable map, the variables are numbered in
/// order of first appearance.
pub fn parse_polynomial(
    input: &str,
    variables: Option<Arc<VariableMap>>,
) -> Result<MultivariatePolynomial<RationalField>, PolynomialError> {
    let tokens = tokenize(input)?;
    let variables = match variables {
        Some(v) => v,
        None => {
            let mut names = vec![];
            collect_variables(&tokens, &mut names)?;
            Arc::new(VariableMap::new(
                names.iter().map(|n| Variable::new(n)).collect(),
            ))
        }
    };

    parse_tokens(&tokens, variables)
}

/// Parse several polynomials over one shared variable map.
pub fn parse_polynomials(
    inputs: &[&str],
) -> Result<Vec<MultivariatePolynomial<RationalField>>, PolynomialError> {
    let tokens = inputs
        .iter()
        .map(|i| tokenize(i))
        .collect::<Result<Vec<_>, _>>()?;

    let mut names = vec![];
    for t in &tokens {
        collect_variables(t, &mut names)?;
    }
    let variables = Arc::new(VariableMap::new(
        names.iter().map(|n| Variable::new(n)).collect(),
    ));

    tokens
        .iter()
        .map(|t| parse_tokens(t, variables.clone()))
        .collect()
}

impl UnivariatePolynomial<RationalField> {
    /// Parse a polynomial in the single variable `variable`.
    pub fn parse(input: &str, variable: &str) -> Result<Self, PolynomialError> {
        let tokens = tokenize(input)?;
        let mut names = vec![];
        collect_variables(&tokens, &mut names)?;

        let vars = Arc::new(VariableMap::new(vec![Variable::new(variable)]));
        let p = parse_tokens(&tokens, vars)?;
        p.to_univariate(0)
            .ok_or_else(|| not_polynomial(format!("not univariate in {}", variable)))
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use crate::domains::rational::Rational;
    use crate::poly::{univariate::UnivariatePolynomial, PolynomialError, VariableMap};

    use super::{parse_polynomial, parse_polynomials};

    #[test]
    fn expand() {
        let p = parse_polynomial("(x+1)^2 - 2x", None).unwrap();
        assert_eq!(format!("{}", p), "x^2+1");

        let p = parse_polynomial("3 a b/6 - -b^2", None).unwrap();
        assert_eq!(p.variables.get(0).name(), "a");
        assert_eq!(format!("{}", p), "1/2*a*b+b^2");

        let p = parse_polynomial("-x^2", None).unwrap();
        assert_eq!(p.lcoeff(), Rational::from(-1));
    }

    #[test]
    fn shared_map() {
        let ps = parse_polynomials(&["x^2*y^3+b*y^2", "y^2+3*a"]).unwrap();
        assert!(Arc::ptr_eq(&ps[0].variables, &ps[1].variables));
        let names: Vec<_> = ps[0].variables.iter().map(|v| v.name().to_string()).collect();
        assert_eq!(names, ["x", "y", "b", "a"]);
    }

    #[test]
    fn given_map() {
        let vars: Arc<VariableMap> = Arc::new(["y", "x"].into_iter().collect());
        let p = parse_polynomial("x*y", Some(vars.clone())).unwrap();
        assert_eq!(p.terms()[0].exponents(), &[1, 1]);
        assert!(matches!(
            parse_polynomial("z", Some(vars)),
            Err(PolynomialError::NotPolynomial { .. })
        ));
    }

    #[test]
    fn univariate() {
        let p = UnivariatePolynomial::parse("x^3 - 6x^2 + 11x - 6", "x").unwrap();
        assert_eq!(p.degree(), 3);
        assert_eq!(p.coefficients[0], Rational::from(-6));
        assert!(UnivariatePolynomial::parse("x*y", "x").is_err());
    }

    #[test]
    fn large_exponents() {
        let p = parse_polynomial("x^4000000000*y", None).unwrap();
        assert_eq!(p.degree(0), 4000000000);

        for input in [
            "x^4000000000*x^4000000000",
            "x^4000000000 x^4000000000",
            "(x^3000000000)^2",
            "(x*y^2)^3000000000",
        ] {
            assert!(
                matches!(
                    parse_polynomial(input, None),
                    Err(PolynomialError::NotPolynomial { .. })
                ),
                "{}",
                input
            );
        }
    }

    #[test]
    fn rejected() {
        for input in ["x^-1", "x^(1/2)", "x^y", "1/x", "sin(x)", "x/0"] {
            assert!(
                matches!(
                    parse_polynomial(input, None),
                    Err(PolynomialError::NotPolynomial { .. })
                ),
                "{}",
                input
            );
        }

        for input in ["x+", "(x+1", "x)", "x $ y", ""] {
            assert!(
                matches!(
                    parse_polynomial(input, None),
                    Err(PolynomialError::Syntax { .. })
                ),
                "{}",
                input
            );
        }
    }
}
