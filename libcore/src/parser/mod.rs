use crate::error::ParseError;
use crate::parser::token::*;
use crate::term::Term;

pub mod abit;
mod lexer;
pub mod token;

pub use abit::parse_abit;

/// The surface syntax a formula is written in
#[derive(Deserialize, Serialize, PartialEq, Eq, Debug, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Notation {
    Symbolic,
    Abit,
}

/// Text consisting only of abits (and whitespace) is abit notation.
/// Everything else, including the empty text, is symbolic.
pub fn detect_notation(code: &str) -> Notation {
    let mut chars = code.chars().filter(|c| !c.is_whitespace()).peekable();
    if chars.peek().is_none() {
        return Notation::Symbolic;
    }
    if chars.all(abit::is_abit) {
        Notation::Abit
    } else {
        Notation::Symbolic
    }
}

/// Largest count accepted by the power loop `x^n`
pub const MAX_LOOP_COUNT: u32 = 64;
/// Deepest term, and deepest parenthesis nesting, either notation may produce
pub const MAX_DEPTH: usize = 256;

#[derive(PartialEq, Debug, Clone, Copy)]
enum Mode {
    /// Identifiers are atoms
    Concrete,
    /// Identifiers are pattern variables
    Schema,
}

/// A parsed term together with its depth
type Node = (Term, usize);

struct Parser {
    tokens: Vec<Spanned>,
    index: usize,
    mode: Mode,
    /// Open parentheses around the current token
    nesting: usize,
}

fn starts_operand(token: &Token) -> bool {
    matches!(
        token,
        Token::Minus | Token::HeadMark | Token::Root | Token::ParenL | Token::Ident(_)
    )
}

impl Parser {
    fn new(code: &str, mode: Mode) -> Result<Parser, ParseError> {
        Ok(Parser {
            tokens: lexer::lex_tokens(code)?,
            index: 0,
            mode,
            nesting: 0,
        })
    }

    fn peek(&self) -> &Spanned {
        // The lexer guarantees a trailing EOF
        &self.tokens[self.index.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) -> Spanned {
        let current = self.peek().clone();
        if self.index < self.tokens.len() - 1 {
            self.index += 1;
        }
        current
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let current = self.peek();
        ParseError::Unexpected {
            position: current.position,
            expected: String::from(expected),
            found: current.token.to_string(),
        }
    }

    fn expect(&mut self, token: Token, expected: &str) -> Result<(), ParseError> {
        if self.peek().token == token {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Rejects terms deeper than `MAX_DEPTH` before they get built
    fn nest(&self, depth: usize) -> Result<usize, ParseError> {
        if depth > MAX_DEPTH {
            Err(self.unexpected(&format!("at most {} nested terms", MAX_DEPTH)))
        } else {
            Ok(depth)
        }
    }

    fn formula(&mut self) -> Result<Term, ParseError> {
        let (term, _) = self.chain()?;
        self.expect(Token::EOF, "'→' or end of input")?;
        Ok(term)
    }

    /// Explicit arrows and juxtaposition are the same left associative connective.
    fn chain(&mut self) -> Result<Node, ParseError> {
        let (mut term, mut depth) = self.operand()?;
        loop {
            if self.peek().token == Token::Arrow {
                self.advance();
            } else if !starts_operand(&self.peek().token) {
                return Ok((term, depth));
            }
            let (right, right_depth) = self.operand()?;
            depth = self.nest(depth.max(right_depth) + 1)?;
            term = Term::link(term, right);
        }
    }

    /// reflections, the closed term and an optional power loop
    fn operand(&mut self) -> Result<Node, ParseError> {
        let mut reflections = 0;
        while self.peek().token == Token::Minus {
            self.advance();
            reflections += 1;
        }
        let position = self.peek().position;
        let (mut term, depth) = self.closure()?;
        for _ in 0..reflections {
            term = term.reflect().ok_or_else(|| ParseError::Unexpected {
                position,
                expected: String::from("a reflectable term after '-'"),
                found: String::from("a pattern variable"),
            })?;
        }

        if self.peek().token != Token::Power {
            return Ok((term, depth));
        }
        self.advance();
        let count = self.peek().token.clone();
        match count {
            Token::Number(n) if (1..=MAX_LOOP_COUNT).contains(&n) => {
                let n = n as usize;
                let looped_depth = self.nest(depth + n - 1)?;
                self.advance();
                let mut looped = term.clone();
                for _ in 1..n {
                    looped = Term::link(looped, term.clone());
                }
                Ok((looped, looped_depth))
            }
            _ => Err(self.unexpected(&format!("a loop count from 1 to {}", MAX_LOOP_COUNT))),
        }
    }

    /// prefixes, primary and postfixes
    fn closure(&mut self) -> Result<Node, ParseError> {
        let mut heads = 0;
        while self.peek().token == Token::HeadMark {
            self.advance();
            heads += 1;
        }
        let (mut term, depth) = self.primary()?;
        let mut depth = self.nest(depth + heads)?;
        for _ in 0..heads {
            term = Term::head_closed(term);
        }
        while self.peek().token == Token::TailMark {
            depth = self.nest(depth + 1)?;
            self.advance();
            term = Term::tail_closed(term);
        }
        Ok((term, depth))
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let current = self.peek().clone();
        match current.token {
            Token::Root => {
                self.advance();
                Ok((Term::root(), 1))
            }
            Token::Ident(name) => {
                self.advance();
                let term = match self.mode {
                    Mode::Concrete => Term::Atom(name),
                    Mode::Schema => Term::PatternVar(name),
                };
                Ok((term, 1))
            }
            Token::ParenL => {
                if self.nesting >= MAX_DEPTH {
                    return Err(self.unexpected(&format!(
                        "at most {} nested parentheses",
                        MAX_DEPTH
                    )));
                }
                self.advance();
                // `()` is the root
                if self.peek().token == Token::ParenR {
                    self.advance();
                    return Ok((Term::root(), 1));
                }
                self.nesting += 1;
                let inner = self.chain()?;
                self.nesting -= 1;
                self.expect(Token::ParenR, "')'")?;
                Ok(inner)
            }
            _ => Err(self.unexpected("a term")),
        }
    }
}

/// Parses the symbolic notation. Identifiers become atoms.
pub fn parse_symbolic(code: &str) -> Result<Term, ParseError> {
    Parser::new(code, Mode::Concrete)?.formula()
}

/// Parses an axiom schema. Identifiers become pattern variables.
pub fn parse_schema(code: &str) -> Result<Term, ParseError> {
    Parser::new(code, Mode::Schema)?.formula()
}

/// Parses either notation, see `detect_notation`
pub fn parse_formula(code: &str) -> Result<Term, ParseError> {
    match detect_notation(code) {
        Notation::Abit => parse_abit(code),
        Notation::Symbolic => parse_symbolic(code),
    }
}

pub fn parse_with(code: &str, notation: Notation) -> Result<Term, ParseError> {
    match notation {
        Notation::Abit => parse_abit(code),
        Notation::Symbolic => parse_symbolic(code),
    }
}

impl Term {
    pub fn parse(code: &str) -> Result<Term, ParseError> {
        parse_formula(code)
    }
}
