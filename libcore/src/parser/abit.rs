//! The quaternary abit notation
//!
//! | abit | meaning      |
//! |------|--------------|
//! | `(`  | head-open    |
//! | `)`  | tail-open    |
//! | `+`  | link-present |
//! | `-`  | link-absent  |
//!
//! The adjacent pair `()` is the root. A *unit* is a run of `(` closed by a single `)`,
//! e.g. `((()` is `♂♂∞`. After a unit the decoder folds the term decoded so far:
//!
//! * `)` closes its tail: `x♀`
//! * `+u` or a juxtaposed unit `u` links: `x → u`
//! * `-u` links reflected: `u → x`

use super::MAX_DEPTH;
use crate::error::ParseError;
use crate::term::Term;

pub fn is_abit(c: char) -> bool {
    matches!(c, '(' | ')' | '+' | '-')
}

struct Decoder {
    abits: Vec<(usize, char)>,
    index: usize,
    end: usize,
}

fn malformed(position: usize, reason: &str) -> ParseError {
    ParseError::MalformedAbitSequence {
        position,
        reason: String::from(reason),
    }
}

impl Decoder {
    fn new(code: &str) -> Result<Decoder, ParseError> {
        let mut abits = vec![];
        let mut end = 0;
        for (position, c) in code.chars().enumerate() {
            end = position + 1;
            if c.is_whitespace() {
                continue;
            }
            if !is_abit(c) {
                return Err(ParseError::MalformedAbitSequence {
                    position,
                    reason: format!("'{}' is not an abit", c),
                });
            }
            abits.push((position, c));
        }
        Ok(Decoder {
            abits,
            index: 0,
            end,
        })
    }

    fn peek(&self) -> Option<(usize, char)> {
        self.abits.get(self.index).cloned()
    }

    fn position(&self) -> usize {
        self.peek().map(|(p, _)| p).unwrap_or(self.end)
    }

    fn nest(&self, depth: usize, position: usize) -> Result<usize, ParseError> {
        if depth > MAX_DEPTH {
            Err(ParseError::MalformedAbitSequence {
                position,
                reason: format!("nested deeper than {} terms", MAX_DEPTH),
            })
        } else {
            Ok(depth)
        }
    }

    /// A unit and its depth
    fn unit(&mut self) -> Result<(Term, usize), ParseError> {
        let start = match self.peek() {
            Some((position, '(')) => position,
            Some((position, c)) => {
                return Err(ParseError::MalformedAbitSequence {
                    position,
                    reason: format!("expected '(' but found '{}'", c),
                })
            }
            None => return Err(malformed(self.end, "expected '(' but the sequence ended")),
        };
        let mut opens = 0;
        while let Some((_, '(')) = self.peek() {
            self.index += 1;
            opens += 1;
        }
        match self.peek() {
            Some((_, ')')) => {
                let depth = self.nest(opens, start)?;
                self.index += 1;
                let mut term = Term::root();
                for _ in 1..opens {
                    term = Term::head_closed(term);
                }
                Ok((term, depth))
            }
            Some((position, c)) => Err(ParseError::MalformedAbitSequence {
                position,
                reason: format!("expected '(' or ')' but found '{}'", c),
            }),
            None => Err(malformed(start, "unmatched '('")),
        }
    }

    fn sequence(&mut self) -> Result<Term, ParseError> {
        match self.peek() {
            None => return Err(malformed(self.end, "empty abit sequence")),
            Some((position, c)) if c != '(' => {
                return Err(ParseError::MalformedAbitSequence {
                    position,
                    reason: format!("'{}' has no left operand", c),
                })
            }
            _ => (),
        }
        let (mut term, mut depth) = self.unit()?;
        while let Some((position, c)) = self.peek() {
            term = match c {
                ')' => {
                    depth = self.nest(depth + 1, position)?;
                    self.index += 1;
                    Term::tail_closed(term)
                }
                '(' => {
                    let (unit, unit_depth) = self.unit()?;
                    depth = self.nest(depth.max(unit_depth) + 1, position)?;
                    Term::link(term, unit)
                }
                // '+' or '-'
                _ => {
                    self.index += 1;
                    if self.peek().map(|(_, n)| n) != Some('(') {
                        return Err(ParseError::MalformedAbitSequence {
                            position: self.position(),
                            reason: format!("'{}' has no right operand", c),
                        });
                    }
                    let (unit, unit_depth) = self.unit()?;
                    depth = self.nest(depth.max(unit_depth) + 1, position)?;
                    if c == '+' {
                        Term::link(term, unit)
                    } else {
                        Term::link(unit, term)
                    }
                }
            };
        }
        Ok(term)
    }
}

/// Decodes an abit sequence. Whitespace is ignored.
pub fn parse_abit(code: &str) -> Result<Term, ParseError> {
    Decoder::new(code)?.sequence()
}
