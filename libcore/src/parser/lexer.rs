use crate::error::ParseError;
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, digit1},
    combinator::{map, map_res, recognize, value},
    multi::many0_count,
    sequence::pair,
    IResult,
};

use super::token::{Spanned, Token};

// operators
fn arrow_operator(input: &str) -> IResult<&str, Token> {
    value(Token::Arrow, alt((tag("->"), tag("→"))))(input)
}

fn head_operator(input: &str) -> IResult<&str, Token> {
    value(Token::HeadMark, tag("♂"))(input)
}

fn tail_operator(input: &str) -> IResult<&str, Token> {
    value(Token::TailMark, tag("♀"))(input)
}

// `->` is taken by `arrow_operator` first
fn reflect_operator(input: &str) -> IResult<&str, Token> {
    value(Token::Minus, tag("-"))(input)
}

fn power_operator(input: &str) -> IResult<&str, Token> {
    value(Token::Power, tag("^"))(input)
}

fn lex_operator(input: &str) -> IResult<&str, Token> {
    alt((
        arrow_operator,
        reflect_operator,
        head_operator,
        tail_operator,
        power_operator,
    ))(input)
}

// Literals
fn lex_root(input: &str) -> IResult<&str, Token> {
    value(Token::Root, tag("∞"))(input)
}

fn lex_integer(input: &str) -> IResult<&str, Token> {
    map_res(digit1, |digits: &str| digits.parse::<u32>().map(Token::Number))(input)
}

fn lex_ident(input: &str) -> IResult<&str, Token> {
    map(
        recognize(pair(
            alt((alpha1, tag("_"))),
            many0_count(alt((alphanumeric1, tag("_")))),
        )),
        |ident: &str| Token::Ident(ident.to_owned()),
    )(input)
}

// punctuation
fn lex_punctuation(input: &str) -> IResult<&str, Token> {
    alt((
        value(Token::ParenL, tag("(")),
        value(Token::ParenR, tag(")")),
    ))(input)
}

fn lex_token(input: &str) -> IResult<&str, Token> {
    alt((lex_operator, lex_root, lex_punctuation, lex_integer, lex_ident))(input)
}

/// Splits the code into tokens, each annotated with its character offset.
/// The last token is always `Token::EOF`.
pub fn lex_tokens(code: &str) -> Result<Vec<Spanned>, ParseError> {
    let total = code.chars().count();
    let mut tokens = vec![];
    let mut rest = code;
    loop {
        rest = rest.trim_start();
        let position = total - rest.chars().count();
        if rest.is_empty() {
            tokens.push(Spanned {
                token: Token::EOF,
                position,
            });
            return Ok(tokens);
        }
        match lex_token(rest) {
            Ok((remaining, token)) => {
                tokens.push(Spanned { token, position });
                rest = remaining;
            }
            Err(_) => {
                let found = rest
                    .chars()
                    .next()
                    .map(|c| format!("'{}'", c))
                    .unwrap_or_else(|| String::from("end of input"));
                return Err(ParseError::Unexpected {
                    position,
                    expected: String::from("a token"),
                    found,
                });
            }
        }
    }
}

#[cfg(test)]
mod specs {
    use super::*;

    fn tokens(code: &str) -> Vec<Token> {
        lex_tokens(code)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn ident_mixed() {
        let actual = tokens(" abc de x_1 (a b)");
        let expected = vec![
            Token::Ident("abc".to_owned()),
            Token::Ident("de".to_owned()),
            Token::Ident("x_1".to_owned()),
            Token::ParenL,
            Token::Ident("a".to_owned()),
            Token::Ident("b".to_owned()),
            Token::ParenR,
            Token::EOF,
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn operator() {
        let actual = tokens("♂∞ → ∞♀ -> a^3");
        let expected = vec![
            Token::HeadMark,
            Token::Root,
            Token::Arrow,
            Token::Root,
            Token::TailMark,
            Token::Arrow,
            Token::Ident("a".to_owned()),
            Token::Power,
            Token::Number(3),
            Token::EOF,
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn reflection_next_to_arrow() {
        let actual = tokens("-a->-♂∞ - b");
        let expected = vec![
            Token::Minus,
            Token::Ident("a".to_owned()),
            Token::Arrow,
            Token::Minus,
            Token::HeadMark,
            Token::Root,
            Token::Minus,
            Token::Ident("b".to_owned()),
            Token::EOF,
        ];

        assert_eq!(actual, expected);
    }

    #[test]
    fn positions_are_char_offsets() {
        let actual: Vec<_> = lex_tokens("♂∞ →a")
            .unwrap()
            .into_iter()
            .map(|s| s.position)
            .collect();
        assert_eq!(actual, vec![0, 1, 3, 4, 5]);
    }

    #[test]
    fn empty_code() {
        assert_eq!(tokens("   "), vec![Token::EOF]);
    }

    #[test]
    fn illegal_character() {
        let actual = lex_tokens("a → %b");
        assert_eq!(
            actual,
            Err(ParseError::Unexpected {
                position: 4,
                expected: String::from("a token"),
                found: String::from("'%'"),
            })
        );
    }
}
