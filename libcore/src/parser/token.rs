use std::fmt;

#[derive(PartialEq, Debug, Clone)]
pub enum Token {
    EOF,
    //
    Ident(String),
    Number(u32),
    Root,
    // operators
    HeadMark,
    TailMark,
    Arrow,
    Minus,
    Power,
    // grouping
    ParenL,
    ParenR,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::EOF => write!(f, "end of input"),
            Token::Ident(ident) => write!(f, "'{}'", ident),
            Token::Number(number) => write!(f, "'{}'", number),
            Token::Root => write!(f, "'∞'"),
            Token::HeadMark => write!(f, "'♂'"),
            Token::TailMark => write!(f, "'♀'"),
            Token::Arrow => write!(f, "'→'"),
            Token::Minus => write!(f, "'-'"),
            Token::Power => write!(f, "'^'"),
            Token::ParenL => write!(f, "'('"),
            Token::ParenR => write!(f, "')'"),
        }
    }
}

/// A token together with its character offset in the source
#[derive(PartialEq, Debug, Clone)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}
