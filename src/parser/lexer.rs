//! Logos-based lexer for TOML
//!
//! Fast tokenization using the logos crate. Numbers, booleans and dates are
//! all lexed as `BARE` words; the parser glues adjacent words into one
//! literal and the AST layer classifies it.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::TextSize;

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset += text.len() as u32;

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"\r?\n")]
    Newline,

    #[regex(r"#[^\r\n]*")]
    Comment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[A-Za-z0-9_+\-]+")]
    Bare,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*""#)]
    BasicString,

    #[regex(r"'[^'\r\n]*'")]
    LiteralString,

    #[regex(r#""""([^"]|"[^"]|""[^"])*""""#)]
    MultilineBasicString,

    #[regex(r"'''([^']|'[^']|''[^'])*'''")]
    MultilineLiteralString,

    #[regex(r#""([^"\\\r\n]|\\[^\r\n])*"#)]
    UnterminatedBasicString,

    #[regex(r"'[^'\r\n]*")]
    UnterminatedLiteralString,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("=")]
    Eq,

    #[token(".")]
    Dot,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::Newline => SyntaxKind::NEWLINE,
            LogosToken::Comment => SyntaxKind::COMMENT,
            LogosToken::Bare => SyntaxKind::BARE,
            LogosToken::BasicString => SyntaxKind::BASIC_STRING,
            LogosToken::LiteralString => SyntaxKind::LITERAL_STRING,
            LogosToken::MultilineBasicString => SyntaxKind::ML_BASIC_STRING,
            LogosToken::MultilineLiteralString => SyntaxKind::ML_LITERAL_STRING,
            LogosToken::UnterminatedBasicString | LogosToken::UnterminatedLiteralString => {
                SyntaxKind::UNTERMINATED_STRING
            }
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Colon => SyntaxKind::COLON,
        }
    }
}
