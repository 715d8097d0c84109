//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree of
//! a TOML document.

/// All syntax kinds (tokens and nodes) of a TOML document
///
/// Tokens are leaf nodes (bare words, strings, punctuation).
/// Nodes are composite (tables, key/value pairs, arrays).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    COMMENT,
    /// Newlines terminate key/value pairs, so they are not trivia
    NEWLINE,

    // =========================================================================
    // LITERALS
    // =========================================================================
    BARE,                   // modId, 42, true, 1979-05-27T07
    BASIC_STRING,           // "hello"
    LITERAL_STRING,         // 'hello'
    ML_BASIC_STRING,        // """hello"""
    ML_LITERAL_STRING,      // '''hello'''
    UNTERMINATED_STRING,    // "hello   (no closing quote before end of line)

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACKET,              // [
    R_BRACKET,              // ]
    L_BRACE,                // {
    R_BRACE,                // }
    EQ,                     // =
    DOT,                    // .
    COMMA,                  // ,
    COLON,                  // :

    // =========================================================================
    // NODES
    // =========================================================================
    TOML_FILE,
    TABLE,                  // [name] + entries
    ARRAY_TABLE,            // [[name]] + entries
    TABLE_HEADER,
    KEY_VALUE,
    KEY,
    KEY_SEGMENT,
    LITERAL,
    ARRAY,
    INLINE_TABLE,

    /// Lexer or parser error (token or node)
    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::COMMENT)
    }

    /// Check if this is any string token, terminated or not
    pub fn is_string(self) -> bool {
        matches!(
            self,
            Self::BASIC_STRING
                | Self::LITERAL_STRING
                | Self::ML_BASIC_STRING
                | Self::ML_LITERAL_STRING
                | Self::UNTERMINATED_STRING
        )
    }

    /// Check if a key segment can start with this token
    pub fn is_key_start(self) -> bool {
        matches!(self, Self::BARE | Self::BASIC_STRING | Self::LITERAL_STRING)
    }

    /// Check if a value can start with this token
    pub fn is_value_start(self) -> bool {
        self.is_string() || matches!(self, Self::BARE | Self::L_BRACKET | Self::L_BRACE)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TomlLanguage {}

impl rowan::Language for TomlLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TomlLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TomlLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TomlLanguage>;
