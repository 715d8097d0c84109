//! Recursive descent parser for TOML
//!
//! Builds a rowan GreenNode tree from tokens.
//! Supports error recovery and produces a lossless CST: documents that are
//! being typed (`key =`, `[mods`, `side = "BO`) still yield a usable tree.

use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use rowan::{GreenNode, GreenNodeBuilder, TextRange, TextSize};

/// Parse result containing the green tree and any errors
#[derive(Debug, Clone)]
pub struct Parse {
    pub green: GreenNode,
    pub errors: Vec<SyntaxError>,
}

impl Parse {
    /// Get the root syntax node
    pub fn syntax(&self) -> super::SyntaxNode {
        super::SyntaxNode::new_root(self.green.clone())
    }

    /// Get the typed root of the tree
    pub fn tree(&self) -> super::TomlFile {
        super::TomlFile::new_root(self.syntax())
    }

    /// Check if parsing succeeded without errors
    pub fn ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// A syntax error with location and message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// Parse TOML source text into a CST
pub fn parse(input: &str) -> Parse {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, TextSize::of(input));
    parser.parse_file();
    parser.finish()
}

/// The parser state
struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>], end: TextSize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            builder: GreenNodeBuilder::new(),
            errors: Vec::new(),
        }
    }

    fn finish(self) -> Parse {
        Parse {
            green: self.builder.finish(),
            errors: self.errors,
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::ERROR)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Raw lookahead, trivia included
    fn nth_raw(&self, n: usize) -> Option<SyntaxKind> {
        self.tokens.get(self.pos + n).map(|t| t.kind)
    }

    /// First kind at or after the cursor that is not whitespace
    fn peek_past_whitespace(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|&k| k != SyntaxKind::WHITESPACE)
    }

    /// First kind at or after the cursor that is not trivia or a newline
    fn peek_significant(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos.min(self.tokens.len())..]
            .iter()
            .map(|t| t.kind)
            .find(|&k| !k.is_trivia() && k != SyntaxKind::NEWLINE)
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    fn bump(&mut self) {
        if let Some(token) = self.current() {
            self.builder.token(token.kind.into(), token.text);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.at(SyntaxKind::WHITESPACE) {
            self.bump();
        }
    }

    fn skip_trivia_and_newlines(&mut self) {
        while self
            .current()
            .map(|t| t.kind.is_trivia() || t.kind == SyntaxKind::NEWLINE)
            .unwrap_or(false)
        {
            self.bump();
        }
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    fn error(&mut self, message: impl Into<String>) {
        let range = self
            .current()
            .map(|t| TextRange::at(t.offset, TextSize::of(t.text)))
            .unwrap_or_else(|| TextRange::empty(self.end));
        self.errors.push(SyntaxError::new(message, range));
    }

    /// Record an error and wrap everything up to the end of the line in an ERROR node
    fn error_to_line_end(&mut self, message: impl Into<String>) {
        self.error(message);
        self.builder.start_node(SyntaxKind::ERROR.into());
        while !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.bump();
        }
        self.builder.finish_node();
    }

    // =========================================================================
    // Node building helpers
    // =========================================================================

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// File = Entries (Table | ArrayTable)*
    fn parse_file(&mut self) {
        self.start_node(SyntaxKind::TOML_FILE);

        self.parse_entries();
        loop {
            self.skip_trivia_and_newlines();
            if self.at_eof() {
                break;
            }
            // parse_entries only stops at EOF or a header bracket
            self.parse_table();
        }

        self.finish_node();
    }

    /// Entries = (KeyValue NEWLINE)*
    ///
    /// Stops before the trivia that precedes the next table header, so the
    /// comments documenting a header stay next to it at file level.
    fn parse_entries(&mut self) {
        loop {
            match self.peek_significant() {
                None | Some(SyntaxKind::L_BRACKET) => break,
                Some(_) => {}
            }
            self.skip_trivia_and_newlines();

            if self.current_kind().is_key_start() {
                self.parse_key_value();
                self.finish_line();
            } else {
                self.error_to_line_end("expected a key");
            }
        }
    }

    /// Table = '[' Key ']' Entries
    /// ArrayTable = '[[' Key ']]' Entries
    fn parse_table(&mut self) {
        let is_array = self.nth_raw(1) == Some(SyntaxKind::L_BRACKET);
        self.start_node(if is_array {
            SyntaxKind::ARRAY_TABLE
        } else {
            SyntaxKind::TABLE
        });

        self.parse_table_header(is_array);
        self.finish_line();
        self.parse_entries();

        self.finish_node();
    }

    fn parse_table_header(&mut self, is_array: bool) {
        self.start_node(SyntaxKind::TABLE_HEADER);

        self.bump(); // [
        if is_array {
            self.bump(); // [
        }
        self.skip_whitespace();

        if self.current_kind().is_key_start() {
            self.parse_key();
        } else {
            self.error("expected a table name");
        }
        self.skip_whitespace();

        let closer = if is_array { "expected ']]'" } else { "expected ']'" };
        if self.eat(SyntaxKind::R_BRACKET) {
            if is_array && !self.eat(SyntaxKind::R_BRACKET) {
                self.error(closer);
            }
        } else {
            self.error(closer);
        }

        self.finish_node();
    }

    /// After an entry or header only whitespace and a comment may follow on the line
    fn finish_line(&mut self) {
        self.skip_whitespace();
        self.eat(SyntaxKind::COMMENT);
        if !self.at_eof() && !self.at(SyntaxKind::NEWLINE) {
            self.error_to_line_end("expected a newline");
        }
    }

    /// KeyValue = Key '=' Value
    ///
    /// A key without '=' or without a value still produces a KEY_VALUE node
    /// so that a half-typed entry can be completed.
    fn parse_key_value(&mut self) {
        self.start_node(SyntaxKind::KEY_VALUE);

        self.parse_key();
        self.skip_whitespace();

        if self.eat(SyntaxKind::EQ) {
            self.skip_whitespace();
            if self.current_kind().is_value_start() && !self.at_eof() {
                self.parse_value();
            } else {
                self.error("expected a value");
            }
        } else {
            self.error("expected '='");
        }

        self.finish_node();
    }

    /// Key = KeySegment ('.' KeySegment)*
    fn parse_key(&mut self) {
        self.start_node(SyntaxKind::KEY);

        self.parse_key_segment();
        while self.peek_past_whitespace() == Some(SyntaxKind::DOT) {
            self.skip_whitespace();
            self.bump(); // .
            self.skip_whitespace();
            if self.current_kind().is_key_start() && !self.at_eof() {
                self.parse_key_segment();
            } else {
                self.error("expected a key segment");
                break;
            }
        }

        self.finish_node();
    }

    fn parse_key_segment(&mut self) {
        self.start_node(SyntaxKind::KEY_SEGMENT);
        self.bump();
        self.finish_node();
    }

    /// Value = Literal | Array | InlineTable
    fn parse_value(&mut self) {
        match self.current_kind() {
            SyntaxKind::L_BRACKET => self.parse_array(),
            SyntaxKind::L_BRACE => self.parse_inline_table(),
            kind if kind.is_string() => {
                if kind == SyntaxKind::UNTERMINATED_STRING {
                    self.error("unterminated string");
                }
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                self.finish_node();
            }
            SyntaxKind::BARE => {
                // Numbers, booleans and dates: glue adjacent words (`1.5`, `07:32:00`)
                self.start_node(SyntaxKind::LITERAL);
                self.bump();
                while matches!(
                    self.current_kind(),
                    SyntaxKind::BARE | SyntaxKind::DOT | SyntaxKind::COLON
                ) && !self.at_eof()
                {
                    self.bump();
                }
                self.finish_node();
            }
            _ => self.error("expected a value"),
        }
    }

    /// Array = '[' (Value (',' Value)* ','?)? ']'
    fn parse_array(&mut self) {
        self.start_node(SyntaxKind::ARRAY);
        self.bump(); // [

        loop {
            self.skip_trivia_and_newlines();
            if self.at_eof() {
                self.error("expected ']'");
                break;
            }
            match self.current_kind() {
                SyntaxKind::R_BRACKET => {
                    self.bump();
                    break;
                }
                SyntaxKind::COMMA => self.bump(),
                kind if kind.is_value_start() => {
                    self.parse_value();
                    self.skip_trivia_and_newlines();
                    if !self.at_eof()
                        && !self.at(SyntaxKind::COMMA)
                        && !self.at(SyntaxKind::R_BRACKET)
                    {
                        self.error("expected ',' or ']'");
                    }
                }
                _ => {
                    self.error("expected ']'");
                    break;
                }
            }
        }

        self.finish_node();
    }

    /// InlineTable = '{' (KeyValue (',' KeyValue)*)? '}'
    fn parse_inline_table(&mut self) {
        self.start_node(SyntaxKind::INLINE_TABLE);
        self.bump(); // {

        loop {
            self.skip_whitespace();
            if self.at_eof() || self.at(SyntaxKind::NEWLINE) {
                self.error("expected '}'");
                break;
            }
            match self.current_kind() {
                SyntaxKind::R_BRACE => {
                    self.bump();
                    break;
                }
                SyntaxKind::COMMA => self.bump(),
                kind if kind.is_key_start() => self.parse_key_value(),
                _ => {
                    self.error("expected '}'");
                    break;
                }
            }
        }

        self.finish_node();
    }
}
