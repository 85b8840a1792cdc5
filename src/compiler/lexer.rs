/// Token types produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A field name, enum value name, or `true`/`false`.
    Identifier(String),
    /// Raw numeric literal text, optional sign and leading dot included.
    /// Parsed per the target field's kind, not here.
    Number(String),
    /// Quoted string contents with escapes already decoded.
    Str(Vec<u8>),
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `:`
    Colon,
    /// `;`
    Semicolon,
    /// End of input
    Eof,
}

impl Token {
    /// The literal text quoted back at the user in diagnostics.
    pub fn literal(&self) -> String {
        match self {
            Token::Identifier(s) | Token::Number(s) => s.clone(),
            Token::Str(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Token::LBrace => "{".to_string(),
            Token::RBrace => "}".to_string(),
            Token::Colon => ":".to_string(),
            Token::Semicolon => ";".to_string(),
            Token::Eof => String::new(),
        }
    }
}

/// A token with its source location.
#[derive(Debug, Clone)]
pub struct Located {
    pub token: Token,
    pub line: usize,
    pub column: usize,
}

/// Lexical failures. The parser decorates these with field/message context
/// before surfacing them.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// Backslash escape with an unrecognized escape character.
    BadEscape {
        escape: char,
        line: usize,
        column: usize,
    },
    /// A character that cannot start or continue any token.
    UnexpectedCharacter {
        ch: char,
        line: usize,
        column: usize,
    },
    /// Input ended inside a string literal.
    UnexpectedEndOfInput { line: usize, column: usize },
}

/// Tokenizer for the proto-text config grammar.
///
/// Whitespace and `#`-to-end-of-line comments are transparent: they are
/// skipped before every token, so a comment may sit between any two tokens,
/// including between a field name and its `:`.
pub struct Lexer<'a> {
    src: &'a str,
    input: &'a [u8],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            src: input,
            input: input.as_bytes(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn peek_byte(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        if b == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(b)
    }

    /// Decode the character at the cursor, for error reporting.
    fn char_at_cursor(&self) -> char {
        self.src[self.pos..].chars().next().unwrap_or('\0')
    }

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek_byte() {
                Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') => {
                    self.advance();
                }
                Some(b'#') => {
                    // Line comment: skip to end of line
                    while let Some(b) = self.advance() {
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let start = self.pos;
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        self.src[start..self.pos].to_string()
    }

    /// Read a numeric literal: optional `-`, digits and dots. The literal
    /// must be followed by whitespace, `;`, `}`, `#`, or end of input, so
    /// trailing punctuation is never swallowed into the number.
    fn read_number(&mut self) -> Result<String, LexError> {
        let start = self.pos;
        if self.peek_byte() == Some(b'-') {
            self.advance();
        }
        while let Some(b) = self.peek_byte() {
            if b.is_ascii_digit() || b == b'.' {
                self.advance();
            } else {
                break;
            }
        }
        match self.peek_byte() {
            None | Some(b' ') | Some(b'\t') | Some(b'\r') | Some(b'\n') | Some(b';')
            | Some(b'}') | Some(b'#') => Ok(self.src[start..self.pos].to_string()),
            Some(_) => Err(LexError::UnexpectedCharacter {
                ch: self.char_at_cursor(),
                line: self.line,
                column: self.column,
            }),
        }
    }

    /// Read a quoted string, decoding backslash escapes into raw bytes.
    fn read_string(&mut self) -> Result<Vec<u8>, LexError> {
        // Opening quote already peeked by the caller.
        self.advance();
        let mut out = Vec::new();
        loop {
            match self.advance() {
                None => {
                    return Err(LexError::UnexpectedEndOfInput {
                        line: self.line,
                        column: self.column,
                    });
                }
                Some(b'"') => return Ok(out),
                Some(b'\\') => out.push(self.read_escape()?),
                Some(b) => out.push(b),
            }
        }
    }

    fn read_escape(&mut self) -> Result<u8, LexError> {
        let (line, column) = (self.line, self.column);
        match self.peek_byte() {
            None => Err(LexError::UnexpectedEndOfInput { line, column }),
            Some(b @ b'0'..=b'7') => {
                // Octal escape: up to three octal digits.
                self.advance();
                let mut value = u32::from(b - b'0');
                for _ in 0..2 {
                    match self.peek_byte() {
                        Some(d @ b'0'..=b'7') => {
                            self.advance();
                            value = value * 8 + u32::from(d - b'0');
                        }
                        _ => break,
                    }
                }
                Ok(value as u8)
            }
            Some(b) => {
                let decoded = match b {
                    b'a' => Some(0x07),
                    b'b' => Some(0x08),
                    b'f' => Some(0x0c),
                    b'n' => Some(b'\n'),
                    b'r' => Some(b'\r'),
                    b't' => Some(b'\t'),
                    b'v' => Some(0x0b),
                    b'\\' => Some(b'\\'),
                    b'\'' => Some(b'\''),
                    b'"' => Some(b'"'),
                    b'?' => Some(b'?'),
                    _ => None,
                };
                match decoded {
                    Some(byte) => {
                        self.advance();
                        Ok(byte)
                    }
                    None => Err(LexError::BadEscape {
                        escape: self.char_at_cursor(),
                        line,
                        column,
                    }),
                }
            }
        }
    }

    /// Read the next token.
    pub fn next_token(&mut self) -> Result<Located, LexError> {
        self.skip_whitespace_and_comments();
        let (line, column) = (self.line, self.column);

        let token = match self.peek_byte() {
            None => Token::Eof,
            Some(b'{') => {
                self.advance();
                Token::LBrace
            }
            Some(b'}') => {
                self.advance();
                Token::RBrace
            }
            Some(b':') => {
                self.advance();
                Token::Colon
            }
            Some(b';') => {
                self.advance();
                Token::Semicolon
            }
            Some(b'"') => Token::Str(self.read_string()?),
            Some(b) if b.is_ascii_alphabetic() || b == b'_' => {
                Token::Identifier(self.read_identifier())
            }
            Some(b) if b.is_ascii_digit() || b == b'-' || b == b'.' => {
                Token::Number(self.read_number()?)
            }
            Some(_) => {
                return Err(LexError::UnexpectedCharacter {
                    ch: self.char_at_cursor(),
                    line,
                    column,
                });
            }
        };

        Ok(Located {
            token,
            line,
            column,
        })
    }
}
