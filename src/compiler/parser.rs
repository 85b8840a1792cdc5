//! Schema-driven parser/encoder.
//!
//! Consumes tokens and emits wire-format bytes directly: there is no
//! intermediate object graph. Nested messages are encoded depth-first into
//! per-frame buffers and length-prefixed into the parent when their closing
//! brace is seen. The first inconsistency aborts the compile; accumulated
//! bytes are discarded.

use std::collections::HashSet;

use super::lexer::{LexError, Lexer, Located, Token};
use crate::error::{CompileError, ErrorDetail};
use crate::schema::{DescriptorPool, FieldDescriptor, FieldKind, MessageDescriptor};
use crate::wire;

/// Compile proto-text `input` against the message type named `root` in
/// `pool`, returning the root message's wire-format bytes.
pub fn compile(pool: &DescriptorPool, root: &str, input: &str) -> Result<Vec<u8>, CompileError> {
    let root_index = pool.message_by_name(root).ok_or_else(|| {
        CompileError::new(
            1,
            1,
            ErrorDetail::UnknownMessageType {
                name: root.to_string(),
            },
        )
    })?;

    Compiler {
        pool,
        lexer: Lexer::new(input),
        frames: vec![Frame::root(pool.message(root_index))],
    }
    .run()
}

/// One nesting level of the depth-first encode: the active message type,
/// the fields already seen at this level, and the bytes accumulated so far.
struct Frame<'p> {
    message: &'p MessageDescriptor,
    /// Field number to emit into the parent when this frame closes.
    /// The root frame has none.
    number: Option<u32>,
    seen: HashSet<&'p str>,
    buf: Vec<u8>,
}

impl<'p> Frame<'p> {
    fn root(message: &'p MessageDescriptor) -> Self {
        Frame {
            message,
            number: None,
            seen: HashSet::new(),
            buf: Vec::new(),
        }
    }

    fn nested(message: &'p MessageDescriptor, number: u32) -> Self {
        Frame {
            message,
            number: Some(number),
            seen: HashSet::new(),
            buf: Vec::new(),
        }
    }
}

struct Compiler<'p, 'i> {
    pool: &'p DescriptorPool,
    lexer: Lexer<'i>,
    frames: Vec<Frame<'p>>,
}

impl<'p> Compiler<'p, '_> {
    fn run(mut self) -> Result<Vec<u8>, CompileError> {
        loop {
            let tok = self.next_statement_token()?;
            match tok.token {
                Token::Eof => {
                    if self.frames.len() > 1 {
                        return Err(err_at(&tok, ErrorDetail::UnterminatedMessage));
                    }
                    break;
                }
                // `;` is an optional statement terminator, never required.
                Token::Semicolon => {}
                Token::RBrace => self.close_frame(&tok)?,
                Token::Identifier(name) => self.field(name, tok.line, tok.column)?,
                _ => return Err(unexpected(&tok)),
            }
        }
        debug_assert_eq!(self.frames.len(), 1);
        Ok(std::mem::take(&mut self.frames[0].buf))
    }

    /// Pop the innermost frame and append its bytes, length-prefixed, to the
    /// parent. A `}` with only the root frame open is an unmatched brace.
    fn close_frame(&mut self, tok: &Located) -> Result<(), CompileError> {
        let closed = self.frames.pop();
        match (closed, self.frames.last_mut()) {
            (Some(frame), Some(parent)) => {
                if let Some(number) = frame.number {
                    wire::write_tag(&mut parent.buf, number, wire::WIRE_LEN_DELIMITED);
                    wire::write_varint(&mut parent.buf, frame.buf.len() as u64);
                    parent.buf.extend_from_slice(&frame.buf);
                }
                Ok(())
            }
            _ => Err(err_at(tok, ErrorDetail::UnmatchedBrace)),
        }
    }

    /// Process one `field: value` or `field { ... }` entry.
    fn field(&mut self, name: String, line: usize, column: usize) -> Result<(), CompileError> {
        let message = self.top().message;
        let field = match message.field_by_name(&name) {
            Some(f) => f,
            None => {
                return Err(CompileError::new(
                    line,
                    column,
                    ErrorDetail::UnknownField {
                        message_name: message.name.clone(),
                        field_name: name,
                    },
                ));
            }
        };

        if self.top().seen.contains(field.name.as_str()) {
            if !field.repeated {
                return Err(CompileError::new(
                    line,
                    column,
                    ErrorDetail::DuplicateField { field_name: name },
                ));
            }
        } else {
            self.top().seen.insert(field.name.as_str());
        }

        let sep = self.next_statement_token()?;
        match sep.token {
            Token::Colon => {
                let value = self.next_value_token(field, message)?;
                self.value(field, message, value)
            }
            // `field { ... }` without a colon opens a nested message.
            Token::LBrace => self.open_message(field, message, &sep),
            _ => Err(unexpected(&sep)),
        }
    }

    /// Dispatch a value token against the field's wire kind.
    fn value(
        &mut self,
        field: &'p FieldDescriptor,
        message: &'p MessageDescriptor,
        tok: Located,
    ) -> Result<(), CompileError> {
        if tok.token == Token::Eof {
            return Err(err_at(&tok, ErrorDetail::UnexpectedEndOfInput));
        }

        match field.kind {
            FieldKind::Message(_) => match &tok.token {
                Token::LBrace => self.open_message(field, message, &tok),
                other => Err(type_mismatch(field, message, &tok, other.literal())),
            },
            FieldKind::Bool => match &tok.token {
                Token::Identifier(s) if s == "true" => {
                    self.emit_varint(field, 1);
                    Ok(())
                }
                Token::Identifier(s) if s == "false" => {
                    self.emit_varint(field, 0);
                    Ok(())
                }
                other => Err(err_at(
                    &tok,
                    ErrorDetail::BadBoolean {
                        field_name: field.name.clone(),
                        message_name: message.name.clone(),
                        literal: other.literal(),
                    },
                )),
            },
            FieldKind::Enum(enum_index) => match &tok.token {
                Token::Identifier(s) => match self.pool.resolve_enum_value(enum_index, s) {
                    Some(value) => {
                        // Negative enum values sign-extend to 64 bits.
                        self.emit_varint(field, value as i64 as u64);
                        Ok(())
                    }
                    None => Err(err_at(
                        &tok,
                        ErrorDetail::UnknownEnumValue {
                            field_name: field.name.clone(),
                            message_name: message.name.clone(),
                            literal: s.clone(),
                        },
                    )),
                },
                Token::LBrace => Err(type_mismatch(field, message, &tok, "{".to_string())),
                other => Err(err_at(
                    &tok,
                    ErrorDetail::UnknownEnumValue {
                        field_name: field.name.clone(),
                        message_name: message.name.clone(),
                        literal: other.literal(),
                    },
                )),
            },
            FieldKind::String | FieldKind::Bytes => match &tok.token {
                Token::Str(bytes) => {
                    let (number, wire_type) = (field.number, field.kind.wire_type());
                    let buf = &mut self.top().buf;
                    wire::write_tag(buf, number, wire_type);
                    wire::write_varint(buf, bytes.len() as u64);
                    buf.extend_from_slice(bytes);
                    Ok(())
                }
                other => Err(type_mismatch(field, message, &tok, other.literal())),
            },
            _ => match &tok.token {
                Token::Number(text) => self.numeric(field, message, text, &tok),
                other => Err(type_mismatch(field, message, &tok, other.literal())),
            },
        }
    }

    /// Parse and encode a numeric literal per the field's kind.
    ///
    /// Integer literals are scanned as 64-bit values with two's-complement
    /// wraparound for negatives, so a signed literal on an unsigned or
    /// fixed-width field keeps its bit pattern instead of being rejected.
    fn numeric(
        &mut self,
        field: &'p FieldDescriptor,
        message: &'p MessageDescriptor,
        text: &str,
        at: &Located,
    ) -> Result<(), CompileError> {
        let mismatch = || type_mismatch(field, message, at, text.to_string());

        match field.kind {
            FieldKind::Uint32 | FieldKind::Uint64 | FieldKind::Int32 | FieldKind::Int64 => {
                let value = parse_int_literal(text).ok_or_else(mismatch)?;
                self.emit_varint(field, value);
            }
            FieldKind::Sint32 | FieldKind::Sint64 => {
                let value = parse_int_literal(text).ok_or_else(mismatch)?;
                self.emit_varint(field, wire::zigzag64(value as i64));
            }
            FieldKind::Fixed64 | FieldKind::Sfixed64 => {
                let value = parse_int_literal(text).ok_or_else(mismatch)?;
                let (number, wire_type) = (field.number, field.kind.wire_type());
                let buf = &mut self.top().buf;
                wire::write_tag(buf, number, wire_type);
                wire::write_fixed64(buf, value);
            }
            FieldKind::Fixed32 | FieldKind::Sfixed32 => {
                let value = parse_int_literal(text).ok_or_else(mismatch)?;
                let (number, wire_type) = (field.number, field.kind.wire_type());
                let buf = &mut self.top().buf;
                wire::write_tag(buf, number, wire_type);
                wire::write_fixed32(buf, value as u32);
            }
            FieldKind::Double => {
                let value: f64 = text.parse().map_err(|_| mismatch())?;
                let (number, wire_type) = (field.number, field.kind.wire_type());
                let buf = &mut self.top().buf;
                wire::write_tag(buf, number, wire_type);
                wire::write_fixed64(buf, value.to_bits());
            }
            FieldKind::Float => {
                let value: f32 = text.parse().map_err(|_| mismatch())?;
                let (number, wire_type) = (field.number, field.kind.wire_type());
                let buf = &mut self.top().buf;
                wire::write_tag(buf, number, wire_type);
                wire::write_fixed32(buf, value.to_bits());
            }
            _ => unreachable!("non-numeric kinds handled by value()"),
        }
        Ok(())
    }

    /// Open a nested-message frame for `field`, or fail if the field is not
    /// message-kind.
    fn open_message(
        &mut self,
        field: &'p FieldDescriptor,
        message: &'p MessageDescriptor,
        at: &Located,
    ) -> Result<(), CompileError> {
        match field.kind {
            FieldKind::Message(index) => {
                self.frames
                    .push(Frame::nested(self.pool.message(index), field.number));
                Ok(())
            }
            _ => Err(type_mismatch(field, message, at, "{".to_string())),
        }
    }

    fn emit_varint(&mut self, field: &FieldDescriptor, value: u64) {
        let (number, wire_type) = (field.number, field.kind.wire_type());
        let buf = &mut self.top().buf;
        wire::write_tag(buf, number, wire_type);
        wire::write_varint(buf, value);
    }

    fn top(&mut self) -> &mut Frame<'p> {
        let last = self.frames.len() - 1;
        &mut self.frames[last]
    }

    /// Fetch a token at statement scope, where escape failures have no field
    /// context: the offending string could only ever be an unexpected token.
    fn next_statement_token(&mut self) -> Result<Located, CompileError> {
        self.lexer.next_token().map_err(lex_error)
    }

    /// Fetch the value token for `field`, decorating escape failures with
    /// the field and message names.
    fn next_value_token(
        &mut self,
        field: &FieldDescriptor,
        message: &MessageDescriptor,
    ) -> Result<Located, CompileError> {
        self.lexer.next_token().map_err(|e| match e {
            LexError::BadEscape {
                escape,
                line,
                column,
            } => CompileError::new(
                line,
                column,
                ErrorDetail::BadEscape {
                    field_name: field.name.clone(),
                    message_name: message.name.clone(),
                    escape,
                },
            ),
            other => lex_error(other),
        })
    }
}

fn err_at(tok: &Located, detail: ErrorDetail) -> CompileError {
    CompileError::new(tok.line, tok.column, detail)
}

fn type_mismatch(
    field: &FieldDescriptor,
    message: &MessageDescriptor,
    at: &Located,
    literal: String,
) -> CompileError {
    err_at(
        at,
        ErrorDetail::TypeMismatch {
            field_name: field.name.clone(),
            message_name: message.name.clone(),
            expected: field.kind.type_name(),
            literal,
        },
    )
}

/// Map a token that cannot appear at the current position to a diagnostic:
/// end of input gets its own report, anything else names its first
/// character.
fn unexpected(tok: &Located) -> CompileError {
    let ch = match &tok.token {
        Token::Identifier(s) | Token::Number(s) => s.chars().next().unwrap_or(' '),
        Token::Str(_) => '"',
        Token::LBrace => '{',
        Token::RBrace => '}',
        Token::Colon => ':',
        Token::Semicolon => ';',
        Token::Eof => return err_at(tok, ErrorDetail::UnexpectedEndOfInput),
    };
    err_at(tok, ErrorDetail::UnexpectedCharacter { ch })
}

/// Lexical failures reaching statement scope carry no field context; a bad
/// escape there is just an out-of-place string token.
fn lex_error(e: LexError) -> CompileError {
    match e {
        LexError::UnexpectedCharacter { ch, line, column } => {
            CompileError::new(line, column, ErrorDetail::UnexpectedCharacter { ch })
        }
        LexError::UnexpectedEndOfInput { line, column } => {
            CompileError::new(line, column, ErrorDetail::UnexpectedEndOfInput)
        }
        LexError::BadEscape { line, column, .. } => {
            CompileError::new(line, column, ErrorDetail::UnexpectedCharacter { ch: '"' })
        }
    }
}

/// Scan a decimal integer literal as a 64-bit value. Negative literals wrap
/// to their two's-complement bit pattern, matching native fixed-width
/// conversion; callers narrow to the field's width.
fn parse_int_literal(text: &str) -> Option<u64> {
    match text.strip_prefix('-') {
        Some(rest) => rest.parse::<u64>().ok().map(u64::wrapping_neg),
        None => text.parse::<u64>().ok(),
    }
}
