//! Recursive descent parser for the allocator script language
//!
//! Grammar:
//!
//! ```text
//! program    := stmt_list
//! stmt_list  := (stmt ';' stmt_list) | ε
//! stmt       := ID '(' ID ')'    free(var), or a no-op keyword
//!             | ID '(' ')'       dump() | compress(), or a no-op keyword
//!             | ID '=' rhs
//! rhs        := ID '(' INT ')'   allocation: var = name(size)
//!             | ID               copy: var1 = var2
//! ```
//!
//! The parser holds a single lookahead token and pulls the next one from
//! the lexer as each is consumed. Statements are resolved to [`Command`]
//! values one at a time via [`Parser::next_command`], so the caller can
//! execute each statement before the next is parsed.

use crate::parser::ast::{Command, SourceLocation};
use crate::parser::lexer::{Lexer, Token};
use std::fmt;
use std::mem;

/// Parser error type
///
/// The single fatal error kind this layer produces: the lookahead token
/// did not match what the grammar requires at the current position.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    fn new(message: String, location: SourceLocation) -> Self {
        Self { message, location }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Syntax error at line {}, column {}: {}",
            self.location.line, self.location.column, self.message
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser with single-token lookahead.
pub struct Parser {
    lexer: Lexer,
    lookahead: Token,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        let mut lexer = Lexer::new(source);
        let lookahead = lexer.next_token();
        Self { lexer, lookahead }
    }

    /// Parse the next statement, or `None` at end of input.
    pub fn next_command(&mut self) -> Result<Option<Command>, ParseError> {
        if matches!(self.lookahead, Token::Eof(_)) {
            return Ok(None);
        }
        self.parse_statement().map(Some)
    }

    /// stmt := ID '(' ... | ID '=' rhs, followed by ';'
    fn parse_statement(&mut self) -> Result<Command, ParseError> {
        let location = self.lookahead.location();
        let name = self.expect_identifier()?;

        let command = match self.lookahead {
            Token::LParen(_) => {
                self.advance();
                self.parse_call(name, location)?
            }
            Token::Eq(_) => {
                self.advance();
                self.parse_assignment(name, location)?
            }
            ref other => {
                return Err(ParseError::new(
                    format!("Expected '(' or '=' after identifier, found {}", other),
                    other.location(),
                ));
            }
        };

        match self.advance() {
            Token::Semicolon(_) => Ok(command),
            other => Err(ParseError::new(
                format!("Expected ';' after statement, found {}", other),
                other.location(),
            )),
        }
    }

    /// Call form: the '(' is already consumed. Keyword dispatch happens
    /// here, once; unrecognized keywords parse to [`Command::Nop`].
    fn parse_call(
        &mut self,
        keyword: String,
        location: SourceLocation,
    ) -> Result<Command, ParseError> {
        // Zero-argument call: dump() or compress()
        if matches!(self.lookahead, Token::RParen(_)) {
            self.advance();
            let command = match keyword.as_str() {
                "dump" => Command::Dump { location },
                "compress" => Command::Compress { location },
                _ => Command::Nop { location },
            };
            return Ok(command);
        }

        // Single-argument call: free(var)
        let var = self.expect_identifier()?;
        self.expect_rparen()?;

        let command = match keyword.as_str() {
            "free" => Command::Release { var, location },
            _ => Command::Nop { location },
        };
        Ok(command)
    }

    /// rhs := ID '(' INT ')' | ID
    fn parse_assignment(
        &mut self,
        dst: String,
        location: SourceLocation,
    ) -> Result<Command, ParseError> {
        let name = self.expect_identifier()?;

        // Allocation: any identifier followed by '(' INT ')'
        if matches!(self.lookahead, Token::LParen(_)) {
            self.advance();
            let size = self.expect_int()?;
            self.expect_rparen()?;
            return Ok(Command::Alloc {
                var: dst,
                size,
                location,
            });
        }

        // Plain identifier: copy
        Ok(Command::CopyVar {
            dst,
            src: name,
            location,
        })
    }

    /// Consume the lookahead and refill it from the lexer.
    fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        mem::replace(&mut self.lookahead, next)
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        match self.advance() {
            Token::Ident(name, _) => Ok(name),
            other => Err(ParseError::new(
                format!("Expected identifier, found {}", other),
                other.location(),
            )),
        }
    }

    fn expect_int(&mut self) -> Result<u64, ParseError> {
        match self.advance() {
            Token::IntLiteral(value, _) => Ok(value),
            other => Err(ParseError::new(
                format!("Expected int literal, found {}", other),
                other.location(),
            )),
        }
    }

    fn expect_rparen(&mut self) -> Result<(), ParseError> {
        match self.advance() {
            Token::RParen(_) => Ok(()),
            other => Err(ParseError::new(
                format!("Expected ')', found {}", other),
                other.location(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(source: &str) -> Result<Vec<Command>, ParseError> {
        let mut parser = Parser::new(source);
        let mut commands = Vec::new();
        while let Some(command) = parser.next_command()? {
            commands.push(command);
        }
        Ok(commands)
    }

    #[test]
    fn test_allocation_statement() {
        let commands = parse_all("a = m(30);").unwrap();
        assert_eq!(commands.len(), 1);
        assert!(matches!(
            commands[0],
            Command::Alloc { ref var, size: 30, .. } if var == "a"
        ));
    }

    #[test]
    fn test_allocation_keyword_is_arbitrary() {
        // Any identifier works on the right-hand side of an allocation
        let commands = parse_all("a = malloc(8);").unwrap();
        assert!(matches!(commands[0], Command::Alloc { size: 8, .. }));
    }

    #[test]
    fn test_copy_statement() {
        let commands = parse_all("b = a;").unwrap();
        assert!(matches!(
            commands[0],
            Command::CopyVar { ref dst, ref src, .. } if dst == "b" && src == "a"
        ));
    }

    #[test]
    fn test_call_statements() {
        let commands = parse_all("free(a); dump(); compress();").unwrap();
        assert!(matches!(commands[0], Command::Release { ref var, .. } if var == "a"));
        assert!(matches!(commands[1], Command::Dump { .. }));
        assert!(matches!(commands[2], Command::Compress { .. }));
    }

    #[test]
    fn test_unknown_keywords_are_nops() {
        let commands = parse_all("release(a); flush(); print();").unwrap();
        assert_eq!(commands.len(), 3);
        assert!(commands.iter().all(|c| matches!(c, Command::Nop { .. })));
    }

    #[test]
    fn test_missing_semicolon_is_fatal() {
        let err = parse_all("dump() free(a);").unwrap_err();
        assert!(err.message.contains("';'"), "got: {}", err.message);
    }

    #[test]
    fn test_int_where_identifier_expected() {
        let err = parse_all("free(30);").unwrap_err();
        assert!(err.message.contains("identifier"), "got: {}", err.message);
    }

    #[test]
    fn test_stops_cleanly_at_end_of_input() {
        let mut parser = Parser::new("dump();");
        assert!(parser.next_command().unwrap().is_some());
        assert!(parser.next_command().unwrap().is_none());
        assert!(parser.next_command().unwrap().is_none());
    }

    #[test]
    fn test_unknown_character_mid_statement_is_a_syntax_error() {
        // '@' turns the rest of the stream into end-of-input; a statement
        // cut off this way fails to parse
        let err = parse_all("a = m(10); b = @ m(20);").unwrap_err();
        assert!(err.message.contains("end of input"), "got: {}", err.message);
    }

    #[test]
    fn test_unknown_character_between_statements_stops_silently() {
        let commands = parse_all("a = m(10); # dump();").unwrap();
        assert_eq!(commands.len(), 1);
    }

    #[test]
    fn test_error_carries_location() {
        let err = parse_all("dump();\nfree(;").unwrap_err();
        assert_eq!(err.location.line, 2);
    }
}
