//! Recursive-descent parser for the intent DSL.
//!
//! Grammar:
//!
//! ```text
//! program          := intent_decl*
//! intent_decl      := "intent" IDENTIFIER ("priority" NUMBER)? "{" field+ "}"
//! field            := patterns_field | response_field | next_state_field
//! patterns_field   := "patterns" ":" "[" pattern_item ("," pattern_item)* "]" ";"
//! pattern_item     := STRING | REGEX
//! response_field   := "response" ":" (STRING | CODEBLOCK) ";"
//! next_state_field := "next_state" ":" STRING ";"
//! ```
//!
//! The parser runs a single forward pass with one token of lookahead; the
//! grammar needs no backtracking.  Field order within a block is free, but a
//! field may appear at most once.  Regexes are compiled here so that a bad
//! expression fails the parse rather than a later match.

use std::collections::HashMap;

use regex::RegexBuilder;

use crate::ast::{IntentDefinition, Pattern, ResponseBody};
use crate::error::{ParseError, Result};
use crate::lexer::tokenize;
use crate::token::{Position, Token, TokenKind};

/// Parse DSL source text into intent definitions, in declaration order.
///
/// This is the whole frontend: lexing and parsing in one call.  Any lex or
/// parse failure aborts the build; no partial program is returned.
pub fn parse(source: &str) -> Result<Vec<IntentDefinition>> {
    let tokens = tokenize(source)?;
    let definitions = Parser::new(tokens).program()?;
    tracing::debug!(intents = definitions.len(), "script parsed");
    Ok(definitions)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    fn program(mut self) -> Result<Vec<IntentDefinition>> {
        let mut definitions: Vec<IntentDefinition> = Vec::new();
        let mut seen: HashMap<String, Position> = HashMap::new();

        while self.peek().kind != TokenKind::Eof {
            let def = self.intent_decl()?;

            if let Some(&first) = seen.get(&def.name) {
                return Err(ParseError::DuplicateIntentName {
                    name: def.name,
                    first,
                    second: def.position,
                });
            }
            seen.insert(def.name.clone(), def.position);
            definitions.push(def);
        }

        Ok(definitions)
    }

    fn intent_decl(&mut self) -> Result<IntentDefinition> {
        let position = self.expect(&TokenKind::Intent, "`intent`")?.position;
        let name = self.identifier()?;

        let priority = if self.peek().kind == TokenKind::Priority {
            self.advance();
            self.number()?
        } else {
            0
        };

        self.expect(&TokenKind::LBrace, "`{`")?;

        let mut patterns: Option<Vec<Pattern>> = None;
        let mut response: Option<ResponseBody> = None;
        let mut next_state: Option<String> = None;

        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::RBrace => {
                    self.advance();
                    break;
                }
                TokenKind::Patterns => {
                    if patterns.is_some() {
                        return Err(ParseError::DuplicateField {
                            intent: name,
                            field: "patterns",
                            position: token.position,
                        });
                    }
                    patterns = Some(self.patterns_field(&name)?);
                }
                TokenKind::Response => {
                    if response.is_some() {
                        return Err(ParseError::DuplicateField {
                            intent: name,
                            field: "response",
                            position: token.position,
                        });
                    }
                    response = Some(self.response_field()?);
                }
                TokenKind::NextState => {
                    if next_state.is_some() {
                        return Err(ParseError::DuplicateField {
                            intent: name,
                            field: "next_state",
                            position: token.position,
                        });
                    }
                    next_state = Some(self.next_state_field()?);
                }
                other => {
                    return Err(self.unexpected(
                        "a field (`patterns`, `response`, `next_state`) or `}`",
                        &other,
                        token.position,
                    ));
                }
            }
        }

        let patterns = patterns.ok_or(ParseError::MissingField {
            intent: name.clone(),
            field: "patterns",
            position,
        })?;
        let response = response.ok_or(ParseError::MissingField {
            intent: name.clone(),
            field: "response",
            position,
        })?;

        Ok(IntentDefinition {
            name,
            priority,
            patterns,
            response,
            next_state,
            position,
        })
    }

    fn patterns_field(&mut self, intent: &str) -> Result<Vec<Pattern>> {
        self.advance(); // `patterns`
        self.expect(&TokenKind::Colon, "`:`")?;
        let open = self.expect(&TokenKind::LBracket, "`[`")?.position;

        if self.peek().kind == TokenKind::RBracket {
            return Err(ParseError::EmptyPatternList {
                intent: intent.to_owned(),
                position: open,
            });
        }

        let mut patterns = vec![self.pattern_item()?];
        while self.peek().kind == TokenKind::Comma {
            self.advance();
            patterns.push(self.pattern_item()?);
        }

        self.expect(&TokenKind::RBracket, "`]`")?;
        self.expect(&TokenKind::Semicolon, "`;`")?;
        Ok(patterns)
    }

    fn pattern_item(&mut self) -> Result<Pattern> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Str(text) => {
                self.advance();
                Ok(Pattern::literal(text))
            }
            TokenKind::Regex { source, flags } => {
                self.advance();
                let compiled = RegexBuilder::new(&source)
                    .case_insensitive(flags.contains('i'))
                    .build()
                    .map_err(|e| ParseError::BadRegex {
                        pattern: source.clone(),
                        position: token.position,
                        reason: e.to_string(),
                    })?;
                Ok(Pattern::Regex {
                    source,
                    flags,
                    compiled,
                })
            }
            other => Err(self.unexpected("a string or regex pattern", &other, token.position)),
        }
    }

    fn response_field(&mut self) -> Result<ResponseBody> {
        self.advance(); // `response`
        self.expect(&TokenKind::Colon, "`:`")?;

        let token = self.peek().clone();
        let body = match token.kind {
            TokenKind::Str(text) => {
                self.advance();
                ResponseBody::Text(text)
            }
            TokenKind::CodeBlock(raw) => {
                self.advance();
                ResponseBody::CodeBlock(raw)
            }
            other => {
                return Err(self.unexpected("a string or code block", &other, token.position));
            }
        };

        self.expect(&TokenKind::Semicolon, "`;`")?;
        Ok(body)
    }

    fn next_state_field(&mut self) -> Result<String> {
        self.advance(); // `next_state`
        self.expect(&TokenKind::Colon, "`:`")?;

        let token = self.peek().clone();
        let state = match token.kind {
            TokenKind::Str(text) => {
                self.advance();
                text
            }
            other => return Err(self.unexpected("a state name string", &other, token.position)),
        };

        self.expect(&TokenKind::Semicolon, "`;`")?;
        Ok(state)
    }

    // -- Token helpers --------------------------------------------------------

    fn identifier(&mut self) -> Result<String> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(name)
            }
            other => Err(self.unexpected("an intent name", &other, token.position)),
        }
    }

    fn number(&mut self) -> Result<u32> {
        let token = self.peek().clone();
        match token.kind {
            TokenKind::Number(n) => {
                self.advance();
                Ok(n)
            }
            other => Err(self.unexpected("a priority number", &other, token.position)),
        }
    }

    fn expect(&mut self, kind: &TokenKind, description: &str) -> Result<Token> {
        let token = self.peek().clone();
        if &token.kind == kind {
            self.advance();
            Ok(token)
        } else {
            Err(self.unexpected(description, &token.kind, token.position))
        }
    }

    fn unexpected(&self, expected: &str, found: &TokenKind, position: Position) -> ParseError {
        ParseError::UnexpectedToken {
            expected: expected.to_owned(),
            found: found.to_string(),
            position,
        }
    }

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof, so `pos` never
        // runs past the end: every consumer stops at Eof.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
