// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tabula

use std::{iter::Peekable, str::CharIndices};

use tabula_type::ConditionViolation;

macro_rules! operator {
    (
        $( $value:ident => $tag:literal ),*
    ) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum Operator {  $( $value ),* }

        impl Operator {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( Operator::$value => $tag ),*
                }
            }
        }
    };
}

operator! {
    Equal           => "=",
    NotEqual        => "<>",
    LeftAngle       => "<",
    LeftAngleEqual  => "<=",
    RightAngle      => ">",
    RightAngleEqual => ">=",
    OpenParen       => "(",
    CloseParen      => ")",
    Comma           => ","
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
	/// A bare attribute name, keyword or function name.
	Identifier(String),
	/// `#name`
	Name(String),
	/// `:value`
	Value(String),
	Operator(Operator),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
	pub kind: TokenKind,
	/// Byte offset into the expression.
	pub position: usize,
}

impl Token {
	pub fn is_keyword(&self, keyword: &str) -> bool {
		matches!(&self.kind, TokenKind::Identifier(word) if word.eq_ignore_ascii_case(keyword))
	}

	pub fn is_operator(&self, operator: Operator) -> bool {
		self.kind == TokenKind::Operator(operator)
	}
}

fn is_identifier_char(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || ch == '_'
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, ConditionViolation> {
	let mut chars = input.char_indices().peekable();
	let mut tokens = Vec::new();

	while let Some(&(position, ch)) = chars.peek() {
		if ch.is_whitespace() {
			chars.next();
			continue;
		}

		let kind = match ch {
			'#' | ':' => {
				chars.next();
				let word = scan_word(&mut chars);
				if word.is_empty() {
					return Err(syntax(position, format!("expected a placeholder name after '{ch}'")));
				}
				let placeholder = format!("{ch}{word}");
				if ch == '#' {
					TokenKind::Name(placeholder)
				} else {
					TokenKind::Value(placeholder)
				}
			}
			'<' | '>' => {
				chars.next();
				let operator = match (ch, chars.peek().map(|&(_, next)| next)) {
					('<', Some('=')) => Some(Operator::LeftAngleEqual),
					('<', Some('>')) => Some(Operator::NotEqual),
					('>', Some('=')) => Some(Operator::RightAngleEqual),
					_ => None,
				};
				match operator {
					Some(operator) => {
						chars.next();
						TokenKind::Operator(operator)
					}
					None if ch == '<' => TokenKind::Operator(Operator::LeftAngle),
					None => TokenKind::Operator(Operator::RightAngle),
				}
			}
			'=' => single(&mut chars, Operator::Equal),
			'(' => single(&mut chars, Operator::OpenParen),
			')' => single(&mut chars, Operator::CloseParen),
			',' => single(&mut chars, Operator::Comma),
			ch if is_identifier_char(ch) => TokenKind::Identifier(scan_word(&mut chars)),
			ch => return Err(syntax(position, format!("unexpected character '{ch}'"))),
		};

		tokens.push(Token {
			kind,
			position,
		});
	}

	Ok(tokens)
}

fn single(chars: &mut Peekable<CharIndices<'_>>, operator: Operator) -> TokenKind {
	chars.next();
	TokenKind::Operator(operator)
}

fn scan_word(chars: &mut Peekable<CharIndices<'_>>) -> String {
	let mut word = String::new();
	while let Some(&(_, ch)) = chars.peek() {
		if !is_identifier_char(ch) {
			break;
		}
		word.push(ch);
		chars.next();
	}
	word
}

pub(crate) fn syntax(position: usize, message: impl Into<String>) -> ConditionViolation {
	ConditionViolation::Syntax {
		position,
		message: message.into(),
	}
}
