//! Pattern tokenization.
//!
//! Splits a pattern string into brace-wrapped placeholder tokens and the
//! literal text around them. Braces that do not form a well-formed,
//! non-empty placeholder are rejected here rather than carried through to
//! rendering.

use crate::error::{Result, StencilError};

/// A pattern split into its placeholder tokens and literal segments.
///
/// The two sequences alternate strictly: a placeholder is never adjacent to
/// another placeholder, so `literals.len()` is within one of
/// `placeholders.len()`.
#[derive(Debug, Clone)]
pub struct ParsedPattern {
	/// Placeholder tokens, braces included, in order of appearance.
	/// A repeated token is kept as a separate entry per occurrence.
	pub placeholders: Vec<String>,

	/// Literal text segments between and around placeholders, in order.
	pub literals: Vec<String>,

	/// True when the pattern begins with a placeholder.
	pub starts_with_placeholder: bool,
}

/// One step of the interleaved emission order shared by rendering and
/// matcher derivation. Indexes into `placeholders` / `literals`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Piece {
	Placeholder(usize),
	Literal(usize),
}

impl ParsedPattern {
	/// Emission order of this pattern's segments.
	pub(crate) fn pieces(&self) -> Vec<Piece> {
		interleave(
			self.starts_with_placeholder,
			self.placeholders.len(),
			self.literals.len(),
		)
	}
}

/// Compute the interleaved emission order for a pattern with the given
/// segment counts.
pub(crate) fn interleave(
	starts_with_placeholder: bool,
	placeholders: usize,
	literals: usize,
) -> Vec<Piece> {
	let mut pieces = Vec::with_capacity(placeholders + literals);
	if starts_with_placeholder {
		for index in 0..placeholders {
			pieces.push(Piece::Placeholder(index));
			if index < literals {
				pieces.push(Piece::Literal(index));
			}
		}
	} else {
		for index in 0..literals {
			pieces.push(Piece::Literal(index));
			if index < placeholders {
				pieces.push(Piece::Placeholder(index));
			}
		}
	}
	pieces
}

/// Split a pattern into placeholder tokens and literal segments.
///
/// A placeholder is `{`, one or more non-brace characters, then `}`. A
/// literal is a maximal run of non-brace characters. Anything else involving
/// a brace is malformed: empty placeholders, nested or unbalanced braces,
/// and two placeholders with no literal between them all fail with
/// [`StencilError::InvalidPattern`] naming the byte offset of the offending
/// character.
pub fn parse(pattern: &str) -> Result<ParsedPattern> {
	let mut placeholders = Vec::new();
	let mut literals = Vec::new();
	let starts_with_placeholder = pattern.starts_with('{');

	// Braces are ASCII, so byte scanning never splits a UTF-8 sequence.
	let bytes = pattern.as_bytes();
	let mut i = 0;
	let mut last_was_placeholder = false;
	while i < bytes.len() {
		match bytes[i] {
			b'{' => {
				if last_was_placeholder {
					return Err(malformed(pattern, i));
				}
				let start = i;
				i += 1;
				while i < bytes.len() && bytes[i] != b'}' && bytes[i] != b'{' {
					i += 1;
				}
				if i >= bytes.len() {
					// unclosed brace
					return Err(malformed(pattern, start));
				}
				if bytes[i] == b'{' {
					// nested opening brace
					return Err(malformed(pattern, i));
				}
				if i == start + 1 {
					// "{}" names no key
					return Err(malformed(pattern, start));
				}
				i += 1;
				placeholders.push(pattern[start..i].to_string());
				last_was_placeholder = true;
			}
			b'}' => return Err(malformed(pattern, i)),
			_ => {
				let start = i;
				while i < bytes.len() && bytes[i] != b'{' && bytes[i] != b'}' {
					i += 1;
				}
				literals.push(pattern[start..i].to_string());
				last_was_placeholder = false;
			}
		}
	}

	Ok(ParsedPattern {
		placeholders,
		literals,
		starts_with_placeholder,
	})
}

fn malformed(pattern: &str, offset: usize) -> StencilError {
	StencilError::InvalidPattern {
		pattern: pattern.to_string(),
		offset,
	}
}
