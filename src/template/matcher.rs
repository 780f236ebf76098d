//! Derived whole-string matching.
//!
//! A matcher is built once per template: the pattern is walked in emission
//! order with each placeholder replaced by a regex sub-expression and each
//! literal segment escaped, then the whole expression is compiled anchored
//! so matching always covers the entire candidate string.

use crate::error::{Result, StencilError};
use crate::template::parser::{ParsedPattern, Piece};
use regex::Regex;
use std::collections::HashMap;

/// Sub-expression used for placeholders with no mapped expression.
const WILDCARD: &str = ".*";

/// A compiled whole-string matcher for a template's pattern.
#[derive(Debug)]
pub struct Matcher {
	regex: Regex,
}

impl Matcher {
	/// Derive and compile the matcher for a parsed pattern.
	///
	/// `expressions` maps braced placeholder tokens to regex sub-expressions;
	/// unmapped placeholders match any text. Each sub-expression is wrapped
	/// in a non-capturing group so alternations stay contained, and literal
	/// segments are escaped so they only match themselves.
	pub(crate) fn derive(
		parsed: &ParsedPattern,
		expressions: &HashMap<String, String>,
	) -> Result<Matcher> {
		let mut body = String::new();
		for piece in parsed.pieces() {
			match piece {
				Piece::Placeholder(index) => {
					let token = &parsed.placeholders[index];
					let expr = expressions
						.get(token)
						.map(String::as_str)
						.unwrap_or(WILDCARD);
					body.push_str("(?:");
					body.push_str(expr);
					body.push(')');
				}
				Piece::Literal(index) => {
					body.push_str(&regex::escape(&parsed.literals[index]));
				}
			}
		}

		let expression = format!("^(?:{body})$");
		let regex = Regex::new(&expression)
			.map_err(|source| StencilError::InvalidExpression { expression, source })?;
		Ok(Matcher { regex })
	}

	/// True when the entire candidate conforms to the pattern.
	pub fn matches(&self, candidate: &str) -> bool {
		self.regex.is_match(candidate)
	}

	/// The derived regular expression, mostly useful for diagnostics.
	pub fn as_str(&self) -> &str {
		self.regex.as_str()
	}
}
