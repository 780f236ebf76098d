//! Placeholder templating engine.
//!
//! This module handles:
//! - Pattern parsing into placeholder tokens and literal text
//! - Value substitution with first-match key lookup
//! - Operators over placeholder values and literal segments
//! - Interleaved rendering with reset-on-render working state

pub mod matcher;
pub mod parser;

pub use matcher::Matcher;
pub use parser::ParsedPattern;

use crate::error::{Result, StencilError};
use crate::template::parser::Piece;
use crate::wrap::{Delimiter, wrap};
use std::collections::HashMap;
use std::fmt;

/// Fallback invoked on the original braced token when a placeholder was
/// never substituted.
pub type Fallback = Box<dyn Fn(&str) -> String>;

/// State of one placeholder slot in the working copy.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Slot {
	/// Never substituted; renders through the fallback.
	Vacant,
	/// Holds a substituted value.
	Filled(String),
	/// Holds the output of a placeholder operator.
	Mapped(String),
}

/// A parsed pattern with a mutable working copy for one substitution cycle.
///
/// The parsed baseline never changes. Substitutions and operators mutate the
/// working copy in place; rendering reads it, then resets it to the baseline
/// so the template can be reused for an independent cycle.
///
/// Mutating calls return `&mut Self`, so a cycle chains:
///
/// ```
/// use stencil::Template;
///
/// let mut template = Template::parse("deploy {service} to {env}").unwrap();
/// let output = template
/// 	.substitute(&["service", "api", "env", "staging"]).unwrap()
/// 	.render().unwrap();
/// assert_eq!(output, "deploy api to staging");
/// ```
pub struct Template {
	pattern: String,
	placeholders: Vec<String>,
	literals: Vec<String>,
	starts_with_placeholder: bool,
	slots: Vec<Slot>,
	working_literals: Vec<String>,
	fallback: Option<Fallback>,
	matcher: Matcher,
}

impl Template {
	/// Parse a pattern. The derived matcher accepts any text in placeholder
	/// position.
	pub fn parse(pattern: &str) -> Result<Self> {
		Self::build(pattern, &HashMap::new())
	}

	/// Parse a pattern with per-key matcher sub-expressions.
	///
	/// Keys may be bare (`"id"`) or already braced (`"{id}"`). Placeholders
	/// absent from `expressions` match any text.
	pub fn parse_with_expressions(pattern: &str, expressions: &[(&str, &str)]) -> Result<Self> {
		let map: HashMap<String, String> = expressions
			.iter()
			.map(|(key, expr)| (wrap_key(key), expr.to_string()))
			.collect();
		Self::build(pattern, &map)
	}

	fn build(pattern: &str, expressions: &HashMap<String, String>) -> Result<Self> {
		let parsed = parser::parse(pattern)?;
		let matcher = Matcher::derive(&parsed, expressions)?;
		Ok(Template {
			pattern: pattern.to_string(),
			slots: vec![Slot::Vacant; parsed.placeholders.len()],
			working_literals: parsed.literals.clone(),
			placeholders: parsed.placeholders,
			literals: parsed.literals,
			starts_with_placeholder: parsed.starts_with_placeholder,
			fallback: None,
			matcher,
		})
	}

	/// Install the fallback invoked for placeholders never substituted.
	///
	/// Without one, rendering or placeholder-mapping a template with an
	/// unfilled placeholder fails with
	/// [`StencilError::MissingFallback`].
	pub fn with_fallback(mut self, fallback: impl Fn(&str) -> String + 'static) -> Self {
		self.fallback = Some(Box::new(fallback));
		self
	}

	/// Substitute values for keys, given as a flat `[key, value, ...]` list.
	///
	/// The list length must be even. Bare keys are brace-wrapped before
	/// lookup. Each key fills the **first** occurrence of its token in the
	/// pattern; filling later occurrences of a repeated token individually
	/// is not supported. Pairs are applied left to right, so an unknown key
	/// partway through leaves the earlier pairs applied.
	pub fn substitute<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<&mut Self> {
		if pairs.len() % 2 != 0 {
			return Err(StencilError::MalformedPairs { count: pairs.len() });
		}
		for pair in pairs.chunks(2) {
			let token = wrap_key(pair[0].as_ref());
			let index = self
				.placeholders
				.iter()
				.position(|placeholder| *placeholder == token)
				.ok_or(StencilError::UnknownKey { key: token })?;
			self.slots[index] = Slot::Filled(pair[1].as_ref().to_string());
		}
		Ok(self)
	}

	/// Substitute and render in one call.
	pub fn render_with<S: AsRef<str>>(&mut self, pairs: &[S]) -> Result<String> {
		self.substitute(pairs)?.render()
	}

	/// Apply `operator` to every literal segment of the working copy.
	pub fn map_literals(&mut self, operator: impl Fn(&str) -> String) -> &mut Self {
		for literal in &mut self.working_literals {
			*literal = operator(literal);
		}
		self
	}

	/// Apply `operator` to every literal segment, then render.
	pub fn render_map_literals(&mut self, operator: impl Fn(&str) -> String) -> Result<String> {
		self.map_literals(operator).render()
	}

	/// Apply `operator` to every placeholder slot of the working copy.
	///
	/// Vacant slots are resolved through the fallback first, so the operator
	/// sees the fallback's output rather than a raw token. Nothing is
	/// mutated if any slot fails to resolve.
	pub fn map_placeholders(&mut self, operator: impl Fn(&str) -> String) -> Result<&mut Self> {
		let mut mapped = Vec::with_capacity(self.slots.len());
		for (index, slot) in self.slots.iter().enumerate() {
			let current = match slot {
				Slot::Vacant => self.resolve_vacant(index, None)?,
				Slot::Filled(value) | Slot::Mapped(value) => value.clone(),
			};
			mapped.push(Slot::Mapped(operator(&current)));
		}
		self.slots = mapped;
		Ok(self)
	}

	/// Apply `operator` to every placeholder slot, then render.
	pub fn render_map_placeholders(
		&mut self,
		operator: impl Fn(&str) -> String,
	) -> Result<String> {
		self.map_placeholders(operator)?.render()
	}

	/// Render the working copy, then reset it to the parsed baseline.
	///
	/// Placeholders never substituted render through the fallback. On
	/// success the template is ready for a fresh, independent cycle; on
	/// failure the working copy is left as it was.
	pub fn render(&mut self) -> Result<String> {
		self.render_impl(None)
	}

	/// Render with a one-shot fallback used for this call only.
	///
	/// The installed fallback (if any) is untouched, even when rendering
	/// fails.
	pub fn render_with_fallback(&mut self, fallback: impl Fn(&str) -> String) -> Result<String> {
		self.render_impl(Some(&fallback))
	}

	/// Whole-string test against the derived matcher. Pure query; the
	/// working copy is not touched.
	pub fn matches(&self, candidate: &str) -> bool {
		self.matcher.matches(candidate)
	}

	/// The original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Placeholder tokens in order of appearance, braces included.
	pub fn placeholders(&self) -> &[String] {
		&self.placeholders
	}

	/// Literal segments in order of appearance.
	pub fn literals(&self) -> &[String] {
		&self.literals
	}

	/// The matcher derived from this pattern.
	pub fn matcher(&self) -> &Matcher {
		&self.matcher
	}

	fn render_impl(&mut self, one_shot: Option<&dyn Fn(&str) -> String>) -> Result<String> {
		let pieces = parser::interleave(
			self.starts_with_placeholder,
			self.placeholders.len(),
			self.literals.len(),
		);
		let mut output = String::with_capacity(self.pattern.len());
		for piece in pieces {
			match piece {
				Piece::Placeholder(index) => {
					let value = match &self.slots[index] {
						Slot::Vacant => self.resolve_vacant(index, one_shot)?,
						Slot::Filled(value) | Slot::Mapped(value) => value.clone(),
					};
					output.push_str(&value);
				}
				Piece::Literal(index) => output.push_str(&self.working_literals[index]),
			}
		}
		self.reset();
		Ok(output)
	}

	/// Resolve a vacant slot through the one-shot fallback if given, else
	/// the installed one.
	fn resolve_vacant(
		&self,
		index: usize,
		one_shot: Option<&dyn Fn(&str) -> String>,
	) -> Result<String> {
		let token = &self.placeholders[index];
		match one_shot.or(self.fallback.as_deref()) {
			Some(fallback) => Ok(fallback(token)),
			None => Err(StencilError::MissingFallback {
				token: token.clone(),
			}),
		}
	}

	/// Restore the working copy to the parsed baseline.
	fn reset(&mut self) {
		self.slots = vec![Slot::Vacant; self.placeholders.len()];
		self.working_literals = self.literals.clone();
	}
}

impl fmt::Debug for Template {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Template")
			.field("pattern", &self.pattern)
			.field("placeholders", &self.placeholders)
			.field("literals", &self.literals)
			.field("matcher", &self.matcher)
			.finish_non_exhaustive()
	}
}

/// Wrap a bare key in braces; an already-braced key passes through.
fn wrap_key(key: &str) -> String {
	if key.len() > 2 && key.starts_with('{') && key.ends_with('}') {
		key.to_string()
	} else {
		wrap(key, Delimiter::Curly)
	}
}
