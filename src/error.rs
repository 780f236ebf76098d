/// Library-level structured errors for stencil.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// Every failure is fatal to the triggering call; nothing is retried
/// internally.
#[derive(Debug, thiserror::Error)]
pub enum StencilError {
	#[error("Invalid pattern at byte {offset}: {pattern}")]
	InvalidPattern { pattern: String, offset: usize },

	#[error("Substitutions must come in key/value pairs (got {count} entries)")]
	MalformedPairs { count: usize },

	#[error("Unknown key: {key}")]
	UnknownKey { key: String },

	#[error("No fallback defined for unfilled placeholder: {token}")]
	MissingFallback { token: String },

	#[error("Derived match expression failed to compile: {expression}")]
	InvalidExpression {
		expression: String,
		#[source]
		source: regex::Error,
	},
}

/// Result type alias using StencilError.
pub type Result<T> = std::result::Result<T, StencilError>;
