//! Stencil - brace-delimited placeholder templating.
//!
//! This library provides a small pattern/substitution engine:
//! - Pattern parsing into `{key}` placeholder tokens and literal text
//! - Chainable value substitution and render-with-reset cycles
//! - Operators applied across placeholder values or literal segments
//! - A derived whole-string matcher for text the pattern could produce
//!
//! # Example
//!
//! ```
//! use stencil::Template;
//!
//! let mut template = Template::parse_with_expressions(
//! 	"order {id} shipped",
//! 	&[("id", "[0-9]+")],
//! ).unwrap();
//!
//! let output = template.render_with(&["id", "1042"]).unwrap();
//! assert_eq!(output, "order 1042 shipped");
//! assert!(template.matches("order 7 shipped"));
//! assert!(!template.matches("order seven shipped"));
//! ```

pub mod error;
pub mod template;
pub mod wrap;

pub use error::{Result, StencilError};
pub use template::{Fallback, Matcher, ParsedPattern, Template};
pub use wrap::{Delimiter, wrap, wrap_with};
