//! Static checks over a page snapshot.
//!
//! The generator never fails: it drops column widths that do not add up,
//! renders only the first form, skips orphaned components and so on. The
//! linter reports those silent degradations before a page is published.

mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{Diagnostic, DiagnosticLevel};
pub use linter::{lint_page, LintOptions};
pub use rules::{LintRule, RuleRegistry};
