//! # CloudPage script emitters
//!
//! Builders for the two embedded languages of a generated page (the
//! `%%[ ... ]%%` template language and `runat="server"` scripts) plus the
//! emitters built on them:
//!
//! - [`variable_block`]: declarations for every variable the body references
//! - [`prefill_block`]: query-string prefill for opted-in form fields
//! - [`emit_form_submission_script`]: capture and write of the page form
//! - [`emit_security_script`]: the authentication gate
//!
//! The emitters produce text only; nothing here runs the scripts.

pub mod ampscript;
pub mod form_submission;
pub mod names;
pub mod security;
pub mod ssjs;
pub mod variables;

pub use ampscript::{AmpBlock, AmpStatement};
pub use form_submission::{emit_form_submission_script, submission_fields, SubmissionField};
pub use security::{emit_security_script, SecurityScript};
pub use ssjs::ServerScript;
pub use variables::{prefill_block, variable_block};
