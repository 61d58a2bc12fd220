//! # CloudPage model
//!
//! Read-only snapshot types for a CloudPage: the flat component list with its
//! typed props, the page theme and metadata, and the optional brand.
//!
//! ```rust,ignore
//! use cloudpage_model::{CloudPage, ComponentTree};
//!
//! let page = CloudPage::from_json(&json)?;
//! let tree = ComponentTree::new(&page.components);
//! for root in tree.roots() {
//!     println!("{} ({})", root.id, root.component_type());
//! }
//! ```

pub mod brand;
pub mod component;
pub mod error;
pub mod form;
pub mod ident;
pub mod page;
pub mod props;
pub mod style;
pub mod tree;

pub use brand::Brand;
pub use component::{ComponentProps, ComponentType, PageComponent};
pub use error::{ModelError, ModelResult};
pub use form::{CapturedField, FieldKind, FormSchema, StandardField};
pub use page::{
    BannerPosition, CloudPage, CookieBanner, DataExtensionTarget, PageMeta, PageStyles,
    PasswordSecurity, SecurityConfig, SsoSecurity, TrackerConfig, TrackingConfig,
};
pub use style::{format_number, Gradient, GradientKind, StyleMap, StyleValue};
pub use tree::{ComponentTree, Slot};
