//! # apidesign: evaluation core of declarative API designs
//!
//! DSL code describes an API as a graph of nodes: top level metadata, data
//! types, services, methods and their HTTP and gRPC bindings. Before the
//! graph can feed code generators it has to be evaluated in an order where
//! every node is visited after everything it references, and then checked
//! for global consistency.
//!
//! ## Components
//!
//! - [`meta`]: ordered key/multi-value annotations attached to nodes.
//! - [`expr`]: the design nodes and the [`Expression`] sum type handed to
//!   evaluators.
//! - [`root`]: the [`RootExpr`] registry owning all top level collections
//!   and answering lookups.
//! - [`walker`]: the staged walk producing one [`ExpressionSet`] per stage.
//! - [`validation`]: aggregated validation failures.
//! - [`eval`]: the [`Root`] capability and a driver running several roots
//!   in dependency order.
//! - [`config`]: evaluation settings.
//!
//! ## Evaluation flow
//!
//! ```text
//! DSL execution → RootExpr → walk_sets (10 stages) → validate
//! ```
//!
//! ```
//! use apidesign::{RootExpr, ServiceExpr};
//!
//! let mut root = RootExpr::new();
//! let mut calc = ServiceExpr::new("calc");
//! calc.add_method("add");
//! root.services.push(calc);
//!
//! let mut methods = Vec::new();
//! root.walk_sets(&mut |set| {
//!     if set.stage == apidesign::Stage::Methods {
//!         methods.extend(set.names().into_iter().map(String::from));
//!     }
//!     Ok(())
//! })?;
//! assert_eq!(methods, vec!["add"]);
//! assert!(root.validate().is_empty());
//! # Ok::<(), apidesign::EvalError>(())
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod meta;
pub mod root;
pub mod validation;
pub mod walker;

// Re-exports
pub use config::{EvalConfig, TransportOrdering};
pub use error::*;
pub use eval::{EvalError, EvalResult, Root};
pub use expr::*;
pub use meta::MetaExpr;
pub use root::RootExpr;
pub use validation::{ValidationError, ValidationErrors};
pub use walker::{ExpressionSet, SetWalker, Stage, StagedWalker};
