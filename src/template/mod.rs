//! Format strings for title and task lines.
//!
//! A template is compiled once with [`compile`] and rendered per record with
//! [`evaluate`] or [`evaluate_line`].

pub mod compile;
pub mod eval;
pub mod vars;

pub use compile::{Attr, Field, FieldKind, MAX_FIELD_WIDTH, Template, compile};
pub use eval::{RenderContext, evaluate, evaluate_line};
pub use vars::{VarKind, VarValue, VariableTable};
