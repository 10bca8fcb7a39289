//! The SDDL front-end compiler pipeline: multi-file `require` resolution,
//! constant expression evaluation, message/typedef/RPC collection, and a
//! topologically ordered emission driver over a pluggable [`Target`].
//!
//! ```no_run
//! use sddl::Compiler;
//!
//! let compiler = Compiler::compile(&["schema.sddl"]).expect("compiles");
//! let mut sink = std::io::stdout();
//! // compiler.emit(&mut my_backend, &mut sink).unwrap();
//! ```

mod adapter;
mod collect;
mod compiler;
pub mod emit;
pub mod expr;
mod graph;
mod require;
mod source_map;
pub mod tables;
pub mod value;

pub use compiler::{CompileError, Compiler};
pub use emit::Target;
pub use sddl_ast::{Error, Errors, MessageKind, Reason, WithErrorInfo};
pub use source_map::SourceMap;
