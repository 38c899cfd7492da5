//! The identifier expansion pipeline: `parse` the request, `analyze` it into
//! a validated model (or diagnostics), `lower` it into a generation plan and
//! render the plan with `codegen`.

pub mod analyze;
pub mod codegen;
pub mod lower;
pub mod parse;
