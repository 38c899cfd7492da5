use std::fmt::Display;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::*;

use crate::diagnostic::Diagnostic;
use crate::Error::GeneralError;

pub type Result<E> = std::result::Result<E, Error>;

#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Invalid declaration `{}`: {}", .0, .1)]
    Syntax(String, syn::Error),
    #[error("{} declaration(s) rejected", .0.len())]
    Rejected(Vec<Rejection>),
    #[error("Invalid schema: {}", .0)]
    Schema(String),
    #[error("Generated file {} is out of date", .0.display())]
    Stale(PathBuf),
    #[error("Unable to format generated code: {}", .0)]
    Format(String),
    #[error("{}: {}", .0, .1)]
    GeneralError(String, Arc<dyn std::error::Error + Send + Sync + 'static>),
}

/// The diagnostics produced for one declaration.
#[derive(Debug, Clone)]
pub struct Rejection {
    pub declaration: String,
    pub diagnostics: Vec<Diagnostic>,
}

impl Error {
    pub fn rejected(declaration: impl Into<String>, diagnostics: Vec<Diagnostic>) -> Self {
        Error::Rejected(vec![Rejection {
            declaration: declaration.into(),
            diagnostics,
        }])
    }
}

pub trait Context<T, E> {
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> Context<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneralError(context.to_string(), Arc::new(e)))
    }

    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| GeneralError(context().to_string(), Arc::new(e)))
    }
}
