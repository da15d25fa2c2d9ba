use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum InquestError {
    #[error("No supported source files found in {path}")]
    #[diagnostic(code(inquest::no_files))]
    NoFiles { path: PathBuf },

    #[error("Not a local directory or git URL: {input}")]
    #[diagnostic(code(inquest::invalid_source))]
    InvalidSource { input: String },

    #[error("Parse error in {file}: {message}")]
    #[diagnostic(code(inquest::parse_error))]
    Parse { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(inquest::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(inquest::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(inquest::git))]
    Git(#[from] git2::Error),

    #[error(transparent)]
    #[diagnostic(code(inquest::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(inquest::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, InquestError>;
