//! CLI entry point for mstranslate.

pub mod commands;

use clap::{Parser, Subcommand};

/// Microsoft Translator CLI
#[derive(Parser, Debug)]
#[command(name = "mstranslate", version, about = "Translate text with Microsoft Translator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Acquire a token and report how long it stays valid
    Token,
    /// Translate one string
    Translate(TranslateArgs),
    /// Translate several strings in one request, one result per line
    TranslateArray(TranslateArrayArgs),
}

/// Arguments for `mstranslate translate`.
#[derive(Parser, Debug)]
pub struct TranslateArgs {
    /// Source language code; omit to let the service detect it
    #[arg(short, long, default_value = "")]
    pub from: String,

    /// Target language code
    #[arg(short, long)]
    pub to: String,

    /// Text to translate
    pub text: String,
}

/// Arguments for `mstranslate translate-array`.
#[derive(Parser, Debug)]
pub struct TranslateArrayArgs {
    /// Source language code; omit to let the service detect it
    #[arg(short, long, default_value = "")]
    pub from: String,

    /// Target language code
    #[arg(short, long)]
    pub to: String,

    /// Texts to translate, in order
    #[arg(required = true)]
    pub texts: Vec<String>,
}
