//! CLI command handlers.

use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::translate::Translator;

use super::{TranslateArgs, TranslateArrayArgs};

fn translator() -> Result<Translator> {
    Translator::from_config(&TranslatorConfig::load()?)
}

/// Handle `mstranslate token`.
pub async fn handle_token() -> Result<()> {
    let translator = translator()?;
    translator.token().ensure_fresh().await?;
    match translator.token().expires_in() {
        Some(remaining) => println!("token valid for {}s", remaining.as_secs()),
        None => println!("token already expired"),
    }
    Ok(())
}

/// Handle `mstranslate translate`.
pub async fn handle_translate(args: TranslateArgs) -> Result<()> {
    let text = translator()?
        .translate(&args.text, &args.from, &args.to)
        .await?;
    println!("{text}");
    Ok(())
}

/// Handle `mstranslate translate-array`.
pub async fn handle_translate_array(args: TranslateArrayArgs) -> Result<()> {
    let results = translator()?
        .translate_array(&args.texts, &args.from, &args.to)
        .await?;
    for line in results {
        println!("{line}");
    }
    Ok(())
}
