//! Ask command

use crate::app::{AskArgs, OutputFormat};
use crate::output::format_answer;
use anyhow::Result;
use lexrag_core::{Answer, Config, Database, RagEngine, NO_CONTEXT_ANSWER};

pub async fn run(args: AskArgs, db: &Database, format: OutputFormat) -> Result<()> {
    let question = args.question.join(" ");

    // An empty store answers without calling out to any service
    if !db.has_embeddings() {
        let answer = Answer {
            text: NO_CONTEXT_ANSWER.to_string(),
            citations: Vec::new(),
        };
        print!("{}", format_answer(&answer, format));
        return Ok(());
    }

    let config = Config::load()?;
    let engine = RagEngine::from_config(&config)?;

    let answer = engine.answer(db, &question).await?;
    print!("{}", format_answer(&answer, format));
    Ok(())
}
