//! The `chengyu classify` command.

use anyhow::Result;

use chengyu_core::classify_difficulty;

pub fn execute(word: String, explanation: String) -> Result<()> {
    let tier = classify_difficulty(word.trim(), explanation.trim());
    println!("{} ({tier})", tier.label());
    Ok(())
}
