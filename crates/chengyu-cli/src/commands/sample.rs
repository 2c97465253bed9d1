//! The `chengyu sample` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use chengyu_core::model::DisplayIdiom;
use chengyu_core::traits::IdiomSource;
use chengyu_source::config::{create_source, load_config_from};

pub async fn execute(count: usize, config_path: Option<PathBuf>) -> Result<()> {
    anyhow::ensure!(count >= 1, "count must be at least 1");

    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config.source)?;

    let records = source
        .fetch_idioms(count)
        .await
        .with_context(|| format!("failed to fetch idioms from {} source", source.name()))?;

    let mut table = Table::new();
    table.set_header(vec!["成语", "拼音", "难度", "释义"]);

    for record in records {
        let idiom = DisplayIdiom::from_record(record);
        table.add_row(vec![
            Cell::new(idiom.word()),
            Cell::new(idiom.pinyin()),
            Cell::new(idiom.difficulty().label()),
            Cell::new(idiom.meaning()),
        ]);
    }

    println!("{table}");
    Ok(())
}
