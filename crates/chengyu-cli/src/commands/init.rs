//! The `chengyu init` command.

use anyhow::Result;

use chengyu_core::model::IdiomSeed;
use chengyu_source::dataset::BUILTIN_IDIOMS;

pub fn execute() -> Result<()> {
    // Create chengyu.toml
    if std::path::Path::new("chengyu.toml").exists() {
        println!("chengyu.toml already exists, skipping.");
    } else {
        std::fs::write("chengyu.toml", SAMPLE_CONFIG)?;
        println!("Created chengyu.toml");
    }

    // Create a starter dataset
    std::fs::create_dir_all("data")?;
    let dataset_path = std::path::Path::new("data/idiom.json");
    if dataset_path.exists() {
        println!("data/idiom.json already exists, skipping.");
    } else {
        let records: Vec<_> = BUILTIN_IDIOMS.iter().map(IdiomSeed::to_record).collect();
        std::fs::write(dataset_path, serde_json::to_string_pretty(&records)?)?;
        println!("Created data/idiom.json");
    }

    println!("\nNext steps:");
    println!("  1. Add idioms to data/idiom.json (or point [source] at an idiom endpoint)");
    println!("  2. Run: chengyu sample --count 5");
    println!("  3. Run: chengyu drill --quiz");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# chengyu configuration

# Prompt variant for quiz mode: "meaning", "example", or "mixed"
default_variant = "meaning"
# Start in quiz mode instead of study mode
start_in_quiz = false
# Keep the mixed-mode clue fixed for each question
stable_mixed_prompt = false

[source]
type = "dataset"
path = "data/idiom.json"

# Remote endpoint alternative:
# [source]
# type = "http"
# base_url = "${CHENGYU_BASE_URL}"
# timeout_secs = 10
"#;
