//! The `chengyu drill` command.
//!
//! A line-oriented driver for the quiz engine. Lines starting with `:` are
//! commands; anything else is an answer while in quiz mode.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use chengyu_core::engine::{AdvanceOutcome, QuizEngine};
use chengyu_core::model::{DisplayIdiom, DisplayMode, QuizVariant};
use chengyu_source::config::{create_source, load_config_from};

const HELP: &str = "\
命令 (commands):
  :study            学习模式 (show the answer)
  :quiz             测试模式 (hide the answer, type a guess)
  :variant <v>      meaning | example | mixed
  :next             下一题 (after answering)
  :skip             换一个成语
  :reset            重置游戏 (zero the score)
  :score            show the score
  :help             show this help
  :quit             exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Input {
    Study,
    Quiz,
    Variant(Result<QuizVariant, String>),
    Next,
    Skip,
    Reset,
    Score,
    Help,
    Quit,
    Answer(String),
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return Input::Answer(line.to_string());
    };

    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or_default() {
        "study" | "s" => Input::Study,
        "quiz" | "q" => Input::Quiz,
        "variant" | "v" => Input::Variant(
            parts
                .next()
                .ok_or_else(|| "usage: :variant meaning|example|mixed".to_string())
                .and_then(str::parse),
        ),
        "next" | "n" => Input::Next,
        "skip" => Input::Skip,
        "reset" => Input::Reset,
        "score" => Input::Score,
        "help" | "h" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => Input::Unknown(other.to_string()),
    }
}

pub async fn execute(
    quiz: bool,
    variant: Option<QuizVariant>,
    config_path: Option<PathBuf>,
    json_summary: bool,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let source = create_source(&config.source)?;

    let mut engine_config = config.engine_config();
    if quiz {
        engine_config.display_mode = DisplayMode::Quiz;
    }
    if let Some(v) = variant {
        engine_config.quiz_variant = v;
    }

    let mut engine = QuizEngine::new(Arc::from(source), engine_config);
    tracing::info!(source = engine.source_name(), "starting drill");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(&mut engine, stdin.lock(), stdout.lock()).await?;

    let report = engine.report();
    if json_summary {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.summary_line());
    }
    Ok(())
}

/// Drive `engine` from `input` until EOF or `:quit`, rendering to `output`.
pub async fn run_session<R: BufRead, W: Write>(
    engine: &mut QuizEngine,
    input: R,
    mut output: W,
) -> Result<()> {
    writeln!(output, "成语100分 (输入 :help 查看命令)")?;
    advance(engine, &mut output).await?;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_input(&line) {
            Input::Study => {
                engine.set_mode(DisplayMode::Study);
                render(engine, &mut output)?;
            }
            Input::Quiz => {
                engine.set_mode(DisplayMode::Quiz);
                render(engine, &mut output)?;
            }
            Input::Variant(Ok(v)) => {
                engine.set_quiz_variant(v);
                writeln!(output, "题型: {v}")?;
                if engine.state().display_mode() == DisplayMode::Quiz
                    && !engine.state().answer_revealed()
                {
                    render(engine, &mut output)?;
                }
            }
            Input::Variant(Err(e)) => writeln!(output, "{e}")?,
            Input::Next => {
                if engine.next_question().await == AdvanceOutcome::Ignored {
                    writeln!(output, "请先提交答案 (answer first, or :skip)")?;
                } else {
                    render(engine, &mut output)?;
                }
            }
            Input::Skip => advance(engine, &mut output).await?,
            Input::Reset => {
                engine.reset().await;
                writeln!(output, "已重置 (score reset)")?;
                render(engine, &mut output)?;
            }
            Input::Score => write_score(engine, &mut output)?,
            Input::Help => writeln!(output, "{HELP}")?,
            Input::Quit => break,
            Input::Unknown(cmd) => writeln!(output, "未知命令: :{cmd} (try :help)")?,
            Input::Answer(text) => submit(engine, &text, &mut output)?,
        }
    }

    Ok(())
}

async fn advance<W: Write>(engine: &mut QuizEngine, output: &mut W) -> Result<()> {
    engine.advance().await;
    render(engine, output)
}

fn submit<W: Write>(engine: &mut QuizEngine, text: &str, output: &mut W) -> Result<()> {
    let state = engine.state();
    if state.display_mode() == DisplayMode::Study {
        writeln!(output, "学习模式下不计分，输入 :quiz 开始测试")?;
        return Ok(());
    }
    if state.answer_revealed() {
        writeln!(output, "已作答，输入 :next 进入下一题")?;
        return Ok(());
    }

    let Some(outcome) = engine.submit_answer(text) else {
        return Ok(());
    };

    if outcome.correct {
        writeln!(output, "✅ 回答正确！")?;
    } else {
        writeln!(output, "❌ 回答错误")?;
    }
    if let Some(idiom) = engine.current() {
        writeln!(output, "正确答案：{} ({})", outcome.expected, idiom.pinyin())?;
        write_details(idiom, output)?;
    }
    write_score(engine, output)
}

fn render<W: Write>(engine: &QuizEngine, output: &mut W) -> Result<()> {
    if let Some(notice) = engine.notice() {
        writeln!(output, "⚠ {notice}")?;
    }

    let Some(idiom) = engine.current() else {
        writeln!(output, "{}", engine.current_word())?;
        return Ok(());
    };

    writeln!(output)?;
    match engine.state().display_mode() {
        DisplayMode::Study => {
            writeln!(
                output,
                "【{}】 {}  [{}]",
                idiom.word(),
                idiom.pinyin(),
                idiom.difficulty().label()
            )?;
            write_details(idiom, output)?;
            if let Some(derivation) = idiom.derivation() {
                writeln!(output, "出处：{derivation}")?;
            }
            if let Some(abbreviation) = idiom.abbreviation() {
                writeln!(output, "缩写：{abbreviation}")?;
            }
        }
        DisplayMode::Quiz => {
            if let Some(prompt) = engine.prompt() {
                writeln!(output, "[{}] {prompt}", idiom.difficulty().label())?;
            }
            if engine.state().answer_revealed() {
                writeln!(
                    output,
                    "你的答案：{} / 正确答案：{}",
                    engine.state().pending_answer().trim(),
                    idiom.word()
                )?;
            }
        }
    }
    Ok(())
}

fn write_details<W: Write>(idiom: &DisplayIdiom, output: &mut W) -> Result<()> {
    writeln!(output, "释义：{}", idiom.meaning())?;
    writeln!(output, "例句：{}", idiom.example())?;
    Ok(())
}

fn write_score<W: Write>(engine: &QuizEngine, output: &mut W) -> Result<()> {
    let state = engine.state();
    writeln!(
        output,
        "得分 {}/{}，正确率 {}%",
        state.correct_count(),
        state.total_count(),
        state.accuracy_percent()
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chengyu_core::engine::QuizEngineConfig;
    use chengyu_core::model::{IdiomRecord, DEFAULT_IDIOM};
    use chengyu_source::mock::MockIdiomSource;

    fn fixed(word: &str) -> IdiomRecord {
        IdiomRecord {
            word: word.into(),
            pinyin: "pīn yīn".into(),
            explanation: "释义文本".into(),
            example: "例句文本".into(),
            derivation: Some("出处文本".into()),
            abbreviation: Some("szdt".into()),
        }
    }

    async fn run(engine: &mut QuizEngine, script: &str) -> String {
        let mut out = Vec::new();
        run_session(engine, script.as_bytes(), &mut out)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parse_commands() {
        assert_eq!(parse_input(":quiz"), Input::Quiz);
        assert_eq!(parse_input("  :study "), Input::Study);
        assert_eq!(
            parse_input(":variant mixed"),
            Input::Variant(Ok(QuizVariant::Mixed))
        );
        assert!(matches!(parse_input(":variant"), Input::Variant(Err(_))));
        assert!(matches!(parse_input(":variant pinyin"), Input::Variant(Err(_))));
        assert_eq!(parse_input(":bogus"), Input::Unknown("bogus".into()));
        assert_eq!(parse_input(" 画蛇添足 "), Input::Answer(" 画蛇添足 ".into()));
    }

    #[tokio::test]
    async fn study_card_shows_answer() {
        let mut engine = QuizEngine::new(
            Arc::new(MockIdiomSource::with_fixed_record(fixed("守株待兔"))),
            QuizEngineConfig::default(),
        );
        let out = run(&mut engine, ":quit\n").await;
        assert!(out.contains("【守株待兔】 pīn yīn"));
        assert!(out.contains("释义：释义文本"));
        assert!(out.contains("出处：出处文本"));
        assert!(out.contains("缩写：szdt"));
    }

    #[tokio::test]
    async fn quiz_round_trip() {
        let mut engine = QuizEngine::new(
            Arc::new(MockIdiomSource::with_fixed_record(fixed("守株待兔"))),
            QuizEngineConfig::default(),
        );
        let out = run(&mut engine, ":quiz\n刻舟求剑\n守株待兔\n:next\n 守株待兔 \n").await;
        assert!(out.contains("根据释义猜成语：释义文本"));
        assert!(out.contains("❌ 回答错误"));
        assert!(out.contains("已作答，输入 :next 进入下一题"));
        assert!(out.contains("✅ 回答正确！"));
        assert!(out.contains("得分 1/2，正确率 50%"));
        assert_eq!(engine.state().total_count(), 2);
        assert_eq!(engine.state().correct_count(), 1);
    }

    #[tokio::test]
    async fn failing_source_shows_notice_and_default() {
        let mut engine = QuizEngine::new(
            Arc::new(MockIdiomSource::failing()),
            QuizEngineConfig::default(),
        );
        let out = run(&mut engine, "").await;
        assert!(out.contains("⚠ "));
        assert!(out.contains(&format!("【{}】", DEFAULT_IDIOM.word)));
    }

    #[tokio::test]
    async fn study_mode_answers_are_not_scored() {
        let mut engine = QuizEngine::new(
            Arc::new(MockIdiomSource::failing()),
            QuizEngineConfig::default(),
        );
        let out = run(&mut engine, "画蛇添足\n:next\n").await;
        assert!(out.contains("学习模式下不计分"));
        assert!(out.contains("请先提交答案"));
        assert_eq!(engine.state().total_count(), 0);
    }

    #[tokio::test]
    async fn reset_zeroes_score() {
        let mut engine = QuizEngine::new(
            Arc::new(MockIdiomSource::failing()),
            QuizEngineConfig::default(),
        );
        let out = run(&mut engine, ":quiz\n画蛇添足\n:reset\n:score\n").await;
        assert!(out.contains("已重置"));
        assert!(out.contains("得分 0/0，正确率 0%"));
        assert_eq!(engine.state().total_count(), 0);
    }
}
