//! In-memory dataset source.
//!
//! Serves records from a JSON dataset file (an array of records with `word`,
//! `pinyin`, `explanation`, `example`, `derivation`, `abbreviation`) or from
//! the compiled-in starter set.

use std::path::Path;

use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;

use chengyu_core::error::SourceError;
use chengyu_core::model::{IdiomRecord, IdiomSeed, DEFAULT_IDIOM};
use chengyu_core::parser::parse_dataset;
use chengyu_core::traits::IdiomSource;

/// Starter idioms available without any dataset file.
pub const BUILTIN_IDIOMS: [IdiomSeed; 8] = [
    DEFAULT_IDIOM,
    IdiomSeed {
        word: "守株待兔",
        pinyin: "shǒu zhū dài tù",
        explanation: "原比喻希图不经过努力而得到成功的侥幸心理。现也比喻死守狭隘经验，不知变通。",
        example: "学习不能守株待兔，要主动探索新知识。",
    },
    IdiomSeed {
        word: "杯弓蛇影",
        pinyin: "bēi gōng shé yǐng",
        explanation: "将映在酒杯里的弓影误认为蛇。比喻因疑神疑鬼而引起恐惧。",
        example: "他总是杯弓蛇影，把别人的善意当成恶意。",
    },
    IdiomSeed {
        word: "亡羊补牢",
        pinyin: "wáng yáng bǔ láo",
        explanation: "羊逃跑了再去修补羊圈，还不算晚。比喻出了问题以后想办法补救，可以防止继续受损失。",
        example: "虽然考试失利了，但现在努力学习还不晚，亡羊补牢，为时未晚。",
    },
    IdiomSeed {
        word: "刻舟求剑",
        pinyin: "kè zhōu qiú jiàn",
        explanation: "比喻不懂事物已发展变化而仍静止地看问题。",
        example: "时代在发展，我们不能刻舟求剑，要与时俱进。",
    },
    IdiomSeed {
        word: "掩耳盗铃",
        pinyin: "yǎn ěr dào líng",
        explanation: "偷铃铛怕别人听见而捂住自己的耳朵。比喻自己欺骗自己，明明掩盖不住的事情偏要想法子掩盖。",
        example: "他这种做法纯属掩耳盗铃，问题迟早会暴露的。",
    },
    IdiomSeed {
        word: "叶公好龙",
        pinyin: "yè gōng hào lóng",
        explanation: "比喻口头上说爱好某事物，实际上并不真爱好。",
        example: "他说喜欢古典音乐，但从不去听音乐会，这就是叶公好龙。",
    },
    IdiomSeed {
        word: "塞翁失马",
        pinyin: "sài wēng shī mǎ",
        explanation: "比喻一时虽然受到损失，也许反而因此能得到好处。也指坏事在一定条件下可变为好事。",
        example: "他失业后反而找到了更好的工作，真是塞翁失马，焉知非福。",
    },
];

/// Idiom source backed by an in-memory list of records.
#[derive(Debug, Clone)]
pub struct DatasetIdiomSource {
    name: String,
    records: Vec<IdiomRecord>,
}

impl DatasetIdiomSource {
    pub fn new(name: impl Into<String>, records: Vec<IdiomRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// The compiled-in starter set.
    pub fn builtin() -> Self {
        Self::new(
            "builtin",
            BUILTIN_IDIOMS.iter().map(IdiomSeed::to_record).collect(),
        )
    }

    /// Load a JSON dataset file. Invalid entries are skipped.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let content = std::fs::read_to_string(path)?;
        let records = parse_dataset(&content)?;
        tracing::debug!("loaded {} idioms from {}", records.len(), path.display());
        Ok(Self::new("dataset", records))
    }

    /// Number of records in the dataset.
    pub fn total(&self) -> usize {
        self.records.len()
    }

    /// Draw records with the given RNG.
    ///
    /// `count <= 1` picks one record uniformly; larger counts sample without
    /// replacement, capped at the dataset size.
    pub fn sample_with<R: Rng + ?Sized>(
        &self,
        count: usize,
        rng: &mut R,
    ) -> Result<Vec<IdiomRecord>, SourceError> {
        if self.records.is_empty() {
            return Err(SourceError::EmptyDataset);
        }

        if count <= 1 {
            return Ok(self.records.choose(rng).cloned().into_iter().collect());
        }

        let amount = count.min(self.records.len());
        Ok(self
            .records
            .choose_multiple(rng, amount)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl IdiomSource for DatasetIdiomSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch_idioms(&self, count: usize) -> Result<Vec<IdiomRecord>, SourceError> {
        self.sample_with(count, &mut rand::thread_rng())
    }
}
