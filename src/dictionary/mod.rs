use std::collections::{HashMap, HashSet};
use std::path::Path;
use tokio::fs;
use anyhow::{Context, Result};

use crate::{config::EngineConfig, models::Language};

/// Word-existence lookup consulted by the dictionary rule
pub trait WordOracle: Send + Sync {
    fn is_valid_word(&self, word: &str, language: Language) -> bool;
}

/// In-memory word lists, one per language
#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    words: HashMap<Language, HashSet<String>>,
}

impl Dictionary {
    /// Load a word list (one word per line) for `language` from a file
    pub async fn load<P: AsRef<Path>>(language: Language, path: P) -> Result<Self> {
        let mut dictionary = Self::empty();
        dictionary.load_language(language, path).await?;
        Ok(dictionary)
    }

    /// Load the word list named by `dictionary_path` for `language`
    pub async fn from_config(config: &EngineConfig, language: Language) -> Result<Self> {
        Self::load(language, &config.dictionary_path).await
    }

    /// Add a word list for another language, replacing any previous one
    pub async fn load_language<P: AsRef<Path>>(
        &mut self,
        language: Language,
        path: P,
    ) -> Result<()> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read word list {}", path.display()))?;
        let words: HashSet<String> = content
            .lines()
            .map(|line| line.trim().to_uppercase())
            .filter(|word| word.chars().count() >= 2)
            .collect();

        tracing::info!("Loaded {} {} words into dictionary", words.len(), language);

        self.words.insert(language, words);
        Ok(())
    }

    /// Build a dictionary from an in-memory word list
    pub fn from_words<I, S>(language: Language, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_uppercase())
            .filter(|w| w.chars().count() >= 2)
            .collect();
        let mut dictionary = Self::empty();
        dictionary.words.insert(language, set);
        dictionary
    }

    /// Create an empty dictionary (for testing)
    pub fn empty() -> Self {
        Self {
            words: HashMap::new(),
        }
    }

    /// Check if a word exists in the dictionary for a language
    pub fn contains(&self, word: &str, language: Language) -> bool {
        self.words
            .get(&language)
            .is_some_and(|set| set.contains(&word.to_uppercase()))
    }

    /// Number of words across all languages
    pub fn len(&self) -> usize {
        self.words.values().map(HashSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WordOracle for Dictionary {
    fn is_valid_word(&self, word: &str, language: Language) -> bool {
        self.contains(word, language)
    }
}
