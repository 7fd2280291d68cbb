//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (`__` separates nested keys, e.g. `APP_RETRIEVAL__TOP_K=8`).
//! Provides helpers to expand `~` and `${VAR}` and to resolve relative paths
//! against a known base directory.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::policy::SanitizerPolicy;

pub const DEFAULT_CORPUS_DIR: &str = "data/corpus/parsed";

/// Knobs of a single retrieval call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Maximum number of `ok` hits; `0` returns every match.
    pub top_k: usize,
    /// Sentences picked as evidence per document.
    pub evidence_sentences: usize,
    /// Sanitized sentences joined into a style snippet.
    pub style_sentences: usize,
    /// Shorter normalized sentences are treated as fragments and dropped.
    pub min_sentence_chars: usize,
    /// Evidence snippets are cut to this many characters plus `...`.
    pub max_evidence_chars: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: 5,
            evidence_sentences: 3,
            style_sentences: 6,
            min_sentence_chars: 60,
            max_evidence_chars: 600,
        }
    }
}

impl RetrievalConfig {
    /// Every knob except `top_k` must be at least 1. A zero sentence
    /// threshold would admit empty sentences; a zero evidence length
    /// reduces every snippet to `...`.
    pub fn validate(&self) -> Result<()> {
        let knobs = [
            ("evidence_sentences", self.evidence_sentences),
            ("style_sentences", self.style_sentences),
            ("min_sentence_chars", self.min_sentence_chars),
            ("max_evidence_chars", self.max_evidence_chars),
        ];
        for (name, value) in knobs {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("retrieval.{} must be at least 1", name)));
            }
        }
        Ok(())
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
        Self::load_for_env(&env_name)
    }

    pub fn load_for_env(env_name: &str) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        let config = Self::from_figment(figment);
        config.validate()?;
        tracing::debug!(env = env_name, "configuration loaded");
        Ok(config)
    }

    /// Wrap an already assembled figment without touching the filesystem.
    /// Not validated; call [`Config::validate`] before use.
    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    pub fn retrieval(&self) -> Result<RetrievalConfig> {
        self.section_or_default("retrieval")
    }

    pub fn sanitizer(&self) -> Result<SanitizerPolicy> {
        self.section_or_default("sanitizer")
    }

    /// Corpus directory from `data.corpus_dir`, resolved against `base`.
    pub fn corpus_dir(&self, base: &Path) -> Result<PathBuf> {
        let dir: String = if self.figment.contains("data.corpus_dir") {
            self.get("data.corpus_dir")?
        } else {
            DEFAULT_CORPUS_DIR.to_string()
        };
        Ok(resolve_with_base(base, dir))
    }

    pub fn validate(&self) -> Result<()> {
        self.retrieval()?.validate()?;
        let sanitizer = self.sanitizer()?;
        if sanitizer.max_sentence_chars == 0 {
            return Err(Error::InvalidConfig(
                "sanitizer.max_sentence_chars must be at least 1".into(),
            ));
        }
        if sanitizer.max_sentences == 0 {
            return Err(Error::InvalidConfig("sanitizer.max_sentences must be at least 1".into()));
        }
        Ok(())
    }

    fn section_or_default<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        if self.figment.contains(key) {
            self.get(key)
        } else {
            Ok(T::default())
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
