//! On-disk stemmed cache: one space-separated `.txt` per document plus a
//! `meta.json` manifest mapping cache files back to titles.

use crate::tokenizer::STEMMER_NAME;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedDoc {
    pub file: String,
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub created_at: String,
    pub version: u32,
    pub stemmer: String,
    pub documents: Vec<CachedDoc>,
}

impl MetaFile {
    pub fn new(documents: Vec<CachedDoc>) -> Self {
        Self {
            num_docs: documents.len() as u32,
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            version: CACHE_VERSION,
            stemmer: STEMMER_NAME.to_string(),
            documents,
        }
    }

    pub fn title_for(&self, file: &str) -> Option<&str> {
        self.documents.iter().find(|d| d.file == file).map(|d| d.title.as_str())
    }
}

pub struct CachePaths {
    pub root: PathBuf,
}

impl CachePaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn raw_dir(&self) -> PathBuf { self.root.join("raw") }
    pub fn stemmed_dir(&self) -> PathBuf { self.root.join("stemmed") }
    /// A new cache is written here and renamed to `stemmed/` once complete.
    pub fn staging_dir(&self) -> PathBuf { self.root.join("stemmed.partial") }
    fn meta(&self) -> PathBuf { self.stemmed_dir().join(META_FILE) }
}

const META_FILE: &str = "meta.json";

/// Write one stemmed document into `dir`, one line per non-empty source line.
pub fn save_stemmed_doc(dir: &Path, file_name: &str, lines: &[Vec<String>]) -> Result<()> {
    create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let path = dir.join(file_name);
    let f = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(f);
    for line in lines {
        writeln!(out, "{}", line.join(" "))?;
    }
    out.flush()?;
    Ok(())
}

pub fn load_stemmed_doc(path: &Path) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(text.split_whitespace().map(str::to_lowercase).collect())
}

pub fn save_meta(dir: &Path, meta: &MetaFile) -> Result<()> {
    create_dir_all(dir)?;
    let path = dir.join(META_FILE);
    let json = serde_json::to_string_pretty(meta)?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// `None` when `stemmed/` has no manifest.
pub fn load_meta(paths: &CachePaths) -> Result<Option<MetaFile>> {
    let path = paths.meta();
    if !path.is_file() {
        return Ok(None);
    }
    let buf = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let meta: MetaFile = serde_json::from_str(&buf).with_context(|| format!("parsing {}", path.display()))?;
    if meta.stemmer != STEMMER_NAME {
        tracing::warn!(cached = %meta.stemmer, current = STEMMER_NAME, "stemmed cache built with a different stemmer");
    }
    Ok(Some(meta))
}

fn remove_dir_if_present(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        fs::remove_dir_all(dir).with_context(|| format!("removing {}", dir.display()))?;
    }
    Ok(())
}

/// Drop leftovers of an interrupted run and start an empty staging directory.
pub fn begin_staging(paths: &CachePaths) -> Result<PathBuf> {
    let dir = paths.staging_dir();
    remove_dir_if_present(&dir)?;
    create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    Ok(dir)
}

/// Replace `stemmed/` with the fully written staging directory.
pub fn commit_staging(paths: &CachePaths) -> Result<()> {
    let (staging, stemmed) = (paths.staging_dir(), paths.stemmed_dir());
    remove_dir_if_present(&stemmed)?;
    fs::rename(&staging, &stemmed)
        .with_context(|| format!("renaming {} to {}", staging.display(), stemmed.display()))?;
    Ok(())
}
