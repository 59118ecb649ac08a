//! Corpus loading from a data directory.
//!
//! Layout: `<data>/raw/*.txt` holds the raw documents and `<data>/stemmed/` the
//! stemmed cache written on first load. When the cache exists it is read instead
//! of re-stemming the raw text.

use crate::persist::{self, CachePaths, CachedDoc, MetaFile};
use crate::tokenizer::tokenize;
use anyhow::{bail, Context, Result};
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

lazy_static! {
    static ref RAW_SUFFIX: Regex = Regex::new(r"(?: \d+)?\.txt$").expect("valid regex");
}

/// A titled, already-normalized token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub title: String,
    pub terms: Vec<String>,
}

impl Document {
    pub fn new<T, I, S>(title: T, terms: I) -> Self
    where
        T: Into<String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { title: title.into(), terms: terms.into_iter().map(Into::into).collect() }
    }
}

/// Documents ordered by title; a document's id is its position.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
}

impl Corpus {
    /// Sorts by title (stable, so equal titles keep their input order).
    pub fn new(mut documents: Vec<Document>) -> Self {
        documents.sort_by(|a, b| a.title.cmp(&b.title));
        Self { documents }
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn into_titles(self) -> Vec<String> {
        self.documents.into_iter().map(|d| d.title).collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Re-stem `raw/` even when a stemmed cache is present.
    pub rebuild_cache: bool,
}

/// Load the corpus under `data_dir`, building the stemmed cache if needed.
///
/// A `stemmed/` directory without a manifest is only trusted when there is no
/// `raw/` to rebuild it from.
pub fn load_corpus(data_dir: &Path, opts: &LoadOptions) -> Result<Corpus> {
    let paths = CachePaths::new(data_dir);
    let use_cache = paths.stemmed_dir().is_dir() && !opts.rebuild_cache;
    let meta = if use_cache { persist::load_meta(&paths)? } else { None };
    let has_raw = paths.raw_dir().is_dir();

    let documents = if use_cache && (meta.is_some() || !has_raw) {
        tracing::info!(dir = %paths.stemmed_dir().display(), "reading stemmed cache");
        read_stemmed(&paths, meta.as_ref())?
    } else if has_raw {
        if use_cache {
            tracing::warn!(dir = %paths.stemmed_dir().display(), "stemmed cache has no manifest, re-stemming");
        }
        tracing::info!(dir = %paths.raw_dir().display(), "stemming raw documents");
        stem_raw(&paths)?
    } else {
        bail!("no raw/ or stemmed/ directory under {}", data_dir.display());
    };
    tracing::info!(num_docs = documents.len(), "corpus loaded");
    Ok(Corpus::new(documents))
}

/// Title for a raw file name: a trailing ` <digits>.txt` or `.txt` is removed.
pub fn raw_title(file_name: &str) -> String {
    RAW_SUFFIX.replace(file_name, "").into_owned()
}

/// Stems into the staging directory; `stemmed/` is only replaced after every
/// document and the manifest are written.
fn stem_raw(paths: &CachePaths) -> Result<Vec<Document>> {
    let staging = persist::begin_staging(paths)?;
    let mut documents = Vec::new();
    let mut manifest = Vec::new();
    for file in list_txt_files(&paths.raw_dir())? {
        let file_name = file_name_of(&file);
        let title = raw_title(&file_name);
        let bytes = fs::read(&file).with_context(|| format!("reading {}", file.display()))?;
        let text = String::from_utf8_lossy(&bytes);

        let lines: Vec<Vec<String>> = text
            .lines()
            .map(tokenize)
            .filter(|line| !line.is_empty())
            .collect();
        persist::save_stemmed_doc(&staging, &file_name, &lines)?;
        tracing::debug!(%title, file = %file_name, "stemmed document");

        manifest.push(CachedDoc { file: file_name, title: title.clone() });
        documents.push(Document { title, terms: lines.into_iter().flatten().collect() });
    }
    persist::save_meta(&staging, &MetaFile::new(manifest))?;
    persist::commit_staging(paths)?;
    Ok(documents)
}

fn read_stemmed(paths: &CachePaths, meta: Option<&MetaFile>) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    for file in list_txt_files(&paths.stemmed_dir())? {
        let file_name = file_name_of(&file);
        let title = meta
            .and_then(|m| m.title_for(&file_name))
            .map(str::to_owned)
            .unwrap_or_else(|| file_name.trim_end_matches(".txt").to_owned());
        let terms = persist::load_stemmed_doc(&file)?;
        documents.push(Document { title, terms });
    }
    if let Some(meta) = meta {
        if meta.num_docs as usize != documents.len() {
            bail!(
                "stemmed cache under {} holds {} documents but its manifest lists {}; rebuild the cache",
                paths.stemmed_dir().display(),
                documents.len(),
                meta.num_docs
            );
        }
    }
    Ok(documents)
}

/// Non-hidden `.txt` files directly inside `dir`, sorted by name.
fn list_txt_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("listing {}", dir.display()))?;
        let is_doc = {
            let name = entry.file_name().to_string_lossy();
            entry.file_type().is_file() && name.ends_with(".txt") && !name.starts_with('.')
        };
        if is_doc {
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn file_name_of(path: &Path) -> String {
    path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default()
}
