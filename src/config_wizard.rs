//! Interactive configuration wizard for creating `epub-pack.toml`.
//!
//! The wizard scans a directory for text documents, lets the user pick which
//! ones make up the book, and collects the output settings for the EPUB and
//! plain-text exports.

use crate::detection::{detect_documents, detect_title, document_title};
use crate::document::DocumentSet;
use crate::sinks::{Text, EPUB};
use anyhow::{anyhow, Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "epub-pack.toml";

/// One document of the book, in reading order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentEntry {
    pub path: PathBuf,
    pub title: String,
}

impl DocumentEntry {
    pub fn from_path<P: Into<PathBuf>>(path: P) -> DocumentEntry {
        let path = path.into();
        let title = document_title(&path);
        DocumentEntry { path, title }
    }
}

/// Complete configuration for an epub-pack project.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Configuration {
    #[serde(default)]
    pub documents: Vec<DocumentEntry>,
    pub epub: Option<EPUB>,
    pub text: Option<Text>,
}

impl Configuration {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Configuration> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).with_context(|| {
            format!(
                "Failed to load {} - run 'epub-pack config' first",
                path.display()
            )
        })?;
        toml::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = toml::to_string_pretty(self)
            .with_context(|| "Failed to convert configuration to TOML")?;
        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Register every configured document, in order, ready to be loaded.
    pub fn document_set(&self) -> DocumentSet {
        let mut documents = DocumentSet::default();
        for entry in &self.documents {
            documents.register(&entry.title, Some(&entry.path));
        }
        documents
    }

    /// Replace the configured documents with the current order of `documents`.
    pub fn set_documents(&mut self, documents: &DocumentSet) {
        self.documents = documents
            .iter()
            .filter_map(|d| {
                d.path.as_ref().map(|path| DocumentEntry {
                    path: path.clone(),
                    title: d.title.clone(),
                })
            })
            .collect();
    }
}

/// Run the interactive configuration wizard.
///
/// Prompts for the document directory, which documents to include and the
/// output settings, then writes the configuration to `config_path`.
pub fn run(config_path: &Path) -> Result<()> {
    let theme = ColorfulTheme::default();

    let dir = Input::with_theme(&theme)
        .with_prompt("Document directory")
        .default(".".to_string())
        .interact()
        .with_context(|| "Failed to obtain document directory")?;
    let dir = PathBuf::from(dir);
    if !dir.is_dir() {
        return Err(anyhow!("Path '{}' isn't a directory!", dir.display()));
    }

    use globset::{Glob, GlobMatcher};
    let mut block_globs: Vec<GlobMatcher> = Vec::default();

    if Confirm::with_theme(&theme)
        .with_prompt("Do you wish to exclude some files from the scan?")
        .default(false)
        .interact()?
    {
        'block: loop {
            let glob: String = Input::with_theme(&theme)
                .with_prompt("Glob syntax of files you want to exclude (leave blank to move on)")
                .allow_empty(true)
                .interact()?;
            if glob.trim().is_empty() {
                break 'block;
            }

            let glob = Glob::new(&glob)
                .with_context(|| "Failed to parse glob!")?
                .compile_matcher();
            block_globs.push(glob);
        }
    }

    let found = detect_documents(&dir, &block_globs)?;
    let documents = if found.is_empty() {
        println!("No text documents found; add some later with 'epub-pack add'.");
        Vec::new()
    } else {
        let items: Vec<String> = found.iter().map(|p| p.display().to_string()).collect();
        let defaults = vec![true; items.len()];
        let selections = MultiSelect::with_theme(&theme)
            .with_prompt("Documents to include (in reading order)")
            .items(&items)
            .defaults(&defaults)
            .interact()?;
        selections
            .into_iter()
            .map(|i| DocumentEntry::from_path(dir.join(&found[i])))
            .collect()
    };

    let mut epub = None;
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to export an EPUB?")
        .default(true)
        .interact()?
    {
        let title: String = Input::with_theme(&theme)
            .with_prompt("Book title")
            .with_initial_text(detect_title(&dir).unwrap_or_else(|| EPUB::default().title))
            .allow_empty(false)
            .interact()
            .with_context(|| "Failed to obtain title")?;
        let outfile = prompt_outfile(&theme, "Output EPUB file", EPUB::default().outfile, "epub")?;
        epub = Some(EPUB { outfile, title });
    }

    let mut text = None;
    if Confirm::with_theme(&theme)
        .with_prompt("Do you want to export a combined text file?")
        .default(false)
        .interact()?
    {
        let outfile = prompt_outfile(&theme, "Output text file", Text::default().outfile, "txt")?;
        text = Some(Text { outfile });
    }

    let config = Configuration {
        documents,
        epub,
        text,
    };

    if config_path.exists()
        && !Confirm::with_theme(&theme)
            .with_prompt(format!(
                "{} already exists, do you want to override it?",
                config_path.display()
            ))
            .interact()?
    {
        println!("Configuration:");
        println!(
            "{}",
            toml::to_string_pretty(&config)
                .with_context(|| "Failed to convert configuration to TOML")?
        );
    } else {
        config.save(config_path)?;
        println!("{} written!", config_path.display());
    }

    Ok(())
}

fn prompt_outfile(
    theme: &ColorfulTheme,
    prompt: &str,
    default: PathBuf,
    extension: &str,
) -> Result<PathBuf> {
    let outfile: String = Input::with_theme(theme)
        .with_prompt(prompt)
        .default(default.display().to_string())
        .interact()?;
    let mut outfile = PathBuf::from(outfile);
    let ext = outfile
        .extension()
        .map(std::ffi::OsStr::to_ascii_lowercase)
        .unwrap_or_default();
    if ext != *extension {
        outfile.set_extension(extension);
    }
    Ok(outfile)
}
