//! Site generation: directory handling, templating and page rendering.
//!
//! Everything here is plain I/O around the core compiler. A build loads the
//! template and renders every Markdown page found under the content directory
//! in memory first. Only then is the destination wiped, static assets copied
//! and the pages written, so a bad template or page leaves the old site alone.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use mdsite_core::{compile_document, extract_title, MarkdownError};
use thiserror::Error;

use crate::config::SiteConfig;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error on {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("template {path} is missing the {placeholder} placeholder")]
    MissingPlaceholder {
        path: PathBuf,
        placeholder: &'static str,
    },

    #[error("failed to render {path}: {source}")]
    Page {
        path: PathBuf,
        source: MarkdownError,
    },

    #[error("destination {dest} contains the build input {input}")]
    DestinationOverlap { dest: PathBuf, input: PathBuf },
}

impl SiteError {
    fn io(path: &Path, source: io::Error) -> Self {
        SiteError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

/// Summary of a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// HTML pages written.
    pub pages: usize,
    /// Static files copied.
    pub assets: usize,
}

/// A page template holding `{{ Title }}` and `{{ Content }}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
}

impl Template {
    /// Wrap template text, checking that both placeholders are present.
    /// `path` is only used for error messages.
    pub fn parse(source: impl Into<String>, path: &Path) -> Result<Self> {
        let source = source.into();
        for placeholder in [TITLE_PLACEHOLDER, CONTENT_PLACEHOLDER] {
            if !source.contains(placeholder) {
                return Err(SiteError::MissingPlaceholder {
                    path: path.to_path_buf(),
                    placeholder,
                });
            }
        }
        Ok(Self { source })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|e| SiteError::io(path, e))?;
        Self::parse(source, path)
    }

    /// Fill in the placeholders and point root-relative links at `base_path`.
    ///
    /// Placeholders are only looked up in the template text itself, so a
    /// title that happens to contain `{{ Content }}` is inserted verbatim.
    pub fn render(&self, title: &str, content: &str, base_path: &str) -> String {
        let mut page = String::with_capacity(self.source.len() + title.len() + content.len());
        let mut rest = self.source.as_str();

        loop {
            let next = [(TITLE_PLACEHOLDER, title), (CONTENT_PLACEHOLDER, content)]
                .into_iter()
                .filter_map(|(placeholder, value)| {
                    rest.find(placeholder).map(|pos| (pos, placeholder, value))
                })
                .min_by_key(|&(pos, ..)| pos);

            match next {
                Some((pos, placeholder, value)) => {
                    page.push_str(&rest[..pos]);
                    page.push_str(value);
                    rest = &rest[pos + placeholder.len()..];
                }
                None => {
                    page.push_str(rest);
                    break;
                }
            }
        }

        page.replace("href=\"/", &format!("href=\"{}", base_path))
            .replace("src=\"/", &format!("src=\"{}", base_path))
    }
}

/// Render one Markdown document into a full HTML page.
pub fn render_page(
    markdown: &str,
    template: &Template,
    base_path: &str,
) -> std::result::Result<String, MarkdownError> {
    let title = extract_title(markdown)?;
    let content = compile_document(markdown)?.to_html()?;
    Ok(template.render(&title, &content, base_path))
}

/// Remove `path` if it exists and recreate it empty.
pub fn clean_dir(path: &Path) -> Result<()> {
    if path.exists() {
        debug!("removing {}", path.display());
        fs::remove_dir_all(path).map_err(|e| SiteError::io(path, e))?;
    }
    fs::create_dir_all(path).map_err(|e| SiteError::io(path, e))
}

/// Copy every file under `from` into `to`, recreating subdirectories.
/// Returns the number of files copied.
pub fn copy_dir_recursive(from: &Path, to: &Path) -> Result<usize> {
    fs::create_dir_all(to).map_err(|e| SiteError::io(to, e))?;

    let mut copied = 0;
    for entry in sorted_entries(from)? {
        let target = to.join(entry.file_name().unwrap_or_default());
        if entry.is_dir() {
            copied += copy_dir_recursive(&entry, &target)?;
        } else {
            info!("copying {} -> {}", entry.display(), target.display());
            fs::copy(&entry, &target).map_err(|e| SiteError::io(&entry, e))?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// Find every `.md` file under `root`, keyed by its path relative to `root`.
pub fn discover_markdown(root: &Path) -> Result<BTreeMap<PathBuf, String>> {
    let mut pages = BTreeMap::new();
    collect_markdown(root, root, &mut pages)?;
    Ok(pages)
}

fn collect_markdown(root: &Path, dir: &Path, pages: &mut BTreeMap<PathBuf, String>) -> Result<()> {
    for entry in sorted_entries(dir)? {
        if entry.is_dir() {
            collect_markdown(root, &entry, pages)?;
        } else if entry.extension().is_some_and(|ext| ext == "md") {
            let markdown = fs::read_to_string(&entry).map_err(|e| SiteError::io(&entry, e))?;
            let relative = entry.strip_prefix(root).unwrap_or(&entry).to_path_buf();
            pages.insert(relative, markdown);
        }
    }
    Ok(())
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| SiteError::io(dir, e))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| SiteError::io(dir, e))?;
    entries.sort();
    Ok(entries)
}

/// Canonical form of `path`, or `None` if it doesn't exist.
fn canonical(path: &Path) -> Result<Option<PathBuf>> {
    match path.canonicalize() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(SiteError::io(path, e)),
    }
}

/// Canonical form of a path that may not exist yet: its nearest existing
/// ancestor is canonicalized and the missing components appended.
fn resolve(path: &Path) -> Result<PathBuf> {
    let mut missing = Vec::new();
    let mut current = path;
    loop {
        if let Some(base) = canonical(current)? {
            return Ok(missing.iter().rev().fold(base, |acc, name| acc.join(name)));
        }
        match (current.parent(), current.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name);
                current = if parent.as_os_str().is_empty() {
                    Path::new(".")
                } else {
                    parent
                };
            }
            _ => return Err(SiteError::io(path, io::ErrorKind::NotFound.into())),
        }
    }
}

/// Refuse a destination that is, or is an ancestor of, one of the build
/// inputs, since cleaning it would delete them. A destination inside the
/// static directory is refused too: copying assets would recurse into it.
pub fn check_destination(config: &SiteConfig) -> Result<()> {
    let dest = resolve(&config.dest_dir)?;
    let overlap = |input: &PathBuf| SiteError::DestinationOverlap {
        dest: config.dest_dir.clone(),
        input: input.clone(),
    };

    for input in [&config.content_dir, &config.static_dir, &config.template] {
        if let Some(resolved) = canonical(input)? {
            if resolved.starts_with(&dest) {
                return Err(overlap(input));
            }
        }
    }
    if let Some(static_dir) = canonical(&config.static_dir)? {
        if dest.starts_with(&static_dir) {
            return Err(overlap(&config.static_dir));
        }
    }
    Ok(())
}

/// Build the whole site described by `config`.
///
/// Nothing on disk changes until the template has loaded, every page has
/// rendered and the destination has been checked against the inputs.
pub fn build_site(config: &SiteConfig) -> Result<BuildReport> {
    let template = Template::load(&config.template)?;

    let mut pages = Vec::new();
    for (relative, markdown) in discover_markdown(&config.content_dir)? {
        let source_path = config.content_dir.join(&relative);
        let page = render_page(&markdown, &template, &config.base_path)
            .map_err(|source| SiteError::Page {
                path: source_path.clone(),
                source,
            })?;
        pages.push((source_path, relative.with_extension("html"), page));
    }
    debug!("rendered {} page(s) in memory", pages.len());

    check_destination(config)?;
    clean_dir(&config.dest_dir)?;

    let mut report = BuildReport::default();
    if config.static_dir.is_dir() {
        report.assets = copy_dir_recursive(&config.static_dir, &config.dest_dir)?;
    } else {
        warn!(
            "static directory {} not found, skipping assets",
            config.static_dir.display()
        );
    }

    for (source_path, relative, page) in pages {
        let dest_path = config.dest_dir.join(relative);
        if let Some(parent) = dest_path.parent() {
            fs::create_dir_all(parent).map_err(|e| SiteError::io(parent, e))?;
        }
        fs::write(&dest_path, page).map_err(|e| SiteError::io(&dest_path, e))?;
        info!(
            "generated {} -> {}",
            source_path.display(),
            dest_path.display()
        );
        report.pages += 1;
    }

    Ok(report)
}
