use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info_span};
use walkdir::WalkDir;

use dvc_directives::{CompiledDirectives, MarkupConfiguration, MarkupFileCompiler};
use dvc_types::TypeRegistry;

use crate::cli::args::CliArgs;
use crate::cli::config::resolve_config;

/// Extensions picked up when walking a directory; the configured control
/// extension is added to these.
pub const MARKUP_EXTENSIONS: &[&str] = &["dothtml", "dotcontrol", "dotmaster"];

#[derive(Debug, Clone)]
pub struct FileResult {
    pub path: PathBuf,
    pub source: String,
    pub compiled: CompiledDirectives,
}

#[derive(Debug, Clone, Default)]
pub struct CompilationResult {
    pub files: Vec<FileResult>,
}

impl CompilationResult {
    pub fn error_count(&self) -> usize {
        self.files
            .iter()
            .map(|file| file.compiled.all_diagnostics().iter().filter(|d| d.is_error()).count())
            .sum()
    }

    pub fn has_errors(&self) -> bool {
        self.files.iter().any(|file| file.compiled.has_errors())
    }
}

/// Load the configuration, build the type catalog and compile every file
/// named by `args`.
pub fn compile(args: &CliArgs, cwd: &Path) -> Result<(TypeRegistry, CompilationResult)> {
    let _span = info_span!("compile", paths = args.paths.len()).entered();
    let config = resolve_config(args, cwd)?;
    let types = config.build_registry()?;
    let files = discover_markup_files(&args.paths, cwd, &config.markup)?;
    let result = compile_files(&types, &config.markup, &files)?;
    Ok((types, result))
}

/// Files named directly are always taken; directories are walked for markup
/// extensions. The result is sorted and free of duplicates.
pub fn discover_markup_files(
    paths: &[PathBuf],
    cwd: &Path,
    config: &MarkupConfiguration,
) -> Result<Vec<PathBuf>> {
    let control_extension = config.control_file_extension.trim_start_matches('.');
    let is_markup = |path: &Path| {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| MARKUP_EXTENSIONS.contains(&extension) || extension == control_extension)
    };

    let mut files = Vec::new();
    for path in paths {
        let resolved = cwd.join(path);
        if resolved.is_file() {
            files.push(resolved);
        } else if resolved.is_dir() {
            for entry in WalkDir::new(&resolved).follow_links(true) {
                let entry = entry.with_context(|| format!("failed to walk {}", resolved.display()))?;
                if entry.file_type().is_file() && is_markup(entry.path()) {
                    files.push(entry.into_path());
                }
            }
        } else {
            bail!("path not found: {}", path.display());
        }
    }
    files.sort();
    files.dedup();
    debug!(files = files.len(), "markup files discovered");
    Ok(files)
}

/// Compile `files` in parallel against one shared registry.
pub fn compile_files(
    types: &TypeRegistry,
    config: &MarkupConfiguration,
    files: &[PathBuf],
) -> Result<CompilationResult> {
    let compiler = MarkupFileCompiler::new(types, config);
    let files = files
        .par_iter()
        .map(|path| {
            let source = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let file_name = path.to_string_lossy();
            let compiled = compiler
                .compile_source(&file_name, &source)
                .with_context(|| format!("failed to compile {}", path.display()))?;
            Ok(FileResult {
                path: path.clone(),
                source,
                compiled,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(CompilationResult { files })
}
