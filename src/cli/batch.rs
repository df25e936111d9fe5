use std::{
    collections::BTreeMap,
    ffi::OsStr,
    path::{Path, PathBuf},
};

use docgen::{Config, Converter};
use indicatif::ProgressBar;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Batch {
    /// The directory to scan for source documents
    input: PathBuf,

    /// Where to write rendered documents, mirroring the source layout
    /// (defaults to alongside each source file)
    #[clap(long, short)]
    out_dir: Option<PathBuf>,
}

impl Batch {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let paths = docgen::discover(&self.input);
        if paths.is_empty() {
            println!("No source documents found in {}", self.input.display());
            return Ok(());
        }

        // Sibling sources like `a.yaml` and `a.json` render to the same
        // output file. Refuse those up front rather than letting parallel
        // workers overwrite each other.
        let mut failures = 0usize;
        let mut jobs: Vec<(&PathBuf, PathBuf)> = Vec::new();
        for (output, sources) in group_by_output(&paths, &self.input, self.out_dir.as_deref()) {
            if let [source] = sources.as_slice() {
                jobs.push((source, output));
            } else {
                failures += sources.len();
                let names: Vec<String> =
                    sources.iter().map(|path| path.display().to_string()).collect();
                eprintln!(
                    "{} {}: multiple sources render to this file: {}",
                    "✗".warning(),
                    output.display(),
                    names.join(", ")
                );
            }
        }

        let converter = Converter::from_config(config);
        let progress = ProgressBar::new(jobs.len() as u64);

        let results: Vec<(&PathBuf, anyhow::Result<()>)> = jobs
            .par_iter()
            .map(|(path, output)| {
                let result = convert_one(path, output, &converter);
                progress.inc(1);
                (*path, result)
            })
            .collect();
        progress.finish_and_clear();

        let mut converted = 0usize;
        for (path, result) in &results {
            match result {
                Ok(()) => converted += 1,
                Err(error) => {
                    failures += 1;
                    eprintln!("{} {}: {error:#}", "✗".warning(), path.display());
                }
            }
        }

        println!("{} Converted {converted} documents", "✓".success());
        anyhow::ensure!(failures == 0, "{failures} documents failed to convert");
        Ok(())
    }
}

fn output_path(path: &Path, root: &Path, out_dir: Option<&Path>) -> PathBuf {
    match out_dir {
        Some(dir) => {
            let relative = path.strip_prefix(root).unwrap_or(path);
            dir.join(relative).with_extension("md")
        }
        None => path.with_extension("md"),
    }
}

fn group_by_output<'a>(
    paths: &'a [PathBuf],
    root: &Path,
    out_dir: Option<&Path>,
) -> BTreeMap<PathBuf, Vec<&'a PathBuf>> {
    let mut groups: BTreeMap<PathBuf, Vec<&PathBuf>> = BTreeMap::new();
    for path in paths {
        groups
            .entry(output_path(path, root, out_dir))
            .or_default()
            .push(path);
    }
    groups
}

fn convert_one(path: &Path, output: &Path, converter: &Converter) -> anyhow::Result<()> {
    let node = docgen::load(path)?;
    let source_name = path.file_name().and_then(OsStr::to_str).unwrap_or("document");
    let markdown = converter.convert(&node, source_name)?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output, markdown)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use super::{group_by_output, output_path};

    #[test]
    fn output_mirrors_source_layout_under_out_dir() {
        let output = output_path(
            Path::new("ctx/billing/doc.yaml"),
            Path::new("ctx"),
            Some(Path::new("docs")),
        );
        assert_eq!(output, Path::new("docs/billing/doc.md"));
    }

    #[test]
    fn output_lands_beside_source_without_out_dir() {
        let output = output_path(Path::new("ctx/doc.json"), Path::new("ctx"), None);
        assert_eq!(output, Path::new("ctx/doc.md"));
    }

    #[test]
    fn sibling_sources_with_equal_stems_are_grouped_as_collisions() {
        let paths = vec![
            PathBuf::from("ctx/a.yaml"),
            PathBuf::from("ctx/a.json"),
            PathBuf::from("ctx/b.yml"),
        ];
        let groups = group_by_output(&paths, Path::new("ctx"), None);
        assert_eq!(groups[Path::new("ctx/a.md")].len(), 2);
        assert_eq!(groups[Path::new("ctx/b.md")].len(), 1);
    }
}
