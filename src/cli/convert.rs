use std::{ffi::OsStr, path::PathBuf};

use docgen::{Config, Converter, IdentifierIndex};
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Convert {
    /// The source document to convert (.yaml, .yml, or .json)
    input: PathBuf,

    /// The output file (defaults to the input path with a .md extension)
    #[clap(long, short)]
    output: Option<PathBuf>,
}

impl Convert {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let node = docgen::load(&self.input)?;

        let source_name = self
            .input
            .file_name()
            .and_then(OsStr::to_str)
            .unwrap_or("document");
        let markdown = Converter::from_config(config).convert(&node, source_name)?;

        let output = self
            .output
            .unwrap_or_else(|| self.input.with_extension("md"));
        anyhow::ensure!(
            output != self.input,
            "output path would overwrite the input: {}",
            output.display()
        );
        std::fs::write(&output, &markdown)?;

        let identifiers = IdentifierIndex::build(&node).len();
        println!("{} Generated {}", "✓".success(), output.display());
        println!("  - {identifiers} objects with IDs");
        println!("  - {} lines", markdown.lines().count());

        Ok(())
    }
}
