use docgen::Config;
use tracing::instrument;

use crate::cli::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Rules {}

impl Rules {
    #[instrument(skip(config))]
    pub fn run(self, config: &Config) {
        let table = config.rule_table();
        println!("{} classification rules (first match wins):", table.len());
        for rule in table.iter() {
            println!("  {:<12} {}", rule.prefix().info(), rule.category());
        }
    }
}
