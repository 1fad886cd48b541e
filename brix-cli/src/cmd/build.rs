use anyhow::Result;
use clap::{Arg, ArgMatches, Command};
use std::path::Path;
use tracing::debug;

use brix_core::{SiteDocument, UserId, assemble};

use crate::config::load_build_config;

// File-in/file-out builds run as a single local user.
const LOCAL_OWNER: UserId = 1;

pub fn add_build_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("FILE")
                .help("Site document to render")
                .default_value("./site.json"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Output HTML file")
                .default_value("./site.html"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file")
                .default_value("./brix.toml"),
        )
}

pub fn make_subcommand() -> Command {
    add_build_args(Command::new("build")).about("Render a site document into a styled HTML page")
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    // Load cascading configuration
    let brix_config = load_build_config(args)?;
    let build_config = brix_config.build_config();

    debug!(input = %build_config.input, output = %build_config.output, "building page");

    let document = SiteDocument::read(&build_config.input)?;
    let (manager, site_id) = document.into_manager(LOCAL_OWNER)?;
    let html = assemble::render_site(&manager, site_id)?;

    let output_path = Path::new(&build_config.output);
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, html)?;

    println!("Page built successfully: {}", output_path.display());

    Ok(())
}
