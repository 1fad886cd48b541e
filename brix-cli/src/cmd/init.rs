use anyhow::{Result, bail};
use clap::{Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use std::path::Path;

pub fn make_subcommand() -> Command {
    Command::new("init")
        .about("Write a starter site document to get going")
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Where to write the site document")
                .default_value("./site.json"),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .help("Overwrite an existing file")
                .action(ArgAction::SetTrue),
        )
}

pub fn execute(args: &ArgMatches) -> Result<()> {
    let output = args
        .get_one::<String>("output")
        .map(String::as_str)
        .unwrap_or("./site.json");

    if Path::new(output).exists() && !args.get_flag("force") {
        bail!("{} already exists, pass --force to overwrite", output);
    }

    let sample = json!({
        "site": {
            "title": "My site",
            "description": "Built with brix",
            "header": {"company_name": "My company"}
        },
        "blocks": [
            {"type": "heading", "config": {"content": "Welcome", "level": "h1", "align": "center"}},
            {"type": "text", "config": {"content": "Compose your page from blocks.", "align": "center"}},
            {"type": "button", "config": {"text": "Get started", "link": "#", "style": "primary", "align": "center"}},
            {"type": "slider", "config": {"images": [], "autoplay": true, "interval": 3000}}
        ]
    });

    std::fs::write(output, serde_json::to_string_pretty(&sample)?)?;
    println!("Site document written to {}", output);

    Ok(())
}
