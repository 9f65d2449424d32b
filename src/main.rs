use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process;
use timereport::config::{load_config, set_config_path};
use timereport::error::ReportError;
use timereport::render::{self, ChartRenderer, SvgRenderer};
use timereport::report::{self, Timeline, display};
use timereport::styling::{
    eprintln, format_error, format_hint, format_success, format_with_gutter, println,
};

mod cli;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // RUST_LOG, when set, overrides -v
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&cli) {
        print_error(&e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = std::fs::read_to_string(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;

    // Fatal lines abort here, before anything is written
    let timeline = report::build_timeline(&input)?;

    if cli.wants_summary() {
        println!("{}", display::render(&timeline).trim_end());
    }

    if cli.svg.is_some() || cli.view {
        write_chart(cli, &timeline)?;
    }

    Ok(())
}

fn write_chart(cli: &Cli, timeline: &Timeline) -> anyhow::Result<()> {
    if let Some(path) = &cli.config {
        set_config_path(path.clone());
    }
    let config = load_config()?;
    let svg = SvgRenderer::new(config).render(timeline)?;

    let written: Option<PathBuf> = match &cli.svg {
        Some(path) => {
            let path = render::svg_output_path(path);
            render::export(&path, &svg)?;
            eprintln!(
                "{}",
                format_success(&format!("Wrote chart to {}", path.display()))
            );
            Some(path)
        }
        None => None,
    };

    if cli.view {
        let path = match written {
            Some(path) => path,
            None => render::export_temp(&svg)?,
        };
        render::view(&path)?;
    }

    Ok(())
}

fn print_error(err: &anyhow::Error) {
    match err.downcast_ref::<ReportError>() {
        Some(ReportError::UnassignedTask { record, .. }) => {
            eprintln!("{}", format_error(&err.to_string()));
            match serde_json::to_string_pretty(record) {
                Ok(dump) => eprintln!("{}", format_with_gutter(&dump)),
                Err(_) => eprintln!("{}", format_with_gutter(&format!("{record:#?}"))),
            }
            eprintln!(
                "{}",
                format_hint("Annotate the command with ##label## so its CPU time is accounted for")
            );
        }
        Some(ReportError::Parse { .. }) => {
            eprintln!("{}", format_error(&err.to_string()));
            eprintln!(
                "{}",
                format_hint(
                    "Expected: <start>-<end> r=<M>m<S>s u=<M>m<S>s s=<M>m<S>s <command>[##label##]"
                )
            );
        }
        None => eprintln!("{}", format_error(&format!("{err:#}"))),
    }
}
