//! roundtrip — read a network, zoning and demand document set and write it
//! back out.
//!
//! ```text
//! roundtrip [--sync] [--settings writer.json] <out_dir> <network.json> [zoning.json [demand.json]]
//! ```
//!
//! `--sync` rewrites every document id to its internal id while reading.
//! `--settings` loads `WriterSettings` (encoding, separators, id mapping).
//! When a demand document is given, `od.csv` is written next to the
//! documents.  Set `RUST_LOG=debug` to see default injection and id sync.
//! Sample documents live in `demos/roundtrip/data/`.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use tracing::info;

use tm_document::{
    DocumentWriter, ProjectReader, ReaderSettings, WriterSettings, write_json, write_od_csv,
};

struct Args {
    sync:     bool,
    settings: Option<PathBuf>,
    out_dir:  PathBuf,
    inputs:   Vec<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut sync = false;
    let mut settings = None;
    let mut positional = Vec::new();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--sync" => sync = true,
            "--settings" => settings = Some(PathBuf::from(args.next().context("--settings needs a path")?)),
            _ => positional.push(PathBuf::from(arg)),
        }
    }
    if !(2..=4).contains(&positional.len()) {
        bail!("usage: roundtrip [--sync] [--settings writer.json] <out_dir> <network.json> [zoning.json [demand.json]]");
    }
    let out_dir = positional.remove(0);
    Ok(Args { sync, settings, out_dir, inputs: positional })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .init();

    let args = parse_args()?;
    let writer_settings = match &args.settings {
        Some(path) => WriterSettings::from_json_path(path)
            .with_context(|| format!("loading writer settings from {}", path.display()))?,
        None => WriterSettings::default(),
    };

    let input = |i: usize| args.inputs.get(i).map(PathBuf::as_path);
    let project = ProjectReader::new(ReaderSettings { sync_ids_on_read: args.sync })
        .read_files(&args.inputs[0], input(1), input(2))
        .context("reading documents")?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;
    let out = |name: &str| -> PathBuf { args.out_dir.join(name) };
    let writer = DocumentWriter::new(writer_settings)?;

    write_json(&out("network.json"), &writer.write_network(&project.network))?;
    if let Some(zoning) = &project.zoning {
        write_json(&out("zoning.json"), &writer.write_zoning(&project.network, zoning))?;

        if let Some(demands) = &project.demands {
            let doc = writer
                .write_demands(&project.network, zoning, demands)
                .context("writing demand document")?;
            write_json(&out("demand.json"), &doc)?;
            let rows = write_od_csv(
                &out("od.csv"),
                &project.network,
                zoning,
                demands,
                writer.settings().id_mapping,
            )?;
            info!(rows, "wrote od.csv");
        }
    }

    info!(out_dir = %args.out_dir.display(), "round trip complete");
    Ok(())
}
