//! Writes the v1 OpenAPI document, or verifies a committed copy
//!
//! Usage: cargo run --bin openapi-export -- [--check] [PATH]
//!
//! `PATH` defaults to `openapi/zbank-api.v1.json`. With `--check` nothing is
//! written and the command fails when the file differs from the current routes.

use std::{fs, path::PathBuf};

use anyhow::{bail, Context};
use zbank_api::openapi;

#[derive(Debug, PartialEq)]
struct ExportArgs {
    check: bool,
    path: PathBuf,
}

fn parse_args(args: impl IntoIterator<Item = String>) -> anyhow::Result<ExportArgs> {
    let mut check = false;
    let mut path = None;

    for arg in args {
        match arg.as_str() {
            "--check" => check = true,
            flag if flag.starts_with('-') => bail!("unknown flag {flag}"),
            _ if path.is_some() => bail!("only one output path may be given"),
            _ => path = Some(PathBuf::from(arg)),
        }
    }

    Ok(ExportArgs {
        check,
        path: path.unwrap_or_else(|| PathBuf::from(openapi::EXPORT_PATH)),
    })
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1))?;

    if args.check {
        let existing = fs::read_to_string(&args.path)
            .with_context(|| format!("reading {}", args.path.display()))?;
        if !openapi::is_current(&existing) {
            bail!(
                "{} is out of date; rerun openapi-export to regenerate it",
                args.path.display()
            );
        }
        println!("{} matches the current API", args.path.display());
        return Ok(());
    }

    let json = openapi::export_json()?;
    if let Some(dir) = args.path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    fs::write(&args.path, json).with_context(|| format!("writing {}", args.path.display()))?;

    println!("OpenAPI document written to {}", args.path.display());
    Ok(())
}
