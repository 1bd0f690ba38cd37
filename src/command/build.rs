use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::command::{is_stdio, output_dir};
use crate::io_ext::to_pretty_json;
use crate::pack::{Mcpack, Request, Response};

pub fn build(input: &PathBuf, output: &Option<PathBuf>, response: bool) -> anyhow::Result<()> {
    let request = read_request(input)?;
    let mcpack = request.assemble()
        .with_context(|| format!("Failed to assemble skin pack {}", request.pack.id))?;

    if response {
        write_response(&mcpack, output)
    } else {
        let path = write_mcpack(&mcpack, &output_dir(output))?;
        info!("Wrote skin pack to: {}", path.display());
        Ok(())
    }
}

fn read_request(input: &PathBuf) -> anyhow::Result<Request> {
    if is_stdio(input) {
        info!("Reading request from stdin");
        let mut json = String::new();
        std::io::stdin().read_to_string(&mut json)
            .context("Failed to read request from stdin")?;
        return Ok(Request::from_json(&json)?);
    }

    info!("Reading request from: {}", input.display());
    let file = File::open(input)
        .with_context(|| format!("Failed to open request file {}", input.display()))?;
    Request::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read request file {}", input.display()))
}

/// Writes the archive into `dir` under its own name and returns the path.
pub fn write_mcpack(mcpack: &Mcpack, dir: &Path) -> anyhow::Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
    let path = dir.join(&mcpack.name);
    std::fs::write(&path, &mcpack.bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

/// Writes the `{name, content}` response, to stdout unless an output directory was given.
fn write_response(mcpack: &Mcpack, output: &Option<PathBuf>) -> anyhow::Result<()> {
    let response = Response::from(mcpack);
    let json = to_pretty_json(&response)
        .context("Failed to encode response")?;

    match output {
        Some(dir) if !is_stdio(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
            let path = dir.join(Path::new(&mcpack.name).with_extension("json"));
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote response to: {}", path.display());
        }
        _ => {
            let mut stdout = BufWriter::new(std::io::stdout().lock());
            stdout.write_all(&json).context("Failed to write response")?;
            stdout.write_all(b"\n").context("Failed to write response")?;
            stdout.flush().context("Failed to write response")?;
        }
    }

    Ok(())
}
