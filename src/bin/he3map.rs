/// Map file tool.
///
/// Usage:
///   cargo run --bin he3map -- decompress <map_file> <raw_output>
///   cargo run --bin he3map -- compress   <raw_file> <map_output>
///   cargo run --bin he3map -- info       <map_file>
///
/// Set `RUST_LOG=debug` for codec tracing.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use he3map::{raw_compress, raw_decompress, MapReader, TerrainType};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage:");
        eprintln!("  he3map decompress <map_file> <raw_output>");
        eprintln!("  he3map compress   <raw_file> <map_output>");
        eprintln!("  he3map info       <map_file>");
        std::process::exit(2);
    }

    let cmd = args[1].as_str();
    let input = Path::new(&args[2]);

    match (cmd, args.get(3)) {
        ("decompress", Some(output)) => decompress(input, Path::new(output)),
        ("compress", Some(output)) => compress(input, Path::new(output)),
        ("info", _) => info(input),
        ("decompress" | "compress", None) => bail!("{cmd} needs an output path"),
        _ => bail!("Unknown command: {cmd}"),
    }
}

fn decompress(input: &Path, output: &Path) -> Result<()> {
    let transport = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let raw = raw_decompress(&transport)
        .with_context(|| format!("decompressing {}", input.display()))?;
    fs::write(output, &raw).with_context(|| format!("writing {}", output.display()))?;
    println!("{} -> {} ({} bytes)", input.display(), output.display(), raw.len());
    Ok(())
}

fn compress(input: &Path, output: &Path) -> Result<()> {
    let raw = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let transport = raw_compress(&raw)?;
    fs::write(output, &transport).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "{} -> {} ({} -> {} bytes)",
        input.display(),
        output.display(),
        raw.len(),
        transport.len()
    );
    Ok(())
}

fn info(input: &Path) -> Result<()> {
    let transport = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
    let mut reader = MapReader::from_transport(&transport);
    let doc = reader
        .read()
        .with_context(|| format!("decoding {}", input.display()))?;

    println!("Title:   {}", doc.title);
    println!("Author:  {}", doc.author);
    println!("Version: {}", doc.version);
    println!("Size:    {} x {}", doc.width(), doc.depth());
    println!("Style:   {:?}", doc.style.to_bytes());

    let histogram = doc.terrain_histogram();
    for terrain in TerrainType::ALL {
        let count = histogram[terrain as usize];
        if count > 0 {
            println!("  {:<9} {}", terrain.name(), count);
        }
    }

    let armies = doc
        .tiles()
        .iter()
        .filter(|t| t.infantry.is_present() || t.artillery.is_present())
        .count();
    let ports = doc
        .iter_tiles()
        .filter(|&(x, z, _)| doc.is_port(x, z))
        .count();
    println!("Tiles with armies: {armies}");
    println!("Ports: {ports}");

    for (x, z, tile) in doc.iter_tiles() {
        if let Some(name) = tile.city_name.as_deref().filter(|n| !n.is_empty()) {
            println!("  ({x:>3}, {z:>3}) {:<8} {name}", tile.terrain.name());
        }
    }

    for notification in reader.notifications() {
        println!("note: {notification}");
    }
    Ok(())
}
