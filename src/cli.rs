use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, ValueEnum};

use crate::config::load_config;
use crate::engine::ConnectorEngine;
use crate::render::{render_overlay_svg, write_output_svg};
use crate::scene::Scene;
use crate::topology::organogram_topology;

#[derive(Parser, Debug)]
#[command(
    name = "orgconn",
    version,
    about = "Organogram connector overlay renderer (scene JSON in, SVG/PNG out)"
)]
pub struct Args {
    /// Scene file (.json) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (connector/theme overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Export the pre-animation state (every stroke fully hidden) instead
    /// of the settled, fully drawn chart
    #[arg(long = "hidden", default_value_t = false)]
    pub hidden: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let input = read_input(args.input.as_deref())?;
    let scene = Scene::from_json(&input)?;
    let registry = scene.build_registry();
    let topology = scene
        .topology
        .clone()
        .unwrap_or_else(|| organogram_topology(&config.connector));

    let mut engine = ConnectorEngine::new(registry, topology, config.connector.clone());

    // Drive the cooperative loop to its settled state: ready, one settle
    // pass, then (unless --hidden) the staggered reveal to completion.
    let mut now = 0.0;
    engine.set_ready(now);
    if !args.hidden {
        engine.set_visible(now);
    }
    while let Some(deadline) = engine.next_deadline() {
        now = deadline;
        engine.poll(&scene, now);
    }

    let svg = render_overlay_svg(&engine, &config.theme);
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            #[cfg(feature = "png")]
            {
                let output = ensure_output(&args.output, "png")?;
                crate::render::write_output_png(&svg, &output, &config.theme, &config.render)?;
            }
            #[cfg(not(feature = "png"))]
            return Err(anyhow::anyhow!(
                "PNG output requires the `png` feature"
            ));
        }
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(feature = "png")]
fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
