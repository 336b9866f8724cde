//! peg-convert - Pegasus3d converter
//!
//! Converts OBJ meshes to Acorn shape programs (.acn)

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use peg_convert::formats::ACORN_EXT;
use peg_convert::manifest::{self, DEFAULT_MANIFEST};
use peg_convert::{mesh, OriginMode, TransformConfig, UvDimension};

#[derive(Parser)]
#[command(name = "peg-convert")]
#[command(about = "Pegasus3d converter: OBJ meshes to Acorn shapes")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a single OBJ file
    Mesh {
        /// Input OBJ file
        input: PathBuf,

        /// Output .acn file (default: input with .acn extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Degrees clockwise to rotate the model, looking down from the top
        #[arg(long, allow_negative_numbers = true)]
        rotate: Option<f32>,

        /// Translate the model so 0,0,0 sits at its bottom center or center
        #[arg(long, value_enum)]
        origin: Option<OriginMode>,

        /// Scale evenly so the model's total height is as specified
        #[arg(long)]
        height: Option<f32>,

        /// Number of uv values per vertex
        #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(2..=3))]
        uv: u8,
    },

    /// Convert every mesh listed in a manifest file
    Build {
        /// Path to convert.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,

        /// Output directory (overrides manifest)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate manifest without converting
    Check {
        /// Path to convert.toml manifest
        #[arg(default_value = DEFAULT_MANIFEST)]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Mesh {
            input,
            output,
            rotate,
            origin,
            height,
            uv,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension(ACORN_EXT));

            let mut config =
                TransformConfig::default().with_uv_dimension(UvDimension::try_from(uv)?);
            if let Some(degrees) = rotate {
                config = config.with_rotation_degrees(degrees);
            }
            if let Some(origin) = origin {
                config = config.with_origin(origin);
            }
            if let Some(height) = height {
                config = config.with_target_height(height);
            }

            tracing::info!("Converting {:?} -> {:?}", input, output);
            mesh::convert_obj(&input, &output, &config)?;
            tracing::info!("Conversion successfully completed.");
        }

        Commands::Build { manifest, output } => {
            tracing::info!("Building meshes from {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::build_all(&config, output.as_deref())?;
            tracing::info!("Build complete!");
        }

        Commands::Check { manifest } => {
            tracing::info!("Checking manifest {:?}", manifest);
            let config = manifest::load_manifest(&manifest)?;
            manifest::validate(&config)?;
            tracing::info!("Manifest is valid!");
        }
    }

    Ok(())
}
