use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use survey_mesh::{
    centering::CenteringMode,
    config::{read_catalog_config, CatalogConfig},
    filter::FilterReport,
    geometry::Point3,
    io::{
        export::{write_surface_obj, write_surfaces_json},
        DirectorySource,
    },
    surface::{nickname_for, parse_surface_with_report},
    transform::AxisTransform,
    LoadPolicy, Surface, SurfaceCatalog, SurfaceError,
};

fn init_logging() {
    if let Ok(path) = std::env::var("SURVEY_MESH_LOG") {
        match File::create(&path) {
            Ok(file) => {
                env_logger::Builder::from_default_env()
                    .target(env_logger::Target::Pipe(Box::new(file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Failed to create log file {}: {}", path, e);
                env_logger::Builder::from_default_env().init();
            }
        }
    } else {
        env_logger::Builder::from_default_env().init();
    }
}

fn print_offset(label: &str, offset: Point3) {
    println!("{label}: {:.3},{:.3},{:.3}", offset.x, offset.y, offset.z);
}

/// Builds aligned, texture mapped meshes from LandXML surfaces.
#[derive(Parser)]
#[command(name = "survey_mesh_cli", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Mesh policy flags shared by every command.
#[derive(Args, Clone)]
struct PolicyArgs {
    /// Keep faces flagged invisible (i="1").
    #[arg(long)]
    keep_invisible: bool,
    /// Drop faces that lie on the surface boundary.
    #[arg(long)]
    exclude_boundary: bool,
    /// Texture repeat count across the surface extent.
    #[arg(long)]
    tiling: Option<f64>,
    /// Keep source axis order instead of converting to y-up.
    #[arg(long)]
    no_transform: bool,
    /// Center each surface on itself rather than on the first one.
    #[arg(long, conflicts_with = "no_center")]
    per_surface: bool,
    /// Leave coordinates untranslated.
    #[arg(long)]
    no_center: bool,
}

impl PolicyArgs {
    fn apply(&self, base: LoadPolicy) -> LoadPolicy {
        let mut policy = base;
        if self.keep_invisible {
            policy.faces.exclude_invisible = false;
        }
        if self.exclude_boundary {
            policy.faces.exclude_boundary = true;
        }
        if let Some(tiling) = self.tiling {
            policy.tiling_factor = tiling;
        }
        if self.no_transform {
            policy.transform = AxisTransform::Identity;
        }
        if self.per_surface {
            policy.centering = CenteringMode::PerSurface;
        } else if self.no_center {
            policy.centering = CenteringMode::None;
        }
        policy
    }
}

/// Where the batch comes from: a config file or a directory plus names.
#[derive(Args, Clone)]
struct BatchArgs {
    /// JSON file with `root`, `sources` and `policy`.
    #[arg(long)]
    config: Option<String>,
    /// Directory the sources are read from.
    #[arg(long)]
    root: Option<PathBuf>,
    /// Source file names, loaded in order.
    sources: Vec<String>,
    #[command(flatten)]
    policy: PolicyArgs,
}

impl BatchArgs {
    fn resolve(&self) -> Result<CatalogConfig, SurfaceError> {
        let mut config = match &self.config {
            Some(path) => read_catalog_config(path)?,
            None => CatalogConfig::new(PathBuf::from("."), Vec::new()),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if !self.sources.is_empty() {
            config.sources = self.sources.clone();
        }
        if config.sources.is_empty() {
            return Err(SurfaceError::Config("no sources given".into()));
        }
        config.policy = self.policy.apply(config.policy);
        Ok(config)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one LandXML surface and print mesh statistics.
    Inspect {
        path: String,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Load a batch of surfaces and print one line per surface.
    Load(BatchArgs),
    /// Load a batch and write all surfaces to a JSON file.
    ExportJson {
        output: String,
        #[command(flatten)]
        batch: BatchArgs,
    },
    /// Mesh one LandXML surface and write it as Wavefront OBJ.
    ExportObj {
        path: String,
        output: String,
        #[command(flatten)]
        policy: PolicyArgs,
    },
}

fn load_batch(args: &BatchArgs) -> Result<SurfaceCatalog<DirectorySource>, SurfaceError> {
    let config = args.resolve()?;
    log::info!(
        "loading {} sources from {}",
        config.sources.len(),
        config.root.display()
    );
    let mut catalog = SurfaceCatalog::new(config.byte_source());
    catalog.load_all(&config.sources, &config.policy)?;
    Ok(catalog)
}

fn report_batch(catalog: &SurfaceCatalog<DirectorySource>) {
    for s in catalog.objects() {
        println!(
            "{}: {} triangles, {} points",
            s.name,
            s.triangle_count(),
            s.metadata.point_count.unwrap_or(0)
        );
    }
    for f in catalog.failures() {
        println!("Skipped {}: {}", f.source_id, f.message);
    }
    match catalog.alignment_offset() {
        Some(offset) => print_offset("Offset", offset),
        None => println!("Offset: none"),
    }
}

/// Meshes a single file, keeping the filter counters for reporting.
fn mesh_file(path: &str, policy: &PolicyArgs) -> Result<(Surface, FilterReport), SurfaceError> {
    let policy = policy.apply(LoadPolicy::default());
    let bytes = std::fs::read(path).map_err(|e| SurfaceError::from_io(path, e))?;
    let (mut surface, report) = parse_surface_with_report(&bytes, &policy)?;
    let nickname = nickname_for(path);
    log::info!("meshed {path}: {} triangles", surface.triangle_count());
    surface.name = nickname.clone();
    surface.metadata.nickname = Some(nickname);
    surface.metadata.source_name = Some(path.to_string());
    Ok((surface, report))
}

fn run(cli: Cli) -> Result<(), SurfaceError> {
    match cli.command {
        Commands::Inspect { path, policy } => {
            let (surface, report) = mesh_file(&path, &policy)?;
            println!("Points: {}", surface.metadata.point_count.unwrap_or(0));
            println!("Triangles: {}", surface.triangle_count());
            println!(
                "Dropped: {} invisible, {} boundary, {} malformed, {} missing points",
                report.dropped_invisible,
                report.dropped_boundary,
                report.dropped_malformed,
                report.missing_points.len()
            );
            for m in &report.missing_points {
                println!("Missing point {} in face {}", m.point_id, m.face_index);
            }
            print_offset("Offset", surface.offset);
        }
        Commands::Load(batch) => {
            let catalog = load_batch(&batch)?;
            report_batch(&catalog);
        }
        Commands::ExportJson { output, batch } => {
            let catalog = load_batch(&batch)?;
            report_batch(&catalog);
            write_surfaces_json(&output, catalog.objects(), catalog.alignment_offset())
                .map_err(|e| SurfaceError::from_io(&output, e))?;
            log::info!("wrote json export {output}");
            println!("Wrote {} surfaces to {}", catalog.objects().len(), output);
        }
        Commands::ExportObj {
            path,
            output,
            policy,
        } => {
            let (surface, _) = mesh_file(&path, &policy)?;
            write_surface_obj(&output, &surface).map_err(|e| SurfaceError::from_io(&output, e))?;
            log::info!("wrote obj export {output}");
            println!("Wrote {} triangles to {}", surface.triangle_count(), output);
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
