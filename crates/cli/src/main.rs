use anyhow::{anyhow, bail, Context};
use config::{Config, File};
use hexmap::{
    grid_to_svg, outlines, timed, BoundaryEdge, GridConfig, HexCoordinate,
    HexGrid, Outline, Overlay, Point2,
};
use log::{info, LevelFilter};
use serde::Serialize;
use simple_logger::SimpleLogger;
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
    process,
    str::FromStr,
};
use structopt::StructOpt;
use strum::{Display, EnumString};

/// CLI for building hex grids and rendering them, along with optional area
/// overlays.
#[derive(Debug, StructOpt)]
#[structopt(name = "hexmap")]
struct Opt {
    /// Path to a config file that defines the grid. Supported formats: JSON,
    /// TOML
    #[structopt(short, long)]
    config: PathBuf,

    /// If given, output files will be saved to this directory. The exact
    /// files that appear in the directory are defined by the output formats.
    /// See `--output-formats` for more info
    #[structopt(short, long)]
    output: Option<PathBuf>,

    /// The format(s) to output the grid in. Supported formats:
    ///
    /// cfg - The full config object used for the grid, in TOML format
    ///
    /// json - Every cell with its world-space center and corners, plus the
    ///   boundary outlines
    ///
    /// svg - 2D rendering of the grid
    #[structopt(short = "f", long)]
    output_formats: Vec<OutputFormat>,

    /// Center cell of an area overlay, as `q,r`. If given, the overlay is
    /// included in JSON and SVG output.
    #[structopt(long)]
    center: Option<CoordinateArg>,

    /// Diameter of the area overlay, in cells. Only used with `--center`.
    #[structopt(long, default_value = "1")]
    diameter: u32,

    /// The logging level to use. See
    /// https://docs.rs/log/0.4.11/log/enum.LevelFilter.html for options
    #[structopt(long, default_value = "info")]
    log_level: LevelFilter,
}

/// Different output formats.
#[derive(Copy, Clone, Debug, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
enum OutputFormat {
    // If you change this, make sure to update the help text for
    // `--output-formats`!
    /// Export the grid's full config in a human-readable file
    Cfg,
    /// Export the grid's cells and boundary in JSON
    Json,
    /// Render the grid as a 2D SVG
    Svg,
    /* If you change this, make sure to update the help text for
     * `--output-formats`! */
}

impl OutputFormat {
    fn file_ext(self) -> &'static str {
        match self {
            Self::Cfg => "toml",
            Self::Json => "json",
            Self::Svg => "svg",
        }
    }
}

/// A hex coordinate parsed from a `q,r` command line argument
#[derive(Copy, Clone, Debug)]
struct CoordinateArg(HexCoordinate);

impl FromStr for CoordinateArg {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (q, r) = s.split_once(',').ok_or_else(|| {
            anyhow!("invalid coordinate {:?}, expected format q,r", s)
        })?;
        let q = q.trim().parse().context("invalid q component")?;
        let r = r.trim().parse().context("invalid r component")?;
        Ok(Self(HexCoordinate::new(q, r)))
    }
}

/// JSON form of a single cell
#[derive(Debug, Serialize)]
struct CellOutput {
    position: HexCoordinate,
    center: Point2,
    corners: Vec<Point2>,
}

/// JSON form of a whole grid
#[derive(Debug, Serialize)]
struct GridOutput<'a> {
    config: &'a GridConfig,
    cells: Vec<CellOutput>,
    boundary: Vec<BoundaryEdge>,
    outlines: Vec<Outline>,
    overlay: Option<&'a Overlay>,
}

fn load_config(config_path: &Path) -> anyhow::Result<GridConfig> {
    // Load config
    let mut settings = Config::new();
    let config_path = config_path.to_str().ok_or_else(|| {
        anyhow!("invalid character in path {:?}", config_path)
    })?;
    settings
        .merge(File::with_name(config_path))
        .context("error reading config file")?;
    settings.try_into().context("error reading config")
}

/// Generate the bytes for one output format
fn generate_bytes(
    output_format: OutputFormat,
    config: &GridConfig,
    grid: &HexGrid,
    overlay: Option<&Overlay>,
) -> anyhow::Result<Vec<u8>> {
    Ok(match output_format {
        OutputFormat::Cfg => {
            // Serialize just the grid config via toml
            toml::to_string_pretty(config)
                .context("error serializing config")?
                .into_bytes()
        }
        OutputFormat::Json => {
            let layout = grid.layout();
            let cells = grid
                .iter()?
                .map(|position| CellOutput {
                    position,
                    center: layout.to_world(position),
                    corners: layout.corners(position).to_vec(),
                })
                .collect();
            let boundary = hexmap::extract(grid)?;
            let outlines = outlines(&boundary);
            serde_json::to_vec_pretty(&GridOutput {
                config,
                cells,
                boundary,
                outlines,
                overlay,
            })?
        }
        OutputFormat::Svg => {
            // Render the grid in 2D
            grid_to_svg(grid, overlay)?.to_string().into_bytes()
        }
    })
}

/// Generate an output form of the grid in the given format, and write it to
/// a file in the output dir.
fn gen_output(
    output_dir: &Path,
    output_format: OutputFormat,
    config: &GridConfig,
    grid: &HexGrid,
    overlay: Option<&Overlay>,
) -> anyhow::Result<()> {
    let output_file_path = output_dir
        .join("grid")
        .with_extension(output_format.file_ext());

    timed!(
        format!(
            "Generating {} output and writing to {:?}",
            output_format, &output_file_path
        ),
        log::Level::Info,
        {
            let bytes = generate_bytes(output_format, config, grid, overlay)?;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&output_file_path)
                .with_context(|| {
                    format!("error opening output file {:?}", &output_file_path)
                })?;
            file.write_all(&bytes).with_context(|| {
                format!("error writing to file {:?}", &output_file_path)
            })?;
        }
    );

    Ok(())
}

/// Run the CLI with some options
fn run(opt: Opt) -> anyhow::Result<()> {
    SimpleLogger::new().with_level(opt.log_level).init()?;

    let config = load_config(&opt.config)?;
    let grid = HexGrid::new(config).context("invalid grid config")?;
    match grid.len() {
        Some(len) => info!("Loaded grid with {} cells", len),
        None => info!("Loaded unbounded grid"),
    }

    let overlay = match opt.center {
        Some(CoordinateArg(center)) => {
            let overlay = Overlay::new(&grid, center, opt.diameter)?;
            info!(
                "Overlay at {} with diameter {} covers {} cells",
                center,
                opt.diameter,
                overlay.cells.len()
            );
            Some(overlay)
        }
        None => None,
    };

    // If an output dir was specified, write out output format(s) there
    if let Some(output_dir) = opt.output {
        if opt.output_formats.is_empty() {
            bail!("output dir was specified, but no output formats were given")
        }
        fs::create_dir_all(&output_dir)?;

        for output_format in opt.output_formats {
            gen_output(
                &output_dir,
                output_format,
                &config,
                &grid,
                overlay.as_ref(),
            )?;
        }
    }

    Ok(())
}

fn main() {
    let exit_code = match run(Opt::from_args()) {
        Ok(_) => 0,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            1
        }
    };
    process::exit(exit_code);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinate() {
        let CoordinateArg(coord) = "3, -2".parse().unwrap();
        assert_eq!(coord, HexCoordinate::new(3, -2));
        assert!("3".parse::<CoordinateArg>().is_err());
        assert!("a,b".parse::<CoordinateArg>().is_err());
    }

    #[test]
    fn test_parse_output_format() {
        assert_eq!(
            "svg".parse::<OutputFormat>().unwrap().file_ext(),
            "svg"
        );
        assert_eq!(
            "cfg".parse::<OutputFormat>().unwrap().file_ext(),
            "toml"
        );
        assert!("stl".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_cfg_output_round_trip() {
        let config = GridConfig {
            shape: hexmap::ShapeConfig::Rectangle(Default::default()),
            ..Default::default()
        };
        let grid = HexGrid::new(config).unwrap();
        let bytes =
            generate_bytes(OutputFormat::Cfg, &config, &grid, None).unwrap();
        let parsed: GridConfig =
            toml::from_str(std::str::from_utf8(&bytes).unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_output() {
        let config = GridConfig {
            shape: hexmap::ShapeConfig::Rectangle(hexmap::RectangleConfig {
                width: 2,
                height: 2,
                ..Default::default()
            }),
            ..Default::default()
        };
        let grid = HexGrid::new(config).unwrap();
        let bytes =
            generate_bytes(OutputFormat::Json, &config, &grid, None).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["cells"].as_array().unwrap().len(), 4);
        assert_eq!(value["outlines"].as_array().unwrap().len(), 1);
        assert!(value["overlay"].is_null());
    }
}
