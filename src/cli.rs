use crate::config::{ArcTraversal, LayoutShape, load_config};
use crate::ir::Graph;
use crate::layout::{Size, compute_layout};
use crate::layout_dump::{DumpFormat, write_layout_dump};
use crate::parser::parse_files;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "nodemap", version, about = "Lay out XML element trees and C++ include graphs")]
pub struct Args {
    /// Input files (.xml, or C/C++ sources and headers)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Layout shape
    #[arg(short = 's', long = "shape", value_enum)]
    pub shape: Option<ShapeArg>,

    /// Config JSON5 file (layout settings and themeVariables)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Output file. Defaults to stdout.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// How the distributed layout walks away from the hub
    #[arg(long = "traversal", value_enum)]
    pub traversal: Option<TraversalArg>,

    /// Scale the result to WIDTHxHEIGHT
    #[arg(long = "fit", value_parser = parse_size)]
    pub fit: Option<Size>,

    /// More logging (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum ShapeArg {
    Circle,
    Distributed,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum TraversalArg {
    DepthFirst,
    LevelOrder,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Text,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = load_config(args.config.as_deref())?;
    if let Some(shape) = args.shape {
        config.layout.shape = match shape {
            ShapeArg::Circle => LayoutShape::Circle,
            ShapeArg::Distributed => LayoutShape::Distributed,
        };
    }
    if let Some(traversal) = args.traversal {
        config.layout.distributed.traversal = match traversal {
            TraversalArg::DepthFirst => ArcTraversal::DepthFirst,
            TraversalArg::LevelOrder => ArcTraversal::LevelOrder,
        };
    }
    if args.fit.is_some() {
        config.layout.fit = args.fit;
    }

    let mut graph = Graph::new();
    parse_files(&args.files, &mut graph, &config.theme)?;
    let layout = compute_layout(&mut graph, &config.layout)?;

    let format = match args.output_format {
        OutputFormat::Json => DumpFormat::Json,
        OutputFormat::Text => DumpFormat::Text,
    };
    write_layout_dump(args.output.as_deref(), &layout, format)?;
    Ok(())
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .try_init();
}

fn parse_size(value: &str) -> Result<Size, String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let width: i32 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let height: i32 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if width <= 0 || height <= 0 {
        return Err(format!("size must be positive, got {width}x{height}"));
    }
    Ok(Size::new(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_fit_size() {
        assert_eq!(parse_size("800x600"), Ok(Size::new(800, 600)));
        assert_eq!(parse_size("10X20"), Ok(Size::new(10, 20)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x5").is_err());
        assert!(parse_size("ax5").is_err());
    }

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "nodemap",
            "-s",
            "circle",
            "--traversal",
            "depth-first",
            "-e",
            "text",
            "--fit",
            "640x480",
            "-vv",
            "a.xml",
        ])
        .unwrap();
        assert!(matches!(args.shape, Some(ShapeArg::Circle)));
        assert!(matches!(args.traversal, Some(TraversalArg::DepthFirst)));
        assert!(matches!(args.output_format, OutputFormat::Text));
        assert_eq!(args.fit, Some(Size::new(640, 480)));
        assert_eq!(args.verbose, 2);
        assert_eq!(args.files, [PathBuf::from("a.xml")]);
    }

    #[test]
    fn files_are_required() {
        assert!(Args::try_parse_from(["nodemap"]).is_err());
    }
}
