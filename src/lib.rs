#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod theme;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{ArcTraversal, Config, LayoutConfig, LayoutShape, load_config};
pub use ir::{Graph, Node, NodeId};
pub use layout::{Layout, LayoutError, PositionCalc, compute_layout};
pub use layout_dump::{DumpFormat, LayoutDump, write_layout_dump};
pub use parser::{SourceKind, parse_files};
pub use theme::{Color, Theme};
