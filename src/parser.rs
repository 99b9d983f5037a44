use crate::ir::Graph;
use crate::theme::{Color, Theme};
use anyhow::{Context, Result, bail};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

static INCLUDE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#include").unwrap());
// First opening delimiter to the last closing one.
static INCLUDE_NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[<"](?P<path>.*)[>"]"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Xml,
    Cpp,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "xml" => Some(SourceKind::Xml),
            "cpp" | "cc" | "c" | "cxx" | "h" | "hpp" => Some(SourceKind::Cpp),
            _ => None,
        }
    }
}

/// Reads every file in order and adds what it finds to `graph`.
///
/// All files must be of the same kind; that kind is returned.
pub fn parse_files<P: AsRef<Path>>(paths: &[P], graph: &mut Graph, theme: &Theme) -> Result<SourceKind> {
    let mut kind = None;
    for path in paths {
        let path = path.as_ref();
        let Some(found) = SourceKind::from_path(path) else {
            bail!("unsupported file type: {}", path.display());
        };
        match kind {
            Some(expected) if expected != found => bail!(
                "cannot mix {expected:?} and {found:?} inputs ({})",
                path.display()
            ),
            _ => kind = Some(found),
        }
    }
    let Some(kind) = kind else {
        bail!("no input files");
    };

    for path in paths {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        log::debug!("parsing {} as {kind:?}", path.display());
        match kind {
            SourceKind::Xml => parse_xml(&input, graph, theme)
                .with_context(|| format!("failed to parse {}", path.display()))?,
            SourceKind::Cpp => {
                let file_name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                parse_cpp(&file_name, &input, graph, theme);
            }
        }
    }
    log::info!("parsed {} file(s) into {} nodes", paths.len(), graph.len());
    Ok(kind)
}

/// Every element becomes a node below its enclosing element. Siblings share
/// a color; each level down steps the hue once more.
pub fn parse_xml(input: &str, graph: &mut Graph, theme: &Theme) -> Result<()> {
    let doc = roxmltree::Document::parse(input)?;
    let mut walker = XmlWalker {
        graph,
        color: theme.xml_start_color,
        step: theme.xml_hue_step,
    };
    walker.visit(doc.root_element(), "");
    Ok(())
}

struct XmlWalker<'g> {
    graph: &'g mut Graph,
    color: Color,
    step: i32,
}

impl XmlWalker<'_> {
    fn visit(&mut self, element: roxmltree::Node<'_, '_>, parent: &str) {
        let name = element.tag_name().name();
        self.graph.create_node(name, parent, self.color, None);

        self.color = self.color.shift_hue(self.step);
        for child in element.children().filter(|node| node.is_element()) {
            self.visit(child, name);
        }
        self.color = self.color.shift_hue(-self.step);
    }
}

/// Adds `file_name` as a node and one child per `#include` line.
pub fn parse_cpp(file_name: &str, input: &str, graph: &mut Graph, theme: &Theme) {
    let custom = theme.cpp_custom_color;
    if graph.node_by_name(file_name).is_none() {
        graph.create_standalone_node(file_name, custom);
    }

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if !INCLUDE_RE.is_match(line) {
            continue;
        }
        let Some(name) = include_name(line) else {
            log::warn!("{file_name}:{}: include without a name: {line}", line_no + 1);
            continue;
        };
        let color = if line.contains('"') {
            custom
        } else {
            theme.cpp_standard_color
        };
        graph.create_node(name, file_name, color, Some(custom));
    }
}

fn include_name(line: &str) -> Option<&str> {
    let path = INCLUDE_NAME_RE.captures(line)?.name("path")?.as_str();
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path).trim();
    (!name.is_empty()).then_some(name)
}
