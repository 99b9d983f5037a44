use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutDump {
    pub shape: String,
    pub width: i32,
    pub height: i32,
    pub center: [i32; 2],
    pub nodes: Vec<NodeDump>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDump {
    pub index: usize,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub color: String,
    pub child_count: usize,
    pub children: Vec<String>,
    pub child_positions: Vec<[i32; 2]>,
}

impl LayoutDump {
    /// Nodes are listed in creation order.
    pub fn from_layout(layout: &Layout) -> Self {
        let mut nodes: Vec<NodeDump> = layout
            .nodes
            .values()
            .map(|node| NodeDump {
                index: node.index,
                name: node.name.clone(),
                x: node.x,
                y: node.y,
                color: node.color.to_hex(),
                child_count: node.child_count(),
                children: node.children.clone(),
                child_positions: node.child_positions.iter().map(|p| [p.x, p.y]).collect(),
            })
            .collect();
        nodes.sort_by_key(|node| node.index);

        LayoutDump {
            shape: format!("{:?}", layout.shape).to_lowercase(),
            width: layout.width,
            height: layout.height,
            center: [layout.center.x, layout.center.y],
            nodes,
        }
    }

    /// One line per node: `index: name (x, y): child, child,`
    pub fn to_text(&self) -> String {
        let mut out = format!(
            "{} layout {}x{} centered at ({}, {})\n",
            self.shape, self.width, self.height, self.center[0], self.center[1]
        );
        for node in &self.nodes {
            out.push_str(&format!("{}: {} ({}, {}):", node.index, node.name, node.x, node.y));
            for child in &node.children {
                out.push_str(&format!(" {child},"));
            }
            out.push('\n');
        }
        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpFormat {
    Json,
    Text,
}

/// Writes the dump to `path`, or to stdout when `path` is `None`.
pub fn write_layout_dump(path: Option<&Path>, layout: &Layout, format: DumpFormat) -> anyhow::Result<()> {
    let dump = LayoutDump::from_layout(layout);
    match path {
        Some(path) => {
            let file = File::create(path)?;
            write_dump(BufWriter::new(file), &dump, format)
        }
        None => write_dump(io::stdout().lock(), &dump, format),
    }
}

fn write_dump<W: Write>(mut writer: W, dump: &LayoutDump, format: DumpFormat) -> anyhow::Result<()> {
    match format {
        DumpFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, dump)?;
            writeln!(writer)?;
        }
        DumpFormat::Text => writer.write_all(dump.to_text().as_bytes())?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LayoutConfig, LayoutShape};
    use crate::ir::Graph;
    use crate::layout::compute_layout;
    use crate::theme::Color;

    fn sample() -> Layout {
        let mut graph = Graph::new();
        graph.create_node("b", "root", Color::rgb(1, 2, 3), None);
        graph.create_node("a", "root", Color::rgb(1, 2, 3), None);
        let config = LayoutConfig {
            shape: LayoutShape::Circle,
            ..LayoutConfig::default()
        };
        compute_layout(&mut graph, &config).unwrap()
    }

    #[test]
    fn dump_keeps_creation_order() {
        let dump = LayoutDump::from_layout(&sample());
        let names: Vec<&str> = dump.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, ["root", "b", "a"]);
        assert_eq!(dump.shape, "circle");
        assert_eq!(dump.nodes[0].child_count, 2);
        assert_eq!(dump.nodes[0].color, "#010203");
    }

    #[test]
    fn text_lists_children() {
        let text = LayoutDump::from_layout(&sample()).to_text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "circle layout 300x300 centered at (150, 150)");
        assert_eq!(lines[1], "0: root (285, 150): b, a,");
        assert!(lines[2].starts_with("1: b ("));
        assert!(lines[2].ends_with("):"));
    }

    #[test]
    fn json_uses_camel_case() {
        let mut buf = Vec::new();
        write_dump(&mut buf, &LayoutDump::from_layout(&sample()), DumpFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["width"], 300);
        assert_eq!(value["nodes"][0]["childCount"], 2);
        assert_eq!(value["nodes"][0]["childPositions"].as_array().unwrap().len(), 2);
    }
}
