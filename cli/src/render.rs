use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use serde::Serialize;
use serde_json::json;
use trackgraph_core::TrackGraph;
use trackgraph_core::string_normalization::to_file_stem;

const VIS_NETWORK_URL: &str = "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

const ARTIST_PALETTE: [&str; 12] = [
    "#97c2fc", "#ffff00", "#fb7e81", "#7be141", "#eb7df4", "#ad85e4", "#ffa807", "#6e6efd",
    "#ffc0cb", "#c2fabc", "#ee0000", "#00bfbf",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub title: String,
    pub group: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderEdge {
    pub from: String,
    pub to: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub artist: String,
    pub color: String,
}

/// Node and edge lists ready for the vis-network page.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedGraph {
    pub nodes: Vec<RenderNode>,
    pub edges: Vec<RenderEdge>,
    pub legend: Vec<LegendEntry>,
}

/// Default output location for a seed artist: `graphs/<artist>_graph.html`.
pub fn default_output_path(seed_artist: &str) -> PathBuf {
    PathBuf::from("graphs").join(format!("{}_graph.html", to_file_stem(seed_artist)))
}

pub struct GraphRenderer {
    title: String,
}

impl GraphRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }

    pub fn layout(&self, graph: &TrackGraph) -> RenderedGraph {
        let legend = artist_legend(graph);
        let colors: FxHashMap<&str, &str> = legend
            .iter()
            .map(|entry| (entry.artist.as_str(), entry.color.as_str()))
            .collect();

        // Tracks are keyed by catalog id, edges are resolved through this index
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        let mut nodes = Vec::with_capacity(graph.tracks.len());
        for track in &graph.tracks {
            if index.contains_key(track.id.as_str()) {
                continue;
            }
            index.insert(track.id.as_str(), nodes.len());
            nodes.push(RenderNode {
                id: track.id.clone(),
                label: track.name.clone(),
                title: format!(
                    "{} ({})\n{}",
                    track.name,
                    track.artist_name,
                    track.artist_genres.join(", ")
                ),
                group: track.artist_name.clone(),
                color: colors
                    .get(track.artist_name.as_str())
                    .copied()
                    .unwrap_or(ARTIST_PALETTE[0])
                    .to_string(),
            });
        }

        let edges = graph
            .edges
            .iter()
            .filter(|edge| {
                index.contains_key(edge.track1_id.as_str()) && index.contains_key(edge.track2_id.as_str())
            })
            .map(|edge| RenderEdge {
                from: edge.track1_id.clone(),
                to: edge.track2_id.clone(),
                title: edge.shared_genres.join(", "),
            })
            .collect();

        RenderedGraph { nodes, edges, legend }
    }

    pub fn render_html(&self, graph: &TrackGraph) -> io::Result<String> {
        let rendered = self.layout(graph);
        let nodes = script_json(&serde_json::to_string(&rendered.nodes).map_err(io::Error::other)?);
        let edges = script_json(&serde_json::to_string(&rendered.edges).map_err(io::Error::other)?);
        let options = script_json(&network_options().to_string());
        let legend_items: String = rendered
            .legend
            .iter()
            .map(|entry| {
                format!(
                    r#"<div style="margin-bottom:4px;"><span style="display:inline-block;width:10px;height:10px;background:{};border-radius:2px;margin-right:6px;"></span>{}</div>"#,
                    entry.color,
                    escape_html(&entry.artist)
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(PAGE_TEMPLATE
            .replace("{{TITLE}}", &escape_html(&self.title))
            .replace("{{VIS_NETWORK_URL}}", VIS_NETWORK_URL)
            .replace("{{LEGEND}}", &legend_items)
            .replace("{{NODES}}", &nodes)
            .replace("{{EDGES}}", &edges)
            .replace("{{OPTIONS}}", &options))
    }

    /// Writes the page, creating parent directories as needed.
    pub fn write_html(&self, graph: &TrackGraph, path: &Path) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let html = self.render_html(graph)?;
        fs::write(path, html)
    }
}

pub fn write_json(graph: &TrackGraph, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(graph).map_err(io::Error::other)?;
    fs::write(path, json)
}

fn artist_legend(graph: &TrackGraph) -> Vec<LegendEntry> {
    let mut artists: Vec<&str> = graph.tracks.iter().map(|track| track.artist_name.as_str()).collect();
    artists.sort_unstable();
    artists.dedup();

    artists
        .into_iter()
        .enumerate()
        .map(|(position, artist)| LegendEntry {
            artist: artist.to_string(),
            color: ARTIST_PALETTE[position % ARTIST_PALETTE.len()].to_string(),
        })
        .collect()
}

fn network_options() -> serde_json::Value {
    json!({
        "nodes": {
            "shape": "dot",
            "size": 10,
            "font": { "color": "white" },
            "borderWidth": 2
        },
        "edges": {
            "color": { "color": "#555", "highlight": "#ffffff" },
            "width": 1,
            "smooth": false
        },
        "interaction": {
            "hover": true,
            "multiselect": false,
            "dragNodes": true
        },
        "physics": {
            "enabled": true,
            "stabilization": { "enabled": true, "iterations": 400 },
            "forceAtlas2Based": {
                "gravitationalConstant": -120,
                "centralGravity": 0.01,
                "springLength": 250,
                "springConstant": 0.01,
                "avoidOverlap": 0.5
            },
            "minVelocity": 0.75,
            "solver": "forceAtlas2Based"
        }
    })
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Keeps JSON embedded in a `<script>` block from closing it early.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

const PAGE_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{{TITLE}}</title>
<script src="{{VIS_NETWORK_URL}}"></script>
<style>
  html, body { margin: 0; height: 100%; background: #111; }
  #network { width: 100%; height: 800px; background: #111; }
</style>
</head>
<body>
<div id="network"></div>

<div id="legend" style="
    position: fixed;
    top: 20px;
    left: 20px;
    background: rgba(0,0,0,0.75);
    backdrop-filter: blur(4px);
    color: white;
    padding: 10px 14px;
    border-radius: 10px;
    font-family: -apple-system, BlinkMacSystemFont, sans-serif;
    font-size: 13px;
    max-height: 300px;
    overflow-y: auto;
    z-index: 10000;
    cursor: move;
">
  <div style="font-weight:600;margin-bottom:6px;">Artists</div>
  {{LEGEND}}
</div>

<script>
(function() {
  const nodes = new vis.DataSet({{NODES}});
  const edges = new vis.DataSet({{EDGES}});
  const options = {{OPTIONS}};
  new vis.Network(document.getElementById('network'), { nodes: nodes, edges: edges }, options);
})();

(function() {
  const el = document.getElementById('legend');
  let isDown = false;
  let offsetX = 0;
  let offsetY = 0;

  el.addEventListener('mousedown', function(e) {
    isDown = true;
    offsetX = e.clientX - el.offsetLeft;
    offsetY = e.clientY - el.offsetTop;
  });

  document.addEventListener('mouseup', function() {
    isDown = false;
  });

  document.addEventListener('mousemove', function(e) {
    if (!isDown) return;
    el.style.left = (e.clientX - offsetX) + 'px';
    el.style.top = (e.clientY - offsetY) + 'px';
  });
})();
</script>
</body>
</html>
"#;
