// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` Material Editor - headless host
//!
//! Loads an editor configuration and a material, lays the material out as a
//! node graph, wires a literal into the demo material and prints the
//! resulting layout and editor log.
//!
//! ```text
//! ordoplay_material_editor [--config editor.ron] [material.ron]
//! ```

use ordoplay_material_editor::{EditorConfig, EditorSignal, GraphEditor, LogEntry, Severity};
use ordoplay_material_graph::{GraphError, MaterialGraph};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Host errors
#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Invalid arguments: {0}")]
    Usage(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Block has no point named {0}")]
    MissingPoint(String),

    #[error(transparent)]
    Config(#[from] ordoplay_material_editor::ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Editor(#[from] ordoplay_material_editor::EditorError),
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    material: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args, AppError> {
    let mut parsed = Args::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::Usage("--config needs a path".to_string()))?;
                parsed.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => {
                return Err(AppError::Usage(format!("unknown flag {flag}")));
            }
            _ if parsed.material.is_some() => {
                return Err(AppError::Usage("only one material may be given".to_string()));
            }
            _ => parsed.material = Some(PathBuf::from(&arg)),
        }
    }
    Ok(parsed)
}

/// Fragment output fed by a texture sampled at the mesh UVs
fn demo_material() -> Result<MaterialGraph, AppError> {
    let mut graph = MaterialGraph::new("Demo");
    let fragment = graph.add_block("fragment_output")?;
    let texture = graph.add_block("texture")?;
    let uv = graph.add_block("mesh_uv")?;

    let point = |block, name: &str, output: bool| {
        let found = if output {
            graph.output_named(block, name)
        } else {
            graph.input_named(block, name)
        };
        found.ok_or_else(|| AppError::MissingPoint(name.to_string()))
    };
    let uv_out = point(uv, "output", true)?;
    let uv_in = point(texture, "uv", false)?;
    let rgba_out = point(texture, "rgba", true)?;
    let rgba_in = point(fragment, "rgba", false)?;

    graph.connect(uv_out, uv_in)?;
    graph.connect(rgba_out, rgba_in)?;
    graph.add_output_root(fragment);
    Ok(graph)
}

/// Feed a Float literal into the fragment output's alpha
fn wire_alpha(editor: &mut GraphEditor<MaterialGraph>) -> Result<(), AppError> {
    let Some(fragment) = editor
        .model()
        .nodes()
        .find(|node| node.title == "Fragment Output")
        .map(|node| node.id)
    else {
        tracing::warn!("No fragment output in the material, skipping literal");
        return Ok(());
    };

    let literal = editor.construct_literal("Float", 1)?;
    let alpha = editor
        .model()
        .node(fragment)
        .and_then(|node| node.inputs.iter().find(|port| port.name == "a"))
        .map(|port| port.port_ref());
    let value = editor
        .model()
        .node(literal)
        .and_then(|node| node.outputs.first())
        .map(|port| port.port_ref());

    if let (Some(alpha), Some(value)) = (alpha, value) {
        editor.link_ports(value, alpha)?;
    }
    Ok(())
}

fn print_log(entries: &[LogEntry]) {
    for entry in entries {
        let level = match entry.severity {
            Severity::Info => "INFO",
            Severity::Error => "ERROR",
        };
        if entry.count > 1 {
            println!("[{level}] {} (x{})", entry.message, entry.count);
        } else {
            println!("[{level}] {}", entry.message);
        }
    }
}

fn run() -> Result<(), AppError> {
    let args = parse_args(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let (graph, demo) = match &args.material {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| AppError::Read {
                path: path.clone(),
                source,
            })?;
            (MaterialGraph::from_ron(&text)?, false)
        }
        None => (demo_material()?, true),
    };
    tracing::info!("Editing material {}", graph.name);

    let mut editor = GraphEditor::with_config(graph, config);
    let signals = editor.subscribe();

    editor.host_ready();
    editor.reset_and_rebuild()?;
    if demo {
        wire_alpha(&mut editor)?;
    }

    for signal in signals.try_iter() {
        if let EditorSignal::Committed { nodes, links } = signal {
            tracing::debug!("Committed {} nodes, {} links", nodes, links);
        }
    }

    println!("{}", editor.save_layout()?);
    print_log(&editor.drain_log());
    Ok(())
}

fn main() {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["ordoplay_material_editor=info", "ordoplay_material_graph=info"] {
        match directive.parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {directive}: {e}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrdoPlay Material Editor v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run() {
        tracing::error!("Material editor failed: {e}");
        std::process::exit(1);
    }
}
