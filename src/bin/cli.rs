//! Undigraph CLI 工具
//!
//! 构建图、读取边对并输出邻接列表和度数统计

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use undigraph::cli::{PrintMode, Printer};
use undigraph::graph::{Graph, VertexId};
use undigraph::import::{parse_vertex, EdgeReader};

#[derive(Parser, Debug)]
#[command(name = "undigraph-cli")]
#[command(about = "无向图命令行工具")]
struct Args {
    /// 初始顶点数
    #[arg(short = 'n', long, default_value = "4")]
    vertices: usize,

    /// 批量连边，格式 <顶点>:<邻居,...>，例如 0:3,1
    #[arg(short, long, value_parser = parse_attachment)]
    attach: Vec<Attachment>,

    /// 边对输入文件（默认读取标准输入）
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// 最多读取的边对数
    #[arg(short, long)]
    limit: Option<usize>,

    /// 在统计之后输出指定顶点的度数，可重复
    #[arg(short, long, value_parser = parse_degree_target)]
    degree: Vec<VertexId>,

    /// 统计输出格式
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Table,
    Json,
}

impl From<Format> for PrintMode {
    fn from(format: Format) -> Self {
        match format {
            Format::Table => PrintMode::Table,
            Format::Json => PrintMode::Json,
        }
    }
}

#[derive(Clone, Debug)]
struct Attachment {
    target: VertexId,
    edges: Vec<VertexId>,
}

fn parse_attachment(s: &str) -> Result<Attachment, String> {
    let (target, edges) = s
        .split_once(':')
        .ok_or_else(|| format!("缺少 ':' 分隔符: {}", s))?;
    let target = parse_vertex(target).map_err(|e| e.to_string())?;
    let edges = edges
        .split(',')
        .filter(|e| !e.trim().is_empty())
        .map(parse_vertex)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| e.to_string())?;
    Ok(Attachment { target, edges })
}

fn parse_degree_target(s: &str) -> Result<VertexId, String> {
    parse_vertex(s).map_err(|e| e.to_string())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let printer = Printer::new(args.format.into());

    let mut graph = Graph::with_vertices(args.vertices);
    for attachment in &args.attach {
        graph
            .add_edges(attachment.target, &attachment.edges)
            .with_context(|| format!("无法为顶点 {} 连边", attachment.target))?;
    }

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "graph")?;
    write!(stdout, "{}", printer.adjacency(&graph))?;
    stdout.flush()?;

    let mut reader = EdgeReader::new(&mut graph);
    if let Some(limit) = args.limit {
        reader = reader.with_limit(limit);
    }
    let stats = match &args.input {
        Some(path) => reader
            .read_file(path)
            .with_context(|| format!("读取 {:?} 失败", path))?,
        None => {
            eprintln!("输入边对 (v e)，以 EOF 结束");
            reader.read_pairs(io::stdin().lock())?
        }
    };
    eprint!("{}", printer.import_summary(&stats));

    writeln!(stdout, "adjacency list")?;
    write!(stdout, "{}", printer.adjacency(&graph))?;
    writeln!(stdout, "{}", printer.stats(&graph.stats())?)?;
    let degrees = printer
        .degrees(&graph, &args.degree)
        .context("无法查询顶点度数")?;
    write!(stdout, "{}", degrees)?;

    Ok(())
}
