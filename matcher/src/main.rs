use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rankcore::extract::{PlainTextExtractor, TextExtractor};
use rankcore::scan::extract_folder;
use rankcore::{Document, RankedResult, TfIdfIndex, DEFAULT_TOP_K};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    text: String,
}

#[derive(Parser)]
#[command(name = "matcher")]
#[command(
    about = "Rank resumes against a job description with TF-IDF cosine similarity",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank a folder of resumes, or a JSON/JSONL corpus, against a job description
    Rank {
        /// Resume folder, or a .json/.jsonl file of {"id", "text"} records
        #[arg(long)]
        resumes: String,
        /// Job description file (.txt)
        #[arg(long)]
        jd: String,
        /// Number of matches to print
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        top_k: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Rank { resumes, jd, top_k, json } => {
            let results = rank(Path::new(&resumes), Path::new(&jd), top_k)?;
            print_results(&results, json)
        }
    }
}

fn rank(resumes: &Path, jd: &Path, top_k: usize) -> Result<Vec<RankedResult>> {
    let documents = load_corpus(resumes)?;
    tracing::info!(count = documents.len(), source = %resumes.display(), "loaded resumes");

    let jd_text = PlainTextExtractor
        .extract_text(jd)
        .with_context(|| format!("reading job description {}", jd.display()))?;

    let index = TfIdfIndex::new();
    index.build_index(documents)?;
    Ok(index.search(&jd_text, top_k)?)
}

fn load_corpus(path: &Path) -> Result<Vec<Document>> {
    if path.is_dir() {
        let extracted = extract_folder(path, &PlainTextExtractor)?;
        return Ok(extracted.into_iter().map(|(name, text)| Document::new(name, text)).collect());
    }
    match path.extension().and_then(|s| s.to_str()) {
        Some("jsonl") => load_jsonl(path),
        Some("json") => load_json(path),
        _ => bail!("{} is neither a folder nor a .json/.jsonl corpus", path.display()),
    }
}

fn load_jsonl(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let mut docs = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)?;
        docs.push(Document::new(doc.id, doc.text));
    }
    Ok(docs)
}

fn load_json(file: &Path) -> Result<Vec<Document>> {
    let f = File::open(file).with_context(|| format!("opening {}", file.display()))?;
    let reader = BufReader::new(f);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let docs: Vec<InputDoc> = match json {
        serde_json::Value::Array(_) => serde_json::from_value(json)?,
        serde_json::Value::Object(_) => vec![serde_json::from_value(json)?],
        _ => bail!("{}: expected an object or an array of objects", file.display()),
    };
    Ok(docs.into_iter().map(|d| Document::new(d.id, d.text)).collect())
}

fn print_results(results: &[RankedResult], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }
    println!("Matching results:");
    for r in results {
        println!("{:>3}. {}: {:.4}", r.rank, r.id, r.score);
    }
    Ok(())
}
