//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blograg")]
#[command(about = "Blograg - answer questions from a blog's own posts", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Config file merged over blograg.yaml
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Embed and store posts that are not in the store yet
    Ingest(IngestArgs),

    /// Ask a question
    Query(QueryArgs),

    /// Show one stored record
    Show {
        /// Document id (file name without extension)
        id: String,
    },

    /// Posts most similar to a stored post
    Neighbors(NeighborsArgs),

    /// List stored records
    List,
}

#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Read posts from this directory instead of the configured source
    #[arg(long, value_name = "DIR")]
    pub local_dir: Option<PathBuf>,

    /// Process at most this many posts
    #[arg(short, long)]
    pub limit: Option<usize>,
}

#[derive(Args, Debug)]
pub struct QueryArgs {
    /// The question
    pub question: String,

    /// Number of posts to retrieve (defaults to query.top_k)
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub top_k: Option<u64>,

    /// Only rank posts, do not generate an answer
    #[arg(long)]
    pub retrieve_only: bool,
}

#[derive(Args, Debug)]
pub struct NeighborsArgs {
    /// Document id to start from
    pub id: String,

    /// Number of neighbours, the post itself included
    #[arg(short = 'k', long, value_parser = clap::value_parser!(u64).range(1..))]
    pub top_k: Option<u64>,
}
