//! Styleprint batch runner
//!
//! Reads a JSON file of blog posts, analyzes each one, persists the per-post
//! feature bundles, then recomputes global and per-topic style markers. A
//! post that fails analysis is logged and skipped; the batch continues.

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

use styleprint::{analyze_post, FileStore, PostAnalysis, StyleMarkerAggregator, StyleStore};

#[derive(Parser)]
#[command(name = "styleprint-batch")]
#[command(about = "Styleprint Writing Style Analysis - batch runner")]
struct Args {
    /// JSON file containing an array of posts: [{"id", "title", "content"}, ...]
    posts: PathBuf,

    /// Directory for persisted analyses and style markers
    #[arg(long, default_value = ".styleprint")]
    data_dir: PathBuf,

    /// Minimum number of analyzed posts before markers are computed
    #[arg(long, default_value_t = styleprint::constants::DEFAULT_MIN_POSTS_REQUIRED)]
    min_posts: usize,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[derive(Debug, Deserialize)]
struct PostInput {
    id: String,
    title: String,
    content: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(format!("styleprint={log_level}"))
        .init();

    tracing::info!("Starting styleprint batch run");
    tracing::info!("Data directory: {}", args.data_dir.display());
    tracing::info!("Styleprint version: {}", styleprint::VERSION);

    let raw = tokio::fs::read_to_string(&args.posts)
        .await
        .with_context(|| format!("Failed to read posts file {}", args.posts.display()))?;
    let posts: Vec<PostInput> =
        serde_json::from_str(&raw).context("Failed to parse posts file")?;

    let mut store = FileStore::new(&args.data_dir).await?;

    let mut analyzed = 0usize;
    let mut skipped = 0usize;
    for post in &posts {
        match analyze_post(&post.content, &post.title) {
            Ok(features) => {
                store
                    .store_analysis(PostAnalysis::new(post.id.clone(), features))
                    .await?;
                analyzed += 1;
            }
            Err(e) => {
                tracing::warn!("Skipping post {}: {}", post.id, e);
                skipped += 1;
            }
        }
    }
    println!("Analyzed {analyzed} posts ({skipped} skipped)");

    // Every distinct primary topic in the corpus gets its own marker set
    let topics: BTreeSet<String> = store
        .get_all_analyses()
        .await?
        .into_iter()
        .filter_map(|a| a.features.primary_topic)
        .collect();

    let mut aggregator = StyleMarkerAggregator::new(store);

    match aggregator.compute_global_style_markers(args.min_posts).await? {
        Some(markers) => {
            println!("Global style markers updated ({} posts)", markers.posts_analyzed);
        }
        None => {
            println!(
                "Not enough analyzed posts for global markers (need {})",
                args.min_posts
            );
        }
    }

    for topic in topics {
        match aggregator
            .compute_topic_style_markers(&topic, args.min_posts)
            .await?
        {
            Some(markers) => {
                println!(
                    "Style markers for '{topic}' updated ({} posts)",
                    markers.posts_analyzed
                );
            }
            None => {
                tracing::debug!("Skipping topic '{}': not enough posts", topic);
            }
        }
    }

    Ok(())
}
