//! Command handlers. Each one wires a slice of the core crates together
//! and prints a human-readable report, the way `legalis-cli::commands`
//! is the seam between `Cli` parsing and the library crates it drives.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use kite_citations::{normalize, CitationExtractor, CitationGraph};
use kite_core::{CancellationToken, Case, InMemoryStorage, StoragePort};
use kite_search::{Query, QueryEngine, SuggestionEngine};
use kite_validation::ValidationPipeline;

use crate::config::Config;
use crate::fixtures::sample_cases;

async fn seeded_storage(cases: Vec<Case>) -> Arc<InMemoryStorage> {
    let storage = Arc::new(InMemoryStorage::new());
    for case in cases {
        storage.save_case(case).await.expect("in-memory save never fails on a fresh store");
    }
    storage
}

/// Ingests the sample corpus, validates each case, extracts and graphs
/// citations, then runs a search and a suggestion against it. A single
/// end-to-end walk through C3 -> C7 -> C5/C6.
pub async fn handle_demo(config: &Config) -> Result<()> {
    tracing::info!("starting demo ingest");
    let cases = sample_cases();
    println!("{}", format!("Ingesting {} sample cases", cases.len()).bold());

    let pipeline = ValidationPipeline::standard();
    let cancel = CancellationToken::new();
    let mut rejected = 0;
    for case in &cases {
        let report = pipeline.validate(case, &cancel).await?;
        print_report_row(case, &report);
        if report.should_reject() {
            rejected += 1;
        }
    }
    println!("{rejected}/{} cases would be rejected", cases.len());

    let batch_reports = pipeline.validate_batch(&cases, &cancel).await?;
    println!(
        "batch validation: {}/{} cases produced a report (concurrency cap {})",
        batch_reports.len(),
        cases.len(),
        config.pipeline.batch_concurrency
    );

    let extractor = CitationExtractor::new();
    let mut citations = Vec::new();
    for case in &cases {
        let extracted = extractor.extract_from_case(case);
        tracing::debug!(case_id = %case.id, count = extracted.len(), "extracted citations");
        citations.extend(extracted.into_iter().map(|c| normalize(&c)));
    }
    println!("extracted {} citations across the corpus", citations.len());

    let graph = CitationGraph::build(&cases, &citations);
    println!(
        "citation graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    if let Some(most_cited) = graph.most_cited(1).first() {
        match graph.influence_of(*most_cited) {
            Ok(influence) => println!("most-cited case influence: {influence:.3}"),
            Err(err) => tracing::warn!(%err, "most-cited case missing from graph"),
        }
    }

    let storage = seeded_storage(cases).await;
    let engine = QueryEngine::new(storage.clone());
    let query = Query::builder().text("alpha").limit(config.search.default_page_size).build();
    let response = engine.execute(&query, &cancel).await?;
    print_search_results(&response);

    let suggestions = SuggestionEngine::new(storage).suggest("al", 5).await;
    println!("suggestions for \"al\": {:?}", suggestions.iter().map(|s| &s.text).collect::<Vec<_>>());

    Ok(())
}

/// Validates the sample corpus only, printing one report per case.
pub async fn handle_validate() -> Result<()> {
    let pipeline = ValidationPipeline::standard();
    let cancel = CancellationToken::new();
    for case in sample_cases() {
        let report = pipeline.validate(&case, &cancel).await?;
        print_report_row(&case, &report);
    }
    Ok(())
}

/// Runs a single full-text query against the sample corpus.
pub async fn handle_search(text: &str, limit: usize) -> Result<()> {
    let storage = seeded_storage(sample_cases()).await;
    let engine = QueryEngine::new(storage);
    let cancel = CancellationToken::new();
    let query = Query::builder().text(text).limit(limit).build();
    let response = engine.execute(&query, &cancel).await?;
    print_search_results(&response);
    Ok(())
}

/// Runs prefix suggestion against the sample corpus.
pub async fn handle_suggest(partial: &str, limit: usize) -> Result<()> {
    let storage = seeded_storage(sample_cases()).await;
    let suggestions = SuggestionEngine::new(storage).suggest(partial, limit).await;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Text").fg(Color::Cyan),
            Cell::new("Type").fg(Color::Cyan),
            Cell::new("Score").fg(Color::Cyan),
        ]);
    for suggestion in &suggestions {
        table.add_row(vec![
            Cell::new(&suggestion.text),
            Cell::new(format!("{:?}", suggestion.suggestion_type)),
            Cell::new(format!("{:.3}", suggestion.score)),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Extracts and normalizes citations from arbitrary free text, printing
/// each recognized format and its normalized form.
pub fn handle_cite(text: &str) -> Result<()> {
    let extractor = CitationExtractor::new();
    let citations = extractor.extract_from_text(text);
    if citations.is_empty() {
        println!("{}", "no citations recognized".yellow());
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Format").fg(Color::Cyan),
            Cell::new("Raw").fg(Color::Cyan),
            Cell::new("Normalized").fg(Color::Cyan),
            Cell::new("Valid").fg(Color::Cyan),
        ]);
    for citation in &citations {
        let normalized = normalize(citation);
        table.add_row(vec![
            Cell::new(format!("{:?}", citation.format)),
            Cell::new(&citation.raw),
            Cell::new(&normalized.normalized),
            Cell::new(if citation.valid { "yes" } else { "no" })
                .fg(if citation.valid { Color::Green } else { Color::Red }),
        ]);
    }
    println!("{table}");
    Ok(())
}

fn print_report_row(case: &Case, report: &kite_validation::ValidationReport) {
    let verdict = if report.valid {
        "VALID".green()
    } else {
        "INVALID".red()
    };
    println!("{} [{}] {}", verdict, case.case_name, report.summary());
    if report.should_reject() {
        println!("  {}", "would be rejected (score/completeness below threshold, or a blocking error)".yellow());
    }
}

fn print_search_results(response: &kite_search::Response) {
    println!(
        "{} hits in {}ms",
        response.total_hits,
        response.search_time_ms
    );
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Case").fg(Color::Cyan),
            Cell::new("Score").fg(Color::Cyan),
            Cell::new("Highlights").fg(Color::Cyan),
        ]);
    for result in &response.results {
        table.add_row(vec![
            Cell::new(&result.case.case_name),
            Cell::new(format!("{:.3}", result.score)),
            Cell::new(result.highlights.join(" | ")),
        ]);
    }
    println!("{table}");
}
