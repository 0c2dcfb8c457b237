//! Report rendering for the terminal.

use bookshelf_core::{Author, CatalogCounts, CatalogReport};
use std::fmt::Display;

const SEPARATOR_WIDTH: usize = 80;

pub fn print_counts(counts: &CatalogCounts, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(counts)?);
        return Ok(());
    }

    println!(
        "Catalog now holds {} authors, {} books and {} author-book links.",
        counts.authors, counts.books, counts.links
    );
    Ok(())
}

pub fn print_report(report: &CatalogReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    section(
        "Book with the most pages",
        display_or_none(report.book_with_most_pages.as_ref()),
    );
    section(
        "Average number of pages",
        report
            .average_page_count
            .map_or_else(|| "None".to_string(), |average| format!("{average:.2}")),
    );
    section(
        "Youngest author",
        display_or_none(report.youngest_author.as_ref()),
    );
    section(
        "Authors with no books",
        display_authors(&report.authors_with_no_books),
    );
    section(
        "Authors with more than 3 books",
        display_authors(&report.authors_with_more_than_three_books),
    );
    Ok(())
}

fn section(title: &str, body: impl Display) {
    println!("{}", "*".repeat(SEPARATOR_WIDTH));
    println!("{title}: {body}");
}

fn display_or_none<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| "None".to_string(), ToString::to_string)
}

fn display_authors(authors: &[Author]) -> String {
    if authors.is_empty() {
        return "[]".to_string();
    }
    let lines: Vec<String> = authors
        .iter()
        .map(|author| format!("\n  - {author}"))
        .collect();
    lines.concat()
}
