use crate::prelude::{eprintln, print, println, *};
use colored::Colorize;
use paramkit_core::PaginatedWindow;
use std::io::Read;
use std::path::PathBuf;

#[derive(Debug, clap::Args, Clone)]
pub struct PageOptions {
    /// File with one element per line; reads stdin when omitted
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Elements per page; negative shows everything
    #[arg(
        short = 'n',
        long,
        env = "PARAMKIT_PAGE_SIZE",
        default_value = "20",
        allow_negative_numbers = true
    )]
    pub page_size: i32,

    /// Offset of the first element (0-indexed)
    #[arg(short, long, default_value = "0")]
    pub start: usize,

    /// Size of the full collection when the input is only part of it
    #[arg(short, long)]
    pub total: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Build the window over the input lines
pub fn paginate(content: &str, options: &PageOptions) -> PaginatedWindow<String> {
    let lines: Vec<String> = content.lines().map(str::to_string).collect();
    let total = options.total.unwrap_or(lines.len() as u64);
    PaginatedWindow::new(lines, options.page_size, options.start, total)
}

fn read_content(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .wrap_err_with(|| f!("Failed to read {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .map_err(Error::from)?;
            Ok(buffer)
        }
    }
}

/// Position of the first window element within the backing
fn window_offset(page: &PaginatedWindow<String>) -> usize {
    if page.page_size() < 0 || page.backing().is_empty() {
        0
    } else {
        page.start()
    }
}

/// Text rendering of a page, with its position in the collection
fn format_page_text(page: &PaginatedWindow<String>) -> String {
    let window = page.window();
    let offset = window_offset(page);
    let mut result = String::new();

    result.push_str(&f!("{}\n", "=".repeat(60).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!(
            "ELEMENTS {}..{} OF {}",
            offset,
            offset + window.len(),
            page.total_count()
        )
        .bright_cyan()
        .bold()
    ));
    result.push_str(&f!("{}\n", "=".repeat(60).bright_cyan()));

    if window.is_empty() {
        result.push_str(&f!("{}\n", "No elements on this page.".yellow()));
    }
    for (idx, line) in window.iter().enumerate() {
        result.push_str(&f!(
            "{} {}\n",
            f!("[{}]", offset + idx).yellow(),
            line
        ));
    }

    result
}

pub fn run(options: PageOptions, global: crate::Global) -> Result<()> {
    let content = read_content(options.file.as_ref())?;
    let page = paginate(&content, &options);

    if global.verbose {
        eprintln!(
            "Backing has {} element(s), page size {}, start {}",
            page.backing().len(),
            page.page_size(),
            page.start()
        );
    }
    log::trace!("Window cached: {}", page.is_computed());

    if options.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", format_page_text(&page));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_options(page_size: i32, start: usize, total: Option<u64>) -> PageOptions {
        PageOptions {
            file: None,
            page_size,
            start,
            total,
            json: false,
        }
    }

    #[test]
    fn test_paginate_lines() {
        let page = paginate("a\nb\nc\nd\n", &create_test_options(2, 1, None));

        assert_eq!(page.window(), &["b".to_string(), "c".to_string()]);
        assert_eq!(page.total_count(), 4);
    }

    #[test]
    fn test_paginate_reported_total() {
        let page = paginate("a\nb", &create_test_options(10, 0, Some(500)));

        assert_eq!(page.window().len(), 2);
        assert_eq!(page.total_count(), 500);
    }

    #[test]
    fn test_format_page_text_lists_positions() {
        colored::control::set_override(false);
        let page = paginate("x\ny\nz", &create_test_options(2, 1, None));

        let text = format_page_text(&page);

        assert!(text.contains("ELEMENTS 1..3 OF 3"));
        assert!(text.contains("[1] y"));
        assert!(text.contains("[2] z"));
    }

    #[test]
    fn test_format_unpaged_window_counts_from_zero() {
        colored::control::set_override(false);
        let content: String = (0..10).map(|n| f!("{n}\n")).collect();
        let page = paginate(&content, &create_test_options(-1, 4, None));

        let text = format_page_text(&page);

        assert!(text.contains("ELEMENTS 0..10 OF 10"));
        assert!(text.contains("[0] 0\n"));
        assert!(text.contains("[9] 9\n"));
        assert!(!text.contains("[10]"));
    }

    #[test]
    fn test_format_empty_page() {
        colored::control::set_override(false);
        let page = paginate("x", &create_test_options(2, 5, None));

        assert!(format_page_text(&page).contains("No elements on this page."));
    }
}
