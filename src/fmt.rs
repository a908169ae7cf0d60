//! Human-friendly CLI output for search results.
//!
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::types::{SearchHit, SearchResponse};
use owo_colors::OwoColorize;
use std::io::{self, Write};

fn location(hit: &SearchHit) -> String {
    if hit.branch.is_empty() {
        format!("{}:{}", hit.repo, hit.path)
    } else {
        format!("{}@{}:{}", hit.repo, hit.branch, hit.path)
    }
}

fn matches_label(n: u64) -> String {
    if n == 1 {
        "1 match".to_string()
    } else {
        format!("{n} matches")
    }
}

fn hits_label(n: u64) -> String {
    if n == 1 {
        "1 hit".to_string()
    } else {
        format!("{n} hits")
    }
}

pub fn fmt_search(w: &mut impl Write, out: &SearchResponse, color: bool) -> io::Result<()> {
    for hit in &out.results {
        let header = location(hit);
        let matches = matches_label(hit.total_matches);
        if color {
            writeln!(w, "{}  ({})", header.bold(), matches.dimmed())?;
        } else {
            writeln!(w, "{header}  ({matches})")?;
        }

        for line in hit.snippet.lines().filter(|l| !l.trim().is_empty()) {
            if color {
                writeln!(w, "  {}{}", "│ ".green(), line)?;
            } else {
                writeln!(w, "  │ {line}")?;
            }
        }
    }

    let summary = if out.is_truncated() {
        format!("showing {} of {} hits", out.results.len(), out.count)
    } else {
        hits_label(out.count)
    };
    if color {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{summary}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(out: &SearchResponse) -> String {
        let mut buf = Vec::new();
        fmt_search(&mut buf, out, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_fmt_search_plain() {
        let out = SearchResponse {
            count: 10,
            results: vec![SearchHit {
                owner_id: "tokio-rs".into(),
                repo: "tokio-rs/tokio".into(),
                branch: "master".into(),
                path: "tokio/src/lib.rs".into(),
                snippet: "pub mod net;\n\nmod <mark>select</mark>;".into(),
                total_matches: 1,
            }],
        };
        let text = render(&out);
        assert_eq!(
            text,
            "tokio-rs/tokio@master:tokio/src/lib.rs  (1 match)\n  │ pub mod net;\n  │ mod <mark>select</mark>;\nshowing 1 of 10 hits\n"
        );
    }

    #[test]
    fn test_fmt_search_empty() {
        assert_eq!(render(&SearchResponse::default()), "0 hits\n");
    }

    #[test]
    fn test_fmt_search_without_branch() {
        let out = SearchResponse {
            count: 1,
            results: vec![SearchHit {
                repo: "a/b".into(),
                path: "x.py".into(),
                total_matches: 4,
                ..SearchHit::default()
            }],
        };
        assert_eq!(render(&out), "a/b:x.py  (4 matches)\n1 hit\n");
    }
}
