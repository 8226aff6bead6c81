/// Self-contained HTML report with inline styles.
///
/// Contains the same sections as the text report: settings, summary
/// figures, the category table and the largest-files table. Every value
/// taken from the filesystem is HTML-escaped.
use crate::model::{format_count, format_size, ScanResult};
use crate::report::{format_percent, format_timestamp, settings_summary, status_label};
use std::fmt::Write as _;

const STYLE: &str = r#"
    body { font-family: "Segoe UI", Arial, sans-serif; margin: 20px; background: #f5f5f5; color: #2c3e50; }
    .container { max-width: 1200px; margin: 0 auto; background: #fff; padding: 30px; border-radius: 10px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    .header { text-align: center; margin-bottom: 30px; }
    .header h1 { color: #3498db; margin-bottom: 10px; }
    .info-box { background: #ecf0f1; padding: 15px; border-radius: 5px; margin-bottom: 20px; }
    .info-box h3 { margin-top: 0; }
    .stats { display: flex; gap: 10px; margin-bottom: 20px; }
    .stat-item { flex: 1; background: #3498db; color: #fff; padding: 15px; border-radius: 5px; text-align: center; }
    .stat-item h4 { margin: 0 0 5px 0; font-weight: normal; }
    .stat-item p { margin: 0; font-size: 1.4em; font-weight: bold; }
    table { width: 100%; border-collapse: collapse; margin: 10px 0 30px 0; }
    th, td { padding: 10px 12px; text-align: left; border-bottom: 1px solid #ddd; }
    th { background: #3498db; color: #fff; }
    tr:nth-child(even) { background: #f2f2f2; }
    tr:hover { background: #e8f4f8; }
    .num { text-align: right; }
    .rank { text-align: center; font-weight: bold; }
    .size { color: #e74c3c; font-weight: bold; }
    .path { color: #7f8c8d; font-size: 0.9em; word-break: break-all; }
    .partial { color: #e67e22; font-weight: bold; }
    .footer { text-align: center; color: #7f8c8d; margin-top: 30px; font-size: 0.9em; }
"#;

pub fn render(result: &ScanResult) -> String {
    let mut out = String::with_capacity(16_384);
    let root = escape(&result.options.root.to_string_lossy());

    // Writing into a String cannot fail.
    let _ = writeln!(out, "<!DOCTYPE html>");
    let _ = writeln!(out, "<html lang=\"en\">");
    let _ = writeln!(out, "<head>");
    let _ = writeln!(out, "<meta charset=\"UTF-8\">");
    let _ = writeln!(
        out,
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    );
    let _ = writeln!(out, "<title>Disk Space Analysis: {root}</title>");
    let _ = writeln!(out, "<style>{STYLE}</style>");
    let _ = writeln!(out, "</head>");
    let _ = writeln!(out, "<body>\n<div class=\"container\">");

    let _ = writeln!(out, "<div class=\"header\">");
    let _ = writeln!(out, "<h1>Disk Space Analysis Report</h1>");
    let _ = writeln!(out, "<p>Scan path: {root}</p>");
    let _ = writeln!(
        out,
        "<p>Scanned at: {}</p>",
        format_timestamp(&result.started_at)
    );
    if !result.completed {
        let _ = writeln!(
            out,
            "<p class=\"partial\">Status: {}</p>",
            status_label(result)
        );
    }
    let _ = writeln!(out, "</div>");

    let _ = writeln!(out, "<div class=\"info-box\">");
    let _ = writeln!(out, "<h3>Scan settings</h3>");
    let _ = writeln!(out, "<p>{}</p>", escape(&settings_summary(&result.options)));
    let _ = writeln!(out, "<p>Duration: {:.2} s</p>", result.duration_secs);
    if result.error_count > 0 {
        let _ = writeln!(
            out,
            "<p>Skipped entries: {}</p>",
            format_count(result.error_count)
        );
    }
    let _ = writeln!(out, "</div>");

    let _ = writeln!(out, "<div class=\"stats\">");
    stat_item(&mut out, "Files scanned", &format_count(result.scanned_count));
    stat_item(
        &mut out,
        "Qualifying files",
        &format_count(result.qualifying_count),
    );
    stat_item(
        &mut out,
        "Total size",
        &format_size(result.total_qualifying_size),
    );
    let _ = writeln!(out, "</div>");

    let _ = writeln!(out, "<h2>File types</h2>");
    if result.categories.is_empty() {
        let _ = writeln!(out, "<p>No files matched the filters.</p>");
    } else {
        let _ = writeln!(out, "<table>");
        let _ = writeln!(
            out,
            "<tr><th>Type</th><th class=\"num\">Files</th><th class=\"num\">Size</th><th class=\"num\">Share</th></tr>"
        );
        for stats in &result.categories {
            let _ = writeln!(
                out,
                "<tr><td>{}</td><td class=\"num\">{}</td><td class=\"num size\">{}</td><td class=\"num\">{}</td></tr>",
                escape(stats.category.label()),
                format_count(stats.file_count),
                format_size(stats.total_size),
                format_percent(result.percent_of_total(stats.total_size))
            );
        }
        let _ = writeln!(out, "</table>");
    }

    if !result.top_files.is_empty() {
        let _ = writeln!(out, "<h2>Largest files</h2>");
        let _ = writeln!(out, "<table>");
        let _ = writeln!(
            out,
            "<tr><th class=\"rank\">#</th><th>Name</th><th class=\"num\">Size</th><th>Type</th><th>Folder</th></tr>"
        );
        for (rank, entry) in result.top_files.iter().enumerate() {
            let _ = writeln!(
                out,
                "<tr><td class=\"rank\">{}</td><td>{}</td><td class=\"num size\">{}</td><td>{}</td><td class=\"path\">{}</td></tr>",
                rank + 1,
                escape(&entry.file_name()),
                format_size(entry.size),
                escape(entry.category.label()),
                escape(&entry.parent_dir())
            );
        }
        let _ = writeln!(out, "</table>");
    }

    let _ = writeln!(out, "<div class=\"footer\">Generated by SpaceTally</div>");
    let _ = writeln!(out, "</div>\n</body>\n</html>");
    out
}

fn stat_item(out: &mut String, title: &str, value: &str) {
    let _ = writeln!(
        out,
        "<div class=\"stat-item\"><h4>{}</h4><p>{}</p></div>",
        escape(title),
        escape(value)
    );
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::fixtures::{empty_result, sample_result};

    #[test]
    fn escape_special_characters() {
        assert_eq!(escape("a < b & c > \"d\" 'e'"), "a &lt; b &amp; c &gt; &quot;d&quot; &#39;e&#39;");
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn document_is_self_contained() {
        let html = render(&sample_result());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(!html.contains("<link"));
        assert!(!html.contains("<script"));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn filenames_are_escaped() {
        let html = render(&sample_result());
        assert!(html.contains("report &amp; notes.pdf"));
    }

    #[test]
    fn markup_in_names_is_neutralised() {
        let mut result = sample_result();
        result.top_files[0].path = "/data/media/<cat>.jpg".into();
        let html = render(&result);
        assert!(html.contains("&lt;cat&gt;.jpg"));
        assert!(!html.contains("<cat>"));
    }

    #[test]
    fn contains_tables() {
        let html = render(&sample_result());
        assert!(html.contains("<h2>File types</h2>"));
        assert!(html.contains("<h2>Largest files</h2>"));
        assert!(html.contains("film.mp4"));
        assert!(html.contains("500.0 MB"));
    }

    #[test]
    fn largest_files_list_containing_folder() {
        let html = render(&sample_result());
        assert!(html.contains("<th>Folder</th>"));
        assert!(!html.contains("<th>Path</th>"));
        assert!(html.contains("<td class=\"path\">/data/media/docs</td>"));
    }

    #[test]
    fn empty_result_renders_placeholder() {
        let html = render(&empty_result());
        assert!(html.contains("No files matched the filters."));
        assert!(!html.contains("Largest files"));
    }
}
