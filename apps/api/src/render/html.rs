use std::fmt::Write;

use crate::render::tree::{contact_line, Block, Document, Entry, EntryKind, Header, Section};

const STYLESHEET: &str = r#"
      body {
        font-family: Arial, sans-serif;
        font-size: 10pt;
        line-height: 1.3;
        margin: 0;
        padding: 20px;
        color: #333;
      }
      .header { margin-bottom: 12px; }
      h1 {
        font-size: 16pt;
        margin: 0 0 4px 0;
      }
      h2 {
        font-size: 12pt;
        margin: 8px 0 4px 0;
        border-bottom: 1px solid #ccc;
      }
      .contact-info {
        font-size: 9pt;
        margin: 0;
      }
      .section { margin-bottom: 12px; }
      .experience-item, .education-item {
        margin-bottom: 8px;
      }
      .job-title, .degree {
        font-weight: bold;
        font-size: 10pt;
      }
      .company, .institution {
        font-weight: normal;
      }
      .dates {
        float: right;
        font-size: 9pt;
      }
      .details {
        font-size: 9pt;
      }
      ul {
        margin: 4px 0;
        padding-left: 20px;
      }
      li {
        margin: 2px 0;
        font-size: 9pt;
      }
      .skills-section {
        display: grid;
        grid-template-columns: repeat(2, 1fr);
        gap: 8px;
        font-size: 9pt;
      }
"#;

/// Escapes text for use in element content and double-quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes a document to a standalone HTML page in one pass.
pub fn to_html(doc: &Document) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("<meta charset=\"utf-8\">\n");
    let _ = writeln!(out, "<title>{}</title>", escape_html(&doc.title));
    let _ = writeln!(out, "<style>{STYLESHEET}</style>");
    out.push_str("</head>\n<body>\n");

    write_header(&mut out, &doc.header);
    for section in &doc.sections {
        write_section(&mut out, section);
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn write_header(out: &mut String, header: &Header) {
    out.push_str("<div class=\"header\">\n");
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&header.name));
    out.push_str("<div class=\"contact-info\">");
    out.push_str(&escape_html(&contact_line(header)));
    if let Some(link) = &header.profile_link {
        let _ = write!(
            out,
            "<br>\n<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a>",
            escape_html(&link.href),
            escape_html(link.label)
        );
    }
    out.push_str("</div>\n</div>\n");
}

fn write_section(out: &mut String, section: &Section) {
    out.push_str("<div class=\"section\">\n");
    let _ = writeln!(out, "<h2>{}</h2>", escape_html(section.heading));
    for block in &section.blocks {
        match block {
            Block::Paragraph(text) => {
                let _ = writeln!(out, "<p>{}</p>", escape_html(text));
            }
            Block::Entry(entry) => write_entry(out, entry),
            Block::Grid(cells) => {
                out.push_str("<div class=\"skills-section\">\n");
                for cell in cells {
                    let _ = writeln!(
                        out,
                        "<div>\n<strong>{}</strong>\n<p>{}</p>\n</div>",
                        escape_html(cell.label),
                        escape_html(&cell.text)
                    );
                }
                out.push_str("</div>\n");
            }
            Block::Credential { name, detail } => {
                let _ = writeln!(
                    out,
                    "<div class=\"certification-item\">\n<strong>{}</strong>\n<p>{}</p>\n</div>",
                    escape_html(name),
                    escape_html(detail)
                );
            }
        }
    }
    out.push_str("</div>\n");
}

fn write_entry(out: &mut String, entry: &Entry) {
    let (item, title, subtitle) = match entry.kind {
        EntryKind::Experience => ("experience-item", "job-title", "company"),
        EntryKind::Education => ("education-item", "degree", "institution"),
    };

    let _ = writeln!(out, "<div class=\"{item}\">");
    let _ = writeln!(out, "<div class=\"{title}\">{}</div>", escape_html(&entry.title));
    let _ = writeln!(
        out,
        "<div class=\"{subtitle}\">{}</div>",
        escape_html(&entry.subtitle)
    );
    if let Some(dates) = &entry.dates {
        let _ = writeln!(out, "<div class=\"dates\">{}</div>", escape_html(dates));
    }
    for detail in &entry.details {
        let _ = writeln!(out, "<div class=\"details\">{}</div>", escape_html(detail));
    }
    if !entry.bullets.is_empty() {
        out.push_str("<ul>\n");
        for bullet in &entry.bullets {
            let _ = writeln!(out, "<li>{}</li>", escape_html(bullet));
        }
        out.push_str("</ul>\n");
    }
    out.push_str("</div>\n");
}
