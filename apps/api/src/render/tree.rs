//! Document tree: the layout of a rendered resume, independent of markup.
//!
//! All strings held here are raw user text. Escaping happens once, in the
//! serializer.

use crate::models::resume::{
    CertificationEntry, EducationEntry, ResumeRecord, Skills, WorkExperienceEntry,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub title: String,
    pub header: Header,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    pub name: String,
    pub contact: Vec<String>,
    pub profile_link: Option<Link>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub href: String,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(String),
    Entry(Entry),
    Grid(Vec<GridCell>),
    Credential { name: String, detail: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Experience,
    Education,
}

/// One experience or education item.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub kind: EntryKind,
    pub title: String,
    pub subtitle: String,
    pub dates: Option<String>,
    pub details: Vec<String>,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub label: &'static str,
    pub text: String,
}

const CONTACT_SEPARATOR: &str = " • ";
const PROFILE_LABEL: &str = "LinkedIn Profile";

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// A link target that is safe to put in `href`: http(s) URLs as given,
/// scheme-less URLs under `https://`. Anything with another scheme is refused.
pub fn safe_href(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let lower = url.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        return Some(url.to_string());
    }
    if has_scheme(url) {
        return None;
    }
    Some(format!("https://{}", url.trim_start_matches('/')))
}

/// `mailto:x` has a scheme; `linkedin.com:443/in/x` and `localhost:8080` are
/// a host and port.
fn has_scheme(url: &str) -> bool {
    let Some((scheme, rest)) = url.split_once(':') else {
        return false;
    };
    let port = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let is_port = !port.is_empty() && port.chars().all(|c| c.is_ascii_digit());
    !is_port
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-'))
}

/// Splits free text on periods and line breaks into trimmed, non-empty bullets.
pub fn bullets(text: &str) -> Vec<String> {
    text.split(['.', '\n', '\r'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn header(record: &ResumeRecord) -> Header {
    let info = &record.personal_info;
    let mut contact: Vec<String> = [&info.email, &info.phone, &info.location]
        .into_iter()
        .filter_map(|v| non_empty(v))
        .map(str::to_string)
        .collect();

    let profile_link = match non_empty(&info.linked_in) {
        Some(url) => match safe_href(url) {
            Some(href) => Some(Link {
                href,
                label: PROFILE_LABEL,
            }),
            None => {
                contact.push(url.to_string());
                None
            }
        },
        None => None,
    };

    Header {
        name: info.full_name.clone(),
        contact,
        profile_link,
    }
}

fn experience(entry: &WorkExperienceEntry) -> Block {
    let dates: Vec<&str> = [&entry.start_date, &entry.end_date]
        .into_iter()
        .filter_map(|v| non_empty(v))
        .collect();
    Block::Entry(Entry {
        kind: EntryKind::Experience,
        title: entry.title.clone(),
        subtitle: entry.company.clone(),
        dates: (!dates.is_empty()).then(|| dates.join(" - ")),
        details: non_empty(&entry.location).map(str::to_string).into_iter().collect(),
        bullets: bullets(&entry.responsibilities),
    })
}

fn education(entry: &EducationEntry) -> Block {
    let mut details = Vec::new();
    if let Some(location) = non_empty(&entry.location) {
        details.push(location.to_string());
    }
    if let Some(gpa) = non_empty(&entry.gpa) {
        details.push(format!("GPA: {gpa}"));
    }
    Block::Entry(Entry {
        kind: EntryKind::Education,
        title: entry.degree.clone(),
        subtitle: entry.institution.clone(),
        dates: non_empty(&entry.graduation_date).map(|d| format!("Graduated: {d}")),
        details,
        bullets: Vec::new(),
    })
}

fn skills(skills: &Skills) -> Block {
    let mut cells = vec![
        GridCell {
            label: "Technical Skills:",
            text: skills.technical.clone(),
        },
        GridCell {
            label: "Soft Skills:",
            text: skills.soft_skills.clone(),
        },
    ];
    if non_empty(&skills.tools).is_some() {
        cells.push(GridCell {
            label: "Tools & Technologies:",
            text: skills.tools.clone(),
        });
    }
    if non_empty(&skills.languages).is_some() {
        cells.push(GridCell {
            label: "Languages:",
            text: skills.languages.clone(),
        });
    }
    Block::Grid(cells)
}

fn credential(entry: &CertificationEntry) -> Block {
    let detail: Vec<&str> = [&entry.issuer, &entry.date]
        .into_iter()
        .filter_map(|v| non_empty(v))
        .collect();
    Block::Credential {
        name: entry.name.clone(),
        detail: detail.join(" | "),
    }
}

/// Lays a record out as a document. Never fails; blank content yields empty sections.
pub fn build(record: &ResumeRecord) -> Document {
    let mut sections = vec![
        Section {
            heading: "Professional Summary",
            blocks: vec![Block::Paragraph(record.summary.clone())],
        },
        Section {
            heading: "Experience",
            blocks: record.work_experience.iter().map(experience).collect(),
        },
        Section {
            heading: "Education",
            blocks: record.education.iter().map(education).collect(),
        },
        Section {
            heading: "Skills",
            blocks: vec![skills(&record.skills)],
        },
    ];

    if !record.certifications.is_empty() {
        sections.push(Section {
            heading: "Certifications",
            blocks: record.certifications.iter().map(credential).collect(),
        });
    }

    let title = match non_empty(&record.personal_info.full_name) {
        Some(name) => format!("{name} - Resume"),
        None => "Resume".to_string(),
    };

    Document {
        title,
        header: header(record),
        sections,
    }
}

pub(crate) fn contact_line(header: &Header) -> String {
    header.contact.join(CONTACT_SEPARATOR)
}
