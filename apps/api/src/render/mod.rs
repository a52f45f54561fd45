//! Document generator: turns a record into a standalone HTML resume.
//!
//! Two stages: `tree::build` decides what appears and in which order,
//! `html::to_html` serializes it with every piece of user text escaped.
//! Both are pure, so the same record always renders to the same bytes.

pub mod html;
pub mod tree;

use crate::models::resume::ResumeRecord;

pub fn render(record: &ResumeRecord) -> String {
    html::to_html(&tree::build(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::WorkExperienceEntry;

    fn jane_doe() -> ResumeRecord {
        let mut record = ResumeRecord::default();
        record.personal_info.full_name = "Jane Doe".to_string();
        record.summary = "Engineer".to_string();
        record.work_experience = vec![WorkExperienceEntry {
            title: "Dev".to_string(),
            company: "Acme".to_string(),
            start_date: "2020".to_string(),
            end_date: "2022".to_string(),
            responsibilities: "Built things".to_string(),
            ..Default::default()
        }];
        record.education.clear();
        record.certifications.clear();
        record
    }

    #[test]
    fn test_jane_doe_scenario() {
        let html = render(&jane_doe());
        assert!(html.contains("Jane Doe"));
        assert!(html.contains("Dev"));
        assert!(html.contains("Acme"));
        assert!(html.contains("2020 - 2022"));
        assert!(html.contains("<li>Built things</li>"));
        assert!(!html.contains("<h2>Certifications</h2>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let record = jane_doe();
        assert_eq!(render(&record), render(&record));
    }

    #[test]
    fn test_blank_record_keeps_structural_headers() {
        let html = render(&ResumeRecord::default());
        for heading in ["Professional Summary", "Experience", "Education", "Skills"] {
            assert!(html.contains(&format!("<h2>{heading}</h2>")), "missing {heading}");
        }
        assert!(html.contains("<h2>Certifications</h2>"));
    }

    #[test]
    fn test_profile_link_only_when_present() {
        let mut record = jane_doe();
        assert!(!render(&record).contains("LinkedIn Profile"));

        record.personal_info.linked_in = "linkedin.com/in/janedoe".to_string();
        let html = render(&record);
        assert!(html.contains(r#"<a href="https://linkedin.com/in/janedoe""#));
        assert!(html.contains("LinkedIn Profile"));
    }

    #[test]
    fn test_user_text_cannot_inject_markup() {
        let mut record = jane_doe();
        record.personal_info.full_name = "<script>alert('x')</script>".to_string();
        record.summary = "R&D \"lead\"".to_string();
        let html = render(&record);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(html.contains("R&amp;D &quot;lead&quot;"));
    }

    #[test]
    fn test_quote_in_profile_url_is_escaped_in_attribute() {
        let mut record = jane_doe();
        record.personal_info.linked_in = "https://x.test/\"onmouseover=\"y".to_string();
        let html = render(&record);
        assert!(html.contains("href=\"https://x.test/&quot;onmouseover=&quot;y\""));
    }
}
