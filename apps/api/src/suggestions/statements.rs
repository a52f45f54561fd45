//! Example statements offered next to content fields, with placeholder filling.

use serde::{Deserialize, Serialize};

/// The content fields that carry example statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExampleTarget {
    Summary,
    Responsibilities,
    TechnicalSkills,
    SoftSkills,
    Tools,
    CertificationName,
}

impl ExampleTarget {
    /// Whether the target lives inside a repeatable entry and needs an index.
    pub fn is_per_entry(&self) -> bool {
        matches!(
            self,
            ExampleTarget::Responsibilities | ExampleTarget::CertificationName
        )
    }
}

const SUMMARY: &[&str] = &[
    "Innovative {role} with {X}+ years of experience in designing and implementing {technology} solutions. Proven track record of {achievement} resulting in {Y}% {improvement_metric}.",
    "Results-driven {role} professional with expertise in {technology_stack}. Successfully led {X} projects delivering {Y}% {metric} improvement through strategic {methodology} implementation.",
    "Dynamic {role} combining technical expertise in {technologies} with strong leadership abilities. Demonstrated success in {achievement}, improving {metric} by {X}%.",
    "Detail-oriented {role} specializing in {specialty_area}. Track record of delivering {outcome} through effective implementation of {methodologies}.",
    "Forward-thinking {role} with proven ability to {key_skill}. Consistently achieved {X}% {improvement} through innovative approaches to {challenge}.",
    "Experienced {role} professional with deep expertise in {industry_specific} solutions. Led cross-functional teams to deliver {X} successful projects with {Y}% {success_metric}.",
];

const WORK_EXPERIENCE: &[&str] = &[
    "Led a cross-functional team of {X} members to deliver {Y} project ahead of schedule",
    "Increased team productivity by {X}% through implementation of {Y} methodology",
    "Reduced operational costs by {X}% by optimizing {Y} processes",
    "Developed and launched {X} that resulted in {Y}% improvement in user engagement",
];

const TECHNICAL_SKILLS: &[&str] = &[
    "Proficient in {languages} with {X}+ years of hands-on development experience",
    "Expert in {framework} development, building {type} applications",
    "Strong background in {domain} with expertise in {specific_technologies}",
];

const SOFT_SKILLS: &[&str] = &[
    "Strong leadership and team collaboration abilities demonstrated through {X} successful projects",
    "Excellent communication skills with experience presenting to {stakeholder_type}",
    "Problem-solving focused, consistently delivering solutions for {challenge_type}",
];

const TOOLS: &[&str] = &[
    "Advanced proficiency in {tool_names} for {specific_purpose}",
    "Experienced with {CI_tools} for continuous integration and deployment",
    "Expert in {design_tools} for UI/UX development",
];

const CERTIFICATIONS: &[&str] = &[
    "{cert_name} - Industry standard certification in {domain}",
    "Advanced certification in {technology} from {provider}",
    "Professional {field} certification with {specialization} focus",
];

/// Example statements for a target, in display order.
pub fn examples_for(target: ExampleTarget) -> &'static [&'static str] {
    match target {
        ExampleTarget::Summary => SUMMARY,
        ExampleTarget::Responsibilities => WORK_EXPERIENCE,
        ExampleTarget::TechnicalSkills => TECHNICAL_SKILLS,
        ExampleTarget::SoftSkills => SOFT_SKILLS,
        ExampleTarget::Tools => TOOLS,
        ExampleTarget::CertificationName => CERTIFICATIONS,
    }
}

/// Fills the known placeholders of an example statement.
///
/// `role` is the title of the first work experience entry, if any. Unknown
/// placeholders are left in place for the user to edit.
pub fn fill_placeholders(example: &str, role: Option<&str>) -> String {
    let role = role.filter(|r| !r.trim().is_empty()).unwrap_or("Professional");
    example
        .replace("{X}", "5")
        .replace("{Y}", "30")
        .replace("{role}", role)
        .replace("{technology}", "relevant technologies")
        .replace("{metric}", "efficiency")
        .replace("{methodology}", "Agile")
        .replace("{specific_metric}", "25%")
        .replace("{feature/project}", "key initiatives")
        .replace("{departments}", "multiple departments")
}
