//! Static roadmap content: per-career skill progressions and per-phase defaults.
//!
//! Career titles are matched after lower-casing and trimming. Unknown titles get the
//! generic progression.

use crate::roadmap::{ContentSource, Phase, PhaseKind, Roadmap, PHASE_COUNT};

pub const PHASE_DURATION: &str = "3 months";
pub const ESTIMATED_MONTHS: u32 = 12;

type Progression = [&'static [&'static str]; 4];

struct CareerSkills {
    aliases: &'static [&'static str],
    progression: Progression,
}

static CAREER_SKILLS: &[CareerSkills] = &[
    CareerSkills {
        aliases: &["full stack developer", "software developer"],
        progression: [
            &["HTML5", "CSS3", "JavaScript Fundamentals", "Git Basics"],
            &["React/Vue.js", "Node.js", "Express.js", "Database Basics"],
            &["Advanced React", "RESTful APIs", "Database Design", "Testing"],
            &["System Architecture", "DevOps", "Performance Optimization", "Security"],
        ],
    },
    CareerSkills {
        aliases: &["data scientist"],
        progression: [
            &["Python", "Statistics", "Pandas", "NumPy"],
            &["Data Visualization", "Scikit-learn", "SQL", "Data Cleaning"],
            &["Machine Learning", "Deep Learning", "TensorFlow", "Feature Engineering"],
            &["MLOps", "Big Data", "Model Deployment", "Advanced Analytics"],
        ],
    },
    CareerSkills {
        aliases: &["frontend developer"],
        progression: [
            &["HTML5", "CSS3", "JavaScript ES6+", "Responsive Design"],
            &["React/Vue", "CSS Frameworks", "JavaScript Libraries", "Git"],
            &["State Management", "TypeScript", "Testing", "Build Tools"],
            &["Performance Optimization", "PWAs", "Accessibility", "Design Systems"],
        ],
    },
    CareerSkills {
        aliases: &["backend developer"],
        progression: [
            &["Programming Language", "Database Basics", "HTTP/REST", "Git"],
            &["Web Frameworks", "Database Design", "API Development", "Authentication"],
            &["Microservices", "Caching", "Message Queues", "Testing"],
            &["System Design", "Performance Tuning", "Security", "DevOps"],
        ],
    },
    CareerSkills {
        aliases: &["mobile developer"],
        progression: [
            &["Mobile UI Basics", "Programming Language", "IDE Setup", "Git"],
            &["Native Development", "UI Components", "Local Storage", "APIs"],
            &["Advanced Features", "Performance", "Testing", "App Store"],
            &["Cross-platform", "CI/CD", "Analytics", "Monetization"],
        ],
    },
    CareerSkills {
        aliases: &["devops engineer"],
        progression: [
            &["Linux", "Git", "Command Line", "Networking Basics"],
            &["Docker", "CI/CD", "Cloud Basics", "Infrastructure"],
            &["Kubernetes", "Monitoring", "Security", "Automation"],
            &["Site Reliability", "Performance", "Disaster Recovery", "Leadership"],
        ],
    },
    CareerSkills {
        aliases: &["ui/ux designer", "ux/ui designer", "ux designer"],
        progression: [
            &["Design Principles", "Figma/Sketch", "Color Theory", "Typography"],
            &["User Research", "Wireframing", "Prototyping", "Information Architecture"],
            &["Interaction Design", "Usability Testing", "Design Systems", "Accessibility"],
            &["Strategic Design", "Team Leadership", "Business Acumen", "Innovation"],
        ],
    },
    CareerSkills {
        aliases: &["business analyst"],
        progression: [
            &["Business Fundamentals", "Data Analysis", "Excel", "Communication"],
            &["Requirements Gathering", "Process Mapping", "SQL", "Stakeholder Management"],
            &["Business Intelligence", "Project Management", "Agile", "Advanced Analytics"],
            &["Strategic Planning", "Change Management", "Leadership", "Digital Transformation"],
        ],
    },
    CareerSkills {
        aliases: &["cybersecurity specialist"],
        progression: [
            &["Security Fundamentals", "Networking", "Operating Systems", "Risk Assessment"],
            &["Penetration Testing", "Incident Response", "Security Tools", "Compliance"],
            &["Advanced Threats", "Forensics", "Security Architecture", "Automation"],
            &["Security Leadership", "Strategy", "Governance", "Emerging Threats"],
        ],
    },
    CareerSkills {
        aliases: &["machine learning engineer"],
        progression: [
            &["Python", "Mathematics", "Statistics", "Data Manipulation"],
            &["Machine Learning", "Deep Learning", "TensorFlow/PyTorch", "Model Training"],
            &["MLOps", "Model Deployment", "Scalability", "Production Systems"],
            &["Research", "Advanced ML", "Team Leadership", "Innovation"],
        ],
    },
];

static GENERIC_SKILLS: Progression = [
    &["Core Fundamentals", "Basic Tools", "Foundation Knowledge"],
    &["Practical Skills", "Intermediate Concepts", "Project Work"],
    &["Advanced Techniques", "Specialization", "Expert Skills"],
    &["Professional Skills", "Leadership", "Industry Standards"],
];

const PHASE_TITLES: [&str; 4] = [
    "Foundation Phase",
    "Development Phase",
    "Advanced Phase",
    "Professional Phase",
];

const GENERIC_DESCRIPTIONS: [&str; 4] = [
    "Build strong foundational knowledge and basic skills essential for your career path.",
    "Develop practical skills and gain hands-on experience with real-world projects.",
    "Master advanced concepts and specialize in key areas of expertise.",
    "Achieve professional-level competency and prepare for industry leadership.",
];

const PROJECTS: Progression = [
    &["Basic tutorial projects", "Simple portfolio pieces"],
    &["Practical applications", "Feature development"],
    &["Complex projects", "Advanced implementations"],
    &["Professional portfolio", "Industry-level projects"],
];

const MILESTONES: Progression = [
    &["Complete fundamentals", "Build first project", "Understand basics"],
    &["Develop practical skills", "Complete real projects", "Gain confidence"],
    &["Master advanced concepts", "Build complex systems", "Demonstrate expertise"],
    &["Achieve professional level", "Lead projects", "Ready for industry"],
];

const RESOURCES: &[&str] = &[
    "Online courses",
    "Documentation",
    "Practice platforms",
    "Community forums",
];

/// Position of a 1-based phase number in the four-slot tables.
fn slot(number: u8) -> usize {
    usize::from(number.clamp(1, PHASE_COUNT) - 1)
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn default_phase_title(number: u8) -> &'static str {
    PHASE_TITLES[slot(number)]
}

pub fn generic_description(number: u8) -> &'static str {
    GENERIC_DESCRIPTIONS[slot(number)]
}

/// Skills for a phase of a known career, or the generic progression.
pub fn career_skills(career_title: &str, number: u8) -> &'static [&'static str] {
    let key = career_title.trim().to_lowercase();
    let progression = CAREER_SKILLS
        .iter()
        .find(|c| c.aliases.contains(&key.as_str()))
        .map(|c| &c.progression)
        .unwrap_or(&GENERIC_SKILLS);
    progression[slot(number)]
}

/// Skills inferred from a free-text phase title, or the generic progression.
pub fn keyword_skills(phase_title: &str, number: u8) -> &'static [&'static str] {
    let title = phase_title.to_lowercase();
    if title.contains("foundation") {
        &["Core Fundamentals", "Basic Programming", "Problem Solving", "Learning Methodologies"]
    } else if title.contains("intermediate") || title.contains("development") {
        &["Practical Application", "Project Development", "Tool Proficiency", "Code Quality"]
    } else if title.contains("advanced") {
        &["Advanced Concepts", "System Design", "Optimization", "Best Practices"]
    } else if title.contains("expert") || title.contains("professional") {
        &["Specialization", "Leadership", "Innovation", "Industry Standards"]
    } else {
        GENERIC_SKILLS[slot(number)]
    }
}

fn structured_description(number: u8, career_title: &str) -> String {
    let career = career_title.trim().to_lowercase();
    match slot(number) {
        0 => format!("Establish a solid foundation in {career} fundamentals and core concepts."),
        1 => format!("Develop practical skills and hands-on experience in {career} development."),
        2 => format!("Master advanced {career} techniques and specialized knowledge."),
        _ => format!(
            "Achieve professional-level expertise and prepare for {career} leadership roles."
        ),
    }
}

/// Builds a phase with the per-number defaults filled in.
pub fn phase_shell(number: u8, title: String, description: String, skills: &[&str]) -> Phase {
    Phase {
        number,
        title,
        duration: PHASE_DURATION.to_string(),
        kind: PhaseKind::for_phase(number),
        description,
        skills: to_owned(skills),
        resources: to_owned(RESOURCES),
        projects: to_owned(PROJECTS[slot(number)]),
        milestones: to_owned(MILESTONES[slot(number)]),
    }
}

/// Fills a slot the text generator did not provide.
pub fn padding_phase(number: u8, career_title: &str) -> Phase {
    phase_shell(
        number,
        default_phase_title(number).to_string(),
        generic_description(number).to_string(),
        career_skills(career_title, number),
    )
}

/// One phase of the fully static roadmap.
pub fn structured_phase(number: u8, career_title: &str) -> Phase {
    phase_shell(
        number,
        default_phase_title(number).to_string(),
        structured_description(number, career_title),
        career_skills(career_title, number),
    )
}

/// The fully static four-phase roadmap for a career.
pub fn structured_roadmap(career_title: &str) -> Roadmap {
    Roadmap::new(
        career_title,
        (1..=PHASE_COUNT)
            .map(|n| structured_phase(n, career_title))
            .collect(),
        ContentSource::Structured,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_career_uses_its_progression() {
        assert_eq!(
            career_skills("Data Scientist", 1),
            &["Python", "Statistics", "Pandas", "NumPy"]
        );
        assert_eq!(career_skills("  DEVOPS ENGINEER ", 2)[0], "Docker");
    }

    #[test]
    fn test_ux_aliases_share_progression() {
        let a = career_skills("UX/UI Designer", 3);
        assert_eq!(a, career_skills("ui/ux designer", 3));
        assert_eq!(a, career_skills("UX Designer", 3));
    }

    #[test]
    fn test_unknown_career_uses_generic_progression() {
        assert_eq!(career_skills("Astronaut", 4), GENERIC_SKILLS[3]);
    }

    #[test]
    fn test_keyword_skills_follow_title() {
        assert_eq!(keyword_skills("Building Foundations", 3)[0], "Core Fundamentals");
        assert_eq!(keyword_skills("Intermediate Work", 1)[0], "Practical Application");
        assert_eq!(keyword_skills("Advanced Topics", 1)[0], "Advanced Concepts");
        assert_eq!(keyword_skills("Expert Track", 1)[0], "Specialization");
        assert_eq!(keyword_skills("Getting Started", 2), GENERIC_SKILLS[1]);
    }

    #[test]
    fn test_structured_roadmap_shape() {
        let roadmap = structured_roadmap("Frontend Developer");
        assert_eq!(roadmap.title, "Frontend Developer Learning Roadmap");
        assert_eq!(roadmap.total_phases, 4);
        assert_eq!(roadmap.estimated_time_months, ESTIMATED_MONTHS);
        assert_eq!(roadmap.generated_by, ContentSource::Structured);

        let titles: Vec<_> = roadmap.phases.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, PHASE_TITLES);
        let kinds: Vec<_> = roadmap.phases.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PhaseKind::Foundation,
                PhaseKind::Beginner,
                PhaseKind::Intermediate,
                PhaseKind::Advanced
            ]
        );
        assert_eq!(roadmap.phases[0].skills[3], "Responsive Design");
        assert!(roadmap.phases[1]
            .description
            .contains("frontend developer development"));
    }
}
