//! Built-in scholarship catalog used by `POST /api/seed-data` and first-boot seeding.

use tracing::info;

use crate::errors::AppError;
use crate::models::scholarship::NewScholarship;
use crate::models::tags::TagList;
use crate::store::ScholarshipStore;

struct SeedEntry {
    title: &'static str,
    organization: &'static str,
    amount: &'static str,
    deadline: &'static str,
    description: &'static str,
    requirements: &'static str,
    tags: &'static [&'static str],
    scholarship_type: &'static str,
    eligibility_gpa: Option<&'static str>,
    eligible_fields: &'static [&'static str],
    eligible_levels: &'static [&'static str],
}

const SEED_CATALOG: &[SeedEntry] = &[
    SeedEntry {
        title: "Google Computer Science Scholarship",
        organization: "Google Inc.",
        amount: "$10,000",
        deadline: "2025-03-15",
        description: "Supporting underrepresented students in computer science and technology fields.",
        requirements: "3.5+ GPA, demonstrated leadership, passion for computer science",
        tags: &["technology", "computer-science", "diversity", "leadership"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.5"),
        eligible_fields: &["Computer Science", "Software Engineering", "Information Technology"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Microsoft LEAP Engineering Scholarship",
        organization: "Microsoft Corporation",
        amount: "$25,000",
        deadline: "2025-04-01",
        description: "Full-time internship program for students from non-traditional backgrounds in tech.",
        requirements: "Enrolled in computer science or related field, strong coding skills",
        tags: &["technology", "internship", "coding", "diversity"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &["Computer Science", "Software Engineering", "Electrical Engineering"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior"],
    },
    SeedEntry {
        title: "Apple WWDC Student Scholarship",
        organization: "Apple Inc.",
        amount: "$5,000",
        deadline: "2025-05-20",
        description: "Supporting innovative student developers building apps for Apple platforms.",
        requirements: "App development portfolio, Swift programming skills",
        tags: &["technology", "mobile-development", "innovation", "apple"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &["Computer Science", "Software Engineering", "Mobile Development"],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Society of Women Engineers Scholarship",
        organization: "Society of Women Engineers",
        amount: "$15,000",
        deadline: "2025-02-15",
        description: "Empowering women in engineering and technology fields.",
        requirements: "Female student, 3.5+ GPA, engineering major",
        tags: &["engineering", "women", "stem", "leadership"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.5"),
        eligible_fields: &["Mechanical Engineering", "Electrical Engineering", "Civil Engineering", "Chemical Engineering"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "IEEE Foundation Scholarship",
        organization: "Institute of Electrical and Electronics Engineers",
        amount: "$8,000",
        deadline: "2025-03-30",
        description: "Supporting students pursuing electrical engineering and computer science.",
        requirements: "IEEE student membership, strong academic performance",
        tags: &["engineering", "electrical", "ieee", "technology"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.2"),
        eligible_fields: &["Electrical Engineering", "Computer Engineering", "Computer Science"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "JP Morgan Chase Scholarship",
        organization: "JP Morgan Chase & Co.",
        amount: "₹16,50,000",
        deadline: "2025-04-15",
        description: "Supporting students pursuing careers in finance and business technology.",
        requirements: "Business or finance major, 3.3+ GPA, leadership experience",
        tags: &["finance", "business", "leadership", "banking"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.3"),
        eligible_fields: &["Business Administration", "Finance", "Economics", "Accounting"],
        eligible_levels: &["undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Goldman Sachs Scholarship Program",
        organization: "Goldman Sachs Group",
        amount: "₹24,75,000",
        deadline: "2025-03-01",
        description: "Comprehensive scholarship program for future finance leaders.",
        requirements: "Finance or economics major, exceptional academic record, internship experience",
        tags: &["finance", "investment", "leadership", "economics"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.7"),
        eligible_fields: &["Finance", "Economics", "Business Administration"],
        eligible_levels: &["undergraduate-senior", "graduate-masters"],
    },
    SeedEntry {
        title: "American Medical Association Scholarship",
        organization: "American Medical Association",
        amount: "$35,000",
        deadline: "2025-05-01",
        description: "Supporting future healthcare professionals and medical researchers.",
        requirements: "Pre-med or medical student, 3.8+ GPA, healthcare volunteer experience",
        tags: &["medical", "healthcare", "research", "volunteer"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.8"),
        eligible_fields: &["Pre-Medicine", "Biology", "Chemistry", "Health Sciences"],
        eligible_levels: &["undergraduate-junior", "undergraduate-senior", "graduate-masters"],
    },
    SeedEntry {
        title: "Johnson & Johnson Nursing Scholarship",
        organization: "Johnson & Johnson",
        amount: "$12,000",
        deadline: "2025-06-15",
        description: "Supporting the next generation of nursing professionals.",
        requirements: "Nursing major, 3.5+ GPA, clinical experience",
        tags: &["nursing", "healthcare", "clinical", "patient-care"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.5"),
        eligible_fields: &["Nursing", "Health Sciences"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Environmental Protection Agency Scholarship",
        organization: "US Environmental Protection Agency",
        amount: "$18,000",
        deadline: "2025-04-30",
        description: "Supporting students committed to environmental protection and sustainability.",
        requirements: "Environmental science major, 3.4+ GPA, environmental project experience",
        tags: &["environmental", "sustainability", "science", "climate"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.4"),
        eligible_fields: &["Environmental Science", "Environmental Engineering", "Biology", "Chemistry"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "National Science Foundation STEM Scholarship",
        organization: "National Science Foundation",
        amount: "$22,000",
        deadline: "2025-02-28",
        description: "Advancing STEM education and research across all scientific disciplines.",
        requirements: "STEM major, 3.6+ GPA, research experience",
        tags: &["stem", "research", "science", "mathematics"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.6"),
        eligible_fields: &["Physics", "Chemistry", "Biology", "Mathematics", "Computer Science"],
        eligible_levels: &["undergraduate-junior", "undergraduate-senior", "graduate-masters"],
    },
    SeedEntry {
        title: "Fulbright International Exchange Scholarship",
        organization: "US Department of State",
        amount: "$40,000",
        deadline: "2025-10-15",
        description: "International educational exchange program promoting cultural understanding.",
        requirements: "Bachelor's degree, strong academic record, language skills",
        tags: &["international", "cultural-exchange", "languages", "research"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.5"),
        eligible_fields: &["International Relations", "Languages", "Cultural Studies", "Political Science"],
        eligible_levels: &["graduate-masters", "graduate-phd"],
    },
    SeedEntry {
        title: "Humanities Research Council Grant",
        organization: "National Humanities Research Council",
        amount: "$15,000",
        deadline: "2025-03-20",
        description: "Supporting innovative research in humanities and social sciences.",
        requirements: "Humanities major, research proposal, faculty recommendation",
        tags: &["humanities", "research", "social-sciences", "culture"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.4"),
        eligible_fields: &["History", "Philosophy", "Literature", "Art History", "Anthropology"],
        eligible_levels: &["undergraduate-senior", "graduate-masters"],
    },
    SeedEntry {
        title: "First Generation College Student Scholarship",
        organization: "Educational Foundation",
        amount: "$8,000",
        deadline: "2025-07-01",
        description: "Supporting first-generation college students pursuing higher education.",
        requirements: "First-generation college student, demonstrated financial need",
        tags: &["first-generation", "financial-need", "education", "support"],
        scholarship_type: "need-based",
        eligibility_gpa: Some("2.8"),
        eligible_fields: &[],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Minority Student Success Fund",
        organization: "Diversity Education Alliance",
        amount: "$12,000",
        deadline: "2025-08-15",
        description: "Promoting educational equity for underrepresented minority students.",
        requirements: "Underrepresented minority status, financial need, 3.0+ GPA",
        tags: &["diversity", "minority", "equity", "financial-aid"],
        scholarship_type: "need-based",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &[],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "NASA Summer Internship Program",
        organization: "National Aeronautics and Space Administration",
        amount: "$7,500",
        deadline: "2025-01-31",
        description: "Hands-on internship experience in aerospace engineering and space science.",
        requirements: "STEM major, 3.0+ GPA, US citizenship",
        tags: &["internship", "aerospace", "engineering", "space"],
        scholarship_type: "internship",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &["Aerospace Engineering", "Mechanical Engineering", "Physics", "Computer Science"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Meta Software Engineering Internship",
        organization: "Meta Platforms Inc.",
        amount: "$12,000",
        deadline: "2025-02-10",
        description: "Full-time summer internship building next-generation social technology.",
        requirements: "Computer science major, strong programming skills, previous internship experience",
        tags: &["internship", "software", "social-media", "technology"],
        scholarship_type: "internship",
        eligibility_gpa: Some("3.2"),
        eligible_fields: &["Computer Science", "Software Engineering"],
        eligible_levels: &["undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Tesla Engineering Co-op Program",
        organization: "Tesla Inc.",
        amount: "$15,000",
        deadline: "2025-03-05",
        description: "Six-month co-op program working on sustainable transportation and energy.",
        requirements: "Engineering major, 3.3+ GPA, passion for sustainability",
        tags: &["internship", "automotive", "sustainability", "engineering"],
        scholarship_type: "internship",
        eligibility_gpa: Some("3.3"),
        eligible_fields: &["Mechanical Engineering", "Electrical Engineering", "Chemical Engineering"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Netflix Content Strategy Internship",
        organization: "Netflix Inc.",
        amount: "$8,000",
        deadline: "2025-04-20",
        description: "Summer internship in content analysis and entertainment industry strategy.",
        requirements: "Business, communications, or media studies major, analytical skills",
        tags: &["internship", "media", "entertainment", "strategy"],
        scholarship_type: "internship",
        eligibility_gpa: Some("3.1"),
        eligible_fields: &["Business Administration", "Communications", "Media Studies", "Marketing"],
        eligible_levels: &["undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Adobe Creative Scholarship",
        organization: "Adobe Inc.",
        amount: "$7,500",
        deadline: "2025-04-25",
        description: "Supporting creative students in digital arts and design.",
        requirements: "Portfolio submission, creative arts major, 3.0+ GPA",
        tags: &["creative", "design", "digital-arts", "portfolio"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &["Graphic Design", "Digital Arts", "Media Arts", "Computer Science"],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "Salesforce Trailblazer Scholarship",
        organization: "Salesforce Foundation",
        amount: "$10,000",
        deadline: "2025-05-10",
        description: "Empowering the next generation of business technology leaders.",
        requirements: "Business or technology major, leadership experience, 3.2+ GPA",
        tags: &["business", "technology", "leadership", "salesforce"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.2"),
        eligible_fields: &["Business Administration", "Information Systems", "Computer Science", "Marketing"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "General Academic Excellence Award",
        organization: "Education Foundation",
        amount: "$5,000",
        deadline: "2025-06-01",
        description: "Recognizing outstanding academic achievement across all fields.",
        requirements: "3.5+ GPA, any major, demonstrated academic excellence",
        tags: &["academic", "excellence", "general", "achievement"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.5"),
        eligible_fields: &[],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "International Student Success Fund",
        organization: "Global Education Alliance",
        amount: "$8,000",
        deadline: "2025-07-15",
        description: "Supporting international students pursuing higher education.",
        requirements: "International student status, any major, 3.0+ GPA",
        tags: &["international", "diversity", "global", "education"],
        scholarship_type: "need-based",
        eligibility_gpa: Some("3.0"),
        eligible_fields: &[],
        eligible_levels: &["undergraduate-freshman", "undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
    SeedEntry {
        title: "STEM Innovation Challenge",
        organization: "Innovation Institute",
        amount: "$12,000",
        deadline: "2025-03-25",
        description: "Funding innovative STEM projects and research.",
        requirements: "STEM major, research project proposal, 3.3+ GPA",
        tags: &["stem", "innovation", "research", "project"],
        scholarship_type: "merit-based",
        eligibility_gpa: Some("3.3"),
        eligible_fields: &["Engineering", "Computer Science", "Mathematics", "Physics", "Chemistry", "Biology"],
        eligible_levels: &["undergraduate-sophomore", "undergraduate-junior", "undergraduate-senior"],
    },
];

/// Returns the built-in catalog as insertable entries, all active.
pub fn seed_catalog() -> Vec<NewScholarship> {
    SEED_CATALOG
        .iter()
        .map(|e| NewScholarship {
            title: e.title.to_string(),
            organization: e.organization.to_string(),
            amount: e.amount.to_string(),
            deadline: e.deadline.to_string(),
            description: e.description.to_string(),
            requirements: e.requirements.to_string(),
            tags: TagList::from(e.tags),
            scholarship_type: e.scholarship_type.to_string(),
            eligibility_gpa: e.eligibility_gpa.map(str::to_string),
            eligible_fields: TagList::from(e.eligible_fields),
            eligible_levels: TagList::from(e.eligible_levels),
            is_active: true,
        })
        .collect()
}

/// First-boot seeding. Leaves an existing catalog alone; returns how many
/// entries were inserted.
pub async fn seed_if_empty(store: &dyn ScholarshipStore) -> Result<usize, AppError> {
    let existing = store.count_scholarships().await?;
    if existing > 0 {
        info!("Catalog already holds {existing} scholarships, skipping seed");
        return Ok(0);
    }
    let count = store.replace_catalog(&seed_catalog()).await?;
    info!("Seeded empty catalog with {count} scholarships");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_seed_if_empty_only_seeds_once() {
        let store = MemoryStore::new();
        let first = seed_if_empty(&store).await.unwrap();
        assert_eq!(first, seed_catalog().len());
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.count_scholarships().await.unwrap() as usize, first);
    }

    #[test]
    fn test_seed_catalog_titles_are_unique() {
        let catalog = seed_catalog();
        let titles: HashSet<_> = catalog.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles.len(), catalog.len());
    }

    #[test]
    fn test_seed_catalog_entries_are_complete() {
        for s in seed_catalog() {
            assert!(!s.tags.is_empty(), "{} has no tags", s.title);
            assert!(!s.eligible_levels.is_empty(), "{} has no levels", s.title);
            assert!(
                chrono::NaiveDate::parse_from_str(&s.deadline, "%Y-%m-%d").is_ok(),
                "{} has a bad deadline",
                s.title
            );
            assert!(s.is_active);
        }
    }

    #[test]
    fn test_seed_catalog_includes_open_eligibility_entries() {
        assert!(seed_catalog().iter().any(|s| s.eligible_fields.is_empty()));
    }
}
