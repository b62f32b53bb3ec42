//! Job-description skill extraction against a fixed technology vocabulary.

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

const SKILLS: &[&str] = &[
    "python",
    "java",
    "c++",
    "c#",
    "go",
    "rust",
    "javascript",
    "typescript",
    "html",
    "css",
    "sql",
    "nosql",
    "postgresql",
    "mongodb",
    "redis",
    "git",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "gcp",
    "terraform",
    "react",
    "angular",
    "vue",
    "svelte",
    "node.js",
    "django",
    "flask",
    "fastapi",
    "spring boot",
    "machine learning",
    "deep learning",
    "data analysis",
    "pandas",
    "numpy",
    "scikit-learn",
    "tensorflow",
    "pytorch",
    "nlp",
    "computer vision",
    "agile",
    "scrum",
    "jira",
    "rest api",
    "graphql",
    "microservices",
    "cicd",
    "jenkins",
    "github actions",
    "etl",
    "data warehousing",
    "apache spark",
];

/// Alternate spellings that count as the canonical skill.
const ALIASES: &[(&str, &[&str])] = &[
    ("node.js", &["nodejs", "node"]),
    ("c++", &["cpp"]),
    ("c#", &["csharp"]),
    ("github actions", &["github-actions", "githubactions"]),
    ("rest api", &["rest", "restapi"]),
    ("spring boot", &["springboot"]),
    ("machine learning", &["ml", "machine-learning"]),
    ("deep learning", &["deep-learning", "dl"]),
    ("apache spark", &["spark"]),
    ("sql", &["structured query language"]),
    ("cicd", &["ci/cd"]),
    ("kubernetes", &["k8s"]),
];

/// Display casing for labels that plain capitalization gets wrong.
const DISPLAY_NAMES: &[(&str, &str)] = &[
    ("c++", "C++"),
    ("c#", "C#"),
    ("node.js", "Node.js"),
    ("aws", "AWS"),
    ("gcp", "GCP"),
    ("cicd", "CI/CD"),
    ("github actions", "GitHub Actions"),
    ("nlp", "NLP"),
    ("sql", "SQL"),
    ("nosql", "NoSQL"),
    ("postgresql", "PostgreSQL"),
    ("mongodb", "MongoDB"),
    ("tensorflow", "TensorFlow"),
    ("pytorch", "PyTorch"),
    ("fastapi", "FastAPI"),
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("graphql", "GraphQL"),
    ("html", "HTML"),
    ("css", "CSS"),
    ("etl", "ETL"),
    ("rest api", "REST API"),
];

/// One compiled matcher per canonical skill, covering all its spellings.
/// A spelling only counts when not glued to another ASCII word character,
/// so punctuation inside "C++" or "Node.js" still matches.
static SKILL_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    SKILLS
        .iter()
        .map(|skill| {
            let spellings = std::iter::once(*skill)
                .chain(
                    ALIASES
                        .iter()
                        .filter(|(canonical, _)| canonical == skill)
                        .flat_map(|(_, aliases)| aliases.iter().copied()),
                )
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join("|");
            let pattern = format!(r"(?i)(?:^|[^A-Za-z0-9_])(?:{spellings})(?:$|[^A-Za-z0-9_])");
            (*skill, Regex::new(&pattern).unwrap())
        })
        .collect()
});

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Display label for a skill key.
pub fn display_name(skill: &str) -> String {
    let key = skill.trim().to_lowercase();
    if let Some((_, name)) = DISPLAY_NAMES.iter().find(|(k, _)| *k == key) {
        return name.to_string();
    }
    key.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) if word.chars().count() > 1 => {
                    first.to_uppercase().chain(chars).collect()
                }
                _ => word.to_string(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Vocabulary skills mentioned in `text`, sorted by key, in display casing.
pub fn extract_job_skills(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }
    let clean = WHITESPACE.replace_all(text, " ");

    let found: BTreeSet<&str> = SKILL_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(&clean))
        .map(|(skill, _)| *skill)
        .collect();

    found.into_iter().map(display_name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_punctuated_skills() {
        let skills = extract_job_skills("We use C++, Node.js and C# daily.");
        assert_eq!(skills, vec!["C#", "C++", "Node.js"]);
    }

    #[test]
    fn test_aliases_map_to_canonical() {
        let skills = extract_job_skills("Experience with nodejs and k8s, plus some ML.");
        assert!(skills.contains(&"Node.js".to_string()));
        assert!(skills.contains(&"Kubernetes".to_string()));
        assert!(skills.contains(&"Machine Learning".to_string()));
    }

    #[test]
    fn test_no_partial_word_matches() {
        // "go" inside "good" and "rust" inside "trust" must not count
        let skills = extract_job_skills("A good team built on trust.");
        assert!(skills.is_empty(), "got {skills:?}");
    }

    #[test]
    fn test_multi_word_skill_across_line_break() {
        let skills = extract_job_skills("Strong machine\n   learning background");
        assert_eq!(skills, vec!["Machine Learning"]);
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extract_job_skills("   ").is_empty());
    }

    #[test]
    fn test_display_name_casing() {
        assert_eq!(display_name("aws"), "AWS");
        assert_eq!(display_name("spring boot"), "Spring Boot");
        assert_eq!(display_name("docker"), "Docker");
        assert_eq!(display_name("go"), "Go");
    }

    #[test]
    fn test_output_sorted_and_deduplicated() {
        let skills = extract_job_skills("Python, python, Docker, AWS and more Python");
        assert_eq!(skills, vec!["AWS", "Docker", "Python"]);
    }
}
