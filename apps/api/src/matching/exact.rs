use std::collections::HashSet;

/// Comparison key for a skill label: trimmed, lowercased.
pub fn normalize(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Job skill keys present verbatim in the resume key set.
pub fn match_exact(job_keys: &[String], resume_keys: &HashSet<String>) -> HashSet<String> {
    job_keys
        .iter()
        .filter(|k| resume_keys.contains(*k))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_lowercases() {
        assert_eq!(normalize("  PostgreSQL "), "postgresql");
    }

    #[test]
    fn test_match_exact_only_verbatim() {
        let job = vec!["python".to_string(), "aws".to_string()];
        let resume: HashSet<String> = ["python".to_string(), "aws lambda".to_string()].into();
        let matched = match_exact(&job, &resume);
        assert!(matched.contains("python"));
        assert!(!matched.contains("aws"));
    }
}
