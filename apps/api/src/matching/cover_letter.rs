use crate::models::job::Job;
use crate::models::resume::Resume;

const MAX_SKILLS_MENTIONED: usize = 5;

/// Fills the fixed cover-letter template for one application.
pub fn generate_cover_letter(job: &Job, resume: &Resume) -> String {
    let mut letter = format!(
        "Dear Hiring Manager,\n\nI am writing to express my interest in the {} position at {}.",
        job.title, job.company
    );

    if !resume.skills.is_empty() {
        let skills: Vec<&str> = resume
            .skills
            .iter()
            .take(MAX_SKILLS_MENTIONED)
            .map(String::as_str)
            .collect();
        letter.push_str(&format!(
            " My background includes hands-on work with {}.",
            skills.join(", ")
        ));
    }

    if let Some(latest) = resume.experience.first() {
        letter.push_str(&format!(
            " Most recently I worked as {} at {}.",
            latest.title, latest.company
        ));
    }

    letter.push_str("\n\nThank you for your consideration.\n\nSincerely,\n");
    if resume.contact.name.is_empty() {
        letter.push_str("The Applicant");
    } else {
        letter.push_str(&resume.contact.name);
    }
    letter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExperienceEntry;
    use crate::test_support::{job, resume_with_skills};

    #[test]
    fn test_letter_names_role_company_and_skills() {
        let mut posting = job("1", "");
        posting.title = "Platform Engineer".to_string();
        posting.company = "Acme".to_string();
        let mut resume = resume_with_skills(&["rust", "docker"]);
        resume.contact.name = "Jane Doe".to_string();
        resume.experience.push(ExperienceEntry {
            title: "Engineer".to_string(),
            company: "Globex".to_string(),
            duration: "January 2020 - Present".to_string(),
            description: String::new(),
        });

        let letter = generate_cover_letter(&posting, &resume);
        assert!(letter.contains("Platform Engineer position at Acme"));
        assert!(letter.contains("rust, docker"));
        assert!(letter.contains("Engineer at Globex"));
        assert!(letter.ends_with("Jane Doe"));
    }

    #[test]
    fn test_letter_without_resume_details() {
        let letter = generate_cover_letter(&job("1", ""), &resume_with_skills(&[]));
        assert!(letter.starts_with("Dear Hiring Manager"));
        assert!(!letter.contains("hands-on"));
        assert!(letter.ends_with("The Applicant"));
    }
}
