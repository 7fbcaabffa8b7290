//! Pattern rules for résumé fields. All matching is best-effort: a block or
//! field that does not fit the patterns is dropped or left empty.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extract::StructuredExtractor;
use crate::models::resume::{ContactInfo, EducationEntry, ExperienceEntry};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{3}[-.]?\d{3}[-.]?\d{4}\b").expect("valid phone regex"));
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^([A-Z][a-z]+ [A-Z][a-z]+)").expect("valid name regex"));
static LOCATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([A-Z][a-z]+(?:[\s,]+[A-Z][a-z]+)*,\s*[A-Z]{2})\b").expect("valid location regex")
});

static EXPERIENCE_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.+?)\s*(?:\bat\b|@|,)\s*(.+?)\s*$").expect("valid experience header regex")
});
static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\w+ \d{4}\s*[-–]\s*(?:\w+ \d{4}|present))").expect("valid duration regex")
});
static EDUCATION_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(.+?)\s*(?:\bfrom\b|\bat\b|,)\s*(.+?)\s*$")
        .expect("valid education header regex")
});
static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(\d{4})").expect("valid year regex"));
static BLOCK_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n(?:[ \t]*\n)+").expect("valid block separator regex"));

const MIN_EXPERIENCE_LINES: usize = 3;
const MIN_EDUCATION_LINES: usize = 2;

/// Splits section text into blank-line separated blocks.
pub fn split_blocks(section: &str) -> impl Iterator<Item = &str> {
    BLOCK_SEPARATOR_RE
        .split(section)
        .map(|block| block.trim_matches('\n'))
        .filter(|block| !block.trim().is_empty())
}

/// Scans the whole document; first match wins per field.
pub struct ContactExtractor;

impl StructuredExtractor for ContactExtractor {
    type Output = ContactInfo;

    fn extract(&self, input: &str) -> ContactInfo {
        let first = |re: &Regex, group: usize| {
            re.captures(input)
                .and_then(|c| c.get(group))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        };

        ContactInfo {
            name: first(&NAME_RE, 1),
            email: first(&EMAIL_RE, 0),
            phone: first(&PHONE_RE, 0),
            location: first(&LOCATION_RE, 1),
        }
    }
}

/// `<title> at|@|, <company>` followed by a duration line, then description.
pub struct ExperienceBlockExtractor;

impl StructuredExtractor for ExperienceBlockExtractor {
    type Output = Option<ExperienceEntry>;

    fn extract(&self, block: &str) -> Option<ExperienceEntry> {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < MIN_EXPERIENCE_LINES {
            return None;
        }

        let header = EXPERIENCE_HEADER_RE.captures(lines[0])?;
        let duration = DURATION_RE.captures(lines[1])?;

        Some(ExperienceEntry {
            title: header[1].trim().to_string(),
            company: header[2].trim().to_string(),
            duration: duration[1].to_string(),
            description: lines[2..].join("\n").trim().to_string(),
        })
    }
}

/// `<degree> from|at|, <institution>` followed by a line with a year.
pub struct EducationBlockExtractor;

impl StructuredExtractor for EducationBlockExtractor {
    type Output = Option<EducationEntry>;

    fn extract(&self, block: &str) -> Option<EducationEntry> {
        let lines: Vec<&str> = block.lines().collect();
        if lines.len() < MIN_EDUCATION_LINES {
            return None;
        }

        let header = EDUCATION_HEADER_RE.captures(lines[0])?;
        let year = YEAR_RE.captures(lines[1])?;

        Some(EducationEntry {
            degree: header[1].trim().to_string(),
            institution: header[2].trim().to_string(),
            year: year[1].to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_fields() {
        let text = "Jane Doe\njane.doe@example.com | 555-123-4567\nAustin, TX\n";
        let contact = ContactExtractor.extract(text);
        assert_eq!(contact.name, "Jane Doe");
        assert_eq!(contact.email, "jane.doe@example.com");
        assert_eq!(contact.phone, "555-123-4567");
        assert_eq!(contact.location, "Austin, TX");
    }

    #[test]
    fn test_missing_contact_fields_are_empty() {
        let contact = ContactExtractor.extract("no contact details here");
        assert_eq!(contact, ContactInfo::default());
    }

    #[test]
    fn test_first_email_wins() {
        let contact = ContactExtractor.extract("a@one.com\nb@two.com");
        assert_eq!(contact.email, "a@one.com");
    }

    #[test]
    fn test_experience_block_with_at() {
        let block = "Senior Software Engineer at Acme Corp\nJanuary 2020 - Present\nLed the platform team.\nCut costs.";
        let entry = ExperienceBlockExtractor.extract(block).unwrap();
        assert_eq!(entry.title, "Senior Software Engineer");
        assert_eq!(entry.company, "Acme Corp");
        assert_eq!(entry.duration, "January 2020 - Present");
        assert_eq!(entry.description, "Led the platform team.\nCut costs.");
    }

    #[test]
    fn test_experience_block_with_comma_and_at_sign() {
        let comma = "Data Analyst, Globex\nMarch 2017 - December 2019\nDashboards.";
        let entry = ExperienceBlockExtractor.extract(comma).unwrap();
        assert_eq!(entry.title, "Data Analyst");
        assert_eq!(entry.company, "Globex");

        let at_sign = "Engineer @ Initech\nJune 2015 - May 2016\nTPS reports.";
        let entry = ExperienceBlockExtractor.extract(at_sign).unwrap();
        assert_eq!(entry.company, "Initech");
    }

    #[test]
    fn test_experience_block_rejects_short_or_undated_blocks() {
        assert!(ExperienceBlockExtractor
            .extract("Engineer at Acme\nJanuary 2020 - Present")
            .is_none());
        assert!(ExperienceBlockExtractor
            .extract("Engineer at Acme\nsome time ago\nthings")
            .is_none());
        assert!(ExperienceBlockExtractor
            .extract("Just a heading\nJanuary 2020 - Present\nthings")
            .is_none());
    }

    #[test]
    fn test_education_block() {
        let block = "Bachelor of Science from State University\n2013 - 2017";
        let entry = EducationBlockExtractor.extract(block).unwrap();
        assert_eq!(entry.degree, "Bachelor of Science");
        assert_eq!(entry.institution, "State University");
        assert_eq!(entry.year, "2013");
    }

    #[test]
    fn test_education_block_needs_year() {
        assert!(EducationBlockExtractor
            .extract("MSc at Tech Institute\nwith honors")
            .is_none());
        assert!(EducationBlockExtractor.extract("MSc at Tech Institute").is_none());
    }

    #[test]
    fn test_split_blocks_collapses_blank_runs() {
        let text = "Heading\n\n\nfirst\nblock\n \nsecond\n";
        let blocks: Vec<&str> = split_blocks(text).collect();
        assert_eq!(blocks, vec!["Heading", "first\nblock", "second"]);
    }
}
