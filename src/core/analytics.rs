use std::collections::{BTreeMap, HashMap};

use uuid::Uuid;

use crate::models::{Application, ApplicationAnalytics, TopInternship};

/// Number of internships reported in `topInternships`
pub const TOP_INTERNSHIPS: usize = 5;

/// Aggregate a company's applications
///
/// `title_of` resolves internship titles; internships it cannot resolve are
/// left out of the top list, matching an inner join against postings.
pub fn summarize<'a, F>(applications: &[Application], title_of: F) -> ApplicationAnalytics
where
    F: Fn(&Uuid) -> Option<&'a str>,
{
    let total_applications = applications.len() as u64;

    let mut status_counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_internship: HashMap<Uuid, u64> = HashMap::new();
    let mut score_sum = 0.0;

    for application in applications {
        *status_counts.entry(application.status.to_string()).or_default() += 1;
        *per_internship.entry(application.internship_id).or_default() += 1;
        score_sum += application.match_score.total;
    }

    let average_match_score = if applications.is_empty() {
        0.0
    } else {
        score_sum / applications.len() as f64
    };

    let mut counts: Vec<(Uuid, u64)> = per_internship.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    let top_internships = counts
        .into_iter()
        .filter_map(|(internship_id, count)| {
            title_of(&internship_id).map(|title| TopInternship {
                internship_id,
                title: title.to_string(),
                count,
            })
        })
        .take(TOP_INTERNSHIPS)
        .collect();

    ApplicationAnalytics {
        total_applications,
        status_counts,
        average_match_score,
        top_internships,
    }
}
