use crate::infra::{load_profile, parse_timestamp};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use clap::Args;
use scholarsync::catalog::ScholarshipCatalog;
use scholarsync::config::MatchingConfig;
use scholarsync::error::AppError;
use scholarsync::matching::{
    filter_eligible, rank_scholarships, Activity, EligibilityRequirements, EligibilityStatus,
    MatchResult, Profile, Scholarship, ScholarshipId, UserId,
};
use scholarsync::profile::{validate_activity, validate_profile, ProfileDetails};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Number of recommendations to print.
    #[arg(long, default_value_t = 5)]
    pub(crate) limit: usize,
    /// Print the six factor values under each recommendation.
    #[arg(long)]
    pub(crate) show_factors: bool,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Profile JSON file (camelCase fields, as stored by the web app)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Scholarship catalog (.json seed or .csv export)
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Maximum number of results (defaults to the service default)
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Minimum score to list (defaults to the service default)
    #[arg(long)]
    pub(crate) min_score: Option<u8>,
    /// List every scholarship, ineligible ones included, without a score floor
    #[arg(long)]
    pub(crate) include_ineligible: bool,
    /// Evaluation time (RFC 3339 or YYYY-MM-DD). Defaults to now.
    #[arg(long, value_parser = parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let MatchArgs {
        profile,
        catalog,
        limit,
        min_score,
        include_ineligible,
        now,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let profile = load_profile(&profile)?;
    let catalog = ScholarshipCatalog::from_path(&catalog)?;
    let defaults = MatchingConfig::default();
    let limit = limit.unwrap_or(defaults.default_limit);
    let min_score = min_score.unwrap_or(defaults.default_min_score);

    let matches = select_matches(
        &profile,
        catalog.all(),
        now,
        limit,
        min_score,
        include_ineligible,
    );

    println!(
        "Matches for {} ({} scholarships evaluated at {})",
        profile.user_id,
        catalog.len(),
        now.to_rfc3339()
    );
    render_matches(&matches, true);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        now,
        limit,
        show_factors,
    } = args;

    let now = now.unwrap_or_else(Utc::now);
    let details = sample_details();
    let activities = sample_activities();

    validate_profile(&details, now.date_naive())
        .map_err(|report| AppError::Input(report.to_string()))?;
    for activity in &activities {
        validate_activity(activity).map_err(|report| AppError::Input(report.to_string()))?;
    }

    let profile = details.to_match_profile(activities);
    let catalog = ScholarshipCatalog::new(sample_scholarships(now));

    println!("ScholarSync matching demo");
    println!(
        "- Student {} | {} | GPA {} | profile strength {}/100",
        profile.user_id,
        profile.major.as_deref().unwrap_or("undeclared"),
        profile
            .gpa
            .map(|gpa| format!("{gpa:.2}"))
            .unwrap_or_else(|| "n/a".to_string()),
        profile.profile_strength_score
    );
    println!(
        "- {} scholarships in catalog, {} open today",
        catalog.len(),
        catalog.active_at(now).len()
    );

    let ranked = rank_scholarships(&profile, catalog.all(), now);
    let mut recommended = filter_eligible(ranked.clone(), true);
    recommended.truncate(limit);

    println!("\nTop recommendations");
    render_matches(&recommended, show_factors);

    let ruled_out: Vec<MatchResult> = ranked
        .into_iter()
        .filter(|result| result.eligibility_status == EligibilityStatus::Ineligible)
        .collect();
    if !ruled_out.is_empty() {
        println!("\nRuled out");
        render_matches(&ruled_out, false);
    }

    Ok(())
}

/// Rank, then either keep everything or apply the recommendation filters.
pub(crate) fn select_matches(
    profile: &Profile,
    scholarships: &[Scholarship],
    now: DateTime<Utc>,
    limit: usize,
    min_score: u8,
    include_ineligible: bool,
) -> Vec<MatchResult> {
    let ranked = rank_scholarships(profile, scholarships, now);
    let mut selected = if include_ineligible {
        ranked
    } else {
        filter_eligible(ranked, true)
            .into_iter()
            .filter(|result| result.score >= min_score)
            .collect()
    };
    selected.truncate(limit);
    selected
}

fn render_matches(matches: &[MatchResult], show_factors: bool) {
    if matches.is_empty() {
        println!("  (no matching scholarships)");
        return;
    }

    for (position, result) in matches.iter().enumerate() {
        let scholarship = &result.scholarship;
        println!(
            "{:>2}. [{:>3}] {} - {} (${:.0}, due {}) [{}]",
            position + 1,
            result.score,
            scholarship.title,
            scholarship.organization,
            scholarship.amount,
            scholarship.deadline.format("%Y-%m-%d"),
            result.eligibility_status.label()
        );
        for message in result.missing_requirement_messages() {
            println!("      - {message}");
        }
        if show_factors {
            let factors: Vec<String> = result
                .factors
                .breakdown()
                .map(|(kind, value)| format!("{} {:.2}", kind.label(), value))
                .collect();
            println!("      {}", factors.join(" | "));
        }
    }
}

fn sample_details() -> ProfileDetails {
    ProfileDetails {
        user_id: UserId("demo-student".to_string()),
        first_name: Some("Jordan".to_string()),
        last_name: Some("Lee".to_string()),
        phone: Some("+1 (555) 010-2040".to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(2005, 4, 2),
        city: Some("Columbus".to_string()),
        state: Some("OH".to_string()),
        current_school: Some("Ohio State University".to_string()),
        major: Some("Computer Science".to_string()),
        gpa: Some(3.7),
        academic_standing: Some("Junior".to_string()),
        career_goals: Some(
            "Build accessible software for public libraries and community colleges.".to_string(),
        ),
        ..ProfileDetails::default()
    }
}

fn sample_activities() -> Vec<Activity> {
    vec![
        Activity {
            organization: Some("Campus Robotics Club".to_string()),
            role: Some("Team Lead".to_string()),
            is_current: true,
            hours_per_week: Some(6),
            ..Activity::of_type("leadership")
        },
        Activity {
            organization: Some("City Food Bank".to_string()),
            hours_per_week: Some(3),
            ..Activity::of_type("volunteer")
        },
    ]
}

fn sample_scholarships(now: DateTime<Utc>) -> Vec<Scholarship> {
    let listing = |id: &str,
                   title: &str,
                   organization: &str,
                   amount: f64,
                   days: i64,
                   tags: &[&str],
                   requirements: EligibilityRequirements| Scholarship {
        id: ScholarshipId(id.to_string()),
        title: title.to_string(),
        organization: organization.to_string(),
        amount,
        deadline: now + Duration::days(days),
        description: String::new(),
        application_url: None,
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        eligibility_requirements: requirements,
        is_active: true,
    };

    vec![
        listing(
            "sch-0001",
            "Tech Leaders Scholarship",
            "Tech Foundation",
            5_000.0,
            21,
            &["STEM", "Technology", "Leadership"],
            EligibilityRequirements {
                min_gpa: Some(3.5),
                majors: Some(vec![
                    "Computer Science".to_string(),
                    "Engineering".to_string(),
                ]),
                academic_standing: Some(vec!["Junior".to_string(), "Senior".to_string()]),
                ..EligibilityRequirements::default()
            },
        ),
        listing(
            "sch-0002",
            "Community Service Award",
            "Civic Trust",
            2_500.0,
            50,
            &["Volunteer", "Community Service"],
            EligibilityRequirements::default(),
        ),
        listing(
            "sch-0003",
            "Future Educators Grant",
            "Teaching Alliance",
            3_000.0,
            75,
            &["Education"],
            EligibilityRequirements {
                majors: Some(vec!["Education".to_string()]),
                ..EligibilityRequirements::default()
            },
        ),
        listing(
            "sch-0004",
            "Presidential Merit Award",
            "University Honors",
            10_000.0,
            40,
            &["Academic Excellence"],
            EligibilityRequirements {
                min_gpa: Some(3.9),
                ..EligibilityRequirements::default()
            },
        ),
        listing(
            "sch-0005",
            "Graduate Research Fellowship",
            "Science Council",
            15_000.0,
            120,
            &["Research", "STEM"],
            EligibilityRequirements {
                academic_standing: Some(vec!["Graduate".to_string()]),
                ..EligibilityRequirements::default()
            },
        ),
        listing(
            "sch-0006",
            "Spring Innovation Prize",
            "Maker Network",
            1_000.0,
            -4,
            &["Technology"],
            EligibilityRequirements::default(),
        ),
    ]
}
