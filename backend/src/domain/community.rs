//! Read models for the leaderboard and profile pages.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::{IdentityId, Project, ProjectSummary, TemplateSummary, User};

/// Number of builders shown by the leaderboard API.
pub const LEADERBOARD_API_LIMIT: usize = 5;
/// Number of builders shown on the leaderboard page.
pub const LEADERBOARD_PAGE_LIMIT: usize = 10;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One ranked builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub user_id: IdentityId,
    pub username: Option<String>,
    pub project_count: usize,
}

/// Ranking plus headline totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Leaderboard {
    pub top_users: Vec<LeaderboardEntry>,
    pub this_month_count: usize,
    pub total_contracts: usize,
}

impl Leaderboard {
    /// Rank owners of `projects` by project count.
    ///
    /// Ties are broken by the earliest first project, then by identity id, so
    /// the ordering is stable across calls.
    pub fn rank(projects: &[Project], limit: usize, now: DateTime<Utc>) -> Self {
        struct Tally<'a> {
            user_id: &'a IdentityId,
            username: Option<&'a str>,
            count: usize,
            first: DateTime<Utc>,
        }

        let mut tallies: HashMap<&IdentityId, Tally<'_>> = HashMap::new();
        for project in projects {
            let tally = tallies.entry(&project.user_id).or_insert_with(|| Tally {
                user_id: &project.user_id,
                username: project.owner_username.as_deref(),
                count: 0,
                first: project.created_at,
            });
            tally.count += 1;
            tally.first = tally.first.min(project.created_at);
            if tally.username.is_none() {
                tally.username = project.owner_username.as_deref();
            }
        }

        let mut ranked: Vec<Tally<'_>> = tallies.into_values().collect();
        ranked.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then(a.first.cmp(&b.first))
                .then(a.user_id.cmp(b.user_id))
        });

        let top_users = ranked
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, tally)| LeaderboardEntry {
                rank: index + 1,
                user_id: tally.user_id.clone(),
                username: tally.username.map(str::to_owned),
                project_count: tally.count,
            })
            .collect();

        let this_month_count = projects
            .iter()
            .filter(|project| {
                project.created_at.year() == now.year() && project.created_at.month() == now.month()
            })
            .count();

        Self {
            top_users,
            this_month_count,
            total_contracts: projects.len(),
        }
    }
}

/// Projects created during one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyActivity {
    pub month: u32,
    pub label: &'static str,
    pub count: usize,
}

/// Count projects per month for the twelve months of `year`.
pub fn monthly_activity(projects: &[Project], year: i32) -> Vec<MonthlyActivity> {
    let mut counts = [0_usize; 12];
    for project in projects.iter().filter(|p| p.created_at.year() == year) {
        if let Some(slot) = counts.get_mut(project.created_at.month0() as usize) {
            *slot += 1;
        }
    }
    MONTH_LABELS
        .into_iter()
        .zip(counts)
        .zip(1_u32..)
        .map(|((label, count), month)| MonthlyActivity {
            month,
            label,
            count,
        })
        .collect()
}

/// Public-facing user fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub username: String,
    pub name: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public profile at `/u/{username}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub user: PublicUser,
    pub projects: Vec<ProjectSummary>,
    pub counts_by_template_type: BTreeMap<String, usize>,
}

impl PublicProfile {
    /// Assemble a profile from the user and their projects (newest first).
    pub fn new(user: &User, username: String, projects: Vec<Project>) -> Self {
        let mut counts_by_template_type = BTreeMap::new();
        for project in &projects {
            *counts_by_template_type
                .entry(project.template_type.clone())
                .or_insert(0) += 1;
        }
        Self {
            user: PublicUser {
                username,
                name: user.display_name.clone(),
                created_at: user.created_at,
            },
            projects: projects.into_iter().map(ProjectSummary::from).collect(),
            counts_by_template_type,
        }
    }
}

/// The signed-in user's own profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnProfile {
    pub user: Option<User>,
    pub projects: Vec<Project>,
    pub templates: Vec<TemplateSummary>,
}
