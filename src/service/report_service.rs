//! The read-side aggregation engine. Every method re-derives its result
//! from the current store contents; nothing is cached between calls.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::{
    domain::{
        Activity, ActivityParticipantWithName, ActivityWithDetails, AttendanceWithMember,
        ContributionStats, ContributionWithMember, DashboardStats, MemberRef, MonthlyAmount,
    },
    error::Result,
    repository::{
        ActivityRepository, AttendanceRepository, ContributionRepository, MemberRepository,
    },
};

/// Fixed chart axis; months with no contributions keep a zero bucket.
const MONTH_LABELS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Juin",
    "Juil", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// The dashboard shows at most this many upcoming activities.
const UPCOMING_LIMIT: i64 = 5;

/// Id -> name/photo lookup built from one members query. This is the single
/// decoration path for every report shape: a row whose member has been
/// deleted keeps its place in the listing with an absent name instead of
/// vanishing or erroring.
struct MemberDirectory {
    by_id: HashMap<Uuid, MemberRef>,
}

impl MemberDirectory {
    fn new(members: Vec<MemberRef>) -> Self {
        let by_id = members.into_iter().map(|m| (m.id, m)).collect();
        Self { by_id }
    }

    fn display_name(&self, member_id: Uuid) -> Option<String> {
        self.by_id
            .get(&member_id)
            .map(|m| format!("{} {}", m.first_name, m.last_name))
    }

    fn photo_url(&self, member_id: Uuid) -> Option<String> {
        self.by_id.get(&member_id).and_then(|m| m.photo_url.clone())
    }
}

pub struct ReportService {
    member_repo: Arc<dyn MemberRepository>,
    contribution_repo: Arc<dyn ContributionRepository>,
    attendance_repo: Arc<dyn AttendanceRepository>,
    activity_repo: Arc<dyn ActivityRepository>,
}

impl ReportService {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        contribution_repo: Arc<dyn ContributionRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
    ) -> Self {
        Self {
            member_repo,
            contribution_repo,
            attendance_repo,
            activity_repo,
        }
    }

    async fn directory(&self) -> Result<MemberDirectory> {
        Ok(MemberDirectory::new(self.member_repo.name_index().await?))
    }

    /// The four landing-view figures. One timestamp is captured up front and
    /// threaded through every sub-query so the figures of one response agree
    /// on the instant, even when the pass is slow.
    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        let now = Utc::now();
        let month = now.month() as i32;
        let year = now.year();

        let total_members = self.member_repo.count_active().await?;
        let monthly_contributions = self.contribution_repo.sum_for_period(month, year).await?;

        let total_rows = self.attendance_repo.count_all().await?;
        let present_rows = self.attendance_repo.count_present().await?;
        let attendance_rate = if total_rows > 0 {
            ((present_rows as f64 / total_rows as f64) * 100.0).round() as i64
        } else {
            0
        };

        let upcoming_activities = self.activity_repo.count_upcoming(now).await?;

        Ok(DashboardStats {
            total_members,
            monthly_contributions,
            attendance_rate,
            upcoming_activities,
        })
    }

    /// Treasury summary. `up_to_date` counts distinct members with a paid
    /// record for the current period, so it never exceeds one per member.
    pub async fn contribution_stats(&self) -> Result<ContributionStats> {
        let now = Utc::now();
        let month = now.month() as i32;
        let year = now.year();

        let total = self.contribution_repo.sum_all().await?;
        let this_month = self.contribution_repo.sum_for_period(month, year).await?;
        let total_members = self.member_repo.count_active().await?;
        let up_to_date = self.contribution_repo.count_paid_members(month, year).await?;

        Ok(ContributionStats {
            total,
            this_month,
            total_members,
            up_to_date,
        })
    }

    /// Exactly 12 buckets in calendar order for the requested year. The
    /// sparse grouped-sum result is scattered into a pre-allocated zero
    /// array by 1-based month index; out-of-range keys are ignored.
    pub async fn monthly_chart(&self, year: i32) -> Result<Vec<MonthlyAmount>> {
        let totals = self.contribution_repo.monthly_totals(year).await?;

        let mut amounts = [0i64; 12];
        for (month, total) in totals {
            if (1..=12).contains(&month) {
                amounts[(month - 1) as usize] = total;
            }
        }

        Ok(MONTH_LABELS
            .into_iter()
            .zip(amounts)
            .map(|(month, amount)| MonthlyAmount { month, amount })
            .collect())
    }

    /// All contributions, newest paid_date first, decorated with names.
    pub async fn contributions_with_members(&self) -> Result<Vec<ContributionWithMember>> {
        let directory = self.directory().await?;
        let contributions = self.contribution_repo.list().await?;

        Ok(contributions
            .into_iter()
            .map(|contribution| {
                let member_name = directory.display_name(contribution.member_id);
                ContributionWithMember {
                    contribution,
                    member_name,
                }
            })
            .collect())
    }

    /// All attendance rows, newest date first, decorated with names.
    pub async fn attendances_with_members(&self) -> Result<Vec<AttendanceWithMember>> {
        let directory = self.directory().await?;
        let attendances = self.attendance_repo.list().await?;

        Ok(attendances
            .into_iter()
            .map(|attendance| {
                let member_name = directory.display_name(attendance.member_id);
                AttendanceWithMember {
                    attendance,
                    member_name,
                }
            })
            .collect())
    }

    /// All activities, newest date first, each composed with its
    /// responsible's name and resolved participant list.
    pub async fn activities_with_details(&self) -> Result<Vec<ActivityWithDetails>> {
        let directory = self.directory().await?;
        let activities = self.activity_repo.list().await?;

        let mut composed = Vec::with_capacity(activities.len());
        for activity in activities {
            composed.push(self.compose_activity(activity, &directory).await?);
        }

        Ok(composed)
    }

    pub async fn activity_with_details(&self, id: Uuid) -> Result<Option<ActivityWithDetails>> {
        let activity = match self.activity_repo.find_by_id(id).await? {
            Some(activity) => activity,
            None => return Ok(None),
        };

        let directory = self.directory().await?;
        Ok(Some(self.compose_activity(activity, &directory).await?))
    }

    /// The 5 soonest activities with date >= now, ascending. The stored
    /// status field plays no part in the filter.
    pub async fn upcoming_activities(&self) -> Result<Vec<ActivityWithDetails>> {
        let now = Utc::now();
        let directory = self.directory().await?;
        let activities = self.activity_repo.list_upcoming(now, UPCOMING_LIMIT).await?;

        let mut composed = Vec::with_capacity(activities.len());
        for activity in activities {
            composed.push(self.compose_activity(activity, &directory).await?);
        }

        Ok(composed)
    }

    /// Participant list of one activity, decorated with name and photo.
    pub async fn activity_participants(
        &self,
        activity_id: Uuid,
    ) -> Result<Vec<ActivityParticipantWithName>> {
        let directory = self.directory().await?;
        self.decorated_participants(activity_id, &directory).await
    }

    async fn compose_activity(
        &self,
        activity: Activity,
        directory: &MemberDirectory,
    ) -> Result<ActivityWithDetails> {
        let participants = self.decorated_participants(activity.id, directory).await?;
        let responsible_name = activity
            .responsible_id
            .and_then(|id| directory.display_name(id));

        Ok(ActivityWithDetails {
            participant_count: participants.len(),
            responsible_name,
            participants,
            activity,
        })
    }

    async fn decorated_participants(
        &self,
        activity_id: Uuid,
        directory: &MemberDirectory,
    ) -> Result<Vec<ActivityParticipantWithName>> {
        let participants = self.activity_repo.list_participants(activity_id).await?;

        Ok(participants
            .into_iter()
            .map(|p| ActivityParticipantWithName {
                id: p.id,
                member_id: p.member_id,
                name: directory.display_name(p.member_id),
                photo_url: directory.photo_url(p.member_id),
            })
            .collect())
    }
}
