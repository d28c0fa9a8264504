pub mod report_service;

use std::sync::Arc;

use crate::repository::*;
use report_service::ReportService;

pub struct ServiceContext {
    pub member_repo: Arc<dyn MemberRepository>,
    pub contribution_repo: Arc<dyn ContributionRepository>,
    pub attendance_repo: Arc<dyn AttendanceRepository>,
    pub activity_repo: Arc<dyn ActivityRepository>,
    pub report_service: Arc<ReportService>,
}

impl ServiceContext {
    pub fn new(
        member_repo: Arc<dyn MemberRepository>,
        contribution_repo: Arc<dyn ContributionRepository>,
        attendance_repo: Arc<dyn AttendanceRepository>,
        activity_repo: Arc<dyn ActivityRepository>,
    ) -> Self {
        let report_service = Arc::new(ReportService::new(
            member_repo.clone(),
            contribution_repo.clone(),
            attendance_repo.clone(),
            activity_repo.clone(),
        ));

        Self {
            member_repo,
            contribution_repo,
            attendance_repo,
            activity_repo,
            report_service,
        }
    }
}
