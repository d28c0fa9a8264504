use chrono::{Datelike, Duration, Utc};
use clap::Parser;
use fake::faker::name::fr_fr::{FirstName, LastName};
use fake::Fake;
use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::sqlite::SqlitePoolOptions;

use koinonia::{
    domain::{
        ActivityStatus, ContributionStatus, CreateActivityRequest, CreateAttendanceRequest,
        CreateContributionRequest, CreateMemberRequest, MemberStatus, ServiceType, LEADER_DUES,
        STANDARD_DUES,
    },
    repository::{
        ActivityRepository, AttendanceRepository, ContributionRepository, MemberRepository,
        SqliteActivityRepository, SqliteAttendanceRepository, SqliteContributionRepository,
        SqliteMemberRepository,
    },
};

#[derive(Parser)]
#[command(about = "Seed the Koinonia database with demo data")]
struct Args {
    /// Number of members to create
    #[arg(long, default_value_t = 15)]
    members: usize,

    /// Number of activities to create
    #[arg(long, default_value_t = 6)]
    activities: usize,

    /// Months of contribution history to generate
    #[arg(long, default_value_t = 4)]
    history_months: i32,
}

const NEIGHBORHOODS: [&str; 5] = ["Plateau", "Médina", "Ouakam", "Yoff", "Grand-Dakar"];
const CHURCH_ROLES: [&str; 4] = ["Chantre", "Intercesseur", "Protocole", "Communication"];
const SERVICE_TYPES: [ServiceType; 4] = [
    ServiceType::TuesdayMeditation,
    ServiceType::ThursdayExhortation,
    ServiceType::SundayWorship,
    ServiceType::Activities,
];

/// Walks back `back` months from (month, year), rolling over year ends.
fn period_back(month: i32, year: i32, back: i32) -> (i32, i32) {
    let mut month = month - back;
    let mut year = year;
    while month < 1 {
        month += 12;
        year -= 1;
    }
    (month, year)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    println!("🌱 Starting database seeding...");

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:koinonia.db".to_string());

    let db_pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    println!("📋 Running migrations...");
    sqlx::migrate!("./migrations").run(&db_pool).await?;

    let member_repo = SqliteMemberRepository::new(db_pool.clone());
    let contribution_repo = SqliteContributionRepository::new(db_pool.clone());
    let attendance_repo = SqliteAttendanceRepository::new(db_pool.clone());
    let activity_repo = SqliteActivityRepository::new(db_pool.clone());

    let mut rng = rand::thread_rng();
    let now = Utc::now();
    let current_month = now.month() as i32;
    let current_year = now.year();

    println!("👥 Creating {} members...", args.members);
    let mut members = Vec::with_capacity(args.members);
    for i in 0..args.members {
        let is_leader = i % 5 == 0;
        let status = if i % 8 == 7 {
            MemberStatus::Inactive
        } else {
            MemberStatus::Active
        };

        let member = member_repo
            .create(CreateMemberRequest {
                first_name: FirstName().fake(),
                last_name: LastName().fake(),
                date_of_birth: None,
                photo_url: None,
                church_role: if is_leader {
                    CHURCH_ROLES.choose(&mut rng).map(|r| r.to_string())
                } else {
                    None
                },
                external_role: None,
                neighborhood: NEIGHBORHOODS.choose(&mut rng).map(|n| n.to_string()),
                phone: Some(format!("+221 77 {:03} {:02} {:02}",
                    rng.gen_range(100..1000),
                    rng.gen_range(10..100),
                    rng.gen_range(10..100))),
                is_leader,
                status,
            })
            .await?;
        members.push(member);
    }
    println!("  ✅ Created {} members", members.len());

    println!("💰 Creating contributions for the last {} months...", args.history_months);
    let mut contribution_count = 0;
    for member in &members {
        for back in 0..args.history_months {
            // A few members skip a period now and then
            if rng.gen_bool(0.15) {
                continue;
            }

            let (month, year) = period_back(current_month, current_year, back);
            let amount = if member.is_leader { LEADER_DUES } else { STANDARD_DUES };
            let status = if rng.gen_bool(0.9) {
                ContributionStatus::Paid
            } else {
                ContributionStatus::Unpaid
            };

            contribution_repo
                .create(CreateContributionRequest {
                    member_id: member.id,
                    amount,
                    month,
                    year,
                    status,
                    paid_date: None,
                })
                .await?;
            contribution_count += 1;
        }
    }
    println!("  ✅ Created {} contributions", contribution_count);

    println!("📋 Creating attendance sheets...");
    let mut attendance_count = 0;
    for week in 0..6 {
        let date = (now - Duration::weeks(week)).date_naive();
        let service_type = SERVICE_TYPES[rng.gen_range(0..SERVICE_TYPES.len())];

        for member in &members {
            attendance_repo
                .create(CreateAttendanceRequest {
                    member_id: member.id,
                    service_type,
                    date,
                    present: rng.gen_bool(0.8),
                })
                .await?;
            attendance_count += 1;
        }
    }
    println!("  ✅ Created {} attendance rows", attendance_count);

    println!("📅 Creating {} activities...", args.activities);
    for i in 0..args.activities {
        // Alternate between future and past dates
        let offset_days = rng.gen_range(3..45);
        let (date, status) = if i % 2 == 0 {
            (now + Duration::days(offset_days), ActivityStatus::Upcoming)
        } else {
            (now - Duration::days(offset_days), ActivityStatus::Past)
        };

        let responsible = members.choose(&mut rng);
        let activity = activity_repo
            .create(CreateActivityRequest {
                title: format!("Activité {}", i + 1),
                description: Some("Rencontre du groupe de jeunes".to_string()),
                date,
                responsible_id: responsible.map(|m| m.id),
                status,
            })
            .await?;

        let participant_count = if members.is_empty() {
            0
        } else {
            rng.gen_range(0..members.len().min(8))
        };
        for member in members.choose_multiple(&mut rng, participant_count) {
            activity_repo.add_participant(activity.id, member.id).await?;
        }
    }
    println!("  ✅ Created {} activities", args.activities);

    println!("🎉 Seeding complete!");

    Ok(())
}
