use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sortify::db::SortifyDb;
use sortify::models::UserProfile;
use sortify::services::achievements;
use sortify::services::leaderboard;
use sortify::services::progression::xp_for_confidence;

fn benchmark_progression(c: &mut Criterion) {
    let start = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();

    let mut group = c.benchmark_group("progression");

    group.bench_function("xp_for_confidence", |b| {
        b.iter(|| xp_for_confidence(black_box(0.87)))
    });

    group.bench_function("apply_scan_year_of_days", |b| {
        b.iter(|| {
            let mut user = UserProfile::new("u_bench".to_string(), "bench", achievements::catalog());
            for day in 0..365 {
                user.apply_scan(black_box(14), start + Duration::days(day));
                achievements::evaluate(&mut user, start + Duration::days(day));
            }
            user
        })
    });

    group.finish();
}

fn benchmark_leaderboard(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    // Seed a store with a realistic population
    let db = SortifyDb::new_in_memory();
    rt.block_on(async {
        for i in 0u32..1000 {
            let mut user = UserProfile::new(format!("u_{}", i), &format!("user{}", i), vec![]);
            user.points = (i * 37) % 5000;
            db.upsert_user(&user).await.unwrap();
        }
    });

    c.bench_function("leaderboard_project_1000_users", |b| {
        b.iter(|| rt.block_on(async { leaderboard::project(black_box(&db)).await.unwrap() }))
    });
}

criterion_group!(benches, benchmark_progression, benchmark_leaderboard);
criterion_main!(benches);
