// Criterion benchmarks for Intern Match

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chrono::{Duration, Utc};
use intern_match::core::{resolve_criteria, sort_applications, summarize, ApplicationSort};
use intern_match::models::{Application, ApplicationStatus, MatchScore, PartialMatchingCriteria, StudentSnapshot};
use uuid::Uuid;

fn create_application(id: usize, internships: &[Uuid]) -> Application {
    Application {
        id: Uuid::new_v4(),
        company_id: Uuid::nil(),
        internship_id: internships[id % internships.len()],
        internship: None,
        student: StudentSnapshot {
            id: id.to_string(),
            name: format!("Student {}", id),
            email: None,
        },
        status: ApplicationStatus::ALL[id % ApplicationStatus::ALL.len()],
        notes: String::new(),
        match_score: MatchScore {
            total: ((id * 37) % 100) as f64,
            breakdown: None,
        },
        applied_at: Utc::now() - Duration::minutes((id * 13 % 5000) as i64),
        reviewed_at: None,
    }
}

fn bench_resolve_criteria(c: &mut Criterion) {
    let partial = PartialMatchingCriteria {
        skills: Some(50.0),
        projects: Some(25.0),
        ..Default::default()
    };

    c.bench_function("resolve_criteria", |b| {
        b.iter(|| resolve_criteria(black_box(&partial)));
    });
}

fn bench_sort_applications(c: &mut Criterion) {
    let internships: Vec<Uuid> = (0..10).map(|_| Uuid::new_v4()).collect();
    let mut group = c.benchmark_group("sort_applications");

    for size in [100, 1000, 10000] {
        let applications: Vec<Application> = (0..size).map(|i| create_application(i, &internships)).collect();

        for sort in [ApplicationSort::MatchScore, ApplicationSort::AppliedAt, ApplicationSort::Name] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", sort), size),
                &applications,
                |b, applications| {
                    b.iter(|| sort_applications(black_box(applications.clone()), sort));
                },
            );
        }
    }

    group.finish();
}

fn bench_summarize(c: &mut Criterion) {
    let internships: Vec<Uuid> = (0..20).map(|_| Uuid::new_v4()).collect();
    let applications: Vec<Application> = (0..5000).map(|i| create_application(i, &internships)).collect();

    c.bench_function("summarize_5000", |b| {
        b.iter(|| summarize(black_box(&applications), |_| Some("Internship")));
    });
}

criterion_group!(benches, bench_resolve_criteria, bench_sort_applications, bench_summarize);
criterion_main!(benches);
