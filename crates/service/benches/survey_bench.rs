use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use migration::MigratorTrait;
use service::survey::mapper::NewSurvey;
use service::survey::repository::SeaOrmSurveyRepository;
use service::survey::service::SurveyService;
use service::survey::SurveyFields;

fn fields() -> SurveyFields {
    SurveyFields {
        name: "Bench".into(),
        age: 40,
        address: "Jl. Benchmark 1".into(),
        symptoms: "cough".into(),
        latitude: Some(-6.2),
        longitude: Some(106.8),
    }
}

fn bench_surveys(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let svc = rt.block_on(async {
        let db = models::db::connect_with_config(&configs::DatabaseConfig::in_memory_sqlite()).await.unwrap();
        migration::Migrator::up(&db, None).await.unwrap();
        Arc::new(SurveyService::new(Arc::new(SeaOrmSurveyRepository { db })))
    });

    // seed one owner with a realistic list size outside of the measurement
    rt.block_on(async {
        for _ in 0..200 {
            svc.create(NewSurvey { surveyor_email: "list@example.com".into(), fields: fields() }).await.unwrap();
        }
    });

    c.bench_function("survey_create", |b| {
        b.to_async(&rt).iter(|| async {
            svc.create(NewSurvey { surveyor_email: "bench@example.com".into(), fields: fields() }).await.unwrap();
        });
    });

    c.bench_function("survey_list_by_owner_200", |b| {
        b.to_async(&rt).iter(|| async {
            let list = svc.list_by_owner("list@example.com").await.unwrap();
            assert_eq!(list.len(), 200);
        });
    });
}

criterion_group!(benches, bench_surveys);
criterion_main!(benches);
