use criterion::{black_box, criterion_group, criterion_main, Criterion};
use stockpoint_registry::bootstrap::names;
use stockpoint_registry::services::AuthService;
use stockpoint_registry::{setup_default_container, BootstrapConfig, ServiceRegistry};

fn bench_singleton_hit(c: &mut Criterion) {
    let mut registry = ServiceRegistry::new("bench");
    registry
        .register_singleton::<u64, _>("answer", &[], |_| Ok(42))
        .unwrap();

    // Prime the cache so the loop measures the hit path only.
    let _ = registry.resolve::<u64>("answer").unwrap();

    c.bench_function("singleton_hit", |b| {
        b.iter(|| {
            let value = registry.resolve::<u64>("answer").unwrap();
            black_box(value);
        })
    });
}

fn bench_transient(c: &mut Criterion) {
    let mut registry = ServiceRegistry::new("bench");
    registry
        .register_transient::<u64, _>("sequence", &[], |_| Ok(7))
        .unwrap();

    c.bench_function("transient", |b| {
        b.iter(|| {
            let value = registry.resolve::<u64>("sequence").unwrap();
            black_box(value);
        })
    });
}

fn bench_cold_bootstrap_resolution(c: &mut Criterion) {
    let config = BootstrapConfig::default();

    c.bench_function("cold_bootstrap_auth_chain", |b| {
        b.iter_batched(
            || setup_default_container(&config).unwrap(),
            |registry| {
                let auth = registry.resolve::<AuthService>(names::AUTH_SERVICE).unwrap();
                black_box(auth);
                registry.cleanup().unwrap();
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_singleton_hit,
    bench_transient,
    bench_cold_bootstrap_resolution
);
criterion_main!(benches);
