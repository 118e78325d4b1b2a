//! Access decision benchmarks
//!
//! Hierarchy expansion over chains of increasing depth, and full decisions
//! through the stock voter list.

use catalog_authz::{
    AccessDecisionManager, Attribute, CombinationStrategy, ManagerConfig, Resource, RoleHierarchy,
};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// ROLE_0 -> ROLE_1 -> ... -> ROLE_{depth}
fn chain_hierarchy(depth: usize) -> RoleHierarchy {
    RoleHierarchy::from_rules(
        (0..depth).map(|i| (format!("ROLE_{}", i), vec![format!("ROLE_{}", i + 1)])),
    )
    .unwrap()
}

fn bench_reachable_roles(c: &mut Criterion) {
    let mut group = c.benchmark_group("reachable_roles");

    for depth in [1, 10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::new("chain_depth", depth), depth, |b, &depth| {
            let hierarchy = chain_hierarchy(depth);
            b.iter(|| black_box(hierarchy.reachable_roles(black_box(["ROLE_0"]))));
        });
    }

    group.finish();
}

fn bench_decide(c: &mut Criterion) {
    let hierarchy = RoleHierarchy::from_rules([
        ("ROLE_SUPER_ADMIN", vec!["ROLE_ADMIN"]),
        ("ROLE_ADMIN", vec!["ROLE_USER"]),
    ])
    .unwrap();
    let manager = AccessDecisionManager::with_default_voters(ManagerConfig::default(), hierarchy);
    let movie = Resource::new("movie:42").with_attribute("content_age", "mature");

    let mut group = c.benchmark_group("decide");

    for strategy in [
        CombinationStrategy::Affirmative,
        CombinationStrategy::Unanimous,
        CombinationStrategy::Consensus,
    ] {
        group.bench_function(BenchmarkId::new("underage", strategy), |b| {
            b.iter(|| {
                black_box(manager.decide(
                    black_box(["ROLE_UNDERAGE"]),
                    Attribute::Underage,
                    Some(&movie),
                    strategy,
                ))
            });
        });
    }

    group.bench_function("admin_inherited", |b| {
        b.iter(|| {
            black_box(manager.decide_default(
                black_box(["ROLE_SUPER_ADMIN"]),
                Attribute::Admin,
                None,
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, bench_reachable_roles, bench_decide);
criterion_main!(benches);
