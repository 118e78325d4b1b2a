//! Expansion tests over realistic hierarchies
//!
//! Covers chains, diamonds, cycles and unknown roles.

use super::resolver::{RoleHierarchy, RoleHierarchyBuilder};
use super::types::RoleImplication;
use crate::types::role_set;

fn catalog_hierarchy() -> RoleHierarchy {
    RoleHierarchy::from_rules([
        ("ROLE_SUPER_ADMIN", vec!["ROLE_ADMIN"]),
        ("ROLE_ADMIN", vec!["ROLE_MODERATOR", "ROLE_EDITOR"]),
        ("ROLE_MODERATOR", vec!["ROLE_USER"]),
        ("ROLE_EDITOR", vec!["ROLE_USER"]),
    ])
    .unwrap()
}

// ============================================================================
// Expansion Tests
// ============================================================================

#[test]
fn test_unknown_role_reaches_only_itself() {
    let hierarchy = catalog_hierarchy();
    assert_eq!(
        hierarchy.reachable_roles(["ROLE_GUEST"]),
        role_set(["ROLE_GUEST"])
    );
}

#[test]
fn test_empty_input() {
    let hierarchy = catalog_hierarchy();
    assert!(hierarchy.reachable_roles(Vec::<String>::new()).is_empty());
}

#[test]
fn test_diamond_yields_each_role_once() {
    let hierarchy = catalog_hierarchy();
    let reachable = hierarchy.reachable_roles(["ROLE_SUPER_ADMIN"]);

    let ordered: Vec<&str> = reachable.iter().map(String::as_str).collect();
    assert_eq!(
        ordered,
        vec![
            "ROLE_ADMIN",
            "ROLE_EDITOR",
            "ROLE_MODERATOR",
            "ROLE_SUPER_ADMIN",
            "ROLE_USER",
        ]
    );
}

#[test]
fn test_mixed_known_and_unknown_roles() {
    let hierarchy = catalog_hierarchy();
    let reachable = hierarchy.reachable_roles(["ROLE_EDITOR", "ROLE_UNDERAGE"]);
    assert_eq!(
        reachable,
        role_set(["ROLE_EDITOR", "ROLE_UNDERAGE", "ROLE_USER"])
    );
}

#[test]
fn test_expansion_is_idempotent() {
    let hierarchy = catalog_hierarchy();
    let once = hierarchy.reachable_roles(["ROLE_ADMIN"]);
    let twice = hierarchy.reachable_roles(&once);
    assert_eq!(once, twice);
}

// ============================================================================
// Cycle Tests
// ============================================================================

#[test]
fn test_self_reference_terminates() {
    let hierarchy = RoleHierarchy::from_rules([
        ("ROLE_ADMIN", vec!["ROLE_ADMIN", "ROLE_USER"]),
    ])
    .unwrap();

    assert_eq!(
        hierarchy.reachable_roles(["ROLE_ADMIN"]),
        role_set(["ROLE_ADMIN", "ROLE_USER"])
    );
}

#[test]
fn test_two_role_cycle_is_symmetric() {
    let hierarchy = RoleHierarchy::from_rules([
        ("ROLE_A", vec!["ROLE_B"]),
        ("ROLE_B", vec!["ROLE_A", "ROLE_C"]),
    ])
    .unwrap();

    let from_a = hierarchy.reachable_roles(["ROLE_A"]);
    let mut from_b = hierarchy.reachable_roles(["ROLE_B"]);
    from_b.insert("ROLE_A".to_string());
    from_b.insert("ROLE_B".to_string());

    assert_eq!(from_a, from_b);
    assert_eq!(from_a, role_set(["ROLE_A", "ROLE_B", "ROLE_C"]));
}

#[test]
fn test_long_cycle_terminates() {
    let rules: Vec<(String, Vec<String>)> = (0..1_000)
        .map(|i| (format!("ROLE_{}", i), vec![format!("ROLE_{}", (i + 1) % 1_000)]))
        .collect();
    let hierarchy = RoleHierarchy::from_rules(rules).unwrap();

    assert_eq!(hierarchy.reachable_roles(["ROLE_500"]).len(), 1_000);
}

#[test]
fn test_strict_builder_accepts_acyclic() {
    let hierarchy = RoleHierarchyBuilder::new()
        .strict(true)
        .rule(RoleImplication::new("ROLE_ADMIN", ["ROLE_USER"]))
        .and_then(|b| b.build())
        .unwrap();

    assert_eq!(hierarchy.rule_count(), 1);
}
