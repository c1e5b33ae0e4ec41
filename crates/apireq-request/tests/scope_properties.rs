use apireq_request::{Request, StaticRequest};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn name_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[ab]{1,2}", 1..4).prop_map(|segments| segments.join("."))
}

fn request_strategy() -> impl Strategy<Value = StaticRequest> {
    proptest::collection::btree_map(
        name_strategy(),
        proptest::collection::vec("[0-9]{0,2}", 0..3),
        0..12,
    )
    .prop_map(StaticRequest::from_values)
}

fn snapshot(request: &dyn Request) -> BTreeMap<String, Vec<String>> {
    request
        .parameters()
        .into_iter()
        .map(|p| (p.name().to_string(), p.values()))
        .collect()
}

proptest! {
    #[test]
    fn prop_scope_is_associative(
        request in request_strategy(),
        p in "[ab]{1,2}",
        q in "[ab]{1,2}",
    ) {
        let nested = request.scope(&p).scope(&q);
        let direct = request.scope(&format!("{p}.{q}"));

        prop_assert_eq!(&nested, &direct);
        prop_assert_eq!(snapshot(&nested), snapshot(&direct));
        prop_assert_eq!(nested.len(), direct.len());
    }

    #[test]
    fn prop_project_is_associative(
        request in request_strategy(),
        p in "[ab]{1,2}",
        q in "[ab]{1,2}",
    ) {
        let nested = request.project(&p).project(&q);
        let direct = request.project(&format!("{p}.{q}"));

        prop_assert_eq!(snapshot(&nested), snapshot(&direct));
    }

    #[test]
    fn prop_unknown_names_are_empty(
        request in request_strategy(),
        name in "[c-z]{1,4}",
    ) {
        prop_assert!(!request.contains(&name));
        prop_assert_eq!(request.parameter(&name).len(), 0);
        prop_assert!(!request.parameter(&name).is_registered());
    }

    #[test]
    fn prop_scope_agrees_with_root_lookup(
        request in request_strategy(),
        p in "[ab]{1,2}",
    ) {
        let scoped = request.scope(&p);
        for parameter in scoped.parameters() {
            let full = format!("{p}.{}", parameter.name());
            prop_assert!(request.contains(&full));
            prop_assert_eq!(request.parameter(&full).values(), parameter.values());
            prop_assert_eq!(parameter.path(), full);
        }
    }

    #[test]
    fn prop_project_only_adds_exact_prefix(
        request in request_strategy(),
        p in "[ab]{1,2}",
    ) {
        let lazy = snapshot(&request.scope(&p));
        let mut eager = snapshot(&request.project(&p));

        let own = eager.remove("");
        prop_assert_eq!(own.is_some(), request.contains(&p));
        prop_assert_eq!(lazy, eager);
    }
}

#[test]
fn project_round_trip() {
    let request = StaticRequest::from_values([
        ("a", vec!["1", "2"]),
        ("a.b", vec!["x"]),
        ("ab", vec!["z"]),
    ]);
    let child = request.project("a");

    assert_eq!(child.parameter("").values(), vec!["1", "2"]);
    assert_eq!(child.parameter("b").values(), vec!["x"]);
    assert_eq!(child.len(), 2);
}
