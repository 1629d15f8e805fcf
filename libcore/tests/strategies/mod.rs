use anum_core::Term;
use proptest::prelude::*;

/// Concrete terms over the root and a few atoms
pub fn arb_term() -> impl Strategy<Value = Term> {
    let leaf = prop_oneof![
        3 => Just(Term::root()),
        1 => "[a-c]".prop_map(|s| Term::atom(&s)),
    ];

    leaf.prop_recursive(
        3,  // levels deep
        12, // max size
        2,  // items per collection
        |inner| {
            prop_oneof![
                inner.clone().prop_map(Term::head_closed),
                inner.clone().prop_map(Term::tail_closed),
                (inner.clone(), inner).prop_map(|(l, r)| Term::link(l, r)),
            ]
        },
    )
}

/// `∞` wrapped in up to two head closures
pub fn arb_unit() -> impl Strategy<Value = Term> {
    (0usize..3).prop_map(|heads| {
        let mut unit = Term::root();
        for _ in 0..heads {
            unit = Term::head_closed(unit);
        }
        unit
    })
}

/// Terms which have an abit encoding
pub fn arb_abit_term() -> impl Strategy<Value = Term> {
    arb_unit().prop_recursive(4, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Term::tail_closed),
            (inner.clone(), arb_unit()).prop_map(|(x, u)| Term::link(x, u)),
            (arb_unit(), inner).prop_map(|(u, x)| Term::link(u, x)),
        ]
    })
}
