use super::*;

fn ival(i: i64) -> Value {
    Value::Integer(i)
}

#[test]
fn insert_and_get() {
    let mut t = Table::new();
    assert!(t.is_empty());
    assert_eq!(t.len(), 0);

    assert!(t.insert("a", ival(10)).is_none());
    assert!(t.insert("b", ival(20)).is_none());
    assert_eq!(t.len(), 2);
    assert!(!t.is_empty());

    assert_eq!(t.get("a").and_then(Value::as_integer), Some(10));
    assert!(t.get("missing").is_none());
    assert!(t.contains_key("b"));
    assert!(!t.contains_key("c"));

    let (k, v) = t.get_key_value("b").unwrap();
    assert_eq!(k, "b");
    assert_eq!(v.as_integer(), Some(20));

    if let Some(Value::Integer(i)) = t.get_mut("a") {
        *i = 99;
    }
    assert_eq!(t.get("a").and_then(Value::as_integer), Some(99));
}

#[test]
fn replacing_keeps_position() {
    let mut t = Table::new();
    t.insert("x", ival(1));
    t.insert("y", ival(2));
    let old = t.insert("x", ival(3));
    assert_eq!(old, Some(ival(1)));
    assert_eq!(t.keys().collect::<Vec<_>>(), ["x", "y"]);
    assert_eq!(t.get("x"), Some(&ival(3)));
}

#[test]
fn index_kicks_in_at_threshold() {
    let mut t = Table::new();
    for i in 0..INDEXED_TABLE_THRESHOLD - 1 {
        t.insert(format!("k{i}"), ival(i as i64));
    }
    assert!(t.index.is_none());
    t.insert("last", ival(-1));
    assert!(t.index.is_some());

    for i in 0..100 {
        t.insert(format!("more{i}"), ival(i));
    }
    for i in 0..INDEXED_TABLE_THRESHOLD - 1 {
        assert_eq!(t.get(&format!("k{i}")), Some(&ival(i as i64)));
    }
    for i in 0..100 {
        assert_eq!(t.get(&format!("more{i}")), Some(&ival(i)));
    }
    assert_eq!(t.get("last"), Some(&ival(-1)));
    assert!(t.get("absent").is_none());

    // replacing through the index does not duplicate
    let len = t.len();
    t.insert("more50", ival(500));
    assert_eq!(t.len(), len);
    assert_eq!(t.get("more50"), Some(&ival(500)));
}

#[test]
fn iteration_follows_insertion_order() {
    let names = ["zeta", "alpha", "mid", "b", "a", "omega", "c"];
    let t: Table = names
        .iter()
        .enumerate()
        .map(|(i, n)| (*n, ival(i as i64)))
        .collect();

    assert_eq!(t.keys().collect::<Vec<_>>(), names);
    let values: Vec<i64> = t.values().filter_map(Value::as_integer).collect();
    assert_eq!(values, [0, 1, 2, 3, 4, 5, 6]);

    let mut seen = Vec::new();
    for (k, v) in &t {
        seen.push((k.to_string(), v.clone()));
    }
    assert_eq!(seen.len(), names.len());
    assert_eq!(t.iter().len(), names.len());

    let owned: Vec<(String, Value)> = t.into_iter().collect();
    assert_eq!(owned, seen);
}

#[test]
fn values_mut_updates_in_place() {
    let mut t: Table = [("a", ival(1)), ("b", ival(2))].into_iter().collect();
    for v in t.values_mut() {
        if let Value::Integer(i) = v {
            *i *= 10;
        }
    }
    assert_eq!(t.get("a"), Some(&ival(10)));
    assert_eq!(t.get("b"), Some(&ival(20)));
}

#[test]
fn equality_ignores_index_and_respects_order() {
    let many: Vec<(String, Value)> = (0..10).map(|i| (format!("k{i}"), ival(i))).collect();
    let a: Table = many.clone().into_iter().collect();
    let b: Table = many.clone().into_iter().collect();
    assert_eq!(a, b);

    let reversed: Table = many.into_iter().rev().collect();
    assert_ne!(a, reversed);
}

#[test]
fn debug_is_a_map() {
    let mut t = Table::new();
    t.insert("name", Value::from("x"));
    t.insert("n", ival(3));
    assert_eq!(format!("{t:?}"), r#"{"name": "x", "n": 3}"#);
}

#[test]
fn deep_chain_drops_without_recursion() {
    let mut root = Table::new();
    let mut cur = &mut root;
    for _ in 0..200_000 {
        cur.insert("a", Value::Table(Table::new()));
        cur = cur.get_mut("a").and_then(Value::as_table_mut).unwrap();
    }
    cur.insert("arr", Value::Array([Value::Table(Table::new()), ival(1)].into_iter().collect()));
    drop(root);
}

#[test]
fn owned_iteration_keeps_order() {
    let t: Table = [("a", ival(1)), ("b", ival(2))].into_iter().collect();
    let pairs: Vec<(String, Value)> = t.into_iter().collect();
    assert_eq!(pairs, [("a".to_string(), ival(1)), ("b".to_string(), ival(2))]);
}
