//! Tests for the key codec

use super::*;
use crate::types::{AttrValue, Record, GOALS, PK, SK};
use pretty_assertions::assert_eq;

fn morgan() -> Record {
    Record::new("USA", "WNT", "Alex", "Morgan", 119, 47, 200)
}

#[test]
fn test_build_sort_key() {
    assert_eq!(build_sort_key("MNT", "Cristiano", "Ronaldo"), "MNT#Cristiano#Ronaldo");
    assert_eq!(build_sort_key("", "", ""), "##");
}

#[test]
fn test_sort_key_starts_with_team_prefix() {
    let record = morgan();
    assert!(record.sort_key.starts_with(&format!("{}{}", record.national_team, SEPARATOR)));
}

#[test]
fn test_build_key() {
    let key = build_key("USA", "WNT", "Alex", "Morgan");
    assert_eq!(key.len(), 2);
    assert_eq!(key.get(PK), Some(&AttrValue::from("USA")));
    assert_eq!(key.get(SK), Some(&AttrValue::from("WNT#Alex#Morgan")));
}

#[test]
fn test_resume_key_primary_index() {
    let key = build_resume_key(&morgan(), IndexKind::Primary);
    assert_eq!(key.keys().map(String::as_str).collect::<Vec<_>>(), vec![PK, SK]);
    assert_eq!(key.get(SK), Some(&AttrValue::from("WNT#Alex#Morgan")));
}

#[test]
fn test_resume_key_goals_index() {
    let key = build_resume_key(&morgan(), IndexKind::Goals);
    assert_eq!(key.len(), 3);
    assert_eq!(key.get(PK), Some(&AttrValue::from("USA")));
    assert_eq!(key.get(SK), Some(&AttrValue::from("WNT#Alex#Morgan")));
    assert_eq!(key.get(GOALS), Some(&AttrValue::N(119)));
}

#[test]
fn test_resume_key_matches_point_key_on_primary() {
    let record = morgan();
    assert_eq!(
        build_resume_key(&record, IndexKind::Primary),
        build_key("USA", "WNT", "Alex", "Morgan")
    );
}
