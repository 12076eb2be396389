//! Committing a group.

use pretty_assertions::assert_eq;
use txgroup_tests::prelude::*;

#[test]
fn test_commit_all_succeed() {
    // GIVEN / WHEN
    let outcome = Scenario::new("all_succeed")
        .participant("c", 30)
        .participant("a", 10)
        .participant("b", 20)
        .commit();

    // THEN
    assert!(outcome.result.is_ok());
    assert_eq!(outcome.commits(), vec!["a", "b", "c"]);
    assert!(outcome.rollbacks().is_empty());
    for key in ["a", "b", "c"] {
        assert_eq!(outcome.journal.count(key, Op::Commit), 1);
    }
    assert!(outcome.scope.lookup("a").unwrap_err().is_cancelled());
}

#[test]
fn test_commit_failure_at_every_position() {
    let keys = ["p0", "p1", "p2", "p3"];

    for failing in 0..keys.len() {
        // GIVEN
        let mut scenario = Scenario::new(format!("fail_at_{}", failing));
        for (index, key) in keys.iter().enumerate() {
            let weight = index as Weight;
            scenario = if index == failing {
                scenario.participant_with(key, weight, |m| m.failing_commit())
            } else {
                scenario.participant(key, weight)
            };
        }

        // WHEN
        let outcome = scenario.commit();

        // THEN - commit stops at the failing participant, rollback reaches all
        assert_eq!(outcome.commits(), keys[..=failing].to_vec());
        assert_eq!(outcome.rollbacks(), keys.to_vec());
        assert_eq!(outcome.failed_key(), Some(keys[failing]));

        let err = outcome.result.as_ref().unwrap_err();
        assert_eq!(err.phase(), Some(Phase::Commit));
        assert_eq!(
            err.to_string(),
            format!("{} commit failed: {} commit refused", keys[failing], keys[failing])
        );
        assert!(outcome.scope.is_cancelled());
    }
}

#[test]
fn test_commit_failure_call_sequence() {
    let outcome = Scenario::new("call_sequence")
        .participant("sql", 0)
        .participant_with("docs", 1, |m| m.failing_commit())
        .register("queue", 2)
        .commit();

    assert_eq!(
        outcome.journal.calls(),
        vec![
            Call::commit("sql"),
            Call::commit("docs"),
            Call::rollback("sql"),
            Call::rollback("docs"),
            Call::rollback("queue"),
        ]
    );
}

#[test]
fn test_commit_error_wins_over_cleanup_rollback_error() {
    let outcome = Scenario::new("cleanup_fails")
        .participant_with("sql", 0, |m| m.failing_rollback())
        .participant_with("docs", 1, |m| m.failing_commit().failing_rollback())
        .commit();

    let err = outcome.result.unwrap_err();
    assert_eq!(err.key(), Some("docs"));
    assert_eq!(err.phase(), Some(Phase::Commit));
    assert_eq!(outcome.journal.rollbacks(), vec!["sql", "docs"]);
}

#[test]
fn test_commit_exposes_participant_cause() {
    let outcome = Scenario::new("cause")
        .participant_with("sql", 0, |m| m.failing_commit())
        .commit();

    let err = outcome.result.unwrap_err();
    let source = std::error::Error::source(&err)
        .and_then(|cause| cause.downcast_ref::<MockError>())
        .cloned();

    assert_eq!(
        source,
        Some(MockError {
            key: "sql".to_string(),
            op: Op::Commit,
        })
    );
}

#[test]
fn test_commit_empty_group() {
    let outcome = Scenario::new("empty").commit();

    assert!(outcome.result.is_ok());
    assert!(outcome.journal.calls().is_empty());
    assert!(outcome.scope.is_cancelled());
}

#[test]
fn test_second_commit_is_left_to_participants() {
    // GIVEN
    let outcome = Scenario::new("commit_twice").participant("sql", 0).commit();
    assert!(outcome.result.is_ok());

    // WHEN - the group itself keeps no terminal flag
    let again = outcome.group.commit();

    // THEN - mocks accept a second commit, so it is delegated and succeeds
    assert!(again.is_ok());
    assert_eq!(outcome.journal.count("sql", Op::Commit), 2);
}
