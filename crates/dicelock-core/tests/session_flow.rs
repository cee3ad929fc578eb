//! Scripted end-to-end runs of the session state machine.

use dicelock_core::{
    combine, verify, DiceSet, Digest, Exchange, GameError, GameSession, Outcome,
    ScriptedInteraction, SecretKey, TiePolicy,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn demo_dice() -> DiceSet {
    DiceSet::parse(&["2,2,4,4,9,9", "6,8,1,1,8,6", "7,5,3,7,5,3"]).unwrap()
}

/// Four questions per session: the turn-order guess, the die pick, and one
/// contribution per roll. "0" is a valid answer to all of them.
fn all_zeros() -> ScriptedInteraction {
    ScriptedInteraction::new(["0", "0", "0", "0"])
}

fn bytes32(hex_str: &str) -> [u8; 32] {
    hex::decode(hex_str).unwrap().try_into().unwrap()
}

#[test]
fn full_session_reaches_a_verdict() {
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(1), all_zeros());
    let report = session.run().unwrap();

    assert_eq!(report.rounds.len(), 3);
    assert_eq!(report.rounds[0].label, "first move");
    assert_eq!(report.user_die.face_count(), 6);
    assert_eq!(report.host_die.face_count(), 6);
    assert_ne!(report.user_die, report.host_die);
    assert!(matches!(
        report.outcome,
        Outcome::UserWins | Outcome::HostWins | Outcome::Tie
    ));
}

#[test]
fn every_round_verifies_independently() {
    let peer = ScriptedInteraction::new(["1", "0", "1", "2"]);
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(7), peer);
    let report = session.run().unwrap();

    for round in &report.rounds {
        let digest = Digest::from_bytes(bytes32(&round.digest));
        let key = SecretKey::from_bytes(bytes32(&round.secret_key));

        assert!(verify(&digest, &key, round.secret), "round {:?}", round.label);
        assert!(round.secret < round.range);
        assert!(round.contribution < round.range);
        if round.label.ends_with("roll") {
            assert_eq!(
                round.value,
                combine(round.secret, round.contribution, round.range).unwrap()
            );
        }
    }
}

#[test]
fn digest_is_published_before_the_contribution_is_asked() {
    let peer = ScriptedInteraction::new(["0", "0", "0", "0"]);
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(3), peer.clone());
    let report = session.run().unwrap();
    let log = peer.log();

    for round in &report.rounds {
        let digest_at = log
            .iter()
            .position(|e| matches!(e, Exchange::Said(line) if line.contains(&round.digest)))
            .expect("digest was never published");
        let reveal_at = log
            .iter()
            .position(|e| matches!(e, Exchange::Said(line) if line.contains(&round.secret_key)))
            .expect("key was never revealed");

        // Commit first, then the question, then the reveal.
        assert!(digest_at < reveal_at);
        assert!(
            log[digest_at..reveal_at]
                .iter()
                .any(|e| matches!(e, Exchange::Asked { .. })),
            "no contribution was requested between commit and reveal"
        );
    }
}

#[test]
fn invalid_peer_input_is_reprompted_not_fatal() {
    let peer = ScriptedInteraction::new(["banana", "9", "0", "0", "0", "0"]);
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(5), peer.clone());
    let report = session.run().unwrap();

    // Two rejected answers for the opening guess, then the game proceeds
    // without drawing any extra commitment.
    assert_eq!(report.rounds.len(), 3);
    let asked = peer
        .log()
        .iter()
        .filter(|e| matches!(e, Exchange::Asked { .. }))
        .count();
    assert_eq!(asked, 6);
}

#[test]
fn exhausted_input_aborts_with_interaction_closed() {
    let peer = ScriptedInteraction::new(["0"]);
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(9), peer);
    let err = session.run().unwrap_err();

    assert!(matches!(err, GameError::InteractionClosed(_)));
}

#[test]
fn tie_policy_decides_equal_rolls() {
    // Every die shows 5 on every face, so the rolls always tie.
    let flat = || DiceSet::parse(&["5,5", "5,5", "5,5"]).unwrap();

    let host = GameSession::new(flat(), StdRng::seed_from_u64(11), all_zeros())
        .run()
        .unwrap();
    assert_eq!(host.outcome, Outcome::HostWins);

    let user = GameSession::new(flat(), StdRng::seed_from_u64(11), all_zeros())
        .with_tie_policy(TiePolicy::UserWins)
        .run()
        .unwrap();
    assert_eq!(user.outcome, Outcome::UserWins);

    let draw = GameSession::new(flat(), StdRng::seed_from_u64(11), all_zeros())
        .with_tie_policy(TiePolicy::Draw)
        .run()
        .unwrap();
    assert_eq!(draw.outcome, Outcome::Tie);
}

#[test]
fn seeded_rng_reproduces_the_session() {
    let run = || {
        GameSession::new(demo_dice(), StdRng::seed_from_u64(99), all_zeros())
            .run()
            .unwrap()
    };
    let first = run();
    let second = run();

    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.user_value, second.user_value);
    assert_eq!(first.host_value, second.host_value);
    for (a, b) in first.rounds.iter().zip(&second.rounds) {
        assert_eq!(a.digest, b.digest);
        assert_eq!(a.secret, b.secret);
        assert_eq!(a.secret_key, b.secret_key);
    }
}

#[test]
fn report_serializes_for_offline_verification() {
    let session = GameSession::new(demo_dice(), StdRng::seed_from_u64(13), all_zeros());
    let report = session.run().unwrap();

    let json = serde_json::to_string_pretty(&report).unwrap();
    let parsed: dicelock_core::SessionReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.rounds.len(), report.rounds.len());
    assert_eq!(parsed.outcome, report.outcome);
}
