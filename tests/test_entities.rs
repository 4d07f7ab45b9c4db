mod common;

use common::{jet_at, make_state};
use turret_defense::collision::Rect;
use turret_defense::entities::*;
use turret_defense::timer::Countdown;

#[test]
fn entity_clone_and_eq() {
    assert_eq!(EnemyKind::Jet, EnemyKind::Jet);
    assert_ne!(EnemyKind::Jet, EnemyKind::OrangeJet);
    assert_eq!(Level::Easy, Level::Easy);
    assert_ne!(Level::Easy, Level::Hard);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_ne!(PowerUpKind::Shield, PowerUpKind::DualFire);

    let kind = EnemyKind::GiantJet;
    assert_eq!(kind.clone(), EnemyKind::GiantJet);
}

#[test]
fn only_the_ally_is_friendly() {
    for kind in [
        EnemyKind::Jet,
        EnemyKind::OrangeJet,
        EnemyKind::Bomber,
        EnemyKind::Fleet,
        EnemyKind::GiantJet,
    ] {
        assert!(kind.is_hostile(), "{kind:?} should be hostile");
    }
    assert!(!EnemyKind::Ally.is_hostile());
}

#[test]
fn bomb_carriers() {
    assert!(EnemyKind::Bomber.drops_bombs());
    assert!(EnemyKind::GiantJet.drops_bombs());
    assert!(!EnemyKind::Jet.drops_bombs());
    assert!(!EnemyKind::Fleet.drops_bombs());
    assert!(!EnemyKind::Ally.drops_bombs());
}

#[test]
fn rect_accessors_match_fields() {
    let jet = jet_at(10.0, 20.0);
    assert_eq!(jet.rect(), Rect::new(10.0, 20.0, 40.0, 40.0));

    let s = make_state();
    assert_eq!(s.turret.rect(), Rect::new(380.0, 540.0, 40.0, 60.0));
}

#[test]
fn dark_during_night_or_blackout() {
    let mut s = make_state();
    assert!(!s.is_dark());

    s.effects.blackout = Countdown::started(10);
    assert!(s.is_dark());
    assert!(!s.is_night());

    s.effects.blackout = Countdown::idle();
    s.night = Countdown::started(10);
    assert!(s.is_dark());
    assert!(s.is_night());
}

#[test]
fn game_state_clone_is_independent() {
    let original = make_state();
    let mut cloned = original.clone();

    cloned.turret.x = 99.0;
    cloned.score = 999;
    cloned.enemies.push(jet_at(5.0, 5.0));

    assert_eq!(original.turret.x, 380.0);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
}
