use hucfr_engine::action::Action;
use hucfr_engine::cards::{parse_cards, Card};
use hucfr_engine::deck::{live_cards, Deck};
use hucfr_engine::errors::GameError;
use hucfr_engine::game::{BlindsOutcome, GameState, Phase};
use hucfr_engine::history::Street;
use hucfr_engine::rules::Blinds;

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

/// State at `street` with fixed holes and board; the deck holds every other card.
fn fixed_state(
    street: Street,
    holes: (&str, &str),
    board: &str,
    stacks: [u32; 2],
    contrib: [u32; 2],
) -> GameState {
    let h0 = cards(holes.0);
    let h1 = cards(holes.1);
    let b = cards(board);
    let mut known = h0.clone();
    known.extend(&h1);
    known.extend(&b);
    GameState::at_street(
        street,
        [[h0[0], h0[1]], [h1[0], h1[1]]],
        b,
        Deck::from_cards(live_cards(&known)),
        stacks,
        contrib,
        0,
    )
    .unwrap()
}

fn fresh_hand(seed: u64, stacks: [u32; 2]) -> GameState {
    GameState::new_hand(Deck::new_with_seed(seed), stacks, 0, Blinds::default()).unwrap()
}

#[test]
fn scenario_blinds_posted_by_dealer_and_opponent() {
    let mut gs = fresh_hand(1, [1000, 1000]);
    assert_eq!(gs.post_blinds().unwrap(), BlindsOutcome::Posted);
    assert_eq!(gs.contributions(), [10, 20]);
    assert_eq!(gs.pot(), 30);
    assert_eq!(gs.current_bet(), 20);
    assert_eq!(gs.to_act(), 0);
    assert_eq!(gs.to_call(0), 10);
}

#[test]
fn scenario_button_call_closes_preflop() {
    let mut gs = fresh_hand(1, [1000, 1000]);
    gs.post_blinds().unwrap();
    let terminal = gs.apply_action(0, Action::Call, None).unwrap();
    assert!(!terminal);
    assert_eq!(gs.contributions(), [20, 20]);
    assert_eq!(gs.pot(), 40);
    assert_eq!(gs.street(), Street::Flop);
    assert_eq!(gs.board().len(), 3);
    assert_eq!(gs.history(), "");
    assert_eq!(gs.full_history(), "c/");
    // out of position acts first after the flop
    assert_eq!(gs.to_act(), 1);
}

#[test]
fn scenario_raise_capped_by_opponent_stack() {
    let mut gs = fixed_state(
        Street::Flop,
        ("2c 7d", "Ah Ad"),
        "Ks 9h 4c",
        [50, 500],
        [20, 20],
    );
    let before = gs.total_chips();
    assert_eq!(gs.to_act(), 1);
    let terminal = gs.apply_action(1, Action::RaiseLarge, Some(100)).unwrap();
    assert!(!terminal);
    assert_eq!(gs.street_bets(), [0, 50]);
    assert_eq!(gs.stacks(), [50, 450]);
    assert_eq!(gs.current_bet(), 50);

    // calling puts the short stack all-in and ends the betting
    assert!(gs.apply_action(0, Action::Call, None).unwrap());
    assert_eq!(gs.board().len(), 5);
    assert_eq!(gs.phase(), Phase::Showdown);
    assert_eq!(gs.pot(), 0);
    assert_eq!(gs.total_chips(), before);
}

#[test]
fn scenario_exact_tie_splits_main_pot() {
    let mut gs = fixed_state(
        Street::River,
        ("2c 3c", "2d 3d"),
        "Ah Kd Qc Js Td",
        [900, 900],
        [100, 100],
    );
    gs.apply_action(1, Action::Call, None).unwrap();
    assert!(gs.apply_action(0, Action::Call, None).unwrap());
    let result = gs.result().unwrap();
    assert_eq!(result.winner, None);
    assert_eq!(result.main_pot, 200);
    assert_eq!(result.side_pot, 0);
    assert_eq!(result.payouts, [100, 100]);
    assert_eq!(gs.stacks(), [1000, 1000]);
    assert_eq!(gs.payoff(0), 0);
    assert_eq!(gs.payoff(1), 0);
}

#[test]
fn scenario_fold_awards_pot() {
    let mut gs = fixed_state(
        Street::Flop,
        ("2c 7d", "Ah Ad"),
        "Ks 9h 4c",
        [925, 925],
        [75, 75],
    );
    assert_eq!(gs.pot(), 150);
    assert!(gs.apply_action(1, Action::Fold, None).unwrap());
    assert_eq!(gs.stacks(), [1075, 925]);
    assert_eq!(gs.pot(), 0);
    assert_eq!(gs.payoff(0), 150);
    assert_eq!(gs.payoff(1), -150);
    assert_eq!(gs.phase(), Phase::Folded { folder: 1, pot: 150 });
}

#[test]
fn all_in_showdown_pays_main_pot_to_winner() {
    // seat 1 holds aces but the shorter seat 0 hits a set of sevens
    let mut gs = fixed_state(
        Street::Flop,
        ("7c 7d", "Ah Ad"),
        "7s 9h 4c",
        [100, 900],
        [20, 20],
    );
    gs.apply_action(1, Action::RaiseLarge, None).unwrap();
    assert_eq!(gs.street_bets(), [0, 100]);
    assert!(gs.apply_action(0, Action::Call, None).unwrap());
    let r = gs.result().unwrap().clone();
    assert_eq!(r.main_pot, 240);
    assert_eq!(r.side_pot, 0);
    assert_eq!(gs.total_chips(), 1040);
    assert!(r.showdown.is_some());
    let winner = r.winner.unwrap();
    assert_eq!(gs.payoff(winner), 240);
    assert_eq!(gs.payoff(1 - winner), -240);
}

#[test]
fn check_check_advances_each_street_to_showdown() {
    let mut gs = fixed_state(
        Street::Flop,
        ("Kc Qd", "5h 5d"),
        "2s 9h 4c",
        [980, 980],
        [20, 20],
    );
    for street in [Street::Flop, Street::Turn, Street::River] {
        assert_eq!(gs.street(), street);
        assert_eq!(gs.to_act(), 1);
        assert!(!gs.apply_action(1, Action::Call, None).unwrap());
        let done = gs.apply_action(0, Action::Call, None).unwrap();
        assert_eq!(done, street == Street::River);
    }
    assert_eq!(gs.phase(), Phase::Showdown);
    assert_eq!(gs.full_history(), "cc/cc/cc");
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let mut gs = fresh_hand(5, [1000, 1000]);
    assert_eq!(
        gs.apply_action(0, Action::Call, None),
        Err(GameError::BlindsNotPosted)
    );
    gs.post_blinds().unwrap();
    let pot = gs.pot();
    let stacks = gs.stacks();
    assert_eq!(
        gs.apply_action(1, Action::RaiseSmall, None),
        Err(GameError::NotPlayersTurn {
            expected: 0,
            actual: 1
        })
    );
    assert_eq!(gs.post_blinds(), Err(GameError::BlindsAlreadyPosted));
    assert_eq!(gs.pot(), pot);
    assert_eq!(gs.stacks(), stacks);
    assert!(gs.actions().is_empty());
}

#[test]
fn actions_after_hand_end_are_rejected() {
    let mut gs = fresh_hand(5, [1000, 1000]);
    gs.post_blinds().unwrap();
    gs.apply_action(0, Action::Fold, None).unwrap();
    assert_eq!(
        gs.apply_action(1, Action::Call, None),
        Err(GameError::HandAlreadyComplete)
    );
    assert_eq!(gs.advance_street(), Err(GameError::HandAlreadyComplete));
}

#[test]
fn advance_street_requires_closed_round() {
    let mut gs = fresh_hand(5, [1000, 1000]);
    gs.post_blinds().unwrap();
    assert_eq!(
        gs.advance_street(),
        Err(GameError::RoundNotClosed(Street::Preflop))
    );
}

#[test]
fn short_blind_forces_both_seats_all_in() {
    let mut gs = fresh_hand(11, [5, 1000]);
    assert_eq!(gs.post_blinds().unwrap(), BlindsOutcome::AllIn);
    assert!(gs.is_terminal());
    assert_eq!(gs.board().len(), 5);
    let r = gs.result().unwrap();
    assert_eq!(r.main_pot, 10);
    assert_eq!(r.side_pot, 995);
    // the unmatched chips always go back to seat 1
    assert!(gs.stacks()[1] >= 995);
    assert_eq!(gs.total_chips(), 1005);
}

#[test]
fn partial_call_is_an_all_in_not_an_error() {
    let mut gs = fresh_hand(3, [15, 1000]);
    gs.post_blinds().unwrap();
    // button has 5 behind facing 10 more
    assert_eq!(gs.to_call(0), 10);
    assert!(gs.apply_action(0, Action::Call, None).unwrap());
    assert_eq!(gs.contributions(), [15, 20]);
    let r = gs.result().unwrap();
    assert_eq!(r.main_pot, 30);
    assert_eq!(r.side_pot, 5);
}

#[test]
fn raise_then_reraise_then_call() {
    let mut gs = fresh_hand(8, [1000, 1000]);
    gs.post_blinds().unwrap();
    gs.apply_action(0, Action::RaiseMedium, None).unwrap();
    // pot 30, button calls 10 and raises 30
    assert_eq!(gs.street_bets(), [50, 20]);
    gs.apply_action(1, Action::RaiseSmall, None).unwrap();
    // pot 70, big blind calls 30 and raises 35
    assert_eq!(gs.street_bets(), [50, 85]);
    gs.apply_action(0, Action::Call, None).unwrap();
    assert_eq!(gs.street(), Street::Flop);
    assert_eq!(gs.pot(), 170);
    assert_eq!(gs.full_history(), "rrc/");
}
