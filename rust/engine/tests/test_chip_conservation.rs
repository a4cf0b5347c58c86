use hucfr_engine::deck::Deck;
use hucfr_engine::game::GameState;
use hucfr_engine::rules::Blinds;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn check_invariants(gs: &GameState, total: u32) {
    assert_eq!(gs.total_chips(), total);
    if gs.is_terminal() {
        assert_eq!(gs.pot(), 0);
    } else {
        let c = gs.contributions();
        assert_eq!(gs.pot(), c[0] + c[1]);
        let b = gs.street_bets();
        assert_eq!(gs.current_bet(), b[0].max(b[1]));
    }
}

#[test]
fn chips_are_conserved_under_random_play() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    for seed in 0..500u64 {
        let stacks = [rng.random_range(1..=2_000u32), rng.random_range(1..=2_000u32)];
        let dealer = (seed % 2) as usize;
        let mut gs =
            GameState::new_hand(Deck::new_with_seed(seed), stacks, dealer, Blinds::default())
                .unwrap();
        let total = stacks[0] + stacks[1];
        gs.post_blinds().unwrap();
        check_invariants(&gs, total);

        let mut steps = 0;
        while !gs.is_terminal() {
            let seat = gs.to_act();
            let legal = gs.legal_actions(seat);
            let action = *legal.choose(&mut rng).unwrap();
            let amount = if rng.random_bool(0.2) {
                Some(rng.random_range(0..500u32))
            } else {
                None
            };
            gs.apply_action(seat, action, amount).unwrap();
            check_invariants(&gs, total);
            steps += 1;
            assert!(steps < 200, "hand did not terminate");
        }

        let r = gs.result().unwrap();
        let c = gs.contributions();
        assert_eq!(r.payouts[0] + r.payouts[1], c[0] + c[1]);
        assert_eq!(r.main_pot + r.side_pot, c[0] + c[1]);
        assert_eq!(gs.net_result(0) + gs.net_result(1), 0);
    }
}

#[test]
fn payoffs_are_zero_sum() {
    let mut rng = ChaCha8Rng::seed_from_u64(77);
    for seed in 0..300u64 {
        let mut gs =
            GameState::new_hand(Deck::new_with_seed(seed), [1000, 1000], 0, Blinds::default())
                .unwrap();
        gs.post_blinds().unwrap();
        while !gs.is_terminal() {
            let seat = gs.to_act();
            let action = *gs.legal_actions(seat).choose(&mut rng).unwrap();
            gs.apply_action(seat, action, None).unwrap();
        }
        assert_eq!(gs.payoff(0), -gs.payoff(1));
    }
}
