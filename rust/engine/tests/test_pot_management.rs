use hucfr_engine::pot::PotManager;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[test]
fn heads_up_simple_side_pot() {
    let pm = PotManager::from_contributions([500, 1000]);
    assert_eq!(pm.main_pot(), 1000);
    assert_eq!(pm.side_pots(), &[500]);
    assert_eq!(pm.side_pot_owner(), Some(1));
}

#[test]
fn equal_stacks_no_side_pot() {
    let pm = PotManager::from_contributions([1000, 1000]);
    assert_eq!(pm.main_pot(), 2000);
    assert!(pm.side_pots().is_empty());
    assert_eq!(pm.side_pot_owner(), None);
}

#[test]
fn side_pot_identity_holds() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..5_000 {
        let c = [rng.random_range(0..=5_000u32), rng.random_range(0..=5_000u32)];
        let pm = PotManager::from_contributions(c);
        assert_eq!(pm.main_pot() + pm.side_pot(), c[0] + c[1]);
        assert_eq!(pm.main_pot(), 2 * c[0].min(c[1]));
        assert_eq!(pm.side_pot(), c[0].abs_diff(c[1]));
    }
}

#[test]
fn side_pot_returns_to_higher_contributor_even_when_losing() {
    let pm = PotManager::from_contributions([800, 200]);
    assert_eq!(pm.distribute(Some(1), 1), [600, 400]);
}

#[test]
fn split_pot_is_even() {
    let pm = PotManager::from_contributions([100, 100]);
    assert_eq!(pm.distribute(None, 0), [100, 100]);
}
