use log::{debug, trace};
use std::collections::HashMap;

use super::seeded_random::{shuffle, string_hash, SeededRandom};
use crate::error::{BingleError, Result};
use crate::model::{validate_catalog, Difficulty, Game, GameId};

/// Keeps different grid sizes apart even when they share a textual seed.
const GRID_SIZE_SEED_OFFSET: u32 = 13245;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedGrid {
    pub grid: Vec<Game>,
    pub difficulty_of: HashMap<GameId, Difficulty>,
}

pub fn numeric_seed(seed: &str, grid_size: usize) -> u32 {
    string_hash(seed).wrapping_add((grid_size as u32).wrapping_mul(GRID_SIZE_SEED_OFFSET))
}

/// Difficulty slots before shuffling: at least one hard cell, then at least
/// three medium cells, everything else easy.
pub fn difficulty_slots(total: usize) -> Vec<Difficulty> {
    let hard_count = (total / 9).max(1);
    let medium_count = (total / 3).max(3);

    (0..total)
        .map(|i| {
            if i < hard_count {
                Difficulty::Hard
            } else if i < hard_count + medium_count {
                Difficulty::Medium
            } else {
                Difficulty::Easy
            }
        })
        .collect()
}

/// Select and order `grid_size²` games from the catalog and assign each a
/// difficulty. The shuffle and the difficulty assignment draw from one
/// generator, in that order.
pub fn generate(catalog: &[Game], seed: &str, grid_size: usize) -> Result<GeneratedGrid> {
    validate_catalog(catalog)?;
    let total = grid_size * grid_size;
    if total > catalog.len() {
        return Err(BingleError::CatalogTooSmall {
            grid_size,
            required: total,
            available: catalog.len(),
        });
    }

    let numeric_seed = numeric_seed(seed, grid_size);
    debug!(target: "grid_generator", "Using seed {:?} -> {}", seed, numeric_seed);
    let mut rng = SeededRandom::new(numeric_seed);

    let mut shuffled = catalog.to_vec();
    shuffle(&mut shuffled, &mut rng);
    shuffled.truncate(total);
    let grid = shuffled;

    let mut difficulties = difficulty_slots(total);
    shuffle(&mut difficulties, &mut rng);

    let difficulty_of = grid
        .iter()
        .zip(difficulties)
        .map(|(game, difficulty)| (game.id, difficulty))
        .collect();
    trace!(target: "grid_generator", "Selected games: {:?}", grid.iter().map(|g| g.id).collect::<Vec<_>>());

    Ok(GeneratedGrid {
        grid,
        difficulty_of,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::default_catalog;
    use crate::tests::UsingLogger;
    use itertools::Itertools;
    use rand::Rng;
    use std::collections::HashSet;
    use test_context::test_context;

    fn ids(generated: &GeneratedGrid) -> Vec<GameId> {
        generated.grid.iter().map(|g| g.id).collect()
    }

    fn difficulties(generated: &GeneratedGrid) -> Vec<Difficulty> {
        generated
            .grid
            .iter()
            .map(|g| generated.difficulty_of[&g.id])
            .collect()
    }

    use Difficulty::{Easy as E, Hard as H, Medium as M};

    #[test_context(UsingLogger)]
    #[test]
    fn test_daily_3x3_reference_board(_: &mut UsingLogger) {
        let generated = generate(&default_catalog(), "daily202610193", 3).unwrap();
        assert_eq!(numeric_seed("daily202610193", 3), 752_088_584);
        assert_eq!(ids(&generated), vec![18, 13, 9, 23, 4, 26, 21, 20, 28]);
        assert_eq!(difficulties(&generated), vec![E, H, E, E, M, E, E, M, M]);
    }

    #[test]
    fn test_daily_4x4_reference_board() {
        let generated = generate(&default_catalog(), "daily202610194", 4).unwrap();
        assert_eq!(
            ids(&generated),
            vec![1, 9, 19, 5, 2, 3, 22, 13, 26, 18, 17, 20, 16, 12, 23, 25]
        );
        assert_eq!(
            difficulties(&generated),
            vec![E, E, E, E, E, M, E, M, E, M, E, E, M, M, H, E]
        );
    }

    #[test]
    fn test_custom_seed_5x5_reference_board() {
        let generated = generate(&default_catalog(), "daily202610195", 5).unwrap();
        assert_eq!(
            ids(&generated),
            vec![
                8, 11, 20, 24, 13, 1, 23, 19, 22, 6, 29, 28, 5, 21, 14, 26, 2, 16, 10, 17, 25,
                15, 27, 3, 12
            ]
        );
        let counts = difficulties(&generated).into_iter().counts();
        assert_eq!(counts[&H], 2);
        assert_eq!(counts[&M], 8);
        assert_eq!(counts[&E], 15);
    }

    #[test]
    fn test_generation_is_deterministic() {
        let catalog = default_catalog();
        let first = generate(&catalog, "bingle", 4).unwrap();
        let second = generate(&catalog, "bingle", 4).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_size_changes_the_board() {
        let catalog = default_catalog();
        assert_ne!(numeric_seed("bingle", 3), numeric_seed("bingle", 4));
        let three = generate(&catalog, "bingle", 3).unwrap();
        let four = generate(&catalog, "bingle", 4).unwrap();
        assert_eq!(ids(&three), vec![8, 4, 6, 29, 11, 17, 10, 22, 27]);
        assert_eq!(ids(&four)[..4], [8, 16, 3, 25]);
    }

    #[test]
    fn test_difficulty_quota_3x3() {
        let counts = difficulty_slots(9).into_iter().counts();
        assert_eq!(counts[&H], 1);
        assert_eq!(counts[&M], 3);
        assert_eq!(counts[&E], 5);

        let generated = generate(&default_catalog(), "quota", 3).unwrap();
        let counts = difficulties(&generated).into_iter().counts();
        assert_eq!(counts[&H], 1);
        assert_eq!(counts[&M], 3);
        assert_eq!(counts[&E], 5);
    }

    #[test]
    fn test_difficulty_quota_4x4() {
        let counts = difficulty_slots(16).into_iter().counts();
        assert_eq!(counts[&H], 1);
        assert_eq!(counts[&M], 5);
        assert_eq!(counts[&E], 10);
    }

    #[test]
    fn test_cells_are_unique_catalog_entries() {
        let catalog = default_catalog();
        let catalog_ids: HashSet<GameId> = catalog.iter().map(|g| g.id).collect();
        let mut rng = rand::rng();
        for _ in 0..200 {
            let seed = format!("seed-{}", rng.random::<u32>());
            let grid_size = rng.random_range(3..=5);
            let generated = generate(&catalog, &seed, grid_size).unwrap();
            let ids = ids(&generated);
            assert_eq!(ids.len(), grid_size * grid_size);
            assert_eq!(ids.iter().collect::<HashSet<_>>().len(), ids.len());
            assert!(ids.iter().all(|id| catalog_ids.contains(id)));
            assert_eq!(generated.difficulty_of.len(), ids.len());
        }
    }

    #[test]
    fn test_duplicate_catalog_ids_are_rejected() {
        let catalog: Vec<Game> = (0..12)
            .map(|i| Game::new(i % 6, &format!("g{}", i), "https://x", "guesses6", ""))
            .collect();
        match generate(&catalog, "x", 3) {
            Err(BingleError::DuplicateGameId(id)) => assert_eq!(id, 0),
            other => panic!("expected DuplicateGameId, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_too_small_is_an_error() {
        let catalog: Vec<Game> = default_catalog().into_iter().take(20).collect();
        match generate(&catalog, "daily", 5) {
            Err(BingleError::CatalogTooSmall {
                required,
                available,
                ..
            }) => {
                assert_eq!(required, 25);
                assert_eq!(available, 20);
            }
            other => panic!("expected CatalogTooSmall, got {:?}", other),
        }
        assert!(generate(&catalog, "daily", 4).is_ok());
    }
}
