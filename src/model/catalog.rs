use super::{Game, GameId};
use crate::error::{BingleError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// A catalog file has the shape { "games": [ { "id": 1, "name": ..., "url": ...,
// "scoring": "guesses6", "category": "words" }, ... ] }
#[derive(Debug, Deserialize)]
struct CatalogFile {
    games: Vec<Game>,
}

pub fn read_catalog_from_json<P: AsRef<Path>>(path: P) -> Result<Vec<Game>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let wrapper: CatalogFile = serde_json::from_reader(reader)?;
    validate_catalog(&wrapper.games)?;
    Ok(wrapper.games)
}

/// Every game id in a catalog must be unique.
pub fn validate_catalog(catalog: &[Game]) -> Result<()> {
    let mut seen: HashSet<GameId> = HashSet::with_capacity(catalog.len());
    match catalog.iter().find(|game| !seen.insert(game.id)) {
        Some(game) => Err(BingleError::DuplicateGameId(game.id)),
        None => Ok(()),
    }
}

/// The built-in list of daily games.
pub fn default_catalog() -> Vec<Game> {
    vec![
        Game::new(1, "Wordle", "https://www.nytimes.com/games/wordle", "guesses6", "words"),
        Game::new(2, "Worldle", "https://worldle.teuteuf.fr/", "guesses6", "geography"),
        Game::new(3, "Flagle", "https://www.flagle.io/", "guesses6", "geography"),
        Game::new(
            4,
            "Timeguessr",
            "https://timeguessr.com/roundonedaily",
            "points75000",
            "geography",
        ),
        Game::new(
            5,
            "Foodguessr",
            "https://www.foodguessr.com/game/daily",
            "points15000",
            "misc",
        ),
        Game::new(6, "Framed", "https://framed.wtf/", "guesses6", "films"),
        Game::new(
            7,
            "Connections",
            "https://www.nytimes.com/games/connections",
            "mistakes4",
            "words",
        ),
        Game::new(
            8,
            "Semantle Junior",
            "https://semantle.com/junior",
            "guesses75",
            "words",
        ),
        Game::new(
            9,
            "Gamedle Classic",
            "https://www.gamedle.wtf/classic",
            "guesses6",
            "games",
        ),
        Game::new(
            10,
            "Strands",
            "https://www.nytimes.com/games/strands",
            "hints3",
            "words",
        ),
        Game::new(11, "Flagpath", "https://www.flagpath.xyz/", "mistakes3", "geography"),
        Game::new(12, "Waffle", "https://wafflegame.net/", "guesses15", "words"),
        Game::new(
            13,
            "Hexaguessr Daily",
            "https://samuelcardwell.shinyapps.io/hexaguessr_app/",
            "guesses6",
            "geography",
        ),
        Game::new(14, "Bandle", "https://bandle.app/daily", "guesses6", "words"),
        Game::new(15, "Globle", "https://globle-game.com/game", "guesses15", "geography"),
        Game::new(
            16,
            "Mathdle Easy",
            "https://lemononmars.github.io/mathdle/",
            "guesses6",
            "maths",
        ),
        Game::new(
            17,
            "Gamedle Art",
            "https://www.gamedle.wtf/artwork",
            "guesses6",
            "games",
        ),
        Game::new(18, "Colorfle", "https://colorfle.com/", "guesses6", "misc"),
        Game::new(19, "Facedle", "https://facedle.app/", "guesses6", "films"),
        Game::new(20, "Shaple", "https://swag.github.io/shaple/", "mistakes5", "misc"),
        Game::new(21, "Metazooa", "https://metazooa.com/play/game", "guesses20", "misc"),
        Game::new(
            22,
            "Realbirdfakebird",
            "https://realbirdfakebird.com/",
            "mistakes7",
            "misc",
        ),
        Game::new(23, "Lyricle", "https://www.lyricle.app/", "guesses6", "music"),
        Game::new(24, "Flickle", "https://flickle.app/", "guesses6", "films"),
        Game::new(25, "Disorderly", "https://playdisorderly.com/", "guesses6", "words"),
        Game::new(
            26,
            "Spellcheck",
            "https://spellcheck.xyz/solo_game",
            "mistakes5",
            "words",
        ),
        Game::new(27, "Redactle", "https://redactlegame.com/", "guesses75", "misc"),
        Game::new(
            28,
            "Tradle",
            "https://games.oec.world/en/tradle/",
            "guesses6",
            "geography",
        ),
        Game::new(
            29,
            "Thrice",
            "https://thrice.geekswhodrink.com/",
            "points15",
            "trivia",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_ids_are_unique_and_ordered() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 29);
        let ids: HashSet<_> = catalog.iter().map(|g| g.id).collect();
        assert_eq!(ids.len(), catalog.len());
        for (i, game) in catalog.iter().enumerate() {
            assert_eq!(game.id as usize, i + 1);
        }
    }

    #[test]
    fn test_default_catalog_scoring_specs_are_recognized() {
        for game in default_catalog() {
            let spec = game.scoring_spec();
            assert!(spec.kind.is_recognized(), "{} has bad spec", game);
            assert!(spec.max > 0, "{} has no maximum", game);
        }
    }

    #[test]
    fn test_read_catalog_from_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"games": [
                {{"id": 7, "name": "Alpha", "url": "https://a", "scoring": "guesses6"}},
                {{"id": 9, "name": "Beta", "url": "https://b", "scoring": "points10", "category": "misc"}}
            ]}}"#
        )
        .unwrap();

        let games = read_catalog_from_json(file.path()).expect("should read file");
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].category, "");
        assert_eq!(games[1].category, "misc");
        assert_eq!(games[1].scoring_spec().max, 10);
    }

    #[test]
    fn test_read_catalog_rejects_duplicate_ids() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"games": [
                {{"id": 1, "name": "Alpha", "url": "https://a", "scoring": "guesses6"}},
                {{"id": 2, "name": "Beta", "url": "https://b", "scoring": "guesses6"}},
                {{"id": 1, "name": "Gamma", "url": "https://c", "scoring": "guesses6"}}
            ]}}"#
        )
        .unwrap();

        match read_catalog_from_json(file.path()) {
            Err(BingleError::DuplicateGameId(id)) => assert_eq!(id, 1),
            other => panic!("expected DuplicateGameId, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_default_catalog() {
        assert!(validate_catalog(&default_catalog()).is_ok());
    }

    #[test]
    fn test_read_catalog_missing_file_is_error() {
        assert!(read_catalog_from_json("/nonexistent/bingle/catalog.json").is_err());
    }
}
