//! Static tournament catalog seeded at startup

use arena_types::{GameType, TournamentKey, TournamentType};

/// Initial configuration of one tournament variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSeed {
    pub key: TournamentKey,
    pub name: &'static str,
    pub entry_fee: i64,
    pub prize_pool: i64,
    pub max_slots: i64,
}

const fn seed(
    game_type: GameType,
    tournament_type: TournamentType,
    name: &'static str,
    entry_fee: i64,
    prize_pool: i64,
    max_slots: i64,
) -> TournamentSeed {
    TournamentSeed {
        key: TournamentKey {
            game_type,
            tournament_type,
        },
        name,
        entry_fee,
        prize_pool,
        max_slots,
    }
}

/// The six tournament variants
pub const TOURNAMENT_CATALOG: [TournamentSeed; 6] = [
    seed(GameType::Bgmi, TournamentType::Solo, "BGMI Solo Showdown", 30, 2000, 100),
    seed(GameType::Bgmi, TournamentType::Duo, "BGMI Duo Clash", 60, 2500, 50),
    seed(GameType::Bgmi, TournamentType::Squad, "BGMI Squad Battle", 100, 2000, 25),
    seed(GameType::FreeFire, TournamentType::Solo, "Free Fire Solo Rush", 30, 2000, 48),
    seed(GameType::FreeFire, TournamentType::Duo, "Free Fire Duo Blitz", 60, 2000, 24),
    seed(GameType::FreeFire, TournamentType::Squad, "Free Fire Squad Siege", 100, 1800, 12),
];
