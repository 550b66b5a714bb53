/// Discrete things that happened during one tick.  The simulation pushes
/// them; audio, logging and persistence consume them after the tick.
use crate::entities::{BossKind, DeathCause, DiceOutcome, HazardKind};
use crate::leaderboard::LeaderboardEntry;
use crate::shop::Upgrade;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    GameStarted,
    LevelStarted { level: u32 },
    Jumped,
    Attacked,
    Landed { heavy: bool },
    CoinCollected { remaining: usize },
    TrapCollected { transformations: u32 },
    EnemyDefeated { x: f32, y: f32 },
    PlayerHit { lives_left: u32 },
    BossSpawned { kind: BossKind, hp: u32 },
    BossDamaged { hp: u32 },
    /// Fired exactly once per boss, on the hit that empties its HP.
    BossDefeated { kind: BossKind },
    ArrowFired,
    LaserCharging,
    LaserFired,
    HazardTriggered(HazardKind),
    Splashed,
    LightningStruck,
    LevelComplete { level: u32 },
    ShopOpened,
    Purchased(Upgrade),
    DiceRolled { total: u32, outcome: DiceOutcome },
    Died { cause: DeathCause },
    GameOver { score: u32, level: u32, high_score: bool },
    ScoreSubmitted(LeaderboardEntry),
    Paused(bool),
    MuteToggled(bool),
}
