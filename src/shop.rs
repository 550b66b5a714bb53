/// Shop sub-state: permanent upgrades bought with score, and the dice roll.
use rand::Rng;

use crate::constants::{
    ATTACK_UPGRADE_STEP, DICE_BUST, DICE_JACKPOT, HEALTH_UPGRADE_LIVES, PLAYER_SPEED,
    PRICE_ATTACK, PRICE_HEALTH, PRICE_SPEED, SHOT_DAMAGE, SPEED_UPGRADE_STEP,
};
use crate::entities::{DiceOutcome, DiceRoll, GameState, RunState, Screen, Upgrades};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Upgrade {
    Health,
    Speed,
    Attack,
}

impl Upgrade {
    pub const ALL: [Upgrade; 3] = [Upgrade::Health, Upgrade::Speed, Upgrade::Attack];

    pub fn price(self) -> u32 {
        match self {
            Upgrade::Health => PRICE_HEALTH,
            Upgrade::Speed => PRICE_SPEED,
            Upgrade::Attack => PRICE_ATTACK,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Upgrade::Health => "+2 Max Lives",
            Upgrade::Speed => "+1 Speed",
            Upgrade::Attack => "+0.5 Attack",
        }
    }

    pub fn owned(self, upgrades: &Upgrades) -> bool {
        match self {
            Upgrade::Health => upgrades.health_bought,
            Upgrade::Speed => upgrades.speed_bought,
            Upgrade::Attack => upgrades.attack_bought,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Bought,
    InsufficientFunds { price: u32 },
    AlreadyOwned,
    NotInShop,
}

// ── Derived stats ─────────────────────────────────────────────────────────────

pub fn player_speed(upgrades: &Upgrades) -> f32 {
    PLAYER_SPEED * upgrades.speed_multiplier
}

pub fn shot_damage(upgrades: &Upgrades) -> u32 {
    ((SHOT_DAMAGE as f32) * upgrades.damage_multiplier).round().max(1.0) as u32
}

// ── Purchases ─────────────────────────────────────────────────────────────────

/// Buy one upgrade with score.  Only valid on the shop screen.
pub fn purchase(state: &mut GameState, upgrade: Upgrade) -> PurchaseOutcome {
    let Screen::Shop(panel) = &mut state.screen else {
        return PurchaseOutcome::NotInShop;
    };
    let run = &mut state.run;

    if upgrade.owned(&run.upgrades) {
        panel.message = Some(format!("{} already bought", upgrade.label()));
        return PurchaseOutcome::AlreadyOwned;
    }
    let price = upgrade.price();
    if run.score < price {
        panel.message = Some(format!("Not enough points! Need {price} pts."));
        return PurchaseOutcome::InsufficientFunds { price };
    }

    run.score -= price;
    let up = &mut run.upgrades;
    match upgrade {
        Upgrade::Health => {
            up.max_lives += HEALTH_UPGRADE_LIVES;
            up.health_bought = true;
            run.lives += HEALTH_UPGRADE_LIVES;
        }
        Upgrade::Speed => {
            up.speed_multiplier += SPEED_UPGRADE_STEP;
            up.speed_bought = true;
        }
        Upgrade::Attack => {
            up.damage_multiplier += ATTACK_UPGRADE_STEP;
            up.attack_bought = true;
        }
    }
    panel.message = Some(format!("Purchased {}", upgrade.label()));
    tracing::info!(?upgrade, score = run.score, "upgrade purchased");
    PurchaseOutcome::Bought
}

// ── Dice ──────────────────────────────────────────────────────────────────────

pub fn dice_outcome(total: u32) -> DiceOutcome {
    if total >= DICE_JACKPOT {
        DiceOutcome::Invulnerable
    } else if total <= DICE_BUST {
        DiceOutcome::Bust
    } else {
        DiceOutcome::Neutral
    }
}

/// Apply a dice total to the run: a jackpot grants invulnerability for the
/// next level, a bust wipes upgrades and currency.
pub fn apply_dice_total(run: &mut RunState, total: u32) -> DiceOutcome {
    let outcome = dice_outcome(total);
    match outcome {
        DiceOutcome::Invulnerable => run.invulnerable = true,
        DiceOutcome::Bust => {
            run.upgrades = Upgrades::default();
            run.score = 0;
            run.lives = run.lives.min(run.upgrades.max_lives);
        }
        DiceOutcome::Neutral => {}
    }
    outcome
}

/// Roll three six-sided dice, once per shop visit.  Returns `None` outside
/// the shop or when the dice were already rolled.
pub fn roll_dice(state: &mut GameState, rng: &mut impl Rng) -> Option<DiceRoll> {
    let Screen::Shop(panel) = &mut state.screen else {
        return None;
    };
    if panel.dice.is_some() {
        return None;
    }

    let dice = [rng.gen_range(1..=6), rng.gen_range(1..=6), rng.gen_range(1..=6)];
    let total = dice.iter().sum();
    let outcome = apply_dice_total(&mut state.run, total);
    panel.message = Some(match outcome {
        DiceOutcome::Invulnerable => format!("SUCCESS! Total {total}. Invulnerable next world!"),
        DiceOutcome::Bust => format!("CRITICAL FAILURE! Total {total}. All upgrades and points lost!"),
        DiceOutcome::Neutral => format!("NEUTRAL. Total {total}. Nothing gained, nothing lost."),
    });
    let roll = DiceRoll { dice, total, outcome };
    panel.dice = Some(roll.clone());
    tracing::info!(total, ?outcome, "dice rolled");
    Some(roll)
}
