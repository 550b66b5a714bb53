/// Game state machine and per-tick orchestration.
///
/// Every public function takes the `GameState` by mutable reference (plus an
/// RNG handle where placement is random) and returns the `GameEvent`s it
/// produced.  Actions that make no sense on the current screen are silent
/// no-ops.
use std::f32::consts::TAU;

use rand::Rng;

use crate::boss::{self, BossAction, BossHit};
use crate::constants::{
    ATTACK_REACH, ATTACK_TICKS, BOSS_FLASH_TICKS, COIN_SCORE, EGG_HEIGHT, EGG_POP_VY, EGG_WIDTH,
    FLOAT_STEP, HEAVY_LANDING_SPEED, INVINCIBLE_TICKS, JUMP_STRENGTH, LEVEL_TRANSITION_TICKS,
    NAME_MAX_CHARS, PLAYER_SIZE, PLAYER_START_X, PLAYER_START_Y, PROJECTILE_SPEED, RESOLVE_TICKS,
    SHOT_HEIGHT, SHOT_WIDTH, SPARK_THRESHOLD, VIEW_HEIGHT,
};
use crate::entities::{
    Body, BossKind, BossPlan, CollectibleKind, DeathCause, Facing, Form, GameOverPanel, GameState,
    Player, Projectile, ProjectileKind, Rect, RunState, Screen, ShopPanel, Tint, Upgrades, World,
};
use crate::events::GameEvent;
use crate::hazard;
use crate::input::{Command, InputFrame};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::level::{generate_level, LevelLayout};
use crate::physics::{follow_camera, step_patroller, step_player, step_projectile, try_jump};
use crate::shop::{self, PurchaseOutcome};

// ── Constructors ─────────────────────────────────────────────────────────────

pub fn new_player() -> Player {
    Player {
        body: Body::new(PLAYER_START_X, PLAYER_START_Y, PLAYER_SIZE, PLAYER_SIZE),
        jump_count: 0,
        facing: Facing::Right,
        form: Form::Normal,
        attack_timer: 0,
        stationary_ticks: 0,
        invincible_ticks: 0,
        rotation: 0.0,
    }
}

pub fn new_run() -> RunState {
    let upgrades = Upgrades::default();
    RunState {
        level: 1,
        score: 0,
        lives: upgrades.max_lives,
        collected: 0,
        required: 0,
        transformations: 0,
        enemy_speed: 0.0,
        boss_plan: BossPlan::None,
        hazards: Vec::new(),
        scheduled: Vec::new(),
        effects: Vec::new(),
        overlay: None,
        death_cause: None,
        upgrades,
        invulnerable: false,
        tick: 0,
    }
}

fn world_from(layout: LevelLayout, player: Player, rng: &mut impl Rng) -> World {
    World {
        width: layout.world_width,
        platforms: layout.platforms,
        player,
        enemies: layout.enemies,
        boss: None,
        collectibles: layout.collectibles,
        projectiles: Vec::new(),
        particles: Vec::new(),
        background: hazard::make_background(rng),
        camera_x: 0.0,
    }
}

/// Fresh state on the menu screen, with level one laid out behind it.
pub fn new_game_state(leaderboard: Leaderboard, rng: &mut impl Rng) -> GameState {
    let layout = generate_level(1, rng);
    GameState {
        screen: Screen::Menu,
        run: new_run(),
        world: world_from(layout, new_player(), rng),
        leaderboard,
        muted: false,
    }
}

// ── Screen transitions ───────────────────────────────────────────────────────

/// Begin a new run from the menu or the game-over panel.
pub fn start_game(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    match &state.screen {
        Screen::Menu => {}
        Screen::GameOver(panel) if panel.name_entry.is_none() => {}
        _ => return Vec::new(),
    }
    tracing::info!("game started");
    state.run = new_run();
    state.world.player = new_player();
    let mut events = vec![GameEvent::GameStarted];
    events.extend(start_level(state, 1, false, rng));
    events
}

/// Lay out `level` and switch to `Playing`.  Lives refill; the
/// transformation count carries over.  The player's form (and nothing else
/// about the player) survives only when `keep_form` is set.
pub fn start_level(state: &mut GameState, level: u32, keep_form: bool, rng: &mut impl Rng) -> Vec<GameEvent> {
    let layout = generate_level(level, rng);
    let run = &mut state.run;
    run.level = layout.index;
    run.collected = 0;
    run.required = layout.required;
    run.enemy_speed = layout.enemy_speed;
    run.boss_plan = layout.boss_plan;
    run.scheduled = layout.hazards.clone();
    run.hazards.clear();
    run.effects.clear();
    run.overlay = None;
    run.death_cause = None;
    run.lives = run.upgrades.max_lives;

    let mut player = new_player();
    if keep_form && state.world.player.form == Form::Alternate {
        become_egg(&mut player);
    }
    let background = std::mem::take(&mut state.world.background);
    state.world = world_from(layout, player, rng);
    if !background.stars.is_empty() {
        state.world.background = background;
    }
    state.screen = Screen::Playing;

    tracing::info!(
        level = run.level,
        enemy_speed = run.enemy_speed,
        required = run.required,
        boss = ?run.boss_plan,
        "level started"
    );
    let mut events = vec![GameEvent::LevelStarted { level: run.level }];

    if let BossPlan::Immediate { kind } = run.boss_plan {
        events.push(spawn_boss(state, kind));
    }
    events
}

pub fn toggle_pause(state: &mut GameState) -> Option<GameEvent> {
    match state.screen {
        Screen::Playing => {
            state.screen = Screen::Paused;
            Some(GameEvent::Paused(true))
        }
        Screen::Paused => {
            state.screen = Screen::Playing;
            Some(GameEvent::Paused(false))
        }
        _ => None,
    }
}

pub fn toggle_mute(state: &mut GameState) -> GameEvent {
    state.muted = !state.muted;
    GameEvent::MuteToggled(state.muted)
}

/// Continue out of the shop into the next level.
pub fn leave_shop(state: &mut GameState, rng: &mut impl Rng) -> Vec<GameEvent> {
    if !matches!(state.screen, Screen::Shop(_)) {
        return Vec::new();
    }
    let next = state.run.level + 1;
    start_level(state, next, false, rng)
}

// ── Name entry ───────────────────────────────────────────────────────────────

fn name_entry(state: &mut GameState) -> Option<&mut String> {
    match &mut state.screen {
        Screen::GameOver(GameOverPanel { name_entry: Some(name), .. }) => Some(name),
        _ => None,
    }
}

pub fn type_name_char(state: &mut GameState, c: char) {
    if let Some(name) = name_entry(state) {
        if name.chars().count() < NAME_MAX_CHARS {
            name.push(c);
        }
    }
}

pub fn erase_name_char(state: &mut GameState) {
    if let Some(name) = name_entry(state) {
        name.pop();
    }
}

/// Record the pending high score and return to the menu.
pub fn submit_score(state: &mut GameState) -> Option<GameEvent> {
    let Screen::GameOver(panel) = &state.screen else {
        return None;
    };
    let name = panel.name_entry.as_ref()?;
    let entry = LeaderboardEntry::new(
        name,
        panel.final_level,
        panel.final_score,
        state.run.death_cause.map(|c| c.label().to_string()),
    );
    tracing::info!(name = %entry.name, score = entry.score, level = entry.level, "score submitted");
    state.leaderboard.insert(entry.clone());
    state.screen = Screen::Menu;
    Some(GameEvent::ScoreSubmitted(entry))
}

/// Leave the game-over panel for the menu without recording a score.
pub fn dismiss_game_over(state: &mut GameState) {
    if matches!(state.screen, Screen::GameOver(_)) {
        state.screen = Screen::Menu;
    }
}

/// Dispatch a one-shot command.  `Quit` belongs to the host and is ignored.
pub fn apply_command(state: &mut GameState, command: &Command, rng: &mut impl Rng) -> Vec<GameEvent> {
    match command {
        Command::Start | Command::Restart => start_game(state, rng),
        Command::TogglePause => toggle_pause(state).into_iter().collect(),
        Command::ToggleMute => vec![toggle_mute(state)],
        Command::Buy(upgrade) => match shop::purchase(state, *upgrade) {
            PurchaseOutcome::Bought => vec![GameEvent::Purchased(*upgrade)],
            _ => Vec::new(),
        },
        Command::RollDice => shop::roll_dice(state, rng)
            .map(|roll| GameEvent::DiceRolled { total: roll.total, outcome: roll.outcome })
            .into_iter()
            .collect(),
        Command::Confirm => {
            let naming = matches!(&state.screen, Screen::GameOver(p) if p.name_entry.is_some());
            if matches!(state.screen, Screen::Shop(_)) {
                leave_shop(state, rng)
            } else if naming {
                submit_score(state).into_iter().collect()
            } else {
                dismiss_game_over(state);
                Vec::new()
            }
        }
        Command::Cancel => {
            dismiss_game_over(state);
            Vec::new()
        }
        Command::Type(c) => {
            type_name_char(state, *c);
            Vec::new()
        }
        Command::Backspace => {
            erase_name_char(state);
            Vec::new()
        }
        Command::Quit => Vec::new(),
    }
}

// ── Internal transitions ─────────────────────────────────────────────────────

fn become_egg(player: &mut Player) {
    let bottom = player.body.y + player.body.h;
    player.form = Form::Alternate;
    player.attack_timer = 0;
    player.body.w = EGG_WIDTH;
    player.body.h = EGG_HEIGHT;
    player.body.y = bottom - EGG_HEIGHT;
}

fn spawn_boss(state: &mut GameState, kind: BossKind) -> GameEvent {
    let boss = boss::spawn_boss(
        kind,
        state.run.level,
        state.world.player.body.x,
        state.run.enemy_speed,
        state.world.width,
    );
    let hp = boss.behavior.hp;
    tracing::info!(?kind, hp, level = state.run.level, "boss spawned");
    state.world.boss = Some(boss);
    state.run.overlay = Some(hazard::boss_flash(BOSS_FLASH_TICKS));
    GameEvent::BossSpawned { kind, hp }
}

fn complete_level(state: &mut GameState, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    let level = state.run.level;
    tracing::info!(level, score = state.run.score, "level complete");
    state.run.invulnerable = false;
    let p = state.world.player.body.rect();
    hazard::burst(&mut state.world.particles, p.center_x(), p.y, Tint::Gold, rng);
    state.screen = Screen::Transitioning {
        ticks_left: LEVEL_TRANSITION_TICKS,
        next_level: level + 1,
    };
    events.push(GameEvent::LevelComplete { level });
}

fn open_shop(state: &mut GameState, events: &mut Vec<GameEvent>) {
    tracing::info!(level = state.run.level, score = state.run.score, "shop opened");
    state.run.invulnerable = false;
    state.screen = Screen::Shop(ShopPanel::default());
    events.push(GameEvent::LevelComplete { level: state.run.level });
    events.push(GameEvent::ShopOpened);
}

fn enter_game_over(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let run = &state.run;
    let high_score = state.leaderboard.qualifies(run.score);
    tracing::info!(
        score = run.score,
        level = run.level,
        cause = ?run.death_cause,
        high_score,
        "game over"
    );
    state.screen = Screen::GameOver(GameOverPanel {
        name_entry: high_score.then(String::new),
        final_score: run.score,
        final_level: run.level,
    });
    events.push(GameEvent::GameOver { score: run.score, level: run.level, high_score });
}

/// End the run.  Effect deaths animate in `Resolving` first.
fn die(state: &mut GameState, cause: DeathCause, resolve: bool, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    state.run.death_cause = Some(cause);
    let p = state.world.player.body.rect();
    hazard::burst(&mut state.world.particles, p.center_x(), p.center_y(), Tint::Blood, rng);
    events.push(GameEvent::Died { cause });
    if resolve {
        state.screen = Screen::Resolving { ticks_left: RESOLVE_TICKS };
    } else {
        enter_game_over(state, events);
    }
}

/// Take one life unless protected; the last life ends the run with `cause`.
fn hurt_player(state: &mut GameState, cause: DeathCause, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    if state.run.invulnerable || state.world.player.invincible_ticks > 0 {
        return;
    }
    state.run.lives = state.run.lives.saturating_sub(1);
    events.push(GameEvent::PlayerHit { lives_left: state.run.lives });
    if state.run.lives == 0 {
        die(state, cause, false, events, rng);
    } else {
        state.world.player.invincible_ticks = INVINCIBLE_TICKS;
    }
}

fn hit_boss(state: &mut GameState, amount: u32, events: &mut Vec<GameEvent>, rng: &mut impl Rng) {
    let Some(b) = state.world.boss.as_mut() else {
        return;
    };
    match boss::damage_boss(&mut b.behavior, amount) {
        BossHit::Damaged { hp } => events.push(GameEvent::BossDamaged { hp }),
        BossHit::Defeated => {
            let kind = b.behavior.kind;
            let score = b.behavior.score_value;
            let r = b.body.rect();
            state.world.boss = None;
            state.run.score += score;
            hazard::burst(&mut state.world.particles, r.center_x(), r.center_y(), Tint::Fire, rng);
            tracing::info!(?kind, level = state.run.level, "boss defeated");
            events.push(GameEvent::BossDamaged { hp: 0 });
            events.push(GameEvent::BossDefeated { kind });
            match kind {
                BossKind::WorldBoss => open_shop(state, events),
                BossKind::Archer | BossKind::Warlock => complete_level(state, events, rng),
            }
        }
    }
}

fn attack_box(player: &Player) -> Rect {
    let b = player.body.rect();
    let x = match player.facing {
        Facing::Right => b.x,
        Facing::Left => b.x - ATTACK_REACH,
    };
    Rect::new(x, b.y, b.w + ATTACK_REACH, b.h)
}

/// A falling player whose previous bottom edge was above `target`'s top.
fn is_stomp(player: &Body, target: &Rect) -> bool {
    player.vy > 0.0 && player.y + player.h - player.vy <= target.y + player.vy.max(1.0)
}

fn still_playing(state: &GameState) -> bool {
    state.screen == Screen::Playing
}

// ── Per-frame tick (nearly pure, RNG is injected) ──────────────────────────

/// Advance the simulation by one fixed step.  Only `Playing`,
/// `Transitioning` and `Resolving` move anything.
pub fn tick(state: &mut GameState, input: &InputFrame, rng: &mut impl Rng) -> Vec<GameEvent> {
    match state.screen {
        Screen::Playing => tick_playing(state, input, rng),
        Screen::Transitioning { ticks_left, next_level } => {
            hazard::step_particles(&mut state.world.particles);
            hazard::step_background(&mut state.world.background);
            if ticks_left <= 1 {
                start_level(state, next_level, false, rng)
            } else {
                state.screen = Screen::Transitioning { ticks_left: ticks_left - 1, next_level };
                Vec::new()
            }
        }
        Screen::Resolving { ticks_left } => {
            hazard::step_effects(&mut state.run.effects);
            hazard::step_overlay(&mut state.run.overlay);
            hazard::step_particles(&mut state.world.particles);
            let mut events = Vec::new();
            if ticks_left <= 1 {
                enter_game_over(state, &mut events);
            } else {
                state.screen = Screen::Resolving { ticks_left: ticks_left - 1 };
            }
            events
        }
        Screen::Menu => {
            hazard::step_background(&mut state.world.background);
            Vec::new()
        }
        Screen::Paused | Screen::GameOver(_) | Screen::Shop(_) => Vec::new(),
    }
}

fn tick_playing(state: &mut GameState, input: &InputFrame, rng: &mut impl Rng) -> Vec<GameEvent> {
    let mut events = Vec::new();
    state.run.tick += 1;

    // ── 1. Timers & overlay ──────────────────────────────────────────────────
    hazard::step_overlay(&mut state.run.overlay);
    hazard::step_effects(&mut state.run.effects);

    // ── 2. Cosmetics ─────────────────────────────────────────────────────────
    hazard::step_particles(&mut state.world.particles);
    hazard::step_background(&mut state.world.background);
    for coin in &mut state.world.collectibles {
        coin.float_phase = (coin.float_phase + FLOAT_STEP) % TAU;
    }

    // ── 3. Hazards ───────────────────────────────────────────────────────────
    for kind in hazard::tick_schedule(&mut state.run.scheduled) {
        tracing::debug!(?kind, "hazard triggered");
        let spawned = hazard::spawn_hazard(kind, state.world.camera_x, rng);
        state.run.hazards.extend(spawned);
        events.push(GameEvent::HazardTriggered(kind));
    }
    hazard::step_hazards(
        &mut state.run.hazards,
        &mut state.world.collectibles,
        &state.world.platforms,
        state.world.width,
        rng,
    );
    // Dice protection does not cover falling hazards.
    if hazard::meteor_strikes(&state.run.hazards, &state.world.player.body.rect()) {
        die(state, DeathCause::CrushedByMeteor, false, &mut events, rng);
        return events;
    }

    // ── 4. Jump & attack ─────────────────────────────────────────────────────
    let mut attack_started = false;
    {
        let player = &mut state.world.player;
        if input.jump_pressed && try_jump(player, JUMP_STRENGTH) {
            let b = player.body.rect();
            hazard::burst(&mut state.world.particles, b.center_x(), b.bottom(), Tint::Dust, rng);
            events.push(GameEvent::Jumped);
        }
        if input.attack_pressed && player.form == Form::Normal && player.attack_timer == 0 {
            player.attack_timer = ATTACK_TICKS;
            attack_started = true;
            let b = player.body.rect();
            let x = match player.facing {
                Facing::Right => b.right(),
                Facing::Left => b.x - SHOT_WIDTH,
            };
            state.world.projectiles.push(Projectile {
                rect: Rect::new(x, b.center_y() - SHOT_HEIGHT / 2.0, SHOT_WIDTH, SHOT_HEIGHT),
                vx: PROJECTILE_SPEED * player.facing.sign(),
                kind: ProjectileKind::PlayerShot,
                damage: shop::shot_damage(&state.run.upgrades),
                alive: true,
            });
            events.push(GameEvent::Attacked);
        }
    }

    // ── 5. Player physics ────────────────────────────────────────────────────
    let was_grounded = state.world.player.body.on_ground;
    let step = step_player(
        &mut state.world.player,
        &input.held,
        &state.world.platforms,
        state.world.width,
        shop::player_speed(&state.run.upgrades),
        state.run.transformations,
    );
    let p = state.world.player.body.rect();
    if step.stationary_expired {
        state.run.effects.push(hazard::lightning_at(p.center_x(), p.y));
        state.run.overlay = Some(hazard::whiteout());
        events.push(GameEvent::LightningStruck);
        die(state, DeathCause::LightningStrike, true, &mut events, rng);
        return events;
    }
    if step.fell_out {
        state.run.effects.push(hazard::splash_at(p.center_x(), VIEW_HEIGHT));
        events.push(GameEvent::Splashed);
        die(state, DeathCause::EggSplash, true, &mut events, rng);
        return events;
    }
    if let Some(landing) = step.landing {
        if !was_grounded {
            events.push(GameEvent::Landed { heavy: landing.impact > HEAVY_LANDING_SPEED });
        }
    }
    let player = &state.world.player;
    if player.form == Form::Alternate
        && player.stationary_ticks > SPARK_THRESHOLD
        && state.run.tick % 10 == 0
    {
        hazard::burst(&mut state.world.particles, p.center_x(), p.y, Tint::Spark, rng);
    }

    // ── 6. Collectibles ──────────────────────────────────────────────────────
    for i in 0..state.world.collectibles.len() {
        let coin = &mut state.world.collectibles[i];
        if !coin.active || !coin.rect.overlaps(&state.world.player.body.rect()) {
            continue;
        }
        coin.active = false;
        let (cx, cy, kind) = (coin.rect.center_x(), coin.rect.center_y(), coin.kind);
        match kind {
            CollectibleKind::Normal => {
                state.run.collected += 1;
                state.run.score += COIN_SCORE;
                hazard::burst(&mut state.world.particles, cx, cy, Tint::Gold, rng);
                events.push(GameEvent::CoinCollected {
                    remaining: state.run.required.saturating_sub(state.run.collected),
                });
            }
            CollectibleKind::Trap => {
                let player = &mut state.world.player;
                become_egg(player);
                player.body.vy = EGG_POP_VY;
                state.run.transformations += 1;
                hazard::burst(&mut state.world.particles, cx, cy, Tint::Shell, rng);
                tracing::debug!(transformations = state.run.transformations, "trap collected");
                events.push(GameEvent::TrapCollected { transformations: state.run.transformations });
            }
        }
    }

    // ── 7. Quota & boss trigger ──────────────────────────────────────────────
    let quota_met = state.run.collected >= state.run.required;
    match state.run.boss_plan {
        BossPlan::None if quota_met => {
            complete_level(state, &mut events, rng);
            return events;
        }
        BossPlan::Triggered { kind, trigger_x }
            if quota_met
                && state.world.boss.is_none()
                && state.world.player.body.x >= trigger_x as f32 =>
        {
            events.push(spawn_boss(state, kind));
        }
        _ => {}
    }

    // ── 8. Enemies ───────────────────────────────────────────────────────────
    let attack = (state.world.player.attack_timer > 0).then(|| attack_box(&state.world.player));
    for i in 0..state.world.enemies.len() {
        let enemy = &mut state.world.enemies[i];
        if !enemy.alive {
            continue;
        }
        step_patroller(&mut enemy.body, &state.world.platforms, state.world.width, true);
        enemy.bounce_phase += 0.1;

        let er = enemy.body.rect();
        let player = &mut state.world.player;
        if !player.body.rect().overlaps(&er) && !attack.map_or(false, |a| a.overlaps(&er)) {
            continue;
        }
        let slashed = attack.map_or(false, |a| a.overlaps(&er));
        let stomped = !slashed && is_stomp(&player.body, &er);
        if slashed || stomped {
            enemy.alive = false;
            state.run.score += enemy.score_value;
            if stomped {
                player.body.vy = JUMP_STRENGTH * 0.5;
            }
            hazard::burst(&mut state.world.particles, er.center_x(), er.center_y(), Tint::Blood, rng);
            events.push(GameEvent::EnemyDefeated { x: er.center_x(), y: er.center_y() });
        } else {
            hurt_player(state, DeathCause::SlainByEnemy, &mut events, rng);
            if !still_playing(state) {
                return events;
            }
        }
    }
    state.world.enemies.retain(|e| e.alive);

    // ── 9. Boss ──────────────────────────────────────────────────────────────
    if let Some(b) = state.world.boss.as_mut() {
        let target_x = state.world.player.body.rect().center_x();
        match boss::update_boss(b, &state.world.platforms, state.world.width, target_x) {
            Some(BossAction::FiredArrow) => {
                state.world.projectiles.push(boss::arrow_from(b));
                events.push(GameEvent::ArrowFired);
            }
            Some(BossAction::StartedCharging) => events.push(GameEvent::LaserCharging),
            Some(BossAction::FiredLaser) => events.push(GameEvent::LaserFired),
            None => {}
        }
        let br = b.body.rect();
        let laser = boss::laser_rect(b);
        let pr = state.world.player.body.rect();

        if laser.map_or(false, |l| l.overlaps(&pr)) {
            hurt_player(state, DeathCause::VaporizedByLaser, &mut events, rng);
            if !still_playing(state) {
                return events;
            }
        }
        if pr.overlaps(&br) {
            if is_stomp(&state.world.player.body, &br) {
                state.world.player.body.vy = JUMP_STRENGTH * 0.5;
                hit_boss(state, 1, &mut events, rng);
            } else if !(attack_started && attack.map_or(false, |a| a.overlaps(&br))) {
                hurt_player(state, DeathCause::SlainByEnemy, &mut events, rng);
            }
        }
        if attack_started && attack.map_or(false, |a| a.overlaps(&br)) {
            let damage = shop::shot_damage(&state.run.upgrades);
            hit_boss(state, damage, &mut events, rng);
        }
        if !still_playing(state) {
            return events;
        }
    }

    // ── 10. Projectiles ──────────────────────────────────────────────────────
    let camera_x = state.world.camera_x;
    for i in 0..state.world.projectiles.len() {
        let shot = &mut state.world.projectiles[i];
        if !shot.alive {
            continue;
        }
        step_projectile(shot, camera_x);
        let (rect, kind, damage) = (shot.rect, shot.kind, shot.damage);
        match kind {
            ProjectileKind::PlayerShot => {
                if let Some(enemy) = state
                    .world
                    .enemies
                    .iter_mut()
                    .find(|e| e.alive && e.body.rect().overlaps(&rect))
                {
                    enemy.alive = false;
                    state.run.score += enemy.score_value;
                    let er = enemy.body.rect();
                    state.world.projectiles[i].alive = false;
                    hazard::burst(&mut state.world.particles, er.center_x(), er.center_y(), Tint::Blood, rng);
                    events.push(GameEvent::EnemyDefeated { x: er.center_x(), y: er.center_y() });
                } else if state
                    .world
                    .boss
                    .as_ref()
                    .map_or(false, |b| b.body.rect().overlaps(&rect))
                {
                    state.world.projectiles[i].alive = false;
                    hit_boss(state, damage, &mut events, rng);
                    if !still_playing(state) {
                        return events;
                    }
                }
            }
            ProjectileKind::EnemyArrow => {
                if rect.overlaps(&state.world.player.body.rect()) {
                    shot.alive = false;
                    hurt_player(state, DeathCause::PiercedByArrow, &mut events, rng);
                    if !still_playing(state) {
                        return events;
                    }
                }
            }
        }
    }
    state.world.projectiles.retain(|p| p.alive);
    state.world.enemies.retain(|e| e.alive);

    // ── 11. Camera ───────────────────────────────────────────────────────────
    state.world.camera_x = follow_camera(
        state.world.camera_x,
        &state.world.player.body,
        state.world.width,
    );

    events
}
