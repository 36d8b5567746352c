// Playfield and timing
pub const SCREEN_WIDTH: f64 = 400.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const TICKS_PER_SECOND: u32 = 60;
pub const FRAME_MS: u64 = 16; // ~60 FPS
pub const MAX_TICK_DT_MS: u64 = 100;

// Bird physics (per tick, positive y = downward)
pub const BIRD_START_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = SCREEN_HEIGHT / 2.0;
pub const BIRD_SIZE: f64 = 30.0;
pub const BIRD_GRAVITY: f64 = 0.5;
pub const BIRD_JUMP_IMPULSE: f64 = -8.0;
pub const BIRD_HITBOX_INSET: f64 = 4.0;
pub const FALL_THROUGH_SPEED: f64 = 3.0;

// Pipe geometry
pub const PIPE_WIDTH: f64 = 50.0;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_MIN_MARGIN: f64 = 50.0;

// Pickups and projectiles
pub const POWER_UP_SIZE: f64 = 30.0;
pub const ENEMY_SIZE: f64 = 30.0;
pub const FIREBALL_WIDTH: f64 = 16.0;
pub const FIREBALL_HEIGHT: f64 = 8.0;
pub const FIREBALL_SPEED: f64 = 7.0;

// Slowdown never drops a pipe below this speed
pub const MIN_SLOWED_PIPE_SPEED: f64 = 1.0;

// Death sequence
pub const DEATH_EXPLOSION_TICKS: u32 = 60;
pub const DEATH_SHAKE_AMPLITUDE: f64 = 6.0;

// Boss encounters
pub const ENCOUNTER_ENTRY_TICKS: u32 = 90;
pub const ENCOUNTER_VICTORY_TICKS: u32 = 120;
pub const ENCOUNTER_PLAYER_HP: u32 = 100;

// Leaderboard
pub const MAX_NAME_LEN: usize = 10;
pub const BEAT_LEADER_BANNER_TICKS: u32 = 180;

// Persistence
pub const DATA_DIR_NAME: &str = ".skyflap";
pub const LEADERBOARD_FILE: &str = "leaderboard.json";
pub const CONFIG_FILE: &str = "config.json";
pub const LOG_FILE: &str = "skyflap.log";
