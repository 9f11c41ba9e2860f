mod collision;
pub mod input;
mod pacer;
mod player;

pub use collision::{MoveResult, SLIDE_STEP, slide};
pub use input::{AXIS_RULES, Control, Held, InputState, Intent, KeyEvent};
pub use pacer::{FramePacer, time_to_wait};
pub use player::{EYE_HEIGHT, PLAYER_SIZE, Player, TURN_SPEED, WALK_SPEED};
