pub mod codec;
pub mod constants;
pub mod error;
pub mod fixed;
pub mod hash;
pub mod init;
pub mod physics;
pub mod prng;
pub mod replay;
pub mod step;
pub mod terrain;
pub mod trig;
pub mod types;
pub mod view;

pub use codec::{decode_state, encode_state, ENCODED_STATE_LEN};
pub use constants::*;
pub use error::{DecodeError, ReplayError, TerrainError};
pub use fixed::FixedPoint;
pub use hash::*;
pub use init::*;
pub use physics::{apply_aim, integrate, launch, resolve_impact, roll_wind, Impact};
pub use prng::*;
pub use replay::{first_divergence, run_replay, Checkpoint, Divergence, Replay, ReplayOutcome};
pub use step::{simulate, simulate_mut};
pub use terrain::{Hill, Terrain, TerrainProfile};
pub use trig::TrigTable;
pub use types::*;
pub use view::StateView;
