pub mod liquid_state;
pub mod noise;
pub mod particle_store;
pub mod spawn;

pub use liquid_state::LiquidState;
pub use noise::{NoiseSource, SeededNoise, SilentNoise};
pub use particle_store::{ParticleStore, RelaxScratch};
pub use spawn::SpawnRegion;
