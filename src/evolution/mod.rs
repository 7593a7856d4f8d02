pub mod challenge;
pub mod fitness;
pub mod options;
pub mod population;
pub mod steady_state;

pub use challenge::Challenge;
pub use fitness::FitnessFunction;
pub use options::{CoolingSchedule, EvolutionOptions, EvolutionOptionsBuilder, WeightTarget};
pub use population::{Individual, Population, PopulationStats};
pub use steady_state::{EvolutionResult, RunState, SteadyStateGa};
