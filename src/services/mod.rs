pub mod changeover_matrix;
pub mod scenario_registry;

pub use changeover_matrix::ChangeoverMatrixStore;
pub use scenario_registry::ScenarioRegistry;
