//! Error types for the scenario runner binary.

/// Top-level error for the runner.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: workbench_crafting::ConfigError,
    },

    /// The scenario world is inconsistent.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: workbench_world::WorldError,
    },

    /// Requirement resolution or consumption failed.
    #[error("crafting error: {source}")]
    Crafting {
        /// The underlying crafting error.
        #[from]
        source: workbench_crafting::CraftingError,
    },

    /// The scenario file could not be read.
    #[error("failed to read scenario {path}: {source}")]
    ScenarioIo {
        /// The scenario path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The scenario file is not valid YAML for a scenario.
    #[error("failed to parse scenario {path}: {message}")]
    ScenarioParse {
        /// The scenario path.
        path: String,
        /// Description of the parse failure.
        message: String,
    },
}
