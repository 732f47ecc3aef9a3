// Application layer - Use case interactors

pub mod container;
pub mod library_interactor;
pub mod trim_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use library_interactor::LibraryInteractor;
pub use trim_interactor::TrimInteractor;
