pub mod activation;
pub mod config;
pub mod data;
pub mod network;
pub mod parallel;
pub mod trainer;

pub use activation::Activation;
pub use data::Example;
pub use network::Network;
pub use parallel::parallel_train;
pub use trainer::Backpropagation;
