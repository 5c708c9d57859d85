pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::{backpropagate, run_epoch, train_sample};
pub use epoch_stats::EpochStats;
pub use train_config::TrainOptions;
pub use loop_fn::{train_loop, TrainReport};
