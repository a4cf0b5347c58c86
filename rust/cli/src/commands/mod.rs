//! Command handler modules.
//!
//! Each command lives in its own file and exposes one
//! `handle_COMMAND_command(...) -> Result<(), CliError>` that writes to the
//! injected output streams.

pub mod cfg;
pub mod deal;
pub mod equity;
pub mod eval;
pub mod play;
pub mod train;

pub use cfg::handle_cfg_command;
pub use deal::handle_deal_command;
pub use equity::handle_equity_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use train::{handle_train_command, TrainArgs};
