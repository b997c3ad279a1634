#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
// Style preference — keeping format!("{}", x) over format!("{x}") for readability with complex exprs
#![allow(clippy::uninlined_format_args)]
// Intentional casts in image geometry and timing code (pixel offsets, durations, sizes)
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::module_name_repetitions)]

pub mod bus;
pub mod channels;
pub mod cli;
pub mod config;
pub mod errors;
pub mod router;
pub mod scan;
pub mod sticker;
pub(crate) mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const BOT_NAME: &str = "Sticker Bot";
