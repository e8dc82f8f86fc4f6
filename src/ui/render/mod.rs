mod all;
mod board;
mod create_column;
mod create_task;
mod footer;
mod log;

use self::footer::footer;
use self::log::log;
use super::*;

pub use all::all as render;
