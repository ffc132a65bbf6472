//! 2D irregular-shape bin-packing (nesting): geometry kernel, placement
//! oracle, single-bin packer, and multi-bin scheduler, fronted by a
//! request/response layer the HTTP and CLI crates both call into.

pub mod error;
pub mod geom;
pub mod oracle;
pub mod options;
pub mod pack;
pub mod piece;
pub mod request;
pub mod schedule;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::NestingError;
pub use request::{NestRequest, NestResponse};

/// Common exports for quick imports in callers (the HTTP and CLI crates).
pub mod prelude {
    pub use crate::error::{NestingError, Result};
    pub use crate::geom::{Point, Polygon};
    pub use crate::options::{NestOptions, Strategy};
    pub use crate::piece::{Piece, PlacedPiece, UnplacedPiece};
    pub use crate::request::{handle, validate, NestRequest, NestResponse};
    pub use crate::schedule::{run as schedule_run, BinResult, ScheduleResult, Summary};
}
