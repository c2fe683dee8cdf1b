pub mod batch;
pub mod cli;
pub mod constants;
pub mod crusher;
pub mod error;
pub mod formats;
pub mod logger;
pub mod shell;
pub mod utils;

pub use batch::{batch, batch_compress, fetch_images, BatchSummary};
pub use crusher::{check_tool, CrushOutcome, CrushReport, ImageCrusher};
pub use error::{CrushError, Result};
pub use formats::{is_batch_image, ImageType};
pub use shell::{CommandRunner, ShellOutput, SystemShell};
