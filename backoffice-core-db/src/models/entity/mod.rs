pub mod common_enums;
pub mod document;
pub mod event;
pub mod finance;
pub mod letter;
pub mod management;
pub mod work_program;

pub use common_enums::*;
pub use document::*;
pub use event::*;
pub use finance::*;
pub use letter::*;
pub use management::*;
pub use work_program::*;
