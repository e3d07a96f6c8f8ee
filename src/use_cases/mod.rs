// Use cases layer: workflows over the metadata API port.

pub mod create_base;
pub mod describe_base;
pub mod list_bases;


pub use create_base::CreateBaseUseCase;
pub use describe_base::{DescribeBaseError, DescribeBaseUseCase};
pub use list_bases::{ListBasesError, ListBasesUseCase};
