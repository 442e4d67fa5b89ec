pub mod card;
pub mod etl;
pub mod harvester;
pub mod normalize;
pub mod pipeline;
pub mod snapshot;

pub use crate::domain::model::{PageHarvest, TransformResult};
pub use crate::domain::ports::{ConfigProvider, PageSource, Pipeline, Storage};
pub use crate::utils::error::Result;
