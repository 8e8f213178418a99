pub mod casing;
pub mod error;
pub mod instance;
pub mod kubernetes;
pub mod release;
pub mod render_config;
pub mod schema;
pub mod values;

pub use error::AppError;
pub use instance::{ClassSpec, InstanceDocument};
pub use kubernetes::{ConfigMap, INSTANCE_DATA_KEY, ObjectMeta, parse_config_maps};
pub use release::{ChartMetadata, ReleaseInfo};
pub use render_config::RenderConfig;
pub use schema::{ValuesSchema, values_schema};
pub use values::DagsterHelmValues;
